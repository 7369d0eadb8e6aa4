//! Quickpaste CLI - settings and global hotkeys from the terminal
//!
//! Inspect and change the saved shortcuts and window opacity, try out the
//! global hotkeys, and paste text into the focused app.

mod cli;
mod commands;
mod desktop;
mod error;
mod hotkey;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::filter::{Directive, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_settings_path;
use crate::commands::format::run_format;
use crate::commands::listen::run_listen;
use crate::commands::opacity::run_opacity;
use crate::commands::paste::run_paste;
use crate::commands::reset::run_reset;
use crate::commands::set::run_set;
use crate::commands::show::run_show;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "quickpaste=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let directive: Directive = DEFAULT_LOG_DIRECTIVE
        .parse()
        .map_err(|error| CliError::Config(format!("Invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();
    let settings_path = resolve_settings_path(cli.settings)?;

    match cli.command {
        Commands::Show { json } => run_show(json, &settings_path).await?,
        Commands::Set {
            action,
            accelerator,
            label,
        } => run_set(action.into(), &accelerator, label.as_deref(), &settings_path).await?,
        Commands::Opacity { value } => run_opacity(value, &settings_path).await?,
        Commands::Reset => run_reset(&settings_path).await?,
        Commands::Format {
            accelerator,
            platform,
        } => run_format(&accelerator, platform.map(Into::into))?,
        Commands::Listen => run_listen(&settings_path).await?,
        Commands::Paste { text } => run_paste(&text).await?,
    }

    Ok(())
}
