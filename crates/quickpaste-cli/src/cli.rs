use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quickpaste_core::{Action, Platform};

#[derive(Parser)]
#[command(name = "quickpaste")]
#[command(about = "Manage Quickpaste shortcuts, appearance and global hotkeys")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Bind an action to a shortcut
    Set {
        /// Action to rebind
        #[arg(value_enum)]
        action: ActionArg,
        /// Accelerator, e.g. CommandOrControl+Shift+Space
        accelerator: String,
        /// Display label (derived from the accelerator when omitted)
        #[arg(long, value_name = "TEXT")]
        label: Option<String>,
    },
    /// Set editor window opacity (0.3 to 1.0 in steps of 0.05)
    Opacity {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Restore default shortcuts and appearance
    Reset,
    /// Render an accelerator as a display label
    Format {
        accelerator: String,
        /// Glyph set to use (host platform when omitted)
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,
    },
    /// Register the saved global hotkeys and log each fire until Ctrl+C
    Listen,
    /// Copy text to the clipboard and paste it into the focused app
    Paste {
        /// Text to paste
        text: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ActionArg {
    Toggle,
    Submit,
}

impl From<ActionArg> for Action {
    fn from(value: ActionArg) -> Self {
        match value {
            ActionArg::Toggle => Self::ToggleWindow,
            ActionArg::Submit => Self::SubmitPaste,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PlatformArg {
    Mac,
    Other,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Mac => Self::Mac,
            PlatformArg::Other => Self::Other,
        }
    }
}
