use std::path::Path;

use quickpaste_core::Platform;

use crate::commands::common::{format_settings_lines, open_store};
use crate::error::CliError;

pub async fn run_reset(settings_path: &Path) -> Result<(), CliError> {
    let mut store = open_store(settings_path).await;
    let defaults = store.reset().await?;

    println!("Settings restored to defaults");
    for line in format_settings_lines(&defaults, Platform::current()) {
        println!("{line}");
    }
    Ok(())
}
