use std::path::Path;

use quickpaste_core::Platform;

use crate::commands::common::{format_settings_lines, open_store};
use crate::error::CliError;

pub async fn run_show(as_json: bool, settings_path: &Path) -> Result<(), CliError> {
    let settings = open_store(settings_path).await.load().await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        for line in format_settings_lines(&settings, Platform::current()) {
            println!("{line}");
        }
    }

    Ok(())
}
