use std::path::Path;

use quickpaste_core::models::validate_opacity;
use quickpaste_core::AppearanceSettings;

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_opacity(value: f64, settings_path: &Path) -> Result<(), CliError> {
    let opacity = validate_opacity(value)?;

    let mut store = open_store(settings_path).await;
    let current = store.load().await;
    store
        .update_appearance(&current, AppearanceSettings { opacity })
        .await?;

    println!("Opacity set to {opacity:.2}");
    Ok(())
}
