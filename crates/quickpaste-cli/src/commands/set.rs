use std::path::Path;

use quickpaste_core::controller::shortcut_for_mut;
use quickpaste_core::models::validate_shortcut;
use quickpaste_core::{Action, Platform, StoredShortcut};

use crate::commands::common::{action_title, open_store};
use crate::error::CliError;

pub async fn run_set(
    action: Action,
    accelerator: &str,
    label: Option<&str>,
    settings_path: &Path,
) -> Result<(), CliError> {
    let platform = Platform::current();
    let shortcut = build_shortcut(action, accelerator, label)?;

    let mut store = open_store(settings_path).await;
    let mut settings = store.load().await;
    *shortcut_for_mut(&mut settings, action) = shortcut.clone();
    store.save(&settings).await?;

    println!(
        "{} shortcut set to {}",
        action_title(action),
        shortcut.display(platform)
    );
    Ok(())
}

/// Parse `accelerator` and attach the explicit label, if any.
///
/// Without one the label embedded after `|` is kept; otherwise none is
/// stored and the glyphs are rendered for whichever platform displays it.
pub fn build_shortcut(
    action: Action,
    accelerator: &str,
    label: Option<&str>,
) -> Result<StoredShortcut, CliError> {
    let parsed = validate_shortcut(action.field(), accelerator.trim())?;
    Ok(match label {
        Some(label) => StoredShortcut::with_label(parsed.accelerator, label),
        None => parsed,
    })
}
