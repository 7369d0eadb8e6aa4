use std::path::{Path, PathBuf};

use quickpaste_core::controller::shortcut_for;
use quickpaste_core::{Action, JsonFileBackend, Platform, Settings, ShortcutStore};

use crate::error::CliError;

pub const SETTINGS_DIR_NAME: &str = "quickpaste";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub fn default_settings_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve config directory".to_string()))
}

pub fn resolve_settings_path(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    explicit.map_or_else(default_settings_path, Ok)
}

/// Open the settings file. An unreadable file is treated as empty so the
/// app still starts on defaults; the next save overwrites it.
pub async fn open_store(path: &Path) -> ShortcutStore<JsonFileBackend> {
    let backend = match JsonFileBackend::open(path).await {
        Ok(backend) => backend,
        Err(error) => {
            tracing::warn!(
                "Ignoring unreadable settings file {}: {error}",
                path.display()
            );
            JsonFileBackend::empty(path)
        }
    };
    ShortcutStore::new(backend)
}

pub const fn action_title(action: Action) -> &'static str {
    match action {
        Action::ToggleWindow => "Toggle window",
        Action::SubmitPaste => "Submit & paste",
    }
}

pub fn format_settings_lines(settings: &Settings, platform: Platform) -> Vec<String> {
    let mut lines = Action::ALL
        .into_iter()
        .map(|action| {
            let shortcut = shortcut_for(settings, action);
            format!(
                "{:<15} {}  ({})",
                format!("{}:", action_title(action)),
                shortcut.display(platform),
                shortcut.accelerator
            )
        })
        .collect::<Vec<_>>();
    lines.push(format!(
        "{:<15} {:.2}",
        "Opacity:", settings.appearance.opacity
    ));
    lines
}
