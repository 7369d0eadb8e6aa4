//! Shortcut store
//!
//! Loads and saves the settings record through a [`SettingsBackend`].
//! Loading never fails: every field that is missing, unreadable or invalid
//! falls back to its default on its own. Saving validates the whole record
//! first and leaves the previous durable state untouched on any failure.

mod backend;

use serde_json::{json, Value};

pub use backend::{JsonFileBackend, MemoryBackend, SettingsBackend};

use crate::accelerator::Platform;
use crate::error::{PersistError, Result};
use crate::models::{
    validate_opacity, validate_shortcut, AppearanceSettings, Settings, ShortcutSettings,
    StoredShortcut,
};

/// Backend key holding the shortcut bindings
pub const SHORTCUTS_KEY: &str = "shortcuts";
/// Backend key holding the appearance section
pub const APPEARANCE_KEY: &str = "appearance";
/// Backend key holding the record version
pub const VERSION_KEY: &str = "version";
/// Version written by this build
pub const SETTINGS_VERSION: u64 = 1;

const TOGGLE_WINDOW_FIELD: &str = "toggleWindow";
const SUBMIT_PASTE_FIELD: &str = "submitPaste";
const OPACITY_FIELD: &str = "opacity";

/// Validated settings persistence
pub struct ShortcutStore<B> {
    backend: B,
    platform: Platform,
}

impl<B: SettingsBackend> ShortcutStore<B> {
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            platform: Platform::current(),
        }
    }

    /// Resolve `CommandOrControl` for `platform` when checking for duplicates.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Load the settings record, substituting defaults per field.
    pub async fn load(&self) -> Settings {
        match self.read(VERSION_KEY).await.as_ref().and_then(Value::as_u64) {
            Some(version) if version > SETTINGS_VERSION => {
                tracing::warn!(
                    "Settings version {version} is newer than {SETTINGS_VERSION}; reading known fields"
                );
            }
            _ => {}
        }

        let shortcuts = self.read(SHORTCUTS_KEY).await;
        let appearance = self.read(APPEARANCE_KEY).await;

        Settings {
            shortcuts: shortcuts_from_value(shortcuts.as_ref(), self.platform),
            appearance: appearance_from_value(appearance.as_ref()),
        }
    }

    /// Validate and persist `settings`.
    pub async fn save(&mut self, settings: &Settings) -> Result<()> {
        settings.validate(self.platform)?;

        let previous = [
            (SHORTCUTS_KEY, self.backend.get(SHORTCUTS_KEY).await?),
            (APPEARANCE_KEY, self.backend.get(APPEARANCE_KEY).await?),
            (VERSION_KEY, self.backend.get(VERSION_KEY).await?),
        ];

        if let Err(error) = self.write(settings).await {
            tracing::error!("Failed to save settings: {error}");
            self.restore(previous).await;
            return Err(error.into());
        }

        tracing::info!(
            "Saved settings: toggle={}, submit={}, opacity={}",
            settings.shortcuts.toggle_window.accelerator,
            settings.shortcuts.submit_paste.accelerator,
            settings.appearance.opacity
        );
        Ok(())
    }

    /// Persist and return the built-in defaults.
    pub async fn reset(&mut self) -> Result<Settings> {
        let defaults = Settings::default();
        self.save(&defaults).await?;
        Ok(defaults)
    }

    /// Replace the shortcut section of `current` and save.
    pub async fn update_shortcuts(
        &mut self,
        current: &Settings,
        shortcuts: ShortcutSettings,
    ) -> Result<Settings> {
        let updated = Settings {
            shortcuts,
            ..current.clone()
        };
        self.save(&updated).await?;
        Ok(updated)
    }

    /// Replace the appearance section of `current` and save.
    pub async fn update_appearance(
        &mut self,
        current: &Settings,
        appearance: AppearanceSettings,
    ) -> Result<Settings> {
        let updated = Settings {
            appearance,
            ..current.clone()
        };
        self.save(&updated).await?;
        Ok(updated)
    }

    async fn read(&self, key: &str) -> Option<Value> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!("Failed to read settings key '{key}', using defaults: {error}");
                None
            }
        }
    }

    async fn write(&mut self, settings: &Settings) -> std::result::Result<(), PersistError> {
        self.backend
            .set(SHORTCUTS_KEY, serde_json::to_value(&settings.shortcuts)?)
            .await?;
        self.backend
            .set(APPEARANCE_KEY, serde_json::to_value(settings.appearance)?)
            .await?;
        self.backend
            .set(VERSION_KEY, json!(SETTINGS_VERSION))
            .await?;
        self.backend.save().await
    }

    async fn restore(&mut self, previous: [(&str, Option<Value>); 3]) {
        for (key, value) in previous {
            let restored = match value {
                Some(value) => self.backend.set(key, value).await,
                None => self.backend.remove(key).await,
            };
            if let Err(error) = restored {
                tracing::warn!("Failed to roll back staged settings key '{key}': {error}");
            }
        }
    }
}

fn shortcuts_from_value(value: Option<&Value>, platform: Platform) -> ShortcutSettings {
    let defaults = ShortcutSettings::default();
    let Some(value) = value else {
        return defaults;
    };

    let mut shortcuts = ShortcutSettings {
        toggle_window: shortcut_field(value, TOGGLE_WINDOW_FIELD)
            .unwrap_or_else(|| defaults.toggle_window.clone()),
        submit_paste: shortcut_field(value, SUBMIT_PASTE_FIELD)
            .unwrap_or_else(|| defaults.submit_paste.clone()),
    };

    // A loaded record must pass the same duplicate rule as a saved one
    if shortcuts.is_duplicate(platform) {
        tracing::warn!(
            "Stored '{SUBMIT_PASTE_FIELD}' duplicates '{TOGGLE_WINDOW_FIELD}' ({}); using default",
            shortcuts.submit_paste.accelerator
        );
        shortcuts.submit_paste = defaults.submit_paste;
    }
    if shortcuts.is_duplicate(platform) {
        tracing::warn!(
            "Stored '{TOGGLE_WINDOW_FIELD}' duplicates the default '{SUBMIT_PASTE_FIELD}'; using default"
        );
        shortcuts.toggle_window = defaults.toggle_window;
    }
    shortcuts
}

fn shortcut_field(section: &Value, field: &'static str) -> Option<StoredShortcut> {
    let raw = section.get(field)?;
    let Some(raw) = raw.as_str() else {
        tracing::warn!("Stored shortcut '{field}' is not a string; using default");
        return None;
    };
    match validate_shortcut(field, raw) {
        Ok(shortcut) => Some(shortcut),
        Err(error) => {
            tracing::warn!("Ignoring stored shortcut: {error}");
            None
        }
    }
}

fn appearance_from_value(value: Option<&Value>) -> AppearanceSettings {
    let opacity = value
        .and_then(|section| section.get(OPACITY_FIELD))
        .and_then(|opacity| match opacity.as_f64() {
            Some(opacity) => validate_opacity(opacity)
                .map_err(|error| tracing::warn!("Ignoring stored opacity: {error}"))
                .ok(),
            None => {
                tracing::warn!("Stored opacity is not a number; using default");
                None
            }
        });

    opacity.map_or_else(AppearanceSettings::default, |opacity| AppearanceSettings {
        opacity,
    })
}
