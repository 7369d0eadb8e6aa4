//! Data models for Quickpaste

mod settings;
mod shortcut;

pub use settings::{
    validate_opacity, validate_shortcut, AppearanceSettings, Settings, ShortcutSettings,
    OPACITY_DEFAULT, OPACITY_MAX, OPACITY_MIN, OPACITY_STEP,
};
pub use shortcut::{StoredShortcut, LABEL_DELIMITER};
