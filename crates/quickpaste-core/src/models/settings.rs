//! Application settings model

use serde::{Deserialize, Serialize};

use super::StoredShortcut;
use crate::accelerator::Platform;
use crate::error::ValidationError;

/// Lowest allowed window opacity
pub const OPACITY_MIN: f64 = 0.3;
/// Highest allowed window opacity
pub const OPACITY_MAX: f64 = 1.0;
/// Opacity slider granularity
pub const OPACITY_STEP: f64 = 0.05;
/// Opacity used when none is stored
pub const OPACITY_DEFAULT: f64 = 1.0;

const OPACITY_EPSILON: f64 = 1e-6;

/// The two customizable bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutSettings {
    /// Shows or hides the editor window from anywhere
    pub toggle_window: StoredShortcut,
    /// Copies the text, hides the window and pastes into the previous app
    pub submit_paste: StoredShortcut,
}

impl ShortcutSettings {
    /// Whether both actions resolve to the same combination on `platform`.
    pub fn is_duplicate(&self, platform: Platform) -> bool {
        self.toggle_window.accelerator.resolved(platform)
            == self.submit_paste.accelerator.resolved(platform)
    }
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        Self {
            toggle_window: StoredShortcut::default_toggle_window(),
            submit_paste: StoredShortcut::default_submit_paste(),
        }
    }
}

/// Window appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    /// Window opacity in `[0.3, 1.0]`, steps of `0.05`
    pub opacity: f64,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            opacity: OPACITY_DEFAULT,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub shortcuts: ShortcutSettings,
    pub appearance: AppearanceSettings,
}

impl Settings {
    /// Check every field against the settings invariants.
    ///
    /// `CommandOrControl` is resolved for `platform` before the two
    /// shortcuts are compared.
    pub fn validate(&self, platform: Platform) -> Result<(), ValidationError> {
        validate_shortcut("toggleWindow", &self.shortcuts.toggle_window.to_string())?;
        validate_shortcut("submitPaste", &self.shortcuts.submit_paste.to_string())?;

        if self.shortcuts.is_duplicate(platform) {
            return Err(ValidationError::DuplicateShortcut(
                self.shortcuts.toggle_window.accelerator.to_string(),
            ));
        }

        validate_opacity(self.appearance.opacity)?;
        Ok(())
    }
}

/// Parse a persisted shortcut string, attributing failures to `field`.
pub fn validate_shortcut(field: &'static str, value: &str) -> Result<StoredShortcut, ValidationError> {
    StoredShortcut::parse(value).map_err(|source| ValidationError::Shortcut { field, source })
}

/// Accept an opacity inside `[0.3, 1.0]` that sits on the `0.05` grid.
///
/// Out-of-range values are rejected, never clamped.
pub fn validate_opacity(opacity: f64) -> Result<f64, ValidationError> {
    if !opacity.is_finite()
        || opacity < OPACITY_MIN - OPACITY_EPSILON
        || opacity > OPACITY_MAX + OPACITY_EPSILON
    {
        return Err(ValidationError::Opacity(opacity));
    }

    let steps = (opacity - OPACITY_MIN) / OPACITY_STEP;
    if (steps - steps.round()).abs() > OPACITY_EPSILON {
        return Err(ValidationError::Opacity(opacity));
    }
    Ok(opacity)
}
