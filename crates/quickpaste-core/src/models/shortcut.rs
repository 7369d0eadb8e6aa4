//! Stored shortcut value

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::accelerator::{Accelerator, Captured, Modifier, Platform};
use crate::error::AcceleratorError;

/// Separates the accelerator from its display label in the persisted form.
pub const LABEL_DELIMITER: char = '|';

/// A shortcut as persisted: a mandatory accelerator plus an optional label
/// that preserves the exact glyphs the user saw at capture time.
///
/// On disk this is a single `"accelerator|label"` string; without the
/// delimiter the label is derived from the accelerator when displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoredShortcut {
    pub accelerator: Accelerator,
    pub label: Option<String>,
}

impl StoredShortcut {
    pub const fn new(accelerator: Accelerator) -> Self {
        Self {
            accelerator,
            label: None,
        }
    }

    pub fn with_label(accelerator: Accelerator, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            accelerator,
            label: (!label.trim().is_empty()).then_some(label),
        }
    }

    /// Parse the persisted `"accelerator|label"` form.
    pub fn parse(value: &str) -> Result<Self, AcceleratorError> {
        match value.split_once(LABEL_DELIMITER) {
            Some((accelerator, label)) => Ok(Self::with_label(Accelerator::parse(accelerator)?, label)),
            None => Ok(Self::new(Accelerator::parse(value)?)),
        }
    }

    /// Label to show for this shortcut.
    pub fn display(&self, platform: Platform) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.accelerator.format(platform))
    }

    /// Default toggle-window shortcut: primary modifier + Shift + Space.
    pub fn default_toggle_window() -> Self {
        Self::new(Accelerator::from_parts(
            vec![Modifier::CommandOrControl, Modifier::Shift],
            "Space",
        ))
    }

    /// Default submit-and-paste shortcut: primary modifier + Enter.
    pub fn default_submit_paste() -> Self {
        Self::new(Accelerator::from_parts(
            vec![Modifier::CommandOrControl],
            "Enter",
        ))
    }
}

impl From<Captured> for StoredShortcut {
    fn from(captured: Captured) -> Self {
        Self::with_label(captured.accelerator, captured.label)
    }
}

impl fmt::Display for StoredShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}{LABEL_DELIMITER}{label}", self.accelerator),
            None => write!(f, "{}", self.accelerator),
        }
    }
}

impl TryFrom<String> for StoredShortcut {
    type Error = AcceleratorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StoredShortcut> for String {
    fn from(shortcut: StoredShortcut) -> Self {
        shortcut.to_string()
    }
}
