//! Error types for quickpaste-core

use thiserror::Error;

/// Result type alias using quickpaste-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quickpaste-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A settings field failed validation at save time
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// The OS refused a hotkey registration
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Underlying settings storage failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistError),

    /// Submit/toggle collaborator failure
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Stored or user-supplied accelerator is malformed
    #[error("Invalid accelerator: {0}")]
    Accelerator(#[from] AcceleratorError),
}

/// A key event that does not form a valid accelerator.
///
/// Never fatal: the capture session stays in `Recording` and keeps listening.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureRejected {
    #[error("modifier key pressed on its own")]
    ModifierOnly,
    #[error("no recognizable key in event")]
    UnrecognizedKey,
    #[error("key '{0}' cannot be bound to a global shortcut")]
    UnsupportedKey(String),
    #[error("shortcut needs at least one modifier")]
    NoModifier,
}

/// Grammar failures when parsing an accelerator string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcceleratorError {
    #[error("accelerator is empty")]
    Empty,
    #[error("accelerator has no key, only modifiers")]
    MissingKey,
    #[error("accelerator needs at least one modifier")]
    NoModifier,
    #[error("modifier '{0}' appears after the key")]
    MisplacedToken(String),
    #[error("modifier '{0}' appears twice")]
    DuplicateModifier(String),
    #[error("key '{0}' is not supported")]
    UnsupportedKey(String),
}

/// A settings record rejected by `ShortcutStore::save`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("shortcut '{field}' is invalid: {source}")]
    Shortcut {
        field: &'static str,
        source: AcceleratorError,
    },
    #[error("shortcut {0} is bound to both actions")]
    DuplicateShortcut(String),
    #[error("opacity {0} must be between 0.3 and 1.0 in steps of 0.05")]
    Opacity(f64),
}

/// OS-level hotkey registration failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The combination is already claimed (usually by another process)
    #[error("shortcut {accelerator} is already in use: {reason}")]
    Conflict { accelerator: String, reason: String },

    /// Any other failure reported by the hotkey service
    #[error("hotkey service failed for {accelerator}: {reason}")]
    Service { accelerator: String, reason: String },
}

/// Settings storage failures.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings store error: {0}")]
    Backend(String),
}

/// Failures of the clipboard and paste collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),
    #[error("Paste simulation failed: {0}")]
    Paste(String),
}
