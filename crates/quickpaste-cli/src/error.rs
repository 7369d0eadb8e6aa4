use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] quickpaste_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Global hotkeys unavailable: {0}")]
    Hotkeys(String),
    #[error("No text to paste")]
    EmptyText,
}

impl From<quickpaste_core::error::ValidationError> for CliError {
    fn from(error: quickpaste_core::error::ValidationError) -> Self {
        Self::Core(error.into())
    }
}

impl From<quickpaste_core::error::AcceleratorError> for CliError {
    fn from(error: quickpaste_core::error::AcceleratorError) -> Self {
        Self::Core(error.into())
    }
}

impl From<quickpaste_core::error::ActionError> for CliError {
    fn from(error: quickpaste_core::error::ActionError) -> Self {
        Self::Core(error.into())
    }
}
