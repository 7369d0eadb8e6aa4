//! Desktop collaborators for the paste action

use std::fmt;

use arboard::Clipboard;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use parking_lot::Mutex;
use quickpaste_core::actions::{ClipboardWriter, PasteSimulator, WindowControl};
use quickpaste_core::error::ActionError;
use quickpaste_core::Platform;

/// System clipboard.
///
/// Kept alive for the whole command; on X11 the copied text is only served
/// while the owning clipboard exists.
pub struct SystemClipboard {
    inner: Mutex<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ActionError> {
        let clipboard =
            Clipboard::new().map_err(|error| ActionError::Clipboard(error.to_string()))?;
        Ok(Self {
            inner: Mutex::new(clipboard),
        })
    }
}

impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ActionError> {
        self.inner
            .lock()
            .set_text(text.to_string())
            .map_err(|error| ActionError::Clipboard(error.to_string()))
    }
}

/// Sends the platform paste chord to whatever app has focus.
pub struct KeystrokePaster;

impl KeystrokePaster {
    pub const fn paste_modifier(platform: Platform) -> Key {
        match platform {
            Platform::Mac => Key::Meta,
            Platform::Other => Key::Control,
        }
    }
}

impl PasteSimulator for KeystrokePaster {
    async fn simulate_paste(&self) -> Result<(), ActionError> {
        let modifier = Self::paste_modifier(Platform::current());
        let mut enigo = Enigo::new(&Settings::default()).map_err(paste_error)?;

        enigo.key(modifier, Direction::Press).map_err(paste_error)?;
        let clicked = enigo
            .key(Key::Unicode('v'), Direction::Click)
            .map_err(paste_error);
        // The modifier is released even when the click failed
        let released = enigo.key(modifier, Direction::Release).map_err(paste_error);
        clicked.and(released)?;

        tracing::debug!("Sent paste keystroke");
        Ok(())
    }
}

fn paste_error(error: impl fmt::Display) -> ActionError {
    ActionError::Paste(error.to_string())
}

/// The terminal has no editor window; window operations are no-ops.
pub struct TerminalWindow;

impl WindowControl for TerminalWindow {
    async fn show(&self) -> Result<(), ActionError> {
        tracing::debug!("No window to show");
        Ok(())
    }

    async fn hide(&self) -> Result<(), ActionError> {
        tracing::debug!("No window to hide");
        Ok(())
    }

    async fn set_focus(&self) -> Result<(), ActionError> {
        Ok(())
    }

    async fn is_visible(&self) -> Result<bool, ActionError> {
        Ok(false)
    }
}
