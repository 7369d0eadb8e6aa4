//! Hotkey action bodies: window toggle and submit-and-paste
//!
//! These only sequence calls to the window, clipboard and paste
//! collaborators; the collaborators themselves live in the UI layer.

use std::time::Duration;

use crate::error::ActionError;

/// Time for OS focus to return to the previously active app before pasting
pub const PASTE_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Editor window controls
#[allow(async_fn_in_trait)]
pub trait WindowControl {
    async fn show(&self) -> Result<(), ActionError>;
    async fn hide(&self) -> Result<(), ActionError>;
    async fn set_focus(&self) -> Result<(), ActionError>;
    async fn is_visible(&self) -> Result<bool, ActionError>;
}

/// System clipboard
#[allow(async_fn_in_trait)]
pub trait ClipboardWriter {
    async fn write_text(&self, text: &str) -> Result<(), ActionError>;
}

/// Synthetic paste keystroke into the focused application
#[allow(async_fn_in_trait)]
pub trait PasteSimulator {
    async fn simulate_paste(&self) -> Result<(), ActionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing but whitespace was typed; nothing happened
    Empty,
    Pasted,
}

/// Show the window if hidden, hide it if shown.
///
/// Returns whether the window is visible afterwards.
pub async fn toggle_window<W: WindowControl>(window: &W) -> Result<bool, ActionError> {
    if window.is_visible().await? {
        window.hide().await?;
        tracing::debug!("Window hidden");
        Ok(false)
    } else {
        window.show().await?;
        window.set_focus().await?;
        tracing::debug!("Window shown");
        Ok(true)
    }
}

/// Hide the window without pasting.
pub async fn cancel<W: WindowControl>(window: &W) -> Result<(), ActionError> {
    window.hide().await
}

/// Copy `text`, hide the window, wait `settle`, then paste.
///
/// Paste is never attempted unless the clipboard write succeeded.
pub async fn submit_and_paste<C, W, P>(
    text: &str,
    clipboard: &C,
    window: &W,
    paster: &P,
    settle: Duration,
) -> Result<SubmitOutcome, ActionError>
where
    C: ClipboardWriter,
    W: WindowControl,
    P: PasteSimulator,
{
    if text.trim().is_empty() {
        return Ok(SubmitOutcome::Empty);
    }

    clipboard.write_text(text).await?;
    window.hide().await?;
    tokio::time::sleep(settle).await;
    paster.simulate_paste().await?;

    tracing::info!("Pasted {} characters", text.chars().count());
    Ok(SubmitOutcome::Pasted)
}
