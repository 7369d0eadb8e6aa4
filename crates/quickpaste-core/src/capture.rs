//! Shortcut capture session
//!
//! `Idle -> Recording -> Idle`. While recording, each key-down is encoded and,
//! if valid, parked as the pending result. The pending result is committed on
//! the next key-up; losing focus discards it. A capture either commits a
//! complete combination or changes nothing.

use crate::accelerator::{encode, Captured, KeyEvent, Platform};
use crate::error::CaptureRejected;
use crate::models::StoredShortcut;

/// Placeholder shown while recording with nothing captured yet
pub const RECORDING_PROMPT: &str = "Press keys...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    Recording {
        pending: Option<Captured>,
    },
}

/// What happened to a key-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDown {
    /// Not recording; the event belongs to the host
    Ignored,
    /// Valid combination parked until key-up
    Pending(Captured),
    /// Not a valid combination; still recording
    Rejected(CaptureRejected),
}

impl KeyDown {
    /// Whether the host should suppress the event's default behaviour.
    pub const fn is_intercepted(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Debug, Clone)]
pub struct CaptureSession {
    platform: Platform,
    state: CaptureState,
}

impl CaptureSession {
    pub const fn new(platform: Platform) -> Self {
        Self {
            platform,
            state: CaptureState::Idle,
        }
    }

    pub const fn state(&self) -> &CaptureState {
        &self.state
    }

    pub const fn is_recording(&self) -> bool {
        matches!(self.state, CaptureState::Recording { .. })
    }

    /// Capture control gained focus: start recording from scratch.
    pub fn focus(&mut self) {
        tracing::debug!("Shortcut capture started");
        self.state = CaptureState::Recording { pending: None };
    }

    pub fn key_down(&mut self, event: &KeyEvent) -> KeyDown {
        let CaptureState::Recording { pending } = &mut self.state else {
            return KeyDown::Ignored;
        };

        match encode(event, self.platform) {
            Ok(captured) => {
                *pending = Some(captured.clone());
                KeyDown::Pending(captured)
            }
            Err(rejected) => {
                tracing::debug!("Ignoring key '{}' during capture: {rejected}", event.key);
                KeyDown::Rejected(rejected)
            }
        }
    }

    /// Commit the pending result, if any.
    ///
    /// A key-up with nothing pending (e.g. releasing a lone modifier) keeps
    /// recording.
    pub fn key_up(&mut self) -> Option<StoredShortcut> {
        let CaptureState::Recording { pending } = &mut self.state else {
            return None;
        };
        let captured = pending.take()?;

        tracing::debug!("Captured shortcut {}", captured.accelerator);
        self.state = CaptureState::Idle;
        Some(captured.into())
    }

    /// Capture control lost focus: drop whatever was pending.
    pub fn blur(&mut self) {
        if self.is_recording() {
            tracing::debug!("Shortcut capture cancelled");
        }
        self.state = CaptureState::Idle;
    }

    /// Text the capture control shows for `stored`.
    pub fn display_text(&self, stored: &StoredShortcut) -> String {
        match &self.state {
            CaptureState::Recording {
                pending: Some(captured),
            } => captured.label.clone(),
            CaptureState::Recording { pending: None } => RECORDING_PROMPT.to_string(),
            CaptureState::Idle => stored.display(self.platform),
        }
    }
}
