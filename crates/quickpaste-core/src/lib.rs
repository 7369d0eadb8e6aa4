//! quickpaste-core - Shortcut and settings core for Quickpaste
//!
//! Everything behind the settings panel and global hotkeys: the accelerator
//! codec, the capture state machine, the persisted settings store, the hotkey
//! registrar and the action bodies that hotkeys trigger. UI and OS
//! integrations plug in through the traits in [`actions`], [`registrar`] and
//! [`store`].

pub mod accelerator;
pub mod actions;
pub mod capture;
pub mod controller;
pub mod error;
pub mod models;
pub mod registrar;
pub mod store;

pub use accelerator::{Accelerator, KeyEvent, Modifier, Platform};
pub use capture::CaptureSession;
pub use controller::ShortcutController;
pub use error::{Error, Result};
pub use models::{AppearanceSettings, Settings, ShortcutSettings, StoredShortcut};
pub use registrar::{Action, HotkeyRegistrar, HotkeyService};
pub use store::{JsonFileBackend, MemoryBackend, SettingsBackend, ShortcutStore};
