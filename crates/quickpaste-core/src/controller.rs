//! Ties capture, persistence and registration together
//!
//! Capture -> codec -> store (persist) -> registrar (re-register). The store
//! never talks to the registrar itself; this controller re-registers only
//! after a save succeeded.

use std::collections::HashMap;
use std::sync::Arc;

use crate::accelerator::Platform;
use crate::capture::CaptureSession;
use crate::error::{RegistrationError, Result};
use crate::models::{Settings, StoredShortcut};
use crate::registrar::{Action, HotkeyCallback, HotkeyRegistrar, HotkeyService};
use crate::store::{SettingsBackend, ShortcutStore};

/// Stored shortcut for `action`.
pub const fn shortcut_for(settings: &Settings, action: Action) -> &StoredShortcut {
    match action {
        Action::ToggleWindow => &settings.shortcuts.toggle_window,
        Action::SubmitPaste => &settings.shortcuts.submit_paste,
    }
}

/// Mutable stored shortcut for `action`.
pub fn shortcut_for_mut(settings: &mut Settings, action: Action) -> &mut StoredShortcut {
    match action {
        Action::ToggleWindow => &mut settings.shortcuts.toggle_window,
        Action::SubmitPaste => &mut settings.shortcuts.submit_paste,
    }
}

pub struct ShortcutController<B, S> {
    store: ShortcutStore<B>,
    registrar: HotkeyRegistrar<S>,
    settings: Settings,
    callbacks: HashMap<Action, HotkeyCallback>,
    platform: Platform,
}

impl<B: SettingsBackend, S: HotkeyService> ShortcutController<B, S> {
    /// Load settings from `store`; nothing is registered yet.
    ///
    /// Capture and validation both use the store's platform.
    pub async fn load(store: ShortcutStore<B>, registrar: HotkeyRegistrar<S>) -> Self {
        let settings = store.load().await;
        let platform = store.platform();
        Self {
            store,
            registrar,
            settings,
            callbacks: HashMap::new(),
            platform,
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self.store = self.store.with_platform(platform);
        self
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn registrar(&self) -> &HotkeyRegistrar<S> {
        &self.registrar
    }

    pub const fn store(&self) -> &ShortcutStore<B> {
        &self.store
    }

    /// Set the callback run when `action`'s hotkey fires.
    pub fn on_action<F>(&mut self, action: Action, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callbacks.insert(action, Arc::new(callback));
    }

    /// Register every action that has a callback.
    ///
    /// Returns the actions the OS refused; the others stay registered.
    pub fn apply_bindings(&self) -> Vec<(Action, RegistrationError)> {
        Action::ALL
            .into_iter()
            .filter_map(|action| self.bind(action).err().map(|error| (action, error)))
            .collect()
    }

    /// Start recording a new shortcut for `action`.
    ///
    /// The action's current hotkey is released so pressing it is captured
    /// instead of firing.
    pub fn begin_capture(
        &self,
        action: Action,
    ) -> std::result::Result<CaptureSession, RegistrationError> {
        self.registrar.unbind(action)?;
        let mut session = CaptureSession::new(self.platform);
        session.focus();
        Ok(session)
    }

    /// Abandon a capture and restore the stored binding.
    pub fn cancel_capture(&self, action: Action) -> std::result::Result<(), RegistrationError> {
        self.bind(action)
    }

    /// Persist `shortcut` for `action` and re-register it.
    pub async fn commit_shortcut(
        &mut self,
        action: Action,
        shortcut: StoredShortcut,
    ) -> Result<()> {
        let mut updated = self.settings.clone();
        *shortcut_for_mut(&mut updated, action) = shortcut;
        self.save(updated).await
    }

    /// Persist `settings` and re-register whatever changed.
    ///
    /// Validation or persistence failures leave both the saved settings and
    /// the live bindings as they were.
    pub async fn save(&mut self, settings: Settings) -> Result<()> {
        if let Err(error) = self.store.save(&settings).await {
            self.restore_bindings();
            return Err(error);
        }

        let previous = std::mem::replace(&mut self.settings, settings);
        let mut first_error = None;
        for action in Action::ALL {
            let unchanged = shortcut_for(&previous, action).accelerator
                == shortcut_for(&self.settings, action).accelerator;
            if unchanged && self.registrar.binding(action).is_some() {
                continue;
            }
            if let Err(error) = self.bind(action) {
                first_error.get_or_insert(error);
            }
        }

        first_error.map_or(Ok(()), |error| Err(error.into()))
    }

    /// Persist defaults and re-register them.
    pub async fn reset(&mut self) -> Result<()> {
        self.save(Settings::default()).await
    }

    /// Release every hotkey (shutdown).
    pub fn shutdown(&self) -> std::result::Result<(), RegistrationError> {
        self.registrar.unregister_all()
    }

    fn bind(&self, action: Action) -> std::result::Result<(), RegistrationError> {
        let Some(callback) = self.callbacks.get(&action).cloned() else {
            return Ok(());
        };
        let shortcut = shortcut_for(&self.settings, action);
        self.registrar
            .set_binding(action, &shortcut.accelerator, move || callback())
    }

    fn restore_bindings(&self) {
        for action in Action::ALL {
            if self.registrar.binding(action).is_none() {
                if let Err(error) = self.bind(action) {
                    tracing::warn!("Failed to restore binding for {action}: {error}");
                }
            }
        }
    }
}
