//! Global hotkey registration backed by the `global-hotkey` crate

use std::collections::HashMap;
use std::sync::Arc;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use parking_lot::Mutex;
use quickpaste_core::accelerator::Modifier;
use quickpaste_core::error::RegistrationError;
use quickpaste_core::registrar::{HotkeyCallback, HotkeyService};
use quickpaste_core::{Accelerator, Platform};

type Handlers = Arc<Mutex<HashMap<u32, HotkeyCallback>>>;

/// OS hotkey service for desktop platforms.
///
/// Press events arrive on the crate's global event handler and are routed to
/// the callback registered for the hotkey id. On macOS events are only
/// delivered while the main thread runs an event loop.
pub struct GlobalHotkeyService {
    manager: GlobalHotKeyManager,
    registered: Mutex<HashMap<String, HotKey>>,
    handlers: Handlers,
}

impl GlobalHotkeyService {
    pub fn new() -> Result<Self, global_hotkey::Error> {
        let manager = GlobalHotKeyManager::new()?;
        let handlers: Handlers = Arc::default();

        let dispatch = Arc::clone(&handlers);
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            tracing::debug!("GlobalHotKeyEvent received: id={} state={:?}", event.id, event.state);
            if event.state != HotKeyState::Pressed {
                return;
            }
            let callback = dispatch.lock().get(&event.id).cloned();
            if let Some(callback) = callback {
                callback();
            }
        }));

        Ok(Self {
            manager,
            registered: Mutex::new(HashMap::new()),
            handlers,
        })
    }
}

impl HotkeyService for GlobalHotkeyService {
    fn register(
        &self,
        accelerator: &Accelerator,
        callback: HotkeyCallback,
    ) -> Result<(), RegistrationError> {
        let hotkey = hotkey_for(accelerator)?;
        self.manager
            .register(hotkey)
            .map_err(|error| registration_error(accelerator, &error))?;

        self.handlers.lock().insert(hotkey.id(), callback);
        self.registered.lock().insert(accelerator.to_string(), hotkey);
        Ok(())
    }

    fn unregister(&self, accelerator: &Accelerator) -> Result<(), RegistrationError> {
        let key = accelerator.to_string();
        let Some(hotkey) = self.registered.lock().get(&key).copied() else {
            return Ok(());
        };
        self.manager
            .unregister(hotkey)
            .map_err(|error| service_error(&key, &error))?;

        self.registered.lock().remove(&key);
        self.handlers.lock().remove(&hotkey.id());
        Ok(())
    }

    fn unregister_all(&self) -> Result<(), RegistrationError> {
        let hotkeys = self.registered.lock().values().copied().collect::<Vec<_>>();
        if !hotkeys.is_empty() {
            self.manager
                .unregister_all(&hotkeys)
                .map_err(|error| service_error("all hotkeys", &error))?;
        }

        self.registered.lock().clear();
        self.handlers.lock().clear();
        Ok(())
    }
}

/// Translate a canonical accelerator into a `global-hotkey` key.
pub fn hotkey_for(accelerator: &Accelerator) -> Result<HotKey, RegistrationError> {
    let mut modifiers = Modifiers::empty();
    for modifier in accelerator.modifiers() {
        modifiers |= match modifier.resolve(Platform::current()) {
            Modifier::Command | Modifier::CommandOrControl => Modifiers::META,
            Modifier::Control => Modifiers::CONTROL,
            Modifier::Alt => Modifiers::ALT,
            Modifier::Shift => Modifiers::SHIFT,
        };
    }

    let code = code_for(accelerator.key()).ok_or_else(|| RegistrationError::Service {
        accelerator: accelerator.to_string(),
        reason: format!("no key code for '{}'", accelerator.key()),
    })?;

    Ok(HotKey::new(Some(modifiers), code))
}

fn code_for(key: &str) -> Option<Code> {
    let code = match key {
        "A" => Code::KeyA,
        "B" => Code::KeyB,
        "C" => Code::KeyC,
        "D" => Code::KeyD,
        "E" => Code::KeyE,
        "F" => Code::KeyF,
        "G" => Code::KeyG,
        "H" => Code::KeyH,
        "I" => Code::KeyI,
        "J" => Code::KeyJ,
        "K" => Code::KeyK,
        "L" => Code::KeyL,
        "M" => Code::KeyM,
        "N" => Code::KeyN,
        "O" => Code::KeyO,
        "P" => Code::KeyP,
        "Q" => Code::KeyQ,
        "R" => Code::KeyR,
        "S" => Code::KeyS,
        "T" => Code::KeyT,
        "U" => Code::KeyU,
        "V" => Code::KeyV,
        "W" => Code::KeyW,
        "X" => Code::KeyX,
        "Y" => Code::KeyY,
        "Z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "F1" => Code::F1,
        "F2" => Code::F2,
        "F3" => Code::F3,
        "F4" => Code::F4,
        "F5" => Code::F5,
        "F6" => Code::F6,
        "F7" => Code::F7,
        "F8" => Code::F8,
        "F9" => Code::F9,
        "F10" => Code::F10,
        "F11" => Code::F11,
        "F12" => Code::F12,
        "Space" => Code::Space,
        "Enter" => Code::Enter,
        "Tab" => Code::Tab,
        "Backspace" => Code::Backspace,
        "Delete" => Code::Delete,
        "Escape" => Code::Escape,
        "Up" => Code::ArrowUp,
        "Down" => Code::ArrowDown,
        "Left" => Code::ArrowLeft,
        "Right" => Code::ArrowRight,
        "Home" => Code::Home,
        "End" => Code::End,
        "PageUp" => Code::PageUp,
        "PageDown" => Code::PageDown,
        "Minus" => Code::Minus,
        "Equal" => Code::Equal,
        "BracketLeft" => Code::BracketLeft,
        "BracketRight" => Code::BracketRight,
        "Backslash" => Code::Backslash,
        "Semicolon" => Code::Semicolon,
        "Quote" => Code::Quote,
        "Comma" => Code::Comma,
        "Period" => Code::Period,
        "Slash" => Code::Slash,
        "Backquote" => Code::Backquote,
        _ => return None,
    };
    Some(code)
}

fn registration_error(accelerator: &Accelerator, error: &global_hotkey::Error) -> RegistrationError {
    match error {
        global_hotkey::Error::AlreadyRegistered(_) | global_hotkey::Error::FailedToRegister(_) => {
            RegistrationError::Conflict {
                accelerator: accelerator.to_string(),
                reason: error.to_string(),
            }
        }
        _ => service_error(&accelerator.to_string(), error),
    }
}

fn service_error(accelerator: &str, error: &global_hotkey::Error) -> RegistrationError {
    RegistrationError::Service {
        accelerator: accelerator.to_string(),
        reason: error.to_string(),
    }
}
