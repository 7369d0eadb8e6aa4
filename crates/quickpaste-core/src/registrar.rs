//! Global hotkey registration
//!
//! The registrar owns at most one OS registration per [`Action`]. Rebinding
//! is always unregister-then-register under one lock, so an action never has
//! two live registrations. Every fire passes through a per-binding debounce
//! window before the action's callback runs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::accelerator::{Accelerator, Platform};
use crate::error::RegistrationError;

/// Minimum interval between two accepted fires of the same action
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Callback invoked when a hotkey fires
pub type HotkeyCallback = Arc<dyn Fn() + Send + Sync>;

/// Logical actions that can be bound to a global hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    ToggleWindow,
    SubmitPaste,
}

impl Action {
    pub const ALL: [Self; 2] = [Self::ToggleWindow, Self::SubmitPaste];

    /// Settings field name for this action
    pub const fn field(self) -> &'static str {
        match self {
            Self::ToggleWindow => "toggleWindow",
            Self::SubmitPaste => "submitPaste",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// The OS global-hotkey service
///
/// Accelerators handed to it are canonical and already resolved for the
/// platform (no `CommandOrControl`). Implementations report combinations
/// claimed elsewhere as [`RegistrationError::Conflict`].
pub trait HotkeyService {
    fn register(
        &self,
        accelerator: &Accelerator,
        callback: HotkeyCallback,
    ) -> Result<(), RegistrationError>;

    fn unregister(&self, accelerator: &Accelerator) -> Result<(), RegistrationError>;

    fn unregister_all(&self) -> Result<(), RegistrationError>;
}

/// Time-based duplicate suppression.
///
/// The check and the timestamp update happen under one lock, so two
/// near-simultaneous deliveries cannot both pass. A suppressed fire does not
/// move the window.
///
/// Two genuinely separate presses inside the window are indistinguishable
/// from a duplicate delivery and the second one is dropped too.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_fired: Mutex<Option<Instant>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: Mutex::new(None),
        }
    }

    /// Returns `true` if a fire at `now` should run.
    pub fn try_fire(&self, now: Instant) -> bool {
        let mut last_fired = self.last_fired.lock();
        if let Some(previous) = *last_fired {
            if now.saturating_duration_since(previous) < self.window {
                return false;
            }
        }
        *last_fired = Some(now);
        true
    }
}

struct Trigger {
    action: Action,
    debouncer: Debouncer,
    callback: HotkeyCallback,
}

impl Trigger {
    fn fire_at(&self, now: Instant) -> bool {
        if !self.debouncer.try_fire(now) {
            tracing::debug!("Suppressed duplicate fire for {}", self.action);
            return false;
        }
        tracing::debug!("Hotkey fired for {}", self.action);
        (self.callback)();
        true
    }
}

struct Binding {
    accelerator: Accelerator,
    trigger: Arc<Trigger>,
}

/// Owner of the active-registration table
pub struct HotkeyRegistrar<S> {
    service: S,
    platform: Platform,
    debounce_window: Duration,
    bindings: Mutex<HashMap<Action, Binding>>,
}

impl<S: HotkeyService> HotkeyRegistrar<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            platform: Platform::current(),
            debounce_window: DEBOUNCE_WINDOW,
            bindings: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve `CommandOrControl` for `platform` instead of the host's.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Bind `action` to `accelerator`, replacing any existing binding.
    ///
    /// The old registration is removed before the new one is attempted. If
    /// the old one cannot be removed it stays bound and the new one is not
    /// attempted. If the OS refuses the new combination the action is left
    /// unbound.
    pub fn set_binding<F>(
        &self,
        action: Action,
        accelerator: &Accelerator,
        callback: F,
    ) -> Result<(), RegistrationError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let accelerator = accelerator.resolved(self.platform);
        let mut bindings = self.bindings.lock();

        if let Some(previous) = bindings.get(&action) {
            if let Err(error) = self.service.unregister(&previous.accelerator) {
                tracing::error!(
                    "Failed to unregister {} for {action}, keeping it: {error}",
                    previous.accelerator
                );
                return Err(error);
            }
            bindings.remove(&action);
        }

        let trigger = Arc::new(Trigger {
            action,
            debouncer: Debouncer::new(self.debounce_window),
            callback: Arc::new(callback),
        });
        let fired = Arc::clone(&trigger);
        let handler: HotkeyCallback = Arc::new(move || {
            fired.fire_at(Instant::now());
        });

        if let Err(error) = self.service.register(&accelerator, handler) {
            tracing::error!("Failed to register {accelerator} for {action}: {error}");
            return Err(error);
        }

        tracing::info!("Registered global hotkey {accelerator} for {action}");
        bindings.insert(
            action,
            Binding {
                accelerator,
                trigger,
            },
        );
        Ok(())
    }

    /// Remove the binding for `action`. Unbinding an unbound action is a no-op.
    pub fn unbind(&self, action: Action) -> Result<(), RegistrationError> {
        let mut bindings = self.bindings.lock();
        let Some(previous) = bindings.get(&action) else {
            return Ok(());
        };
        self.service.unregister(&previous.accelerator)?;
        tracing::info!("Unregistered global hotkey {} for {action}", previous.accelerator);
        bindings.remove(&action);
        Ok(())
    }

    /// Remove every binding. Safe to call repeatedly.
    pub fn unregister_all(&self) -> Result<(), RegistrationError> {
        let mut bindings = self.bindings.lock();
        self.service.unregister_all()?;
        bindings.clear();
        Ok(())
    }

    /// Accelerator currently registered for `action`.
    pub fn binding(&self, action: Action) -> Option<Accelerator> {
        self.bindings
            .lock()
            .get(&action)
            .map(|binding| binding.accelerator.clone())
    }

    /// Deliver a fire for `action` now. Returns whether the callback ran.
    pub fn fire(&self, action: Action) -> bool {
        self.fire_at(action, Instant::now())
    }

    /// Deliver a fire for `action` as if it happened at `now`.
    pub fn fire_at(&self, action: Action, now: Instant) -> bool {
        let trigger = self
            .bindings
            .lock()
            .get(&action)
            .map(|binding| Arc::clone(&binding.trigger));
        trigger.is_some_and(|trigger| trigger.fire_at(now))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Register(String),
        Unregister(String),
        UnregisterAll,
    }

    /// Hotkey service that records calls and refuses `claimed` combos
    #[derive(Default)]
    pub struct MockService {
        pub calls: Mutex<Vec<Call>>,
        pub live: Mutex<HashMap<String, HotkeyCallback>>,
        pub claimed: Vec<String>,
        pub stuck: Vec<String>,
    }

    impl MockService {
        pub fn claiming(accelerators: &[&str]) -> Self {
            Self {
                claimed: accelerators.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }

        /// Service that refuses to release `accelerators`.
        pub fn stuck(accelerators: &[&str]) -> Self {
            Self {
                stuck: accelerators.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }

        pub fn live_accelerators(&self) -> Vec<String> {
            let mut live = self.live.lock().keys().cloned().collect::<Vec<_>>();
            live.sort();
            live
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        pub fn press(&self, accelerator: &str) {
            let callback = self.live.lock().get(accelerator).cloned();
            if let Some(callback) = callback {
                callback();
            }
        }
    }

    impl HotkeyService for MockService {
        fn register(
            &self,
            accelerator: &Accelerator,
            callback: HotkeyCallback,
        ) -> Result<(), RegistrationError> {
            let accelerator = accelerator.to_string();
            self.calls.lock().push(Call::Register(accelerator.clone()));
            let mut live = self.live.lock();
            if self.claimed.contains(&accelerator) || live.contains_key(&accelerator) {
                return Err(RegistrationError::Conflict {
                    accelerator,
                    reason: "already registered".to_string(),
                });
            }
            live.insert(accelerator, callback);
            Ok(())
        }

        fn unregister(&self, accelerator: &Accelerator) -> Result<(), RegistrationError> {
            let accelerator = accelerator.to_string();
            self.calls.lock().push(Call::Unregister(accelerator.clone()));
            if self.stuck.contains(&accelerator) {
                return Err(RegistrationError::Service {
                    accelerator,
                    reason: "unregister refused".to_string(),
                });
            }
            self.live.lock().remove(&accelerator);
            Ok(())
        }

        fn unregister_all(&self) -> Result<(), RegistrationError> {
            self.calls.lock().push(Call::UnregisterAll);
            self.live.lock().clear();
            Ok(())
        }
    }

    fn accelerator(value: &str) -> Accelerator {
        Accelerator::parse(value).unwrap()
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn registrar() -> HotkeyRegistrar<MockService> {
        HotkeyRegistrar::new(MockService::default()).with_platform(Platform::Mac)
    }

    #[test]
    fn registers_resolved_accelerator() {
        let registrar = registrar();
        registrar
            .set_binding(
                Action::ToggleWindow,
                &accelerator("CommandOrControl+Shift+Space"),
                || {},
            )
            .unwrap();

        assert_eq!(
            registrar.service().calls(),
            vec![Call::Register("Command+Shift+Space".to_string())]
        );
        assert_eq!(
            registrar.binding(Action::ToggleWindow),
            Some(accelerator("Command+Shift+Space"))
        );
    }

    #[test]
    fn rebinding_unregisters_before_registering() {
        let registrar = registrar();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), || {})
            .unwrap();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+J"), || {})
            .unwrap();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+J"), || {})
            .unwrap();

        assert_eq!(
            registrar.service().calls(),
            vec![
                Call::Register("Command+K".to_string()),
                Call::Unregister("Command+K".to_string()),
                Call::Register("Command+J".to_string()),
                Call::Unregister("Command+J".to_string()),
                Call::Register("Command+J".to_string()),
            ]
        );
        let live = registrar.service().live.lock();
        assert_eq!(live.len(), 1);
        assert!(live.contains_key("Command+J"));
    }

    #[test]
    fn failed_unregister_keeps_old_binding() {
        let registrar = HotkeyRegistrar::new(MockService::stuck(&["Command+K"]))
            .with_platform(Platform::Mac);
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), || {})
            .unwrap();

        let error = registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+J"), || {})
            .unwrap_err();

        assert!(matches!(error, RegistrationError::Service { .. }));
        assert_eq!(
            registrar.binding(Action::ToggleWindow),
            Some(accelerator("Command+K"))
        );
        assert_eq!(registrar.service().live_accelerators(), vec!["Command+K"]);
        assert_eq!(
            registrar.service().calls(),
            vec![
                Call::Register("Command+K".to_string()),
                Call::Unregister("Command+K".to_string()),
            ]
        );
    }

    #[test]
    fn failed_unbind_keeps_binding() {
        let registrar = HotkeyRegistrar::new(MockService::stuck(&["Command+K"]))
            .with_platform(Platform::Mac);
        registrar
            .set_binding(Action::SubmitPaste, &accelerator("Command+K"), || {})
            .unwrap();

        assert!(registrar.unbind(Action::SubmitPaste).is_err());
        assert_eq!(
            registrar.binding(Action::SubmitPaste),
            Some(accelerator("Command+K"))
        );
    }

    #[test]
    fn conflict_leaves_action_unbound_and_others_intact() {
        let registrar =
            HotkeyRegistrar::new(MockService::claiming(&["Command+Space"])).with_platform(Platform::Mac);
        registrar
            .set_binding(Action::SubmitPaste, &accelerator("Command+Enter"), || {})
            .unwrap();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), || {})
            .unwrap();

        let error = registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+Space"), || {})
            .unwrap_err();

        assert!(matches!(error, RegistrationError::Conflict { .. }));
        assert_eq!(registrar.binding(Action::ToggleWindow), None);
        assert_eq!(
            registrar.binding(Action::SubmitPaste),
            Some(accelerator("Command+Enter"))
        );
        assert!(!registrar.service().live.lock().contains_key("Command+K"));
    }

    #[test]
    fn debounce_suppresses_fires_inside_window() {
        let registrar = registrar();
        let (count, callback) = counter();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), callback)
            .unwrap();

        let start = Instant::now();
        assert!(registrar.fire_at(Action::ToggleWindow, start));
        assert!(!registrar.fire_at(Action::ToggleWindow, start + Duration::from_millis(299)));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Suppressed fires do not extend the window
        assert!(registrar.fire_at(Action::ToggleWindow, start + Duration::from_millis(300)));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn debounce_is_per_action() {
        let registrar = registrar();
        let (toggles, on_toggle) = counter();
        let (submits, on_submit) = counter();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), on_toggle)
            .unwrap();
        registrar
            .set_binding(Action::SubmitPaste, &accelerator("Command+Enter"), on_submit)
            .unwrap();

        let now = Instant::now();
        assert!(registrar.fire_at(Action::ToggleWindow, now));
        assert!(registrar.fire_at(Action::SubmitPaste, now));
        assert_eq!(toggles.load(Ordering::SeqCst), 1);
        assert_eq!(submits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn service_delivery_goes_through_debounce() {
        let registrar = registrar();
        let (count, callback) = counter();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), callback)
            .unwrap();

        registrar.service().press("Command+K");
        registrar.service().press("Command+K");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_fires_pass_debounce_once() {
        let registrar = registrar();
        let (count, callback) = counter();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), callback)
            .unwrap();

        let now = Instant::now();
        let barrier = Barrier::new(8);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    barrier.wait();
                    registrar.fire_at(Action::ToggleWindow, now);
                });
            }
        });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fire_without_binding_is_ignored() {
        assert!(!registrar().fire(Action::SubmitPaste));
    }

    #[test]
    fn unbind_and_unregister_all_are_idempotent() {
        let registrar = registrar();
        registrar.unbind(Action::ToggleWindow).unwrap();
        registrar
            .set_binding(Action::ToggleWindow, &accelerator("Command+K"), || {})
            .unwrap();
        registrar.unbind(Action::ToggleWindow).unwrap();
        registrar.unbind(Action::ToggleWindow).unwrap();
        registrar.unregister_all().unwrap();
        registrar.unregister_all().unwrap();

        assert_eq!(
            registrar.service().calls(),
            vec![
                Call::Register("Command+K".to_string()),
                Call::Unregister("Command+K".to_string()),
                Call::UnregisterAll,
                Call::UnregisterAll,
            ]
        );
        assert_eq!(registrar.binding(Action::ToggleWindow), None);
    }

    #[test]
    fn debouncer_ignores_out_of_order_timestamps() {
        let debouncer = Debouncer::new(DEBOUNCE_WINDOW);
        let now = Instant::now();
        assert!(debouncer.try_fire(now + Duration::from_millis(500)));
        assert!(!debouncer.try_fire(now));
    }
}
