use std::path::Path;

use quickpaste_core::{Action, HotkeyRegistrar, ShortcutController};

use crate::commands::common::{action_title, open_store};
use crate::error::CliError;
use crate::hotkey::GlobalHotkeyService;

pub async fn run_listen(settings_path: &Path) -> Result<(), CliError> {
    let store = open_store(settings_path).await;
    let service =
        GlobalHotkeyService::new().map_err(|error| CliError::Hotkeys(error.to_string()))?;
    let mut controller = ShortcutController::load(store, HotkeyRegistrar::new(service)).await;

    for action in Action::ALL {
        controller.on_action(action, move || {
            tracing::info!("{} fired", action_title(action));
        });
    }

    let failures = controller.apply_bindings();
    for (action, error) in &failures {
        eprintln!("Could not register {}: {error}", action_title(*action));
    }
    if failures.len() == Action::ALL.len() {
        return Err(CliError::Hotkeys("no shortcut could be registered".to_string()));
    }

    for action in Action::ALL {
        if let Some(accelerator) = controller.registrar().binding(action) {
            println!("{}: {accelerator}", action_title(action));
        }
    }
    println!("Listening for hotkeys, press Ctrl+C to stop");

    let waited = tokio::signal::ctrl_c().await;
    controller.shutdown().map_err(quickpaste_core::Error::from)?;
    waited?;

    println!("Hotkeys released");
    Ok(())
}
