use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use quickpaste_core::error::{Error, ValidationError};
use quickpaste_core::{Action, Platform, Settings};
use tempfile::TempDir;

use crate::cli::{ActionArg, Cli, Commands, PlatformArg};
use crate::commands::common::{
    default_settings_path, format_settings_lines, open_store, resolve_settings_path,
    SETTINGS_FILE_NAME,
};
use crate::commands::format::render_label;
use crate::commands::opacity::run_opacity;
use crate::commands::reset::run_reset;
use crate::commands::set::{build_shortcut, run_set};
use crate::error::CliError;

fn settings_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);
    (dir, path)
}

#[test]
fn default_settings_path_ends_with_app_file() {
    let Ok(path) = default_settings_path() else {
        return;
    };
    assert!(path.ends_with("quickpaste/settings.json"));
}

#[test]
fn explicit_settings_path_wins() {
    let explicit = PathBuf::from("/tmp/custom.json");
    assert_eq!(
        resolve_settings_path(Some(explicit.clone())).unwrap(),
        explicit
    );
}

#[test]
fn parses_set_command() {
    let cli = Cli::try_parse_from([
        "quickpaste",
        "set",
        "toggle",
        "Control+Alt+K",
        "--label",
        "^ + Alt + K",
    ])
    .unwrap();

    let Commands::Set {
        action,
        accelerator,
        label,
    } = cli.command
    else {
        panic!("expected set command");
    };
    assert_eq!(action, ActionArg::Toggle);
    assert_eq!(Action::from(action), Action::ToggleWindow);
    assert_eq!(accelerator, "Control+Alt+K");
    assert_eq!(label.as_deref(), Some("^ + Alt + K"));
}

#[test]
fn parses_global_settings_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["quickpaste", "show", "--json", "--settings", "/tmp/s.json"])
        .unwrap();
    assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.json")));
    assert!(matches!(cli.command, Commands::Show { json: true }));
}

#[test]
fn parses_negative_opacity_as_value() {
    let cli = Cli::try_parse_from(["quickpaste", "opacity", "-0.5"]).unwrap();
    assert!(matches!(cli.command, Commands::Opacity { value } if value == -0.5));
}

#[test]
fn parses_format_platform() {
    let cli =
        Cli::try_parse_from(["quickpaste", "format", "Command+K", "--platform", "mac"]).unwrap();
    let Commands::Format { platform, .. } = cli.command else {
        panic!("expected format command");
    };
    assert_eq!(platform.map(Platform::from), Some(Platform::Mac));
    assert_eq!(Platform::from(PlatformArg::Other), Platform::Other);
}

#[test]
fn render_label_uses_requested_glyphs() {
    assert_eq!(
        render_label("command+shift+space", Platform::Mac).unwrap(),
        "⌘ + ⇧ + Space"
    );
    assert_eq!(
        render_label("CommandOrControl+Enter", Platform::Other).unwrap(),
        "Ctrl + ↵"
    );
}

#[test]
fn render_label_rejects_bare_key() {
    let error = render_label("K", Platform::Mac).unwrap_err();
    assert!(matches!(error, CliError::Core(Error::Accelerator(_))));
}

#[test]
fn build_shortcut_without_label_renders_per_platform() {
    let shortcut =
        build_shortcut(Action::ToggleWindow, "CommandOrControl+Shift+Space", None).unwrap();
    assert_eq!(shortcut.to_string(), "CommandOrControl+Shift+Space");
    assert_eq!(shortcut.label, None);
    assert_eq!(shortcut.display(Platform::Mac), "⌘ + ⇧ + Space");
    assert_eq!(shortcut.display(Platform::Other), "Ctrl + Shift + Space");
}

#[test]
fn build_shortcut_keeps_embedded_label() {
    let shortcut = build_shortcut(Action::SubmitPaste, "Control+Enter|^ + ↵", None).unwrap();
    assert_eq!(shortcut.label.as_deref(), Some("^ + ↵"));
}

#[test]
fn build_shortcut_prefers_explicit_label() {
    let shortcut =
        build_shortcut(Action::ToggleWindow, "Command+K|⌘ + K", Some("Cmd K")).unwrap();
    assert_eq!(shortcut.to_string(), "Command+K|Cmd K");
}

#[test]
fn build_shortcut_names_field_on_error() {
    let error = build_shortcut(Action::SubmitPaste, "Enter", None).unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(Error::ValidationFailed(ValidationError::Shortcut {
            field: "submitPaste",
            ..
        }))
    ));
}

#[test]
fn format_settings_lines_shows_labels_and_opacity() {
    let lines = format_settings_lines(&Settings::default(), Platform::Mac);
    assert_eq!(
        lines,
        vec![
            "Toggle window:  ⌘ + ⇧ + Space  (CommandOrControl+Shift+Space)".to_string(),
            "Submit & paste: ⌘ + ↵  (CommandOrControl+Enter)".to_string(),
            "Opacity:        1.00".to_string(),
        ]
    );
}

#[tokio::test]
async fn run_set_persists_shortcut() {
    let (_dir, path) = settings_file();
    run_set(Action::ToggleWindow, "Control+Alt+K", None, &path)
        .await
        .unwrap();

    let settings = open_store(&path).await.load().await;
    assert_eq!(
        settings.shortcuts.toggle_window.to_string(),
        "Control+Alt+K"
    );
    assert_eq!(
        settings.shortcuts.submit_paste,
        Settings::default().shortcuts.submit_paste
    );
}

#[tokio::test]
async fn run_set_rejects_duplicate_binding() {
    let (_dir, path) = settings_file();
    let error = run_set(Action::ToggleWindow, "CommandOrControl+Enter", None, &path)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        CliError::Core(Error::ValidationFailed(ValidationError::DuplicateShortcut(_)))
    ));
    assert!(!path.exists());
}

#[tokio::test]
async fn run_opacity_accepts_grid_values() {
    let (_dir, path) = settings_file();
    run_opacity(0.95, &path).await.unwrap();

    let settings = open_store(&path).await.load().await;
    assert!((settings.appearance.opacity - 0.95).abs() < 1e-9);
}

#[tokio::test]
async fn run_opacity_rejects_out_of_range() {
    let (_dir, path) = settings_file();
    for value in [0.29, 1.01, 0.42] {
        let error = run_opacity(value, &path).await.unwrap_err();
        assert!(matches!(
            error,
            CliError::Core(Error::ValidationFailed(ValidationError::Opacity(_)))
        ));
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn run_reset_restores_defaults() {
    let (_dir, path) = settings_file();
    run_set(Action::SubmitPaste, "Alt+Enter", None, &path)
        .await
        .unwrap();
    run_opacity(0.5, &path).await.unwrap();

    run_reset(&path).await.unwrap();

    let settings = open_store(&path).await.load().await;
    assert_eq!(settings, Settings::default());
}

#[tokio::test]
async fn corrupt_settings_file_falls_back_to_defaults() {
    let (dir, _) = settings_file();
    let path = dir.path().join(SETTINGS_FILE_NAME);
    std::fs::write(&path, "{not json").unwrap();

    let settings = open_store(&path).await.load().await;
    assert_eq!(settings, Settings::default());

    run_opacity(0.8, &path).await.unwrap();
    let settings = open_store(&path).await.load().await;
    assert!((settings.appearance.opacity - 0.8).abs() < 1e-9);
}
