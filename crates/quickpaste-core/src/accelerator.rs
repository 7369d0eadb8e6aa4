//! Accelerator codec
//!
//! Turns a raw key press into a canonical accelerator string (the form the OS
//! hotkey service consumes) plus a human-readable label, and renders stored
//! accelerators back into labels. Everything here is pure.

use std::fmt;
use std::str::FromStr;

use crate::error::{AcceleratorError, CaptureRejected};

/// Separator between tokens of an accelerator string.
pub const TOKEN_SEPARATOR: char = '+';

/// Separator between glyphs of a display label.
pub const LABEL_SEPARATOR: &str = " + ";

/// Keys the OS global-hotkey service accepts as the non-modifier part.
pub const ALLOWED_KEYS: &[&str] = &[
    // Letters
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
    // Digits
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    // Function keys
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
    // Named keys
    "Space", "Enter", "Tab", "Backspace", "Delete", "Escape",
    "Up", "Down", "Left", "Right",
    "Home", "End", "PageUp", "PageDown",
    // Punctuation, named after the physical key
    "Minus", "Equal", "BracketLeft", "BracketRight", "Backslash", "Semicolon", "Quote", "Comma",
    "Period", "Slash", "Backquote",
];

/// Physical punctuation keys and the character they produce unshifted.
const PUNCTUATION: &[(&str, &str)] = &[
    ("Minus", "-"),
    ("Equal", "="),
    ("BracketLeft", "["),
    ("BracketRight", "]"),
    ("Backslash", "\\"),
    ("Semicolon", ";"),
    ("Quote", "'"),
    ("Comma", ","),
    ("Period", "."),
    ("Slash", "/"),
    ("Backquote", "`"),
];

/// Logical key names that are modifiers on their own.
const MODIFIER_KEY_NAMES: &[&str] = &["Control", "Alt", "Shift", "Meta"];

/// Platform family, which decides the glyph set and what `CommandOrControl`
/// resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS and other Mac-class platforms
    Mac,
    /// Windows, Linux, everything else
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }
}

/// A modifier token. Variant order is the canonical token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    /// Legacy combined token: Command on Mac, Control elsewhere
    CommandOrControl,
    Command,
    Control,
    Alt,
    Shift,
}

impl Modifier {
    /// Accelerator token for this modifier.
    pub const fn token(self) -> &'static str {
        match self {
            Self::CommandOrControl => "CommandOrControl",
            Self::Command => "Command",
            Self::Control => "Control",
            Self::Alt => "Alt",
            Self::Shift => "Shift",
        }
    }

    /// Parse a modifier token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        [
            Self::CommandOrControl,
            Self::Command,
            Self::Control,
            Self::Alt,
            Self::Shift,
        ]
        .into_iter()
        .find(|modifier| modifier.token().eq_ignore_ascii_case(token))
    }

    /// Display glyph on the given platform.
    pub const fn glyph(self, platform: Platform) -> &'static str {
        match (self, platform) {
            (Self::CommandOrControl, Platform::Mac) | (Self::Command, _) => "⌘",
            (Self::CommandOrControl, Platform::Other) => "Ctrl",
            (Self::Control, _) => "^",
            (Self::Alt, Platform::Mac) => "⌥",
            (Self::Alt, Platform::Other) => "Alt",
            (Self::Shift, Platform::Mac) => "⇧",
            (Self::Shift, Platform::Other) => "Shift",
        }
    }

    /// Resolve `CommandOrControl` to the platform's primary modifier.
    pub const fn resolve(self, platform: Platform) -> Self {
        match (self, platform) {
            (Self::CommandOrControl, Platform::Mac) => Self::Command,
            (Self::CommandOrControl, Platform::Other) => Self::Control,
            (other, _) => other,
        }
    }
}

/// Modifier keys held during a key event.
///
/// Flags rather than a list, so a modifier reported twice collapses to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl ModifierState {
    /// Build from the modifier key names an input layer reported.
    /// Unknown names are ignored.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut state = Self::default();
        for name in names {
            match name {
                "Meta" | "Command" | "Super" => state.meta = true,
                "Control" | "Ctrl" => state.ctrl = true,
                "Alt" | "Option" => state.alt = true,
                "Shift" => state.shift = true,
                _ => {}
            }
        }
        state
    }

    /// Active modifiers in canonical order.
    pub fn modifiers(self) -> Vec<Modifier> {
        let mut modifiers = Vec::with_capacity(4);
        if self.meta {
            modifiers.push(Modifier::Command);
        }
        if self.ctrl {
            modifiers.push(Modifier::Control);
        }
        if self.alt {
            modifiers.push(Modifier::Alt);
        }
        if self.shift {
            modifiers.push(Modifier::Shift);
        }
        modifiers
    }
}

/// A raw key-down event as delivered by the UI layer.
///
/// `key` is the logical key value (the character produced, or a named key
/// such as `"ArrowUp"`); `code` is the physical key code (`"KeyA"`,
/// `"Digit1"`, `"Minus"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub code: String,
    pub modifiers: ModifierState,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            modifiers: ModifierState::default(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: ModifierState) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    #[must_use]
    pub fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    #[must_use]
    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// A well-formed accelerator: at least one modifier plus one allowed key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accelerator {
    modifiers: Vec<Modifier>,
    key: &'static str,
}

impl Accelerator {
    /// Build from parts, enforcing the same rules as [`Accelerator::parse`].
    pub fn new(
        modifiers: impl IntoIterator<Item = Modifier>,
        key: &str,
    ) -> Result<Self, AcceleratorError> {
        let key = canonical_key(key).ok_or_else(|| AcceleratorError::UnsupportedKey(key.to_string()))?;
        let mut modifiers: Vec<Modifier> = modifiers.into_iter().collect();
        modifiers.sort_unstable();
        modifiers.dedup();
        if modifiers.is_empty() {
            return Err(AcceleratorError::NoModifier);
        }
        Ok(Self { modifiers, key })
    }

    /// Parse a `+`-joined accelerator string.
    ///
    /// Modifier tokens may appear in any order but must precede the key and
    /// may not repeat. Matching is case-insensitive; the result is canonical.
    pub fn parse(value: &str) -> Result<Self, AcceleratorError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AcceleratorError::Empty);
        }

        let tokens: Vec<&str> = value.split(TOKEN_SEPARATOR).map(str::trim).collect();
        let (key_token, modifier_tokens) = tokens
            .split_last()
            .ok_or(AcceleratorError::Empty)?;

        let mut modifiers = Vec::with_capacity(modifier_tokens.len());
        for token in modifier_tokens {
            let modifier = Modifier::from_token(token)
                .ok_or_else(|| AcceleratorError::MisplacedToken((*token).to_string()))?;
            if modifiers.contains(&modifier) {
                return Err(AcceleratorError::DuplicateModifier(modifier.token().to_string()));
            }
            modifiers.push(modifier);
        }

        if key_token.is_empty() || Modifier::from_token(key_token).is_some() {
            return Err(AcceleratorError::MissingKey);
        }

        Self::new(modifiers, key_token)
    }

    /// Build from parts already known to be valid (built-in defaults).
    pub(crate) fn from_parts(modifiers: Vec<Modifier>, key: &'static str) -> Self {
        Self { modifiers, key }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Copy with `CommandOrControl` resolved for the platform.
    #[must_use]
    pub fn resolved(&self, platform: Platform) -> Self {
        let mut modifiers: Vec<Modifier> = self
            .modifiers
            .iter()
            .map(|modifier| modifier.resolve(platform))
            .collect();
        modifiers.sort_unstable();
        modifiers.dedup();
        Self {
            modifiers,
            key: self.key,
        }
    }

    /// Display label for this accelerator on the given platform.
    pub fn format(&self, platform: Platform) -> String {
        format(self, platform)
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}{TOKEN_SEPARATOR}", modifier.token())?;
        }
        f.write_str(self.key)
    }
}

impl FromStr for Accelerator {
    type Err = AcceleratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Result of a successful capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub accelerator: Accelerator,
    /// Glyphs exactly as shown to the user at capture time
    pub label: String,
}

/// Turn a key-down event into an accelerator and display label.
pub fn encode(event: &KeyEvent, platform: Platform) -> Result<Captured, CaptureRejected> {
    if MODIFIER_KEY_NAMES.contains(&event.key.as_str()) {
        return Err(CaptureRejected::ModifierOnly);
    }

    let modifiers = event.modifiers.modifiers();
    let (token, key_label) = normalize_key(event).ok_or(CaptureRejected::UnrecognizedKey)?;

    let Some(key) = canonical_key(&token) else {
        return Err(CaptureRejected::UnsupportedKey(token));
    };
    if modifiers.is_empty() {
        return Err(CaptureRejected::NoModifier);
    }

    let label = modifiers
        .iter()
        .map(|modifier| modifier.glyph(platform))
        .chain(std::iter::once(key_label.as_str()))
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR);

    Ok(Captured {
        accelerator: Accelerator { modifiers, key },
        label,
    })
}

/// Render an accelerator as a display label using the default glyph rules.
pub fn format(accelerator: &Accelerator, platform: Platform) -> String {
    accelerator
        .modifiers
        .iter()
        .map(|modifier| modifier.glyph(platform))
        .chain(std::iter::once(key_glyph(accelerator.key)))
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}

/// Whether `token` names a key the OS hotkey service accepts.
pub fn is_allowed_key(token: &str) -> bool {
    canonical_key(token).is_some()
}

fn canonical_key(token: &str) -> Option<&'static str> {
    ALLOWED_KEYS
        .iter()
        .find(|allowed| allowed.eq_ignore_ascii_case(token))
        .copied()
}

fn key_glyph(key: &'static str) -> &'static str {
    match key {
        "Enter" => "↵",
        "Escape" => "Esc",
        "Backspace" => "⌫",
        "Delete" => "⌦",
        "Tab" => "⇥",
        "Up" => "↑",
        "Down" => "↓",
        "Left" => "←",
        "Right" => "→",
        _ => PUNCTUATION
            .iter()
            .find(|(code, _)| *code == key)
            .map_or(key, |(_, glyph)| glyph),
    }
}

/// Map an event to `(token, label)`. Named keys go through a fixed table,
/// ASCII letters/digits are upper-cased, and everything else is resolved
/// from the physical key code so shift state never changes the binding.
fn normalize_key(event: &KeyEvent) -> Option<(String, String)> {
    let named = match event.key.as_str() {
        " " | "Spacebar" => Some(("Space", "Space")),
        "Enter" => Some(("Enter", "↵")),
        "Escape" | "Esc" => Some(("Escape", "Esc")),
        "Backspace" => Some(("Backspace", "⌫")),
        "Delete" => Some(("Delete", "⌦")),
        "Tab" => Some(("Tab", "⇥")),
        "ArrowUp" => Some(("Up", "↑")),
        "ArrowDown" => Some(("Down", "↓")),
        "ArrowLeft" => Some(("Left", "←")),
        "ArrowRight" => Some(("Right", "→")),
        _ => None,
    };
    if let Some((token, label)) = named {
        return Some((token.to_string(), label.to_string()));
    }

    let mut chars = event.key.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_alphanumeric() {
            let upper = ch.to_ascii_uppercase().to_string();
            return Some((upper.clone(), upper));
        }
    }

    let produced = printable_key(&event.key);

    if let Some(letter) = event.code.strip_prefix("Key") {
        if letter.len() == 1 {
            return Some((letter.to_string(), produced.unwrap_or(letter).to_string()));
        }
    }
    if let Some(digit) = event.code.strip_prefix("Digit") {
        if digit.len() == 1 {
            return Some((digit.to_string(), produced.unwrap_or(digit).to_string()));
        }
    }
    if let Some((code, glyph)) = PUNCTUATION.iter().find(|(code, _)| *code == event.code) {
        return Some(((*code).to_string(), produced.unwrap_or(glyph).to_string()));
    }

    // Named keys such as F5 or PageUp arrive with key == token.
    printable_key(&event.key).map(|key| (key.to_string(), key.to_string()))
}

fn printable_key(key: &str) -> Option<&str> {
    match key {
        "" | "Dead" | "Unidentified" | "Process" => None,
        other => Some(other),
    }
}
