//! Configurable key bindings for component commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::KitError;

/// A set of commands a component understands
///
/// Names are the keys used in configuration files.
pub trait Command: Clone + Copy + Eq + Hash + 'static {
    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;

    fn all() -> &'static [Self];
}

/// Command -> key strings ("enter", "ctrl+p", "shift+tab")
#[derive(Debug, Clone)]
pub struct Keymap<C: Command> {
    bindings: HashMap<C, Vec<String>>,
}

impl<C: Command> Default for Keymap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command> Serialize for Keymap<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.bindings.len()))?;
        // Stable output order
        for command in C::all() {
            if let Some(keys) = self.bindings.get(command) {
                map.serialize_entry(command.name(), keys)?;
            }
        }
        map.end()
    }
}

impl<'de, C: Command> Deserialize<'de> for Keymap<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, Vec<String>> = HashMap::deserialize(deserializer)?;

        let mut keymap = Keymap::new();
        for (name, keys) in raw {
            match C::from_name(&name) {
                Some(command) => keymap.bind(command, keys),
                None => tracing::warn!(command = %name, "ignoring unknown command in keymap"),
            }
        }
        Ok(keymap)
    }
}

impl<C: Command> Keymap<C> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Replace the keys bound to a command
    pub fn bind(&mut self, command: C, keys: Vec<String>) {
        self.bindings.insert(command, keys);
    }

    pub fn keys_for(&self, command: C) -> &[String] {
        self.bindings
            .get(&command)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Command bound to a key event, if any
    pub fn command_for(&self, key: &KeyEvent) -> Option<C> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        C::all().iter().copied().find(|command| {
            self.keys_for(*command)
                .iter()
                .filter_map(|s| parse_key_string(s))
                .any(|parsed| keys_match(&parsed, key))
        })
    }

    /// Whether `key` is one of the keys bound to `command`
    ///
    /// Unlike [`Keymap::command_for`], overlapping bindings of other
    /// commands do not shadow this one.
    pub fn matches(&self, command: C, key: &KeyEvent) -> bool {
        key.kind != KeyEventKind::Release
            && self
                .keys_for(command)
                .iter()
                .filter_map(|s| parse_key_string(s))
                .any(|parsed| keys_match(&parsed, key))
    }

    /// Fail on the first binding that does not parse
    pub fn validate(&self) -> Result<(), KitError> {
        for command in C::all() {
            for binding in self.keys_for(*command) {
                if parse_key_string(binding).is_none() {
                    return Err(KitError::InvalidKeyBinding {
                        command: command.name().to_string(),
                        binding: binding.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// First key for a command, formatted for a help bar
    pub fn hint(&self, command: C) -> Option<String> {
        self.keys_for(command)
            .first()
            .map(|k| format_key_for_display(k))
    }

    /// Merge user config onto defaults - user entries override whole commands
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        for (command, keys) in user.bindings {
            defaults.bindings.insert(command, keys);
        }
        defaults
    }
}

fn keys_match(parsed: &KeyEvent, key: &KeyEvent) -> bool {
    let codes_match = match (parsed.code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        (a, b) => a == b,
    };
    // Terminals report SHIFT on uppercase chars; ignore it for char keys
    let mut modifiers = key.modifiers;
    if matches!(key.code, KeyCode::Char(_)) && !parsed.modifiers.contains(KeyModifiers::SHIFT) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    codes_match && parsed.modifiers == modifiers
}

/// Parse a key string like "q", "esc", "ctrl+p", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // A lone "+" is a key, not a separator
    if key_str == "+" {
        return Some(press(KeyCode::Char('+'), KeyModifiers::empty()));
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let (key_part, modifier_parts) = parts.split_last()?;
    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Format a key string for display (e.g., "ctrl+p" -> "^P", "pageup" -> "PgUp")
pub fn format_key_for_display(key_str: &str) -> String {
    let key_str = key_str.trim().to_lowercase();
    if key_str == "shift+tab" || key_str == "backtab" {
        return "Shift+Tab".to_string();
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let Some((key_part, modifier_parts)) = parts.split_last() else {
        return key_str;
    };

    let mut out = String::new();
    for part in modifier_parts {
        match part.trim() {
            "ctrl" | "control" => out.push('^'),
            "shift" => out.push_str("Shift+"),
            "alt" => out.push_str("Alt+"),
            _ => {}
        }
    }

    let key_display = match *key_part {
        "esc" | "escape" => "Esc".to_string(),
        "enter" | "return" => "Enter".to_string(),
        "pageup" => "PgUp".to_string(),
        "pagedown" => "PgDn".to_string(),
        "delete" => "Del".to_string(),
        "up" => "↑".to_string(),
        "down" => "↓".to_string(),
        "left" => "←".to_string(),
        "right" => "→".to_string(),
        c if c.chars().count() == 1 => c.to_uppercase(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    };
    out.push_str(&key_display);
    out
}
