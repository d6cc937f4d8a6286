//! Key strokes and input maps for keyboard bindings.
//!
//! A [`KeyStroke`] identifies a key together with its modifiers, such as
//! `"Ctrl+S"` or `"Alt+F"`. An [`InputMap`] binds key strokes to action
//! slots. Widgets own two input maps: one consulted while the widget has
//! focus, and one consulted while any of its descendants has focus.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::events::{ActionEvent, EventType, Key, KeyEvent, KeyboardModifiers};
use crate::error::Error;

/// A key plus modifiers, optionally matching the key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
    /// Match the release instead of the press.
    pub on_release: bool,
}

impl KeyStroke {
    /// Create a key stroke that matches a key press.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            key,
            modifiers,
            on_release: false,
        }
    }

    /// Build the stroke a key event corresponds to. Typed events have none.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let on_release = match event.base.event_type() {
            EventType::KeyPressed => false,
            EventType::KeyReleased => true,
            _ => return None,
        };
        Some(Self {
            key: event.key,
            modifiers: event.base.modifiers(),
            on_release,
        })
    }
}

impl FromStr for KeyStroke {
    type Err = Error;

    /// Parse strings like `"Alt+F"`, `"ctrl+shift+s"` or `"released Enter"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidKeyStroke(s.to_string());

        let (on_release, rest) = match s.trim().strip_prefix("released ") {
            Some(rest) => (true, rest),
            None => (false, s.trim()),
        };

        let mut modifiers = KeyboardModifiers::NONE;
        let mut parts: Vec<&str> = rest.split('+').map(str::trim).collect();
        let key_name = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.control = true,
                "alt" => modifiers.alt = true,
                "meta" | "super" => modifiers.meta = true,
                _ => return Err(invalid()),
            }
        }

        let key = Key::from_name(key_name).ok_or_else(invalid)?;
        Ok(Self {
            key,
            modifiers,
            on_release,
        })
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.on_release {
            f.write_str("released ")?;
        }
        if self.modifiers.control {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        if self.modifiers.meta {
            f.write_str("Meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// A bound action.
pub type ActionSlot = Arc<dyn Fn(&ActionEvent) + Send + Sync>;

/// Maps key strokes to actions.
#[derive(Clone, Default)]
pub struct InputMap {
    bindings: HashMap<KeyStroke, ActionSlot>,
}

impl InputMap {
    /// Create an empty input map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an action to a key stroke, replacing any previous binding.
    pub fn put<F>(&mut self, stroke: KeyStroke, action: F)
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        self.bindings.insert(stroke, Arc::new(action));
    }

    /// Bind an already shared action.
    pub fn put_slot(&mut self, stroke: KeyStroke, action: ActionSlot) {
        self.bindings.insert(stroke, action);
    }

    /// Look up the action for a key stroke.
    pub fn get(&self, stroke: &KeyStroke) -> Option<ActionSlot> {
        self.bindings.get(stroke).cloned()
    }

    /// Remove a binding. Returns whether one existed.
    pub fn remove(&mut self, stroke: &KeyStroke) -> bool {
        self.bindings.remove(stroke).is_some()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for InputMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.bindings.keys().map(|k| k.to_string()))
            .finish()
    }
}

/// Which input map of a widget a binding goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCondition {
    /// Active while the widget itself has focus.
    WhenFocused,
    /// Active while a descendant of the widget has focus.
    WhenAncestorFocused,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accelerator() {
        let stroke: KeyStroke = "Alt+F".parse().unwrap();
        assert_eq!(stroke.key, Key::Char('f'));
        assert_eq!(stroke.modifiers, KeyboardModifiers::ALT);
        assert!(!stroke.on_release);
        assert_eq!(stroke.to_string(), "Alt+F");
    }

    #[test]
    fn test_parse_multiple_modifiers_and_release() {
        let stroke: KeyStroke = "released ctrl+shift+Enter".parse().unwrap();
        assert!(stroke.on_release);
        assert!(stroke.modifiers.control && stroke.modifiers.shift);
        assert_eq!(stroke.key, Key::Enter);
        assert_eq!(stroke.to_string(), "released Ctrl+Shift+Enter");
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<KeyStroke>().is_err());
        assert!("Alt+".parse::<KeyStroke>().is_err());
        assert!("Hyper+A".parse::<KeyStroke>().is_err());
        assert!("Ctrl+Banana".parse::<KeyStroke>().is_err());
    }

    #[test]
    fn test_input_map_lookup() {
        let mut map = InputMap::new();
        let stroke: KeyStroke = "Ctrl+S".parse().unwrap();
        map.put(stroke, |_| {});

        assert!(map.get(&stroke).is_some());
        assert!(map.get(&"Ctrl+O".parse().unwrap()).is_none());
        assert!(map.remove(&stroke));
        assert!(map.is_empty());
    }
}
