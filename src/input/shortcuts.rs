//! Keyboard shortcuts for history navigation

use serde::{Deserialize, Serialize};

/// Key press as reported by the host UI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEvent {
    /// Key value, e.g. `"z"` or `"Z"`
    pub key: String,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, ctrl: bool, meta: bool, shift: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            meta,
            shift,
        }
    }
}

/// Canvas actions bound to key chords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + Z
    Undo,
    /// Ctrl/Cmd + Shift + Z
    Redo,
}

impl Shortcut {
    /// Match a key event against the bound chords
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if !(event.ctrl || event.meta) || !event.key.eq_ignore_ascii_case("z") {
            return None;
        }
        if event.shift {
            Some(Shortcut::Redo)
        } else {
            Some(Shortcut::Undo)
        }
    }
}
