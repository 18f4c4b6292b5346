//! Keyboard shortcuts for undo and redo

use crate::{HistoryOutcome, ShadowEditor};

/// A key press with its modifier state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    /// The key value as reported by the keyboard event, e.g. `"z"`
    pub key: String,
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

/// A matched shortcut. The host must suppress the platform default action
/// when `prevent_default` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub action: ShortcutAction,
    pub prevent_default: bool,
}

/// Ctrl/Cmd+Z is undo, Ctrl/Cmd+Shift+Z is redo
pub fn resolve_shortcut(chord: &KeyChord) -> Option<Shortcut> {
    if !(chord.ctrl || chord.meta) || !chord.key.eq_ignore_ascii_case("z") {
        return None;
    }
    let action = if chord.shift {
        ShortcutAction::Redo
    } else {
        ShortcutAction::Undo
    };
    Some(Shortcut {
        action,
        prevent_default: true,
    })
}

/// Run the shortcut bound to `chord`, if any
pub fn handle_key(editor: &mut ShadowEditor, chord: &KeyChord) -> Option<(Shortcut, HistoryOutcome)> {
    let shortcut = resolve_shortcut(chord)?;
    let outcome = match shortcut.action {
        ShortcutAction::Undo => editor.undo(),
        ShortcutAction::Redo => editor.redo(),
    };
    Some((shortcut, outcome))
}
