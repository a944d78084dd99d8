//! Key bindings.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to a
//! [`BindingAction`]. `with_defaults()` installs the standard set: `Ctrl+C`
//! and `q` quit, `Esc` reopens every closed zone, digits `1`-`9` toggle the
//! n-th slideable zone.

use std::collections::HashMap;
use std::fmt;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// What a matched binding does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAction {
    Quit,
    /// Reopen every closing or closed zone.
    OpenAll,
    /// Toggle the n-th slideable zone (0-based, declaration order).
    ToggleNth(usize),
}

impl fmt::Display for BindingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => f.write_str("quit"),
            Self::OpenAll => f.write_str("open all"),
            Self::ToggleNth(n) => write!(f, "toggle #{}", n + 1),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> BindingAction.
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindingRegistry {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Char('c'), Modifiers::CTRL, BindingAction::Quit);
        registry.bind(Key::Char('q'), Modifiers::NONE, BindingAction::Quit);
        registry.bind(Key::Escape, Modifiers::NONE, BindingAction::OpenAll);
        for (n, digit) in ('1'..='9').enumerate() {
            registry.bind(Key::Char(digit), Modifiers::NONE, BindingAction::ToggleNth(n));
        }
        registry
    }

    /// Register a binding, replacing any previous one for the same keys.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((key, modifiers), action);
    }

    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Exact match on key and modifiers.
    pub fn resolve(&self, event: &KeyEvent) -> Option<BindingAction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
