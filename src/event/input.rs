//! Input events, decoupled from crossterm.
//!
//! Only the app-facing subset is kept: keys, mouse reports and terminal
//! resizes. Everything else crossterm delivers becomes
//! [`InputEvent::Ignored`] so callers match exhaustively without caring
//! about the backend.

use std::ops::BitOr;

use crossterm::event as ct;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    F(u8),
    /// Any key this crate has no use for.
    Other,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl From<ct::KeyModifiers> for Modifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        [
            (ct::KeyModifiers::SHIFT, Modifiers::SHIFT),
            (ct::KeyModifiers::CONTROL, Modifiers::CTRL),
            (ct::KeyModifiers::ALT, Modifiers::ALT),
        ]
        .into_iter()
        .filter(|(flag, _)| m.contains(*flag))
        .fold(Modifiers::NONE, |acc, (_, ours)| acc | ours)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key without modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// `Ctrl+<c>`.
    pub fn ctrl(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::CTRL)
    }
}

impl From<ct::KeyEvent> for KeyEvent {
    fn from(event: ct::KeyEvent) -> Self {
        let code = match event.code {
            ct::KeyCode::Char(c) => Key::Char(c),
            ct::KeyCode::Enter => Key::Enter,
            ct::KeyCode::Esc => Key::Escape,
            ct::KeyCode::Tab => Key::Tab,
            ct::KeyCode::Backspace => Key::Backspace,
            ct::KeyCode::Left => Key::Left,
            ct::KeyCode::Right => Key::Right,
            ct::KeyCode::Up => Key::Up,
            ct::KeyCode::Down => Key::Down,
            ct::KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        };
        KeyEvent::new(code, event.modifiers.into())
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

impl From<ct::MouseButton> for MouseBtn {
    fn from(b: ct::MouseButton) -> Self {
        match b {
            ct::MouseButton::Left => MouseBtn::Left,
            ct::MouseButton::Right => MouseBtn::Right,
            ct::MouseButton::Middle => MouseBtn::Middle,
        }
    }
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    Scroll,
}

/// A mouse report at a cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Left button press at `(x, y)`.
    pub fn click(x: u16, y: u16) -> Self {
        Self {
            kind: MouseAction::Down(MouseBtn::Left),
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn is_click(&self) -> bool {
        self.kind == MouseAction::Down(MouseBtn::Left)
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// Focus changes, pastes, key releases.
    Ignored,
}

impl From<ct::Event> for InputEvent {
    fn from(event: ct::Event) -> Self {
        match event {
            // Some platforms report releases as separate events.
            ct::Event::Key(key) if key.kind == ct::KeyEventKind::Release => InputEvent::Ignored,
            ct::Event::Key(key) => InputEvent::Key(key.into()),
            ct::Event::Mouse(mouse) => {
                let kind = match mouse.kind {
                    ct::MouseEventKind::Down(b) => MouseAction::Down(b.into()),
                    ct::MouseEventKind::Up(b) => MouseAction::Up(b.into()),
                    ct::MouseEventKind::Drag(b) => MouseAction::Drag(b.into()),
                    ct::MouseEventKind::Moved => MouseAction::Moved,
                    _ => MouseAction::Scroll,
                };
                InputEvent::Mouse(MouseEvent {
                    kind,
                    x: mouse.column,
                    y: mouse.row,
                    modifiers: mouse.modifiers.into(),
                })
            }
            ct::Event::Resize(width, height) => InputEvent::Resize { width, height },
            _ => InputEvent::Ignored,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: ct::KeyCode, modifiers: ct::KeyModifiers) -> ct::Event {
        ct::Event::Key(ct::KeyEvent::new(code, modifiers))
    }

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_combine() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn modifiers_from_crossterm() {
        let mods: Modifiers = (ct::KeyModifiers::SHIFT | ct::KeyModifiers::CONTROL).into();
        assert_eq!(mods, Modifiers::SHIFT | Modifiers::CTRL);
    }

    // ── Keys ─────────────────────────────────────────────────────────

    #[test]
    fn key_press_converts() {
        let input = InputEvent::from(key(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL));
        assert_eq!(input, InputEvent::Key(KeyEvent::ctrl('c')));

        let input = InputEvent::from(key(ct::KeyCode::Esc, ct::KeyModifiers::NONE));
        assert_eq!(input, InputEvent::Key(KeyEvent::plain(Key::Escape)));
    }

    #[test]
    fn unknown_key_is_other() {
        let input = InputEvent::from(key(ct::KeyCode::Insert, ct::KeyModifiers::NONE));
        assert_eq!(input, InputEvent::Key(KeyEvent::plain(Key::Other)));
    }

    #[test]
    fn key_release_is_ignored() {
        let release = ct::KeyEvent::new_with_kind(
            ct::KeyCode::Char('q'),
            ct::KeyModifiers::NONE,
            ct::KeyEventKind::Release,
        );
        assert_eq!(InputEvent::from(ct::Event::Key(release)), InputEvent::Ignored);
    }

    // ── Mouse / resize ───────────────────────────────────────────────

    #[test]
    fn left_press_is_click() {
        let input = InputEvent::from(ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 10,
            row: 5,
            modifiers: ct::KeyModifiers::NONE,
        }));
        assert_eq!(input, InputEvent::Mouse(MouseEvent::click(10, 5)));
        let InputEvent::Mouse(mouse) = input else {
            unreachable!()
        };
        assert!(mouse.is_click());
    }

    #[test]
    fn drag_is_not_click() {
        let input = InputEvent::from(ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Drag(ct::MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: ct::KeyModifiers::NONE,
        }));
        match input {
            InputEvent::Mouse(mouse) => assert!(!mouse.is_click()),
            other => panic!("expected mouse event, got {other:?}"),
        }
    }

    #[test]
    fn resize_and_focus() {
        assert_eq!(
            InputEvent::from(ct::Event::Resize(120, 40)),
            InputEvent::Resize {
                width: 120,
                height: 40
            }
        );
        assert_eq!(InputEvent::from(ct::Event::FocusLost), InputEvent::Ignored);
        assert_eq!(
            InputEvent::from(ct::Event::Paste("x".into())),
            InputEvent::Ignored
        );
    }
}
