//! Event system: backend-neutral input and key bindings.

pub mod binding;
pub mod input;

pub use binding::{BindingAction, KeyBindingRegistry};
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
