//! Zone command queue.
//!
//! Building blocks never touch slide state directly. A block that wants to
//! close its own panel holds a [`ClosePanel`] handle which pushes a
//! [`ZoneCommand`] onto a shared queue; the app drains the queue once per
//! cycle and applies the commands to the controller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A request to change a zone's slide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneCommand {
    Close(String),
    Open(String),
    Toggle(String),
}

impl ZoneCommand {
    /// The zone the command targets.
    pub fn zone(&self) -> &str {
        match self {
            ZoneCommand::Close(z) | ZoneCommand::Open(z) | ZoneCommand::Toggle(z) => z,
        }
    }
}

/// Cloneable handle to a shared command queue.
#[derive(Debug, Clone, Default)]
pub struct ZoneCommands {
    queue: Rc<RefCell<VecDeque<ZoneCommand>>>,
}

impl ZoneCommands {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a command.
    pub fn push(&self, command: ZoneCommand) {
        self.queue.borrow_mut().push_back(command);
    }

    /// Take every pending command, oldest first.
    pub fn drain(&self) -> Vec<ZoneCommand> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Number of pending commands.
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// A close callback bound to `zone`.
    pub fn close_panel(&self, zone: impl Into<String>) -> ClosePanel {
        ClosePanel {
            zone: zone.into(),
            commands: self.clone(),
        }
    }
}

/// Callback handed to the block rendered inside a slideable zone.
#[derive(Debug, Clone)]
pub struct ClosePanel {
    zone: String,
    commands: ZoneCommands,
}

impl ClosePanel {
    /// Ask the engine to close this panel.
    pub fn close(&self) {
        self.commands.push(ZoneCommand::Close(self.zone.clone()));
    }

    /// The zone this callback closes.
    pub fn zone(&self) -> &str {
        &self.zone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_in_order() {
        let q = ZoneCommands::new();
        q.push(ZoneCommand::Close("a".into()));
        q.push(ZoneCommand::Toggle("b".into()));
        assert_eq!(q.pending_count(), 2);
        let drained = q.drain();
        assert_eq!(drained[0], ZoneCommand::Close("a".into()));
        assert_eq!(drained[1].zone(), "b");
        assert!(q.is_empty());
    }

    #[test]
    fn clones_share_the_queue() {
        let q = ZoneCommands::new();
        let handle = q.close_panel("tools");
        handle.close();
        handle.close();
        assert_eq!(handle.zone(), "tools");
        assert_eq!(
            q.drain(),
            vec![ZoneCommand::Close("tools".into()), ZoneCommand::Close("tools".into())]
        );
    }
}
