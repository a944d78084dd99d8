//! Slide zones: per-zone open state, deferred closes, group locks, and the
//! command queue blocks use to close their own panel.

pub mod commands;
pub mod controller;

pub use commands::{ClosePanel, ZoneCommand, ZoneCommands};
pub use controller::{SlideController, SlideState, TimerId, DEFAULT_TRANSITION};
