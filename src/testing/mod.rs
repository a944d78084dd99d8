//! Headless testing helpers: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive an [`App`](crate::app::App) on a virtual clock
//! without a real terminal, and the snapshot helpers to capture rendered
//! output as plain text.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{compositor_to_string, frame_to_string, render_to_string, strips_to_string};
