//! Built-in building blocks.
//!
//! Each block reads its settings from the zone's property bag. Unknown props
//! are ignored and missing ones take the defaults documented per block.

pub mod basic_panel;
pub mod collapsible_panel;
pub mod color_block;
pub mod home_button;
pub mod label;

pub use basic_panel::BasicPanel;
pub use collapsible_panel::CollapsiblePanel;
pub use color_block::ColorBlock;
pub use home_button::HomeButton;
pub use label::Label;

/// Map a theme palette name to a terminal color.
///
/// Anything that is not a palette name is returned unchanged so raw colors
/// (`"#1e88e5"`, `"red"`) pass through.
pub fn palette(name: &str) -> &str {
    match name {
        "primary" => "#1976d2",
        "secondary" => "#9c27b0",
        "success" => "#2e7d32",
        "error" => "#d32f2f",
        "info" => "#0288d1",
        "warning" => "#ed6c02",
        other => other,
    }
}
