//! HomeButton block: a full-width button that navigates to a route.

use std::any::Any;

use crate::geometry::Region;
use crate::registry::{Block, BlockContext, BlockEvent};
use crate::render::strip::{CellStyle, Strip};

/// Route used when the `to` prop is absent.
pub const DEFAULT_ROUTE: &str = "/";

/// A button labelled "⌂ Home".
///
/// Props: `to` (route, default `/`), `color` (palette name or color, default
/// `primary`). Clicking anywhere on the button yields
/// [`BlockEvent::Navigate`].
#[derive(Debug, Clone)]
pub struct HomeButton {
    to: String,
    label: String,
    color: String,
}

impl HomeButton {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            label: "Home".to_owned(),
            color: super::palette("primary").to_owned(),
        }
    }

    /// Set the background color (builder).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn from_context(ctx: &BlockContext<'_>) -> Self {
        let mut button = Self::new(ctx.prop_str("to").unwrap_or(DEFAULT_ROUTE));
        button.label = ctx.translator.t("home", Some("Home"));
        match ctx.prop_str("color") {
            Some("inherit") | None => button,
            Some(color) => button.with_color(super::palette(color)),
        }
    }

    /// Route this button navigates to.
    pub fn route(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Row of `region` that carries the caption.
    fn caption_row(region: Region) -> i32 {
        if region.height >= 3 {
            region.y + 1
        } else {
            region.y
        }
    }
}

impl Block for HomeButton {
    fn block_type(&self) -> &str {
        "HomeButton"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let style = CellStyle::new().with_bg(self.color.clone()).with_fg("white");
        // Never taller than three rows, like a contained button.
        let button = Region::new(region.x, region.y, region.width, region.height.min(3));
        let mut strips = Strip::fill_region(button, &style);
        let caption = format!("⌂ {}", self.label);
        strips.push(Strip::centered(
            button,
            Self::caption_row(button),
            &caption,
            style.bold(),
        ));
        strips
    }

    fn click(&self, region: Region, x: i32, y: i32) -> Option<BlockEvent> {
        let button = Region::new(region.x, region.y, region.width, region.height.min(3));
        button
            .contains(x, y)
            .then(|| BlockEvent::Navigate(self.to.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
