//! ColorBlock: fills its whole region with one background color.

use std::any::Any;

use crate::geometry::Region;
use crate::registry::{Block, BlockContext};
use crate::render::strip::{CellStyle, Strip};

/// Background used when the `color` prop is absent.
pub const DEFAULT_COLOR: &str = "#ccc";

/// A solid rectangle, optionally with a centred caption.
///
/// Props: `color` (default `#ccc`), `label` (translated, optional).
#[derive(Debug, Clone)]
pub struct ColorBlock {
    color: String,
    label: Option<String>,
}

impl ColorBlock {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            label: None,
        }
    }

    /// Set a caption (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn from_context(ctx: &BlockContext<'_>) -> Self {
        let color = ctx.prop_str("color").unwrap_or(DEFAULT_COLOR);
        let block = Self::new(super::palette(color));
        match ctx.prop_str("label") {
            Some(key) => block.with_label(ctx.t(key)),
            None => block,
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Default for ColorBlock {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl Block for ColorBlock {
    fn block_type(&self) -> &str {
        "ColorBlock"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let style = CellStyle::new().with_bg(self.color.clone());
        let mut strips = Strip::fill_region(region, &style);
        if let Some(label) = &self.label {
            let y = region.y + region.height / 2;
            strips.push(Strip::centered(region, y, label, style.with_fg("black")));
        }
        strips
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
