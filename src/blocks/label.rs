//! Label block: translated, non-interactive text.

use std::any::Any;

use crate::geometry::Region;
use crate::registry::{Block, BlockContext};
use crate::render::strip::{CellStyle, Strip};

/// Fixed text, one strip per line.
///
/// Props: `text` (a translation key; the key itself shows when untranslated),
/// `color` (foreground, optional).
///
/// Lines are split on `'\n'`, truncated to the region width and limited to
/// the region height.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    style: CellStyle,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::default(),
        }
    }

    /// Set the text style (builder).
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn from_context(ctx: &BlockContext<'_>) -> Self {
        let text = ctx.prop_str("text").map(|key| ctx.t(key)).unwrap_or_default();
        let mut style = CellStyle::new();
        if let Some(color) = ctx.prop_str("color") {
            style = style.with_fg(super::palette(color));
        }
        Self::new(text).with_style(style)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Block for Label {
    fn block_type(&self) -> &str {
        "Label"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let max_width = region.width as usize;
        self.text
            .split('\n')
            .take(region.height as usize)
            .enumerate()
            .map(|(i, line)| {
                let mut strip = Strip::new(region.y + i as i32, region.x);
                let truncated: String = line.chars().take(max_width).collect();
                strip.push_str(&truncated, self.style.clone());
                strip.fill(region.width, self.style.clone());
                strip
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
