//! CollapsiblePanel: a [`BasicPanel`] that folds into a menu button.
//!
//! Open, the first row is a header with a `◂` fold control and the rest is
//! laid out like a `BasicPanel`. Folded, the whole region is one `☰` button.
//! Clicking either emits [`BlockEvent::Toggle`]; the host remembers the flip
//! per zone and hands it back through [`BlockContext::toggled`].

use std::any::Any;

use crate::geometry::Region;
use crate::registry::{Block, BlockContext, BlockEvent};
use crate::render::strip::{CellStyle, Strip};

use super::BasicPanel;

pub const MENU_GLYPH: &str = "☰";
pub const FOLD_GLYPH: char = '◂';
/// Background of the folded button.
pub const FOLDED_BACKGROUND: &str = "#333333";

/// A panel of nested blocks with an open/folded state.
///
/// Props: `collapsed` (bool, default `false`) plus everything `BasicPanel`
/// reads (`children`, `title`).
pub struct CollapsiblePanel {
    open: bool,
    panel: BasicPanel,
}

impl CollapsiblePanel {
    pub fn new(panel: BasicPanel) -> Self {
        Self { open: true, panel }
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn from_context(ctx: &BlockContext<'_>) -> Self {
        let collapsed = ctx
            .props
            .get("collapsed")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        // Open unless exactly one of `collapsed` and the flip holds.
        Self::new(BasicPanel::from_context(ctx)).with_open(collapsed == ctx.toggled)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn panel(&self) -> &BasicPanel {
        &self.panel
    }

    fn body(region: Region) -> Region {
        Region::new(region.x, region.y + 1, region.width, region.height - 1)
    }
}

impl Default for CollapsiblePanel {
    fn default() -> Self {
        Self::new(BasicPanel::new())
    }
}

impl Block for CollapsiblePanel {
    fn block_type(&self) -> &str {
        "CollapsiblePanel"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        if !self.open {
            let style = CellStyle::new().with_bg(FOLDED_BACKGROUND).with_fg("white");
            let mut strips = Strip::fill_region(region, &style);
            let y = region.y + region.height / 2;
            strips.push(Strip::centered(region, y, MENU_GLYPH, style.bold()));
            return strips;
        }

        let mut header = Strip::new(region.y, region.x);
        header.push(FOLD_GLYPH, CellStyle::new().bold());
        let mut strips = vec![header.crop(region.x, region.right())];
        let body = Self::body(region);
        if !body.is_empty() {
            strips.extend(self.panel.render(body));
        }
        strips
    }

    fn click(&self, region: Region, x: i32, y: i32) -> Option<BlockEvent> {
        if !region.contains(x, y) {
            return None;
        }
        if !self.open || y == region.y {
            return Some(BlockEvent::Toggle);
        }
        self.panel.click(Self::body(region), x, y)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
