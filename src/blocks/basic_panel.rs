//! BasicPanel: a padded column of nested blocks.
//!
//! The panel's `children` prop is a list of `{ "component", "props" }`
//! entries resolved through the same registry that built the panel. Entries
//! naming an unknown component are skipped.

use std::any::Any;

use crate::config::Props;
use crate::geometry::Region;
use crate::registry::{Block, BlockContext, BlockEvent};
use crate::render::strip::{CellStyle, Strip};

/// Cells between the panel edge and its content.
pub const PADDING: i32 = 1;
/// Rows between consecutive children.
pub const GAP: i32 = 1;

/// A vertical stack of child blocks.
///
/// Props: `children` (list), `title` (translated, optional).
pub struct BasicPanel {
    title: Option<String>,
    children: Vec<Box<dyn Block>>,
}

impl BasicPanel {
    pub fn new() -> Self {
        Self {
            title: None,
            children: Vec::new(),
        }
    }

    /// Set the heading (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a child (builder).
    pub fn with_child(mut self, child: Box<dyn Block>) -> Self {
        self.children.push(child);
        self
    }

    pub fn from_context(ctx: &BlockContext<'_>) -> Self {
        let mut panel = Self::new();
        if let Some(title) = ctx.prop_str("title") {
            panel = panel.with_title(ctx.t(title));
        }

        let entries = ctx
            .props
            .get("children")
            .and_then(|v| v.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let empty = Props::new();
        for entry in entries {
            let Some(component) = entry.get("component").and_then(|v| v.as_str()) else {
                tracing::warn!(zone = ctx.zone, "panel child without a component name");
                continue;
            };
            let props = entry
                .get("props")
                .and_then(|v| v.as_object())
                .unwrap_or(&empty);
            if let Some(child) = ctx.registry.build(component, &ctx.child(props)) {
                panel.children.push(child);
            }
        }
        panel
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn children(&self) -> &[Box<dyn Block>] {
        &self.children
    }

    /// Content area inside the padding, below the title if any.
    fn body(&self, region: Region) -> Region {
        let mut inner = Region::new(
            region.x + PADDING,
            region.y + PADDING,
            region.width - 2 * PADDING,
            region.height - 2 * PADDING,
        );
        if self.title.is_some() {
            inner.y += 1 + GAP;
            inner.height -= 1 + GAP;
        }
        inner
    }

    /// One slot per child, sharing the body height evenly. The last child
    /// takes the remainder.
    pub fn slots(&self, region: Region) -> Vec<Region> {
        let body = self.body(region);
        let n = self.children.len() as i32;
        if n == 0 || body.is_empty() {
            return Vec::new();
        }
        let available = (body.height - GAP * (n - 1)).max(0);
        let share = available / n;
        let mut y = body.y;
        (0..n)
            .map(|i| {
                let height = if i == n - 1 {
                    available - share * (n - 1)
                } else {
                    share
                };
                let slot = Region::new(body.x, y, body.width, height);
                y += height + GAP;
                slot
            })
            .collect()
    }
}

impl Default for BasicPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Block for BasicPanel {
    fn block_type(&self) -> &str {
        "BasicPanel"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let mut strips = Vec::new();
        if let Some(title) = &self.title {
            let row = Region::new(
                region.x + PADDING,
                region.y + PADDING,
                region.width - 2 * PADDING,
                1,
            );
            if !row.is_empty() {
                let mut strip = Strip::new(row.y, row.x);
                strip.push_str(title, CellStyle::new().bold());
                strips.push(strip.crop(row.x, row.right()));
            }
        }

        for (child, slot) in self.children.iter().zip(self.slots(region)) {
            if slot.is_empty() {
                continue;
            }
            strips.extend(
                child
                    .render(slot)
                    .into_iter()
                    .filter(|s| s.y >= slot.y && s.y < slot.bottom())
                    .map(|s| s.crop(slot.x, slot.right())),
            );
        }
        strips
    }

    fn click(&self, region: Region, x: i32, y: i32) -> Option<BlockEvent> {
        self.children
            .iter()
            .zip(self.slots(region))
            .find(|(_, slot)| slot.contains(x, y))
            .and_then(|(child, slot)| child.click(slot, x, y))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
