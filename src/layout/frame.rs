//! Frame: one rendered layout, ready to paint and hit-test.
//!
//! A frame owns the instantiated blocks of every placed zone together with
//! the slide affordances (close controls and ghost strips). Painting walks the
//! zones in ascending z-order; [`Frame::hit_test`] walks the same stack top
//! down.

use crate::config::SlideDirection;
use crate::geometry::{Offset, Region, Size};
use crate::registry::Block;
use crate::track::Tracks;
use crate::viewport::Breakpoint;

// ---------------------------------------------------------------------------
// Stacking
// ---------------------------------------------------------------------------

/// Non-slideable zones.
pub const Z_STATIC: i32 = 0;
/// Slide zones that are open.
pub const Z_VISIBLE: i32 = 10;
/// Close controls, above their (open) zone.
pub const Z_CONTROL: i32 = 20;
/// Slide zones that are closing or closed, above open ones so the exit
/// animation is never covered.
pub const Z_HIDDEN: i32 = 30;
/// Ghost strips, above everything.
pub const Z_GHOST: i32 = 40;

/// How far a hidden zone travels, as a multiple of its own extent.
pub const SLIDE_OUT: f64 = 1.05;

/// Arrow shown on a close control: points the way the zone leaves.
pub fn close_glyph(direction: SlideDirection) -> char {
    match direction {
        SlideDirection::Left => '◂',
        SlideDirection::Right => '▸',
        SlideDirection::Top => '▴',
        SlideDirection::Bottom => '▾',
    }
}

/// Arrow shown on a ghost strip: points the way the zone comes back.
pub fn open_glyph(direction: SlideDirection) -> char {
    match direction {
        SlideDirection::Left => '▸',
        SlideDirection::Right => '◂',
        SlideDirection::Top => '▾',
        SlideDirection::Bottom => '▴',
    }
}

// ---------------------------------------------------------------------------
// Frame parts
// ---------------------------------------------------------------------------

/// Visual state of a slideable zone's content layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayer {
    pub direction: SlideDirection,
    /// Displacement applied to the content, zero while visible.
    pub offset: Offset,
    /// 1 while visible, fading to 0 while hidden.
    pub opacity: f32,
    /// Only visible zones receive clicks.
    pub interactive: bool,
}

impl SlideLayer {
    /// Layer of a fully visible zone.
    pub fn visible(direction: SlideDirection) -> Self {
        Self {
            direction,
            offset: Offset::ZERO,
            opacity: 1.0,
            interactive: true,
        }
    }

    /// Layer of a hidden zone `fraction` of the way through its exit.
    pub fn hidden(direction: SlideDirection, extent: Size, fraction: f64) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        Self {
            direction,
            offset: Offset::toward(direction, extent, SLIDE_OUT * fraction),
            opacity: (1.0 - fraction) as f32,
            interactive: false,
        }
    }

    /// Below half opacity the content is not drawn.
    pub fn is_painted(&self) -> bool {
        self.opacity >= 0.5
    }
}

/// A zone with its block, placed on the grid.
pub struct PlacedZone {
    pub name: String,
    /// Grid area in cells (before any slide offset).
    pub region: Region,
    pub z: i32,
    pub block: Box<dyn Block>,
    /// `None` for non-slideable zones.
    pub layer: Option<SlideLayer>,
}

impl PlacedZone {
    /// Where the content is drawn: the grid area moved by the slide offset.
    pub fn painted_region(&self) -> Region {
        match self.layer {
            Some(layer) => self.region.translate(layer.offset),
            None => self.region,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.layer.is_none_or(|l| l.interactive)
    }

    pub fn is_painted(&self) -> bool {
        self.layer.is_none_or(|l| l.is_painted())
    }
}

impl std::fmt::Debug for PlacedZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedZone")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("z", &self.z)
            .field("block", &self.block.block_type())
            .field("layer", &self.layer)
            .finish()
    }
}

/// The control that closes an open slide zone, on the zone's inner edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseControl {
    pub zone: String,
    pub region: Region,
    pub glyph: char,
}

impl CloseControl {
    /// A one-cell control centred on the edge facing away from `direction`.
    ///
    /// Returns `None` for an empty zone region.
    pub fn docked(zone: &str, region: Region, direction: SlideDirection) -> Option<Self> {
        if region.is_empty() {
            return None;
        }
        let mid_x = region.x + region.width / 2;
        let mid_y = region.y + region.height / 2;
        let (x, y) = match direction {
            SlideDirection::Left => (region.right() - 1, mid_y),
            SlideDirection::Right => (region.x, mid_y),
            SlideDirection::Top => (mid_x, region.bottom() - 1),
            SlideDirection::Bottom => (mid_x, region.y),
        };
        Some(Self {
            zone: zone.to_owned(),
            region: Region::new(x, y, 1, 1),
            glyph: close_glyph(direction),
        })
    }
}

/// The affordance that reopens a closed zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostStrip {
    pub zone: String,
    pub direction: SlideDirection,
    /// One cell thick, along the zone's edge toward its slide direction.
    pub region: Region,
    /// Translated `slideLabel`, if any.
    pub label: Option<String>,
}

impl GhostStrip {
    /// Dock a strip to the `direction` edge of `region`, kept inside `bounds`.
    ///
    /// `region` may have collapsed to zero thickness; the strip then sits on
    /// the neighbouring cell so it stays clickable.
    pub fn docked(
        zone: &str,
        region: Region,
        direction: SlideDirection,
        bounds: Size,
        label: Option<String>,
    ) -> Self {
        let mut strip = match direction {
            SlideDirection::Left => Region::new(region.x, region.y, 1, region.height),
            SlideDirection::Right => Region::new(region.right() - 1, region.y, 1, region.height),
            SlideDirection::Top => Region::new(region.x, region.y, region.width, 1),
            SlideDirection::Bottom => Region::new(region.x, region.bottom() - 1, region.width, 1),
        };
        strip.x = strip.x.clamp(0, (bounds.width - strip.width).max(0));
        strip.y = strip.y.clamp(0, (bounds.height - strip.height).max(0));
        Self {
            zone: zone.to_owned(),
            direction,
            region: strip,
            label,
        }
    }

    pub fn glyph(&self) -> char {
        open_glyph(self.direction)
    }
}

/// What a point on screen belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    CloseControl(String),
    GhostStrip(String),
    Zone(String),
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A fully composed layout.
#[derive(Debug, Default)]
pub struct Frame {
    pub size: Size,
    /// Class of the variant that was rendered.
    pub class: Option<Breakpoint>,
    /// Live tracks the regions were computed from.
    pub tracks: Option<Tracks>,
    /// Zones in declaration order.
    pub zones: Vec<PlacedZone>,
    pub controls: Vec<CloseControl>,
    pub ghosts: Vec<GhostStrip>,
    /// Message drawn instead of zones when nothing could be laid out.
    pub placeholder: Option<String>,
}

impl Frame {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// A frame carrying only `message`.
    pub fn placeholder(size: Size, message: impl Into<String>) -> Self {
        Self {
            size,
            placeholder: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn zone(&self, name: &str) -> Option<&PlacedZone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn ghost(&self, zone: &str) -> Option<&GhostStrip> {
        self.ghosts.iter().find(|g| g.zone == zone)
    }

    pub fn control(&self, zone: &str) -> Option<&CloseControl> {
        self.controls.iter().find(|c| c.zone == zone)
    }

    /// Zones sorted by ascending z; declaration order breaks ties.
    pub fn paint_order(&self) -> Vec<&PlacedZone> {
        let mut order: Vec<&PlacedZone> = self.zones.iter().collect();
        order.sort_by_key(|z| z.z);
        order
    }

    /// The topmost interactive element at (x, y).
    ///
    /// Hidden zones sit above controls but never take clicks, so the stack
    /// reduces to ghosts, then controls, then open zones top down.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<HitTarget> {
        if let Some(ghost) = self.ghosts.iter().rev().find(|g| g.region.contains(x, y)) {
            return Some(HitTarget::GhostStrip(ghost.zone.clone()));
        }
        if let Some(control) = self.controls.iter().rev().find(|c| c.region.contains(x, y)) {
            return Some(HitTarget::CloseControl(control.zone.clone()));
        }
        self.paint_order()
            .into_iter()
            .rev()
            .find(|z| z.is_interactive() && z.painted_region().contains(x, y))
            .map(|z| HitTarget::Zone(z.name.clone()))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
