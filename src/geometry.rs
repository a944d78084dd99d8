//! Core geometry types: Offset, Size, Region.
//!
//! All coordinates are in terminal cells. Zone rectangles, slide offsets and
//! hit-test targets are expressed with these types.

use std::ops::{Add, Neg, Sub};

use crate::config::SlideDirection;

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D displacement or position delta in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Linearly interpolate between `self` and `other` by `factor`.
    ///
    /// `factor = 0.0` returns `self`, `factor = 1.0` returns `other`.
    #[inline]
    pub fn blend(self, other: Offset, factor: f64) -> Offset {
        Offset {
            x: lerp_i32(self.x, other.x, factor),
            y: lerp_i32(self.y, other.y, factor),
        }
    }

    /// Displacement of `fraction` times `extent` toward `direction`.
    ///
    /// `extent` is the zone's size; a fraction above 1 pushes the zone fully
    /// past its own edge.
    pub fn toward(direction: SlideDirection, extent: Size, fraction: f64) -> Offset {
        let w = (extent.width as f64 * fraction).round() as i32;
        let h = (extent.height as f64 * fraction).round() as i32;
        match direction {
            SlideDirection::Left => Offset::new(-w, 0),
            SlideDirection::Right => Offset::new(w, 0),
            SlideDirection::Top => Offset::new(0, -h),
            SlideDirection::Bottom => Offset::new(0, h),
        }
    }
}

#[inline]
fn lerp_i32(a: i32, b: i32, factor: f64) -> i32 {
    (a as f64 * (1.0 - factor) + b as f64 * factor).round() as i32
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular region in terminal cells defined by position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection of two regions.
    ///
    /// Returns [`Region::EMPTY`] if the regions do not overlap.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: w, height: h }
        }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, width: self.width, height: self.height }
    }

    /// Interpolate position and size toward `other`.
    pub fn blend(self, other: Region, factor: f64) -> Region {
        Region {
            x: lerp_i32(self.x, other.x, factor),
            y: lerp_i32(self.y, other.y, factor),
            width: lerp_i32(self.width, other.width, factor),
            height: lerp_i32(self.height, other.height, factor),
        }
    }

    /// A band `thickness` cells deep along the `side` edge, inside the region.
    pub fn edge(self, side: SlideDirection, thickness: i32) -> Region {
        let tw = thickness.min(self.width).max(0);
        let th = thickness.min(self.height).max(0);
        match side {
            SlideDirection::Left => Region::new(self.x, self.y, tw, self.height),
            SlideDirection::Right => Region::new(self.right() - tw, self.y, tw, self.height),
            SlideDirection::Top => Region::new(self.x, self.y, self.width, th),
            SlideDirection::Bottom => Region::new(self.x, self.bottom() - th, self.width, th),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
