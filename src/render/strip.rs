//! Strip: a horizontal line of styled terminal cells.
//!
//! Blocks render into `Vec<Strip>` at absolute screen coordinates; the
//! compositor clips the strips to the block's zone and places them into the
//! screen buffer.

use crate::geometry::{Offset, Region};

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// This is a self-contained style type (no gilt dependency) used throughout
/// the rendering pipeline. Colors are stored as optional strings that can be
/// parsed as named colors or `#rrggbb` hex values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub reverse: bool,
}

impl CellStyle {
    /// Create a new `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color (builder).
    pub fn with_fg(mut self, color: impl Into<String>) -> Self {
        self.fg = Some(color.into());
        self
    }

    /// Set the background color (builder).
    pub fn with_bg(mut self, color: impl Into<String>) -> Self {
        self.bg = Some(color.into());
        self
    }

    /// Turn on bold (builder).
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Turn on reverse video (builder).
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    /// Create a new styled cell.
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled terminal cells.
///
/// Each Strip represents one row (at a given y position) starting at `x_offset`.
/// Blocks produce strips; the compositor places them into the screen buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    /// The row this strip occupies (0-based from top of region).
    pub y: i32,
    /// Starting x position for this strip's cells.
    pub x_offset: i32,
    /// The cells in left-to-right order.
    pub cells: Vec<StyledCell>,
}

impl Strip {
    /// Create a new empty strip at the given row and x offset.
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self {
            y,
            x_offset,
            cells: Vec::new(),
        }
    }

    /// Push a single character with the given style.
    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push every character of `text` with the same style.
    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        for ch in text.chars() {
            self.cells.push(StyledCell::new(ch, style.clone()));
        }
    }

    /// The width of this strip in cells.
    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Crop the strip to only include cells whose x positions fall within
    /// `[x_start, x_end)` (absolute positions). Returns a new Strip.
    ///
    /// Cells outside the range are discarded. The returned strip's `x_offset`
    /// is adjusted to `x_start` (or the first cell's position if later).
    pub fn crop(&self, x_start: i32, x_end: i32) -> Strip {
        let mut result = Strip::new(self.y, x_start);
        for (i, cell) in self.cells.iter().enumerate() {
            let cell_x = self.x_offset + i as i32;
            if cell_x >= x_start && cell_x < x_end {
                if result.cells.is_empty() {
                    result.x_offset = cell_x;
                }
                result.cells.push(cell.clone());
            }
        }
        result
    }

    /// Pad the strip to exactly `width` cells using spaces with the given style.
    ///
    /// If the strip is already wider than `width`, it is truncated.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width as usize;
        if self.cells.len() < w {
            self.cells
                .resize(w, StyledCell::blank_styled(style));
        } else if self.cells.len() > w {
            self.cells.truncate(w);
        }
    }

    /// The rightmost x position (exclusive) of this strip.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// Move the strip by `offset`.
    pub fn translate(mut self, offset: Offset) -> Strip {
        self.x_offset += offset.x;
        self.y += offset.y;
        self
    }

    /// One strip per row of `region`, each filled with blanks in `style`.
    pub fn fill_region(region: Region, style: &CellStyle) -> Vec<Strip> {
        (region.y..region.bottom())
            .map(|y| {
                let mut strip = Strip::new(y, region.x);
                strip.fill(region.width.max(0), style.clone());
                strip
            })
            .collect()
    }

    /// `text` centred horizontally in `region` on row `y`, truncated to fit.
    pub fn centered(region: Region, y: i32, text: &str, style: CellStyle) -> Strip {
        let len = text.chars().count() as i32;
        let width = region.width.max(0);
        let x = region.x + ((width - len) / 2).max(0);
        let mut strip = Strip::new(y, x);
        strip.push_str(text, style);
        strip.crop(region.x, region.right())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn red_style() -> CellStyle {
        CellStyle {
            fg: Some("red".into()),
            ..CellStyle::default()
        }
    }

    fn blue_bg_bold() -> CellStyle {
        CellStyle {
            bg: Some("blue".into()),
            bold: true,
            ..CellStyle::default()
        }
    }

    // -----------------------------------------------------------------------
    // CellStyle
    // -----------------------------------------------------------------------

    #[test]
    fn cell_style_builders() {
        let cs = CellStyle::new().with_fg("red").with_bg("#ff00ff").bold();
        assert_eq!(cs.fg, Some("red".into()));
        assert_eq!(cs.bg, Some("#ff00ff".into()));
        assert!(cs.bold);
        assert!(!cs.reverse);
        assert!(CellStyle::new().reversed().reverse);
    }

    // -----------------------------------------------------------------------
    // StyledCell
    // -----------------------------------------------------------------------

    #[test]
    fn styled_cell_new() {
        let cell = StyledCell::new('A', red_style());
        assert_eq!(cell.ch, 'A');
        assert_eq!(cell.style.fg, Some("red".into()));
    }

    // -----------------------------------------------------------------------
    // Strip: construction
    // -----------------------------------------------------------------------

    #[test]
    fn strip_push_str() {
        let mut s = Strip::new(0, 0);
        s.push_str("Hello", red_style());
        assert_eq!(s.width(), 5);
        assert_eq!(s.cells[0].ch, 'H');
        assert_eq!(s.cells[4].ch, 'o');
        for cell in &s.cells {
            assert_eq!(cell.style, red_style());
        }
    }

    #[test]
    fn strip_right() {
        let mut s = Strip::new(0, 10);
        s.push_str("abc", CellStyle::default());
        assert_eq!(s.x_offset, 10);
        assert_eq!(s.width(), 3);
        assert_eq!(s.right(), 13);
    }

    // -----------------------------------------------------------------------
    // Strip: crop
    // -----------------------------------------------------------------------

    #[test]
    fn strip_crop_subset() {
        let mut s = Strip::new(0, 0);
        s.push_str("Hello", red_style());
        let cropped = s.crop(1, 4);
        assert_eq!(cropped.width(), 3);
        assert_eq!(cropped.x_offset, 1);
        assert_eq!(cropped.cells[0].ch, 'e');
        assert_eq!(cropped.cells[1].ch, 'l');
        assert_eq!(cropped.cells[2].ch, 'l');
    }

    #[test]
    fn strip_crop_with_offset() {
        let mut s = Strip::new(0, 5);
        s.push_str("World", red_style());
        // Cells are at positions 5, 6, 7, 8, 9
        let cropped = s.crop(6, 9);
        assert_eq!(cropped.width(), 3);
        assert_eq!(cropped.x_offset, 6);
        assert_eq!(cropped.cells[0].ch, 'o');
        assert_eq!(cropped.cells[1].ch, 'r');
        assert_eq!(cropped.cells[2].ch, 'l');
    }

    #[test]
    fn strip_crop_partial_left() {
        let mut s = Strip::new(0, 3);
        s.push_str("abc", red_style());
        // Cells at 3, 4, 5; crop [0, 4) => only cell at 3
        let cropped = s.crop(0, 4);
        assert_eq!(cropped.width(), 1);
        assert_eq!(cropped.x_offset, 3);
        assert_eq!(cropped.cells[0].ch, 'a');
    }

    // -----------------------------------------------------------------------
    // Strip: fill
    // -----------------------------------------------------------------------

    #[test]
    fn strip_fill_pad() {
        let mut s = Strip::new(0, 0);
        s.push_str("Hi", red_style());
        s.fill(5, CellStyle::default());
        assert_eq!(s.width(), 5);
        assert_eq!(s.cells[0].ch, 'H');
        assert_eq!(s.cells[1].ch, 'i');
        assert_eq!(s.cells[2].ch, ' ');
        assert_eq!(s.cells[3].ch, ' ');
        assert_eq!(s.cells[4].ch, ' ');
    }

    #[test]
    fn strip_fill_truncate() {
        let mut s = Strip::new(0, 0);
        s.push_str("Hello World", red_style());
        s.fill(5, CellStyle::default());
        assert_eq!(s.width(), 5);
        assert_eq!(s.cells[4].ch, 'o');
    }

    // -----------------------------------------------------------------------
    // Strip: placement helpers
    // -----------------------------------------------------------------------

    #[test]
    fn strip_translate() {
        let mut s = Strip::new(2, 3);
        s.push_str("ab", red_style());
        let moved = s.translate(Offset::new(-5, 4));
        assert_eq!(moved.x_offset, -2);
        assert_eq!(moved.y, 6);
        assert_eq!(moved.width(), 2);
    }

    #[test]
    fn fill_region_covers_every_row() {
        let strips = Strip::fill_region(Region::new(4, 1, 3, 2), &blue_bg_bold());
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0].y, 1);
        assert_eq!(strips[1].y, 2);
        assert!(strips.iter().all(|s| s.x_offset == 4 && s.width() == 3));
        assert_eq!(strips[0].cells[0].style, blue_bg_bold());
    }

    #[test]
    fn centered_text() {
        let s = Strip::centered(Region::new(0, 0, 10, 1), 0, "Home", red_style());
        assert_eq!(s.x_offset, 3);
        assert_eq!(s.width(), 4);

        let clipped = Strip::centered(Region::new(2, 0, 3, 1), 0, "Toolbar", red_style());
        assert_eq!(clipped.x_offset, 2);
        assert_eq!(clipped.width(), 3);
        assert_eq!(clipped.cells[0].ch, 'T');
    }
}
