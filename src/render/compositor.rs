//! Screen buffer and frame painting.
//!
//! The `Compositor` maintains a 2D grid of `StyledCell`s representing the full
//! terminal screen. [`Compositor::paint_frame`] draws a layout [`Frame`] into
//! it layer by layer; `diff` compares two buffers and produces only the
//! `CellUpdate`s needed to transition between them.

use crate::config::SlideDirection;
use crate::geometry::Region;
use crate::layout::{CloseControl, Frame, GhostStrip, PlacedZone, Z_CONTROL, Z_GHOST};

use super::strip::{CellStyle, Strip, StyledCell};

/// Background of ghost strips and close controls.
const AFFORDANCE_BG: &str = "#14141e";
const AFFORDANCE_FG: &str = "#e6e6e6";

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
///
/// Used by the driver to emit minimal terminal escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

// ---------------------------------------------------------------------------
// Paint layers
// ---------------------------------------------------------------------------

/// One paintable element of a frame with its stacking level.
enum Layer<'a> {
    Zone(&'a PlacedZone),
    Control(&'a CloseControl),
    Ghost(&'a GhostStrip),
}

impl Layer<'_> {
    fn z(&self) -> i32 {
        match self {
            Layer::Zone(zone) => zone.z,
            Layer::Control(_) => Z_CONTROL,
            Layer::Ghost(_) => Z_GHOST,
        }
    }
}

// ---------------------------------------------------------------------------
// Compositor
// ---------------------------------------------------------------------------

/// The screen buffer a frame is painted into.
#[derive(Debug, Clone)]
pub struct Compositor {
    /// `screen[y][x]` is the cell at column x, row y.
    screen: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Compositor {
    /// Create a new compositor with a blank screen of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: Self::blank_screen(width, height),
            width,
            height,
        }
    }

    /// Resize the screen buffer. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.screen = Self::blank_screen(width, height);
    }

    /// The whole screen as a region.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Place rendered strips into the screen buffer, clipped to `region`.
    ///
    /// Each strip's cells are written at their (x_offset + i, y) position, but
    /// only if that position falls within both the clip `region` and the
    /// screen bounds.
    pub fn place_strips(&mut self, strips: &[Strip], region: &Region) {
        let clip = region.intersection(self.bounds());
        if clip.is_empty() {
            return;
        }

        for strip in strips {
            if strip.y < clip.y || strip.y >= clip.bottom() {
                continue;
            }
            let row = &mut self.screen[strip.y as usize];
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x >= clip.x && x < clip.right() {
                    row[x as usize] = cell.clone();
                }
            }
        }
    }

    /// Clear the screen and paint `frame`.
    ///
    /// Zones, close controls and ghost strips are painted in ascending
    /// z-order. Zone content is drawn at the zone's slide-offset region and
    /// skipped while its layer is mostly transparent.
    pub fn paint_frame(&mut self, frame: &Frame) {
        self.fill(CellStyle::default());

        if let Some(message) = &frame.placeholder {
            let y = self.height as i32 / 2;
            let strip = Strip::centered(self.bounds(), y, message, CellStyle::default());
            self.place_strips(&[strip], &self.bounds());
            return;
        }

        let mut layers: Vec<Layer<'_>> = frame
            .zones
            .iter()
            .map(Layer::Zone)
            .chain(frame.controls.iter().map(Layer::Control))
            .chain(frame.ghosts.iter().map(Layer::Ghost))
            .collect();
        layers.sort_by_key(Layer::z);

        for layer in layers {
            match layer {
                Layer::Zone(zone) => self.paint_zone(zone),
                Layer::Control(control) => self.paint_control(control),
                Layer::Ghost(ghost) => self.paint_ghost(ghost),
            }
        }
    }

    fn paint_zone(&mut self, zone: &PlacedZone) {
        if !zone.is_painted() {
            return;
        }
        let region = zone.painted_region();
        let strips = zone.block.render(region);
        self.place_strips(&strips, &region);
    }

    fn paint_control(&mut self, control: &CloseControl) {
        let mut strip = Strip::new(control.region.y, control.region.x);
        strip.push(control.glyph, affordance_style().bold());
        self.place_strips(&[strip], &control.region);
    }

    fn paint_ghost(&mut self, ghost: &GhostStrip) {
        let region = ghost.region;
        let style = affordance_style();
        let mut strips = Strip::fill_region(region, &style);

        let mut text = String::new();
        text.push(ghost.glyph());
        if let Some(label) = &ghost.label {
            text.push(' ');
            text.push_str(&label.to_uppercase());
        }

        match ghost.direction {
            SlideDirection::Left | SlideDirection::Right => {
                // Vertical strip: one character per row, centred.
                let len = text.chars().count() as i32;
                let top = region.y + ((region.height - len) / 2).max(0);
                for (i, ch) in text.chars().enumerate() {
                    let mut strip = Strip::new(top + i as i32, region.x);
                    strip.push(ch, style.clone().bold());
                    strips.push(strip);
                }
            }
            SlideDirection::Top | SlideDirection::Bottom => {
                strips.push(Strip::centered(region, region.y, &text, style.clone().bold()));
            }
        }
        self.place_strips(&strips, &region);
    }

    /// Compare this frame against a previous frame and return only the changed cells.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.screen.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let before = previous.screen.get(y).and_then(|r| r.get(x));
                if before != Some(cell) {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: cell.clone(),
                    });
                }
            }
        }
        updates
    }

    /// Get a reference to the screen buffer cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.screen
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// The characters of row `y`, or `None` past the last row.
    pub fn row_text(&self, y: u16) -> Option<String> {
        self.screen
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
    }

    /// Fill the entire screen with a given style.
    pub fn fill(&mut self, style: CellStyle) {
        for row in &mut self.screen {
            for cell in row.iter_mut() {
                *cell = StyledCell::blank_styled(style.clone());
            }
        }
    }

    fn blank_screen(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        (0..height)
            .map(|_| vec![StyledCell::blank(); width as usize])
            .collect()
    }
}

fn affordance_style() -> CellStyle {
    CellStyle::new()
        .with_fg(AFFORDANCE_FG)
        .with_bg(AFFORDANCE_BG)
}

// ===========================================================================
// Tests
// ===========================================================================
