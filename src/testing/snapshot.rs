//! Snapshot rendering helpers.
//!
//! Convert rendered output (strips, blocks, frames, compositor screens) into
//! plain text for assertions and `insta` snapshots. Rows are right-trimmed
//! and joined with `'\n'`; styles are dropped.

use crate::geometry::Region;
use crate::layout::Frame;
use crate::registry::Block;
use crate::render::compositor::Compositor;
use crate::render::strip::Strip;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a block into a `width` x `height` region at the origin.
pub fn render_to_string(block: &dyn Block, width: i32, height: i32) -> String {
    let strips = block.render(Region::new(0, 0, width, height));
    strips_to_string(&strips, width, height)
}

/// Paint a frame onto a fresh screen of the frame's size.
pub fn frame_to_string(frame: &Frame) -> String {
    let width = frame.size.width.max(0) as u16;
    let height = frame.size.height.max(0) as u16;
    let mut compositor = Compositor::new(width, height);
    compositor.paint_frame(frame);
    compositor_to_string(&compositor)
}

/// Overlay strips onto a blank `width` x `height` grid.
///
/// Cells outside the grid are dropped.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; width as usize]; height as usize];
    for strip in strips {
        let Some(row) = usize::try_from(strip.y).ok().and_then(|y| grid.get_mut(y)) else {
            continue;
        };
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if let Some(slot) = usize::try_from(x).ok().and_then(|x| row.get_mut(x)) {
                *slot = cell.ch;
            }
        }
    }

    join_rows(grid.into_iter().map(|row| row.into_iter().collect()))
}

/// Every row of the compositor's screen.
pub fn compositor_to_string(compositor: &Compositor) -> String {
    join_rows((0..compositor.height).filter_map(|y| compositor.row_text(y)))
}

fn join_rows(rows: impl Iterator<Item = String>) -> String {
    rows.map(|row| row.trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{HomeButton, Label};
    use crate::render::strip::CellStyle;

    // ── render_to_string ─────────────────────────────────────────────

    #[test]
    fn label_to_text() {
        let output = render_to_string(&Label::new("Hello"), 10, 2);
        assert_eq!(output, "Hello\n");
    }

    #[test]
    fn home_button_caption() {
        let output = render_to_string(&HomeButton::new("/"), 12, 5);
        assert_eq!(output, "\n   ⌂ Home\n\n\n");
    }

    #[test]
    fn zero_dimensions() {
        assert!(render_to_string(&Label::new("Hello"), 0, 0).is_empty());
    }

    // ── strips_to_string ─────────────────────────────────────────────

    #[test]
    fn strips_outside_grid_are_dropped() {
        let mut inside = Strip::new(1, -1);
        inside.push_str("abc", CellStyle::new());
        let mut below = Strip::new(5, 0);
        below.push_str("zzz", CellStyle::new());

        assert_eq!(strips_to_string(&[inside, below], 4, 2), "\nbc");
    }

    // ── compositor_to_string ─────────────────────────────────────────

    #[test]
    fn compositor_rows_are_trimmed() {
        let mut compositor = Compositor::new(6, 2);
        let mut strip = Strip::new(1, 2);
        strip.push_str("hi", CellStyle::new());
        compositor.place_strips(&[strip], &Region::new(2, 1, 4, 1));
        assert_eq!(compositor_to_string(&compositor), "\n  hi");
    }

    #[test]
    fn placeholder_frame() {
        let frame = Frame::placeholder(crate::geometry::Size::new(20, 3), "nothing");
        assert_eq!(frame_to_string(&frame), "\n      nothing\n");
    }
}
