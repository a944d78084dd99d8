//! Grid tracks: size expressions and the collapse rule for hidden zones.

pub mod collapse;
pub mod size;
pub mod tokenizer;

pub use collapse::{collapse_tracks, is_column_collapsible, is_row_collapsible, Tracks, COLLAPSED_TRACK};
pub use size::{CellMetrics, Length, TrackParseError, TrackSize};
