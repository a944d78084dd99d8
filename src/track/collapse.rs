//! Safe collapse of grid tracks behind hidden slide zones.
//!
//! A hidden zone's column (left/right) or row (top/bottom) shrinks to zero
//! only when nothing else would lose space: every other cell in that track is
//! empty or belongs to a zone that also lives in another track.

use indexmap::IndexMap;

use crate::config::{is_empty_token, Axis, GridVariant, ZoneConfig};

/// Size a collapsed track is set to.
pub const COLLAPSED_TRACK: &str = "0px";

/// The live track lists of a variant after collapse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tracks {
    pub columns: Vec<String>,
    pub rows: Vec<String>,
}

impl Tracks {
    /// The variant's declared tracks, untouched.
    pub fn of(variant: &GridVariant) -> Self {
        Self {
            columns: variant.columns.clone(),
            rows: variant.rows.clone(),
        }
    }

    /// Track list along `axis`.
    pub fn along(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Column => &self.columns,
            Axis::Row => &self.rows,
        }
    }

    fn along_mut(&mut self, axis: Axis) -> &mut Vec<String> {
        match axis {
            Axis::Column => &mut self.columns,
            Axis::Row => &mut self.rows,
        }
    }
}

/// Whether column `column` may collapse for hidden zone `zone`.
///
/// Every cell in the column must be empty, `zone` itself, or a token that
/// also occupies another column of the same row.
pub fn is_column_collapsible(variant: &GridVariant, column: usize, zone: &str) -> bool {
    column_safe(variant, column, zone, |_| true)
}

/// Whether row `row` may collapse for hidden zone `zone`.
///
/// Every cell in the row must be empty, `zone` itself, or a token that also
/// occupies another row.
pub fn is_row_collapsible(variant: &GridVariant, row: usize, zone: &str) -> bool {
    row_safe(variant, row, zone, |_| true)
}

// The other occurrence of a shared token must sit in a track that is still
// alive, otherwise a zone could lose every track to successive collapses.
fn column_safe(
    variant: &GridVariant,
    column: usize,
    zone: &str,
    live: impl Fn(usize) -> bool,
) -> bool {
    variant.areas.iter().all(|row| match row.get(column) {
        None => true,
        Some(token) => {
            is_empty_token(token)
                || token == zone
                || row
                    .iter()
                    .enumerate()
                    .any(|(c, other)| c != column && other == token && live(c))
        }
    })
}

fn row_safe(variant: &GridVariant, row: usize, zone: &str, live: impl Fn(usize) -> bool) -> bool {
    let Some(cells) = variant.areas.get(row) else {
        return true;
    };
    cells.iter().all(|token| {
        is_empty_token(token)
            || token == zone
            || variant
                .areas
                .iter()
                .enumerate()
                .any(|(r, other)| r != row && other.contains(token) && live(r))
    })
}

/// Compute the tracks to render given which zones are hidden.
///
/// Starts from the variant's tracks verbatim. For each slideable zone in
/// `zones` that appears in the variant and for which `is_hidden` holds, the
/// tracks it occupies along its slide axis are set to [`COLLAPSED_TRACK`]
/// when safe. Unsafe tracks keep their declared size.
pub fn collapse_tracks(
    variant: &GridVariant,
    zones: &IndexMap<String, ZoneConfig>,
    mut is_hidden: impl FnMut(&str) -> bool,
) -> Tracks {
    let mut tracks = Tracks::of(variant);

    for (name, zone) in zones {
        if !zone.slideable || !is_hidden(name) {
            continue;
        }
        let Some(area) = variant.area_of(name) else {
            continue;
        };
        let axis = zone.direction().axis();
        let range = match axis {
            Axis::Column => area.column_start..area.column_end,
            Axis::Row => area.row_start..area.row_end,
        };
        let list = tracks.along_mut(axis);
        for index in range {
            if index >= list.len() {
                break;
            }
            let live = |i: usize| list.get(i).is_some_and(|t| t != COLLAPSED_TRACK);
            let safe = match axis {
                Axis::Column => column_safe(variant, index, name, live),
                Axis::Row => row_safe(variant, index, name, live),
            };
            if safe {
                list[index] = COLLAPSED_TRACK.to_owned();
            } else {
                tracing::trace!(zone = %name, index, ?axis, "track shared, not collapsing");
            }
        }
    }

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlideDirection;
    use pretty_assertions::assert_eq;

    fn zones(entries: &[(&str, Option<SlideDirection>)]) -> IndexMap<String, ZoneConfig> {
        entries
            .iter()
            .map(|(name, dir)| {
                let zone = match dir {
                    Some(d) => ZoneConfig::new("ColorBlock").slideable(*d),
                    None => ZoneConfig::new("ColorBlock"),
                };
                ((*name).to_owned(), zone)
            })
            .collect()
    }

    fn aab() -> GridVariant {
        GridVariant::new(
            &[&["A", "A", "B"], &["C", "C", "B"]],
            &["1fr", "1fr", "200px"],
            &["1fr", "1fr"],
        )
    }

    // -----------------------------------------------------------------------
    // Column collapse
    // -----------------------------------------------------------------------

    #[test]
    fn hidden_right_zone_collapses_its_column() {
        let v = aab();
        let z = zones(&[("A", None), ("B", Some(SlideDirection::Right)), ("C", None)]);
        let t = collapse_tracks(&v, &z, |n| n == "B");
        assert_eq!(t.columns, vec!["1fr", "1fr", "0px"]);
        assert_eq!(t.rows, vec!["1fr", "1fr"]);
    }

    #[test]
    fn nothing_hidden_keeps_tracks_verbatim() {
        let v = aab();
        let z = zones(&[("A", None), ("B", Some(SlideDirection::Right)), ("C", None)]);
        assert_eq!(collapse_tracks(&v, &z, |_| false), Tracks::of(&v));
    }

    #[test]
    fn shared_column_is_not_collapsed() {
        // D sits only in column 0 of row 1, so column 0 cannot collapse for A.
        let v = GridVariant::new(
            &[&["A", "B"], &["D", "B"]],
            &["100px", "1fr"],
            &["1fr", "1fr"],
        );
        let z = zones(&[("A", Some(SlideDirection::Left)), ("B", None), ("D", None)]);
        let t = collapse_tracks(&v, &z, |n| n == "A");
        assert_eq!(t.columns, vec!["100px", "1fr"]);
    }

    #[test]
    fn spanning_neighbour_keeps_column_safe() {
        // C spans both columns of row 1, so losing column 0 does not starve it.
        let v = GridVariant::new(
            &[&["A", "B"], &["C", "C"]],
            &["100px", "1fr"],
            &["1fr", "1fr"],
        );
        let z = zones(&[("A", Some(SlideDirection::Left)), ("B", None), ("C", None)]);
        let t = collapse_tracks(&v, &z, |n| n == "A");
        assert_eq!(t.columns, vec!["0px", "1fr"]);
    }

    #[test]
    fn empty_cells_do_not_block_collapse() {
        let v = GridVariant::new(&[&["A", "B"], &[".", "B"]], &["10", "1fr"], &["1fr", "1fr"]);
        let z = zones(&[("A", Some(SlideDirection::Left)), ("B", None)]);
        assert!(is_column_collapsible(&v, 0, "A"));
        let t = collapse_tracks(&v, &z, |n| n == "A");
        assert_eq!(t.columns, vec!["0px", "1fr"]);
    }

    // -----------------------------------------------------------------------
    // Row collapse
    // -----------------------------------------------------------------------

    #[test]
    fn hidden_bottom_zone_collapses_its_row() {
        let v = GridVariant::new(
            &[&["main", "side"], &["dock", "dock"]],
            &["1fr", "1fr"],
            &["1fr", "12"],
        );
        let z = zones(&[("main", None), ("side", None), ("dock", Some(SlideDirection::Bottom))]);
        let t = collapse_tracks(&v, &z, |n| n == "dock");
        assert_eq!(t.rows, vec!["1fr", "0px"]);
        assert_eq!(t.columns, vec!["1fr", "1fr"]);
    }

    #[test]
    fn row_with_unique_neighbour_is_kept() {
        let v = GridVariant::new(&[&["top", "x"], &["main", "main"]], &["1fr", "1fr"], &["5", "1fr"]);
        assert!(!is_row_collapsible(&v, 0, "top"));
        let z = zones(&[("top", Some(SlideDirection::Top)), ("x", None), ("main", None)]);
        assert_eq!(collapse_tracks(&v, &z, |n| n == "top").rows, vec!["5", "1fr"]);
    }

    #[test]
    fn row_neighbour_spanning_rows_is_safe() {
        let v = GridVariant::new(&[&["top", "x"], &["main", "x"]], &["1fr", "1fr"], &["5", "1fr"]);
        assert!(is_row_collapsible(&v, 0, "top"));
    }

    // -----------------------------------------------------------------------
    // Share-safety property
    // -----------------------------------------------------------------------

    #[test]
    fn collapse_never_removes_a_visible_zones_last_track() {
        let variants = [
            aab(),
            GridVariant::new(&[&["A", "B", "C"]], &["1fr", "1fr", "1fr"], &["1fr"]),
            GridVariant::new(&[&["A", "A"], &["B", "C"]], &["1fr", "1fr"], &["1fr", "1fr"]),
            GridVariant::new(&[&["A", "B"], &["A", "C"]], &["1fr", "1fr"], &["1fr", "1fr"]),
            GridVariant::new(&[&["A", "A"], &["B", "B"]], &["1fr", "1fr"], &["1fr", "1fr"]),
        ];
        let dirs = [SlideDirection::Left, SlideDirection::Top];

        for v in &variants {
            let names: Vec<&str> = v.tokens().into_iter().collect();
            for hidden in &names {
                for dir in dirs {
                    let z: IndexMap<String, ZoneConfig> = names
                        .iter()
                        .map(|n| {
                            let cfg = if n == hidden {
                                ZoneConfig::new("ColorBlock").slideable(dir)
                            } else {
                                ZoneConfig::new("ColorBlock")
                            };
                            ((*n).to_owned(), cfg)
                        })
                        .collect();
                    let t = collapse_tracks(v, &z, |n| n == *hidden);

                    for visible in names.iter().filter(|n| *n != hidden) {
                        let a = v.area_of(visible).unwrap();
                        let cols_alive = (a.column_start..a.column_end)
                            .any(|c| t.columns[c] != COLLAPSED_TRACK);
                        let rows_alive =
                            (a.row_start..a.row_end).any(|r| t.rows[r] != COLLAPSED_TRACK);
                        assert!(
                            cols_alive && rows_alive,
                            "{visible} lost all tracks when {hidden} hid toward {dir:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn zone_spanning_the_same_tracks_keeps_one() {
        // X shares both columns with H; only one of them may go.
        let v = GridVariant::new(&[&["H", "H"], &["X", "X"]], &["1fr", "1fr"], &["1fr", "1fr"]);
        let z = zones(&[("H", Some(SlideDirection::Left)), ("X", None)]);
        let t = collapse_tracks(&v, &z, |n| n == "H");
        assert_eq!(t.columns, vec!["0px", "1fr"]);
    }

    #[test]
    fn short_track_list_is_tolerated() {
        let v = GridVariant::new(&[&["A", "B"]], &["1fr"], &["1fr"]);
        let z = zones(&[("A", None), ("B", Some(SlideDirection::Right))]);
        assert_eq!(collapse_tracks(&v, &z, |_| true).columns, vec!["1fr"]);
    }
}
