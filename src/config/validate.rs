//! Structural checks over a [`LayoutConfig`].
//!
//! Validation never fails: it collects every problem it finds so callers can
//! log them and keep rendering whatever is usable.

use std::fmt;

use super::model::{GridVariant, LayoutConfig};
use crate::track::TrackSize;
use crate::viewport::Breakpoint;

/// One structural problem found in a layout document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// `grid` defines no variant at all.
    NoVariants,
    /// Rows of `areas` differ in length.
    RaggedAreas { class: Breakpoint },
    /// `columns` or `rows` length does not match the `areas` shape.
    TrackCountMismatch {
        class: Breakpoint,
        axis: &'static str,
        expected: usize,
        found: usize,
    },
    /// A token's cells do not form a filled rectangle.
    NonRectangularArea { class: Breakpoint, zone: String },
    /// A track-size expression did not parse.
    InvalidTrackSize { class: Breakpoint, track: String },
    /// A slideable zone omits `slideDirection` (treated as `left`).
    MissingSlideDirection { zone: String },
    /// `areas` names a token with no zone definition.
    UnknownZoneInAreas { class: Breakpoint, zone: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::NoVariants => f.write_str("grid defines no variant"),
            ConfigIssue::RaggedAreas { class } => {
                write!(f, "{class}: areas rows have different lengths")
            }
            ConfigIssue::TrackCountMismatch {
                class,
                axis,
                expected,
                found,
            } => write!(f, "{class}: expected {expected} {axis}, found {found}"),
            ConfigIssue::NonRectangularArea { class, zone } => {
                write!(f, "{class}: zone `{zone}` does not form a rectangle")
            }
            ConfigIssue::InvalidTrackSize { class, track } => {
                write!(f, "{class}: invalid track size `{track}`")
            }
            ConfigIssue::MissingSlideDirection { zone } => {
                write!(f, "slideable zone `{zone}` has no slideDirection, using left")
            }
            ConfigIssue::UnknownZoneInAreas { class, zone } => {
                write!(f, "{class}: areas reference undefined zone `{zone}`")
            }
        }
    }
}

impl LayoutConfig {
    /// Collect every structural problem in the document.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.grid.is_empty() {
            issues.push(ConfigIssue::NoVariants);
        }

        for (class, variant) in self.grid.variants() {
            check_variant(self, class, variant, &mut issues);
        }

        for (name, zone) in self.slideable_zones() {
            if zone.slide_direction.is_none() {
                issues.push(ConfigIssue::MissingSlideDirection {
                    zone: name.to_owned(),
                });
            }
        }

        issues
    }

    /// Run [`validate`](Self::validate) and log each issue as a warning.
    pub fn validate_and_log(&self) -> usize {
        let issues = self.validate();
        for issue in &issues {
            tracing::warn!(%issue, "layout configuration issue");
        }
        issues.len()
    }
}

fn check_variant(
    config: &LayoutConfig,
    class: Breakpoint,
    variant: &GridVariant,
    issues: &mut Vec<ConfigIssue>,
) {
    let columns = variant.column_count();
    if variant.areas.iter().any(|row| row.len() != columns) {
        issues.push(ConfigIssue::RaggedAreas { class });
    }

    for (axis, expected, found) in [
        ("columns", columns, variant.columns.len()),
        ("rows", variant.row_count(), variant.rows.len()),
    ] {
        if expected != found {
            issues.push(ConfigIssue::TrackCountMismatch {
                class,
                axis,
                expected,
                found,
            });
        }
    }

    for track in variant.columns.iter().chain(&variant.rows) {
        if TrackSize::parse(track).is_err() {
            issues.push(ConfigIssue::InvalidTrackSize {
                class,
                track: track.clone(),
            });
        }
    }

    for zone in variant.tokens() {
        if !config.zones.contains_key(zone) {
            issues.push(ConfigIssue::UnknownZoneInAreas {
                class,
                zone: zone.to_owned(),
            });
        }
        if let Some(area) = variant.area_of(zone) {
            let filled = (area.row_start..area.row_end).all(|r| {
                (area.column_start..area.column_end)
                    .all(|c| variant.cell(r, c) == Some(zone))
            });
            if !filled {
                issues.push(ConfigIssue::NonRectangularArea {
                    class,
                    zone: zone.to_owned(),
                });
            }
        }
    }
}
