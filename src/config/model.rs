//! Layout description types: LayoutConfig, GridConfig, GridVariant, ZoneConfig.
//!
//! These mirror the JSON document a page mounts: a `layout` discriminator, a
//! map of named zones, and one grid arrangement per viewport class. Zone names
//! are the tokens used inside `areas`.

use std::fs;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::viewport::Breakpoint;

/// Opaque property bag forwarded verbatim to a building block.
pub type Props = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors raised while loading a layout description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read layout file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid layout document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("layout defines no grid variant")]
    NoVariants,
}

// ---------------------------------------------------------------------------
// GridArea
// ---------------------------------------------------------------------------

/// The rectangle of cells a zone token covers, as half-open track ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridArea {
    pub row_start: usize,
    pub row_end: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl GridArea {
    /// Number of rows spanned.
    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    /// Number of columns spanned.
    pub fn column_span(&self) -> usize {
        self.column_end - self.column_start
    }

    /// Whether the cell at (row, column) lies inside the area.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        (self.row_start..self.row_end).contains(&row)
            && (self.column_start..self.column_end).contains(&column)
    }
}

// ---------------------------------------------------------------------------
// GridVariant
// ---------------------------------------------------------------------------

/// Whether an `areas` token denotes an empty cell (`""` or a run of dots).
pub fn is_empty_token(token: &str) -> bool {
    token.is_empty() || token.chars().all(|c| c == '.')
}

/// One complete grid arrangement: named cells plus track sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridVariant {
    /// Rows of zone-name tokens. A token may repeat to span cells.
    pub areas: Vec<Vec<String>>,
    /// One track-size expression per column.
    pub columns: Vec<String>,
    /// One track-size expression per row.
    pub rows: Vec<String>,
}

impl GridVariant {
    /// Build a variant from string slices.
    pub fn new(areas: &[&[&str]], columns: &[&str], rows: &[&str]) -> Self {
        Self {
            areas: areas
                .iter()
                .map(|row| row.iter().map(|t| (*t).to_owned()).collect())
                .collect(),
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            rows: rows.iter().map(|r| (*r).to_owned()).collect(),
        }
    }

    /// Number of rows in `areas`.
    pub fn row_count(&self) -> usize {
        self.areas.len()
    }

    /// Number of columns, taken from the widest `areas` row.
    pub fn column_count(&self) -> usize {
        self.areas.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// The zone token at (row, column), or `None` for empty/out-of-range cells.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.areas
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .filter(|t| !is_empty_token(t))
    }

    /// Distinct zone tokens in reading order (row-major).
    pub fn tokens(&self) -> IndexSet<&str> {
        self.areas
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|t| !is_empty_token(t))
            .collect()
    }

    /// Whether `zone` appears anywhere in `areas`.
    pub fn contains_zone(&self, zone: &str) -> bool {
        self.areas.iter().flatten().any(|t| t == zone)
    }

    /// Bounding rectangle of `zone`'s cells.
    ///
    /// For a well-formed variant this is exactly the zone's region.
    pub fn area_of(&self, zone: &str) -> Option<GridArea> {
        let mut area: Option<GridArea> = None;
        for (r, row) in self.areas.iter().enumerate() {
            for (c, token) in row.iter().enumerate() {
                if token != zone {
                    continue;
                }
                area = Some(match area {
                    None => GridArea {
                        row_start: r,
                        row_end: r + 1,
                        column_start: c,
                        column_end: c + 1,
                    },
                    Some(a) => GridArea {
                        row_start: a.row_start.min(r),
                        row_end: a.row_end.max(r + 1),
                        column_start: a.column_start.min(c),
                        column_end: a.column_end.max(c + 1),
                    },
                });
            }
        }
        area
    }

    /// The `grid-template-areas` string form, one quoted row per line.
    pub fn template_areas(&self) -> String {
        self.areas
            .iter()
            .map(|row| format!("\"{}\"", row.join(" ")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Grid variants keyed by viewport class, narrowest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs: Option<GridVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sm: Option<GridVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<GridVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lg: Option<GridVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xl: Option<GridVariant>,
}

impl GridConfig {
    /// The variant defined for exactly `class`, if any.
    pub fn get(&self, class: Breakpoint) -> Option<&GridVariant> {
        match class {
            Breakpoint::Xs => self.xs.as_ref(),
            Breakpoint::Sm => self.sm.as_ref(),
            Breakpoint::Md => self.md.as_ref(),
            Breakpoint::Lg => self.lg.as_ref(),
            Breakpoint::Xl => self.xl.as_ref(),
        }
    }

    /// Set the variant for `class` (builder).
    pub fn with(mut self, class: Breakpoint, variant: GridVariant) -> Self {
        let slot = match class {
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Xl => &mut self.xl,
        };
        *slot = Some(variant);
        self
    }

    /// All defined variants, narrowest class first.
    pub fn variants(&self) -> impl Iterator<Item = (Breakpoint, &GridVariant)> {
        Breakpoint::ALL
            .into_iter()
            .filter_map(move |bp| self.get(bp).map(|v| (bp, v)))
    }

    /// Whether no variant is defined at all.
    pub fn is_empty(&self) -> bool {
        self.variants().next().is_none()
    }

    /// The variant to render for viewport class `class`.
    ///
    /// See [`crate::viewport::resolve_variant`].
    pub fn resolve(&self, class: Breakpoint) -> Option<(Breakpoint, &GridVariant)> {
        crate::viewport::resolve_variant(self, class)
    }
}

// ---------------------------------------------------------------------------
// ZoneConfig
// ---------------------------------------------------------------------------

/// The edge a slideable zone exits toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

/// Grid axis a slide direction collapses along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Column,
    Row,
}

impl SlideDirection {
    /// Left/right collapse columns, top/bottom collapse rows.
    pub fn axis(self) -> Axis {
        match self {
            SlideDirection::Left | SlideDirection::Right => Axis::Column,
            SlideDirection::Top | SlideDirection::Bottom => Axis::Row,
        }
    }

    /// Whether the direction moves along the x axis.
    pub fn is_horizontal(self) -> bool {
        self.axis() == Axis::Column
    }
}

fn default_open() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

/// A named zone: the building block it shows plus optional slide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    /// Symbolic building-block name resolved through the registry.
    pub component: String,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub props: Props,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub slideable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_direction: Option<SlideDirection>,
    /// Display text or translation key for the ghost strip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_label: Option<String>,
    #[serde(default = "default_open", skip_serializing_if = "is_true")]
    pub default_open: bool,
    /// Zones sharing a group keep at least one member open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_group: Option<String>,
}

impl ZoneConfig {
    /// A plain, non-slideable zone showing `component`.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            props: Props::new(),
            slideable: false,
            slide_direction: None,
            slide_label: None,
            default_open: true,
            slide_group: None,
        }
    }

    /// Attach a property bag (builder).
    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = props {
            self.props = map;
        }
        self
    }

    /// Make the zone slideable toward `direction` (builder).
    pub fn slideable(mut self, direction: SlideDirection) -> Self {
        self.slideable = true;
        self.slide_direction = Some(direction);
        self
    }

    /// Set the ghost-strip label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.slide_label = Some(label.into());
        self
    }

    /// Set the initial open state (builder).
    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Put the zone into a slide group (builder).
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.slide_group = Some(group.into());
        self
    }

    /// The slide direction, `left` when unspecified.
    pub fn direction(&self) -> SlideDirection {
        self.slide_direction.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// A complete layout description, supplied once per mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Discriminator selecting the renderer (`GridLayout`, `SlideLayout`).
    pub layout: String,
    /// Zones in declaration order; keys are the tokens used in `areas`.
    #[serde(default)]
    pub zones: IndexMap<String, ZoneConfig>,
    #[serde(default)]
    pub grid: GridConfig,
}

impl LayoutConfig {
    /// An empty layout for the given discriminator.
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            zones: IndexMap::new(),
            grid: GridConfig::default(),
        }
    }

    /// Add a zone (builder). Re-adding a name replaces it in place.
    pub fn zone(mut self, name: impl Into<String>, zone: ZoneConfig) -> Self {
        self.zones.insert(name.into(), zone);
        self
    }

    /// Set the grid variant for a viewport class (builder).
    pub fn variant(mut self, class: Breakpoint, variant: GridVariant) -> Self {
        self.grid = self.grid.with(class, variant);
        self
    }

    /// Parse a layout document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a layout document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Names of the slideable zones, in declaration order.
    pub fn slideable_zones(&self) -> impl Iterator<Item = (&str, &ZoneConfig)> {
        self.zones
            .iter()
            .filter(|(_, z)| z.slideable)
            .map(|(n, z)| (n.as_str(), z))
    }
}
