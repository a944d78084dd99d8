//! TaffyTree wrapper for grid layout computation.
//!
//! [`GridEngine`] turns a variant's areas and the live track list into a
//! taffy grid container with one leaf per zone, runs layout, and returns the
//! zone rectangles in cells.

use indexmap::IndexMap;
use taffy::geometry::{Line, Size as TaffySize};
use taffy::style::{AvailableSpace, Display, GridTemplateComponent, Style};
use taffy::style_helpers::{length, line, span};
use taffy::{TaffyError, TaffyTree};

use crate::config::{Axis, GridVariant};
use crate::geometry::{Region, Size};
use crate::track::{CellMetrics, TrackSize, Tracks};

/// Grid layout failure.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("grid layout failed: {0}")]
    Taffy(#[from] TaffyError),
}

/// Computes zone rectangles with taffy's CSS grid implementation.
pub struct GridEngine {
    tree: TaffyTree<()>,
    metrics: CellMetrics,
}

impl GridEngine {
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            tree: TaffyTree::new(),
            metrics,
        }
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Lay out every zone of `variant` inside `viewport` using `tracks`.
    ///
    /// Zones come back in first-appearance order of their tokens. Tracks
    /// missing from `tracks` become implicit `auto` tracks.
    pub fn compute(
        &mut self,
        variant: &GridVariant,
        tracks: &Tracks,
        viewport: Size,
    ) -> Result<IndexMap<String, Region>, LayoutError> {
        self.tree.clear();

        let mut leaves = Vec::new();
        for token in variant.tokens() {
            let Some(area) = variant.area_of(token) else {
                continue;
            };
            let style = Style {
                grid_row: Line {
                    start: line(area.row_start as i16 + 1),
                    end: span(area.row_span() as u16),
                },
                grid_column: Line {
                    start: line(area.column_start as i16 + 1),
                    end: span(area.column_span() as u16),
                },
                ..Default::default()
            };
            leaves.push((token, self.tree.new_leaf(style)?));
        }

        let root_style = Style {
            display: Display::Grid,
            size: TaffySize {
                width: length(viewport.width.max(0) as f32),
                height: length(viewport.height.max(0) as f32),
            },
            grid_template_columns: self.template(&tracks.columns, Axis::Column),
            grid_template_rows: self.template(&tracks.rows, Axis::Row),
            ..Default::default()
        };
        let children: Vec<_> = leaves.iter().map(|(_, id)| *id).collect();
        let root = self.tree.new_with_children(root_style, &children)?;

        self.tree.compute_layout(
            root,
            TaffySize {
                width: AvailableSpace::Definite(viewport.width.max(0) as f32),
                height: AvailableSpace::Definite(viewport.height.max(0) as f32),
            },
        )?;

        let mut regions = IndexMap::with_capacity(leaves.len());
        for (token, id) in leaves {
            let layout = self.tree.layout(id)?;
            regions.insert(
                token.to_owned(),
                Region {
                    x: layout.location.x.round() as i32,
                    y: layout.location.y.round() as i32,
                    width: layout.size.width.round() as i32,
                    height: layout.size.height.round() as i32,
                },
            );
        }
        tracing::trace!(columns = ?tracks.columns, rows = ?tracks.rows, "grid computed");
        Ok(regions)
    }

    fn template(&self, tracks: &[String], axis: Axis) -> Vec<GridTemplateComponent<String>> {
        tracks
            .iter()
            .map(|t| {
                let size = TrackSize::parse_lenient(t);
                GridTemplateComponent::Single(size.to_taffy(axis, &self.metrics))
            })
            .collect()
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new(CellMetrics::default())
    }
}
