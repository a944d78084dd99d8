//! Layout dispatch: from a layout document to a [`Frame`].
//!
//! Rendering is split in two so the app can animate in between:
//! [`LayoutRenderer::arrange`] resolves the variant, the live tracks and the
//! zone rectangles; [`LayoutRenderer::compose`] instantiates blocks and slide
//! affordances for a given arrangement. [`LayoutRenderer::render`] does both
//! and never fails: problems turn into a placeholder frame.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use indexmap::{IndexMap, IndexSet};

use crate::anim::Ease;
use crate::config::LayoutConfig;
use crate::geometry::{Region, Size};
use crate::i18n::Translator;
use crate::registry::ComponentRegistry;
use crate::slide::{SlideController, ZoneCommands};
use crate::track::{CellMetrics, Tracks};
use crate::viewport::Breakpoint;

use super::engine::{GridEngine, LayoutError};
use super::frame::Frame;
use super::{grid, slide};

// ---------------------------------------------------------------------------
// LayoutKind
// ---------------------------------------------------------------------------

/// The `layout` discriminator of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Static responsive grid.
    Grid,
    /// Grid with slide zones.
    Slide,
}

impl LayoutKind {
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Grid => "GridLayout",
            LayoutKind::Slide => "SlideLayout",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `layout` value no renderer handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown layout type: {0}")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutKind {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GridLayout" => Ok(LayoutKind::Grid),
            "SlideLayout" => Ok(LayoutKind::Slide),
            other => Err(UnknownLayout(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors and context
// ---------------------------------------------------------------------------

/// Why a document could not be arranged.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    UnknownLayout(#[from] UnknownLayout),

    #[error("No valid grid variant found")]
    NoVariant,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Per-render inputs owned by the caller.
pub struct RenderContext<'a> {
    pub viewport: Size,
    /// Active viewport class.
    pub class: Breakpoint,
    pub slides: &'a SlideController,
    pub now: Instant,
    /// Curve applied to slide-out progress.
    pub ease: Ease,
    pub translator: &'a dyn Translator,
    /// Queue handed to blocks in slideable zones.
    pub commands: &'a ZoneCommands,
    /// Zones whose block the user has flipped.
    pub toggled: &'a IndexSet<String>,
}

/// Where every zone goes for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub kind: LayoutKind,
    /// Class of the variant that was picked.
    pub class: Breakpoint,
    pub tracks: Tracks,
    /// Zone rectangles in cells, keyed by zone name.
    pub regions: IndexMap<String, Region>,
}

// ---------------------------------------------------------------------------
// LayoutRenderer
// ---------------------------------------------------------------------------

/// Renders layout documents through a reusable grid engine.
#[derive(Default)]
pub struct LayoutRenderer {
    engine: GridEngine,
}

impl LayoutRenderer {
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            engine: GridEngine::new(metrics),
        }
    }

    /// Resolve the variant and compute tracks and zone rectangles.
    pub fn arrange(
        &mut self,
        config: &LayoutConfig,
        ctx: &RenderContext<'_>,
    ) -> Result<Arrangement, RenderError> {
        let kind: LayoutKind = config.layout.parse()?;
        let (class, variant) = config.grid.resolve(ctx.class).ok_or(RenderError::NoVariant)?;

        let tracks = match kind {
            LayoutKind::Grid => grid::tracks(variant),
            LayoutKind::Slide => slide::tracks(variant, &config.zones, ctx.slides),
        };
        let regions = self.engine.compute(variant, &tracks, ctx.viewport)?;
        tracing::trace!(%kind, %class, ?tracks, "arranged");

        Ok(Arrangement {
            kind,
            class,
            tracks,
            regions,
        })
    }

    /// Instantiate blocks and affordances for `arrangement`.
    pub fn compose(
        &self,
        config: &LayoutConfig,
        registry: &ComponentRegistry,
        ctx: &RenderContext<'_>,
        arrangement: &Arrangement,
    ) -> Frame {
        match arrangement.kind {
            LayoutKind::Grid => grid::compose(config, registry, ctx, arrangement),
            LayoutKind::Slide => slide::compose(config, registry, ctx, arrangement),
        }
    }

    /// Arrange and compose in one step.
    ///
    /// Unknown layout types, missing variants and layout failures are logged
    /// and produce a placeholder frame carrying the message.
    #[tracing::instrument(level = "debug", skip_all, fields(layout = %config.layout, class = %ctx.class))]
    pub fn render(
        &mut self,
        config: &LayoutConfig,
        registry: &ComponentRegistry,
        ctx: &RenderContext<'_>,
    ) -> Frame {
        match self.arrange(config, ctx) {
            Ok(arrangement) => self.compose(config, registry, ctx, &arrangement),
            Err(err) => {
                tracing::warn!(error = %err, "layout not rendered");
                Frame::placeholder(ctx.viewport, err.to_string())
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
