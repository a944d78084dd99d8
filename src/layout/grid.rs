//! GridLayout: every zone at its grid area, no slide behaviour.
//!
//! Slide fields on zones are ignored here; a slideable zone in a grid layout
//! renders like any other.

use crate::config::{GridVariant, LayoutConfig};
use crate::registry::{BlockContext, ComponentRegistry};
use crate::track::Tracks;

use super::frame::{Frame, PlacedZone, Z_STATIC};
use super::renderer::{Arrangement, RenderContext};

/// The variant's tracks, as declared.
pub fn tracks(variant: &GridVariant) -> Tracks {
    Tracks::of(variant)
}

/// Place every zone that has a region, in declaration order.
pub fn compose(
    config: &LayoutConfig,
    registry: &ComponentRegistry,
    ctx: &RenderContext<'_>,
    arrangement: &Arrangement,
) -> Frame {
    let mut frame = Frame::new(ctx.viewport);
    frame.class = Some(arrangement.class);
    frame.tracks = Some(arrangement.tracks.clone());

    for (name, zone) in &config.zones {
        let Some(&region) = arrangement.regions.get(name) else {
            continue;
        };
        let block_ctx = BlockContext {
            zone: name,
            props: &zone.props,
            registry,
            translator: ctx.translator,
            close_panel: None,
            toggled: ctx.toggled.contains(name.as_str()),
        };
        let Some(block) = registry.build(&zone.component, &block_ctx) else {
            continue;
        };
        frame.zones.push(PlacedZone {
            name: name.clone(),
            region,
            z: Z_STATIC,
            block,
            layer: None,
        });
    }
    frame
}
