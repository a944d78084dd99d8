//! SlideLayout: a grid whose slideable zones can be closed and reopened.
//!
//! Hidden zones collapse their tracks (when safe), slide their content out
//! toward their direction while fading, and leave a ghost strip behind once
//! fully closed. Open zones carry a close control unless their slide group
//! has locked them.

use indexmap::{IndexMap, IndexSet};

use crate::config::{GridVariant, LayoutConfig, ZoneConfig};
use crate::registry::{BlockContext, ComponentRegistry};
use crate::slide::SlideController;
use crate::track::{collapse_tracks, Tracks};

use super::frame::{
    CloseControl, Frame, GhostStrip, PlacedZone, SlideLayer, Z_HIDDEN, Z_STATIC, Z_VISIBLE,
};
use super::renderer::{Arrangement, RenderContext};

/// Live tracks: the variant's tracks with hidden zones collapsed.
pub fn tracks(
    variant: &GridVariant,
    zones: &IndexMap<String, ZoneConfig>,
    slides: &SlideController,
) -> Tracks {
    collapse_tracks(variant, zones, |zone| slides.is_hidden(zone))
}

/// Place every zone, adding slide layers and affordances.
pub fn compose(
    config: &LayoutConfig,
    registry: &ComponentRegistry,
    ctx: &RenderContext<'_>,
    arrangement: &Arrangement,
) -> Frame {
    let mut frame = Frame::new(ctx.viewport);
    frame.class = Some(arrangement.class);
    frame.tracks = Some(arrangement.tracks.clone());

    let active: IndexSet<&str> = arrangement.regions.keys().map(String::as_str).collect();
    let locked = ctx.slides.locked_zones(&config.zones, &active);

    for (name, zone) in &config.zones {
        let Some(&region) = arrangement.regions.get(name) else {
            continue;
        };
        let block_ctx = BlockContext {
            zone: name,
            props: &zone.props,
            registry,
            translator: ctx.translator,
            close_panel: zone
                .slideable
                .then(|| ctx.commands.close_panel(name.as_str())),
            toggled: ctx.toggled.contains(name.as_str()),
        };
        let Some(block) = registry.build(&zone.component, &block_ctx) else {
            continue;
        };

        if !zone.slideable {
            frame.zones.push(PlacedZone {
                name: name.clone(),
                region,
                z: Z_STATIC,
                block,
                layer: None,
            });
            continue;
        }

        let direction = zone.direction();
        let visible = ctx.slides.is_visible(name);
        let (z, layer) = if visible {
            if !locked.contains(name.as_str()) {
                frame.controls.extend(CloseControl::docked(name, region, direction));
            }
            (Z_VISIBLE, SlideLayer::visible(direction))
        } else {
            let progress = ctx.slides.hidden_fraction(name, ctx.now) as f64;
            let layer = SlideLayer::hidden(direction, region.size(), ctx.ease.apply(progress));
            (Z_HIDDEN, layer)
        };

        if ctx.slides.is_closed(name) {
            let label = zone
                .slide_label
                .as_deref()
                .map(|key| ctx.translator.t(key, Some(key)));
            frame
                .ghosts
                .push(GhostStrip::docked(name, region, direction, ctx.viewport, label));
        }

        frame.zones.push(PlacedZone {
            name: name.clone(),
            region,
            z,
            block,
            layer: Some(layer),
        });
    }
    frame
}

// ===========================================================================
// Tests
// ===========================================================================
