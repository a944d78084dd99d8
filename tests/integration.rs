//! Integration tests for gilt-zones.
//!
//! These tests drive the public API from outside the crate: layout documents
//! are parsed from JSON, mounted on a headless app and exercised through the
//! `Pilot`.

use std::any::Any;
use std::time::Duration;

use gilt_zones::app::{App, AppConfig};
use gilt_zones::config::{GridVariant, LayoutConfig, SlideDirection, ZoneConfig};
use gilt_zones::event::input::{Key, Modifiers};
use gilt_zones::geometry::Region;
use gilt_zones::i18n::Catalog;
use gilt_zones::layout::HitTarget;
use gilt_zones::registry::{Block, BlockContext, BlockEvent, ComponentRegistry};
use gilt_zones::render::strip::{CellStyle, Strip};
use gilt_zones::slide::{ClosePanel, ZoneCommand};
use gilt_zones::testing::{frame_to_string, Pilot};
use gilt_zones::track::collapse_tracks;
use gilt_zones::viewport::Breakpoint;
use pretty_assertions::assert_eq;
use serde_json::json;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

const SCENARIO: &str = r#"{
    "layout": "SlideLayout",
    "zones": {
        "A": { "component": "Label", "props": { "text": "alpha" } },
        "B": {
            "component": "Label",
            "props": { "text": "beta" },
            "slideable": true,
            "slideDirection": "right",
            "slideLabel": "panels.tools",
            "defaultOpen": true
        },
        "C": { "component": "Label", "props": { "text": "gamma" } }
    },
    "grid": {
        "xs": {
            "areas": [["A", "A", "B"], ["C", "C", "B"]],
            "columns": ["1fr", "1fr", "200px"],
            "rows": ["1fr", "1fr"]
        }
    }
}"#;

fn scenario_pilot(width: u16, height: u16) -> Pilot {
    let layout = LayoutConfig::from_json(SCENARIO).unwrap();
    let catalog = Catalog::from_value(json!({ "panels": { "tools": "Tools" } }));
    Pilot::from_app(
        App::new_headless(layout, AppConfig::new(), width, height).with_translator(catalog),
    )
}

#[test]
fn scenario_open_screen() {
    let pilot = scenario_pilot(45, 4);
    // 200px is 25 cells; the two 1fr columns share the remaining 20.
    assert_eq!(pilot.frame().zone("B").unwrap().region, Region::new(20, 0, 25, 4));
    insta::assert_snapshot!(pilot.screen_text(), @r"
alpha               beta

gamma               ▸
");
}

#[test]
fn scenario_closing_b_collapses_only_its_column() {
    let mut pilot = scenario_pilot(45, 4);
    let control = pilot.frame().control("B").unwrap().region;
    assert_eq!(control, Region::new(20, 2, 1, 1));

    pilot.click(20, 2);
    assert!(pilot.app().slides().is_hidden("B"));
    pilot.advance(ms(499));
    assert!(!pilot.app().slides().is_closed("B"));
    pilot.advance(ms(1));
    assert!(pilot.app().slides().is_closed("B"));

    let tracks = pilot.frame().tracks.clone().unwrap();
    assert_eq!(tracks.columns, vec!["1fr", "1fr", "0px"]);
    assert_eq!(tracks.rows, vec!["1fr", "1fr"]);
    assert_eq!(pilot.frame().zone("A").unwrap().region, Region::new(0, 0, 45, 2));

    // Ghost strip on the right edge, label translated and upper-cased.
    let pad = |n: usize| " ".repeat(n);
    let expected = [
        format!("alpha{}◂", pad(39)),
        String::new(),
        format!("gamma{}T", pad(39)),
        format!("{}O", pad(44)),
    ]
    .join("\n");
    assert_eq!(pilot.screen_text(), expected);

    pilot.click(44, 1);
    assert!(pilot.app().slides().is_visible("B"));
    assert_eq!(pilot.frame().tracks.clone().unwrap().columns, vec!["1fr", "1fr", "200px"]);
}

// ---------------------------------------------------------------------------
// Bundled demo
// ---------------------------------------------------------------------------

#[test]
fn demo_layout_is_valid_and_slides() {
    let layout = LayoutConfig::from_json(include_str!("../demos/dashboard.json")).unwrap();
    assert!(layout.validate().is_empty());
    let catalog = Catalog::from_json(include_str!("../demos/en.json")).unwrap();

    // 120 columns is 960px: `md`, with nav and tools beside main.
    let mut pilot = Pilot::from_app(
        App::new_headless(layout, AppConfig::new(), 120, 20).with_translator(catalog),
    );
    assert_eq!(pilot.frame().class, Some(Breakpoint::Md));
    assert!(pilot.frame().control("tools").is_some());

    pilot.press_key(Key::Char('1'));
    pilot.advance(ms(500));
    assert!(pilot.app().slides().is_closed("nav"));
    assert!(pilot.frame().control("tools").is_none());
    assert_eq!(pilot.frame().tracks.clone().unwrap().columns[0], "0px");
    assert!(pilot.frame().ghost("nav").is_some());
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

#[test]
fn every_class_resolves_to_the_same_variant() {
    let layout = LayoutConfig::from_json(SCENARIO).unwrap();
    for class in Breakpoint::ALL {
        let (_, first) = layout.grid.resolve(class).unwrap();
        let (_, second) = layout.grid.resolve(class).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}

// ---------------------------------------------------------------------------
// Track collapse
// ---------------------------------------------------------------------------

#[test]
fn shared_tracks_never_collapse() {
    let zones = LayoutConfig::new("SlideLayout")
        .zone("B", ZoneConfig::new("ColorBlock").slideable(SlideDirection::Right))
        .zones;

    // Column 1 also holds D, which lives nowhere else in its row.
    let unsafe_variant =
        GridVariant::new(&[&["A", "B"], &["C", "D"]], &["1fr", "10"], &["1fr", "1fr"]);
    let tracks = collapse_tracks(&unsafe_variant, &zones, |z| z == "B");
    assert_eq!(tracks.columns, vec!["1fr", "10"]);

    // Here C spans both columns, so dropping column 1 cannot orphan it.
    let safe_variant =
        GridVariant::new(&[&["A", "B"], &["C", "C"]], &["1fr", "10"], &["1fr", "1fr"]);
    let tracks = collapse_tracks(&safe_variant, &zones, |z| z == "B");
    assert_eq!(tracks.columns, vec!["1fr", "0px"]);
}

// ---------------------------------------------------------------------------
// Slide behaviour
// ---------------------------------------------------------------------------

fn sides_layout() -> LayoutConfig {
    LayoutConfig::new("SlideLayout")
        .zone(
            "left",
            ZoneConfig::new("ColorBlock")
                .slideable(SlideDirection::Left)
                .in_group("sides"),
        )
        .zone("main", ZoneConfig::new("ColorBlock"))
        .zone(
            "right",
            ZoneConfig::new("ColorBlock")
                .slideable(SlideDirection::Right)
                .in_group("sides"),
        )
        .variant(
            Breakpoint::Xs,
            GridVariant::new(&[&["left", "main", "right"]], &["10", "1fr", "10"], &["1fr"]),
        )
        .variant(
            Breakpoint::Md,
            GridVariant::new(&[&["left", "main", "right"]], &["20", "1fr", "20"], &["1fr"]),
        )
}

#[test]
fn group_members_lock_while_one_is_closed() {
    let mut pilot = Pilot::new(sides_layout(), 60, 6);
    assert!(pilot.frame().control("left").is_some());
    assert!(pilot.frame().control("right").is_some());

    pilot.click(9, 3);
    assert!(pilot.frame().control("right").is_none());
    pilot.press_key(Key::Char('2'));
    assert!(pilot.app().slides().is_visible("right"));

    // The locked control is gone: clicking its old cell hits the zone body.
    assert_eq!(pilot.frame().hit_test(50, 3), Some(HitTarget::Zone("right".into())));
    pilot.click(50, 3);
    assert!(pilot.app().slides().is_visible("right"));

    pilot.advance(ms(500));
    assert!(pilot.frame().control("right").is_none());

    pilot.click(0, 1);
    assert!(pilot.app().slides().is_visible("left"));
    assert!(pilot.frame().control("right").is_some());
}

#[test]
fn group_keeps_a_member_open_against_close_requests() {
    let mut pilot = Pilot::new(sides_layout(), 60, 6);
    pilot.click(9, 3);
    pilot.advance(ms(500));
    assert!(pilot.app().slides().is_closed("left"));
    assert!(pilot.frame().control("right").is_none());

    pilot.app().commands().push(ZoneCommand::Close("right".into()));
    pilot.app().commands().push(ZoneCommand::Toggle("right".into()));
    pilot.advance(ms(500));
    assert!(pilot.app().slides().is_visible("right"));
    assert_eq!(pilot.app().slides().pending_timers(), 0);
}

#[test]
fn class_change_within_one_variant_keeps_closed_zones() {
    let layout = LayoutConfig::from_json(SCENARIO).unwrap();
    let mut pilot = Pilot::from_app(App::new_headless(layout, AppConfig::new(), 60, 4));
    pilot.press_key(Key::Char('1'));
    pilot.advance(ms(500));
    assert!(pilot.app().slides().is_closed("B"));

    // 150 columns is 1200px: `lg`, which still renders the `xs` variant.
    pilot.resize(150, 4);
    assert_eq!(pilot.frame().class, Some(Breakpoint::Xs));
    assert_eq!(pilot.app().class(), Breakpoint::Lg);
    assert!(pilot.app().slides().is_closed("B"));
}

#[test]
fn reopen_before_deadline_keeps_zone_open() {
    let mut pilot = Pilot::new(sides_layout(), 60, 6);
    pilot.press_key(Key::Char('1'));
    pilot.advance(ms(200));
    pilot.press_key(Key::Char('1'));
    assert!(pilot.app().slides().is_visible("left"));

    pilot.advance(ms(600));
    assert!(pilot.app().slides().is_visible("left"));
    assert_eq!(pilot.app().slides().pending_timers(), 0);
    assert_eq!(pilot.frame().tracks.clone().unwrap().columns, vec!["10", "1fr", "10"]);
    assert_eq!(pilot.frame().zone("left").unwrap().region, Region::new(0, 0, 10, 6));
}

#[test]
fn class_change_resets_mid_animation() {
    // 120 columns is 960px: `md`.
    let mut pilot = Pilot::new(sides_layout(), 120, 6);
    assert_eq!(pilot.frame().class, Some(Breakpoint::Md));
    pilot.press_key(Key::Char('2'));
    pilot.advance(ms(200));
    assert!(pilot.app().slides().is_hidden("right"));

    pilot.resize(50, 6);
    assert_eq!(pilot.frame().class, Some(Breakpoint::Xs));
    assert!(pilot.app().slides().is_visible("right"));
    assert_eq!(pilot.app().slides().pending_timers(), 0);

    pilot.advance(ms(1000));
    assert!(pilot.app().slides().is_visible("right"));
    assert_eq!(pilot.frame().zone("right").unwrap().region, Region::new(40, 0, 10, 6));
}

#[test]
fn escape_reopens_everything() {
    let mut pilot = Pilot::new(sides_layout(), 60, 6);
    pilot.press_key(Key::Char('1'));
    pilot.advance(ms(500));
    assert!(pilot.app().slides().is_closed("left"));
    pilot.press_key(Key::Escape);
    assert!(pilot.app().slides().is_visible("left"));

    pilot.press_key_with(Key::Char('c'), Modifiers::CTRL);
    assert!(!pilot.is_running());
}

// ---------------------------------------------------------------------------
// Custom blocks
// ---------------------------------------------------------------------------

/// Closes its own panel when clicked.
struct CloseButton {
    panel: Option<ClosePanel>,
}

impl Block for CloseButton {
    fn block_type(&self) -> &str {
        "CloseButton"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        vec![Strip::centered(region, region.y, "[x]", CellStyle::new())]
    }

    fn click(&self, _region: Region, _x: i32, _y: i32) -> Option<BlockEvent> {
        self.panel.as_ref()?.close();
        Some(BlockEvent::Handled)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn close_button(ctx: &BlockContext<'_>) -> Box<dyn Block> {
    Box::new(CloseButton {
        panel: ctx.close_panel.clone(),
    })
}

#[test]
fn block_closes_its_own_panel() {
    let layout = sides_layout().zone(
        "left",
        ZoneConfig::new("CloseButton")
            .slideable(SlideDirection::Left)
            .in_group("sides"),
    );
    let registry = ComponentRegistry::with_builtins().with("CloseButton", close_button);
    let mut pilot = Pilot::from_app(
        App::new_headless(layout, AppConfig::new(), 60, 6).with_registry(registry),
    );
    assert!(pilot.row(0).starts_with("   [x]"));

    pilot.click(4, 0);
    assert!(pilot.app().slides().is_hidden("left"));
    pilot.advance(ms(500));
    assert!(pilot.app().slides().is_closed("left"));
}

#[test]
fn collapsible_panel_remembers_its_fold() {
    let layout = LayoutConfig::new("GridLayout")
        .zone(
            "drawer",
            ZoneConfig::new("CollapsiblePanel").with_props(json!({
                "children": [{ "component": "Label", "props": { "text": "knobs" } }]
            })),
        )
        .zone("main", ZoneConfig::new("ColorBlock"))
        .variant(
            Breakpoint::Xs,
            GridVariant::new(&[&["drawer", "main"]], &["10", "1fr"], &["1fr"]),
        );
    let mut pilot = Pilot::new(layout, 40, 7);
    assert!(pilot.row(0).starts_with('◂'));
    assert!(pilot.row(2).starts_with(" knobs"));

    pilot.click(4, 0);
    assert!(pilot.app().is_toggled("drawer"));
    assert!(pilot.row(3).starts_with("    ☰"));

    pilot.click(2, 5);
    assert!(!pilot.app().is_toggled("drawer"));
    assert!(pilot.row(0).starts_with('◂'));
}

#[test]
fn unknown_components_are_skipped() {
    let layout = sides_layout().zone("main", ZoneConfig::new("NoSuchBlock"));
    let pilot = Pilot::new(layout, 60, 6);
    assert!(pilot.frame().zone("main").is_none());
    assert!(pilot.frame().zone("left").is_some());
}

#[test]
fn unknown_layout_renders_placeholder() {
    let mut layout = sides_layout();
    layout.layout = "Carousel".into();
    let pilot = Pilot::new(layout, 40, 3);
    assert!(pilot.frame().is_placeholder());
    let expected = format!("\n{}Unknown layout type: Carousel\n", " ".repeat(5));
    assert_eq!(frame_to_string(pilot.frame()), expected);
}
