//! # gilt-zones
//!
//! A breakpoint-aware, data-driven zone layout engine for terminal UIs.
//!
//! A layout is a JSON document: named zones bound to building blocks, and a
//! grid variant (areas + track sizes) per viewport class. The engine picks
//! the variant for the current terminal width, lays the zones out with
//! [taffy](https://crates.io/crates/taffy) CSS grid, and lets *slideable*
//! zones close toward an edge (collapsing their tracks when it is safe) and
//! reopen from a ghost strip.
//!
//! ## Core Systems
//!
//! - **[`config`]**: Layout document model, loading and validation
//! - **[`viewport`]**: Viewport classes, variant resolution, class change bus
//! - **[`track`]**: Track size expressions and the collapse rule
//! - **[`slide`]**: Per-zone open/closing/closed state, close timers, group locks
//! - **[`layout`]**: Grid engine, layout dispatch and rendered frames
//! - **[`registry`]** / **[`blocks`]**: Building block trait, registry and built-ins
//! - **[`render`]**: Strips, compositor and crossterm driver
//! - **[`event`]**: Input events and key bindings
//! - **[`app`]** / **[`runtime`]**: Mounted layout and its async event loop
//! - **[`anim`]**, **[`i18n`]**, **[`geometry`]**: Easing, translations, primitives
//! - **[`testing`]**: Headless pilot and snapshot helpers

// Foundation
pub mod anim;
pub mod geometry;
pub mod i18n;

// Layout model
pub mod config;
pub mod slide;
pub mod track;
pub mod viewport;

// Building blocks
pub mod blocks;
pub mod registry;

// Layout and rendering
pub mod layout;
pub mod render;

// Events and application
pub mod app;
pub mod event;
pub mod runtime;

// Testing
pub mod testing;

pub use app::{App, AppConfig, AppError};
pub use config::LayoutConfig;
pub use registry::ComponentRegistry;
