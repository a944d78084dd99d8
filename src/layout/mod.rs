//! Layout: grid computation, layout dispatch, and rendered frames.

pub mod engine;
pub mod frame;
pub mod grid;
pub mod renderer;
pub mod slide;

pub use engine::{GridEngine, LayoutError};
pub use frame::{
    CloseControl, Frame, GhostStrip, HitTarget, PlacedZone, SlideLayer, SLIDE_OUT, Z_CONTROL,
    Z_GHOST, Z_HIDDEN, Z_STATIC, Z_VISIBLE,
};
pub use renderer::{
    Arrangement, LayoutKind, LayoutRenderer, RenderContext, RenderError, UnknownLayout,
};
