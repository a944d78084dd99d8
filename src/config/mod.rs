//! Layout descriptions: the JSON data model and its structural validation.

pub mod model;
pub mod validate;

pub use model::{
    is_empty_token, Axis, ConfigError, GridArea, GridConfig, GridVariant, LayoutConfig, Props,
    SlideDirection, ZoneConfig,
};
pub use validate::ConfigIssue;
