//! Rendering pipeline: strips, frame compositor, terminal driver.

pub mod compositor;
pub mod driver;
pub mod strip;

pub use compositor::{CellUpdate, Compositor};
pub use driver::{parse_color, Driver};
pub use strip::{CellStyle, Strip, StyledCell};
