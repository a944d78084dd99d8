//! Block trait: the renderable unit a zone shows.
//!
//! A block is built once per render from its zone's property bag by a
//! [`BlockFactory`](super::BlockFactory). It draws itself into strips inside
//! the region the grid assigns and may react to clicks.

use std::any::Any;
use std::fmt;

use crate::config::Props;
use crate::geometry::Region;
use crate::i18n::Translator;
use crate::render::strip::Strip;
use crate::slide::ClosePanel;

use super::ComponentRegistry;

// ---------------------------------------------------------------------------
// Block trait
// ---------------------------------------------------------------------------

/// Outcome of a click delivered to a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    /// The block consumed the click.
    Handled,
    /// The block asks the host to navigate to a route.
    Navigate(String),
    /// The block asks the host to flip its remembered toggle.
    Toggle,
}

/// Core trait implemented by every building block.
///
/// Object-safe: the layout keeps blocks as `Box<dyn Block>`.
pub trait Block {
    /// The registry name of this block type (e.g. "ColorBlock").
    fn block_type(&self) -> &str;

    /// Render into strips at absolute coordinates inside `region`.
    fn render(&self, region: Region) -> Vec<Strip>;

    /// Handle a click at absolute (x, y) inside `region`.
    fn click(&self, region: Region, x: i32, y: i32) -> Option<BlockEvent> {
        let _ = (region, x, y);
        None
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.block_type())
    }
}

// ---------------------------------------------------------------------------
// BlockContext
// ---------------------------------------------------------------------------

/// Everything a factory may use to build a block.
pub struct BlockContext<'a> {
    /// Name of the zone the block is placed in.
    pub zone: &'a str,
    /// The zone's property bag, passed through unmodified.
    pub props: &'a Props,
    /// The registry, for blocks that build nested children.
    pub registry: &'a ComponentRegistry,
    pub translator: &'a dyn Translator,
    /// Present for blocks mounted in a slideable zone.
    pub close_panel: Option<ClosePanel>,
    /// Whether the user has flipped this zone's block an odd number of
    /// times. Blocks are rebuilt every render, so this is their only memory.
    pub toggled: bool,
}

impl<'a> BlockContext<'a> {
    /// A context for a nested child: same registry and translator, new props,
    /// no close handle.
    pub fn child<'b>(&'b self, props: &'b Props) -> BlockContext<'b> {
        BlockContext {
            zone: self.zone,
            props,
            registry: self.registry,
            translator: self.translator,
            close_panel: None,
            toggled: false,
        }
    }

    /// String property `key`, if present.
    pub fn prop_str(&self, key: &str) -> Option<&'a str> {
        self.props.get(key).and_then(|v| v.as_str())
    }

    /// Translate `key`, falling back to the key itself.
    pub fn t(&self, key: &str) -> String {
        self.translator.t(key, Some(key))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
