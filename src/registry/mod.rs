//! Building-block registry: symbolic component names to factories.
//!
//! Layout documents refer to blocks by name (`"component": "ColorBlock"`).
//! [`ComponentRegistry`] resolves those names; an unknown name is logged and
//! the zone is skipped, never an error.

pub mod block;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

pub use block::{Block, BlockContext, BlockEvent};

use crate::blocks::{BasicPanel, CollapsiblePanel, ColorBlock, HomeButton, Label};

/// Builds a block from its context.
pub type BlockFactory = fn(&BlockContext<'_>) -> Box<dyn Block>;

// ---------------------------------------------------------------------------
// BuiltinBlock
// ---------------------------------------------------------------------------

/// The blocks shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinBlock {
    ColorBlock,
    BasicPanel,
    CollapsiblePanel,
    Label,
    HomeButton,
}

impl BuiltinBlock {
    pub const ALL: [BuiltinBlock; 5] = [
        BuiltinBlock::ColorBlock,
        BuiltinBlock::BasicPanel,
        BuiltinBlock::CollapsiblePanel,
        BuiltinBlock::Label,
        BuiltinBlock::HomeButton,
    ];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinBlock::ColorBlock => "ColorBlock",
            BuiltinBlock::BasicPanel => "BasicPanel",
            BuiltinBlock::CollapsiblePanel => "CollapsiblePanel",
            BuiltinBlock::Label => "Label",
            BuiltinBlock::HomeButton => "HomeButton",
        }
    }

    pub fn factory(self) -> BlockFactory {
        match self {
            BuiltinBlock::ColorBlock => |ctx| Box::new(ColorBlock::from_context(ctx)),
            BuiltinBlock::BasicPanel => |ctx| Box::new(BasicPanel::from_context(ctx)),
            BuiltinBlock::CollapsiblePanel => |ctx| Box::new(CollapsiblePanel::from_context(ctx)),
            BuiltinBlock::Label => |ctx| Box::new(Label::from_context(ctx)),
            BuiltinBlock::HomeButton => |ctx| Box::new(HomeButton::from_context(ctx)),
        }
    }
}

impl fmt::Display for BuiltinBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a name that is not a built-in block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown built-in block `{0}`")]
pub struct UnknownBlock(pub String);

impl FromStr for BuiltinBlock {
    type Err = UnknownBlock;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinBlock::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| UnknownBlock(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// ComponentRegistry
// ---------------------------------------------------------------------------

/// Name → factory map consulted when a zone is rendered.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    factories: IndexMap<String, BlockFactory>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every [`BuiltinBlock`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in BuiltinBlock::ALL {
            registry.register(builtin.name(), builtin.factory());
        }
        registry
    }

    /// Register `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: BlockFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Register `factory` under `name` (builder).
    pub fn with(mut self, name: impl Into<String>, factory: BlockFactory) -> Self {
        self.register(name, factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<BlockFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build the block `name`, or log a warning and return `None`.
    pub fn build(&self, name: &str, ctx: &BlockContext<'_>) -> Option<Box<dyn Block>> {
        match self.get(name) {
            Some(factory) => Some(factory(ctx)),
            None => {
                tracing::warn!(component = name, zone = ctx.zone, "component not found");
                None
            }
        }
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Props;
    use crate::geometry::Region;
    use crate::i18n::Identity;
    use crate::render::strip::Strip;
    use std::any::Any;

    struct Blank;

    impl Block for Blank {
        fn block_type(&self) -> &str {
            "Blank"
        }
        fn render(&self, _region: Region) -> Vec<Strip> {
            Vec::new()
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn ctx<'a>(registry: &'a ComponentRegistry, props: &'a Props) -> BlockContext<'a> {
        BlockContext {
            zone: "z",
            props,
            registry,
            translator: &Identity,
            close_panel: None,
            toggled: false,
        }
    }

    #[test]
    fn builtin_names_roundtrip() {
        for b in BuiltinBlock::ALL {
            assert_eq!(b.name().parse::<BuiltinBlock>(), Ok(b));
            assert_eq!(b.to_string(), b.name());
        }
        assert_eq!(
            "Graph".parse::<BuiltinBlock>(),
            Err(UnknownBlock("Graph".into()))
        );
    }

    #[test]
    fn with_builtins_registers_all() {
        let reg = ComponentRegistry::with_builtins();
        assert_eq!(reg.len(), BuiltinBlock::ALL.len());
        assert_eq!(
            reg.names().collect::<Vec<_>>(),
            vec!["ColorBlock", "BasicPanel", "CollapsiblePanel", "Label", "HomeButton"]
        );
    }

    #[test]
    fn build_resolves_registered_names() {
        let reg = ComponentRegistry::with_builtins().with("Blank", |_| Box::new(Blank));
        let props = Props::new();
        let block = reg.build("Blank", &ctx(&reg, &props)).unwrap();
        assert_eq!(block.block_type(), "Blank");
        assert_eq!(
            reg.build("ColorBlock", &ctx(&reg, &props)).unwrap().block_type(),
            "ColorBlock"
        );
    }

    #[test]
    fn unknown_name_builds_nothing() {
        let reg = ComponentRegistry::new();
        let props = Props::new();
        assert!(reg.is_empty());
        assert!(reg.build("Missing", &ctx(&reg, &props)).is_none());
    }

    #[test]
    fn register_replaces() {
        let mut reg = ComponentRegistry::with_builtins();
        reg.register("ColorBlock", |_| Box::new(Blank));
        let props = Props::new();
        let block = reg.build("ColorBlock", &ctx(&reg, &props)).unwrap();
        assert_eq!(block.block_type(), "Blank");
        assert_eq!(reg.len(), BuiltinBlock::ALL.len());
    }
}
