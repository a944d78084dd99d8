//! Viewport classes, breakpoint thresholds, and grid-variant resolution.
//!
//! The active [`Breakpoint`] is derived from the measured viewport width with
//! "at least as wide as" queries, widest first. [`resolve_variant`] then picks
//! the single [`GridVariant`] to render for that class. [`BreakpointBus`]
//! lets interested parties follow class changes.

use std::fmt;

use crate::config::{GridConfig, GridVariant};

// ---------------------------------------------------------------------------
// Breakpoint
// ---------------------------------------------------------------------------

/// A viewport class, ordered narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// Every class, narrowest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    /// The widest class whose minimum width `width` satisfies.
    pub fn from_width(width: u32, thresholds: &Breakpoints) -> Breakpoint {
        [
            (Breakpoint::Xl, thresholds.xl),
            (Breakpoint::Lg, thresholds.lg),
            (Breakpoint::Md, thresholds.md),
            (Breakpoint::Sm, thresholds.sm),
        ]
        .into_iter()
        .find(|&(_, min)| width >= min)
        .map_or(Breakpoint::Xs, |(bp, _)| bp)
    }

    /// Short lowercase name as used in layout documents.
    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum widths (in px) at which each class starts. `xs` starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            sm: 600,
            md: 900,
            lg: 1200,
            xl: 1536,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Pick the grid variant for `class`.
///
/// Classes `xl`, `lg`, `md`, `sm` are tried in that order, skipping those wider
/// than `class`; the first one defined wins. Otherwise `xs` is used, and if
/// that is undefined too, the narrowest defined variant. Returns `None` only
/// when the config holds no variant at all.
pub fn resolve_variant(grid: &GridConfig, class: Breakpoint) -> Option<(Breakpoint, &GridVariant)> {
    Breakpoint::ALL
        .into_iter()
        .rev()
        .filter(|&bp| bp != Breakpoint::Xs && bp <= class)
        .find_map(|bp| grid.get(bp).map(|v| (bp, v)))
        .or_else(|| grid.get(Breakpoint::Xs).map(|v| (Breakpoint::Xs, v)))
        .or_else(|| grid.variants().next())
}

// ---------------------------------------------------------------------------
// BreakpointBus
// ---------------------------------------------------------------------------

/// Handle returned by [`BreakpointBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(Breakpoint)>;

/// Publishes the active viewport class to subscribed listeners.
///
/// Publishing the class that is already current is a no-op, so listeners only
/// see real transitions.
pub struct BreakpointBus {
    current: Breakpoint,
    listeners: Vec<(Subscription, Listener)>,
    next_id: u64,
}

impl BreakpointBus {
    /// Create a bus starting at `initial`.
    pub fn new(initial: Breakpoint) -> Self {
        Self {
            current: initial,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// The most recently published class.
    pub fn current(&self) -> Breakpoint {
        self.current
    }

    /// Register a listener. With `emit_current` it is called once immediately.
    pub fn subscribe(
        &mut self,
        mut listener: impl FnMut(Breakpoint) + 'static,
        emit_current: bool,
    ) -> Subscription {
        if emit_current {
            listener(self.current);
        }
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `true` if it was registered.
    pub fn unsubscribe(&mut self, id: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Publish a new class. Returns `true` if it differed from the current one.
    pub fn publish(&mut self, next: Breakpoint) -> bool {
        if next == self.current {
            return false;
        }
        tracing::debug!(from = %self.current, to = %next, "viewport class changed");
        self.current = next;
        for (_, listener) in &mut self.listeners {
            listener(next);
        }
        true
    }

    /// Publish the class matching a measured width.
    pub fn publish_width(&mut self, width: u32, thresholds: &Breakpoints) -> bool {
        self.publish(Breakpoint::from_width(width, thresholds))
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for BreakpointBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointBus")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
