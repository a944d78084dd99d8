//! Open/closing/closed state for slideable zones.
//!
//! [`SlideController`] owns one [`SlideState`] per slideable zone and an arena
//! of pending close timers. Every operation takes the current [`Instant`]
//! explicitly, so tests drive time directly.
//!
//! A close is deferred: the zone first enters `Closing` for the transition
//! length (the exit animation), then a timer moves it to `Closed`. Reopening
//! during that window removes the timer from the arena, so its key is stale
//! and can never fire.

use std::time::{Duration, Instant};

use indexmap::{IndexMap, IndexSet};
use slotmap::{new_key_type, SlotMap};

use crate::config::ZoneConfig;

/// Length of the slide transition and of the deferred close.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

new_key_type! {
    /// Handle to a pending close timer.
    pub struct TimerId;
}

// ---------------------------------------------------------------------------
// SlideState
// ---------------------------------------------------------------------------

/// State of a single slideable zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    /// Shown in place.
    Open,
    /// Animating out; becomes `Closed` at `deadline` unless reopened.
    Closing { deadline: Instant, timer: TimerId },
    /// Fully collapsed; only the ghost strip remains.
    Closed,
}

impl SlideState {
    /// Open and not closing.
    pub fn is_open(&self) -> bool {
        matches!(self, SlideState::Open)
    }

    /// Closing or closed.
    pub fn is_hidden(&self) -> bool {
        !self.is_open()
    }
}

#[derive(Debug, Clone)]
struct Timer {
    zone: String,
    deadline: Instant,
}

// ---------------------------------------------------------------------------
// SlideController
// ---------------------------------------------------------------------------

/// Per-zone slide state plus the pending-timer arena.
#[derive(Debug, Clone)]
pub struct SlideController {
    states: IndexMap<String, SlideState>,
    timers: SlotMap<TimerId, Timer>,
    transition: Duration,
}

impl SlideController {
    /// Create an empty controller with the given transition length.
    pub fn new(transition: Duration) -> Self {
        Self {
            states: IndexMap::new(),
            timers: SlotMap::with_key(),
            transition,
        }
    }

    /// The configured transition length.
    pub fn transition(&self) -> Duration {
        self.transition
    }

    /// Initialise state for a freshly mounted layout.
    pub fn mount(&mut self, zones: &IndexMap<String, ZoneConfig>) {
        self.reset(zones);
        tracing::debug!(zones = self.states.len(), "slide zones mounted");
    }

    /// Put every slideable zone back to its `defaultOpen` state and cancel
    /// every pending timer.
    pub fn reset(&mut self, zones: &IndexMap<String, ZoneConfig>) {
        let cancelled = self.timers.len();
        self.timers.clear();
        self.states = zones
            .iter()
            .filter(|(_, z)| z.slideable)
            .map(|(name, z)| {
                let state = if z.default_open {
                    SlideState::Open
                } else {
                    SlideState::Closed
                };
                (name.clone(), state)
            })
            .collect();
        if cancelled > 0 {
            tracing::debug!(cancelled, "slide state reset, pending closes cancelled");
        }
    }

    /// State of `zone`, or `None` if it is not slideable.
    pub fn state(&self, zone: &str) -> Option<SlideState> {
        self.states.get(zone).copied()
    }

    /// Whether `zone` is currently shown. Non-slideable zones always are.
    pub fn is_visible(&self, zone: &str) -> bool {
        self.states.get(zone).map_or(true, SlideState::is_open)
    }

    /// Whether `zone` is closing or closed.
    pub fn is_hidden(&self, zone: &str) -> bool {
        !self.is_visible(zone)
    }

    /// Whether `zone` has finished closing.
    pub fn is_closed(&self, zone: &str) -> bool {
        matches!(self.states.get(zone), Some(SlideState::Closed))
    }

    /// Start closing `zone`. Returns `false` if it was not open.
    pub fn close(&mut self, zone: &str, now: Instant) -> bool {
        let Some(state) = self.states.get_mut(zone) else {
            tracing::debug!(zone, "close ignored, zone is not slideable");
            return false;
        };
        if !state.is_open() {
            return false;
        }
        let deadline = now + self.transition;
        let timer = self.timers.insert(Timer {
            zone: zone.to_owned(),
            deadline,
        });
        *state = SlideState::Closing { deadline, timer };
        tracing::debug!(zone, "zone closing");
        true
    }

    /// Open `zone`, cancelling a pending close. Returns `false` if it was
    /// already open or is not slideable.
    pub fn open(&mut self, zone: &str) -> bool {
        let Some(state) = self.states.get_mut(zone) else {
            return false;
        };
        match *state {
            SlideState::Open => false,
            SlideState::Closing { timer, .. } => {
                self.timers.remove(timer);
                *state = SlideState::Open;
                tracing::debug!(zone, "zone reopened before close completed");
                true
            }
            SlideState::Closed => {
                *state = SlideState::Open;
                tracing::debug!(zone, "zone opened");
                true
            }
        }
    }

    /// Close an open zone, open a hidden one.
    pub fn toggle(&mut self, zone: &str, now: Instant) -> bool {
        if self.is_visible(zone) {
            self.close(zone, now)
        } else {
            self.open(zone)
        }
    }

    /// Open every hidden zone. Returns how many changed.
    pub fn open_all(&mut self) -> usize {
        let hidden: Vec<String> = self
            .states
            .iter()
            .filter(|(_, s)| s.is_hidden())
            .map(|(n, _)| n.clone())
            .collect();
        hidden.iter().filter(|z| self.open(z)).count()
    }

    /// Fire every timer due at `now`. Returns the zones that became `Closed`,
    /// earliest deadline first.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let mut due: Vec<(TimerId, Instant)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (id, t.deadline))
            .collect();
        due.sort_by_key(|&(_, deadline)| deadline);

        let mut closed = Vec::new();
        for (id, _) in due {
            let Some(timer) = self.timers.remove(id) else {
                continue;
            };
            if let Some(state) = self.states.get_mut(&timer.zone) {
                if matches!(*state, SlideState::Closing { timer: pending, .. } if pending == id) {
                    *state = SlideState::Closed;
                    tracing::debug!(zone = %timer.zone, "zone closed");
                    closed.push(timer.zone);
                }
            }
        }
        closed
    }

    /// Earliest pending close deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Number of pending close timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Fraction of the exit animation completed for `zone` at `now`:
    /// 0 while open, 1 once closed.
    pub fn hidden_fraction(&self, zone: &str, now: Instant) -> f32 {
        match self.states.get(zone) {
            None | Some(SlideState::Open) => 0.0,
            Some(SlideState::Closed) => 1.0,
            Some(SlideState::Closing { deadline, .. }) => {
                if self.transition.is_zero() {
                    return 1.0;
                }
                let left = deadline.saturating_duration_since(now).as_secs_f32();
                (1.0 - left / self.transition.as_secs_f32()).clamp(0.0, 1.0)
            }
        }
    }

    /// Zones whose close control must be withheld.
    ///
    /// For every `slideGroup` among the zones in `active` (the tokens of the
    /// rendered variant), if any member is closing or closed, every open
    /// member is locked so the group keeps at least one visible panel.
    pub fn locked_zones(
        &self,
        zones: &IndexMap<String, ZoneConfig>,
        active: &IndexSet<&str>,
    ) -> IndexSet<String> {
        let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (name, zone) in zones {
            if !zone.slideable || !active.contains(name.as_str()) {
                continue;
            }
            if let Some(group) = zone.slide_group.as_deref() {
                groups.entry(group).or_default().push(name);
            }
        }

        let mut locked = IndexSet::new();
        for members in groups.values() {
            if members.iter().any(|m| self.is_hidden(m)) {
                locked.extend(
                    members
                        .iter()
                        .filter(|m| self.is_visible(m))
                        .map(|m| (*m).to_owned()),
                );
            }
        }
        locked
    }

    /// Iterate over `(zone, state)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SlideState)> {
        self.states.iter().map(|(n, s)| (n.as_str(), *s))
    }
}

impl Default for SlideController {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlideDirection;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn zones() -> IndexMap<String, ZoneConfig> {
        let mut z = IndexMap::new();
        z.insert("main".to_owned(), ZoneConfig::new("ColorBlock"));
        z.insert(
            "left".to_owned(),
            ZoneConfig::new("BasicPanel")
                .slideable(SlideDirection::Left)
                .in_group("side"),
        );
        z.insert(
            "right".to_owned(),
            ZoneConfig::new("BasicPanel")
                .slideable(SlideDirection::Right)
                .in_group("side"),
        );
        z.insert(
            "dock".to_owned(),
            ZoneConfig::new("BasicPanel")
                .slideable(SlideDirection::Bottom)
                .default_open(false),
        );
        z
    }

    fn mounted() -> SlideController {
        let mut c = SlideController::default();
        c.mount(&zones());
        c
    }

    fn all_active() -> IndexSet<&'static str> {
        ["main", "left", "right", "dock"].into_iter().collect()
    }

    // -----------------------------------------------------------------------
    // Mount / reset
    // -----------------------------------------------------------------------

    #[test]
    fn mount_uses_default_open() {
        let c = mounted();
        assert_eq!(c.state("left"), Some(SlideState::Open));
        assert_eq!(c.state("dock"), Some(SlideState::Closed));
        assert_eq!(c.state("main"), None);
        assert!(c.is_visible("main"));
        assert!(!c.is_visible("dock"));
    }

    #[test]
    fn reset_cancels_pending_timers() {
        let t0 = Instant::now();
        let mut c = mounted();
        assert!(c.close("left", t0));
        assert_eq!(c.pending_timers(), 1);

        // Variant change mid-animation.
        c.reset(&zones());
        assert_eq!(c.pending_timers(), 0);
        assert_eq!(c.state("left"), Some(SlideState::Open));

        // The old deadline passes without effect.
        assert!(c.tick(t0 + ms(600)).is_empty());
        assert_eq!(c.state("left"), Some(SlideState::Open));
    }

    // -----------------------------------------------------------------------
    // Close / open / tick
    // -----------------------------------------------------------------------

    #[test]
    fn close_then_fire() {
        let t0 = Instant::now();
        let mut c = mounted();
        assert!(c.close("left", t0));
        assert!(matches!(c.state("left"), Some(SlideState::Closing { .. })));
        assert!(c.is_hidden("left"));
        assert_eq!(c.next_deadline(), Some(t0 + DEFAULT_TRANSITION));

        assert!(c.tick(t0 + ms(499)).is_empty());
        assert_eq!(c.tick(t0 + ms(500)), vec!["left".to_owned()]);
        assert_eq!(c.state("left"), Some(SlideState::Closed));
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn reopen_before_fire_stays_open() {
        let t0 = Instant::now();
        let mut c = mounted();
        c.close("left", t0);
        assert!(c.open("left"));
        assert_eq!(c.pending_timers(), 0);
        assert!(c.tick(t0 + ms(1000)).is_empty());
        assert_eq!(c.state("left"), Some(SlideState::Open));
    }

    #[test]
    fn close_is_ignored_unless_open() {
        let t0 = Instant::now();
        let mut c = mounted();
        assert!(!c.close("dock", t0));
        assert!(!c.close("main", t0));
        c.close("left", t0);
        assert!(!c.close("left", t0 + ms(100)));
        assert_eq!(c.pending_timers(), 1);
    }

    #[test]
    fn open_closed_zone_is_immediate() {
        let mut c = mounted();
        assert!(c.open("dock"));
        assert_eq!(c.state("dock"), Some(SlideState::Open));
        assert!(!c.open("dock"));
    }

    #[test]
    fn toggle_flips() {
        let t0 = Instant::now();
        let mut c = mounted();
        assert!(c.toggle("dock", t0));
        assert!(c.is_visible("dock"));
        assert!(c.toggle("dock", t0));
        assert!(c.is_hidden("dock"));
    }

    #[test]
    fn stale_timer_does_not_close_reclosed_zone_early() {
        let t0 = Instant::now();
        let mut c = mounted();
        c.close("left", t0);
        c.open("left");
        c.close("left", t0 + ms(300));
        // First deadline would have been t0+500; only the new one counts.
        assert!(c.tick(t0 + ms(600)).is_empty());
        assert_eq!(c.tick(t0 + ms(800)), vec!["left".to_owned()]);
    }

    #[test]
    fn tick_reports_in_deadline_order() {
        let t0 = Instant::now();
        let mut c = mounted();
        c.close("right", t0);
        c.close("left", t0 + ms(10));
        assert_eq!(
            c.tick(t0 + ms(1000)),
            vec!["right".to_owned(), "left".to_owned()]
        );
    }

    #[test]
    fn open_all_reopens_hidden() {
        let t0 = Instant::now();
        let mut c = mounted();
        c.close("left", t0);
        assert_eq!(c.open_all(), 2);
        assert!(c.iter().all(|(_, s)| s.is_open()));
    }

    #[test]
    fn hidden_fraction_tracks_progress() {
        let t0 = Instant::now();
        let mut c = mounted();
        assert_eq!(c.hidden_fraction("left", t0), 0.0);
        c.close("left", t0);
        let half = c.hidden_fraction("left", t0 + ms(250));
        assert!((half - 0.5).abs() < 0.01);
        assert_eq!(c.hidden_fraction("dock", t0), 1.0);
        assert_eq!(c.hidden_fraction("main", t0), 0.0);
    }

    // -----------------------------------------------------------------------
    // Group locking
    // -----------------------------------------------------------------------

    #[test]
    fn nothing_locked_while_group_fully_open() {
        let c = mounted();
        assert!(c.locked_zones(&zones(), &all_active()).is_empty());
    }

    #[test]
    fn closing_member_locks_the_rest() {
        let t0 = Instant::now();
        let mut c = mounted();
        c.close("left", t0);
        let locked = c.locked_zones(&zones(), &all_active());
        assert_eq!(locked.into_iter().collect::<Vec<_>>(), vec!["right".to_owned()]);

        // Still locked once fully closed.
        c.tick(t0 + ms(500));
        assert!(c.locked_zones(&zones(), &all_active()).contains("right"));
    }

    #[test]
    fn reopening_unlocks() {
        let t0 = Instant::now();
        let mut c = mounted();
        c.close("left", t0);
        c.open("left");
        assert!(c.locked_zones(&zones(), &all_active()).is_empty());
    }

    #[test]
    fn inactive_members_do_not_lock() {
        let t0 = Instant::now();
        let mut c = mounted();
        c.close("left", t0);
        let active: IndexSet<&str> = ["main", "right"].into_iter().collect();
        assert!(c.locked_zones(&zones(), &active).is_empty());
    }
}
