//! Easing curves and time-based transitions.
//!
//! Zone geometry never jumps when tracks collapse or expand: the app keeps a
//! [`Transition`] over the per-zone regions and samples it every frame.

use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::geometry::Region;

// ---------------------------------------------------------------------------
// Ease
// ---------------------------------------------------------------------------

/// Timing function mapping linear progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    OutCubic,
    InOutCubic,
    /// `cubic-bezier(0.4, 0, 0.2, 1)`, the Material standard curve.
    #[default]
    Standard,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Standard => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluate a CSS `cubic-bezier(x1, y1, x2, y2)` at input `x`.
///
/// Newton iterations on the x polynomial, bisection when the slope is flat.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let bez = |a: f64, b: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };
    let slope = |a: f64, b: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * a + 6.0 * u * t * (b - a) + 3.0 * t * t * (1.0 - b)
    };

    let mut t = x;
    for _ in 0..8 {
        let err = bez(x1, x2, t) - x;
        if err.abs() < 1e-6 {
            return bez(y1, y2, t);
        }
        let d = slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..32 {
        let v = bez(x1, x2, t);
        if (v - x).abs() < 1e-6 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bez(y1, y2, t)
}

// ---------------------------------------------------------------------------
// Lerp
// ---------------------------------------------------------------------------

/// Values that can be interpolated.
pub trait Lerp: Clone {
    /// `factor = 0` gives `self`, `factor = 1` gives `to`.
    fn lerp(&self, to: &Self, factor: f64) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, factor: f64) -> Self {
        (*self as f64 + (*to as f64 - *self as f64) * factor) as f32
    }
}

impl Lerp for Region {
    fn lerp(&self, to: &Self, factor: f64) -> Self {
        self.blend(*to, factor)
    }
}

/// Zones present only in the target snap to it; zones missing from the
/// target are dropped.
impl Lerp for IndexMap<String, Region> {
    fn lerp(&self, to: &Self, factor: f64) -> Self {
        to.iter()
            .map(|(name, target)| {
                let value = match self.get(name) {
                    Some(from) => from.lerp(target, factor),
                    None => *target,
                };
                (name.clone(), value)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// A value animating from `from` to `to` over `duration` starting at `start`.
#[derive(Clone, Debug)]
pub struct Transition<T> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
    ease: Ease,
}

impl<T: Lerp> Transition<T> {
    /// A transition that is already at rest on `value`.
    pub fn settled(value: T, now: Instant) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start: now,
            duration: Duration::ZERO,
            ease: Ease::Linear,
        }
    }

    pub fn new(from: T, to: T, start: Instant, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
        }
    }

    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Sample the eased value at `now`.
    pub fn value(&self, now: Instant) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.ease.apply(p))
    }

    /// Whether the transition has reached its target.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// The value the transition is heading to.
    pub fn target(&self) -> &T {
        &self.to
    }

    /// Start animating toward `to` from wherever the value is at `now`.
    pub fn retarget(&mut self, to: T, now: Instant, duration: Duration, ease: Ease) {
        self.from = self.value(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
        self.ease = ease;
    }

    /// Jump straight to `value` with no animation.
    pub fn snap(&mut self, value: T, now: Instant) {
        *self = Self::settled(value, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn ease_endpoints() {
        for ease in [Ease::Linear, Ease::OutCubic, Ease::InOutCubic, Ease::Standard] {
            assert!(ease.apply(0.0).abs() < 1e-4, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-4, "{ease:?} at 1");
        }
    }

    #[test]
    fn ease_clamps_input() {
        assert_eq!(Ease::Linear.apply(-1.0), 0.0);
        assert_eq!(Ease::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn standard_curve_is_monotonic_and_front_loaded() {
        let mut last = 0.0;
        for i in 1..=20 {
            let v = Ease::Standard.apply(i as f64 / 20.0);
            assert!(v >= last - 1e-9);
            last = v;
        }
        // Decelerating curve: ahead of linear at the midpoint.
        assert!(Ease::Standard.apply(0.5) > 0.5);
    }

    #[test]
    fn transition_samples_over_time() {
        let t0 = Instant::now();
        let tr = Transition::new(0.0f32, 10.0, t0, ms(100), Ease::Linear);
        assert_eq!(tr.value(t0), 0.0);
        assert!((tr.value(t0 + ms(50)) - 5.0).abs() < 1e-4);
        assert_eq!(tr.value(t0 + ms(200)), 10.0);
        assert!(tr.is_finished(t0 + ms(100)));
        assert!(!tr.is_finished(t0 + ms(99)));
    }

    #[test]
    fn settled_is_finished_immediately() {
        let t0 = Instant::now();
        let tr = Transition::settled(3.0f32, t0);
        assert!(tr.is_finished(t0));
        assert_eq!(*tr.target(), 3.0);
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let t0 = Instant::now();
        let mut tr = Transition::new(0.0f32, 10.0, t0, ms(100), Ease::Linear);
        tr.retarget(0.0, t0 + ms(50), ms(100), Ease::Linear);
        assert!((tr.value(t0 + ms(50)) - 5.0).abs() < 1e-4);
        assert!((tr.value(t0 + ms(100)) - 2.5).abs() < 1e-4);
    }

    #[test]
    fn region_maps_interpolate_per_zone() {
        let mut from = IndexMap::new();
        from.insert("a".to_owned(), Region::new(0, 0, 10, 10));
        let mut to = IndexMap::new();
        to.insert("a".to_owned(), Region::new(0, 0, 20, 10));
        to.insert("b".to_owned(), Region::new(20, 0, 5, 10));

        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid["a"], Region::new(0, 0, 15, 10));
        assert_eq!(mid["b"], Region::new(20, 0, 5, 10));
    }
}
