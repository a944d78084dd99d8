//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` owns an [`App`] without a terminal driver and a virtual clock.
//! Input methods feed events at the current virtual time and then run one
//! update/render cycle, so the rendered screen always reflects the input.
//! [`Pilot::advance`] moves the clock forward, firing close timers on the way.

use std::time::{Duration, Instant};

use crate::app::{App, AppConfig};
use crate::config::LayoutConfig;
use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers, MouseEvent};
use crate::layout::Frame;

use super::snapshot::compositor_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use gilt_zones::testing::Pilot;
///
/// let mut pilot = Pilot::new(layout, 80, 24);
/// pilot.press_key(Key::Char('1'));
/// pilot.advance(Duration::from_millis(500));
/// assert!(pilot.app().slides().is_closed("controls"));
/// ```
pub struct Pilot {
    app: App,
    now: Instant,
}

impl Pilot {
    /// Mount `layout` headless at the given size and render the first frame.
    pub fn new(layout: LayoutConfig, width: u16, height: u16) -> Self {
        Self::from_app(App::new_headless(layout, AppConfig::new(), width, height))
    }

    /// Mount with an explicit [`AppConfig`].
    pub fn with_config(layout: LayoutConfig, config: AppConfig, width: u16, height: u16) -> Self {
        Self::from_app(App::new_headless(layout, config, width, height))
    }

    /// Wrap an existing headless app (e.g. one with a custom registry).
    pub fn from_app(app: App) -> Self {
        let mut pilot = Self {
            app,
            now: Instant::now(),
        };
        pilot.cycle();
        pilot
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn press_key(&mut self, key: Key) {
        self.press_key_with(key, Modifiers::NONE);
    }

    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.send(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Left click at (x, y).
    pub fn click(&mut self, x: u16, y: u16) {
        self.send(InputEvent::Mouse(MouseEvent::click(x, y)));
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.send(InputEvent::Resize { width, height });
    }

    /// Deliver any input event, then cycle.
    pub fn send(&mut self, event: InputEvent) {
        self.app.handle_input(event, self.now);
        self.cycle();
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Move the virtual clock forward by `by`, then cycle.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.cycle();
    }

    /// Apply queued commands, fire due timers and render at the current time.
    pub fn cycle(&mut self) -> Vec<String> {
        let closed = self.app.update(self.now);
        self.app.render(self.now);
        closed
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn frame(&self) -> &Frame {
        self.app.frame()
    }

    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }

    /// The whole screen as plain text.
    pub fn screen_text(&self) -> String {
        compositor_to_string(self.app.compositor())
    }

    /// Row `y` of the screen, untrimmed.
    pub fn row(&self, y: u16) -> String {
        self.app.compositor().row_text(y).unwrap_or_default()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
