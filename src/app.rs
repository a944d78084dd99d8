//! App struct: one mounted layout, its slide state, and the screen.
//!
//! [`App`] ties together the layout renderer, the slide controller, key
//! bindings, the compositor and (outside of tests) the terminal driver. Time
//! is always passed in explicitly so the headless constructor can be driven
//! by a virtual clock.

use std::io;
use std::time::{Duration, Instant};

use indexmap::{IndexMap, IndexSet};

use crate::anim::{Ease, Transition};
use crate::config::{ConfigError, LayoutConfig};
use crate::event::binding::{BindingAction, KeyBindingRegistry};
use crate::event::input::{InputEvent, KeyEvent};
use crate::geometry::{Region, Size};
use crate::i18n::{Identity, Translator};
use crate::layout::{Frame, HitTarget, LayoutRenderer, RenderContext};
use crate::registry::{BlockEvent, ComponentRegistry};
use crate::render::compositor::Compositor;
use crate::render::driver::Driver;
use crate::slide::{SlideController, ZoneCommand, ZoneCommands, DEFAULT_TRANSITION};
use crate::track::CellMetrics;
use crate::viewport::{Breakpoint, BreakpointBus, Breakpoints};

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Terminal window title.
    pub title: Option<String>,
    /// Frame rate while something is animating.
    pub fps: u32,
    /// Duration of the slide-out and of track transitions.
    pub transition: Duration,
    pub ease: Ease,
    pub breakpoints: Breakpoints,
    pub metrics: CellMetrics,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            fps: 60,
            transition: DEFAULT_TRANSITION,
            ease: Ease::default(),
            breakpoints: Breakpoints::default(),
            metrics: CellMetrics::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Time between animation frames. `fps = 0` is treated as 1.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

// ---------------------------------------------------------------------------
// Region motion
// ---------------------------------------------------------------------------

/// Zone rectangles animating toward the latest arrangement of one class.
struct Motion {
    class: Breakpoint,
    regions: Transition<IndexMap<String, Region>>,
}

/// Retarget (or restart) the motion and sample it at `now`.
fn animate(
    motion: &mut Option<Motion>,
    class: Breakpoint,
    target: IndexMap<String, Region>,
    now: Instant,
    config: &AppConfig,
) -> IndexMap<String, Region> {
    match motion {
        Some(m) if m.class == class => {
            if m.regions.target() != &target {
                m.regions.retarget(target, now, config.transition, config.ease);
            }
            m.regions.value(now)
        }
        _ => {
            *motion = Some(Motion {
                class,
                regions: Transition::settled(target.clone(), now),
            });
            target
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// A mounted layout.
///
/// The driver is optional to support headless testing.
pub struct App {
    pub config: AppConfig,
    layout: LayoutConfig,
    registry: ComponentRegistry,
    translator: Box<dyn Translator>,
    pub bindings: KeyBindingRegistry,
    slides: SlideController,
    commands: ZoneCommands,
    renderer: LayoutRenderer,
    bus: BreakpointBus,
    motion: Option<Motion>,
    size: Size,
    frame: Frame,
    compositor: Compositor,
    /// What the terminal currently shows.
    previous: Compositor,
    driver: Option<Driver>,
    navigations: Vec<String>,
    /// Zones whose block asked to be flipped an odd number of times.
    toggled: IndexSet<String>,
    running: bool,
}

impl App {
    /// Mount `layout` on the real terminal, sized to it.
    ///
    /// The terminal is left untouched until [`App::enter_terminal`].
    pub fn new(layout: LayoutConfig, config: AppConfig) -> Result<Self, AppError> {
        let (width, height) = Driver::terminal_size()?;
        let mut app = Self::new_headless(layout, config, width, height);
        app.driver = Some(Driver::new());
        Ok(app)
    }

    /// Mount `layout` without a terminal driver.
    pub fn new_headless(layout: LayoutConfig, config: AppConfig, width: u16, height: u16) -> Self {
        layout.validate_and_log();

        let class = Breakpoint::from_width(
            config.metrics.viewport_width_px(width),
            &config.breakpoints,
        );
        let mut slides = SlideController::new(config.transition);
        slides.mount(&layout.zones);
        tracing::debug!(layout = %layout.layout, %class, width, height, "layout mounted");

        Self {
            renderer: LayoutRenderer::new(config.metrics),
            config,
            layout,
            registry: ComponentRegistry::with_builtins(),
            translator: Box::new(Identity),
            bindings: KeyBindingRegistry::with_defaults(),
            slides,
            commands: ZoneCommands::new(),
            bus: BreakpointBus::new(class),
            motion: None,
            size: Size::new(width as i32, height as i32),
            frame: Frame::default(),
            compositor: Compositor::new(width, height),
            previous: Compositor::new(0, 0),
            driver: None,
            navigations: Vec::new(),
            toggled: IndexSet::new(),
            running: true,
        }
    }

    /// Replace the block registry (builder).
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the translator used for zone labels (builder).
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn slides(&self) -> &SlideController {
        &self.slides
    }

    /// Queue shared with blocks; commands pushed here apply on the next update.
    pub fn commands(&self) -> &ZoneCommands {
        &self.commands
    }

    pub fn class(&self) -> Breakpoint {
        self.bus.current()
    }

    /// Subscribe to viewport class changes.
    pub fn breakpoints_mut(&mut self) -> &mut BreakpointBus {
        &mut self.bus
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Routes requested by clicked blocks, oldest first.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Whether the block in `zone` is flipped from its initial state.
    pub fn is_toggled(&self, zone: &str) -> bool {
        self.toggled.contains(zone)
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    pub fn should_quit(&self) -> bool {
        !self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    // ── Input ────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Key(key) => self.handle_key(&key, now),
            InputEvent::Mouse(mouse) if mouse.is_click() => {
                self.click(mouse.x as i32, mouse.y as i32, now)
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::Mouse(_) | InputEvent::Ignored => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        let Some(action) = self.bindings.resolve(key) else {
            return;
        };
        tracing::debug!(%action, "key binding");
        match action {
            BindingAction::Quit => self.request_quit(),
            BindingAction::OpenAll => {
                self.slides.open_all();
            }
            BindingAction::ToggleNth(n) => {
                let active = self.active_tokens();
                let zone = self
                    .layout
                    .slideable_zones()
                    .map(|(name, _)| name)
                    .filter(|name| active.contains(name))
                    .nth(n)
                    .map(str::to_owned);
                if let Some(zone) = zone {
                    self.toggle_zone(&zone, now);
                }
            }
        }
    }

    /// Zone tokens of the variant rendered for the current class.
    fn active_tokens(&self) -> IndexSet<&str> {
        self.layout
            .grid
            .resolve(self.bus.current())
            .map(|(_, variant)| variant.tokens())
            .unwrap_or_default()
    }

    /// Class key of the variant rendered for the current class.
    fn active_variant(&self) -> Option<Breakpoint> {
        self.layout
            .grid
            .resolve(self.bus.current())
            .map(|(class, _)| class)
    }

    /// Whether the group of `zone` currently withholds its close control.
    fn is_locked(&self, zone: &str) -> bool {
        self.slides
            .locked_zones(&self.layout.zones, &self.active_tokens())
            .contains(zone)
    }

    /// Close `zone` unless its slide group locks it.
    fn close_zone(&mut self, zone: &str, now: Instant) -> bool {
        if self.slides.is_visible(zone) && self.is_locked(zone) {
            tracing::debug!(zone, "close ignored, zone locked by its group");
            return false;
        }
        self.slides.close(zone, now)
    }

    fn toggle_zone(&mut self, zone: &str, now: Instant) -> bool {
        if self.slides.is_visible(zone) {
            self.close_zone(zone, now)
        } else {
            self.slides.open(zone)
        }
    }

    /// Route a click through the last rendered frame.
    pub fn click(&mut self, x: i32, y: i32, now: Instant) {
        match self.frame.hit_test(x, y) {
            Some(HitTarget::CloseControl(zone)) => {
                self.close_zone(&zone, now);
            }
            Some(HitTarget::GhostStrip(zone)) => {
                self.slides.open(&zone);
            }
            Some(HitTarget::Zone(zone)) => {
                let event = self
                    .frame
                    .zone(&zone)
                    .and_then(|placed| placed.block.click(placed.painted_region(), x, y));
                match event {
                    Some(BlockEvent::Navigate(route)) => {
                        tracing::info!(%zone, %route, "navigate");
                        self.navigations.push(route);
                    }
                    Some(BlockEvent::Toggle) => {
                        if !self.toggled.shift_remove(&zone) {
                            self.toggled.insert(zone);
                        }
                    }
                    Some(BlockEvent::Handled) | None => {}
                }
            }
            None => {}
        }
    }

    /// Adopt a new terminal size.
    ///
    /// Every zone is reset when the new viewport class renders a different
    /// grid variant. A class change that resolves to the same variant keeps
    /// slide state.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = Size::new(width as i32, height as i32);
        self.compositor.resize(width, height);
        self.previous = Compositor::new(0, 0);
        self.motion = None;

        let variant = self.active_variant();
        let px = self.config.metrics.viewport_width_px(width);
        if self.bus.publish_width(px, &self.config.breakpoints) && self.active_variant() != variant
        {
            self.slides.reset(&self.layout.zones);
        }
    }

    // ── Cycle ────────────────────────────────────────────────────────

    /// Apply queued zone commands and fire due close timers.
    ///
    /// Returns the zones that finished closing.
    pub fn update(&mut self, now: Instant) -> Vec<String> {
        for command in self.commands.drain() {
            match &command {
                ZoneCommand::Close(zone) => self.close_zone(zone, now),
                ZoneCommand::Open(zone) => self.slides.open(zone),
                ZoneCommand::Toggle(zone) => self.toggle_zone(zone, now),
            };
        }
        self.slides.tick(now)
    }

    /// Render the layout at `now` into the compositor.
    pub fn render(&mut self, now: Instant) -> &Frame {
        let ctx = RenderContext {
            viewport: self.size,
            class: self.bus.current(),
            slides: &self.slides,
            now,
            ease: self.config.ease,
            translator: self.translator.as_ref(),
            commands: &self.commands,
            toggled: &self.toggled,
        };
        let frame = match self.renderer.arrange(&self.layout, &ctx) {
            Ok(mut arrangement) => {
                arrangement.regions = animate(
                    &mut self.motion,
                    arrangement.class,
                    arrangement.regions,
                    now,
                    &self.config,
                );
                self.renderer
                    .compose(&self.layout, &self.registry, &ctx, &arrangement)
            }
            Err(err) => {
                tracing::warn!(error = %err, layout = %self.layout.layout, "layout not rendered");
                Frame::placeholder(self.size, err.to_string())
            }
        };
        self.compositor.paint_frame(&frame);
        self.frame = frame;
        &self.frame
    }

    /// Whether a slide-out or a track transition is still running.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.slides.pending_timers() > 0
            || self
                .motion
                .as_ref()
                .is_some_and(|m| !m.regions.is_finished(now))
    }

    /// When the loop should wake up without input: the next animation frame
    /// or the next close deadline.
    pub fn next_wakeup(&self, now: Instant) -> Option<Instant> {
        let frame = self
            .is_animating(now)
            .then(|| now + self.config.frame_interval());
        match (frame, self.slides.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Terminal ─────────────────────────────────────────────────────

    /// Write the changed cells to the terminal, if there is one.
    pub fn present(&mut self) -> Result<(), AppError> {
        if let Some(driver) = self.driver.as_mut() {
            driver.present(&self.compositor, &self.previous)?;
        }
        self.previous.clone_from(&self.compositor);
        Ok(())
    }

    pub fn enter_terminal(&mut self) -> Result<(), AppError> {
        if let Some(driver) = self.driver.as_mut() {
            driver.enter()?;
            if let Some(title) = &self.config.title {
                driver.set_title(title)?;
            }
        }
        Ok(())
    }

    pub fn leave_terminal(&mut self) -> Result<(), AppError> {
        if let Some(driver) = self.driver.as_mut() {
            driver.leave()?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
