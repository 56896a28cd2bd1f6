//! The preloader: a particle field that scatters, forms a figure, holds it
//! under the pointer, then blows apart, after which the host is told to
//! proceed.
//!
//! One [`Preloader`] owns its particles, clock, scheduler and completion
//! callback. Nothing is global, so several instances can run side by side.
//!
//! # Example
//!
//! ```
//! use nexus_particles::prelude::*;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let done = Arc::new(AtomicBool::new(false));
//! let flag = done.clone();
//!
//! let mut preloader = Preloader::builder()
//!     .with_viewport(Viewport::new(1920.0, 1080.0))
//!     .with_seed(1)
//!     .on_complete(move || flag.store(true, Ordering::SeqCst))
//!     .activate();
//!
//! while !preloader.is_complete() {
//!     preloader.tick(FRAME);
//! }
//! assert!(done.load(Ordering::SeqCst));
//! ```
//!
//! # Completion
//!
//! The callback is held as an `Option<FnOnce>` and taken when the `Complete`
//! cue is released, so it cannot run twice. [`Preloader::teardown`] cancels
//! every pending cue and drops the callback unrun; dropping the preloader
//! has the same effect.

use crate::config::PreloaderConfig;
use crate::forces::{integrate, StepInput};
use crate::overlay::{current_hour, Overlay};
use crate::palette::BACKGROUND;
use crate::particle::Particle;
use crate::phase::Phase;
use crate::pointer::Pointer;
use crate::render::{Canvas, GLOW_PRELOADER};
use crate::scheduler::{Scheduler, Signal};
use crate::silhouette::{HumanFigure, Outline};
use crate::spawn::SpawnContext;
use crate::time::Time;
use crate::viewport::Viewport;
use glam::Vec2;
use std::fmt;
use std::time::Duration;

/// Host callback run once when the animation has finished.
pub type OnComplete = Box<dyn FnOnce() + Send>;

/// How the preloader presents itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Full particle animation on a surface of this size.
    Animated(Viewport),
    /// No particles and no drawing, only the overlay and a short timeline.
    Still,
}

/// Lifecycle of an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    /// Completion fired and the particle set was discarded.
    Complete,
    /// The host tore the preloader down; nothing fires after this.
    TornDown,
}

/// What one tick produced, for the host to act on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub phase: Phase,
    /// Signals released during this tick, in order.
    pub signals: Vec<Signal>,
    pub show_text: bool,
    pub fading: bool,
    /// True only on the tick that ran the completion callback.
    pub completed: bool,
}

/// Configures and starts a [`Preloader`].
pub struct PreloaderBuilder {
    config: PreloaderConfig,
    viewport: Option<Viewport>,
    reduced_motion: bool,
    pointer: Pointer,
    seed: Option<u64>,
    hour: Option<u32>,
    outline: Box<dyn Outline>,
    on_complete: Option<OnComplete>,
}

impl PreloaderBuilder {
    fn new() -> Self {
        Self {
            config: PreloaderConfig::default(),
            viewport: None,
            reduced_motion: false,
            pointer: Pointer::new(),
            seed: None,
            hour: None,
            outline: Box::new(HumanFigure),
            on_complete: None,
        }
    }

    pub fn with_config(mut self, config: PreloaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Surface size. Without one the preloader runs the still timeline.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Surface size from raw dimensions; empty sizes count as no surface.
    pub fn with_surface_size(mut self, width: f32, height: f32) -> Self {
        self.viewport = Viewport::usable(width, height);
        self
    }

    /// Accessibility preference, read once here and never again.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Share a pointer handle with the host's input handler.
    pub fn with_pointer(mut self, pointer: Pointer) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Hour used for the greeting. Defaults to the current UTC hour.
    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn with_outline<O: Outline + 'static>(mut self, outline: O) -> Self {
        self.outline = Box::new(outline);
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Spawn the particle field and start the clock at zero.
    pub fn activate(self) -> Preloader {
        let mut ctx = SpawnContext::from_seed(self.seed);
        let viewport = self.viewport.and_then(|v| Viewport::usable(v.width, v.height));

        let mode = match (self.reduced_motion, viewport) {
            (true, _) => Mode::Still,
            (false, Some(vp)) => Mode::Animated(vp),
            (false, None) => {
                log::warn!("no drawing surface available, falling back to the still preloader");
                Mode::Still
            }
        };

        let (particles, scheduler) = match mode {
            Mode::Animated(vp) => {
                let outline = self.outline.points(vp);
                let particles = spawn_field(&self.config, vp, &outline, &mut ctx);
                (particles, Scheduler::animated(&self.config.timeline))
            }
            Mode::Still => (Vec::new(), Scheduler::still(&self.config.still_timeline)),
        };

        let hour = self.hour.unwrap_or_else(current_hour);
        let overlay = Overlay::new(hour, mode == Mode::Still);

        log::info!(
            "preloader activated: {} particles, {}",
            particles.len(),
            match mode {
                Mode::Animated(vp) => format!("animated {}x{}", vp.width, vp.height),
                Mode::Still => "still".to_string(),
            }
        );

        Preloader {
            mode,
            particles,
            scheduler,
            config: self.config,
            pointer: self.pointer,
            time: Time::manual(),
            ctx,
            on_complete: self.on_complete,
            overlay,
            phase: Phase::Scatter,
            show_text: false,
            fading: false,
            state: State::Running,
        }
    }
}

/// Build the particle set: random start, random drift, round-robin targets.
fn spawn_field(
    config: &PreloaderConfig,
    viewport: Viewport,
    outline: &[Vec2],
    ctx: &mut SpawnContext,
) -> Vec<Particle> {
    let fallback = [viewport.center()];
    let outline = if outline.is_empty() { &fallback[..] } else { outline };

    (0..config.particle_count)
        .map(|i| {
            let target = outline[i % outline.len()] + ctx.jitter_vec(config.target_jitter);
            Particle::new(
                ctx.random_in_viewport(viewport),
                ctx.jitter_vec(config.initial_speed),
                target,
                ctx.random_range(config.min_size, config.max_size),
                ctx.color(),
                ctx.random_range(config.min_opacity, config.max_opacity),
            )
        })
        .collect()
}

/// A running preloader activation.
pub struct Preloader {
    mode: Mode,
    particles: Vec<Particle>,
    scheduler: Scheduler,
    config: PreloaderConfig,
    pointer: Pointer,
    time: Time,
    ctx: SpawnContext,
    on_complete: Option<OnComplete>,
    overlay: Overlay,
    phase: Phase,
    show_text: bool,
    fading: bool,
    state: State,
}

impl Preloader {
    pub fn builder() -> PreloaderBuilder {
        PreloaderBuilder::new()
    }

    /// Advance the clock by `delta`, release due signals and step the field.
    ///
    /// After completion or teardown this returns an idle frame and changes
    /// nothing.
    pub fn tick(&mut self, delta: Duration) -> Frame {
        if self.state != State::Running {
            return self.idle_frame();
        }

        self.time.advance(delta);
        let elapsed = self.time.elapsed();
        let signals = self.scheduler.advance(elapsed);
        let mut completed = false;

        for signal in &signals {
            match *signal {
                Signal::Phase(phase) => {
                    log::debug!("phase -> {} at {}ms", phase, elapsed.as_millis());
                    self.phase = phase;
                }
                Signal::ShowText => {
                    log::debug!("overlay: {} / {}", self.overlay.greeting, self.overlay.title);
                    self.show_text = true;
                }
                Signal::FadeOut => self.fading = true,
                Signal::Complete => {
                    self.complete();
                    completed = true;
                }
            }
        }

        if let (State::Running, Mode::Animated(bounds)) = (self.state, self.mode) {
            let input = StepInput {
                phase: self.config.timeline.phase_at(elapsed),
                pointer: self.pointer.get(),
                bounds,
                frames: self.time.frame_scale(),
            };
            integrate(&mut self.particles, &input, &self.config.forces, &mut self.ctx);
        }

        Frame {
            phase: self.phase,
            signals,
            show_text: self.show_text,
            fading: self.fading,
            completed,
        }
    }

    fn complete(&mut self) {
        self.state = State::Complete;
        self.particles = Vec::new();
        log::info!("preloader complete after {}ms", self.time.elapsed().as_millis());
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    fn idle_frame(&self) -> Frame {
        Frame {
            phase: self.phase,
            signals: Vec::new(),
            show_text: self.show_text,
            fading: self.fading,
            completed: false,
        }
    }

    /// Clear to the background and draw every visible particle.
    ///
    /// Draws nothing at all in still mode or once the run has ended.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        if self.state != State::Running || self.mode == Mode::Still {
            return;
        }
        canvas.clear(BACKGROUND);
        for p in self.particles.iter().filter(|p| p.is_alive()) {
            canvas.circle(p.position, p.size, p.color, p.opacity, GLOW_PRELOADER);
        }
    }

    /// Cancel pending cues, drop the completion callback unrun and discard
    /// the particles. Safe to call at any time, any number of times.
    pub fn teardown(&mut self) {
        if self.state == State::TornDown {
            return;
        }
        self.scheduler.cancel();
        self.on_complete = None;
        self.particles = Vec::new();
        if self.state == State::Running {
            log::debug!("preloader torn down at {}ms", self.time.elapsed().as_millis());
        }
        self.state = State::TornDown;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Phase as released by the scheduler.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == State::Complete
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.time.elapsed()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn show_text(&self) -> bool {
        self.show_text
    }

    pub fn fading(&self) -> bool {
        self.fading
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }
}

impl fmt::Debug for Preloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preloader")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("elapsed", &self.time.elapsed())
            .field("particles", &self.particles.len())
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FRAME;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_targets_round_robin() {
        struct Two;
        impl Outline for Two {
            fn points(&self, _: Viewport) -> Vec<Vec2> {
                vec![Vec2::new(100.0, 100.0), Vec2::new(500.0, 300.0)]
            }
        }

        let config = PreloaderConfig { particle_count: 6, ..PreloaderConfig::default() };
        let preloader = Preloader::builder()
            .with_config(config)
            .with_viewport(Viewport::new(800.0, 600.0))
            .with_outline(Two)
            .with_seed(3)
            .activate();

        for (i, p) in preloader.particles().iter().enumerate() {
            let base = if i % 2 == 0 { Vec2::new(100.0, 100.0) } else { Vec2::new(500.0, 300.0) };
            assert!((p.target() - base).abs().max_element() <= 4.0);
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let preloader = Preloader::builder()
            .with_viewport(Viewport::new(1920.0, 1080.0))
            .with_seed(11)
            .activate();
        assert_eq!(preloader.particles().len(), 300);
        for p in preloader.particles() {
            assert!((0.5..1.0).contains(&p.opacity));
            assert!((0.5..3.0).contains(&p.size));
            assert!(p.velocity.abs().max_element() <= 2.0);
        }
    }

    #[test]
    fn test_empty_outline_targets_center() {
        struct Nothing;
        impl Outline for Nothing {
            fn points(&self, _: Viewport) -> Vec<Vec2> {
                Vec::new()
            }
        }
        let vp = Viewport::new(400.0, 200.0);
        let preloader = Preloader::builder().with_viewport(vp).with_outline(Nothing).with_seed(1).activate();
        for p in preloader.particles() {
            assert!(p.target().distance(vp.center()) < 6.0);
        }
    }

    #[test]
    fn test_zero_surface_falls_back_to_still() {
        let (count, callback) = counter();
        let mut preloader = Preloader::builder()
            .with_surface_size(0.0, 0.0)
            .on_complete(callback)
            .activate();
        assert_eq!(preloader.mode(), Mode::Still);
        assert!(preloader.particles().is_empty());

        while preloader.is_running() {
            preloader.tick(FRAME);
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_show_text_on_hold() {
        let mut preloader = Preloader::builder()
            .with_viewport(Viewport::new(640.0, 480.0))
            .with_seed(2)
            .activate();
        while preloader.elapsed() < Duration::from_millis(2100) {
            assert!(!preloader.tick(FRAME).show_text);
        }
        while preloader.elapsed() < Duration::from_millis(2300) {
            preloader.tick(FRAME);
        }
        assert!(preloader.show_text());
        assert_eq!(preloader.phase(), Phase::Hold);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let (count, callback) = counter();
        let mut preloader = Preloader::builder()
            .with_viewport(Viewport::new(640.0, 480.0))
            .on_complete(callback)
            .activate();
        preloader.tick(FRAME);
        preloader.teardown();
        preloader.teardown();
        assert_eq!(preloader.state(), State::TornDown);
        for _ in 0..400 {
            assert_eq!(preloader.tick(FRAME), preloader.idle_frame());
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_teardown_after_complete_keeps_single_call() {
        let (count, callback) = counter();
        let mut preloader = Preloader::builder()
            .with_reduced_motion(true)
            .on_complete(callback)
            .activate();
        preloader.tick(Duration::from_millis(50));
        while !preloader.is_complete() {
            preloader.tick(Duration::from_millis(50));
        }
        preloader.teardown();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
