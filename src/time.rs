//! Frame clock for the preloader.
//!
//! A single clock drives both the phase timeline and the integration step,
//! so phase changes and particle motion always agree on "now". Elapsed time
//! always takes the full delta, so the timeline keeps wall-clock pace at any
//! tick rate. Only the integration step is capped, at [`MAX_DELTA`]. The clock can
//! follow the wall clock (window runner) or be stepped by hand (tests and
//! headless snapshots).
//!
//! # Example
//!
//! ```
//! use nexus_particles::time::{Time, FRAME};
//!
//! let mut time = Time::manual();
//! time.advance(FRAME);
//! time.advance(FRAME);
//!
//! assert_eq!(time.frame(), 2);
//! assert!((time.frame_scale() - 1.0).abs() < 1e-3);
//! ```

use std::time::{Duration, Instant};

/// One frame at the 60 Hz reference rate the force constants are tuned for.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Default upper bound for a single integration step.
pub const MAX_DELTA: Duration = Duration::from_millis(50);

/// Where elapsed time comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Measure real time between `update` calls.
    Wall,
    /// Only move when `advance` is called.
    Manual,
}

/// Time tracking for the simulation and the render loop.
#[derive(Debug)]
pub struct Time {
    source: ClockSource,
    /// When the last wall-clock update happened.
    last_frame: Instant,
    /// Total elapsed simulated time.
    elapsed: Duration,
    /// Time since last frame.
    delta: Duration,
    /// Last delta capped at `max_delta`, as seen by the integrator.
    step: Duration,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_window: Duration,
    fps_update_interval: Duration,
    paused: bool,
    /// Largest step a single frame may integrate.
    max_delta: Duration,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl Time {
    /// Create a clock that follows real time, starting now.
    pub fn new() -> Self {
        Self::with_source(ClockSource::Wall)
    }

    /// Create a clock that only moves when [`Time::advance`] is called.
    pub fn manual() -> Self {
        Self::with_source(ClockSource::Manual)
    }

    fn with_source(source: ClockSource) -> Self {
        Self {
            source,
            last_frame: Instant::now(),
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            step: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window: Duration::ZERO,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            max_delta: MAX_DELTA,
            time_scale: 1.0,
        }
    }

    /// Sample the wall clock. Call once per frame.
    ///
    /// Manual clocks ignore this and report a zero delta.
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame);
        self.last_frame = now;

        match self.source {
            ClockSource::Wall => self.advance(raw),
            ClockSource::Manual => {
                self.delta = Duration::ZERO;
                self.step = Duration::ZERO;
                self.delta
            }
        }
    }

    /// Move the clock forward by `delta`, scaled by the time scale.
    ///
    /// Elapsed time takes the whole scaled delta. The integration step read
    /// through [`Time::frame_scale`] is capped at the max delta.
    ///
    /// Returns the delta that was actually applied.
    pub fn advance(&mut self, delta: Duration) -> Duration {
        if self.paused {
            self.delta = Duration::ZERO;
            self.step = Duration::ZERO;
            return self.delta;
        }

        self.delta = self.scaled(delta);
        self.step = self.scaled(delta.min(self.max_delta));
        self.elapsed += self.delta;
        self.frame_count += 1;

        self.fps_window += delta;
        if self.fps_window >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / self.fps_window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_window = Duration::ZERO;
        }

        self.delta
    }

    // exact at 1.0, mul_f32 rounds through f32 seconds
    fn scaled(&self, delta: Duration) -> Duration {
        if self.time_scale == 1.0 {
            delta
        } else {
            delta.mul_f32(self.time_scale)
        }
    }

    /// Total simulated time since start.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time applied by the last frame.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Last integration step, the delta capped at the max delta.
    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Last integration step measured in 60 Hz frames.
    ///
    /// Force rules are written per reference frame; this is the multiplier
    /// that keeps them frame-rate independent. A long stall integrates as at
    /// most one max-delta step, while elapsed time still moves by the full
    /// delta.
    #[inline]
    pub fn frame_scale(&self) -> f32 {
        self.step.as_secs_f32() / FRAME.as_secs_f32()
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn source(&self) -> ClockSource {
        self.source
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pause time progression. Paused frames report a zero delta.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after pausing. Wall time spent paused is not counted.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Set the largest step one frame may integrate.
    pub fn set_max_delta(&mut self, max: Duration) {
        self.max_delta = max;
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Reset to zero elapsed time, keeping the source and settings.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed = Duration::ZERO;
        self.delta = Duration::ZERO;
        self.step = Duration::ZERO;
        self.frame_count = 0;
        self.fps = 0.0;
        self.fps_frame_count = 0;
        self.fps_window = Duration::ZERO;
        self.paused = false;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
