//! # NEXUS particles
//!
//! The NEXUS preloader: a field of neon particles that drifts, draws itself
//! into a human figure, holds while shying away from the pointer, then blows
//! apart and hands control back to the host.
//!
//! ## Quick Start
//!
//! ```
//! use nexus_particles::prelude::*;
//!
//! let mut preloader = Preloader::builder()
//!     .with_viewport(Viewport::new(1280.0, 720.0))
//!     .with_seed(42)
//!     .on_complete(|| println!("ready"))
//!     .activate();
//!
//! let mut canvas = RasterCanvas::new(1280, 720);
//! while preloader.is_running() {
//!     let frame = preloader.tick(FRAME);
//!     if frame.signals.contains(&Signal::ShowText) {
//!         preloader.draw(&mut canvas);
//!     }
//! }
//! ```
//!
//! ## Phases
//!
//! | Phase    | Starts  | Motion                                          |
//! |----------|---------|-------------------------------------------------|
//! | Scatter  | 0 ms    | free drift with damping                         |
//! | Converge | 800 ms  | spring to the silhouette, pointer repulsion     |
//! | Hold     | 2200 ms | stiffer spring, greeting and title shown        |
//! | Explode  | 3200 ms | jitter, gravity, acceleration, fade             |
//!
//! Completion fires once, at 3800 ms by default. All offsets live in
//! [`Timeline`] and can be changed through [`Config`].
//!
//! ## Reduced Motion
//!
//! With [`Preferences::reduced_motion`] set, or when no drawing surface is
//! available, no particles are created and nothing is drawn. The overlay
//! shows at once and completion follows a shorter [`StillTimeline`].
//!
//! ## Drawing
//!
//! Simulation and drawing are separate. Effects draw through [`Canvas`],
//! implemented by the wgpu renderer used in [`run`] and by the software
//! [`RasterCanvas`] used for snapshots and tests.
//!
//! ## Companion Effects
//!
//! - [`Burst`]: a one-shot spark burst that stops once every spark has faded
//! - [`CodeRain`]: rising code glyphs drawn behind the page

pub mod accessibility;
pub mod burst;
pub mod config;
pub mod error;
pub mod forces;
pub mod gpu;
pub mod headless;
pub mod overlay;
pub mod palette;
pub mod particle;
pub mod phase;
pub mod pointer;
pub mod preloader;
pub mod render;
pub mod scheduler;
pub mod silhouette;
pub mod spawn;
pub mod time;
pub mod trail;
mod viewport;
mod window;

pub use accessibility::{Preferences, StoredPreferences};
pub use burst::{Burst, BurstConfig};
pub use config::{Config, PreloaderConfig, WindowConfig};
pub use error::{ConfigError, GpuError, RunError};
pub use forces::ForceConfig;
pub use glam::{Vec2, Vec3};
pub use headless::{render_snapshot, snapshot};
pub use overlay::Overlay;
pub use palette::NeonColor;
pub use particle::{Glyph, Particle, Spark};
pub use phase::{Phase, StillTimeline, Timeline};
pub use pointer::Pointer;
pub use preloader::{Frame, Mode, Preloader, PreloaderBuilder, State};
pub use render::{Canvas, HighContrast, RasterCanvas};
pub use scheduler::{Scheduler, Signal};
pub use silhouette::{HumanFigure, Outline};
pub use spawn::SpawnContext;
pub use time::{Time, FRAME};
pub use trail::{CodeRain, TrailConfig};
pub use viewport::Viewport;
pub use window::run;

pub mod prelude {
    pub use crate::accessibility::Preferences;
    pub use crate::burst::Burst;
    pub use crate::config::Config;
    pub use crate::palette::NeonColor;
    pub use crate::phase::{Phase, Timeline};
    pub use crate::pointer::Pointer;
    pub use crate::preloader::{Frame, Preloader};
    pub use crate::render::{Canvas, RasterCanvas};
    pub use crate::scheduler::Signal;
    pub use crate::silhouette::Outline;
    pub use crate::spawn::SpawnContext;
    pub use crate::time::{Time, FRAME};
    pub use crate::trail::CodeRain;
    pub use crate::viewport::Viewport;
    pub use crate::{Vec2, Vec3};
}
