//! Per-frame force integration for the preloader particles.
//!
//! Each phase has its own rule set, applied uniformly to every particle:
//!
//! | Phase | Velocity | Position | Opacity |
//! |-------|----------|----------|---------|
//! | [`Phase::Scatter`] | damped, reflected at the walls | `+= v` | unchanged |
//! | [`Phase::Converge`] | spring to target, damped, pointer repulsion | `+= v` | unchanged |
//! | [`Phase::Hold`] | stiffer spring, tighter damping, smaller repulsion | `+= v` | unchanged |
//! | [`Phase::Explode`] | random kick plus gravity, amplified | `+= v` | `-= fade` |
//!
//! Constants are tuned per 60 Hz frame. `frames` scales them for other
//! frame rates and is exactly `1.0` at the reference rate, where the rules
//! reduce to the plain per-frame form.

use crate::particle::Particle;
use crate::phase::Phase;
use crate::spawn::SpawnContext;
use crate::viewport::Viewport;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Spring and repulsion constants for one convergence phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Fraction of the target displacement added to velocity per frame.
    pub gain: f32,
    /// Velocity multiplier per frame.
    pub damping: f32,
    /// Pointer repulsion reach in pixels.
    pub radius: f32,
    /// Repulsion velocity at zero distance, pixels per frame.
    pub strength: f32,
}

/// Dispersal constants for the final phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dispersal {
    /// Width of the uniform random velocity kick on each axis.
    pub jitter: f32,
    /// Downward velocity added per frame.
    pub gravity: f32,
    /// Velocity multiplier per frame (> 1 accelerates).
    pub amplification: f32,
    /// Opacity removed per frame.
    pub fade: f32,
}

/// Every force constant the integration step uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Velocity multiplier per frame while scattering.
    pub scatter_damping: f32,
    pub converge: Spring,
    pub hold: Spring,
    pub explode: Dispersal,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            scatter_damping: 0.98,
            converge: Spring {
                gain: 0.04,
                damping: 0.88,
                radius: 80.0,
                strength: 3.0,
            },
            hold: Spring {
                gain: 0.06,
                damping: 0.85,
                radius: 60.0,
                strength: 2.0,
            },
            explode: Dispersal {
                jitter: 2.0,
                gravity: 0.5,
                amplification: 1.05,
                fade: 0.02,
            },
        }
    }
}

/// Everything a frame reads besides the particles themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    pub phase: Phase,
    /// Latest pointer sample.
    pub pointer: Vec2,
    /// Walls for the scatter phase.
    pub bounds: Viewport,
    /// Frame delta in 60 Hz frames.
    pub frames: f32,
}

/// Velocity the pointer adds to a particle at `position`.
///
/// Falls off linearly from `strength` at the pointer to zero at `radius`,
/// pointing away from the pointer. A particle exactly on the pointer has no
/// direction to flee in and receives no force.
pub fn repulsion(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let away = position - pointer;
    let dist = away.length();
    if !(dist < radius) {
        return Vec2::ZERO;
    }
    let falloff = (radius - dist) / radius;
    away.normalize_or_zero() * falloff * strength
}

/// Advance every particle by one frame under the rules of `input.phase`.
///
/// Dead particles (opacity 0) are left untouched.
pub fn integrate(
    particles: &mut [Particle],
    input: &StepInput,
    forces: &ForceConfig,
    rng: &mut SpawnContext,
) {
    let k = input.frames;
    if k <= 0.0 {
        return;
    }

    match input.phase {
        Phase::Scatter => {
            let damping = forces.scatter_damping.powf(k);
            for p in particles.iter_mut().filter(|p| p.is_alive()) {
                p.position += p.velocity * k;
                p.velocity *= damping;
                if p.position.x < 0.0 || p.position.x > input.bounds.width {
                    p.velocity.x = -p.velocity.x;
                }
                if p.position.y < 0.0 || p.position.y > input.bounds.height {
                    p.velocity.y = -p.velocity.y;
                }
            }
        }
        Phase::Converge => spring_step(particles, &forces.converge, input.pointer, k),
        Phase::Hold => spring_step(particles, &forces.hold, input.pointer, k),
        Phase::Explode => {
            let d = &forces.explode;
            let amplification = d.amplification.powf(k);
            for p in particles.iter_mut().filter(|p| p.is_alive()) {
                let kick = Vec2::new(rng.jitter(d.jitter), rng.jitter(d.jitter) + d.gravity);
                p.velocity += kick * k;
                p.velocity *= amplification;
                p.position += p.velocity * k;
                p.opacity = (p.opacity - d.fade * k).max(0.0);
            }
        }
    }
}

fn spring_step(particles: &mut [Particle], spring: &Spring, pointer: Vec2, k: f32) {
    let damping = spring.damping.powf(k);
    for p in particles.iter_mut().filter(|p| p.is_alive()) {
        p.velocity += (p.target() - p.position) * spring.gain * k;
        p.velocity *= damping;
        p.position += p.velocity * k;
        p.velocity += repulsion(p.position, pointer, spring.radius, spring.strength) * k;
    }
}
