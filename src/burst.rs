//! One-shot spark burst, fired when the contact form is submitted.
//!
//! Sparks leave the center radially, fall under gravity and fade linearly.
//! The burst keeps stepping only while at least one spark is visible; after
//! that it is finished and the host can drop it.

use crate::particle::Spark;
use crate::render::{Canvas, GLOW_BURST};
use crate::spawn::SpawnContext;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Burst tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Downward velocity added per frame.
    pub gravity: f32,
    /// Opacity removed per frame.
    pub fade: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 80,
            min_speed: 2.0,
            max_speed: 8.0,
            min_size: 2.0,
            max_size: 6.0,
            gravity: 0.1,
            fade: 0.02,
        }
    }
}

/// A running burst.
#[derive(Debug, Clone)]
pub struct Burst {
    sparks: Vec<Spark>,
    config: BurstConfig,
    active: bool,
}

impl Burst {
    /// Launch `config.count` sparks from `center`.
    pub fn new(center: Vec2, config: BurstConfig, ctx: &mut SpawnContext) -> Self {
        let sparks = (0..config.count)
            .map(|_| {
                let speed = ctx.random_range(config.min_speed, config.max_speed);
                Spark {
                    position: center,
                    velocity: ctx.random_direction() * speed,
                    size: ctx.random_range(config.min_size, config.max_size),
                    color: ctx.color(),
                    opacity: 1.0,
                }
            })
            .collect::<Vec<_>>();

        log::debug!("burst of {} sparks at ({:.0}, {:.0})", sparks.len(), center.x, center.y);

        Self {
            active: !sparks.is_empty(),
            sparks,
            config,
        }
    }

    /// Advance one frame. Returns whether any spark is still visible.
    ///
    /// Once this returns `false` further calls do nothing.
    pub fn step(&mut self, frames: f32) -> bool {
        if !self.active {
            return false;
        }

        let mut alive = false;
        for s in self.sparks.iter_mut().filter(|s| s.is_alive()) {
            s.position += s.velocity * frames;
            s.velocity.y += self.config.gravity * frames;
            s.opacity = (s.opacity - self.config.fade * frames).max(0.0);
            alive |= s.is_alive();
        }

        self.active = alive;
        alive
    }

    /// Draw visible sparks. Does not clear; the burst overlays other content.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for s in self.sparks.iter().filter(|s| s.is_alive()) {
            canvas.circle(s.position, s.size, s.color, s.opacity, GLOW_BURST);
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }
}
