//! Particle data for the three effects.
//!
//! A particle is never removed individually. Once its opacity reaches zero it
//! is dead: renderers skip it, and it stays in its collection until the whole
//! effect is dropped. Skipping is cheaper than compacting every frame.

use crate::palette::NeonColor;
use glam::Vec2;

/// A preloader particle that flies toward a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current render position in pixels.
    pub position: Vec2,
    /// Pixels per reference frame.
    pub velocity: Vec2,
    /// Silhouette point this particle converges on. Set once at spawn.
    target: Vec2,
    /// Disc radius in pixels.
    pub size: f32,
    pub color: NeonColor,
    /// 0.0-1.0. Never negative.
    pub opacity: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, target: Vec2, size: f32, color: NeonColor, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            target,
            size,
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }
}

/// A burst spark: radial launch, gravity, linear fade.
#[derive(Debug, Clone, PartialEq)]
pub struct Spark {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: NeonColor,
    pub opacity: f32,
}

impl Spark {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }
}

/// A rising code glyph in the ambient trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub position: Vec2,
    /// Upward pixels per reference frame.
    pub speed: f32,
    pub text: &'static str,
    /// Font size in pixels.
    pub size: f32,
    pub color: NeonColor,
    pub opacity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_opacity_clamped_on_creation() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, Vec2::ONE, 1.0, NeonColor::Cyan, 1.5);
        assert_eq!(p.opacity, 1.0);

        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, Vec2::ONE, 1.0, NeonColor::Cyan, -0.5);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_distance_to_target() {
        let p = Particle::new(
            Vec2::new(0.0, 0.0),
            Vec2::ZERO,
            Vec2::new(3.0, 4.0),
            1.0,
            NeonColor::Green,
            1.0,
        );
        assert_eq!(p.distance_to_target(), 5.0);
        assert_eq!(p.target(), Vec2::new(3.0, 4.0));
    }
}
