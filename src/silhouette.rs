//! Target shapes the preloader particles converge on.
//!
//! The default shape is a standing human figure built from a head circle and
//! straight strokes for the body, arms and legs. The exact points carry no
//! behavioral weight; anything implementing [`Outline`] can replace them.

use crate::viewport::Viewport;
use glam::Vec2;
use std::f32::consts::TAU;

/// Produces the point set particles are assigned to.
///
/// Particles pick targets round-robin (`index % points.len()`), so an outline
/// may have fewer points than there are particles.
pub trait Outline {
    fn points(&self, viewport: Viewport) -> Vec<Vec2>;
}

/// Human figure centred in the viewport, scaled to 35% of its shorter side.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanFigure;

impl Outline for HumanFigure {
    fn points(&self, viewport: Viewport) -> Vec<Vec2> {
        silhouette(viewport)
    }
}

/// Walk `start, start + step, ...` while below `end`, like a float for-loop.
fn steps(start: f32, end: f32, step: f32) -> impl Iterator<Item = f32> {
    (0..)
        .map(move |i| start + i as f32 * step)
        .take_while(move |t| *t < end)
}

/// Points of the default human figure.
pub fn silhouette(viewport: Viewport) -> Vec<Vec2> {
    let c = viewport.center();
    let s = viewport.min_side() * 0.35;
    let mut points = Vec::with_capacity(96);

    // head
    for a in steps(0.0, TAU, 0.3) {
        points.push(Vec2::new(
            c.x + a.cos() * s * 0.12,
            c.y - s * 0.55 + a.sin() * s * 0.12,
        ));
    }

    // body, narrowing toward the hips
    for t in steps(0.0, 1.0, 0.05) {
        let half_width = s * (0.18 - t * 0.06);
        let y = c.y - s * 0.4 + t * s * 0.5;
        points.push(Vec2::new(c.x - half_width, y));
        points.push(Vec2::new(c.x + half_width, y));
    }

    // arms
    for t in steps(0.0, 1.0, 0.08) {
        let reach = s * 0.18 + t * s * 0.22;
        let y = c.y - s * 0.35 + t * s * 0.3;
        points.push(Vec2::new(c.x - reach, y));
        points.push(Vec2::new(c.x + reach, y));
    }

    // legs
    for t in steps(0.0, 1.0, 0.06) {
        let y = c.y + t * s * 0.5;
        points.push(Vec2::new(c.x - s * 0.1, y));
        points.push(Vec2::new(c.x + s * 0.1, y));
    }

    points
}
