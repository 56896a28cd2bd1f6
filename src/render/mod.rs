//! Drawing surfaces.
//!
//! Effects never talk to a graphics API directly. They draw through
//! [`Canvas`], which the GPU renderer and the software [`RasterCanvas`] both
//! implement. The simulation step and the draw step are separate calls, so
//! the step can be tested without any surface at all.

mod raster;

pub use raster::RasterCanvas;

use crate::palette::NeonColor;
use glam::{Vec2, Vec3};

/// Glow radius around preloader particles, in pixels.
pub const GLOW_PRELOADER: f32 = 8.0;
/// Glow radius around burst sparks.
pub const GLOW_BURST: f32 = 6.0;
/// Glow radius around trail glyphs.
pub const GLOW_TRAIL: f32 = 4.0;

/// A flat 2D surface in pixel coordinates, origin top-left.
///
/// Primitives are alpha blended in call order.
pub trait Canvas {
    /// Fill the whole surface with an opaque color.
    fn clear(&mut self, color: Vec3);

    /// Filled disc with a soft glow of the same color.
    fn circle(&mut self, center: Vec2, radius: f32, color: NeonColor, alpha: f32, glow: f32);

    /// Short text run anchored at its baseline start, glowing like `circle`.
    fn glyph(&mut self, position: Vec2, text: &str, size: f32, color: NeonColor, alpha: f32, glow: f32);
}

/// Forwards to another canvas with every glow removed, for the high
/// contrast preference.
pub struct HighContrast<'a, C: Canvas + ?Sized>(pub &'a mut C);

impl<C: Canvas + ?Sized> Canvas for HighContrast<'_, C> {
    fn clear(&mut self, color: Vec3) {
        self.0.clear(color);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: NeonColor, alpha: f32, _glow: f32) {
        self.0.circle(center, radius, color, alpha, 0.0);
    }

    fn glyph(&mut self, position: Vec2, text: &str, size: f32, color: NeonColor, alpha: f32, _glow: f32) {
        self.0.glyph(position, text, size, color, alpha, 0.0);
    }
}
