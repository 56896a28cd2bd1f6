//! Software canvas backed by an RGBA image.
//!
//! Used for headless snapshots and for tests that need to know whether
//! anything was drawn. Glyphs are approximated by solid cells, one per
//! character; there is no font rasterization.

use super::Canvas;
use crate::palette::NeonColor;
use glam::{Vec2, Vec3};
use image::{ImageResult, Rgba, RgbaImage};
use std::path::Path;

/// Fraction of the core alpha carried by the glow halo at the disc edge.
const GLOW_ALPHA: f32 = 0.35;

pub struct RasterCanvas {
    image: RgbaImage,
    draw_calls: usize,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            draw_calls: 0,
        }
    }

    /// Number of `clear`, `circle` and `glyph` calls so far.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.image.save(path)
    }

    /// Source-over blend of one pixel. Out-of-bounds pixels are ignored.
    fn blend(&mut self, x: i64, y: i64, rgb: Vec3, alpha: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let dst = px.0[c] as f32 / 255.0;
            let out = rgb[c] * alpha + dst * (1.0 - alpha);
            px.0[c] = (out * 255.0).round() as u8;
        }
        let dst_a = px.0[3] as f32 / 255.0;
        px.0[3] = ((alpha + dst_a * (1.0 - alpha)) * 255.0).round() as u8;
    }

    /// Iterate the pixel box covering `center ± reach`.
    fn for_box(center: Vec2, reach: f32, mut f: impl FnMut(i64, i64, f32)) {
        let x0 = (center.x - reach).floor() as i64;
        let x1 = (center.x + reach).ceil() as i64;
        let y0 = (center.y - reach).floor() as i64;
        let y1 = (center.y + reach).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                f(x, y, d);
            }
        }
    }
}

/// Coverage of a disc with a glow halo at distance `d` from its center.
fn coverage(d: f32, radius: f32, glow: f32) -> f32 {
    if d <= radius {
        // one pixel of anti-aliasing on the rim
        (radius - d + 0.5).clamp(0.0, 1.0).max(GLOW_ALPHA)
    } else if glow > 0.0 && d <= radius + glow {
        let t = 1.0 - (d - radius) / glow;
        GLOW_ALPHA * t * t
    } else {
        0.0
    }
}

impl Canvas for RasterCanvas {
    fn clear(&mut self, color: Vec3) {
        self.draw_calls += 1;
        let px = Rgba([
            (color.x.clamp(0.0, 1.0) * 255.0).round() as u8,
            (color.y.clamp(0.0, 1.0) * 255.0).round() as u8,
            (color.z.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]);
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: NeonColor, alpha: f32, glow: f32) {
        self.draw_calls += 1;
        if !center.is_finite() || alpha <= 0.0 {
            return;
        }
        let rgb = color.rgb();
        let radius = radius.max(0.5);
        let mut hits = Vec::new();
        Self::for_box(center, radius + glow.max(0.0), |x, y, d| {
            let c = coverage(d, radius, glow);
            if c > 0.0 {
                hits.push((x, y, c));
            }
        });
        for (x, y, c) in hits {
            self.blend(x, y, rgb, c * alpha);
        }
    }

    fn glyph(&mut self, position: Vec2, text: &str, size: f32, color: NeonColor, alpha: f32, glow: f32) {
        self.draw_calls += 1;
        if !position.is_finite() || alpha <= 0.0 {
            return;
        }
        let rgb = color.rgb();
        let cell_w = (size * 0.6).max(1.0);
        let cell_h = (size * 0.7).max(1.0);
        for (i, _) in text.chars().enumerate() {
            let left = position.x + i as f32 * cell_w;
            let top = position.y - cell_h;
            let x0 = (left - glow).floor() as i64;
            let x1 = (left + cell_w + glow).ceil() as i64;
            let y0 = (top - glow).floor() as i64;
            let y1 = (position.y + glow).ceil() as i64;
            for y in y0..=y1 {
                for x in x0..=x1 {
                    let cx = (x as f32 + 0.5).clamp(left, left + cell_w);
                    let cy = (y as f32 + 0.5).clamp(top, position.y);
                    let d = Vec2::new(x as f32 + 0.5 - cx, y as f32 + 0.5 - cy).length();
                    let c = coverage(d, 0.0, glow).max(if d == 0.0 { 1.0 } else { 0.0 });
                    self.blend(x, y, rgb, c * alpha);
                }
            }
        }
    }
}
