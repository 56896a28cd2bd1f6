//! Ambient code trail: glyphs drifting up behind the hero section.

use crate::particle::Glyph;
use crate::render::{Canvas, GLOW_TRAIL};
use crate::spawn::SpawnContext;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Glyphs the trail draws from.
pub const CODE_GLYPHS: [&str; 16] = [
    "0", "1", "{", "}", "<", ">", "/", ";", "=", "(", ")", "fn", "if", "&&", "||", "=>",
];

/// How far past an edge a glyph travels before it wraps.
const WRAP_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            count: 60,
            min_speed: 0.3,
            max_speed: 1.0,
            min_opacity: 0.1,
            max_opacity: 0.5,
            min_size: 10.0,
            max_size: 16.0,
        }
    }
}

/// Endless field of rising glyphs.
///
/// Under reduced motion the trail holds no glyphs and draws nothing.
#[derive(Debug, Clone)]
pub struct CodeRain {
    glyphs: Vec<Glyph>,
    area: Viewport,
    ctx: SpawnContext,
}

impl CodeRain {
    pub fn new(area: Viewport, config: TrailConfig, reduced_motion: bool, mut ctx: SpawnContext) -> Self {
        let glyphs = if reduced_motion {
            Vec::new()
        } else {
            (0..config.count)
                .map(|_| Glyph {
                    position: ctx.random_in_viewport(area),
                    speed: ctx.random_range(config.min_speed, config.max_speed),
                    text: ctx.pick(&CODE_GLYPHS),
                    opacity: ctx.random_range(config.min_opacity, config.max_opacity),
                    color: ctx.color(),
                    size: ctx.random_range(config.min_size, config.max_size),
                })
                .collect()
        };

        Self { glyphs, area, ctx }
    }

    /// Rise every glyph; glyphs leaving the top re-enter below the bottom
    /// at a new column with a new glyph.
    pub fn step(&mut self, frames: f32) {
        for g in &mut self.glyphs {
            g.position.y -= g.speed * frames;
            if g.position.y < -WRAP_MARGIN {
                g.position.y = self.area.height + WRAP_MARGIN;
                g.position.x = self.ctx.random() * self.area.width;
                g.text = self.ctx.pick(&CODE_GLYPHS);
            }
        }
    }

    /// Track a new drawing-area size. Glyphs keep their positions and wrap
    /// into the new area on their next pass.
    pub fn resize(&mut self, area: Viewport) {
        self.area = area;
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for g in &self.glyphs {
            canvas.glyph(g.position, g.text, g.size, g.color, g.opacity, GLOW_TRAIL);
        }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
