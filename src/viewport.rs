//! Drawing-area dimensions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the drawing surface in pixels. Origin is top-left, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `None` for a zero, negative or non-finite area: nothing can be drawn.
    pub fn usable(width: f32, height: f32) -> Option<Self> {
        let ok = |v: f32| v.is_finite() && v >= 1.0;
        (ok(width) && ok(height)).then_some(Self { width, height })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}
