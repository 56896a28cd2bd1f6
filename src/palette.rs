//! The neon palette shared by every particle effect.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Clear color behind the preloader (`#050510`).
pub const BACKGROUND: Vec3 = Vec3::new(5.0 / 255.0, 5.0 / 255.0, 16.0 / 255.0);

/// One of the four particle colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeonColor {
    /// `#00f5ff`
    #[default]
    Cyan,
    /// `#9d00ff`
    Violet,
    /// `#ff00c8`
    Magenta,
    /// `#00ff88`
    Green,
}

impl NeonColor {
    /// Every palette entry, in palette order.
    pub const ALL: [NeonColor; 4] = [
        NeonColor::Cyan,
        NeonColor::Violet,
        NeonColor::Magenta,
        NeonColor::Green,
    ];

    /// CSS-style hex string.
    pub fn hex(&self) -> &'static str {
        match self {
            NeonColor::Cyan => "#00f5ff",
            NeonColor::Violet => "#9d00ff",
            NeonColor::Magenta => "#ff00c8",
            NeonColor::Green => "#00ff88",
        }
    }

    /// Color as RGB in 0.0-1.0.
    pub fn rgb(&self) -> Vec3 {
        let [r, g, b] = self.rgb8();
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }

    /// Color as 8-bit RGB.
    pub fn rgb8(&self) -> [u8; 3] {
        match self {
            NeonColor::Cyan => [0x00, 0xf5, 0xff],
            NeonColor::Violet => [0x9d, 0x00, 0xff],
            NeonColor::Magenta => [0xff, 0x00, 0xc8],
            NeonColor::Green => [0x00, 0xff, 0x88],
        }
    }

    /// Uniformly pick a palette entry.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
