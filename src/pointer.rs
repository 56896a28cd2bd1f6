//! Shared pointer sample.
//!
//! The window's cursor-move handler writes the latest position, the frame
//! callback reads it once per frame. Only the newest sample matters, so there
//! is no queue: both coordinates are packed into one atomic word and every
//! write replaces the previous one whole.

use glam::Vec2;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Position reported before the pointer first moves. Far enough off-canvas
/// that no repulsion radius reaches any particle.
pub const OFF_CANVAS: Vec2 = Vec2::new(-1000.0, -1000.0);

#[inline]
fn pack(p: Vec2) -> u64 {
    ((p.x.to_bits() as u64) << 32) | p.y.to_bits() as u64
}

#[inline]
fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

/// Cloneable handle to the last known pointer position.
///
/// ```
/// use nexus_particles::pointer::{Pointer, OFF_CANVAS};
/// use nexus_particles::Vec2;
///
/// let pointer = Pointer::new();
/// let writer = pointer.clone();
/// assert_eq!(pointer.get(), OFF_CANVAS);
///
/// writer.set(Vec2::new(10.0, 20.0));
/// writer.set(Vec2::new(30.0, 40.0));
/// assert_eq!(pointer.get(), Vec2::new(30.0, 40.0));
/// ```
#[derive(Debug, Clone)]
pub struct Pointer {
    bits: Arc<AtomicU64>,
}

impl Pointer {
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(pack(OFF_CANVAS))),
        }
    }

    /// Record a new sample, replacing the previous one.
    #[inline]
    pub fn set(&self, position: Vec2) {
        self.bits.store(pack(position), Ordering::Relaxed);
    }

    /// Most recent sample.
    #[inline]
    pub fn get(&self) -> Vec2 {
        unpack(self.bits.load(Ordering::Relaxed))
    }

    /// Forget the pointer, e.g. when it leaves the window.
    pub fn reset(&self) {
        self.set(OFF_CANVAS);
    }

    /// Whether a real sample has been recorded since creation or reset.
    pub fn has_moved(&self) -> bool {
        self.get() != OFF_CANVAS
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new()
    }
}
