//! Exponential smoothing of the mirrored index fingertip.

use crate::constants::{POINTER_CENTER, SMOOTHING_ALPHA};
use crate::landmarks::Hand;
use glam::Vec2;

/// Raw pointer for a hand: index tip, mirrored horizontally to match a
/// user-facing camera.
#[inline]
pub fn raw_pointer(hand: &Hand) -> Vec2 {
    let tip = hand.index_tip();
    Vec2::new(1.0 - tip.x, tip.y)
}

/// Keeps the last emitted pointer across frames. Only reset at process start;
/// pinch transitions and hand loss leave it untouched.
#[derive(Clone, Copy, Debug)]
pub struct PointerSmoother {
    alpha: f32,
    state: Vec2,
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self::new(SMOOTHING_ALPHA, Vec2::from(POINTER_CENTER))
    }
}

impl PointerSmoother {
    pub fn new(alpha: f32, start: Vec2) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            state: start,
        }
    }

    pub fn update(&mut self, raw: Vec2) -> Vec2 {
        self.state += (raw - self.state) * self.alpha;
        self.state
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.state
    }
}
