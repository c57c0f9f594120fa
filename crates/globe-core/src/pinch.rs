//! Thumb/index pinch detection.
//!
//! Single-threshold classification: a distance hovering around the threshold
//! will flicker between states from frame to frame. There is no hysteresis band.

use crate::constants::{PINCH_STRENGTH_RANGE, PINCH_THRESHOLD};
use crate::landmarks::Hand;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchReading {
    /// Thumb-tip to index-tip distance in the image plane (z ignored).
    pub distance: f32,
    pub is_pinching: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct PinchClassifier {
    pub threshold: f32,
    pub strength_range: f32,
}

impl Default for PinchClassifier {
    fn default() -> Self {
        Self {
            threshold: PINCH_THRESHOLD,
            strength_range: PINCH_STRENGTH_RANGE,
        }
    }
}

impl PinchClassifier {
    /// `None` when no hand is present; the distance is undefined for that frame.
    pub fn classify(&self, hand: Option<&Hand>) -> Option<PinchReading> {
        let hand = hand?;
        let distance = pinch_distance(hand);
        Some(PinchReading {
            distance,
            is_pinching: self.is_pinching(distance),
        })
    }

    #[inline]
    pub fn is_pinching(&self, distance: f32) -> bool {
        distance < self.threshold
    }

    /// Display-only strength in percent: 100 at contact, 0 at `strength_range` and beyond.
    #[inline]
    pub fn strength(&self, distance: f32) -> f32 {
        ((1.0 - distance / self.strength_range) * 100.0).clamp(0.0, 100.0)
    }
}

#[inline]
pub fn pinch_distance(hand: &Hand) -> f32 {
    hand.thumb_tip().xy().distance(hand.index_tip().xy())
}
