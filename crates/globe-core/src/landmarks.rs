//! 21-point hand model as produced by the external landmark detector.
//!
//! Coordinates are normalized image space: `x`/`y` in \[0, 1\], `z` is depth
//! relative to the wrist. A `Hand` lives for one frame only.

use crate::constants::HAND_LANDMARK_COUNT;
use crate::error::DetectionError;
use glam::Vec2;

pub use crate::constants::{INDEX_TIP, THUMB_TIP};

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One detected hand. Indices follow the detector's fixed anatomical order.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; HAND_LANDMARK_COUNT],
}

impl Hand {
    pub fn new(landmarks: [Landmark; HAND_LANDMARK_COUNT]) -> Result<Self, DetectionError> {
        if let Some(i) = landmarks.iter().position(|l| !l.is_finite()) {
            return Err(DetectionError::Malformed(format!(
                "landmark {i} has a non-finite coordinate"
            )));
        }
        Ok(Self { landmarks })
    }

    /// Build a hand from a flat `[x0, y0, z0, x1, ...]` buffer of 63 values.
    pub fn from_flat(values: &[f32]) -> Result<Self, DetectionError> {
        let expected = HAND_LANDMARK_COUNT * 3;
        if values.len() != expected {
            return Err(DetectionError::Malformed(format!(
                "expected {expected} values, got {}",
                values.len()
            )));
        }
        let mut landmarks = [Landmark::default(); HAND_LANDMARK_COUNT];
        for (dst, chunk) in landmarks.iter_mut().zip(values.chunks_exact(3)) {
            *dst = Landmark::new(chunk[0], chunk[1], chunk[2]);
        }
        Self::new(landmarks)
    }

    #[inline]
    pub fn thumb_tip(&self) -> Landmark {
        self.landmarks[THUMB_TIP]
    }

    #[inline]
    pub fn index_tip(&self) -> Landmark {
        self.landmarks[INDEX_TIP]
    }
}

/// Per-frame landmark acquisition. Called once per frame with a monotonically
/// increasing timestamp; `Ok(None)` means no hand was in view.
pub trait LandmarkSource {
    fn detect(&mut self, timestamp_ms: f64) -> Result<Option<Hand>, DetectionError>;
}
