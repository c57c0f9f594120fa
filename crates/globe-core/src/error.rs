//! Error kinds raised inside the core.
//!
//! None of these reach a user-facing surface: detection failures degrade to
//! "no hand this frame" and degenerate picks are dropped by the caller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectionError {
    /// The landmark source itself reported a failure for this frame.
    #[error("landmark source failed: {0}")]
    Source(String),
    /// The source returned data that does not describe a 21-point hand.
    #[error("malformed landmark data: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("pick point cannot be normalized (length {length})")]
    DegenerateGeometry { length: f64 },
}
