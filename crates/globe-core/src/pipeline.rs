//! Landmark frame -> pinch + smoothed pointer -> drag delta.

use crate::constants::{PINCH_STRENGTH_RANGE, PINCH_THRESHOLD, POINTER_CENTER, SMOOTHING_ALPHA};
use crate::error::DetectionError;
use crate::gesture::{DragPhase, DragTransition, GestureTracker};
use crate::landmarks::Hand;
use crate::pinch::{PinchClassifier, PinchReading};
use crate::pointer::{pointer_cell, PointerReader, PointerState, PointerWriter};
use crate::smoothing::{raw_pointer, PointerSmoother};
use glam::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct GestureParams {
    pub pinch_threshold: f32,
    pub pinch_strength_range: f32,
    pub smoothing_alpha: f32,
    pub pointer_start: Vec2,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            pinch_threshold: PINCH_THRESHOLD,
            pinch_strength_range: PINCH_STRENGTH_RANGE,
            smoothing_alpha: SMOOTHING_ALPHA,
            pointer_start: Vec2::from(POINTER_CENTER),
        }
    }
}

/// Everything a front-end may want to show or log about one processed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub pointer: PointerState,
    pub hand_present: bool,
    pub pinch: Option<PinchReading>,
    /// Percent, only when a hand was seen.
    pub pinch_strength: Option<f32>,
    pub delta: Option<Vec2>,
    pub transition: Option<DragTransition>,
}

pub struct GesturePipeline {
    classifier: PinchClassifier,
    smoother: PointerSmoother,
    tracker: GestureTracker,
    pointer: PointerWriter,
}

impl GesturePipeline {
    /// Returns the pipeline together with a reader for its pointer cell.
    pub fn new(params: GestureParams) -> (Self, PointerReader) {
        let (writer, reader) = pointer_cell();
        let pipeline = Self {
            classifier: PinchClassifier {
                threshold: params.pinch_threshold,
                strength_range: params.pinch_strength_range,
            },
            smoother: PointerSmoother::new(params.smoothing_alpha, params.pointer_start),
            tracker: GestureTracker::new(),
            pointer: writer,
        };
        (pipeline, reader)
    }

    pub fn pointer_reader(&self) -> PointerReader {
        self.pointer.reader()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.current()
    }

    pub fn phase(&self) -> DragPhase {
        self.tracker.phase()
    }

    pub fn drag_anchor(&self) -> Option<Vec2> {
        self.tracker.anchor()
    }

    /// Process one frame. A failed detection counts as "no hand".
    pub fn process(&mut self, detection: Result<Option<Hand>, DetectionError>) -> FrameReport {
        let hand = detection.unwrap_or_else(|e| {
            log::debug!("[gesture] detection failed, frame treated as hand-absent: {}", e);
            None
        });

        let pinch = self.classifier.classify(hand.as_ref());
        let position = match &hand {
            Some(h) => self.smoother.update(raw_pointer(h)),
            None => self.smoother.current(),
        };
        let is_pinching = pinch.is_some_and(|p| p.is_pinching);
        let step = self.tracker.step(position, is_pinching);

        match step.transition {
            Some(DragTransition::Started) => log::info!(
                "[gesture] drag start at ({:.3},{:.3})",
                position.x,
                position.y
            ),
            Some(DragTransition::Ended) => log::info!("[gesture] drag end"),
            None => {}
        }

        let state = PointerState {
            x: position.x,
            y: position.y,
            active: is_pinching,
        };
        self.pointer.publish(state);

        FrameReport {
            pointer: state,
            hand_present: hand.is_some(),
            pinch,
            pinch_strength: pinch.map(|p| self.classifier.strength(p.distance)),
            delta: step.delta,
            transition: step.transition,
        }
    }
}
