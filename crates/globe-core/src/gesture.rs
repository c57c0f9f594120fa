//! Pinch-drag state machine.
//!
//! The anchor holds the previous frame's smoothed pointer, so emitted deltas
//! are frame-to-frame. Net drag distance is not tracked.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTransition {
    Started,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureStep {
    /// `Some` on every pinching frame (zero on the entry frame), `None` otherwise.
    pub delta: Option<Vec2>,
    pub transition: Option<DragTransition>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    anchor: Option<Vec2>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        if self.anchor.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Advance one frame. A missing hand must be passed as `is_pinching = false`.
    pub fn step(&mut self, pointer: Vec2, is_pinching: bool) -> GestureStep {
        match (self.anchor, is_pinching) {
            (None, true) => {
                self.anchor = Some(pointer);
                GestureStep {
                    delta: Some(Vec2::ZERO),
                    transition: Some(DragTransition::Started),
                }
            }
            (Some(prev), true) => {
                self.anchor = Some(pointer);
                GestureStep {
                    delta: Some(pointer - prev),
                    transition: None,
                }
            }
            (Some(_), false) => {
                self.anchor = None;
                GestureStep {
                    delta: None,
                    transition: Some(DragTransition::Ended),
                }
            }
            (None, false) => GestureStep {
                delta: None,
                transition: None,
            },
        }
    }
}
