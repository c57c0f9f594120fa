//! One globe session: gesture pipeline, rotation controller and pointer-device
//! drag, stepped once per frame.

use crate::error::{DetectionError, GeoError};
use crate::geo::{pick_to_geo, GeoCoordinate};
use crate::landmarks::Hand;
use crate::pipeline::{FrameReport, GestureParams, GesturePipeline};
use crate::pointer::PointerReader;
use crate::rotation::{ManualDrag, Orientation, RotationController, RotationInput, RotationParams};
use glam::{Vec2, Vec3};

pub struct Globe {
    pipeline: GesturePipeline,
    rotation: RotationController,
    manual: ManualDrag,
}

impl Default for Globe {
    fn default() -> Self {
        Self::new(GestureParams::default(), RotationParams::default())
    }
}

impl Globe {
    pub fn new(gesture: GestureParams, rotation: RotationParams) -> Self {
        let (pipeline, _) = GesturePipeline::new(gesture);
        Self {
            pipeline,
            rotation: RotationController::new(rotation),
            manual: ManualDrag::default(),
        }
    }

    pub fn pointer_reader(&self) -> PointerReader {
        self.pipeline.pointer_reader()
    }

    pub fn pipeline(&self) -> &GesturePipeline {
        &self.pipeline
    }

    pub fn rotation(&self) -> &RotationController {
        &self.rotation
    }

    pub fn orientation(&self) -> Orientation {
        self.rotation.orientation()
    }

    /// Pointer-device controls are disabled while a hand drag is active.
    pub fn manual_controls_enabled(&self) -> bool {
        !self.pipeline.pointer().active
    }

    pub fn begin_manual_drag(&mut self, uv: Vec2) -> bool {
        if !self.manual_controls_enabled() {
            return false;
        }
        self.manual.begin(uv);
        true
    }

    pub fn move_manual_drag(&mut self, uv: Vec2) {
        self.manual.move_to(uv);
    }

    pub fn end_manual_drag(&mut self) {
        self.manual.end();
    }

    /// Run one frame: classify, smooth, track, then rotate.
    pub fn frame(
        &mut self,
        detection: Result<Option<Hand>, DetectionError>,
        elapsed_sec: f32,
    ) -> FrameReport {
        let report = self.pipeline.process(detection);

        let manual_delta = self.manual.take();
        let (manual_delta, manual_dragging) = if report.pointer.active {
            self.manual.end();
            (None, false)
        } else {
            (manual_delta, self.manual.is_dragging())
        };

        self.rotation.update(&RotationInput {
            gesture_delta: report.delta,
            manual_delta,
            manual_dragging,
            elapsed_sec,
        });
        report
    }

    /// Convert a world-space hit on the globe into a coordinate and pin it.
    pub fn pick_world(&mut self, world_point: Vec3) -> Result<GeoCoordinate, GeoError> {
        let local = self.rotation.orientation().world_to_local(world_point);
        let coord = pick_to_geo(local.as_dvec3()).map_err(|e| {
            log::warn!("[pick] discarded: {}", e);
            e
        })?;
        self.rotation.pin(coord);
        Ok(coord)
    }

    pub fn unpin(&mut self) -> Option<GeoCoordinate> {
        self.rotation.unpin()
    }
}
