//! Globe orientation driven by drag deltas, with an idle spin and an
//! independent cloud layer.

use crate::constants::{CLOUD_SPIN_RATE, IDLE_SPIN_RATE, MARKER_RADIUS, ROTATION_SENSITIVITY};
use crate::geo::{geo_to_point, GeoCoordinate};
use glam::{Quat, Vec2, Vec3};

/// Yaw about +Y, then pitch about +X, both in radians and unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)
    }

    #[inline]
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }

    #[inline]
    pub fn world_to_local(&self, world: Vec3) -> Vec3 {
        self.rotation().inverse() * world
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RotationParams {
    pub sensitivity: f32,
    pub idle_spin_rate: f32,
    pub cloud_spin_rate: f32,
    pub marker_radius: f32,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            sensitivity: ROTATION_SENSITIVITY,
            idle_spin_rate: IDLE_SPIN_RATE,
            cloud_spin_rate: CLOUD_SPIN_RATE,
            marker_radius: MARKER_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RotationInput {
    /// Frame-to-frame hand drag delta, normalized image units.
    pub gesture_delta: Option<Vec2>,
    /// Pointer-device drag accumulated since the last frame, normalized canvas units.
    pub manual_delta: Option<Vec2>,
    /// A pointer-device button is held on the globe, even if it did not move.
    pub manual_dragging: bool,
    pub elapsed_sec: f32,
}

#[derive(Clone, Debug, Default)]
pub struct RotationController {
    pub params: RotationParams,
    orientation: Orientation,
    cloud_yaw: f32,
    pinned: Option<GeoCoordinate>,
}

impl RotationController {
    pub fn new(params: RotationParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cloud_yaw(&self) -> f32 {
        self.cloud_yaw
    }

    pub fn pinned(&self) -> Option<GeoCoordinate> {
        self.pinned
    }

    /// Pinning only stops the idle spin; drags still rotate the globe.
    pub fn pin(&mut self, coord: GeoCoordinate) {
        log::info!("[pick] pinned {}", coord);
        self.pinned = Some(coord);
    }

    pub fn unpin(&mut self) -> Option<GeoCoordinate> {
        let prev = self.pinned.take();
        if let Some(coord) = prev {
            log::info!("[pick] unpinned {}", coord);
        }
        prev
    }

    /// Marker position in the globe's local frame, just above the surface.
    pub fn marker_local(&self) -> Option<Vec3> {
        self.pinned
            .map(|c| geo_to_point(c, self.params.marker_radius as f64).as_vec3())
    }

    pub fn marker_world(&self) -> Option<Vec3> {
        self.marker_local()
            .map(|p| self.orientation.local_to_world(p))
    }

    pub fn update(&mut self, input: &RotationInput) {
        let mut driven = false;
        for delta in [input.gesture_delta, input.manual_delta].into_iter().flatten() {
            self.apply_drag(delta);
            driven = true;
        }
        if !driven && !input.manual_dragging && self.pinned.is_none() {
            self.orientation.yaw += input.elapsed_sec * self.params.idle_spin_rate;
        }
        self.cloud_yaw += input.elapsed_sec * self.params.cloud_spin_rate;
    }

    #[inline]
    fn apply_drag(&mut self, delta: Vec2) {
        self.orientation.yaw += delta.x * self.params.sensitivity;
        self.orientation.pitch += delta.y * self.params.sensitivity;
    }
}

/// Pointer-device drag collected from input events between frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualDrag {
    last: Option<Vec2>,
    pending: Vec2,
}

impl ManualDrag {
    pub fn begin(&mut self, uv: Vec2) {
        self.last = Some(uv);
        self.pending = Vec2::ZERO;
    }

    pub fn move_to(&mut self, uv: Vec2) {
        if let Some(prev) = self.last {
            self.pending += uv - prev;
            self.last = Some(uv);
        }
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Drain the accumulated delta. `None` if nothing moved.
    pub fn take(&mut self) -> Option<Vec2> {
        let d = std::mem::take(&mut self.pending);
        (d != Vec2::ZERO).then_some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(elapsed_sec: f32) -> RotationInput {
        RotationInput {
            elapsed_sec,
            ..Default::default()
        }
    }

    #[test]
    fn idle_spin_advances_yaw() {
        let mut rc = RotationController::default();
        rc.update(&input(2.0));
        assert!((rc.orientation().yaw - 0.1).abs() < 1e-6);
        assert_eq!(rc.orientation().pitch, 0.0);
    }

    #[test]
    fn drag_is_scaled_and_unclamped() {
        let mut rc = RotationController::default();
        for _ in 0..10 {
            rc.update(&RotationInput {
                gesture_delta: Some(Vec2::new(-0.05, 0.1)),
                elapsed_sec: 0.016,
                ..Default::default()
            });
        }
        let o = rc.orientation();
        assert!((o.yaw - -5.0).abs() < 1e-4);
        assert!((o.pitch - 10.0).abs() < 1e-4);
    }

    #[test]
    fn zero_gesture_delta_still_suppresses_idle_spin() {
        let mut rc = RotationController::default();
        rc.update(&RotationInput {
            gesture_delta: Some(Vec2::ZERO),
            elapsed_sec: 1.0,
            ..Default::default()
        });
        assert_eq!(rc.orientation().yaw, 0.0);
    }

    #[test]
    fn pin_stops_spin_but_not_drag() {
        let mut rc = RotationController::default();
        rc.pin(GeoCoordinate::new(10.0, 20.0));
        rc.update(&input(5.0));
        assert_eq!(rc.orientation().yaw, 0.0);
        rc.update(&RotationInput {
            manual_delta: Some(Vec2::new(0.01, 0.0)),
            manual_dragging: true,
            elapsed_sec: 0.016,
            ..Default::default()
        });
        assert!((rc.orientation().yaw - 0.1).abs() < 1e-6);
        rc.unpin();
        rc.update(&input(1.0));
        assert!((rc.orientation().yaw - 0.15).abs() < 1e-6);
    }

    #[test]
    fn held_manual_drag_without_motion_holds_still() {
        let mut rc = RotationController::default();
        rc.update(&RotationInput {
            manual_dragging: true,
            elapsed_sec: 1.0,
            ..Default::default()
        });
        assert_eq!(rc.orientation().yaw, 0.0);
    }

    #[test]
    fn clouds_turn_regardless_of_input() {
        let mut rc = RotationController::default();
        rc.pin(GeoCoordinate::new(0.0, 0.0));
        rc.update(&RotationInput {
            gesture_delta: Some(Vec2::new(0.2, 0.0)),
            elapsed_sec: 0.5,
            ..Default::default()
        });
        rc.update(&input(0.5));
        assert!((rc.cloud_yaw() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn world_local_round_trip() {
        let o = Orientation {
            yaw: 1.3,
            pitch: -0.7,
        };
        let p = Vec3::new(0.3, -1.2, 1.5);
        let back = o.world_to_local(o.local_to_world(p));
        assert!((back - p).length() < 1e-5);
    }

    #[test]
    fn marker_follows_orientation() {
        let mut rc = RotationController::default();
        rc.pin(GeoCoordinate::new(0.0, 0.0));
        let local = rc.marker_local().unwrap();
        assert!((local - Vec3::new(0.0, 0.0, MARKER_RADIUS)).length() < 1e-5);
        rc.update(&RotationInput {
            gesture_delta: Some(Vec2::new(std::f32::consts::FRAC_PI_2 / 10.0, 0.0)),
            ..Default::default()
        });
        let world = rc.marker_world().unwrap();
        assert!((world - Vec3::new(MARKER_RADIUS, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn manual_drag_accumulates_between_frames() {
        let mut m = ManualDrag::default();
        assert_eq!(m.take(), None);
        m.begin(Vec2::new(0.5, 0.5));
        m.move_to(Vec2::new(0.52, 0.5));
        m.move_to(Vec2::new(0.55, 0.48));
        let d = m.take().unwrap();
        assert!((d - Vec2::new(0.05, -0.02)).length() < 1e-6);
        assert_eq!(m.take(), None);
        m.end();
        m.move_to(Vec2::new(0.9, 0.9));
        assert_eq!(m.take(), None);
        assert!(!m.is_dragging());
    }
}
