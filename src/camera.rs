use glam::{Mat4, Vec3, Vec4};

/// Fixed look-at camera: eye on +Z looking at the origin, +Y up.
#[derive(Clone, Copy, Debug)]
pub struct PickCamera {
    pub camera_z: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PickCamera {
    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.camera_z)
    }

    fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fovy_radians, aspect, self.znear, self.zfar);
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        proj * view
    }

    #[inline]
    /// Compute a world-space ray from canvas pixel coordinates.
    ///
    /// - `width`, `height`: canvas backing store size in pixels
    /// - `sx`, `sy`: pixel coordinates in the same space, origin top-left
    ///
    /// Returns `(ray_origin, ray_direction)` in world space.
    pub fn screen_to_world_ray(&self, width: f32, height: f32, sx: f32, sy: f32) -> (Vec3, Vec3) {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let ndc_x = (2.0 * sx / width) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height);
        let inv = self.view_proj(width / height).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye();
        let rd = (p1 - ro).normalize();
        (ro, rd)
    }

    /// World-space point where the pixel's ray first meets a sphere at the origin.
    pub fn pick_sphere(&self, width: f32, height: f32, sx: f32, sy: f32, radius: f32) -> Option<Vec3> {
        let (ro, rd) = self.screen_to_world_ray(width, height, sx, sy);
        ray_sphere(ro, rd, Vec3::ZERO, radius).map(|t| ro + rd * t)
    }
}

/// Distance along a unit-length ray to a sphere surface, or `None` on a miss.
/// From inside the sphere this is the exit point; spheres behind the ray miss.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let rel = origin - center;
    let half_b = dir.dot(rel);
    let disc = half_b * half_b - (rel.length_squared() - radius * radius);
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    [-half_b - root, -half_b + root].into_iter().find(|t| *t >= 0.0)
}
