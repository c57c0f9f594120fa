// Scene and interaction constants used by the web frontend.

// Camera
// Z distance used by picking; the renderer is expected to use the same eye.
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Interaction
pub const CLICK_SLOP_PX: f32 = 4.0; // pointer travel below this still counts as a click
