// Shared gesture/rotation tuning constants used by both web and native frontends.

// Landmark layout (21-point hand model)
pub const HAND_LANDMARK_COUNT: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

// Pinch classification
pub const PINCH_THRESHOLD: f32 = 0.15; // strict: d < threshold is a pinch
pub const PINCH_STRENGTH_RANGE: f32 = 0.30; // distance at which strength reads 0%

// Pointer smoothing
pub const SMOOTHING_ALPHA: f32 = 0.2; // new = old + (raw - old) * alpha
pub const POINTER_CENTER: [f32; 2] = [0.5, 0.5]; // start-of-process pointer position

// Rotation
pub const ROTATION_SENSITIVITY: f32 = 10.0; // radians per normalized unit of drag
pub const IDLE_SPIN_RATE: f32 = 0.05; // radians per second of yaw while idle
pub const CLOUD_SPIN_RATE: f32 = 0.02; // radians per second, independent layer

// Globe geometry (world units)
pub const GLOBE_RADIUS: f32 = 2.0;
pub const MARKER_RADIUS: f32 = 2.05; // floats just above the surface
