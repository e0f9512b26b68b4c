pub const FOV_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Orbit distance at start-up, putting the camera at (0, 0, 6).
pub const START_DISTANCE: f32 = 6.0;
pub const MIN_DISTANCE: f32 = 1.5;
pub const MAX_DISTANCE: f32 = 60.0;
