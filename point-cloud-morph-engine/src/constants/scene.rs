/// Horizontal offset of the proxy column, left of the cloud.
pub const PROXY_COLUMN_X: f32 = -3.2;
/// Vertical spacing between consecutive proxies.
pub const PROXY_SPACING: f32 = 1.4;
pub const PROXY_CUBE_SIZE: f32 = 0.5;
pub const PROXY_SPHERE_RADIUS: f32 = 0.3;
pub const PROXY_TORUS_MINOR_RADIUS: f32 = 0.08;
pub const PROXY_TORUS_MAJOR_RADIUS: f32 = 0.25;
pub const PROXY_IDLE_COLOUR: [f32; 3] = [0.85, 0.85, 0.95];
pub const PROXY_ACTIVE_COLOUR: [f32; 3] = [1.0, 0.78, 0.25];

/// Distance from the camera at which the background plane sits, inside the
/// far plane.
pub const BACKGROUND_DISTANCE: f32 = 900.0;

pub const AXES_LENGTH: f32 = 50.0;
