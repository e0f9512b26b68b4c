/// Point sprite texture, relative to the asset root.
pub const SPRITE_TEXTURE: &str = "textures/white-dot.png";

/// World-space edge length of one point sprite.
pub const SPRITE_SIZE: f32 = 0.032;

pub const SPRITE_OPACITY: f32 = 0.8;

/// Fragments with texture alpha below this are discarded.
pub const SPRITE_ALPHA_TEST: f32 = 0.1;

/// Horizontal background gradient, left to right.
pub const BACKGROUND_LEFT: &str = "#4e22b7";
pub const BACKGROUND_RIGHT: &str = "#3292ff";

/// Cloud spin in radians per second around x, y and z.
pub const CLOUD_SPIN: [f32; 3] = [0.018, 0.06, 0.12];
