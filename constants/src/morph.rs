/// Number of points in the cloud. Fixed for the lifetime of the process.
pub const POINT_COUNT: usize = 26_016;

/// Half extent of the cube the initial positions are drawn from, per axis.
pub const SPAWN_HALF_EXTENT: f32 = 4.0;

/// Uniform scale applied to every model vertex before it becomes a target.
pub const MODEL_SCALE: f32 = 0.5;

/// Location of the optional runtime manifest, relative to the asset root.
pub const MANIFEST_PATH: &str = "morph_manifest.json";

/// Default model per shape id, in round-robin order.
pub const DEFAULT_SHAPE_MODELS: &[(&str, &str)] = &[
    ("cube", "models/box.gltf"),
    ("sphere", "models/sphere.gltf"),
    ("torus", "models/torus.gltf"),
];
