use bevy::prelude::*;

/// Loading stage checkpoints, each flipped once by the system that owns it.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_resolved: bool,
    pub point_cloud_created: bool,
    pub models_requested: bool,
    pub shapes_ready: bool,
}
