//! Rendering of the morphing point cloud.
//!
//! The cloud is a single mesh drawn with [`PointSpriteMaterial`]; its vertex
//! positions are rewritten from the [`PointCloud`] buffer after the
//! transition engine advanced, never before.

/// Billboard sprite material and its vertex layout specialisation.
pub mod point_sprite_material;

use bevy::prelude::*;

use crate::engine::mesh::point_sprite_mesh::sync_point_cloud_mesh;
use crate::engine::point_cloud::PointCloud;
use crate::engine::transition::advance_transitions;
use point_sprite_material::PointSpriteMaterial;

pub struct PointSpriteRenderPlugin;

impl Plugin for PointSpriteRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PointSpriteMaterial>::default())
            .add_systems(
                Update,
                sync_point_cloud_mesh
                    .after(advance_transitions)
                    .run_if(resource_exists::<PointCloud>),
            );
    }
}
