use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::mesh::point_sprite_mesh::{PointCloudRenderable, create_point_sprite_mesh};
use crate::engine::point_cloud::PointCloud;
use crate::engine::render::point_sprite_material::PointSpriteMaterial;
use crate::engine::scene::background::spawn_background;
use crate::engine::scene::cloud_spin::CloudSpin;
use crate::engine::scene::proxies::spawn_shape_proxies;
use crate::engine::transition::TransitionEngine;
use constants::render_settings::CLOUD_SPIN;

/// Scatter the cloud, create the engine and spawn everything drawn around it
/// once the manifest is known. Model loads start on the next step.
pub fn create_point_cloud_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    manifest: Option<Res<MorphManifest>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut sprite_materials: ResMut<Assets<PointSpriteMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.point_cloud_created || !loading_progress.manifest_resolved {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    let mut rng = StdRng::from_entropy();
    let cloud = PointCloud::random_in_cube(manifest.point_count, manifest.spawn_half_extent, &mut rng);
    let engine = TransitionEngine::new(
        cloud.len(),
        manifest.transition_settings(),
        StdRng::seed_from_u64(rng.r#gen()),
    );

    let sprite_texture = asset_server.load(manifest.sprite.texture.clone());
    spawn_point_cloud_entity(
        &mut commands,
        &mut meshes,
        &mut sprite_materials,
        &cloud,
        PointSpriteMaterial::new(&manifest.sprite, sprite_texture),
    );

    let shapes: Vec<_> = manifest.unique_shapes().iter().map(|entry| entry.id).collect();
    spawn_shape_proxies(&mut commands, &mut meshes, &mut standard_materials, &shapes);
    spawn_background(
        &mut commands,
        &mut meshes,
        &mut standard_materials,
        manifest.background_colours(),
    );

    commands.insert_resource(cloud);
    commands.insert_resource(engine);
    loading_progress.point_cloud_created = true;
    info!("Point cloud and scene elements ready");
}

fn spawn_point_cloud_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<PointSpriteMaterial>,
    cloud: &PointCloud,
    material: PointSpriteMaterial,
) {
    let mesh = create_point_sprite_mesh(cloud.snapshot());

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(material)),
        Transform::default(),
        PointCloudRenderable {
            point_count: cloud.len() as u32,
        },
        CloudSpin::new(Vec3::from_array(CLOUD_SPIN)),
        // Points move every frame, so the mesh bounds computed at spawn go stale.
        NoFrustumCulling,
        NotShadowCaster,
    ));

    info!("Point cloud entity spawned with {} sprites", cloud.len());
}
