use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfMesh};
use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;

use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::assets::shape_set::ShapeId;
use crate::engine::errors::MorphError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::transition::TransitionEngine;

/// Sent exactly once, when the last expected shape resolved either way.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ShapesReadyEvent {
    pub loaded: Vec<ShapeId>,
    pub failed: Vec<ShapeId>,
}

/// A glTF load that has not resolved yet.
#[derive(Debug, Clone)]
pub struct PendingModel {
    pub shape: ShapeId,
    pub resource: String,
    pub handle: Handle<Gltf>,
}

/// In-flight model loads, one per shape. Loads overlap and resolve in
/// whatever order the asset server finishes them.
#[derive(Resource, Default)]
pub struct ModelSource {
    pending: Vec<PendingModel>,
}

impl ModelSource {
    /// Start loading `resource` as the model for `shape`. Returns immediately.
    pub fn load(&mut self, shape: ShapeId, resource: &str, asset_server: &AssetServer) {
        info!("Loading {} model from {}", shape, resource);
        self.pending.push(PendingModel {
            shape,
            resource: resource.to_string(),
            handle: asset_server.load(resource.to_string()),
        });
    }

    /// Remove and return every load that reached a terminal state, paired
    /// with its extracted positions or the reason it failed.
    pub fn poll(
        &mut self,
        asset_server: &AssetServer,
        gltfs: &Assets<Gltf>,
        gltf_meshes: &Assets<GltfMesh>,
        meshes: &Assets<Mesh>,
        scale: f32,
    ) -> Vec<(ShapeId, Result<Vec<Vec3>, MorphError>)> {
        let mut resolved = Vec::new();
        self.pending.retain(|pending| {
            let outcome = if let Some(LoadState::Failed(err)) =
                asset_server.get_load_state(&pending.handle)
            {
                Err(MorphError::AssetLoad {
                    shape: pending.shape,
                    resource: pending.resource.clone(),
                    reason: err.to_string(),
                })
            } else if asset_server.is_loaded_with_dependencies(&pending.handle) {
                extract_model_positions(pending, gltfs, gltf_meshes, meshes, scale)
            } else {
                return true;
            };
            resolved.push((pending.shape, outcome));
            false
        });
        resolved
    }
}

fn extract_model_positions(
    pending: &PendingModel,
    gltfs: &Assets<Gltf>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
    scale: f32,
) -> Result<Vec<Vec3>, MorphError> {
    let gltf = gltfs.get(&pending.handle).ok_or_else(|| MorphError::AssetLoad {
        shape: pending.shape,
        resource: pending.resource.clone(),
        reason: "asset reported loaded but is missing from storage".to_string(),
    })?;

    let primitives = gltf
        .meshes
        .iter()
        .filter_map(|handle| gltf_meshes.get(handle))
        .flat_map(|gltf_mesh| gltf_mesh.primitives.iter())
        .filter_map(|primitive| meshes.get(&primitive.mesh));

    let positions = collect_positions(primitives, scale);
    if positions.is_empty() {
        return Err(MorphError::EmptyModel {
            shape: pending.shape,
            resource: pending.resource.clone(),
        });
    }
    Ok(positions)
}

/// Concatenate the vertex positions of `meshes` in order, uniformly scaled.
/// Meshes without a float position attribute contribute nothing.
pub fn collect_positions<'a>(meshes: impl IntoIterator<Item = &'a Mesh>, scale: f32) -> Vec<Vec3> {
    let mut positions = Vec::new();
    for mesh in meshes {
        if let Some(VertexAttributeValues::Float32x3(values)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        {
            positions.extend(values.iter().map(|p| Vec3::from_array(*p) * scale));
        }
    }
    positions
}

/// Counts shape resolutions and reports completion once all expected shapes
/// resolved, regardless of arrival order.
#[derive(Resource, Debug, Default)]
pub struct ShapeLoadTracker {
    expected: Option<usize>,
    loaded: Vec<ShapeId>,
    failed: Vec<ShapeId>,
    signalled: bool,
}

impl ShapeLoadTracker {
    /// Arm the tracker for `count` shapes. Zero completes on the next poll.
    pub fn expect(&mut self, count: usize) {
        self.expected = Some(count);
    }

    /// Record one resolution. A shape resolving twice is ignored.
    pub fn record(&mut self, shape: ShapeId, success: bool) {
        if self.loaded.contains(&shape) || self.failed.contains(&shape) {
            warn!("Shape {} resolved twice, ignoring the repeat", shape);
            return;
        }
        if success {
            self.loaded.push(shape);
        } else {
            self.failed.push(shape);
        }
    }

    pub fn resolved(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }

    /// The completion signal, returned at most once over the tracker's life.
    pub fn take_ready(&mut self) -> Option<ShapesReadyEvent> {
        let expected = self.expected?;
        if self.signalled || self.resolved() < expected {
            return None;
        }
        self.signalled = true;
        Some(ShapesReadyEvent {
            loaded: self.loaded.clone(),
            failed: self.failed.clone(),
        })
    }
}

// Queue one glTF load per manifest shape once the cloud exists
pub fn request_shape_models(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest: Option<Res<MorphManifest>>,
    mut model_source: ResMut<ModelSource>,
    mut tracker: ResMut<ShapeLoadTracker>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.models_requested || !loading_progress.point_cloud_created {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    let shapes = manifest.unique_shapes();
    for entry in &shapes {
        model_source.load(entry.id, &entry.model, &asset_server);
    }
    tracker.expect(shapes.len());
    loading_progress.models_requested = true;
}

// Register finished models with the engine and report when all resolved
pub fn poll_shape_models(
    mut model_source: ResMut<ModelSource>,
    mut tracker: ResMut<ShapeLoadTracker>,
    mut engine: ResMut<TransitionEngine>,
    mut ready_events: EventWriter<ShapesReadyEvent>,
    manifest: Res<MorphManifest>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
) {
    let resolved = model_source.poll(
        &asset_server,
        &gltfs,
        &gltf_meshes,
        &meshes,
        manifest.model_scale,
    );

    for (shape, outcome) in resolved {
        let registered = outcome.and_then(|positions| engine.register_shape_data(shape, positions));
        match registered {
            Ok(()) => tracker.record(shape, true),
            Err(err) => {
                error!("{}", err);
                tracker.record(shape, false);
            }
        }
    }

    if let Some(ready) = tracker.take_ready() {
        ready_events.write(ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::PrimitiveTopology;
    use bevy::render::render_asset::RenderAssetUsages;

    fn mesh_with_positions(positions: Vec<[f32; 3]>) -> Mesh {
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    }

    #[test]
    fn positions_are_concatenated_and_scaled() {
        let first = mesh_with_positions(vec![[2.0, 0.0, 0.0], [0.0, 4.0, 0.0]]);
        let bare = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        let second = mesh_with_positions(vec![[0.0, 0.0, -6.0]]);

        let positions = collect_positions([&first, &bare, &second], 0.5);
        assert_eq!(
            positions,
            vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
                Vec3::new(0.0, 0.0, -3.0),
            ]
        );
    }

    #[test]
    fn meshes_without_positions_yield_nothing() {
        let bare = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        assert!(collect_positions([&bare], 0.5).is_empty());
    }

    #[test]
    fn tracker_fires_once_after_the_last_resolution() {
        let mut tracker = ShapeLoadTracker::default();
        tracker.record(ShapeId::Torus, true);
        assert_eq!(tracker.take_ready(), None, "not armed yet");

        tracker.expect(3);
        tracker.record(ShapeId::Cube, false);
        assert_eq!(tracker.take_ready(), None);

        tracker.record(ShapeId::Sphere, true);
        let ready = tracker.take_ready().unwrap();
        assert_eq!(ready.loaded, vec![ShapeId::Torus, ShapeId::Sphere]);
        assert_eq!(ready.failed, vec![ShapeId::Cube]);

        assert_eq!(tracker.take_ready(), None);
    }

    #[test]
    fn tracker_ignores_repeated_resolutions() {
        let mut tracker = ShapeLoadTracker::default();
        tracker.expect(2);
        tracker.record(ShapeId::Cube, true);
        tracker.record(ShapeId::Cube, false);
        assert_eq!(tracker.resolved(), 1);
        assert_eq!(tracker.take_ready(), None);
    }

    #[test]
    fn model_requests_wait_for_the_manifest() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .insert_resource(LoadingProgress {
                manifest_resolved: false,
                point_cloud_created: true,
                ..default()
            })
            .init_resource::<ModelSource>()
            .init_resource::<ShapeLoadTracker>()
            .add_systems(Update, request_shape_models);

        app.update();
        app.update();
        assert!(!app.world().resource::<LoadingProgress>().models_requested);

        app.insert_resource(MorphManifest {
            shapes: Vec::new(),
            ..default()
        });
        app.update();
        assert!(app.world().resource::<LoadingProgress>().models_requested);
        let ready = app.world_mut().resource_mut::<ShapeLoadTracker>().take_ready();
        assert_eq!(ready, Some(ShapesReadyEvent { loaded: vec![], failed: vec![] }));
    }

    #[test]
    fn tracker_with_nothing_to_load_completes_immediately() {
        let mut tracker = ShapeLoadTracker::default();
        tracker.expect(0);
        let ready = tracker.take_ready().unwrap();
        assert!(ready.loaded.is_empty() && ready.failed.is_empty());
    }
}
