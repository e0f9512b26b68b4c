//! Start-up loading pipeline.
//!
//! Resolves the optional manifest, scatters the cloud and spawns the scene,
//! then loads every shape model concurrently. The app enters `Running` once
//! all models resolved, whether they loaded or failed.
//!
//! ```text
//! start_loading
//!   └─> resolve_manifest            (file or built-in defaults)
//!         └─> create_point_cloud_when_ready
//!               └─> request_shape_models
//!                     └─> poll_shape_models ──> ShapesReadyEvent
//!                           └─> finish_loading (first trigger, Running)
//! ```

/// Manifest asset loading with fallback to built-in defaults.
pub mod manifest_loader;

/// glTF shape loads, vertex extraction and the completion tracker.
pub mod model_source;

/// Point cloud, engine and scene element creation.
pub mod point_cloud_creator;

/// Loading checkpoints consulted by the staged systems.
pub mod progress;

use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::core::app_state::{AppState, finish_loading};
use crate::engine::transition::TransitionEngine;
use manifest_loader::{ManifestLoader, resolve_manifest, start_loading};
use model_source::{
    ModelSource, ShapeLoadTracker, ShapesReadyEvent, poll_shape_models, request_shape_models,
};
use point_cloud_creator::create_point_cloud_when_ready;
use progress::LoadingProgress;

/// Registers the manifest asset and runs the staged loading systems while the
/// app is in [`AppState::Loading`]. Expects the state to be initialised.
pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(JsonAssetPlugin::<MorphManifest>::new(&["json"]))
            .init_resource::<LoadingProgress>()
            .init_resource::<ManifestLoader>()
            .init_resource::<ModelSource>()
            .init_resource::<ShapeLoadTracker>()
            .add_event::<ShapesReadyEvent>()
            .add_systems(Startup, start_loading)
            .add_systems(
                Update,
                (
                    resolve_manifest,
                    create_point_cloud_when_ready,
                    request_shape_models,
                    poll_shape_models
                        .run_if(resource_exists::<MorphManifest>)
                        .run_if(resource_exists::<TransitionEngine>),
                    finish_loading.run_if(resource_exists::<TransitionEngine>),
                )
                    .chain()
                    .run_if(in_state(AppState::Loading)),
            );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::asset::AssetMetaCheck;
    use bevy::gltf::{Gltf, GltfMesh};
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::engine::assets::shape_set::ShapeId;
    use crate::engine::point_cloud::PointCloud;
    use crate::engine::render::point_sprite_material::PointSpriteMaterial;
    use crate::engine::transition::TransitionPlugin;

    #[derive(Resource, Default)]
    struct ReadySignals(Vec<ShapesReadyEvent>);

    fn record_ready(mut events: EventReader<ShapesReadyEvent>, mut signals: ResMut<ReadySignals>) {
        signals.0.extend(events.read().cloned());
    }

    // No glTF or image loaders are registered, so every model load fails.
    fn headless_loading_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                meta_check: AssetMetaCheck::Never,
                ..default()
            },
            StatesPlugin,
        ))
        .init_state::<AppState>()
        .init_asset::<Mesh>()
        .init_asset::<Image>()
        .init_asset::<StandardMaterial>()
        .init_asset::<PointSpriteMaterial>()
        .init_asset::<Gltf>()
        .init_asset::<GltfMesh>()
        .add_plugins((TransitionPlugin, LoadingPlugin))
        .init_resource::<ReadySignals>()
        .add_systems(Update, record_ready);
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn loading_runs_through_to_running_when_models_fail() {
        let mut app = headless_loading_app();

        for _ in 0..2_000 {
            app.update();
            if state(&app) == AppState::Running {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(state(&app), AppState::Running);

        let progress = app.world().resource::<LoadingProgress>();
        assert!(progress.manifest_resolved);
        assert!(progress.point_cloud_created);
        assert!(progress.models_requested);
        assert!(progress.shapes_ready);

        let signals = &app.world().resource::<ReadySignals>().0;
        assert_eq!(signals.len(), 1);
        assert!(signals[0].loaded.is_empty());
        assert_eq!(signals[0].failed.len(), ShapeId::ALL.len());

        let manifest = app.world().resource::<MorphManifest>();
        assert_eq!(app.world().resource::<PointCloud>().len(), manifest.point_count);
        assert_eq!(app.world().resource::<TransitionEngine>().current_shape(), None);
    }
}
