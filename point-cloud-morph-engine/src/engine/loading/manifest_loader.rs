use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::morph::MANIFEST_PATH;

use crate::engine::assets::morph_manifest::MorphManifest;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<MorphManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Insert the manifest as a resource once it parsed, or the built-in
/// defaults when the file is missing or malformed.
pub fn resolve_manifest(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<MorphManifest>>,
) {
    if loading_progress.manifest_resolved {
        return;
    }

    let manifest = match &manifest_loader.handle {
        Some(handle) => {
            if let Some(manifest) = manifests.get(handle) {
                info!("✓ Manifest loaded from {}", MANIFEST_PATH);
                manifest.clone()
            } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
                warn!("Manifest unavailable ({}), using built-in defaults", err);
                MorphManifest::default()
            } else {
                return;
            }
        }
        None => MorphManifest::default(),
    };

    commands.insert_resource(manifest);
    loading_progress.manifest_resolved = true;
}
