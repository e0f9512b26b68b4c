use std::time::Duration;

use bevy::prelude::*;
use constants::{morph, render_settings, transition};
use serde::{Deserialize, Serialize};

use crate::engine::assets::shape_set::ShapeId;
use crate::engine::transition::TransitionSettings;
use crate::engine::transition::easing::Easing;

/// Runtime configuration for the morph scene as a Bevy asset. Mirrors the
/// JSON structure of `morph_manifest.json`; every field falls back to the
/// shared constants when omitted.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphManifest {
    pub point_count: usize,
    pub spawn_half_extent: f32,
    pub model_scale: f32,
    pub transition: TransitionConfig,
    pub auto_cycle: AutoCycleConfig,
    pub sprite: SpriteConfig,
    pub background: BackgroundConfig,
    pub shapes: Vec<ShapeEntry>,
}

/// One target shape and the model its vertices come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeEntry {
    pub id: ShapeId,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoCycleConfig {
    pub enabled: bool,
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub texture: String,
    pub size: f32,
    pub opacity: f32,
    pub alpha_test: f32,
}

/// Hex colours of the horizontal background gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub left: String,
    pub right: String,
}

impl Default for MorphManifest {
    fn default() -> Self {
        Self {
            point_count: morph::POINT_COUNT,
            spawn_half_extent: morph::SPAWN_HALF_EXTENT,
            model_scale: morph::MODEL_SCALE,
            transition: TransitionConfig::default(),
            auto_cycle: AutoCycleConfig::default(),
            sprite: SpriteConfig::default(),
            background: BackgroundConfig::default(),
            shapes: default_shapes(),
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: transition::MIN_DURATION_MS,
            max_duration_ms: transition::MAX_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl Default for AutoCycleConfig {
    fn default() -> Self {
        Self {
            enabled: transition::AUTO_CYCLE_ENABLED,
            interval_ms: transition::AUTO_CYCLE_INTERVAL_MS,
        }
    }
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            texture: render_settings::SPRITE_TEXTURE.to_string(),
            size: render_settings::SPRITE_SIZE,
            opacity: render_settings::SPRITE_OPACITY,
            alpha_test: render_settings::SPRITE_ALPHA_TEST,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            left: render_settings::BACKGROUND_LEFT.to_string(),
            right: render_settings::BACKGROUND_RIGHT.to_string(),
        }
    }
}

fn default_shapes() -> Vec<ShapeEntry> {
    morph::DEFAULT_SHAPE_MODELS
        .iter()
        .filter_map(|(id, model)| {
            ShapeId::from_string(id).map(|id| ShapeEntry {
                id,
                model: (*model).to_string(),
            })
        })
        .collect()
}

impl MorphManifest {
    /// Engine timing derived from the transition and auto-cycle sections.
    pub fn transition_settings(&self) -> TransitionSettings {
        TransitionSettings {
            min_duration: Duration::from_millis(self.transition.min_duration_ms),
            max_duration: Duration::from_millis(self.transition.max_duration_ms),
            easing: self.transition.easing,
            auto_cycle: (self.auto_cycle.enabled && self.auto_cycle.interval_ms > 0)
                .then(|| Duration::from_millis(self.auto_cycle.interval_ms)),
        }
    }

    /// Gradient colours, each falling back to its default when the hex string
    /// does not parse.
    pub fn background_colours(&self) -> (Color, Color) {
        let parse = |hex: &str, fallback: &str| {
            Srgba::hex(hex)
                .or_else(|_| {
                    warn!("Invalid background colour '{}', using {}", hex, fallback);
                    Srgba::hex(fallback)
                })
                .map(Color::from)
                .unwrap_or(Color::BLACK)
        };
        (
            parse(&self.background.left, render_settings::BACKGROUND_LEFT),
            parse(&self.background.right, render_settings::BACKGROUND_RIGHT),
        )
    }

    /// Shapes listed in the manifest, first entry winning on duplicate ids.
    pub fn unique_shapes(&self) -> Vec<&ShapeEntry> {
        let mut seen = Vec::new();
        self.shapes
            .iter()
            .filter(|entry| {
                if seen.contains(&entry.id) {
                    warn!("Shape {} listed twice in manifest, keeping the first model", entry.id);
                    false
                } else {
                    seen.push(entry.id);
                    true
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_manifest_uses_shared_defaults() {
        let manifest: MorphManifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest, MorphManifest::default());
        assert_eq!(manifest.point_count, morph::POINT_COUNT);
        assert_eq!(
            manifest.shapes.iter().map(|s| s.id).collect::<Vec<_>>(),
            ShapeId::ALL.to_vec()
        );
    }

    #[test]
    fn shipped_manifest_matches_built_in_defaults() {
        let shipped: MorphManifest =
            serde_json::from_str(include_str!("../../../assets/morph_manifest.json")).unwrap();
        assert_eq!(shipped, MorphManifest::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let manifest: MorphManifest = serde_json::from_str(
            r#"{
                "point_count": 1000,
                "transition": { "max_duration_ms": 2000, "easing": "linear" },
                "auto_cycle": { "enabled": false },
                "shapes": [ { "id": "torus", "model": "models/ring.glb" } ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.point_count, 1000);
        assert_eq!(manifest.transition.min_duration_ms, transition::MIN_DURATION_MS);
        assert_eq!(manifest.shapes.len(), 1);

        let settings = manifest.transition_settings();
        assert_eq!(settings.max_duration, Duration::from_millis(2000));
        assert_eq!(settings.easing, Easing::Linear);
        assert_eq!(settings.auto_cycle, None);
    }

    #[test]
    fn unknown_shape_ids_are_rejected() {
        let parsed = serde_json::from_str::<MorphManifest>(
            r#"{ "shapes": [ { "id": "pyramid", "model": "models/p.glb" } ] }"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn duplicate_shapes_keep_the_first_entry() {
        let manifest = MorphManifest {
            shapes: vec![
                ShapeEntry { id: ShapeId::Cube, model: "a.glb".into() },
                ShapeEntry { id: ShapeId::Cube, model: "b.glb".into() },
            ],
            ..default()
        };
        let unique = manifest.unique_shapes();
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].model, "a.glb");
    }

    #[test]
    fn bad_background_hex_falls_back() {
        let manifest = MorphManifest {
            background: BackgroundConfig {
                left: "not-a-colour".into(),
                right: "#000000".into(),
            },
            ..default()
        };
        let (left, right) = manifest.background_colours();
        assert_eq!(left, Color::from(Srgba::hex(render_settings::BACKGROUND_LEFT).unwrap()));
        assert_eq!(right, Color::from(Srgba::hex("#000000").unwrap()));
    }
}
