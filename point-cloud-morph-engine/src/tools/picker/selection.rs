use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::ray::{PickRay, PickVolume};
use crate::engine::assets::shape_set::ShapeId;
use crate::engine::scene::proxies::ShapeProxy;
use crate::engine::transition::{TriggerShapeEvent, TriggerSource};

/// A pickable proxy as seen by [`pick`].
#[derive(Debug, Clone, Copy)]
pub struct PickCandidate {
    pub shape: ShapeId,
    pub transform: GlobalTransform,
    pub volume: PickVolume,
}

/// Shape of the nearest candidate under `pointer`, or `None` on a miss.
/// Equal distances resolve to the shape earlier in round-robin order.
pub fn pick(
    pointer: Vec2,
    viewport_size: Vec2,
    world_from_clip: Mat4,
    candidates: impl IntoIterator<Item = PickCandidate>,
) -> Option<ShapeId> {
    let ray = PickRay::from_viewport(pointer, viewport_size, world_from_clip)?;

    let mut best: Option<(ShapeId, f32)> = None;
    for candidate in candidates {
        let Some(t) = candidate.volume.hit(&ray, &candidate.transform) else {
            continue;
        };
        let closer = match best {
            None => true,
            Some((shape, best_t)) => t < best_t || (t == best_t && candidate.shape < shape),
        };
        if closer {
            best = Some((candidate.shape, t));
        }
    }
    best.map(|(shape, _)| shape)
}

// Triggers the proxy under the cursor on left mouse press
pub fn pick_shape_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    proxies: Query<(&ShapeProxy, &GlobalTransform, &PickVolume)>,
    mut triggers: EventWriter<TriggerShapeEvent>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };
    let Some(viewport_size) = camera.logical_viewport_size() else {
        return;
    };

    let world_from_clip = cam_xf.compute_matrix() * camera.clip_from_view().inverse();
    let candidates = proxies.iter().map(|(proxy, xf, volume)| PickCandidate {
        shape: proxy.0,
        transform: *xf,
        volume: *volume,
    });

    if let Some(shape) = pick(cursor_pos, viewport_size, world_from_clip, candidates) {
        triggers.write(TriggerShapeEvent {
            shape,
            source: TriggerSource::Pointer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn world_from_clip() -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y);
        let projection =
            Mat4::perspective_infinite_reverse_rh(45f32.to_radians(), VIEWPORT.x / VIEWPORT.y, 0.1);
        (projection * view).inverse()
    }

    fn candidate(shape: ShapeId, at: Vec3, volume: PickVolume) -> PickCandidate {
        PickCandidate {
            shape,
            transform: GlobalTransform::from(Transform::from_translation(at)),
            volume,
        }
    }

    #[test]
    fn nearest_hit_wins() {
        let candidates = [
            candidate(ShapeId::Cube, Vec3::new(0.0, 0.0, -2.0), PickVolume::Box { size: Vec3::ONE }),
            candidate(ShapeId::Sphere, Vec3::new(0.0, 0.0, 1.0), PickVolume::Sphere { radius: 0.3 }),
        ];
        let picked = pick(VIEWPORT * 0.5, VIEWPORT, world_from_clip(), candidates);
        assert_eq!(picked, Some(ShapeId::Sphere));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let candidates = [candidate(
            ShapeId::Torus,
            Vec3::new(-3.2, -1.4, 0.0),
            PickVolume::Sphere { radius: 0.33 },
        )];
        assert_eq!(pick(VIEWPORT * 0.5, VIEWPORT, world_from_clip(), candidates), None);
        assert_eq!(pick(VIEWPORT * 0.5, VIEWPORT, world_from_clip(), []), None);
    }

    #[test]
    fn off_centre_pointer_reaches_side_proxies() {
        let at = Vec3::new(-1.5, 1.0, 0.0);
        let clip = world_from_clip().inverse().project_point3(at);
        let pointer = Vec2::new((clip.x + 1.0) * 0.5, (1.0 - clip.y) * 0.5) * VIEWPORT;

        let candidates = [
            candidate(ShapeId::Cube, at, PickVolume::Box { size: Vec3::splat(0.5) }),
            candidate(ShapeId::Sphere, Vec3::ZERO, PickVolume::Sphere { radius: 0.3 }),
        ];
        assert_eq!(pick(pointer, VIEWPORT, world_from_clip(), candidates), Some(ShapeId::Cube));
    }

    #[test]
    fn equal_distances_prefer_round_robin_order() {
        let volume = PickVolume::Sphere { radius: 0.5 };
        let candidates = [
            candidate(ShapeId::Torus, Vec3::ZERO, volume),
            candidate(ShapeId::Sphere, Vec3::ZERO, volume),
        ];
        assert_eq!(
            pick(VIEWPORT * 0.5, VIEWPORT, world_from_clip(), candidates),
            Some(ShapeId::Sphere)
        );
    }
}
