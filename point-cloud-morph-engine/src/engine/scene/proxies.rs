use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::constants::scene::{
    PROXY_ACTIVE_COLOUR, PROXY_COLUMN_X, PROXY_CUBE_SIZE, PROXY_IDLE_COLOUR, PROXY_SPACING,
    PROXY_SPHERE_RADIUS, PROXY_TORUS_MAJOR_RADIUS, PROXY_TORUS_MINOR_RADIUS,
};
use crate::engine::assets::shape_set::ShapeId;
use crate::engine::transition::ShapeChangedEvent;
use crate::tools::picker::PickVolume;

/// Static clickable stand-in for a shape.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeProxy(pub ShapeId);

/// Proxies stack top to bottom in round-robin order, left of the cloud.
pub fn proxy_transform(shape: ShapeId) -> Transform {
    let y = PROXY_SPACING * (1.0 - shape.order() as f32);
    let transform = Transform::from_xyz(PROXY_COLUMN_X, y, 0.0);
    match shape {
        // Stand the ring up so it faces the camera.
        ShapeId::Torus => transform.with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        _ => transform,
    }
}

pub fn proxy_mesh(shape: ShapeId) -> Mesh {
    match shape {
        ShapeId::Cube => Cuboid::from_size(Vec3::splat(PROXY_CUBE_SIZE)).into(),
        ShapeId::Sphere => Sphere::new(PROXY_SPHERE_RADIUS).mesh().uv(32, 18),
        ShapeId::Torus => Torus {
            minor_radius: PROXY_TORUS_MINOR_RADIUS,
            major_radius: PROXY_TORUS_MAJOR_RADIUS,
        }
        .into(),
    }
}

/// Pick volume enclosing the proxy mesh. The torus uses its bounding sphere.
pub fn proxy_pick_volume(shape: ShapeId) -> PickVolume {
    match shape {
        ShapeId::Cube => PickVolume::Box {
            size: Vec3::splat(PROXY_CUBE_SIZE),
        },
        ShapeId::Sphere => PickVolume::Sphere {
            radius: PROXY_SPHERE_RADIUS,
        },
        ShapeId::Torus => PickVolume::Sphere {
            radius: PROXY_TORUS_MAJOR_RADIUS + PROXY_TORUS_MINOR_RADIUS,
        },
    }
}

pub fn proxy_colour(shape: ShapeId, active: Option<ShapeId>) -> Color {
    let [r, g, b] = if active == Some(shape) {
        PROXY_ACTIVE_COLOUR
    } else {
        PROXY_IDLE_COLOUR
    };
    Color::srgb(r, g, b)
}

pub fn spawn_shape_proxies(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    shapes: &[ShapeId],
) {
    for &shape in shapes {
        commands.spawn((
            Mesh3d(meshes.add(proxy_mesh(shape))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: proxy_colour(shape, None),
                perceptual_roughness: 0.6,
                ..default()
            })),
            proxy_transform(shape),
            proxy_pick_volume(shape),
            ShapeProxy(shape),
        ));
    }
    info!("Spawned {} shape proxies", shapes.len());
}

// Tint the proxy of the shape the cloud is heading for
pub fn highlight_active_proxy(
    mut changed: EventReader<ShapeChangedEvent>,
    proxies: Query<(&ShapeProxy, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(active) = changed.read().last().map(|event| event.shape) else {
        return;
    };
    for (proxy, material) in &proxies {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = proxy_colour(proxy.0, Some(active));
        }
    }
}
