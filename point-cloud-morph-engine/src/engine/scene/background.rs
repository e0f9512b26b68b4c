use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use crate::constants::scene::BACKGROUND_DISTANCE;

/// Camera-locked plane showing the horizontal background gradient.
#[derive(Component)]
pub struct BackgroundGradient;

/// Unit quad with `left` on its -x edge blending into `right` on its +x edge.
pub fn create_gradient_mesh(left: Color, right: Color) -> Mesh {
    let left = left.to_linear().to_f32_array();
    let right = right.to_linear().to_f32_array();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![
                [-0.5, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
                [-0.5, 0.5, 0.0],
            ],
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; 4])
        .with_inserted_attribute(
            Mesh::ATTRIBUTE_UV_0,
            vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, vec![left, right, right, left])
        .with_inserted_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]))
}

pub fn spawn_background(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    colours: (Color, Color),
) {
    commands.spawn((
        Mesh3d(meshes.add(create_gradient_mesh(colours.0, colours.1))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
        BackgroundGradient,
    ));
}

/// Width and height a plane `distance` ahead of the camera needs to fill the
/// view, with a small margin against edge gaps while the camera eases.
pub fn background_extent(fov: f32, aspect_ratio: f32, distance: f32) -> Vec2 {
    let height = 2.0 * distance * (fov * 0.5).tan();
    Vec2::new(height * aspect_ratio, height) * 1.1
}

// Keep the gradient behind everything and covering the view after resizes
pub fn fit_background_to_view(
    cameras: Query<(&Transform, &Projection), (With<Camera3d>, Without<BackgroundGradient>)>,
    mut backgrounds: Query<&mut Transform, With<BackgroundGradient>>,
) {
    let Ok((camera_transform, Projection::Perspective(perspective))) = cameras.single() else {
        return;
    };
    let extent = background_extent(perspective.fov, perspective.aspect_ratio, BACKGROUND_DISTANCE);

    for mut transform in &mut backgrounds {
        transform.translation =
            camera_transform.translation + camera_transform.forward() * BACKGROUND_DISTANCE;
        transform.rotation = camera_transform.rotation;
        transform.scale = extent.extend(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn extent_covers_the_frustum_slice() {
        let extent = background_extent(90f32.to_radians(), 2.0, 10.0);
        assert!(extent.y >= 20.0);
        assert!(extent.x >= 40.0);
    }

    #[test]
    fn gradient_runs_left_to_right() {
        let mesh = create_gradient_mesh(Color::BLACK, Color::WHITE);
        let Some(VertexAttributeValues::Float32x4(colours)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("gradient mesh lost its colours");
        };
        assert_eq!(colours[0], colours[3]);
        assert_eq!(colours[1], [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(colours[0], [0.0, 0.0, 0.0, 1.0]);
    }
}
