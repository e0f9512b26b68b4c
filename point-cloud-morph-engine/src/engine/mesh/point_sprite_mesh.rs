use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;

use crate::engine::point_cloud::PointCloud;

/// Vertices emitted per point: two triangles forming one quad.
pub const VERTICES_PER_POINT: usize = 6;

/// Quad corners in texture space, winding both triangles counter-clockwise.
const QUAD_CORNERS: [[f32; 2]; VERTICES_PER_POINT] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Marks the entity whose mesh mirrors the [`PointCloud`] buffer.
#[derive(Component, Debug, Clone, Copy)]
pub struct PointCloudRenderable {
    pub point_count: u32,
}

/// Create the sprite mesh for `positions`. Kept in the main world as well so
/// positions can be rewritten in place while the cloud animates.
pub fn create_point_sprite_mesh(positions: &[Vec3]) -> Mesh {
    let mut centres = Vec::with_capacity(positions.len() * VERTICES_PER_POINT);
    let mut corners = Vec::with_capacity(positions.len() * VERTICES_PER_POINT);
    for position in positions {
        for corner in QUAD_CORNERS {
            centres.push(position.to_array());
            corners.push(corner);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, centres)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
}

/// Overwrite the quad centres of `mesh` with `positions`. Returns false when
/// the mesh does not hold six float positions per point.
pub fn write_positions(mesh: &mut Mesh, positions: &[Vec3]) -> bool {
    let Some(VertexAttributeValues::Float32x3(centres)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    else {
        return false;
    };
    if centres.len() != positions.len() * VERTICES_PER_POINT {
        return false;
    }

    for (quad, position) in centres.chunks_exact_mut(VERTICES_PER_POINT).zip(positions) {
        quad.fill(position.to_array());
    }
    true
}

/// Upload the cloud into its sprite mesh whenever the transition engine
/// moved any point this frame.
pub fn sync_point_cloud_mesh(
    mut cloud: ResMut<PointCloud>,
    mut meshes: ResMut<Assets<Mesh>>,
    renderables: Query<&Mesh3d, With<PointCloudRenderable>>,
) {
    if !cloud.is_dirty() {
        return;
    }

    for mesh_handle in &renderables {
        if let Some(mesh) = meshes.get_mut(&mesh_handle.0) {
            if !write_positions(mesh, cloud.snapshot()) {
                warn!("Point sprite mesh does not match a cloud of {} points", cloud.len());
            }
        }
    }
    cloud.clear_dirty();
}
