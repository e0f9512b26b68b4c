use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
};

use crate::engine::assets::morph_manifest::SpriteConfig;

const SHADER_PATH: &str = "shaders/point_sprite.wgsl";

/// Camera-facing textured sprite drawn for every point of the cloud.
///
/// `params` packs `[size, opacity, alpha_test, 0]`. Fragments whose texel
/// alpha falls below `alpha_test` are discarded.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointSpriteMaterial {
    #[uniform(0)]
    pub params: Vec4,

    #[texture(1)]
    #[sampler(2)]
    pub sprite_texture: Handle<Image>,
}

impl PointSpriteMaterial {
    pub fn new(sprite: &SpriteConfig, sprite_texture: Handle<Image>) -> Self {
        Self {
            params: Vec4::new(
                sprite.size,
                sprite.opacity.clamp(0.0, 1.0),
                sprite.alpha_test.clamp(0.0, 1.0),
                0.0,
            ),
            sprite_texture,
        }
    }

    pub fn size(&self) -> f32 {
        self.params.x
    }

    pub fn opacity(&self) -> f32 {
        self.params.y
    }

    pub fn alpha_test(&self) -> f32 {
        self.params.z
    }
}

impl Material for PointSpriteMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Quad centre and corner only; the shader builds the billboard.
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
