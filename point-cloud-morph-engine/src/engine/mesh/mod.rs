//! Mesh generation for the point sprite cloud.
//!
//! Every point owns six vertices (two triangles) sharing its centre position;
//! the vertex shader expands them into a camera-facing quad.

/// Sprite mesh construction and per-frame position upload.
pub mod point_sprite_mesh;
