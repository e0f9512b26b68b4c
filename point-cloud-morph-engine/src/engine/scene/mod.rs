//! Static scene content around the cloud.
//!
//! Proxies the user clicks to pick a shape, the gradient backdrop, the axes
//! helper and the slow spin applied to the cloud entity.

/// Camera-following gradient plane behind the scene.
pub mod background;

/// Continuous rotation of the point cloud entity.
pub mod cloud_spin;

/// World axes helper.
pub mod gizmos;

/// Clickable shape proxies and their highlight.
///
/// Each proxy carries its `ShapeId` and a pick volume for the picker.
pub mod proxies;
