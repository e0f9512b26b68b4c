/// Shape identifiers, target vertex storage and the JSON manifest.
pub mod assets;
pub mod camera;
pub mod core;
pub mod errors;
pub mod loading;
pub mod mesh;
/// Position buffer shared by the transition engine and the renderer.
pub mod point_cloud;
pub mod render;
pub mod scene;
pub mod systems;
pub mod transition;
