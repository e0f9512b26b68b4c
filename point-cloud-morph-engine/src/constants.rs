//! Scene layout values local to the application. Tunables shared with the
//! manifest defaults live in the `constants` crate.

/// Perspective projection and orbit limits.
pub mod camera;

/// Placement of the proxies, background and helpers.
pub mod scene;
