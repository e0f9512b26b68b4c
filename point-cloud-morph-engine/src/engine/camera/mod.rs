//! Viewport camera for orbiting the morphing cloud.
//!
//! Right drag orbits around the focus point, the wheel zooms. Left clicks are
//! left alone for the proxy picker.

/// Viewport camera resource, spawn helper and controller system.
pub mod viewport_camera;
