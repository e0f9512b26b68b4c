//! Shared default values for the point cloud morph engine.
//!
//! Every value here can be overridden at runtime by the morph manifest; these
//! are the fallbacks used when the manifest omits a field or fails to load.

/// Point count, spawn volume and model scaling.
pub mod morph;

/// Sprite and background appearance.
pub mod render_settings;

/// Transition timing and the auto-cycle policy.
pub mod transition;
