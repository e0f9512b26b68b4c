//! Shape data and runtime configuration.
//!
//! Target shapes are identified by [`shape_set::ShapeId`]; their vertex
//! sequences live in a [`shape_set::ShapeSet`] owned by the transition
//! engine. The optional manifest overrides the shared defaults.

/// Runtime configuration loaded from `morph_manifest.json`.
pub mod morph_manifest;

/// Shape identifiers and the registry of target vertex sequences.
pub mod shape_set;
