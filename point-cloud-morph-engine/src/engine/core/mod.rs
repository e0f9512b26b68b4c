//! Core application setup and state management.
//!
//! Builds the app for native and WASM targets and owns the two-stage
//! lifecycle: `Loading` until every shape model resolved, then `Running`.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Wires the loading stage, transition engine, sprite renderer, scene
/// systems, picker and RPC bridge into one app.
pub mod app_setup;

/// Application state machine and the hand-over from loading to running.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
