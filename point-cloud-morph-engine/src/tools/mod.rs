//! Interactive tools operating on the scene.
//!
//! ## Picker
//!
//! - **Activation**: always on once the app is `Running`
//! - **Input**: left mouse press in the primary window
//! - **Effect**: the nearest proxy under the cursor sends a
//!   `TriggerShapeEvent` with source `Pointer`; a miss does nothing
//!
//! Right drag and the scroll wheel belong to the viewport camera and never
//! pick.

/// Ray casting against shape proxy pick volumes.
pub mod picker;
