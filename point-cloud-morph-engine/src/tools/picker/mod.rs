//! Pointer picking of shape proxies.
//!
//! A left press casts a ray through the cursor and triggers the shape of the
//! nearest proxy it hits; misses do nothing.

/// Viewport ray construction and volume intersection tests.
pub mod ray;

/// Nearest-hit selection and the click system.
pub mod selection;

pub use ray::{PickRay, PickVolume};
pub use selection::{PickCandidate, pick, pick_shape_on_click};
