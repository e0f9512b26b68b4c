//! Runtime status reporting.
//!
//! Native builds show a small overlay with frame rate, current shape and the
//! number of points still moving; every build forwards the same information
//! to the host page as RPC notifications.

/// Status overlay text and RPC notification systems.
pub mod status;
