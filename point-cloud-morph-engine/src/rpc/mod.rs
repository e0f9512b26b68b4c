//! JSON-RPC 2.0 bridge to the page embedding the canvas.
//!
//! On wasm the engine listens for `postMessage` events carrying JSON-RPC
//! requests and replies through the parent window. Request handling itself
//! is platform independent; native builds simply never receive messages.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)            Bevy (iframe)
//!        ├─ trigger_shape {id} ─────> handle_rpc_request
//!        │                               └─> TriggerShapeEvent (source: rpc)
//!        │ <──────────── response {id} ─┤
//!        │ <── shape_changed / fps_update (no id) ─┤
//! ```
//!
//! Requests without an `id` are treated as notifications: they are acted on
//! but never answered.
//!
//! ## Methods
//!
//! ### Requests
//! - `trigger_shape`: Morph the cloud into `{ "shape": "cube" | "sphere" | "torus" }`
//! - `get_shapes`: List loaded shapes and the current one
//! - `get_fps`: Retrieve current frame rate
//!
//! ### Notifications
//! - `shapes_ready`: Model loading finished, with loaded and failed shapes
//! - `shape_changed`: A trigger was accepted, with its source
//! - `fps_update`: Smoothed frame rate every half second
//!
//! ## Error Codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (missing or unknown shape)
//! - `-32001`: Shape not loaded

/// Message queue, request dispatch and outgoing transport.
pub mod web_rpc;
