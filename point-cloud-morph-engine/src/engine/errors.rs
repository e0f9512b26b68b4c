use thiserror::Error;

use crate::engine::assets::shape_set::ShapeId;

/// Failures surfaced by the morph engine. None of them stop the frame loop;
/// callers log them and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MorphError {
    /// The model for a shape could not be loaded. The shape stays absent.
    #[error("failed to load {shape} model from '{resource}': {reason}")]
    AssetLoad {
        shape: ShapeId,
        resource: String,
        reason: String,
    },

    /// The model loaded but carried no vertex positions.
    #[error("model '{resource}' for {shape} contains no vertex positions")]
    EmptyModel { shape: ShapeId, resource: String },

    /// A trigger asked for a shape that has no registered vertex data.
    #[error("shape {0} has no registered vertex data")]
    NotReady(ShapeId),

    #[error("refusing to register an empty vertex sequence for {0}")]
    EmptyShape(ShapeId),
}
