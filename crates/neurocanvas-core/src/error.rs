//! Error types for neurocanvas.

use thiserror::Error;

use crate::bounds::Axis;

/// The main error type for neurocanvas operations.
#[derive(Error, Debug)]
pub enum NeurocanvasError {
    /// A parameter (spacing, option value) is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The surface bounding box has no volume along an axis.
    #[error("degenerate input: bounding box extent along {axis} is {extent}")]
    DegenerateInput { axis: Axis, extent: f64 },

    /// The surface mesh has no vertices, so it has no bounding box.
    #[error("surface mesh has no vertices")]
    EmptySurface,

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// The sample grid exceeds the configured point budget.
    #[error("sample grid has {points} points, exceeding the budget of {limit}")]
    GridTooLarge { points: u64, limit: u64 },

    /// The output mesh would need vertex indices beyond `u32`.
    #[error("{voxels} voxels exceed the addressable vertex range of the output mesh")]
    TooManyVertices { voxels: usize },

    /// Buffer sizes do not describe whole cubes.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// An inside/outside classifier returned the wrong number of flags.
    #[error("classifier '{classifier}' returned {actual} flags for {expected} points")]
    ClassifierContract {
        classifier: String,
        expected: usize,
        actual: usize,
    },

    /// The point-in-surface query structure could not be built.
    #[error("surface query error: {0}")]
    SurfaceQuery(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for neurocanvas operations.
pub type Result<T> = std::result::Result<T, NeurocanvasError>;
