//! Error types for mesh subdivision operations.

use thiserror::Error;

/// Errors that can occur during subdivision operations.
///
/// Only structurally unusable input is rejected. Non-manifold edges,
/// degenerate triangles and boundary singularities are not errors; each
/// scheme handles them with its documented fallback.
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("Mesh has no faces")]
    NoFaces,

    /// Invalid iteration count.
    #[error("Invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    /// Mesh would exceed maximum size.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },

    /// A flat triangle index list whose length is not a multiple of 3.
    #[error("Triangle index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    /// A face references a vertex past the end of the position array.
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidVertexIndex {
        /// Face index.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of input positions.
        vertex_count: usize,
    },

    /// Unrecognized subdivision method name.
    #[error("Unknown subdivision method: {0:?} (expected loop, catmull-clark, kobbelt or butterfly)")]
    UnknownMethod(String),
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
