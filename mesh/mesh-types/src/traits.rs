//! Traits for mesh types.

use crate::Vertex;

/// Read access to an indexed triangle mesh.
///
/// Algorithms that only need counts and index lookups take this trait
/// rather than a concrete mesh type.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangular faces.
    fn face_count(&self) -> usize;

    /// A mesh is empty when it has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex by index, or `None` when out of bounds.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Get a face's vertex indices, or `None` when out of bounds.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Iterate over all vertices.
    fn vertices(&self) -> impl Iterator<Item = &Vertex>;

    /// Iterate over all faces as vertex index triples.
    fn faces(&self) -> impl Iterator<Item = [u32; 3]>;
}
