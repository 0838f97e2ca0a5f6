//! Result types for subdivision operations.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::IndexedMesh;

use crate::params::SubdivisionMethod;

/// Result of mesh subdivision.
///
/// Original counts describe the welded input topology, so an unwelded STL
/// soup reports its unique vertices rather than three per triangle.
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The subdivided mesh.
    pub mesh: IndexedMesh,

    /// Subdivision method used.
    pub method: SubdivisionMethod,

    /// Number of passes performed.
    pub iterations: u32,

    /// Welded vertex count of the input.
    pub original_vertices: usize,

    /// Unique edge count of the input.
    pub original_edges: usize,

    /// Face count of the input.
    pub original_faces: usize,

    /// Vertex count of the output.
    pub final_vertices: usize,

    /// Face count of the output.
    pub final_faces: usize,

    /// Input edges that had more than two adjacent faces.
    pub non_manifold_edges: usize,
}

impl SubdivisionResult {
    /// Get the face multiplication factor.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        if self.original_faces == 0 {
            1.0
        } else {
            self.final_faces as f64 / self.original_faces as f64
        }
    }

    /// Get the vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }

    /// Vertex count a single pass would produce if no new point coincided
    /// with another.
    ///
    /// Loop and Butterfly add one point per edge, Catmull-Clark one per edge
    /// and face, Kobbelt one per face. Only meaningful for one iteration.
    #[must_use]
    pub const fn expected_single_pass_vertices(&self) -> usize {
        let mut count = self.original_vertices;
        if self.method.uses_edge_points() {
            count += self.original_edges;
        }
        if self.method.uses_face_points() {
            count += self.original_faces;
        }
        count
    }

    /// Check if the input had edges shared by more than two faces.
    #[must_use]
    pub const fn had_non_manifold_input(&self) -> bool {
        self.non_manifold_edges > 0
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision ({}): {} → {} faces ({:.1}x), {} → {} vertices, {} iteration(s)",
            self.method,
            self.original_faces,
            self.final_faces,
            self.face_ratio(),
            self.original_vertices,
            self.final_vertices,
            self.iterations
        )?;
        if self.had_non_manifold_input() {
            write!(f, ", {} non-manifold input edge(s)", self.non_manifold_edges)?;
        }
        Ok(())
    }
}
