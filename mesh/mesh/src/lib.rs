//! Mesh subdivision toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates behind one dependency:
//! load a mesh, refine it with one of four subdivision schemes, save it.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! let mesh = load_mesh("model.stl")?;
//!
//! let params = SubdivideParams::catmull_clark().with_iterations(2);
//! let result = subdivide_mesh(&mesh, &params)?;
//! println!("{result}");
//!
//! save_mesh(&result.mesh, "smooth.obj")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, reference primitives
//! - [`io`] - File I/O for STL and OBJ
//! - [`subdivide`] - Loop, Catmull-Clark, Kobbelt √3 and Butterfly subdivision
//!
//! # Feature Flags
//!
//! - `serde` - Serialize mesh types, subdivision parameters and emitted points

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, reference primitives.
pub use mesh_types as types;

/// File I/O for STL and OBJ.
pub use mesh_io as io;

/// Subdivision schemes over a shared triangle topology.
pub use mesh_subdivide as subdivide;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh subdivision.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
///
/// let refined = subdivide_once(&octahedron(), SubdivisionMethod::Loop)?;
/// assert_eq!(refined.face_count(), 32);
/// # Ok::<(), SubdivideError>(())
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        IndexedMesh, MeshTopology, Vertex, icosahedron, octahedron, tetrahedron, unit_cube,
    };

    // I/O
    pub use mesh_io::{IoError, MeshFormat, load_mesh, save_mesh};

    // Subdivision
    pub use mesh_subdivide::{
        PointSink, SubdivideError, SubdivideParams, SubdivisionMethod, SubdivisionPoints,
        SubdivisionResult, Topology, subdivide_mesh, subdivide_mesh_with_sink, subdivide_once,
    };
}

// =============================================================================
// Tests
// =============================================================================
