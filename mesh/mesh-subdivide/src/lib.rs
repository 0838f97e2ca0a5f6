//! Mesh subdivision algorithms.
//!
//! Four refinement schemes over one shared adjacency structure:
//!
//! - **Loop**: approximating, 1 triangle → 4, smooths every vertex
//! - **Catmull-Clark**: approximating, 1 triangle → 3 quads → 6 triangles
//! - **Kobbelt √3**: approximating, inserts face centroids and flips edges, 1 → 3
//! - **Butterfly**: interpolating, 1 → 4, original vertices stay put
//!
//! A pass runs in three stages. [`Topology::build`] welds the input by exact
//! position and records every vertex, edge (with its one or two faces) and
//! face. A [`SubdivisionScheme`] computes the new vertex, edge and face
//! points into [`SubdivisionPoints`]. [`MeshRebuilder`] welds those points
//! and triangulates the next mesh. A [`PointSink`] can observe the points of
//! every pass without affecting the result.
//!
//! # Examples
//!
//! One pass of Loop subdivision:
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Vertex};
//! use mesh_subdivide::{subdivide_once, SubdivisionMethod};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! let refined = subdivide_once(&mesh, SubdivisionMethod::Loop)?;
//! assert_eq!(refined.face_count(), 4);
//! assert_eq!(refined.vertex_count(), 6);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Several passes with a size guard:
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! let params = SubdivideParams::butterfly()
//!     .with_iterations(2)
//!     .with_max_faces(1_000);
//!
//! let result = subdivide_mesh(&unit_cube(), &params)?;
//!
//! // 12 * 4^2 faces after 2 iterations
//! assert_eq!(result.final_faces, 192);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Driving a scheme by hand:
//!
//! ```
//! use mesh_types::octahedron;
//! use mesh_subdivide::{SubdivisionMethod, SubdivisionScheme, Topology};
//!
//! let topology = Topology::build(&octahedron())?;
//! let scheme = SubdivisionMethod::CatmullClark.scheme();
//!
//! let points = scheme.compute_points(&topology);
//! assert_eq!(points.face_points.len(), 8);
//! assert_eq!(points.edge_points.len(), 12);
//!
//! let refined = scheme.rebuild(&topology, &points);
//! assert_eq!(refined.faces.len(), 48);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod params;
mod points;
mod rebuild;
mod result;
mod scheme;
mod subdivide;
mod topology;
mod weld;

pub use error::{SubdivideError, SubdivideResult};
pub use params::{SubdivideParams, SubdivisionMethod};
pub use points::{NullSink, PointSink, SubdivisionPoints};
pub use rebuild::MeshRebuilder;
pub use result::SubdivisionResult;
pub use scheme::{ButterflyScheme, CatmullClarkScheme, KobbeltScheme, LoopScheme, SubdivisionScheme};
pub use subdivide::{subdivide_mesh, subdivide_mesh_with_sink, subdivide_once, subdivide_soup};
pub use topology::{EdgeKey, TopoEdge, TopoFace, TopoVertex, Topology, TopologyStats};
