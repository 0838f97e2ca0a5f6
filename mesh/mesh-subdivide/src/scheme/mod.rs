//! Refinement schemes.
//!
//! A scheme turns a [`Topology`] into a table of new points and then into
//! the next mesh. The four schemes share the topology, the point tables and
//! the [`MeshRebuilder`]; they differ only in their formulas and in how they
//! triangulate.

mod butterfly;
mod catmull_clark;
mod kobbelt;
mod loop_subdivision;

pub use butterfly::ButterflyScheme;
pub use catmull_clark::CatmullClarkScheme;
pub use kobbelt::KobbeltScheme;
pub use loop_subdivision::LoopScheme;

use mesh_types::IndexedMesh;
use nalgebra::{Point3, Vector3};

use crate::params::SubdivisionMethod;
use crate::points::SubdivisionPoints;
use crate::rebuild::MeshRebuilder;
use crate::topology::Topology;

/// One subdivision algorithm.
pub trait SubdivisionScheme {
    /// Which method this is.
    fn method(&self) -> SubdivisionMethod;

    /// Compute every new point from the current topology.
    ///
    /// All formulas read the pre-pass positions; nothing computed in this
    /// pass feeds back into another point of the same pass.
    fn compute_points(&self, topology: &Topology) -> SubdivisionPoints;

    /// Triangulate the refined mesh from previously computed points.
    fn rebuild(&self, topology: &Topology, points: &SubdivisionPoints) -> IndexedMesh;

    /// Compute points and rebuild in one go.
    fn subdivide(&self, topology: &Topology) -> IndexedMesh {
        let points = self.compute_points(topology);
        self.rebuild(topology, &points)
    }
}

impl SubdivisionMethod {
    /// The scheme implementing this method.
    #[must_use]
    pub fn scheme(&self) -> Box<dyn SubdivisionScheme> {
        match self {
            Self::Loop => Box::new(LoopScheme),
            Self::CatmullClark => Box::new(CatmullClarkScheme),
            Self::Kobbelt => Box::new(KobbeltScheme),
            Self::Butterfly => Box::new(ButterflyScheme),
        }
    }
}

/// Centroid of every face, from pre-pass positions.
fn face_centroids(topology: &Topology) -> Vec<Point3<f64>> {
    topology
        .faces()
        .iter()
        .map(|face| {
            let [a, b, c] = face.vertices.map(|v| topology.position(v).coords);
            Point3::from((a + b + c) / 3.0)
        })
        .collect()
}

/// Midpoint of an edge.
fn edge_midpoint(topology: &Topology, edge: usize) -> Point3<f64> {
    let key = topology.edges()[edge].key;
    nalgebra::center(&topology.position(key.v1()), &topology.position(key.v2()))
}

/// Sum of the far endpoints over every edge incident to `vertex`.
fn neighbor_sum(topology: &Topology, vertex: usize) -> Vector3<f64> {
    topology
        .neighbor_positions(vertex)
        .fold(Vector3::zeros(), |acc, p| acc + p.coords)
}

/// The 1-to-4 split shared by Loop and Butterfly.
///
/// With `e1 = v1v2`, `e2 = v2v3`, `e3 = v3v1` each face becomes
/// `(v1,e1,e3) (v2,e2,e1) (v3,e3,e2) (e1,e2,e3)`, all in source winding.
fn split_four(topology: &Topology, points: &SubdivisionPoints) -> IndexedMesh {
    let mut out = MeshRebuilder::new(points, topology.face_count() * 4);

    for face in topology.faces() {
        let [v1, v2, v3] = face.vertices.map(|v| out.vertex(v));
        let [e1, e2, e3] = face.edges.map(|e| out.edge(e));

        out.push_triangle([v1, e1, e3]);
        out.push_triangle([v2, e2, e1]);
        out.push_triangle([v3, e3, e2]);
        out.push_triangle([e1, e2, e3]);
    }

    out.finish()
}
