//! Modified butterfly subdivision.

use mesh_types::IndexedMesh;
use nalgebra::{Point3, Vector3};
use tracing::trace;

use super::{SubdivisionScheme, edge_midpoint, split_four};
use crate::params::SubdivisionMethod;
use crate::points::SubdivisionPoints;
use crate::topology::{TopoEdge, Topology};

/// Interpolating butterfly scheme.
///
/// Original vertices keep their positions. Each interior edge gets
///
/// ```text
/// 1/2 (v1 + v2) + 1/8 (left + right) - 1/16 (w1 + w2 + w3 + w4)
/// ```
///
/// where `left`/`right` are the opposite corners of the two adjacent faces
/// and the `w` are wing vertices found around the edge endpoints. A wing
/// that cannot be found contributes nothing. Boundary edges use the
/// midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButterflyScheme;

impl ButterflyScheme {
    fn edge_point(topology: &Topology, edge: usize) -> Point3<f64> {
        let e = topology.edges()[edge];
        let Some(face2) = e.face2 else {
            return edge_midpoint(topology, edge);
        };

        let (Some(left), Some(right)) = (
            topology.opposite_vertex(e.face1, edge),
            topology.opposite_vertex(face2, edge),
        ) else {
            return edge_midpoint(topology, edge);
        };

        let (v1, v2) = (e.key.v1(), e.key.v2());
        let wing = |end: u32, excluded: u32| {
            Self::wing(topology, &e, end, excluded)
                .map_or_else(Vector3::zeros, |w| topology.position(w).coords)
        };
        // Paired per excluded corner so the sum does not depend on endpoint order
        let wings = (wing(v1, right) + wing(v2, right)) + (wing(v1, left) + wing(v2, left));

        let ends = topology.position(v1).coords + topology.position(v2).coords;
        let opposite = topology.position(left).coords + topology.position(right).coords;
        Point3::from(ends * 0.5 + opposite * (1.0 / 8.0) - wings * (1.0 / 16.0))
    }

    /// First vertex, in `connected_faces` order, of a face around `end` that
    /// is not adjacent to `edge` and is neither an edge endpoint nor
    /// `excluded`.
    fn wing(topology: &Topology, edge: &TopoEdge, end: u32, excluded: u32) -> Option<u32> {
        topology.vertices()[end as usize]
            .connected_faces
            .iter()
            .filter(|&&f| !edge.touches_face(f))
            .find_map(|&f| {
                topology.faces()[f]
                    .vertices
                    .iter()
                    .copied()
                    .find(|&w| !edge.key.contains(w) && w != excluded)
            })
    }
}

impl SubdivisionScheme for ButterflyScheme {
    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::Butterfly
    }

    fn compute_points(&self, topology: &Topology) -> SubdivisionPoints {
        let mut points = SubdivisionPoints::new(SubdivisionMethod::Butterfly);
        points.vertex_points = topology.positions().collect();
        points.edge_points = (0..topology.edge_count())
            .map(|e| Self::edge_point(topology, e))
            .collect();

        trace!(
            edge_points = points.edge_points.len(),
            "Butterfly points computed"
        );
        points
    }

    fn rebuild(&self, topology: &Topology, points: &SubdivisionPoints) -> IndexedMesh {
        split_four(topology, points)
    }
}
