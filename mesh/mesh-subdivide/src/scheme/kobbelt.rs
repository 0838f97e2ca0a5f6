//! Kobbelt √3 subdivision.

#![allow(clippy::cast_precision_loss)]

use std::f64::consts::TAU;

use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::trace;

use super::{SubdivisionScheme, face_centroids, neighbor_sum};
use crate::params::SubdivisionMethod;
use crate::points::SubdivisionPoints;
use crate::rebuild::MeshRebuilder;
use crate::topology::Topology;

/// Kobbelt's √3 scheme.
///
/// A centroid is inserted in every face and each original edge is flipped
/// to connect the two centroids beside it, giving three triangles per
/// input triangle. On a boundary edge there is no second centroid; the
/// edge's own vertex stands in for it and the resulting triangle is
/// degenerate.
#[derive(Debug, Clone, Copy, Default)]
pub struct KobbeltScheme;

impl KobbeltScheme {
    /// Relaxation weight `(4 - 2 cos(2π/n)) / 9`.
    #[must_use]
    pub fn alpha(n: usize) -> f64 {
        (2.0_f64).mul_add(-(TAU / n as f64).cos(), 4.0) / 9.0
    }

    /// `(1 - α) v + (α / n) Σ neighbors`.
    ///
    /// `α` uses the valence `n`, or the number of incident boundary edges
    /// when there are any.
    fn vertex_point(topology: &Topology, vertex: usize) -> Point3<f64> {
        let position = topology.vertices()[vertex].position;
        let n = topology.valence(vertex);
        if n == 0 {
            return position;
        }

        let boundary = topology.boundary_valence(vertex);
        let alpha = Self::alpha(if boundary > 0 { boundary } else { n });
        Point3::from(
            position.coords * (1.0 - alpha) + neighbor_sum(topology, vertex) * (alpha / n as f64),
        )
    }
}

impl SubdivisionScheme for KobbeltScheme {
    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::Kobbelt
    }

    fn compute_points(&self, topology: &Topology) -> SubdivisionPoints {
        let mut points = SubdivisionPoints::new(SubdivisionMethod::Kobbelt);
        points.vertex_points = (0..topology.vertex_count())
            .map(|v| Self::vertex_point(topology, v))
            .collect();
        points.face_points = face_centroids(topology);

        trace!(
            vertex_points = points.vertex_points.len(),
            face_points = points.face_points.len(),
            "Kobbelt points computed"
        );
        points
    }

    fn rebuild(&self, topology: &Topology, points: &SubdivisionPoints) -> IndexedMesh {
        let mut out = MeshRebuilder::new(points, topology.face_count() * 3);

        for (f, face) in topology.faces().iter().enumerate() {
            let own = out.face(f);
            for i in 0..3 {
                let corner = out.vertex(face.vertices[i]);
                let across = topology.edges()[face.edges[i]]
                    .other_face(f)
                    .map_or(corner, |g| out.face(g));

                out.push_triangle([across, own, corner]);
            }
        }

        out.finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshTopology, octahedron, single_triangle, unit_quad};

    #[test]
    fn alpha_values() {
        // Valence 6 on a regular mesh: (4 - 2 * 1/2) / 9 = 1/3
        assert_relative_eq!(KobbeltScheme::alpha(6), 1.0 / 3.0, epsilon = 1e-15);
        // Two boundary edges: (4 + 2) / 9
        assert_relative_eq!(KobbeltScheme::alpha(2), 2.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn octahedron_counts() {
        let topo = Topology::build(&octahedron()).unwrap();
        let points = KobbeltScheme.compute_points(&topo);
        assert!(points.edge_points.is_empty());
        assert_eq!(points.face_points.len(), 8);

        let mesh = KobbeltScheme.rebuild(&topo, &points);
        assert_eq!(mesh.vertex_count(), 14);
        assert_eq!(mesh.face_count(), 24);
    }

    #[test]
    fn octahedron_vertex_relaxation() {
        let topo = Topology::build(&octahedron()).unwrap();
        let points = KobbeltScheme.compute_points(&topo);
        // Valence 4: alpha = 4/9, neighbors of (1,0,0) sum to zero
        let expected = Point3::new(5.0 / 9.0, 0.0, 0.0);
        assert_relative_eq!(points.vertex_points[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn boundary_valence_sets_alpha_but_not_weight() {
        let topo = Topology::build(&unit_quad()).unwrap();
        assert_eq!(topo.valence(0), 3);
        assert_eq!(topo.boundary_valence(0), 2);

        // alpha(2) = 2/3 spread over 3 neighbors summing to (2, 2, 0)
        let points = KobbeltScheme.compute_points(&topo);
        let expected = Point3::new(4.0 / 9.0, 4.0 / 9.0, 0.0);
        assert_relative_eq!(points.vertex_points[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn boundary_edges_substitute_the_vertex() {
        let topo = Topology::build(&single_triangle()).unwrap();
        let mesh = KobbeltScheme.subdivide(&topo);
        assert_eq!(mesh.face_count(), 3);
        for [across, _, corner] in mesh.faces() {
            assert_eq!(across, corner);
        }
    }

    #[test]
    fn overwritten_face_on_fan_edge_is_treated_as_boundary() {
        // Three faces share edge 0-1; the third replaces the second in face2
        let fan = IndexedMesh::from_raw(
            &[
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0,
            ],
            &[0, 1, 2, 1, 0, 3, 0, 1, 4],
        );
        let topo = Topology::build(&fan).unwrap();
        let mesh = KobbeltScheme.subdivide(&topo);
        assert_eq!(mesh.face_count(), 9);

        // Face 0 sees face 2 across the edge, face 1 sees no one
        let [across, _, corner] = mesh.faces[0];
        assert_ne!(across, corner);
        assert_eq!(mesh.faces[0][0], mesh.faces[6][1]);
        let [across, _, corner] = mesh.faces[3];
        assert_eq!(across, corner);
    }
}
