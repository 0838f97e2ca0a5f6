//! Loop subdivision.

#![allow(clippy::cast_precision_loss)]

use std::f64::consts::TAU;

use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::trace;

use super::{SubdivisionScheme, edge_midpoint, neighbor_sum, split_four};
use crate::params::SubdivisionMethod;
use crate::points::SubdivisionPoints;
use crate::topology::Topology;

/// Loop's approximating scheme for triangle meshes.
///
/// Every edge gets a point, every original vertex is smoothed, and each
/// triangle is split into four. Boundary edges use the plain midpoint;
/// vertices have no boundary rule, so corners of an open mesh are pulled
/// inward by the same weights as interior vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopScheme;

impl LoopScheme {
    /// Neighbor weight for a vertex of valence `n`.
    ///
    /// `3/16` for valence 3, otherwise Loop's
    /// `(1/n) (5/8 - (3/8 + 1/4 cos(2π/n))²)`.
    #[must_use]
    pub fn alpha(n: usize) -> f64 {
        if n == 3 {
            return 3.0 / 16.0;
        }
        let n = n as f64;
        let c = 0.25_f64.mul_add((TAU / n).cos(), 3.0 / 8.0);
        c.mul_add(-c, 5.0 / 8.0) / n
    }

    fn vertex_point(topology: &Topology, vertex: usize) -> Point3<f64> {
        let position = topology.vertices()[vertex].position;
        let n = topology.valence(vertex);
        if n == 0 {
            return position;
        }

        let alpha = Self::alpha(n);
        let keep = (n as f64).mul_add(-alpha, 1.0);
        Point3::from(position.coords * keep + neighbor_sum(topology, vertex) * alpha)
    }

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

        let ends = topology.position(e.key.v1()).coords + topology.position(e.key.v2()).coords;
        let wings = topology.position(left).coords + topology.position(right).coords;
        Point3::from(ends * (3.0 / 8.0) + wings * (1.0 / 8.0))
    }
}

impl SubdivisionScheme for LoopScheme {
    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::Loop
    }

    fn compute_points(&self, topology: &Topology) -> SubdivisionPoints {
        let mut points = SubdivisionPoints::new(SubdivisionMethod::Loop);
        points.vertex_points = (0..topology.vertex_count())
            .map(|v| Self::vertex_point(topology, v))
            .collect();
        points.edge_points = (0..topology.edge_count())
            .map(|e| Self::edge_point(topology, e))
            .collect();

        trace!(
            vertex_points = points.vertex_points.len(),
            edge_points = points.edge_points.len(),
            "Loop points computed"
        );
        points
    }

    fn rebuild(&self, topology: &Topology, points: &SubdivisionPoints) -> IndexedMesh {
        split_four(topology, points)
    }
}
