//! Catmull-Clark subdivision on triangle input.

#![allow(clippy::cast_precision_loss)]

use mesh_types::IndexedMesh;
use nalgebra::{Point3, Vector3};
use tracing::trace;

use super::{SubdivisionScheme, face_centroids};
use crate::params::SubdivisionMethod;
use crate::points::SubdivisionPoints;
use crate::rebuild::MeshRebuilder;
use crate::topology::Topology;

/// Catmull-Clark applied to triangles.
///
/// Each triangle gets a face point and each edge an edge point. Every corner
/// of a triangle then forms a quad `(vertex, edge, face, previous edge)`,
/// which is written out as two triangles, so one input triangle becomes six.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatmullClarkScheme;

impl CatmullClarkScheme {
    /// Average of the edge endpoints and its one or two face points.
    fn edge_point(topology: &Topology, face_points: &[Point3<f64>], edge: usize) -> Point3<f64> {
        let e = topology.edges()[edge];
        let mut sum = topology.position(e.key.v1()).coords
            + topology.position(e.key.v2()).coords
            + face_points[e.face1].coords;

        match e.face2 {
            Some(face2) => {
                sum += face_points[face2].coords;
                Point3::from(sum / 4.0)
            }
            None => Point3::from(sum / 3.0),
        }
    }

    /// `Q/n + 2R/n + (n-3)/n · v`.
    ///
    /// `Q` averages the face points over `connected_faces`, repeats
    /// included. `R` averages the midpoints of the incident edges.
    fn vertex_point(
        topology: &Topology,
        face_points: &[Point3<f64>],
        vertex: usize,
    ) -> Point3<f64> {
        let v = &topology.vertices()[vertex];
        let n = v.connected_edges.len();
        if n == 0 {
            return v.position;
        }

        let q = v
            .connected_faces
            .iter()
            .fold(Vector3::zeros(), |acc, &f| acc + face_points[f].coords)
            / v.connected_faces.len() as f64;

        let r = v
            .connected_edges
            .iter()
            .fold(Vector3::zeros(), |acc, &e| {
                let key = topology.edges()[e].key;
                acc + (topology.position(key.v1()).coords + topology.position(key.v2()).coords)
                    * 0.5
            })
            / n as f64;

        let n = n as f64;
        Point3::from(q / n + r * (2.0 / n) + v.position.coords * ((n - 3.0) / n))
    }
}

impl SubdivisionScheme for CatmullClarkScheme {
    fn method(&self) -> SubdivisionMethod {
        SubdivisionMethod::CatmullClark
    }

    fn compute_points(&self, topology: &Topology) -> SubdivisionPoints {
        let face_points = face_centroids(topology);

        let mut points = SubdivisionPoints::new(SubdivisionMethod::CatmullClark);
        points.edge_points = (0..topology.edge_count())
            .map(|e| Self::edge_point(topology, &face_points, e))
            .collect();
        points.vertex_points = (0..topology.vertex_count())
            .map(|v| Self::vertex_point(topology, &face_points, v))
            .collect();
        points.face_points = face_points;

        trace!(
            vertex_points = points.vertex_points.len(),
            edge_points = points.edge_points.len(),
            face_points = points.face_points.len(),
            "Catmull-Clark points computed"
        );
        points
    }

    fn rebuild(&self, topology: &Topology, points: &SubdivisionPoints) -> IndexedMesh {
        let mut out = MeshRebuilder::new(points, topology.face_count() * 6);

        for (f, face) in topology.faces().iter().enumerate() {
            let center = out.face(f);
            for i in 0..3 {
                let corner = out.vertex(face.vertices[i]);
                let next = out.vertex(face.vertices[(i + 1) % 3]);
                let edge = out.edge(face.edges[i]);

                out.push_triangle([corner, edge, center]);
                out.push_triangle([edge, next, center]);
            }
        }

        out.finish()
    }
}
