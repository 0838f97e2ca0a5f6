//! Assembly of the output mesh from computed points.

use mesh_types::{IndexedMesh, Vertex};

use crate::points::SubdivisionPoints;
use crate::weld::PointWelder;

/// Builds the subdivided mesh for one pass.
///
/// Points are emitted in a fixed order (vertex points, then edge points,
/// then face points) and welded by exact position as they go in. Schemes
/// then add triangles in terms of the original vertex, edge and face
/// indices.
///
/// # Example
///
/// ```
/// use mesh_subdivide::{MeshRebuilder, SubdivisionMethod, SubdivisionPoints};
/// use mesh_types::{MeshTopology, Point3};
///
/// let mut points = SubdivisionPoints::new(SubdivisionMethod::Kobbelt);
/// points.vertex_points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// points.face_points = vec![Point3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)];
///
/// let mut rebuilder = MeshRebuilder::new(&points, 1);
/// rebuilder.push_triangle([rebuilder.vertex(0), rebuilder.vertex(1), rebuilder.face(0)]);
///
/// let mesh = rebuilder.finish();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.faces, vec![[0, 1, 3]]);
/// ```
#[derive(Debug)]
pub struct MeshRebuilder {
    welder: PointWelder,
    vertex_index: Vec<u32>,
    edge_index: Vec<u32>,
    face_index: Vec<u32>,
    triangles: Vec<[u32; 3]>,
}

impl MeshRebuilder {
    /// Emit every computed point and prepare room for `triangle_capacity`
    /// output triangles.
    #[must_use]
    pub fn new(points: &SubdivisionPoints, triangle_capacity: usize) -> Self {
        let mut welder = PointWelder::with_capacity(points.len());

        let vertex_index = points
            .vertex_points
            .iter()
            .map(|&p| welder.insert(p))
            .collect();
        let edge_index = points
            .edge_points
            .iter()
            .map(|&p| welder.insert(p))
            .collect();
        let face_index = points
            .face_points
            .iter()
            .map(|&p| welder.insert(p))
            .collect();

        Self {
            welder,
            vertex_index,
            edge_index,
            face_index,
            triangles: Vec::with_capacity(triangle_capacity),
        }
    }

    /// Output index of the refined original vertex `v`.
    #[inline]
    #[must_use]
    pub fn vertex(&self, v: u32) -> u32 {
        self.vertex_index[v as usize]
    }

    /// Output index of the point inserted on edge `e`.
    #[inline]
    #[must_use]
    pub fn edge(&self, e: usize) -> u32 {
        self.edge_index[e]
    }

    /// Output index of the point inserted in face `f`.
    #[inline]
    #[must_use]
    pub fn face(&self, f: usize) -> u32 {
        self.face_index[f]
    }

    /// Append an output triangle.
    #[inline]
    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        self.triangles.push(triangle);
    }

    /// Number of unique output positions.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.welder.len()
    }

    /// Produce the output mesh.
    #[must_use]
    pub fn finish(self) -> IndexedMesh {
        let vertices = self
            .welder
            .into_points()
            .into_iter()
            .map(Vertex::new)
            .collect();
        IndexedMesh::from_parts(vertices, self.triangles)
    }
}
