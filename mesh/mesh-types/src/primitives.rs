//! Reference meshes.
//!
//! Small closed and open meshes with known vertex/edge/face counts. They are
//! the fixtures for subdivision tests and benchmarks and the CLI's built-in
//! inputs.
//!
//! | Mesh | V | E | F | Closed |
//! |------|---|---|---|--------|
//! | [`single_triangle`] | 3 | 3 | 1 | no |
//! | [`unit_quad`] | 4 | 5 | 2 | no |
//! | [`tetrahedron`] | 4 | 6 | 4 | yes |
//! | [`unit_cube`] | 8 | 18 | 12 | yes |
//! | [`octahedron`] | 6 | 12 | 8 | yes |
//! | [`icosahedron`] | 12 | 30 | 20 | yes |
//!
//! All faces wind counter-clockwise when viewed from outside.

use crate::{IndexedMesh, Vertex};

fn mesh_from(vertices: &[[f64; 3]], faces: &[[u32; 3]]) -> IndexedMesh {
    IndexedMesh::from_parts(
        vertices.iter().copied().map(Vertex::from).collect(),
        faces.to_vec(),
    )
}

/// The right triangle `(0,0,0)`, `(1,0,0)`, `(0,1,0)`.
///
/// Every edge is a boundary edge.
#[must_use]
pub fn single_triangle() -> IndexedMesh {
    mesh_from(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        &[[0, 1, 2]],
    )
}

/// The unit square in the XY plane split along its `(0,0)`–`(1,1)` diagonal.
#[must_use]
pub fn unit_quad() -> IndexedMesh {
    mesh_from(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        &[[0, 1, 2], [0, 2, 3]],
    )
}

/// Regular tetrahedron inscribed in the cube `[-1, 1]^3`.
#[must_use]
pub fn tetrahedron() -> IndexedMesh {
    mesh_from(
        &[
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ],
        &[[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
    )
}

/// Cube from `(0,0,0)` to `(1,1,1)`, two triangles per side.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    mesh_from(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        &[
            // Bottom (z=0)
            [0, 2, 1],
            [0, 3, 2],
            // Top (z=1)
            [4, 5, 6],
            [4, 6, 7],
            // Front (y=0)
            [0, 1, 5],
            [0, 5, 4],
            // Back (y=1)
            [3, 7, 6],
            [3, 6, 2],
            // Left (x=0)
            [0, 4, 7],
            [0, 7, 3],
            // Right (x=1)
            [1, 2, 6],
            [1, 6, 5],
        ],
    )
}

/// Regular octahedron with vertices on the coordinate axes.
#[must_use]
pub fn octahedron() -> IndexedMesh {
    mesh_from(
        &[
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ],
        &[
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
}

/// Regular icosahedron built from three orthogonal golden rectangles.
///
/// Every vertex has valence 5.
#[must_use]
pub fn icosahedron() -> IndexedMesh {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    mesh_from(
        &[
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ],
        &[
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeshTopology;
    use std::collections::HashSet;

    fn edge_count(mesh: &IndexedMesh) -> usize {
        let mut edges = HashSet::new();
        for [a, b, c] in mesh.faces() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                edges.insert((u.min(v), u.max(v)));
            }
        }
        edges.len()
    }

    #[test]
    fn primitive_counts() {
        let cases = [
            (single_triangle(), 3, 3, 1),
            (unit_quad(), 4, 5, 2),
            (tetrahedron(), 4, 6, 4),
            (unit_cube(), 8, 18, 12),
            (octahedron(), 6, 12, 8),
            (icosahedron(), 12, 30, 20),
        ];

        for (mesh, v, e, f) in cases {
            assert_eq!(mesh.vertex_count(), v);
            assert_eq!(edge_count(&mesh), e);
            assert_eq!(mesh.face_count(), f);
        }
    }

    #[test]
    fn closed_primitives_satisfy_euler() {
        for mesh in [tetrahedron(), unit_cube(), octahedron(), icosahedron()] {
            let v = mesh.vertex_count() as i64;
            let e = edge_count(&mesh) as i64;
            let f = mesh.face_count() as i64;
            assert_eq!(v - e + f, 2);
        }
    }

    #[test]
    fn icosahedron_vertices_share_radius() {
        let ico = icosahedron();
        let r0 = ico.vertices[0].position.coords.norm();
        for v in ico.vertices() {
            assert!((v.position.coords.norm() - r0).abs() < 1e-12);
        }
    }
}
