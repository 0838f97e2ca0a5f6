//! Count, adjacency and welding properties of the four schemes.
//!
//! Run with: cargo test -p mesh-subdivide --test subdivision_properties

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use mesh_subdivide::{
    EdgeKey, SubdivideParams, SubdivisionMethod, SubdivisionPoints, SubdivisionScheme, Topology,
    subdivide_mesh, subdivide_mesh_with_sink, subdivide_once, subdivide_soup,
};
use mesh_types::{
    IndexedMesh, MeshTopology, Point3, icosahedron, octahedron, single_triangle, tetrahedron,
    unit_cube, unit_quad,
};

fn closed_meshes() -> Vec<(&'static str, IndexedMesh)> {
    vec![
        ("tetrahedron", tetrahedron()),
        ("cube", unit_cube()),
        ("octahedron", octahedron()),
        ("icosahedron", icosahedron()),
    ]
}

/// Expand a mesh into one triangle per face with its own three corners,
/// the way STL stores it.
fn to_soup(mesh: &IndexedMesh) -> (Vec<Point3<f64>>, Vec<u32>) {
    let mut positions = Vec::with_capacity(mesh.faces.len() * 3);
    let mut indices = Vec::with_capacity(mesh.faces.len() * 3);
    for face in &mesh.faces {
        for &v in face {
            indices.push(u32::try_from(positions.len()).unwrap());
            positions.push(mesh.vertices[v as usize].position);
        }
    }
    (positions, indices)
}

// =============================================================================
// Output counts on closed manifold meshes
// =============================================================================

#[test]
fn closed_mesh_output_counts() {
    for (name, mesh) in closed_meshes() {
        let topo = Topology::build(&mesh).unwrap();
        let (v, e, f) = (topo.vertex_count(), topo.edge_count(), topo.face_count());

        let expected = [
            (SubdivisionMethod::Loop, v + e, 4 * f),
            (SubdivisionMethod::Butterfly, v + e, 4 * f),
            (SubdivisionMethod::CatmullClark, v + e + f, 6 * f),
            (SubdivisionMethod::Kobbelt, v + f, 3 * f),
        ];

        for (method, vertices, faces) in expected {
            let out = subdivide_once(&mesh, method).unwrap();
            assert_eq!(out.vertex_count(), vertices, "{name} {method} vertices");
            assert_eq!(out.face_count(), faces, "{name} {method} faces");
        }
    }
}

#[test]
fn result_counts_match_single_pass_expectation() {
    for (_, mesh) in closed_meshes() {
        for method in SubdivisionMethod::ALL {
            let params = SubdivideParams::new().with_method(method);
            let result = subdivide_mesh(&mesh, &params).unwrap();
            assert_eq!(result.final_vertices, result.expected_single_pass_vertices());
            assert_eq!(
                result.final_faces,
                result.original_faces * method.face_multiplier()
            );
        }
    }
}

#[test]
fn subdivided_closed_meshes_stay_closed() {
    for (_, mesh) in closed_meshes() {
        for method in SubdivisionMethod::ALL {
            let out = subdivide_once(&mesh, method).unwrap();
            let stats = Topology::build(&out).unwrap().stats();
            assert!(stats.is_closed(), "{method} opened the mesh");
            assert_eq!(stats.euler_characteristic(), 2);
        }
    }
}

// =============================================================================
// Adjacency
// =============================================================================

#[test]
fn edge_key_ignores_direction() {
    for (a, b) in [(0, 1), (7, 3), (42, 42), (u32::MAX, 0)] {
        assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
    }
}

#[test]
fn rotating_faces_keeps_edge_set() {
    let mesh = icosahedron();
    let mut rotated = mesh.clone();
    for face in &mut rotated.faces {
        face.rotate_left(1);
    }

    let keys = |m: &IndexedMesh| {
        let mut keys: Vec<EdgeKey> = Topology::build(m)
            .unwrap()
            .edges()
            .iter()
            .map(|e| e.key)
            .collect();
        keys.sort();
        keys
    };
    assert_eq!(keys(&mesh), keys(&rotated));
}

#[test]
fn loop_twice_on_icosahedron_valences() {
    let params = SubdivideParams::loop_subdivision().with_iterations(2);
    let result = subdivide_mesh(&icosahedron(), &params).unwrap();
    assert_eq!(result.final_vertices, 162);
    assert_eq!(result.final_faces, 320);

    let topo = Topology::build(&result.mesh).unwrap();
    for v in 0..topo.vertex_count() {
        // Vertex points are emitted first, so the originals keep indices 0..12
        let expected = if v < 12 { 5 } else { 6 };
        assert_eq!(topo.valence(v), expected, "vertex {v}");
    }
}

// =============================================================================
// Open meshes
// =============================================================================

#[test]
fn open_triangle_edge_points_are_midpoints() {
    let topo = Topology::build(&single_triangle()).unwrap();
    for method in [SubdivisionMethod::Loop, SubdivisionMethod::Butterfly] {
        let points = method.scheme().compute_points(&topo);
        for (e, edge) in topo.edges().iter().enumerate() {
            let a = topo.position(edge.key.v1());
            let b = topo.position(edge.key.v2());
            assert_eq!(points.edge_points[e], nalgebra::center(&a, &b));
        }
    }
}

#[test]
fn single_triangle_loop() {
    let out = subdivide_once(&single_triangle(), SubdivisionMethod::Loop).unwrap();
    assert_eq!(out.face_count(), 4);
    assert_eq!(out.vertex_count(), 6);

    // Corners use the interior rule with valence 2, so none stays put
    for corner in single_triangle().positions() {
        assert!(out.positions().all(|p| p != corner));
    }
}

#[test]
fn unit_quad_catmull_clark() {
    let topo = Topology::build(&unit_quad()).unwrap();
    let points = SubdivisionMethod::CatmullClark.scheme().compute_points(&topo);
    assert_eq!(points.face_points.len(), 2);
    assert_eq!(points.edge_points.len(), 5);
    assert_eq!(points.vertex_points.len(), 4);

    let out = subdivide_once(&unit_quad(), SubdivisionMethod::CatmullClark).unwrap();
    assert_eq!(out.vertex_count(), 11);
    assert_eq!(out.face_count(), 12);
}

#[test]
fn butterfly_keeps_original_positions_first() {
    for (_, mesh) in closed_meshes() {
        let out = subdivide_once(&mesh, SubdivisionMethod::Butterfly).unwrap();
        for (i, original) in mesh.positions().enumerate() {
            assert_eq!(out.vertices[i].position, original);
        }
    }
}

// =============================================================================
// Winding
// =============================================================================

#[test]
fn winding_stays_outward_on_convex_meshes() {
    for mesh in [tetrahedron(), octahedron(), icosahedron()] {
        for method in SubdivisionMethod::ALL {
            let out = subdivide_once(&mesh, method).unwrap();
            for [a, b, c] in out.faces() {
                let pa = out.vertices[a as usize].position;
                let pb = out.vertices[b as usize].position;
                let pc = out.vertices[c as usize].position;
                let normal = (pb - pa).cross(&(pc - pa));
                let center = (pa.coords + pb.coords + pc.coords) / 3.0;
                assert!(normal.dot(&center) > 0.0, "{method} flipped a face");
            }
        }
    }
}

// =============================================================================
// Welding
// =============================================================================

#[test]
fn bit_different_corners_do_not_merge() {
    let x = 0.1 + 0.2;
    assert_ne!(x, 0.3);

    let positions = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(x, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.3, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let topo = Topology::from_soup(&positions, &[0, 1, 2, 3, 4, 5]).unwrap();
    assert_eq!(topo.vertex_count(), 5);
    assert_eq!(topo.edge_count(), 6);
    assert_eq!(topo.boundary_edge_count(), 6);
}

#[test]
fn negative_zero_welds() {
    let positions = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(-0.0, 1.0, -0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ];
    let topo = Topology::from_soup(&positions, &[0, 1, 2, 3, 4, 5]).unwrap();
    assert_eq!(topo.vertex_count(), 4);
    assert_eq!(topo.boundary_edge_count(), 4);
}

#[test]
fn triangle_soup_matches_indexed_mesh() {
    for (_, mesh) in closed_meshes() {
        let (positions, indices) = to_soup(&mesh);
        for method in SubdivisionMethod::ALL {
            let from_soup = subdivide_soup(&positions, &indices, method).unwrap();
            let from_indexed = subdivide_once(&mesh, method).unwrap();
            assert_eq!(from_soup.vertex_count(), from_indexed.vertex_count());
            assert_eq!(from_soup.face_count(), from_indexed.face_count());

            // Welding may number vertices differently; the triangles must agree
            for (a, b) in from_soup.faces().zip(from_indexed.faces()) {
                for k in 0..3 {
                    assert_eq!(
                        from_soup.vertices[a[k] as usize].position,
                        from_indexed.vertices[b[k] as usize].position
                    );
                }
            }
        }
    }
}

// =============================================================================
// Non-manifold input and the point sink
// =============================================================================

#[test]
fn non_manifold_edge_is_tolerated() {
    // Three triangles on the edge (0,1)
    let mesh = IndexedMesh::from_raw(
        &[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0,
        ],
        &[0, 1, 2, 1, 0, 3, 0, 1, 4],
    );

    for method in SubdivisionMethod::ALL {
        let params = SubdivideParams::new().with_method(method);
        let result = subdivide_mesh(&mesh, &params).unwrap();
        assert_eq!(result.non_manifold_edges, 1);
        assert_eq!(result.final_faces, 3 * method.face_multiplier());
        assert!(result.mesh.positions().all(|p| p.coords.iter().all(|c| c.is_finite())));
    }
}

#[test]
fn sink_sees_exactly_the_scheme_points() {
    let mesh = octahedron();
    for method in SubdivisionMethod::ALL {
        let params = SubdivideParams::new()
            .with_method(method)
            .with_emit_points(true);
        let mut passes: Vec<SubdivisionPoints> = Vec::new();
        subdivide_mesh_with_sink(&mesh, &params, &mut passes).unwrap();

        let direct = method
            .scheme()
            .compute_points(&Topology::build(&mesh).unwrap());
        assert_eq!(passes, vec![direct]);
    }
}
