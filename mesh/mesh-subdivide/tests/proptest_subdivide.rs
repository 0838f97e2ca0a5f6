//! Property-based tests for subdivision.
//!
//! These tests use proptest to generate random meshes (often non-manifold
//! and degenerate) and verify invariants that hold for any input.
//!
//! Run with: cargo test -p mesh-subdivide -- proptest

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use mesh_subdivide::{
    EdgeKey, SubdivideParams, SubdivisionMethod, SubdivisionPoints, Topology, subdivide_mesh,
    subdivide_mesh_with_sink, subdivide_once,
};
use mesh_types::{IndexedMesh, Vertex};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a random vertex position in a bounded range.
fn arb_position() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-100.0..100.0f64)
}

/// Generate a mesh whose face indices are all valid.
fn arb_mesh(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = IndexedMesh> {
    (3..=max_vertices).prop_flat_map(move |num_vertices| {
        let vertices = prop::collection::vec(
            arb_position().prop_map(|[x, y, z]| Vertex::from_coords(x, y, z)),
            num_vertices,
        );
        let faces = prop::collection::vec(
            prop::array::uniform3(0..num_vertices as u32),
            1..=max_faces,
        );
        (vertices, faces).prop_map(|(vertices, faces)| IndexedMesh { vertices, faces })
    })
}

fn arb_method() -> impl Strategy<Value = SubdivisionMethod> {
    prop::sample::select(SubdivisionMethod::ALL.to_vec())
}

// =============================================================================
// Property Tests: Topology
// =============================================================================

proptest! {
    /// Edge keys do not depend on direction.
    #[test]
    fn edge_key_is_symmetric(a in any::<u32>(), b in any::<u32>()) {
        let key = EdgeKey::new(a, b);
        prop_assert_eq!(key, EdgeKey::new(b, a));
        prop_assert!(key.v1() <= key.v2());
        prop_assert!(key.contains(a) && key.contains(b));
    }

    /// Every edge has a first face and every face points at its own edges.
    #[test]
    fn topology_is_consistent(mesh in arb_mesh(20, 40)) {
        let topo = Topology::build(&mesh).unwrap();
        prop_assert_eq!(topo.face_count(), mesh.faces.len());
        prop_assert!(topo.vertex_count() <= mesh.vertices.len());

        for (f, face) in topo.faces().iter().enumerate() {
            for i in 0..3 {
                let edge = topo.edges()[face.edges[i]];
                prop_assert_eq!(
                    edge.key,
                    EdgeKey::new(face.vertices[i], face.vertices[(i + 1) % 3])
                );
                prop_assert!(edge.face1 <= f);
            }
        }

        let valence_sum: usize = (0..topo.vertex_count()).map(|v| topo.valence(v)).sum();
        prop_assert_eq!(valence_sum, 2 * topo.edge_count());
    }

    /// Rotating the corners of every face leaves the edge set unchanged.
    #[test]
    fn rotation_keeps_edge_set(mesh in arb_mesh(20, 40), shift in 0usize..3) {
        let mut rotated = mesh.clone();
        for face in &mut rotated.faces {
            face.rotate_left(shift);
        }

        let keys = |m: &IndexedMesh| {
            let mut keys: Vec<EdgeKey> =
                Topology::build(m).unwrap().edges().iter().map(|e| e.key).collect();
            keys.sort();
            keys
        };
        prop_assert_eq!(keys(&mesh), keys(&rotated));
    }
}

// =============================================================================
// Property Tests: Subdivision
// =============================================================================

proptest! {
    /// Face count grows by exactly the method's factor and no new point
    /// beyond the per-element budget appears.
    #[test]
    fn counts_stay_within_budget(mesh in arb_mesh(20, 30), method in arb_method()) {
        let topo = Topology::build(&mesh).unwrap();
        let out = subdivide_once(&mesh, method).unwrap();

        prop_assert_eq!(out.faces.len(), mesh.faces.len() * method.face_multiplier());

        let mut budget = topo.vertex_count();
        if method.uses_edge_points() {
            budget += topo.edge_count();
        }
        if method.uses_face_points() {
            budget += topo.face_count();
        }
        prop_assert!(out.vertices.len() <= budget);

        let n = out.vertices.len() as u32;
        prop_assert!(out.faces.iter().flatten().all(|&i| i < n));
    }

    /// Bounded input never produces NaN or infinite positions.
    #[test]
    fn output_is_finite(mesh in arb_mesh(15, 20), method in arb_method()) {
        let out = subdivide_once(&mesh, method).unwrap();
        for v in &out.vertices {
            prop_assert!(v.position.coords.iter().all(|c| c.is_finite()));
        }
    }

    /// Butterfly never moves an input vertex.
    #[test]
    fn butterfly_interpolates(mesh in arb_mesh(20, 30)) {
        let topo = Topology::build(&mesh).unwrap();
        let out = subdivide_once(&mesh, SubdivisionMethod::Butterfly).unwrap();
        for (i, p) in topo.positions().enumerate() {
            prop_assert_eq!(out.vertices[i].position, p);
        }
    }

    /// Emitting points to a sink does not change the result.
    #[test]
    fn sink_does_not_change_geometry(mesh in arb_mesh(12, 12), method in arb_method()) {
        let params = SubdivideParams::new().with_method(method).with_iterations(2);
        let plain = subdivide_mesh(&mesh, &params).unwrap();

        let mut passes: Vec<SubdivisionPoints> = Vec::new();
        let observed =
            subdivide_mesh_with_sink(&mesh, &params.with_emit_points(true), &mut passes).unwrap();

        prop_assert_eq!(passes.len(), 2);
        prop_assert_eq!(plain.mesh, observed.mesh);
    }
}
