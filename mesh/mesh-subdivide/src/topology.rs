//! Shared vertex/edge/face adjacency for the subdivision schemes.
//!
//! Every scheme consumes the same [`Topology`]: a welded vertex list, one
//! [`TopoEdge`] per undirected vertex pair with at most two adjacent faces,
//! and one [`TopoFace`] per input triangle that knows its three edges.

#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::{trace, warn};

use crate::error::{SubdivideError, SubdivideResult};
use crate::weld::PointWelder;

/// Unordered vertex pair identifying an edge.
///
/// The smaller index is always stored first, so `EdgeKey::new(a, b)` and
/// `EdgeKey::new(b, a)` are equal and hash the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    v1: u32,
    v2: u32,
}

impl EdgeKey {
    /// Create a normalized key for the pair `(a, b)`.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { v1: a, v2: b }
        } else {
            Self { v1: b, v2: a }
        }
    }

    /// Smaller vertex index.
    #[inline]
    #[must_use]
    pub const fn v1(&self) -> u32 {
        self.v1
    }

    /// Larger vertex index.
    #[inline]
    #[must_use]
    pub const fn v2(&self) -> u32 {
        self.v2
    }

    /// Check if `v` is one of the endpoints.
    #[inline]
    #[must_use]
    pub const fn contains(&self, v: u32) -> bool {
        self.v1 == v || self.v2 == v
    }

    /// The endpoint that is not `v`, or `None` if `v` is not on this edge.
    #[must_use]
    pub const fn other(&self, v: u32) -> Option<u32> {
        if self.v1 == v {
            Some(self.v2)
        } else if self.v2 == v {
            Some(self.v1)
        } else {
            None
        }
    }
}

/// A welded vertex and its incident edges and faces.
#[derive(Debug, Clone, PartialEq)]
pub struct TopoVertex {
    /// Position.
    pub position: Point3<f64>,
    /// Indices of incident edges, in edge creation order.
    pub connected_edges: Vec<usize>,
    /// Indices of faces reached through the incident edges.
    ///
    /// A face shows up once per incident edge it borders, so interior faces
    /// usually appear twice.
    pub connected_faces: Vec<usize>,
}

/// An undirected edge with one or two adjacent faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopoEdge {
    /// Endpoints.
    pub key: EdgeKey,
    /// First face that used this edge.
    pub face1: usize,
    /// Second face, `None` for a boundary edge.
    pub face2: Option<usize>,
}

impl TopoEdge {
    /// Check if this edge borders only one face.
    #[inline]
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.face2.is_none()
    }

    /// Check if `face` is one of the adjacent faces.
    #[inline]
    #[must_use]
    pub fn touches_face(&self, face: usize) -> bool {
        self.face1 == face || self.face2 == Some(face)
    }

    /// The adjacent face that is not `face`.
    #[must_use]
    pub fn other_face(&self, face: usize) -> Option<usize> {
        if self.face1 == face {
            self.face2
        } else if self.face2 == Some(face) {
            Some(self.face1)
        } else {
            None
        }
    }
}

/// A triangle in source winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopoFace {
    /// Welded vertex indices.
    pub vertices: [u32; 3],
    /// `edges[i]` is the edge from `vertices[i]` to `vertices[(i + 1) % 3]`.
    pub edges: [usize; 3],
}

impl TopoFace {
    /// The vertex of this face that is not on `key`.
    #[must_use]
    pub fn opposite_vertex(&self, key: EdgeKey) -> Option<u32> {
        self.vertices.iter().copied().find(|&v| !key.contains(v))
    }

    /// Check if `v` is a corner of this face.
    #[inline]
    #[must_use]
    pub fn contains(&self, v: u32) -> bool {
        self.vertices.contains(&v)
    }
}

/// Welded adjacency structure shared by all schemes.
///
/// # Example
///
/// ```
/// use mesh_subdivide::{EdgeKey, Topology};
/// use mesh_types::unit_quad;
///
/// let topo = Topology::build(&unit_quad())?;
/// assert_eq!(topo.vertex_count(), 4);
/// assert_eq!(topo.edge_count(), 5);
/// assert_eq!(topo.boundary_edge_count(), 4);
///
/// let diagonal = topo.edge(EdgeKey::new(2, 0)).expect("diagonal exists");
/// assert!(!topo.edges()[diagonal].is_boundary());
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Topology {
    vertices: Vec<TopoVertex>,
    edges: Vec<TopoEdge>,
    faces: Vec<TopoFace>,
    edge_lookup: HashMap<EdgeKey, usize>,
    non_manifold_edges: usize,
}

impl Topology {
    /// Build the topology of an indexed mesh.
    ///
    /// Vertices with bit-identical positions are welded first, so unwelded
    /// triangle soup (STL) gets the same topology as its indexed form.
    ///
    /// # Errors
    ///
    /// Returns [`SubdivideError::InvalidVertexIndex`] if a face references a
    /// vertex past the end of `mesh.vertices`.
    pub fn build(mesh: &IndexedMesh) -> SubdivideResult<Self> {
        let positions: Vec<Point3<f64>> = mesh.positions().collect();
        Self::assemble(&positions, mesh.faces.iter().copied())
    }

    /// Build the topology from flat positions and triangle indices.
    ///
    /// # Errors
    ///
    /// Returns [`SubdivideError::IndexCountNotTriangles`] if `indices.len()`
    /// is not a multiple of 3, or [`SubdivideError::InvalidVertexIndex`] for
    /// an index past the end of `positions`.
    pub fn from_soup(positions: &[Point3<f64>], indices: &[u32]) -> SubdivideResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(SubdivideError::IndexCountNotTriangles(indices.len()));
        }
        Self::assemble(
            positions,
            indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]),
        )
    }

    fn assemble(
        positions: &[Point3<f64>],
        triangles: impl ExactSizeIterator<Item = [u32; 3]>,
    ) -> SubdivideResult<Self> {
        let face_count = triangles.len();

        // Weld positions; remap[i] is the unique vertex for input vertex i
        let mut welder = PointWelder::with_capacity(positions.len());
        let remap: Vec<u32> = positions.iter().map(|&p| welder.insert(p)).collect();

        let mut faces = Vec::with_capacity(face_count);
        let mut edges: Vec<TopoEdge> = Vec::with_capacity(face_count * 3 / 2 + 3);
        let mut edge_lookup: HashMap<EdgeKey, usize> = HashMap::with_capacity(face_count * 2);
        let mut overloaded: HashSet<usize> = HashSet::new();

        for (face_idx, tri) in triangles.enumerate() {
            let mut vertices = [0_u32; 3];
            for (slot, &index) in vertices.iter_mut().zip(&tri) {
                *slot = *remap.get(index as usize).ok_or(SubdivideError::InvalidVertexIndex {
                    face: face_idx,
                    index,
                    vertex_count: positions.len(),
                })?;
            }

            let mut face_edges = [0_usize; 3];
            for i in 0..3 {
                let key = EdgeKey::new(vertices[i], vertices[(i + 1) % 3]);
                face_edges[i] = match edge_lookup.entry(key) {
                    Entry::Occupied(slot) => {
                        let edge_idx = *slot.get();
                        let edge = &mut edges[edge_idx];
                        if edge.face2.is_some() {
                            trace!(
                                edge = edge_idx,
                                face = face_idx,
                                "Third face on edge overwrites second"
                            );
                            overloaded.insert(edge_idx);
                        }
                        edge.face2 = Some(face_idx);
                        edge_idx
                    }
                    Entry::Vacant(slot) => {
                        edges.push(TopoEdge {
                            key,
                            face1: face_idx,
                            face2: None,
                        });
                        *slot.insert(edges.len() - 1)
                    }
                };
            }

            faces.push(TopoFace {
                vertices,
                edges: face_edges,
            });
        }

        let mut vertices: Vec<TopoVertex> = welder
            .into_points()
            .into_iter()
            .map(|position| TopoVertex {
                position,
                connected_edges: Vec::new(),
                connected_faces: Vec::new(),
            })
            .collect();

        for (edge_idx, edge) in edges.iter().enumerate() {
            for endpoint in [edge.key.v1, edge.key.v2] {
                let vertex = &mut vertices[endpoint as usize];
                vertex.connected_edges.push(edge_idx);
                vertex.connected_faces.push(edge.face1);
                if let Some(face2) = edge.face2 {
                    vertex.connected_faces.push(face2);
                }
            }
        }

        if !overloaded.is_empty() {
            warn!(
                edges = overloaded.len(),
                "Non-manifold edges: only the first and last adjacent faces are kept"
            );
        }

        Ok(Self {
            vertices,
            edges,
            faces,
            edge_lookup,
            non_manifold_edges: overloaded.len(),
        })
    }

    /// Welded vertices.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[TopoVertex] {
        &self.vertices
    }

    /// Edges in creation order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[TopoEdge] {
        &self.edges
    }

    /// Faces in input order.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[TopoFace] {
        &self.faces
    }

    /// Number of welded vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of unique edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Index of the edge with the given endpoints.
    #[must_use]
    pub fn edge(&self, key: EdgeKey) -> Option<usize> {
        self.edge_lookup.get(&key).copied()
    }

    /// Number of edges with a single adjacent face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    /// Number of edges that were claimed by more than two faces.
    #[inline]
    #[must_use]
    pub const fn non_manifold_edge_count(&self) -> usize {
        self.non_manifold_edges
    }

    /// Number of edges incident to `vertex`.
    #[inline]
    #[must_use]
    pub fn valence(&self, vertex: usize) -> usize {
        self.vertices[vertex].connected_edges.len()
    }

    /// Number of boundary edges incident to `vertex`.
    #[must_use]
    pub fn boundary_valence(&self, vertex: usize) -> usize {
        self.vertices[vertex]
            .connected_edges
            .iter()
            .filter(|&&e| self.edges[e].is_boundary())
            .count()
    }

    /// Check if `vertex` lies on a boundary edge.
    #[must_use]
    pub fn is_boundary_vertex(&self, vertex: usize) -> bool {
        self.boundary_valence(vertex) > 0
    }

    /// The far endpoint of `edge` as seen from `vertex`.
    ///
    /// For a degenerate edge whose endpoints coincide this is `vertex` itself.
    #[must_use]
    pub fn other_vertex(&self, edge: usize, vertex: u32) -> u32 {
        self.edges[edge].key.other(vertex).unwrap_or(vertex)
    }

    /// The corner of `face` that is not on `edge`.
    #[must_use]
    pub fn opposite_vertex(&self, face: usize, edge: usize) -> Option<u32> {
        self.faces[face].opposite_vertex(self.edges[edge].key)
    }

    /// Positions of the far endpoints of every edge incident to `vertex`.
    pub fn neighbor_positions(&self, vertex: usize) -> impl Iterator<Item = Point3<f64>> + '_ {
        let v = vertex as u32;
        self.vertices[vertex]
            .connected_edges
            .iter()
            .map(move |&e| self.vertices[self.other_vertex(e, v) as usize].position)
    }

    /// Position of a welded vertex.
    #[inline]
    #[must_use]
    pub fn position(&self, vertex: u32) -> Point3<f64> {
        self.vertices[vertex as usize].position
    }

    /// Iterate over welded vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Summarize counts and valence range.
    #[must_use]
    pub fn stats(&self) -> TopologyStats {
        let valences = (0..self.vertices.len()).map(|v| self.valence(v));
        TopologyStats {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            faces: self.face_count(),
            boundary_edges: self.boundary_edge_count(),
            non_manifold_edges: self.non_manifold_edges,
            min_valence: valences.clone().min().unwrap_or(0),
            max_valence: valences.max().unwrap_or(0),
        }
    }
}

/// Counts describing a [`Topology`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologyStats {
    /// Welded vertex count.
    pub vertices: usize,
    /// Unique edge count.
    pub edges: usize,
    /// Face count.
    pub faces: usize,
    /// Edges with one adjacent face.
    pub boundary_edges: usize,
    /// Edges claimed by more than two faces.
    pub non_manifold_edges: usize,
    /// Smallest vertex valence.
    pub min_valence: usize,
    /// Largest vertex valence.
    pub max_valence: usize,
}

impl TopologyStats {
    /// Check if every edge has exactly two faces.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    /// Euler characteristic `V - E + F`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

impl fmt::Display for TopologyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} edges, {} faces ({} boundary, {} non-manifold), valence {}..={}",
            self.vertices,
            self.edges,
            self.faces,
            self.boundary_edges,
            self.non_manifold_edges,
            self.min_valence,
            self.max_valence
        )
    }
}
