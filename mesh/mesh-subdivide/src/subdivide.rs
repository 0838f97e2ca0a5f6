//! Subdivision driver.

use mesh_types::IndexedMesh;
use nalgebra::Point3;
use tracing::{Level, debug, enabled};

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::{SubdivideParams, SubdivisionMethod};
use crate::points::{NullSink, PointSink};
use crate::result::SubdivisionResult;
use crate::scheme::SubdivisionScheme;
use crate::topology::Topology;

/// Subdivide a mesh using the specified parameters.
///
/// Runs `params.iterations` passes of `params.method`. Each pass rebuilds
/// the topology from the previous pass's output.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty (no vertices or faces)
/// - The iteration count is 0
/// - The resulting mesh would exceed `max_faces`
/// - A face references a vertex that does not exist
///
/// # Examples
///
/// ```
/// use mesh_types::icosahedron;
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let params = SubdivideParams::loop_subdivision().with_iterations(2);
/// let result = subdivide_mesh(&icosahedron(), &params)?;
///
/// // 20 * 4^2 faces, V + E vertices per pass
/// assert_eq!(result.final_faces, 320);
/// assert_eq!(result.final_vertices, 162);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    subdivide_mesh_with_sink(mesh, params, &mut NullSink)
}

/// Subdivide a mesh, pushing each pass's computed points to `sink`.
///
/// The sink is only called when `params.emit_points` is set. It never
/// influences the output geometry.
///
/// # Errors
///
/// Same as [`subdivide_mesh`].
///
/// # Examples
///
/// ```
/// use mesh_types::tetrahedron;
/// use mesh_subdivide::{subdivide_mesh_with_sink, SubdivideParams, SubdivisionPoints};
///
/// let params = SubdivideParams::catmull_clark()
///     .with_iterations(2)
///     .with_emit_points(true);
///
/// let mut passes: Vec<SubdivisionPoints> = Vec::new();
/// let result = subdivide_mesh_with_sink(&tetrahedron(), &params, &mut passes)?;
///
/// assert_eq!(passes.len(), 2);
/// assert_eq!(passes[0].face_points.len(), 4);
/// assert_eq!(result.final_faces, 4 * 6 * 6);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh_with_sink(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
    sink: &mut dyn PointSink,
) -> SubdivideResult<SubdivisionResult> {
    validate(mesh)?;
    if params.iterations == 0 {
        return Err(SubdivideError::InvalidIterations(0));
    }

    // Check projected size
    let projected = params.expected_faces(mesh.faces.len());
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: mesh.faces.len(),
            projected,
            max: params.max_faces,
        });
    }

    let scheme = params.method.scheme();
    let mut topology = Topology::build(mesh)?;
    let original = topology.stats();

    debug!(
        "Subdividing mesh: {} faces, {} vertices ({} welded), {} iterations using {}",
        mesh.faces.len(),
        mesh.vertices.len(),
        original.vertices,
        params.iterations,
        params.method
    );

    let mut current = IndexedMesh::new();
    for i in 0..params.iterations {
        if i > 0 {
            topology = Topology::build(&current)?;
        }
        current = run_pass(scheme.as_ref(), &topology, sink, params.emit_points);
        debug!(
            "Iteration {}: {} faces, {} vertices",
            i + 1,
            current.faces.len(),
            current.vertices.len()
        );
    }

    Ok(SubdivisionResult {
        original_faces: original.faces,
        original_edges: original.edges,
        original_vertices: original.vertices,
        final_faces: current.faces.len(),
        final_vertices: current.vertices.len(),
        non_manifold_edges: original.non_manifold_edges,
        iterations: params.iterations,
        method: params.method,
        mesh: current,
    })
}

/// Run a single pass of `method`.
///
/// # Errors
///
/// Returns an error if the mesh is empty or a face references a vertex
/// that does not exist.
///
/// # Examples
///
/// ```
/// use mesh_types::{octahedron, MeshTopology};
/// use mesh_subdivide::{subdivide_once, SubdivisionMethod};
///
/// let refined = subdivide_once(&octahedron(), SubdivisionMethod::Kobbelt)?;
/// assert_eq!(refined.face_count(), 24);
/// assert_eq!(refined.vertex_count(), 6 + 8);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_once(
    mesh: &IndexedMesh,
    method: SubdivisionMethod,
) -> SubdivideResult<IndexedMesh> {
    validate(mesh)?;
    let topology = Topology::build(mesh)?;
    Ok(run_pass(method.scheme().as_ref(), &topology, &mut NullSink, false))
}

/// Run a single pass on flat positions and triangle indices.
///
/// The positions do not need to be welded; exactly equal positions are
/// merged before the topology is built.
///
/// # Errors
///
/// Returns an error if there are no triangles, the index count is not a
/// multiple of 3, or an index is out of range.
pub fn subdivide_soup(
    positions: &[Point3<f64>],
    indices: &[u32],
    method: SubdivisionMethod,
) -> SubdivideResult<IndexedMesh> {
    if positions.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if indices.is_empty() {
        return Err(SubdivideError::NoFaces);
    }
    let topology = Topology::from_soup(positions, indices)?;
    Ok(run_pass(method.scheme().as_ref(), &topology, &mut NullSink, false))
}

fn validate(mesh: &IndexedMesh) -> SubdivideResult<()> {
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(SubdivideError::NoFaces);
    }
    Ok(())
}

/// Compute points, hand them to the sink, rebuild.
fn run_pass(
    scheme: &dyn SubdivisionScheme,
    topology: &Topology,
    sink: &mut dyn PointSink,
    emit: bool,
) -> IndexedMesh {
    let points = scheme.compute_points(topology);
    if emit {
        sink.receive(&points);
    }

    let mesh = scheme.rebuild(topology, &points);

    if enabled!(Level::DEBUG) {
        match Topology::build(&mesh) {
            Ok(check) => debug!("{} pass output: {}", scheme.method(), check.stats()),
            Err(e) => debug!("{} pass output failed re-inspection: {}", scheme.method(), e),
        }
    }

    mesh
}
