//! Wavefront OBJ reading and writing.
//!
//! Only geometry is read: `v` lines become vertices and `f` lines become
//! triangles. Polygons are fan-triangulated from their first corner.
//! Face corners may carry texture and normal references (`v/vt`, `v//vn`,
//! `v/vt/vn`); only the position index is used. Negative indices count
//! back from the most recent vertex. Other statements are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::face_corners;

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the file does not exist, a
/// [`IoError::Parse`] error for a malformed `v` or `f` line, and
/// [`IoError::IndexOutOfRange`] when a face refers to a missing vertex.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj("model.obj")?;
/// println!("{} vertices", mesh.vertices.len());
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(e, path))?;
    let mesh = read_obj(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        triangles = mesh.faces.len(),
        "Loaded OBJ"
    );
    Ok(mesh)
}

/// Parse OBJ text from any buffered reader.
///
/// # Errors
///
/// See [`load_obj`].
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut polygon: Vec<u32> = Vec::new();
    let mut skipped = 0usize;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;
        let content = line.split('#').next().unwrap_or_default();
        let mut words = content.split_whitespace();

        match words.next() {
            Some("v") => {
                let mut coords = [0.0; 3];
                for c in &mut coords {
                    let word = words
                        .next()
                        .ok_or_else(|| IoError::parse(line_no, "vertex needs 3 coordinates"))?;
                    *c = word.parse().map_err(|_| {
                        IoError::parse(line_no, format!("bad coordinate '{word}'"))
                    })?;
                }
                mesh.vertices
                    .push(Vertex::from_coords(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                polygon.clear();
                for word in words {
                    polygon.push(resolve_index(word, mesh.vertices.len(), line_no)?);
                }
                if polygon.len() < 3 {
                    return Err(IoError::parse(
                        line_no,
                        format!("face needs at least 3 vertices, got {}", polygon.len()),
                    ));
                }
                let first = polygon[0];
                mesh.faces
                    .extend(polygon[1..].windows(2).map(|w| [first, w[0], w[1]]));
            }
            Some(_) => skipped += 1,
            None => {}
        }
    }

    // Positive indices may point forward, so range checks wait for the end
    let vertex_count = mesh.vertices.len();
    if let Some(&index) = mesh
        .faces
        .iter()
        .flatten()
        .find(|&&i| i as usize >= vertex_count)
    {
        return Err(IoError::IndexOutOfRange {
            index: i64::from(index),
            vertex_count,
        });
    }

    if skipped > 0 {
        debug!(skipped, "OBJ statements other than v/f ignored");
    }
    Ok(mesh)
}

/// Turn one face corner (`7`, `7/2`, `7//3`, `-1/2/3`) into a 0-based index.
fn resolve_index(word: &str, vertex_count: usize, line_no: usize) -> IoResult<u32> {
    let position = word.split('/').next().unwrap_or_default();
    let index: i64 = position
        .parse()
        .map_err(|_| IoError::parse(line_no, format!("bad face corner '{word}'")))?;

    let resolved = match index {
        0 => return Err(IoError::parse(line_no, "OBJ indices start at 1")),
        i if i > 0 => i - 1,
        i => i64::try_from(vertex_count).unwrap_or(i64::MAX) + i,
    };

    u32::try_from(resolved).map_err(|_| IoError::IndexOutOfRange {
        index: resolved,
        vertex_count,
    })
}

/// Save a mesh to an OBJ file.
///
/// Coordinates are written with the shortest representation that reads
/// back to the same `f64`.
///
/// # Errors
///
/// Returns an error if the file cannot be written or a face refers to a
/// missing vertex.
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        triangles = mesh.faces.len(),
        "Saved OBJ"
    );
    Ok(())
}

/// Write a mesh as OBJ to any writer.
///
/// # Errors
///
/// Returns an error if writing fails or a face refers to a missing vertex.
pub fn write_obj<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    writeln!(
        writer,
        "# CortenForge mesh-io: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.faces.len()
    )?;

    for v in &mesh.vertices {
        let p = v.position;
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    for face in &mesh.faces {
        face_corners(mesh, face)?;
        let [a, b, c] = face.map(|i| u64::from(i) + 1);
        writeln!(writer, "f {a} {b} {c}")?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{MeshTopology, Point3, icosahedron, unit_quad};

    fn parse(text: &str) -> IoResult<IndexedMesh> {
        read_obj(text.as_bytes())
    }

    #[test]
    fn reads_vertices_and_triangles() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0.5 1.5 0\nf 1 2 3 4 5\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn texture_and_normal_references_are_ignored() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
f 1//1 2//1 3//1
f 3/1 2/1 1/1
";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 1, 2], [2, 1, 0]]);
    }

    #[test]
    fn negative_indices_count_back() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nv 1 1 0\nf -3 -2 -1\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2], [1, 2, 3]]);
    }

    #[test]
    fn comments_groups_and_blank_lines_are_skipped() {
        let text = "# header\n\nmtllib a.mtl\no thing\ng part\ns off\n\
                    v 0 0 0 # origin\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn forward_references_are_accepted() {
        let mesh = parse("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            IoError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            }
        ));

        let err = parse("v 0 0 0\nf -1 -2 -3\n").unwrap_err();
        assert!(matches!(err, IoError::IndexOutOfRange { index: -1, .. }));
    }

    #[test]
    fn malformed_lines_report_their_number() {
        assert!(matches!(
            parse("v 0 0 0\nv 1 0\n").unwrap_err(),
            IoError::Parse { line: 2, .. }
        ));
        assert!(matches!(
            parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err(),
            IoError::Parse { line: 3, .. }
        ));
        assert!(matches!(
            parse("v 0 0 0\nf 0 1 1\n").unwrap_err(),
            IoError::Parse { line: 2, .. }
        ));
        assert!(matches!(
            parse("v a b c\n").unwrap_err(),
            IoError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn write_then_read_is_exact() {
        let mut mesh = icosahedron();
        mesh.vertices[0].position = Point3::new(0.1 + 0.2, -1e-300, 1.0 / 3.0);

        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let loaded = read_obj(out.as_slice()).unwrap();
        assert_eq!(loaded, mesh);
    }

    #[test]
    fn written_faces_are_one_based() {
        let mut out = Vec::new();
        write_obj(&unit_quad(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().any(|l| l == "f 1 2 3"));
        assert!(text.lines().all(|l| !l.starts_with("f 0")));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        save_obj(&unit_quad(), &path).unwrap();
        assert_eq!(load_obj(&path).unwrap(), unit_quad());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_obj("nonexistent_file_12345.obj"),
            Err(IoError::FileNotFound { .. })
        ));
    }
}
