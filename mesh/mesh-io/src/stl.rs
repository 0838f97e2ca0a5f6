//! STL (Stereolithography) reading and writing.
//!
//! STL stores every triangle with its own three corners, so a loaded mesh is
//! an unwelded triangle soup: `3 * F` vertices and faces `[3i, 3i + 1, 3i + 2]`.
//! Welding is left to the consumer.
//!
//! # Layout detection
//!
//! A buffer is binary when its length is exactly `84 + 50 * count`, where
//! `count` is the little-endian `u32` after the 80-byte header. Otherwise it
//! is ASCII when it starts with `solid`, and binary (and therefore truncated)
//! when it does not. The size test comes first because many binary exporters
//! write `solid` into the header.
//!
//! # Binary layout
//!
//! ```text
//! UINT8[80]    header
//! UINT32       triangle count
//! foreach triangle
//!     REAL32[3] normal
//!     REAL32[3] corner 1
//!     REAL32[3] corner 2
//!     REAL32[3] corner 3
//!     UINT16    attribute byte count
//! end
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, Point3, Vector3, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::face_corners;

const HEADER_SIZE: usize = 80;

/// Header plus triangle count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Normal, three corners and the attribute word.
const TRIANGLE_SIZE: usize = 50;

/// Load a mesh from an STL file, ASCII or binary.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the file does not exist, and a
/// parse error when the content is neither valid ASCII nor binary STL.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl("model.stl")?;
/// println!("{} triangles", mesh.faces.len());
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| IoError::from_open(e, path))?;
    let mesh = read_stl(&bytes)?;
    debug!(
        path = %path.display(),
        triangles = mesh.faces.len(),
        "Loaded STL"
    );
    Ok(mesh)
}

/// Parse an in-memory STL buffer, detecting the layout.
///
/// # Errors
///
/// Returns an error when the buffer is too small, a binary body is
/// truncated, or an ASCII facet is malformed.
pub fn read_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if is_binary(bytes) {
        return read_binary(bytes);
    }

    let text = String::from_utf8_lossy(bytes);
    if text.trim_start().starts_with("solid") {
        read_ascii(&text)
    } else if bytes.len() >= PREAMBLE_SIZE {
        read_binary(bytes)
    } else {
        Err(IoError::invalid_content("too small to be an STL file"))
    }
}

fn declared_triangles(bytes: &[u8]) -> Option<u32> {
    let count = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([count[0], count[1], count[2], count[3]]))
}

fn is_binary(bytes: &[u8]) -> bool {
    declared_triangles(bytes).is_some_and(|count| {
        (count as usize)
            .checked_mul(TRIANGLE_SIZE)
            .and_then(|body| body.checked_add(PREAMBLE_SIZE))
            == Some(bytes.len())
    })
}

fn read_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    let declared = declared_triangles(bytes)
        .ok_or_else(|| IoError::invalid_content("binary STL shorter than its header"))?;

    let body = &bytes[PREAMBLE_SIZE..];
    let available = body.len() / TRIANGLE_SIZE;
    if available < declared as usize {
        return Err(IoError::TruncatedStl {
            declared,
            available,
        });
    }

    let mut mesh = IndexedMesh::with_capacity(declared as usize * 3, declared as usize);
    for record in body.chunks_exact(TRIANGLE_SIZE).take(declared as usize) {
        // Stored normals are ignored
        push_triangle(
            &mut mesh,
            [
                read_corner(&record[12..24]),
                read_corner(&record[24..36]),
                read_corner(&record[36..48]),
            ],
        )?;
    }

    Ok(mesh)
}

fn read_corner(buf: &[u8]) -> Vertex {
    let coord = |at: usize| {
        f64::from(f32::from_le_bytes([
            buf[at],
            buf[at + 1],
            buf[at + 2],
            buf[at + 3],
        ]))
    };
    Vertex::from_coords(coord(0), coord(4), coord(8))
}

fn read_ascii(text: &str) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut corners: Vec<Vertex> = Vec::with_capacity(3);
    let mut in_facet = false;

    for (number, line) in text.lines().enumerate() {
        let line_no = number + 1;
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                in_facet = true;
                corners.clear();
            }
            "vertex" => {
                if !in_facet {
                    return Err(IoError::parse(line_no, "vertex outside a facet"));
                }
                let mut coord = || -> IoResult<f64> {
                    let word = words
                        .next()
                        .ok_or_else(|| IoError::parse(line_no, "vertex needs 3 coordinates"))?;
                    word.parse::<f64>()
                        .map_err(|_| IoError::parse(line_no, format!("bad coordinate '{word}'")))
                };
                let (x, y, z) = (coord()?, coord()?, coord()?);
                corners.push(Vertex::from_coords(x, y, z));
            }
            "endfacet" => {
                let [a, b, c] = <[Vertex; 3]>::try_from(std::mem::take(&mut corners))
                    .map_err(|v| {
                        IoError::parse(line_no, format!("facet has {} vertices", v.len()))
                    })?;
                push_triangle(&mut mesh, [a, b, c])?;
                in_facet = false;
            }
            "endsolid" => break,
            // solid, outer loop, endloop
            _ => {}
        }
    }

    Ok(mesh)
}

fn push_triangle(mesh: &mut IndexedMesh, corners: [Vertex; 3]) -> IoResult<()> {
    let base = u32::try_from(mesh.vertices.len() + 2)
        .map_err(|_| IoError::invalid_content("more vertices than u32 indices can address"))?
        - 2;
    mesh.vertices.extend(corners);
    mesh.faces.push([base, base + 1, base + 2]);
    Ok(())
}

/// Save a mesh to an STL file.
///
/// `binary` selects the binary layout; otherwise ASCII is written with
/// full `f64` precision.
///
/// # Errors
///
/// Returns an error if the file cannot be written or a face refers to a
/// missing vertex.
///
/// # Example
///
/// ```no_run
/// use mesh_io::save_stl;
/// use mesh_types::octahedron;
///
/// save_stl(&octahedron(), "octahedron.stl", true)?;
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &IndexedMesh, path: P, binary: bool) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_stl(mesh, &mut writer, binary)?;
    writer.flush()?;
    debug!(
        path = %path.display(),
        triangles = mesh.faces.len(),
        binary,
        "Saved STL"
    );
    Ok(())
}

/// Write a mesh as STL to any writer.
///
/// # Errors
///
/// Returns an error if writing fails or a face refers to a missing vertex.
pub fn write_stl<W: Write>(mesh: &IndexedMesh, writer: W, binary: bool) -> IoResult<()> {
    if binary {
        write_binary(mesh, writer)
    } else {
        write_ascii(mesh, writer)
    }
}

fn facet_normal([a, b, c]: &[Point3<f64>; 3]) -> Vector3<f64> {
    (b - a)
        .cross(&(c - a))
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

fn write_binary<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"binary STL written by CortenForge mesh-io";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.faces.len())
        .map_err(|_| IoError::invalid_content("binary STL holds at most u32::MAX triangles"))?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; TRIANGLE_SIZE];
    for face in &mesh.faces {
        let corners = face_corners(mesh, face)?;
        let normal = facet_normal(&corners);

        let vectors = std::iter::once(normal).chain(corners.iter().map(|p| p.coords));
        for (slot, v) in vectors.enumerate() {
            for (axis, value) in v.iter().enumerate() {
                let at = slot * 12 + axis * 4;
                #[allow(clippy::cast_possible_truncation)]
                // STL stores single precision
                let value = *value as f32;
                record[at..at + 4].copy_from_slice(&value.to_le_bytes());
            }
        }
        // Attribute byte count stays zero
        writer.write_all(&record)?;
    }

    Ok(())
}

fn write_ascii<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    for face in &mesh.faces {
        let corners = face_corners(mesh, face)?;
        let n = facet_normal(&corners);

        writeln!(writer, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for p in &corners {
            writeln!(writer, "      vertex {:e} {:e} {:e}", p.x, p.y, p.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::unnecessary_raw_string_hashes
)]
mod tests {
    use super::*;
    use mesh_types::{MeshTopology, octahedron, single_triangle};

    const ASCII_TRIANGLE: &[u8] = br#"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test"#;

    fn to_bytes(mesh: &IndexedMesh, binary: bool) -> Vec<u8> {
        let mut out = Vec::new();
        write_stl(mesh, &mut out, binary).unwrap();
        out
    }

    #[test]
    fn parses_ascii() {
        let mesh = read_stl(ASCII_TRIANGLE).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[1].position, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn binary_size_and_layout() {
        let bytes = to_bytes(&octahedron(), true);
        assert_eq!(bytes.len(), PREAMBLE_SIZE + 8 * TRIANGLE_SIZE);
        assert_eq!(declared_triangles(&bytes), Some(8));
        assert!(is_binary(&bytes));
    }

    #[test]
    fn binary_round_trip_is_a_soup() {
        let original = octahedron();
        let loaded = read_stl(&to_bytes(&original, true)).unwrap();

        assert_eq!(loaded.face_count(), 8);
        assert_eq!(loaded.vertex_count(), 24);
        for (f, face) in original.faces.iter().enumerate() {
            for k in 0..3 {
                // Unit coordinates survive single precision exactly
                assert_eq!(
                    loaded.vertices[3 * f + k].position,
                    original.vertices[face[k] as usize].position
                );
            }
        }
    }

    #[test]
    fn ascii_round_trip_keeps_full_precision() {
        let mut mesh = single_triangle();
        mesh.vertices[1].position.x = 0.1 + 0.2;

        let loaded = read_stl(&to_bytes(&mesh, false)).unwrap();
        assert_eq!(loaded.vertices[1].position.x, 0.1 + 0.2);
    }

    #[test]
    fn binary_header_starting_with_solid() {
        let mut bytes = to_bytes(&single_triangle(), true);
        bytes[..5].copy_from_slice(b"solid");

        let mesh = read_stl(&bytes).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn truncated_binary_is_reported() {
        let mut bytes = to_bytes(&octahedron(), true);
        bytes.truncate(PREAMBLE_SIZE + 3 * TRIANGLE_SIZE + 10);

        let err = read_stl(&bytes).unwrap_err();
        assert!(matches!(
            err,
            IoError::TruncatedStl {
                declared: 8,
                available: 3
            }
        ));
    }

    #[test]
    fn short_facet_is_a_parse_error() {
        let text = b"solid s\nfacet normal 0 0 1\nouter loop\n\
                     vertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid s\n";
        let err = read_stl(text).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 7, .. }));
    }

    #[test]
    fn bad_coordinate_reports_line() {
        let text = b"solid s\nfacet normal 0 0 1\nouter loop\nvertex 0 zero 0\n";
        let err = read_stl(text).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 4, .. }));
    }

    #[test]
    fn tiny_buffer_is_rejected() {
        assert!(matches!(
            read_stl(b"abc"),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn degenerate_facet_gets_zero_normal() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(facet_normal(&[p, p, p]), Vector3::zeros());
    }

    #[test]
    fn dangling_index_is_an_error_on_write() {
        let mut mesh = single_triangle();
        mesh.faces.push([0, 1, 9]);
        let err = write_stl(&mesh, Vec::new(), true).unwrap_err();
        assert!(matches!(
            err,
            IoError::IndexOutOfRange {
                index: 9,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        for binary in [true, false] {
            let path = dir.path().join(format!("octahedron_{binary}.stl"));
            save_stl(&octahedron(), &path, binary).unwrap();
            let loaded = load_stl(&path).unwrap();
            assert_eq!(loaded.face_count(), 8);
        }
    }

    #[test]
    fn missing_file() {
        let err = load_stl("nonexistent_file_12345.stl").unwrap_err();
        assert!(matches!(
            err,
            IoError::FileNotFound { path } if path.ends_with("nonexistent_file_12345.stl")
        ));
    }
}
