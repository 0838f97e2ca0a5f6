//! Mesh file I/O for CortenForge.
//!
//! Loads and saves indexed triangle meshes in the two formats the
//! subdivision tools exchange:
//!
//! - **STL** (Stereolithography) - binary and ASCII, detected on load
//! - **OBJ** (Wavefront) - ASCII geometry, polygons fan-triangulated
//!
//! STL has no shared vertices, so a loaded STL is a triangle soup with three
//! vertices per face. OBJ keeps the file's indexing.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_mesh, save_mesh};
//!
//! // Format detected from the extension
//! let mesh = load_mesh("model.stl")?;
//! save_mesh(&mesh, "model.obj")?;
//! # Ok::<(), mesh_io::IoError>(())
//! ```
//!
//! Every format also has a reader/writer pair (`read_stl`, `write_obj`, ...)
//! that works on in-memory buffers.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod obj;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, read_obj, save_obj, write_obj};
pub use stl::{load_stl, read_stl, save_stl, write_stl};

use std::path::Path;

use mesh_types::{IndexedMesh, Point3};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL, binary or ASCII.
    Stl,
    /// Wavefront OBJ.
    Obj,
}

impl MeshFormat {
    /// All supported formats.
    pub const ALL: [Self; 2] = [Self::Stl, Self::Obj];

    /// Detect format from a file extension, ignoring case.
    ///
    /// Returns `None` when the path has no extension or an unsupported one.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|format| ext.eq_ignore_ascii_case(format.extension()))
    }

    /// Like [`MeshFormat::from_path`], but reports the extension on failure.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownFormat`] when the extension is missing or
    /// unsupported.
    pub fn require<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        Self::from_path(path).ok_or_else(|| IoError::UnknownFormat {
            extension: path
                .extension()
                .map_or_else(|| "(none)".to_string(), |e| e.to_string_lossy().into_owned()),
        })
    }

    /// Canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

impl std::fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Stl => "STL",
            Self::Obj => "OBJ",
        })
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The extension does not name a supported format
/// - The file cannot be read
/// - The content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    match MeshFormat::require(path)? {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Obj => load_obj(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// STL is written in the binary layout.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file cannot be
/// written, or a face refers to a missing vertex.
pub fn save_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match MeshFormat::require(path)? {
        MeshFormat::Stl => save_stl(mesh, path, true),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

/// Positions of a face's corners, or the first index with no vertex.
pub(crate) fn face_corners(mesh: &IndexedMesh, face: &[u32; 3]) -> IoResult<[Point3<f64>; 3]> {
    let corner = |i: u32| {
        mesh.vertices
            .get(i as usize)
            .map(|v| v.position)
            .ok_or(IoError::IndexOutOfRange {
                index: i64::from(i),
                vertex_count: mesh.vertices.len(),
            })
    };
    Ok([corner(face[0])?, corner(face[1])?, corner(face[2])?])
}
