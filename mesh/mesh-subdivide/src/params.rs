//! Subdivision parameters.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SubdivideError;

/// Subdivision algorithm to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SubdivisionMethod {
    /// Loop subdivision - approximating scheme for triangle meshes.
    /// Splits every triangle into 4 and smooths all vertices.
    #[default]
    Loop,

    /// Catmull-Clark subdivision applied to triangles.
    /// Every triangle becomes 3 quads, emitted as 6 triangles.
    CatmullClark,

    /// Kobbelt √3 subdivision.
    /// Inserts a centroid per face and flips original edges; 3 triangles per face.
    Kobbelt,

    /// Modified butterfly subdivision - interpolating scheme.
    /// Original vertices stay put; only edge points are inserted.
    Butterfly,
}

impl SubdivisionMethod {
    /// All methods, in the order the CLI lists them.
    pub const ALL: [Self; 4] = [Self::Loop, Self::CatmullClark, Self::Kobbelt, Self::Butterfly];

    /// Number of output triangles produced per input triangle.
    #[must_use]
    pub const fn face_multiplier(&self) -> usize {
        match self {
            Self::Loop | Self::Butterfly => 4,
            Self::CatmullClark => 6,
            Self::Kobbelt => 3,
        }
    }

    /// Check if original vertices keep their positions.
    #[must_use]
    pub const fn is_interpolating(&self) -> bool {
        matches!(self, Self::Butterfly)
    }

    /// Check if this method inserts a point per edge.
    #[must_use]
    pub const fn uses_edge_points(&self) -> bool {
        !matches!(self, Self::Kobbelt)
    }

    /// Check if this method inserts a point per face.
    #[must_use]
    pub const fn uses_face_points(&self) -> bool {
        matches!(self, Self::CatmullClark | Self::Kobbelt)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::CatmullClark => "catmull-clark",
            Self::Kobbelt => "kobbelt",
            Self::Butterfly => "butterfly",
        }
    }
}

impl fmt::Display for SubdivisionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubdivisionMethod {
    type Err = SubdivideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "loop" => Ok(Self::Loop),
            "catmull-clark" | "catmullclark" | "cc" => Ok(Self::CatmullClark),
            "kobbelt" | "sqrt3" => Ok(Self::Kobbelt),
            "butterfly" => Ok(Self::Butterfly),
            _ => Err(SubdivideError::UnknownMethod(s.to_string())),
        }
    }
}

/// Parameters for mesh subdivision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubdivideParams {
    /// Subdivision method to use.
    pub method: SubdivisionMethod,

    /// Number of subdivision iterations.
    pub iterations: u32,

    /// Maximum faces allowed in result (prevents memory issues).
    pub max_faces: usize,

    /// Push the computed vertex/edge/face points to the point sink after
    /// every pass. Never changes the geometry.
    pub emit_points: bool,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            method: SubdivisionMethod::default(),
            iterations: 1,
            max_faces: 10_000_000, // 10M faces max
            emit_points: false,
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for Loop subdivision.
    #[must_use]
    pub fn loop_subdivision() -> Self {
        Self::default().with_method(SubdivisionMethod::Loop)
    }

    /// Create parameters for Catmull-Clark subdivision.
    #[must_use]
    pub fn catmull_clark() -> Self {
        Self::default().with_method(SubdivisionMethod::CatmullClark)
    }

    /// Create parameters for Kobbelt √3 subdivision.
    #[must_use]
    pub fn kobbelt() -> Self {
        Self::default().with_method(SubdivisionMethod::Kobbelt)
    }

    /// Create parameters for Butterfly subdivision.
    #[must_use]
    pub fn butterfly() -> Self {
        Self::default().with_method(SubdivisionMethod::Butterfly)
    }

    /// Set subdivision method.
    #[must_use]
    pub const fn with_method(mut self, method: SubdivisionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Set whether computed points are pushed to the point sink.
    #[must_use]
    pub const fn with_emit_points(mut self, emit: bool) -> Self {
        self.emit_points = emit;
        self
    }

    /// Calculate expected face count after all iterations.
    ///
    /// Saturates instead of overflowing so absurd iteration counts still
    /// trip the `max_faces` guard.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> usize {
        let factor = self.method.face_multiplier();
        let mut faces = current_faces;
        let mut i = 0;
        while i < self.iterations {
            faces = faces.saturating_mul(factor);
            i += 1;
        }
        faces
    }
}
