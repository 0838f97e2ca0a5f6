//! JSON output for the points computed during subdivision.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mesh_subdivide::{PointSink, SubdivisionPoints};

/// Collects every pass's points and writes them as one JSON array.
///
/// Sinks cannot fail mid-pass, so the file is written by [`JsonPointSink::finish`].
pub struct JsonPointSink {
    path: PathBuf,
    passes: Vec<SubdivisionPoints>,
}

impl JsonPointSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            passes: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the collected passes and return how many there were.
    pub fn finish(self) -> Result<usize> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.passes)
            .with_context(|| format!("Failed to write points to {}", self.path.display()))?;
        writer.flush()?;
        Ok(self.passes.len())
    }
}

impl PointSink for JsonPointSink {
    fn receive(&mut self, points: &SubdivisionPoints) {
        tracing::trace!(points = points.len(), "Buffered subdivision points");
        self.passes.push(points.clone());
    }
}
