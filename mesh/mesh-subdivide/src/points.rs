//! Computed subdivision points and the sink that observes them.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::params::SubdivisionMethod;

/// New positions computed by one scheme for one pass.
///
/// Indexed in parallel with the [`Topology`](crate::Topology) the scheme ran
/// on: `vertex_points[v]`, `edge_points[e]`, `face_points[f]`. A scheme
/// leaves the tables it does not use empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubdivisionPoints {
    /// Scheme that produced these points.
    pub method: SubdivisionMethod,
    /// Refined position of every original vertex.
    pub vertex_points: Vec<Point3<f64>>,
    /// One inserted point per edge.
    pub edge_points: Vec<Point3<f64>>,
    /// One inserted point per face.
    pub face_points: Vec<Point3<f64>>,
}

impl SubdivisionPoints {
    /// Create empty tables for `method`.
    #[must_use]
    pub const fn new(method: SubdivisionMethod) -> Self {
        Self {
            method,
            vertex_points: Vec::new(),
            edge_points: Vec::new(),
            face_points: Vec::new(),
        }
    }

    /// Total number of computed points, before welding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertex_points.len() + self.edge_points.len() + self.face_points.len()
    }

    /// Check if nothing was computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receives the computed points after every subdivision pass.
///
/// Used for inspection and debug output. Sinks observe only; nothing they do
/// affects the subdivided geometry.
pub trait PointSink {
    /// Called once per pass with that pass's points.
    fn receive(&mut self, points: &SubdivisionPoints);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PointSink for NullSink {
    fn receive(&mut self, _points: &SubdivisionPoints) {}
}

/// Collects a copy of every pass.
impl PointSink for Vec<SubdivisionPoints> {
    fn receive(&mut self, points: &SubdivisionPoints) {
        self.push(points.clone());
    }
}

impl<S: PointSink + ?Sized> PointSink for &mut S {
    fn receive(&mut self, points: &SubdivisionPoints) {
        (**self).receive(points);
    }
}
