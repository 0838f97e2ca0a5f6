//! Exact-position welding.
//!
//! Points merge only when their coordinates are bit-for-bit equal, with
//! `-0.0` treated as `0.0`. Mathematically equal values that round
//! differently stay separate.

#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use nalgebra::Point3;

/// Hashable key for a position, built from the coordinate bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PositionKey([u64; 3]);

impl PositionKey {
    pub(crate) fn new(p: &Point3<f64>) -> Self {
        Self([coord_bits(p.x), coord_bits(p.y), coord_bits(p.z)])
    }
}

#[inline]
fn coord_bits(v: f64) -> u64 {
    // -0.0 == 0.0 but the bit patterns differ
    if v == 0.0 { 0_u64 } else { v.to_bits() }
}

/// Accumulates unique points in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct PointWelder {
    lookup: HashMap<PositionKey, u32>,
    points: Vec<Point3<f64>>,
}

impl PointWelder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity(capacity),
            points: Vec::with_capacity(capacity),
        }
    }

    /// Index of `p`, inserting it if no bit-equal point was seen before.
    pub(crate) fn insert(&mut self, p: Point3<f64>) -> u32 {
        let next = self.points.len() as u32;
        let index = *self.lookup.entry(PositionKey::new(&p)).or_insert(next);
        if index == next {
            self.points.push(p);
        }
        index
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    pub(crate) fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }
}
