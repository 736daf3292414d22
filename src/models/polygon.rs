//! Ring and polygon containers, generic over the point type.
//!
//! Rings are kept exactly as read: they are never closed, deduplicated
//! or reordered, so a converted polygon has the same shape as its source.

use serde::{Deserialize, Serialize};

/// Ordered sequence of points forming a polygon boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring<P>(pub Vec<P>);

impl<P> Ring<P> {
    pub fn new(points: Vec<P>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[P] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Map every point, keeping point count and order
    pub fn map<Q, F>(&self, mut f: F) -> Ring<Q>
    where
        F: FnMut(&P) -> Q,
    {
        Ring(self.0.iter().map(&mut f).collect())
    }
}

/// Polygon: first ring is the outer boundary, the rest are holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon<P> {
    rings: Vec<Ring<P>>,
}

impl<P> Polygon<P> {
    pub fn new(rings: Vec<Ring<P>>) -> Self {
        Self { rings }
    }

    /// Outer boundary, if the polygon has any ring at all
    pub fn outer(&self) -> Option<&Ring<P>> {
        self.rings.first()
    }

    pub fn holes(&self) -> &[Ring<P>] {
        self.rings.get(1..).unwrap_or(&[])
    }

    pub fn rings(&self) -> &[Ring<P>] {
        &self.rings
    }

    /// Per-ring point counts, outer ring first
    pub fn shape(&self) -> Vec<usize> {
        self.rings.iter().map(Ring::len).collect()
    }

    pub fn points(&self) -> impl Iterator<Item = &P> {
        self.rings.iter().flat_map(|r| r.0.iter())
    }

    /// Structure-preserving map: same ring count, same per-ring lengths
    pub fn map<Q, F>(&self, mut f: F) -> Polygon<Q>
    where
        F: FnMut(&P) -> Q,
    {
        Polygon {
            rings: self.rings.iter().map(|r| r.map(&mut f)).collect(),
        }
    }
}
