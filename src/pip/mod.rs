//! Point-in-Polygon (PIP) label assignment.
//!
//! Pairs each parcel polygon with the parcel code whose label point lies
//! inside it.

mod matcher;
mod ring;

pub use matcher::LabelMatcher;
pub use ring::{contains, ring_contains};
