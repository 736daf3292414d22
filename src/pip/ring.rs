//! Ray-casting (crossing number) point-in-polygon test.
//!
//! Only the outer ring is considered; holes do not exclude points.
//!
//! Boundary points are not special-cased. The strict comparisons make the
//! test half-open: for an axis-aligned square, points on the left and bottom
//! edges are inside, points on the right and top edges are outside. Two
//! parcels sharing an edge therefore never both contain a point on it.

use crate::models::{GeoPoint, Polygon, Ring};

/// Whether `point` lies inside the outer ring of `polygon`.
///
/// A polygon with no rings, an empty ring or fewer than three vertices
/// contains nothing.
pub fn contains(point: GeoPoint, polygon: &Polygon<GeoPoint>) -> bool {
    polygon
        .outer()
        .map_or(false, |ring| ring_contains(point, ring))
}

/// Crossing-number test against a single ring, implicitly closed
pub fn ring_contains(point: GeoPoint, ring: &Ring<GeoPoint>) -> bool {
    let (x, y) = (point.lon, point.lat);
    let pts = ring.points();

    let mut inside = false;
    let mut j = match pts.len() {
        0 => return false,
        n => n - 1,
    };

    for (i, pi) in pts.iter().enumerate() {
        let pj = &pts[j];
        let (xi, yi) = (pi.lon, pi.lat);
        let (xj, yj) = (pj.lon, pj.lat);

        // yi != yj whenever the first test passes, so the division is safe
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}
