//! HTRS96/TM to WGS84 coordinate conversion.
//!
//! HTRS96 is realized on GRS80 and treated as coincident with WGS84, so
//! only the inverse projection is applied; no datum shift.

mod inverse;
mod params;

pub use inverse::{convert, convert_point, convert_polygon};
pub use params::{Ellipsoid, TransverseMercator};
