//! Inverse Transverse Mercator (grid -> geographic) via the footpoint latitude.
//!
//! Closed-form series, accurate to well under a millimeter within a few
//! hundred kilometers of the central meridian. Not an iterative solver:
//! inputs far outside the zone give finite but meaningless results, and
//! non-finite inputs give NaN.

use super::TransverseMercator;
use crate::models::{GeoPoint, Polygon, ProjectedPoint};

impl TransverseMercator {
    /// Project a grid coordinate back to longitude/latitude
    pub fn inverse(&self, p: ProjectedPoint) -> GeoPoint {
        let a = self.ellipsoid.semi_major_axis;
        let e2 = self.ellipsoid.e2();
        let ep2 = self.ellipsoid.ep2();
        let k0 = self.scale_factor;
        let lon0 = self.central_meridian.to_radians();

        let x = p.easting - self.false_easting;
        let y = p.northing - self.false_northing;

        // Rectifying latitude
        let m = y / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

        let sqrt_1_e2 = (1.0 - e2).sqrt();
        let e1 = (1.0 - sqrt_1_e2) / (1.0 + sqrt_1_e2);

        // Footpoint latitude
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = phi1.tan();
        let w = 1.0 - e2 * sin_phi1 * sin_phi1;

        let n1 = a / w.sqrt();
        let t1 = tan_phi1 * tan_phi1;
        let c1 = ep2 * cos_phi1 * cos_phi1;
        let r1 = a * (1.0 - e2) / w.powf(1.5);
        let d = x / (n1 * k0);

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d.powi(2) / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);

        let lon = lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d.powi(5)
                    / 120.0)
                / cos_phi1;

        GeoPoint {
            lon: lon.to_degrees(),
            lat: lat.to_degrees(),
        }
    }
}

/// HTRS96/TM easting/northing to WGS84, returned as `(lat, lng)` in degrees
pub fn convert(easting: f64, northing: f64) -> (f64, f64) {
    let p = TransverseMercator::HTRS96.inverse(ProjectedPoint::new(easting, northing));
    (p.lat, p.lon)
}

pub fn convert_point(tm: &TransverseMercator, p: ProjectedPoint) -> GeoPoint {
    tm.inverse(p)
}

/// Convert every vertex of every ring; ring count and lengths are kept
pub fn convert_polygon(tm: &TransverseMercator, polygon: &Polygon<ProjectedPoint>) -> Polygon<GeoPoint> {
    polygon.map(|p| tm.inverse(*p))
}
