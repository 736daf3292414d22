//! Ellipsoid and Transverse Mercator parameters.

use serde::Deserialize;

/// Reference ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Ellipsoid {
    /// Semi-major axis in meters
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub const GRS80: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    };

    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// First eccentricity squared
    pub fn e2(&self) -> f64 {
        let f = self.flattening();
        2.0 * f - f * f
    }

    /// Second eccentricity squared
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::GRS80
    }
}

/// Transverse Mercator projection on a given ellipsoid.
///
/// Northern hemisphere only; angles are in degrees, distances in meters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    pub scale_factor: f64,
    pub central_meridian: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl TransverseMercator {
    /// HTRS96/TM, the Croatian national grid (EPSG:3765)
    pub const HTRS96: TransverseMercator = TransverseMercator {
        ellipsoid: Ellipsoid::GRS80,
        scale_factor: 0.9999,
        central_meridian: 16.5,
        false_easting: 500_000.0,
        false_northing: 0.0,
    };
}

impl Default for TransverseMercator {
    fn default() -> Self {
        Self::HTRS96
    }
}
