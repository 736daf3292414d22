//! Errors raised while decoding individual GeoJSON features.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("expected {expected} geometry, found {found}")]
    UnexpectedGeometry {
        expected: &'static str,
        found: String,
    },

    #[error("position has {0} ordinates, need at least 2")]
    ShortPosition(usize),

    #[error("malformed coordinates: {0}")]
    Coordinates(#[from] serde_json::Error),
}
