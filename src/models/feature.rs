//! GeoJSON feature collections as read from CAD exports and written for the map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{GeoPoint, Polygon, ProjectedPoint, Ring, Zone};
use crate::error::FeatureError;

pub type Properties = Map<String, Value>;

/// GeoJSON FeatureCollection, generic over the feature type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection<F> {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub features: Vec<F>,
}

impl<F> FeatureCollection<F> {
    pub fn new(name: impl Into<String>, features: Vec<F>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            name: Some(name.into()),
            features,
        }
    }
}

/// Input feature with untyped properties and projected geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub properties: Option<Properties>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

impl RawFeature {
    /// String value of a property, if present
    pub fn text(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }

    fn geometry(&self) -> Result<&RawGeometry, FeatureError> {
        self.geometry.as_ref().ok_or(FeatureError::MissingGeometry)
    }

    pub fn polygon(&self) -> Result<Polygon<ProjectedPoint>, FeatureError> {
        self.geometry()?.to_polygon()
    }

    pub fn point(&self) -> Result<ProjectedPoint, FeatureError> {
        self.geometry()?.to_point()
    }
}

/// Geometry with coordinates left as JSON until the type is checked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl RawGeometry {
    fn check_kind(&self, expected: &'static str) -> Result<(), FeatureError> {
        if self.kind != expected {
            return Err(FeatureError::UnexpectedGeometry {
                expected,
                found: self.kind.clone(),
            });
        }
        Ok(())
    }

    pub fn to_point(&self) -> Result<ProjectedPoint, FeatureError> {
        self.check_kind("Point")?;
        let position = Vec::<f64>::deserialize(&self.coordinates)?;
        projected(&position)
    }

    pub fn to_polygon(&self) -> Result<Polygon<ProjectedPoint>, FeatureError> {
        self.check_kind("Polygon")?;
        let rings = Vec::<Vec<Vec<f64>>>::deserialize(&self.coordinates)?;

        let rings = rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|p| projected(p))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Ring::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Polygon::new(rings))
    }
}

/// Easting/northing from a position; a trailing elevation is ignored
fn projected(position: &[f64]) -> Result<ProjectedPoint, FeatureError> {
    match position {
        [easting, northing, ..] => Ok(ProjectedPoint::new(*easting, *northing)),
        _ => Err(FeatureError::ShortPosition(position.len())),
    }
}

/// Output feature with WGS84 geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: P,
    pub geometry: Geometry,
}

impl<P> Feature<P> {
    pub fn new(properties: P, geometry: Geometry) -> Self {
        Self {
            kind: "Feature".to_string(),
            properties,
            geometry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(GeoPoint),
    Polygon(Polygon<GeoPoint>),
}

/// Zone tag written on parcel features.
///
/// `Unclassified` (matched, but the code has no zone) is written as `null`;
/// `Other` marks a polygon no label matched and is written as `"OTHER"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Option<String>", try_from = "Option<String>")]
pub enum ParcelZone {
    Classified(Zone),
    Unclassified,
    Other,
}

pub const OTHER_ZONE: &str = "OTHER";

impl ParcelZone {
    pub fn from_zone(zone: Option<Zone>) -> Self {
        zone.map_or(ParcelZone::Unclassified, ParcelZone::Classified)
    }

    /// Key used when grouping parcels for the summary
    pub fn summary_key(&self) -> &'static str {
        match self {
            ParcelZone::Classified(zone) => zone.as_str(),
            ParcelZone::Unclassified => "UNKNOWN",
            ParcelZone::Other => OTHER_ZONE,
        }
    }
}

impl From<ParcelZone> for Option<String> {
    fn from(zone: ParcelZone) -> Self {
        match zone {
            ParcelZone::Classified(zone) => Some(zone.to_string()),
            ParcelZone::Unclassified => None,
            ParcelZone::Other => Some(OTHER_ZONE.to_string()),
        }
    }
}

impl TryFrom<Option<String>> for ParcelZone {
    type Error = String;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value.as_deref() {
            None => Ok(ParcelZone::Unclassified),
            Some(OTHER_ZONE) => Ok(ParcelZone::Other),
            Some(s) => match Zone::from_code(s) {
                Some(zone) if zone.as_str() == s => Ok(ParcelZone::Classified(zone)),
                _ => Err(format!("unknown zone: {}", s)),
            },
        }
    }
}

/// Properties of a parcel polygon in the merged map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParcelProperties {
    pub parcel: Option<String>,
    pub zone: ParcelZone,
    pub name: Option<String>,
}

impl ParcelProperties {
    pub fn matched(code: &str, zone: Option<Zone>) -> Self {
        Self {
            parcel: Some(code.to_string()),
            zone: ParcelZone::from_zone(zone),
            name: Some(code.to_string()),
        }
    }

    pub fn unmatched() -> Self {
        Self {
            parcel: None,
            zone: ParcelZone::Other,
            name: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.parcel.is_some()
    }
}

/// Properties of a converted label point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelProperties {
    pub text: String,
    pub zone: Option<Zone>,
}

pub type ParcelFeature = Feature<ParcelProperties>;
pub type LabelFeature = Feature<LabelProperties>;
