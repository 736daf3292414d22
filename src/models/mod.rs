//! Core data models for parcel conversion and labeling.

pub mod feature;
pub mod label;
pub mod point;
pub mod polygon;

pub use feature::{
    Feature, FeatureCollection, Geometry, LabelFeature, LabelProperties, ParcelFeature,
    ParcelProperties, ParcelZone, Properties, RawFeature, RawGeometry, OTHER_ZONE,
};
pub use label::{Label, LabelSet, Zone};
pub use point::{GeoPoint, ProjectedPoint};
pub use polygon::{Polygon, Ring};
