//! Parcelmap - converts surveyed camp parcels from HTRS96/TM to WGS84 and
//! labels each polygon with the parcel code found inside it.
//!
//! This library provides the projection, matching and GeoJSON plumbing used
//! by the `process` binary.

pub mod config;
pub mod error;
pub mod geojson;
pub mod models;
pub mod pip;
pub mod pipeline;
pub mod projection;

pub use models::{GeoPoint, Label, LabelSet, Polygon, ProjectedPoint, Ring, Zone};
pub use pipeline::{process, ProcessOutput, Summary};
