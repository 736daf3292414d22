//! Conversion and labeling pipeline.
//!
//! Converts parcel polygons and label points from the projected grid to
//! WGS84, keeps the first label seen for each parcel code, and tags every
//! polygon with the first label found inside it.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use geo::{BoundingRect, Coord, MultiPoint, Rect};
use indicatif::ProgressBar;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::{Config, LabelConfig};
use crate::models::{
    Feature, FeatureCollection, GeoPoint, Geometry, Label, LabelFeature, LabelProperties,
    LabelSet, ParcelFeature, ParcelProperties, RawFeature,
};
use crate::pip::LabelMatcher;
use crate::projection::{convert_point, convert_polygon, TransverseMercator};

/// Selects label features whose text is a parcel code
#[derive(Debug, Clone)]
pub struct LabelFilter {
    property: String,
    pattern: Regex,
}

impl LabelFilter {
    pub fn new(property: &str, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid label pattern: {}", pattern))?;
        Ok(Self {
            property: property.to_string(),
            pattern,
        })
    }

    pub fn from_config(config: &LabelConfig) -> Result<Self> {
        Self::new(&config.text_property, &config.pattern)
    }

    /// The parcel code carried by a feature, if it has one
    pub fn code<'f>(&self, feature: &'f RawFeature) -> Option<&'f str> {
        feature
            .text(&self.property)
            .filter(|text| self.pattern.is_match(text))
    }
}

/// Unique labels plus counts from the scan that produced them
#[derive(Debug, Clone, Default)]
pub struct LabelScan {
    pub labels: LabelSet,
    /// Features whose text matched the code pattern, duplicates included
    pub candidates: usize,
    /// Candidates dropped for lacking a usable point geometry
    pub skipped: usize,
}

/// Filter, convert and deduplicate label features.
///
/// Only the first feature for each code is converted and kept.
pub fn collect_labels(
    features: &[RawFeature],
    filter: &LabelFilter,
    tm: &TransverseMercator,
) -> LabelScan {
    let mut scan = LabelScan::default();

    for feature in features {
        let Some(code) = filter.code(feature) else {
            continue;
        };
        scan.candidates += 1;

        if scan.labels.contains_code(code) {
            debug!("Ignoring repeated label {}", code);
            continue;
        }

        match feature.point() {
            Ok(point) => {
                scan.labels
                    .insert_if_absent(Label::new(code, convert_point(tm, point)));
            }
            Err(e) => {
                warn!("Skipping label {}: {}", code, e);
                scan.skipped += 1;
            }
        }
    }

    scan
}

/// Counts and samples reported after a run
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub polygons: usize,
    pub polygons_skipped: usize,
    pub label_features: usize,
    pub label_candidates: usize,
    pub labels_skipped: usize,
    pub unique_labels: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Parcel codes grouped by zone key, codes sorted
    pub by_zone: BTreeMap<&'static str, Vec<String>>,
    /// First matched parcel and its first vertex
    pub sample: Option<(String, GeoPoint)>,
    /// WGS84 extent of all converted parcels
    pub extent: Option<Rect<f64>>,
}

impl Summary {
    pub fn log(&self) {
        info!(
            "Polygons: {} ({} skipped), labels: {} features, {} parcel codes (including duplicates), {} unique",
            self.polygons,
            self.polygons_skipped,
            self.label_features,
            self.label_candidates,
            self.unique_labels
        );
        if self.labels_skipped > 0 {
            warn!("{} parcel labels had no usable point", self.labels_skipped);
        }
        info!("Matched: {}, Unmatched: {}", self.matched, self.unmatched);

        info!("--- Summary by Zone ---");
        for (zone, parcels) in &self.by_zone {
            info!("{}: {} parcels - {}", zone, parcels.len(), parcels.join(", "));
        }

        if let Some((code, p)) = &self.sample {
            info!("Sample coordinate, parcel {}: [{:.6}, {:.6}]", code, p.lon, p.lat);
        }
        if let Some(rect) = &self.extent {
            info!(
                "Extent: [{:.6}, {:.6}] - [{:.6}, {:.6}]",
                rect.min().x,
                rect.min().y,
                rect.max().x,
                rect.max().y
            );
        }
    }
}

/// The three collections written by a run
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Every converted polygon, matched or not, in input order
    pub all: FeatureCollection<ParcelFeature>,
    pub matched: FeatureCollection<ParcelFeature>,
    pub labels: FeatureCollection<LabelFeature>,
    pub summary: Summary,
}

/// Convert both collections and assign labels to parcels
pub fn process(
    parcels: &FeatureCollection<RawFeature>,
    labels: &FeatureCollection<RawFeature>,
    config: &Config,
    progress: &ProgressBar,
) -> Result<ProcessOutput> {
    anyhow::ensure!(
        !parcels.features.is_empty(),
        "Parcel collection has no features"
    );

    let tm = &config.projection;
    let filter = LabelFilter::from_config(&config.labels)?;

    let scan = collect_labels(&labels.features, &filter, tm);
    info!(
        "Found {} parcel labels ({} unique)",
        scan.candidates,
        scan.labels.len()
    );

    let matcher = LabelMatcher::new(&scan.labels);
    let mut summary = Summary {
        polygons: parcels.features.len(),
        label_features: labels.features.len(),
        label_candidates: scan.candidates,
        labels_skipped: scan.skipped,
        unique_labels: scan.labels.len(),
        ..Summary::default()
    };

    progress.set_length(parcels.features.len() as u64);

    let mut all = Vec::with_capacity(parcels.features.len());
    for (i, feature) in parcels.features.iter().enumerate() {
        progress.inc(1);

        let polygon = match feature.polygon() {
            Ok(p) => convert_polygon(tm, &p),
            Err(e) => {
                warn!("Skipping parcel feature {}: {}", i, e);
                summary.polygons_skipped += 1;
                continue;
            }
        };

        let properties = match matcher.find(&polygon) {
            Some(label) => {
                summary.matched += 1;
                ParcelProperties::matched(&label.code, label.zone)
            }
            None => {
                summary.unmatched += 1;
                ParcelProperties::unmatched()
            }
        };

        let codes = summary
            .by_zone
            .entry(properties.zone.summary_key())
            .or_default();
        if let Some(code) = &properties.parcel {
            codes.push(code.clone());
            if summary.sample.is_none() {
                if let Some(first) = polygon.points().next() {
                    summary.sample = Some((code.clone(), *first));
                }
            }
        }

        all.push(Feature::new(properties, Geometry::Polygon(polygon)));
    }
    progress.finish_with_message("Matching complete");

    for codes in summary.by_zone.values_mut() {
        codes.sort();
    }
    summary.extent = extent(&all);

    let matched: Vec<ParcelFeature> = all
        .iter()
        .filter(|f| f.properties.is_matched())
        .cloned()
        .collect();

    let label_features: Vec<LabelFeature> = scan
        .labels
        .iter()
        .map(|label| {
            Feature::new(
                LabelProperties {
                    text: label.code.clone(),
                    zone: label.zone,
                },
                Geometry::Point(label.point),
            )
        })
        .collect();

    let out = &config.output;
    Ok(ProcessOutput {
        all: FeatureCollection::new(&out.processed_name, all),
        matched: FeatureCollection::new(&out.matched_name, matched),
        labels: FeatureCollection::new(&out.labels_name, label_features),
        summary,
    })
}

fn extent(features: &[ParcelFeature]) -> Option<Rect<f64>> {
    let points: MultiPoint<f64> = features
        .iter()
        .filter_map(|f| match &f.geometry {
            Geometry::Polygon(p) => Some(p),
            Geometry::Point(_) => None,
        })
        .flat_map(|p| p.points().map(|&v| Coord::from(v)))
        .collect();

    points.bounding_rect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParcelZone, Zone};
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawFeature {
        serde_json::from_value(value).unwrap()
    }

    fn label(text: &str, e: f64, n: f64) -> RawFeature {
        raw(json!({
            "type": "Feature",
            "properties": { "Text": text },
            "geometry": { "type": "Point", "coordinates": [e, n] }
        }))
    }

    fn parcel(e: f64, n: f64, half: f64) -> RawFeature {
        raw(json!({
            "type": "Feature",
            "properties": { "Layer": "PARCELE" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [e - half, n - half],
                    [e - half, n + half],
                    [e + half, n + half],
                    [e + half, n - half],
                    [e - half, n - half]
                ]]
            }
        }))
    }

    #[test]
    fn test_filter_matches_parcel_codes() {
        let filter = LabelFilter::from_config(&LabelConfig::default()).unwrap();
        assert_eq!(filter.code(&label("A12", 0.0, 0.0)), Some("A12"));
        assert_eq!(filter.code(&label("P3", 0.0, 0.0)), Some("P3"));
        assert_eq!(filter.code(&label("X99", 0.0, 0.0)), None);
        assert_eq!(filter.code(&label("F1", 0.0, 0.0)), None);
        assert_eq!(filter.code(&label("A12b", 0.0, 0.0)), None);
        assert_eq!(filter.code(&label("A", 0.0, 0.0)), None);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(LabelFilter::new("Text", "[A-").is_err());
    }

    #[test]
    fn test_collect_labels_keeps_first_occurrence() {
        let features = vec![
            label("B2", 480_000.0, 5_000_000.0),
            label("X99", 480_000.0, 5_000_000.0),
            label("B2", 490_000.0, 5_010_000.0),
            label("A1", 485_000.0, 5_005_000.0),
        ];
        let filter = LabelFilter::from_config(&LabelConfig::default()).unwrap();
        let scan = collect_labels(&features, &filter, &TransverseMercator::HTRS96);

        assert_eq!(scan.candidates, 3);
        assert_eq!(scan.skipped, 0);

        let codes: Vec<&str> = scan.labels.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["B2", "A1"]);

        let (lat, lng) = crate::projection::convert(480_000.0, 5_000_000.0);
        assert_eq!(scan.labels.get("B2").unwrap().point, GeoPoint::new(lng, lat));
        assert_eq!(scan.labels.get("B2").unwrap().zone, Some(Zone::B));
    }

    #[test]
    fn test_collect_labels_skips_bad_geometry() {
        let broken = raw(json!({
            "type": "Feature",
            "properties": { "Text": "C5" },
            "geometry": null
        }));
        let features = vec![broken, label("C5", 480_000.0, 5_000_000.0)];
        let filter = LabelFilter::from_config(&LabelConfig::default()).unwrap();
        let scan = collect_labels(&features, &filter, &TransverseMercator::HTRS96);

        assert_eq!(scan.skipped, 1);
        assert_eq!(scan.labels.len(), 1);
    }

    #[test]
    fn test_process_tags_unmatched_as_other() {
        let parcels = FeatureCollection::new(
            "parcels",
            vec![
                parcel(480_000.0, 5_000_000.0, 20.0),
                parcel(481_000.0, 5_000_000.0, 20.0),
            ],
        );
        let labels = FeatureCollection::new("labels", vec![label("A12", 480_000.0, 5_000_000.0)]);

        let out = process(&parcels, &labels, &Config::default(), &ProgressBar::hidden()).unwrap();

        assert_eq!(out.all.features.len(), 2);
        assert_eq!(out.all.features[0].properties.parcel.as_deref(), Some("A12"));
        assert_eq!(out.all.features[0].properties.zone, ParcelZone::Classified(Zone::A));
        assert_eq!(out.all.features[1].properties.zone, ParcelZone::Other);
        assert_eq!(out.matched.features.len(), 1);

        assert_eq!(out.summary.matched, 1);
        assert_eq!(out.summary.unmatched, 1);
        assert_eq!(out.summary.by_zone["A"], vec!["A12".to_string()]);
        assert!(out.summary.by_zone["OTHER"].is_empty());
        assert_eq!(out.summary.sample.as_ref().unwrap().0, "A12");

        let extent = out.summary.extent.unwrap();
        assert!(extent.min().x < extent.max().x);
        assert!(extent.min().y < extent.max().y);
    }

    #[test]
    fn test_process_skips_non_polygons() {
        let line = raw(json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "LineString", "coordinates": [[480000.0, 5000000.0], [480010.0, 5000010.0]] }
        }));
        let parcels = FeatureCollection::new("parcels", vec![line, parcel(480_000.0, 5_000_000.0, 20.0)]);
        let labels = FeatureCollection::new("labels", vec![]);

        let out = process(&parcels, &labels, &Config::default(), &ProgressBar::hidden()).unwrap();
        assert_eq!(out.summary.polygons, 2);
        assert_eq!(out.summary.polygons_skipped, 1);
        assert_eq!(out.all.features.len(), 1);
        assert!(out.matched.features.is_empty());
        assert!(out.summary.sample.is_none());
    }

    #[test]
    fn test_process_rejects_empty_parcels() {
        let empty = FeatureCollection::new("parcels", vec![]);
        let labels = FeatureCollection::new("labels", vec![]);
        assert!(process(&empty, &labels, &Config::default(), &ProgressBar::hidden()).is_err());
    }
}
