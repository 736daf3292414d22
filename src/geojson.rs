//! Reading and writing GeoJSON feature collections.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::models::{FeatureCollection, RawFeature};

/// Load a feature collection from a GeoJSON file
pub fn read_collection<P: AsRef<Path>>(path: P) -> Result<FeatureCollection<RawFeature>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read GeoJSON file: {}", path.display()))?;
    let collection: FeatureCollection<RawFeature> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse GeoJSON file: {}", path.display()))?;

    info!(
        "Read {} features from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// Write a feature collection as pretty-printed GeoJSON
pub fn write_collection<P, F>(path: P, collection: &FeatureCollection<F>) -> Result<()>
where
    P: AsRef<Path>,
    F: Serialize,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, collection)
        .with_context(|| format!("Failed to write GeoJSON file: {}", path.display()))?;
    writer.flush()?;

    info!(
        "Wrote {} features to {}",
        collection.features.len(),
        path.display()
    );
    Ok(())
}
