use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::projection::TransverseMercator;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub projection: TransverseMercator,
    pub labels: LabelConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LabelConfig {
    /// Property holding the label text
    pub text_property: String,
    /// Codes that name a parcel; anything else is ignored
    pub pattern: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            text_property: "Text".to_string(),
            pattern: r"^[ABCP]\d+$".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
    pub processed_file: String,
    pub processed_name: String,
    pub matched_file: String,
    pub matched_name: String,
    pub labels_file: String,
    pub labels_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            processed_file: "camp-map-processed.geojson".to_string(),
            processed_name: "camp-map-final".to_string(),
            matched_file: "camp-parcels-matched.geojson".to_string(),
            matched_name: "camp-parcels-matched".to_string(),
            labels_file: "camp-labels-wgs84.geojson".to_string(),
            labels_name: "camp-labels-wgs84".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
