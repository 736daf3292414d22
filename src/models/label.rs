//! Parcel labels and zone classification.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Camp zone, derived from the leading letters of a parcel code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    A,
    B,
    C,
    /// Camper pitches
    P,
    F,
}

impl Zone {
    /// Classify a code by its leading run of uppercase letters.
    ///
    /// Only a run that is exactly one recognized letter yields a zone:
    /// `"A12"` is zone A, `"AB3"`, `"X99"` and `"12"` have no zone.
    pub fn from_code(code: &str) -> Option<Self> {
        let end = code
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(code.len());

        match &code[..end] {
            "A" => Some(Zone::A),
            "B" => Some(Zone::B),
            "C" => Some(Zone::C),
            "P" => Some(Zone::P),
            "F" => Some(Zone::F),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::A => "A",
            Zone::B => "B",
            Zone::C => "C",
            Zone::P => "P",
            Zone::F => "F",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parcel code placed at a geographic point
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub code: String,
    pub point: GeoPoint,
    pub zone: Option<Zone>,
}

impl Label {
    pub fn new(code: impl Into<String>, point: GeoPoint) -> Self {
        let code = code.into();
        let zone = Zone::from_code(&code);
        Self { code, point, zone }
    }
}

/// Labels keyed by code, in first-seen order.
///
/// Insert-if-absent: once a code is present, later labels with the same
/// code are discarded and the stored label never changes.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    labels: Vec<Label>,
    by_code: HashMap<String, usize>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Insert a label unless its code is already present.
    ///
    /// Returns `true` if the label was stored.
    pub fn insert_if_absent(&mut self, label: Label) -> bool {
        if self.by_code.contains_key(&label.code) {
            return false;
        }
        self.by_code.insert(label.code.clone(), self.labels.len());
        self.labels.push(label);
        true
    }

    pub fn get(&self, code: &str) -> Option<&Label> {
        self.by_code.get(code).map(|&i| &self.labels[i])
    }

    /// Labels in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
