//! Assigns parcel labels to polygons.

use tracing::debug;

use super::contains;
use crate::models::{GeoPoint, Label, LabelSet, Polygon};

/// First-match-wins label lookup.
///
/// Labels are tried in first-seen order and the first one inside the
/// polygon's outer ring is returned, not the closest to its center. Labels
/// are not consumed: overlapping polygons may each claim the same label.
pub struct LabelMatcher<'a> {
    labels: &'a LabelSet,
}

impl<'a> LabelMatcher<'a> {
    pub fn new(labels: &'a LabelSet) -> Self {
        Self { labels }
    }

    /// Find the label for a polygon
    pub fn find(&self, polygon: &Polygon<GeoPoint>) -> Option<&'a Label> {
        let label = self.labels.iter().find(|l| contains(l.point, polygon));

        if let Some(label) = label {
            debug!("Polygon matched label {}", label.code);
        }

        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ring;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<GeoPoint> {
        let pts = [
            (x0, y0),
            (x0, y0 + size),
            (x0 + size, y0 + size),
            (x0 + size, y0),
            (x0, y0),
        ];
        Polygon::new(vec![Ring::new(
            pts.iter().map(|&(x, y)| GeoPoint::new(x, y)).collect(),
        )])
    }

    fn labels(entries: &[(&str, f64, f64)]) -> LabelSet {
        let mut set = LabelSet::new();
        for &(code, x, y) in entries {
            set.insert_if_absent(Label::new(code, GeoPoint::new(x, y)));
        }
        set
    }

    #[test]
    fn test_first_label_in_order_wins() {
        // Both labels sit inside; B2 is closer to the center but A1 was seen first
        let set = labels(&[("A1", 0.1, 0.1), ("B2", 0.5, 0.5)]);
        let matcher = LabelMatcher::new(&set);

        let found = matcher.find(&square(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(found.code, "A1");
    }

    #[test]
    fn test_overlapping_polygons_share_label() {
        let set = labels(&[("C7", 1.5, 1.5)]);
        let matcher = LabelMatcher::new(&set);

        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);

        let assigned: Vec<Option<&str>> = [&a, &b]
            .iter()
            .map(|p| matcher.find(p).map(|l| l.code.as_str()))
            .collect();
        assert_eq!(assigned, vec![Some("C7"), Some("C7")]);
    }

    #[test]
    fn test_no_label_inside() {
        let set = labels(&[("P3", 5.0, 5.0)]);
        let matcher = LabelMatcher::new(&set);
        assert!(matcher.find(&square(0.0, 0.0, 1.0)).is_none());

        let empty = LabelSet::new();
        assert!(LabelMatcher::new(&empty).find(&square(0.0, 0.0, 1.0)).is_none());
    }
}
