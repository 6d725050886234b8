//! Feature payload model for detection requests.
//!
//! A payload is a flat map of feature name to numeric value, produced by a
//! platform capture module from raw interaction events. The client treats
//! it as opaque: no validation, range clamping, or key filtering happens
//! on this side of the wire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical feature names understood by the current service model.
///
/// Capture modules are not required to send every feature, but key sets
/// should stay stable across calls from the same platform so the service
/// sees a consistent input schema.
pub mod features {
    /// Mean inter-key interval in milliseconds.
    pub const IKI_MEAN: &str = "iki_mean";
    /// Standard deviation of inter-key intervals.
    pub const IKI_STD: &str = "iki_std";
    /// Typo corrections per 100 characters.
    pub const TYPOS_PER_100: &str = "typos_per_100";
    /// Fraction of keystrokes that are backspaces.
    pub const BACKSPACE_RATE: &str = "backspace_rate";
    /// Average word length in characters.
    pub const AVG_WORD_LEN: &str = "avg_word_len";
    /// Fraction of words of three characters or fewer.
    pub const SHORT_WORD_RATIO: &str = "short_word_ratio";
    /// Mean swipe speed (normalized units).
    pub const SWIPE_SPEED_MEAN: &str = "swipe_speed_mean";
    /// Standard deviation of swipe speed.
    pub const SWIPE_SPEED_STD: &str = "swipe_speed_std";
    /// Mean touch press duration in milliseconds.
    pub const PRESS_MS_MEAN: &str = "press_ms_mean";
    /// Standard deviation of touch press duration.
    pub const PRESS_MS_STD: &str = "press_ms_std";
    /// Erraticness of touch paths (0-1).
    pub const PATH_ERRATICNESS: &str = "path_erraticness";
    /// Fraction of emoji among typed characters.
    pub const EMOJI_RATIO: &str = "emoji_ratio";
    /// Fraction of punctuation among typed characters.
    pub const PUNCT_RATIO: &str = "punct_ratio";
    /// Vocabulary simplicity index (0-1).
    pub const VOCAB_SIMPLICITY: &str = "vocab_simplicity";
    /// Flesch-Kincaid readability grade of typed text.
    pub const READABILITY_FK: &str = "readability_fk";
    /// Reaction time to focus in milliseconds.
    pub const RTF_MS: &str = "rtf_ms";
    /// Standard deviation of dwell time in milliseconds.
    pub const DWELL_STD_MS: &str = "dwell_std_ms";

    /// All canonical feature names, in schema order.
    pub const ALL: [&str; 17] = [
        IKI_MEAN,
        IKI_STD,
        TYPOS_PER_100,
        BACKSPACE_RATE,
        AVG_WORD_LEN,
        SHORT_WORD_RATIO,
        SWIPE_SPEED_MEAN,
        SWIPE_SPEED_STD,
        PRESS_MS_MEAN,
        PRESS_MS_STD,
        PATH_ERRATICNESS,
        EMOJI_RATIO,
        PUNCT_RATIO,
        VOCAB_SIMPLICITY,
        READABILITY_FK,
        RTF_MS,
        DWELL_STD_MS,
    ];
}

/// A feature vector describing user interaction patterns.
///
/// Backed by a sorted map so serialization order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturePayload(BTreeMap<String, f64>);

impl FeaturePayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature value, replacing any previous value for the name.
    pub fn set(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    /// Look up a feature value by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Number of features in the payload.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload carries no features.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over feature name/value pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<BTreeMap<String, f64>> for FeaturePayload {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, f64)> for FeaturePayload {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut payload = FeaturePayload::new();
        payload.set(features::IKI_MEAN, 180.0);
        payload.set(features::TYPOS_PER_100, 9.0);

        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("iki_mean"), Some(180.0));
        assert_eq!(payload.get("missing"), None);
    }

    #[test]
    fn test_set_replaces_value() {
        let payload = FeaturePayload::new()
            .with(features::IKI_MEAN, 100.0)
            .with(features::IKI_MEAN, 180.0);

        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("iki_mean"), Some(180.0));
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let payload = FeaturePayload::new()
            .with("iki_mean", 180.0)
            .with("typos_per_100", 9.0);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"iki_mean": 180.0, "typos_per_100": 9.0})
        );
    }

    #[test]
    fn test_canonical_names_are_unique() {
        let mut names: Vec<&str> = features::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), features::ALL.len());
    }
}
