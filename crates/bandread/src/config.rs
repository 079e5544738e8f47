//! Top-level reader configuration.

use std::path::Path;

use crate::bands::{SamplingConfig, SegmentConfig};
use crate::preprocess::PreprocessConfig;

/// All tunables of the band reader.
///
/// Every section has serde defaults, so a JSON file only needs to name the
/// fields it changes:
///
/// ```
/// let cfg = bandread::ReadConfig::from_json_str(r#"{ "segment": { "min_band_width_floor": 5 } }"#).unwrap();
/// assert_eq!(cfg.segment.min_band_width_floor, 5);
/// assert_eq!(cfg.preprocess.canonical_width, 320);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReadConfig {
    /// Decoding, orientation and resizing.
    pub preprocess: PreprocessConfig,
    /// Per-column classification.
    pub sampling: SamplingConfig,
    /// Run filtering and noise rejection.
    pub segment: SegmentConfig,
}

impl ReadConfig {
    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&json)?)
    }
}
