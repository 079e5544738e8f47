//! Reconciliation with an upstream vision classifier's estimate.
//!
//! The band reader's deterministic output takes precedence whenever it
//! decoded a value from at least four bands. Otherwise the vision estimate
//! passes through unchanged and is flagged unverified so callers can present
//! it as a rough guess.

use crate::color::BandColor;
use crate::ResistorReading;

/// Holistic identification supplied by the upstream vision model.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisionEstimate {
    /// Tentative band list, reading order.
    pub bands: Vec<BandColor>,
    pub value_ohms: Option<f64>,
    pub tolerance_percent: Option<f64>,
}

/// Which collaborator a merged value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSource {
    BandReader,
    VisionEstimate,
}

/// Reading after reconciliation with the vision estimate.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MergedReading {
    pub bands: Vec<BandColor>,
    pub band_count: Option<u8>,
    pub value_ohms: Option<f64>,
    pub tolerance_percent: Option<f64>,
    pub source: ReadingSource,
    /// `true` only when the value came from decoded bands.
    pub verified: bool,
}

/// Whether `reading` is confident enough to override the vision estimate.
pub fn overrides_estimate(reading: &ResistorReading) -> bool {
    reading.band_count.is_some_and(|n| n >= 4) && reading.value_ohms.is_some()
}

/// Merge a band reading with the vision estimate.
pub fn merge_reading(reading: &ResistorReading, estimate: &VisionEstimate) -> MergedReading {
    if overrides_estimate(reading) {
        return MergedReading {
            bands: reading.bands.clone(),
            band_count: reading.band_count,
            value_ohms: reading.value_ohms,
            tolerance_percent: reading.tolerance_percent,
            source: ReadingSource::BandReader,
            verified: true,
        };
    }

    tracing::debug!(
        "band reader undecided ({} bands); keeping vision estimate",
        reading.bands.len()
    );
    MergedReading {
        bands: estimate.bands.clone(),
        band_count: ResistorReading::count_for(estimate.bands.len()),
        value_ohms: estimate.value_ohms,
        tolerance_percent: estimate.tolerance_percent,
        source: ReadingSource::VisionEstimate,
        verified: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BandColor::*;

    fn vision_guess() -> VisionEstimate {
        VisionEstimate {
            bands: vec![Brown, Black, Orange, Gold],
            value_ohms: Some(10_000.0),
            tolerance_percent: Some(5.0),
        }
    }

    #[test]
    fn decoded_reading_wins() {
        let reading = ResistorReading {
            bands: vec![Brown, Black, Red, Gold],
            band_count: Some(4),
            value_ohms: Some(1_000.0),
            tolerance_percent: Some(5.0),
        };
        let merged = merge_reading(&reading, &vision_guess());
        assert_eq!(merged.source, ReadingSource::BandReader);
        assert!(merged.verified);
        assert_eq!(merged.value_ohms, Some(1_000.0));
        assert_eq!(merged.bands, reading.bands);
    }

    #[test]
    fn source_serializes_as_snake_case() {
        let json = serde_json::to_string(&ReadingSource::BandReader).unwrap();
        assert_eq!(json, "\"band_reader\"");
        let json = serde_json::to_string(&ReadingSource::VisionEstimate).unwrap();
        assert_eq!(json, "\"vision_estimate\"");
    }

    #[test]
    fn undecoded_reading_keeps_estimate_unverified() {
        let reading = ResistorReading {
            bands: vec![Brown, Black, Red],
            ..ResistorReading::empty()
        };
        let merged = merge_reading(&reading, &vision_guess());
        assert_eq!(merged.source, ReadingSource::VisionEstimate);
        assert!(!merged.verified);
        assert_eq!(merged.value_ohms, Some(10_000.0));
        assert_eq!(merged.bands, vec![Brown, Black, Orange, Gold]);
        assert_eq!(merged.band_count, Some(4));
    }

    #[test]
    fn bands_without_value_do_not_override() {
        let reading = ResistorReading {
            bands: vec![Gold, Gold, Gold, Gold],
            band_count: Some(4),
            ..ResistorReading::empty()
        };
        assert!(!overrides_estimate(&reading));
        assert_eq!(
            merge_reading(&reading, &VisionEstimate::default()).value_ohms,
            None
        );
    }

    #[test]
    fn estimate_parses_from_partial_json() {
        let est: VisionEstimate =
            serde_json::from_str(r#"{ "bands": ["yellow", "violet", "red", "gold"] }"#).unwrap();
        assert_eq!(est.bands.len(), 4);
        assert_eq!(est.value_ohms, None);
    }
}
