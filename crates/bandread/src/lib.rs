//! bandread — deterministic color-band reader for axial resistors.
//!
//! Given a photograph of a through-hole resistor, classifies the painted
//! bands and decodes them into a resistance and tolerance. The pipeline
//! stages are:
//!
//! 1. **Preprocess** – decode, EXIF orientation, resize the long edge to a
//!    canonical sampling width, light median denoise.
//! 2. **Color** – RGB → HSV and nearest-neighbour matching against the
//!    12-color canonical palette.
//! 3. **Sampling** – one palette label per image column.
//! 4. **Segmentation** – runs of labels, body-color removal, noise rejection.
//! 5. **Orientation** – flip sequences that start with a metallic band.
//! 6. **Value** – digit/multiplier/tolerance decode in both directions.
//!
//! Every stage is a pure function with no shared state. Only image decoding
//! can fail ([`ImageError`]); an undecodable band sequence is reported as a
//! [`ResistorReading`] with null value and tolerance.
//!
//! # Public API
//! - [`BandReader`] and [`ReadConfig`] as primary entry points
//! - [`ResistorReading`] as the output record
//! - [`merge_reading`] to reconcile with an upstream vision estimate
//! - stage modules ([`color`], [`bands`], [`value`], [`preprocess`]) for
//!   callers that already hold pixels or labels

mod api;
pub mod bands;
pub mod color;
mod config;
mod error;
pub mod estimate;
mod pipeline;
pub mod preprocess;
mod trace;
pub mod value;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::BandReader;
pub use bands::{ColumnAggregator, SamplingConfig, SegmentConfig};
pub use color::BandColor;
pub use config::ReadConfig;
pub use error::ImageError;
pub use estimate::{merge_reading, MergedReading, ReadingSource, VisionEstimate};
pub use preprocess::PreprocessConfig;
pub use trace::ReadTrace;
pub use value::{format_ohms, format_reading, DecodeRejectReason, ValueDecode};

/// Final result of one read.
///
/// Serialized with the field names of the output contract; absent values are
/// written as `null`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResistorReading {
    /// Detected bands in reading order (body color excluded).
    pub bands: Vec<BandColor>,
    /// 4, 5 or 6 when the sequence has a decodable length.
    pub band_count: Option<u8>,
    pub value_ohms: Option<f64>,
    pub tolerance_percent: Option<f64>,
}

impl ResistorReading {
    /// Reading with no bands and no value.
    pub fn empty() -> Self {
        Self {
            bands: Vec::new(),
            band_count: None,
            value_ohms: None,
            tolerance_percent: None,
        }
    }

    /// `Some(n)` for decodable band counts (4–6).
    pub fn count_for(n: usize) -> Option<u8> {
        matches!(n, 4..=6).then_some(n as u8)
    }

    pub(crate) fn from_decode(bands: Vec<BandColor>, value: &ValueDecode) -> Self {
        Self {
            band_count: Self::count_for(bands.len()),
            bands,
            value_ohms: value.ohms,
            tolerance_percent: value.tolerance_percent,
        }
    }

    /// Whether a numeric value was decoded.
    pub fn is_decoded(&self) -> bool {
        self.value_ohms.is_some()
    }

    /// Band names in reading order.
    pub fn band_names(&self) -> Vec<&'static str> {
        self.bands.iter().map(|b| b.name()).collect()
    }
}

/// Read a resistor from encoded image bytes with default configuration.
pub fn read_resistor(bytes: &[u8]) -> Result<ResistorReading, ImageError> {
    BandReader::new().read_bytes(bytes)
}
