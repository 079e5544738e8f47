//! Per-call diagnostic record.

use crate::bands::Segment;
use crate::color::BandColor;
use crate::value::ValueDecode;

/// What each pipeline stage saw for one read.
///
/// Collected alongside the reading by the `*_with_trace` entry points of
/// [`BandReader`](crate::BandReader) and meant to be dumped as JSON.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReadTrace {
    /// Size of the preprocessed image `[width, height]`, when the read
    /// started from pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<[u32; 2]>,
    /// Number of classified columns.
    pub sample_width: usize,
    pub min_band_width: usize,
    pub body_color: Option<BandColor>,
    /// Band segments in detected (left-to-right) order.
    pub segments: Vec<Segment>,
    /// Runs discarded as noise.
    pub noise: Vec<Segment>,
    /// Bands in detected order, before orientation.
    pub detected_bands: Vec<BandColor>,
    /// Whether orientation resolution reversed the sequence.
    pub flipped: bool,
    pub decode: ValueDecode,
}
