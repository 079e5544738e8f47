//! Band segmentation over a labelled column sequence.
//!
//! Consecutive identical labels collapse into runs. The body color (most
//! frequent non-metallic label) and `unknown` are background: they are never
//! emitted and they separate neighbouring bands at any width. Remaining runs
//! narrower than the minimum band width are noise: they are dropped without
//! separating their neighbours, so a band interrupted by a few misclassified
//! columns stays a single band.

use crate::color::BandColor;

use super::sampling::ClassifiedColumn;

/// Segmentation parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Minimum band width as a fraction of the sampled width.
    /// Default: [`SegmentConfig::DEFAULT_MIN_BAND_WIDTH_FRAC`].
    pub min_band_width_frac: f32,
    /// Lower bound on the minimum band width, in columns.
    /// Default: [`SegmentConfig::DEFAULT_MIN_BAND_WIDTH_FLOOR`].
    pub min_band_width_floor: usize,
}

impl SegmentConfig {
    pub const DEFAULT_MIN_BAND_WIDTH_FRAC: f32 = 0.04;
    pub const DEFAULT_MIN_BAND_WIDTH_FLOOR: usize = 3;
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            min_band_width_frac: Self::DEFAULT_MIN_BAND_WIDTH_FRAC,
            min_band_width_floor: Self::DEFAULT_MIN_BAND_WIDTH_FLOOR,
        }
    }
}

/// Run of identically labelled, x-adjacent columns, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub color: BandColor,
    pub start: u32,
    pub end: u32,
}

impl Segment {
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }
}

/// Output of [`segment_bands`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segmentation {
    /// Surviving band segments in x order.
    pub segments: Vec<Segment>,
    /// Runs dropped as sub-threshold noise.
    pub noise: Vec<Segment>,
    /// Body color, if any non-metallic label was present.
    pub body_color: Option<BandColor>,
    /// Minimum band width applied, in columns.
    pub min_width: usize,
}

impl Segmentation {
    /// Ordered band colors.
    pub fn bands(&self) -> Vec<BandColor> {
        self.segments.iter().map(|s| s.color).collect()
    }
}

/// Collapse consecutive identical labels into runs.
///
/// A run only grows by the column directly to its right; a gap or a step
/// backwards in `x` starts a new run.
pub fn runs(columns: &[ClassifiedColumn]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    for col in columns {
        match out.last_mut() {
            Some(last) if last.color == col.color && last.end.checked_add(1) == Some(col.x) => {
                last.end = col.x
            }
            _ => out.push(Segment {
                color: col.color,
                start: col.x,
                end: col.x,
            }),
        }
    }
    out
}

/// Most frequent non-metallic, non-`unknown` label; ties by palette order.
pub fn body_color(columns: &[ClassifiedColumn]) -> Option<BandColor> {
    let mut counts = [0usize; 12];
    for col in columns {
        if col.color.is_metallic() {
            continue;
        }
        if let Some(i) = col.color.palette_index() {
            counts[i] += 1;
        }
    }
    let mut best: Option<(BandColor, usize)> = None;
    for (i, &n) in counts.iter().enumerate() {
        if n > best.map_or(0, |(_, b)| b) {
            best = Some((BandColor::CANONICAL[i], n));
        }
    }
    best.map(|(c, _)| c)
}

/// Minimum band width in columns for a sample of `sample_width` columns.
pub fn min_band_width(sample_width: usize, cfg: &SegmentConfig) -> usize {
    let frac = (sample_width as f32 * cfg.min_band_width_frac).round() as usize;
    frac.max(cfg.min_band_width_floor)
}

/// Segment a labelled column sequence into an ordered band list.
pub fn segment_bands(columns: &[ClassifiedColumn], cfg: &SegmentConfig) -> Segmentation {
    let body = body_color(columns);
    let min_width = min_band_width(columns.len(), cfg);

    let mut segments: Vec<Segment> = Vec::new();
    let mut noise = Vec::new();
    let mut separated = true;

    for run in runs(columns) {
        if run.color == BandColor::Unknown || Some(run.color) == body {
            separated = true;
            continue;
        }
        if (run.width() as usize) < min_width {
            tracing::trace!(
                "noise run {} at {}..={} (< {} cols)",
                run.color,
                run.start,
                run.end,
                min_width
            );
            noise.push(run);
            continue;
        }
        match segments.last_mut() {
            Some(last) if !separated && last.color == run.color => last.end = run.end,
            _ => segments.push(run),
        }
        separated = false;
    }

    if body.is_none() && !columns.is_empty() {
        tracing::warn!("no body color candidate among {} columns", columns.len());
    }

    Segmentation {
        segments,
        noise,
        body_color: body,
        min_width,
    }
}
