//! Per-column color sampling.
//!
//! The resistor axis is assumed to run along x. Each column of the resized
//! image is reduced to a single palette label; band/region structure is left
//! to the segmenter.

use image::{Rgb, RgbImage};

use crate::color::{classify_confident, BandColor, Hsv};

/// How a column's pixels are reduced to one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAggregator {
    /// Classify the single pixel at the vertical center.
    CenterPixel,
    /// Average RGB over the central band, then classify once.
    VerticalMean,
    /// Classify `scan_lines` evenly spaced rows; the most frequent label wins.
    MajorityVote {
        /// Number of horizontal scan lines inside the central band.
        scan_lines: usize,
    },
}

/// Column sampling parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Reduction applied to each column.
    /// Default: majority vote over [`SamplingConfig::DEFAULT_SCAN_LINES`] lines.
    pub aggregator: ColumnAggregator,
    /// Fraction of the image height, centered vertically, that mean and
    /// vote aggregation draw from.
    /// Default: [`SamplingConfig::DEFAULT_BAND_FRAC`].
    pub band_frac: f32,
    /// Palette distance above which a pixel is labelled `unknown`.
    /// `None` always accepts the nearest color.
    pub max_distance: Option<f32>,
}

impl SamplingConfig {
    pub const DEFAULT_SCAN_LINES: usize = 7;
    pub const DEFAULT_BAND_FRAC: f32 = 0.5;
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            aggregator: ColumnAggregator::MajorityVote {
                scan_lines: Self::DEFAULT_SCAN_LINES,
            },
            band_frac: Self::DEFAULT_BAND_FRAC,
            max_distance: None,
        }
    }
}

/// One labelled column of the sampled image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassifiedColumn {
    pub x: u32,
    pub color: BandColor,
}

/// Wrap a plain label sequence as columns at `x = 0, 1, 2, ...`.
pub fn columns_from_labels(labels: &[BandColor]) -> Vec<ClassifiedColumn> {
    labels
        .iter()
        .enumerate()
        .map(|(x, &color)| ClassifiedColumn {
            x: x as u32,
            color,
        })
        .collect()
}

/// Rows `[top, bottom]` (inclusive) of the central band.
fn band_rows(height: u32, band_frac: f32) -> (u32, u32) {
    let last = height.saturating_sub(1);
    let center = last as f32 / 2.0;
    let half = (band_frac.clamp(0.0, 1.0) * height as f32 / 2.0).max(0.0);
    let top = (center - half).round().clamp(0.0, last as f32) as u32;
    let bottom = (center + half).round().clamp(0.0, last as f32) as u32;
    (top, bottom)
}

/// Evenly spaced scan rows inside the central band.
pub(crate) fn scan_rows(height: u32, band_frac: f32, n: usize) -> Vec<u32> {
    if height == 0 {
        return Vec::new();
    }
    let (top, bottom) = band_rows(height, band_frac);
    let n = n.max(1);
    if n == 1 || top == bottom {
        return vec![(top + bottom) / 2];
    }
    let span = (bottom - top) as f32;
    (0..n)
        .map(|i| top + (span * i as f32 / (n - 1) as f32).round() as u32)
        .collect()
}

fn label(px: &Rgb<u8>, cfg: &SamplingConfig) -> BandColor {
    classify_confident(&Hsv::from(px), cfg.max_distance)
}

/// Most frequent label; ties go to the earlier palette entry, `unknown` last.
fn majority(labels: impl Iterator<Item = BandColor>) -> BandColor {
    let mut counts = [0u32; 13];
    for c in labels {
        counts[c as usize] += 1;
    }
    let mut best = BandColor::Unknown;
    let mut best_count = 0u32;
    for (i, &n) in counts.iter().enumerate() {
        if n > best_count {
            best_count = n;
            best = BandColor::CANONICAL.get(i).copied().unwrap_or(BandColor::Unknown);
        }
    }
    best
}

fn mean_rgb(img: &RgbImage, x: u32, top: u32, bottom: u32) -> Rgb<u8> {
    let mut acc = [0u32; 3];
    for y in top..=bottom {
        let p = img.get_pixel(x, y).0;
        for (a, v) in acc.iter_mut().zip(p) {
            *a += v as u32;
        }
    }
    let n = bottom - top + 1;
    Rgb(acc.map(|a| ((a + n / 2) / n) as u8))
}

/// Label every column of `img`.
pub fn sample_columns(img: &RgbImage, cfg: &SamplingConfig) -> Vec<ClassifiedColumn> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }

    match cfg.aggregator {
        ColumnAggregator::CenterPixel => {
            let y = (h - 1) / 2;
            (0..w)
                .map(|x| ClassifiedColumn {
                    x,
                    color: label(img.get_pixel(x, y), cfg),
                })
                .collect()
        }
        ColumnAggregator::VerticalMean => {
            let (top, bottom) = band_rows(h, cfg.band_frac);
            (0..w)
                .map(|x| ClassifiedColumn {
                    x,
                    color: label(&mean_rgb(img, x, top, bottom), cfg),
                })
                .collect()
        }
        ColumnAggregator::MajorityVote { scan_lines } => {
            let rows = scan_rows(h, cfg.band_frac, scan_lines);
            (0..w)
                .map(|x| ClassifiedColumn {
                    x,
                    color: majority(rows.iter().map(|&y| label(img.get_pixel(x, y), cfg))),
                })
                .collect()
        }
    }
}
