//! The 12-entry canonical band palette and nearest-neighbour classification.
//!
//! Distances are computed in HSV with a circular hue term weighted twice as
//! heavily as saturation and value:
//!
//! ```text
//! hue_dist(a, b) = min(|a-b| mod 360, 360 - |a-b| mod 360) / 180
//! dist(c1, c2)   = sqrt(2 * hue_dist² + Δs² + Δv²)
//! ```
//!
//! Ties are resolved by palette declaration order: the scan keeps the first
//! entry that reaches the minimum, so equal distances always favour the
//! earlier color.

use std::fmt;
use std::str::FromStr;

use super::hsv::Hsv;

/// Weight applied to the squared hue term.
const HUE_WEIGHT: f32 = 2.0;

/// A resistor band color as seen by the classifier.
///
/// The first twelve variants are the canonical palette in declaration order;
/// `Unknown` marks a column the classifier refused to label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BandColor {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Grey,
    White,
    Gold,
    Silver,
    Unknown,
}

impl BandColor {
    /// Canonical colors in palette order (excludes `Unknown`).
    pub const CANONICAL: [BandColor; 12] = [
        BandColor::Black,
        BandColor::Brown,
        BandColor::Red,
        BandColor::Orange,
        BandColor::Yellow,
        BandColor::Green,
        BandColor::Blue,
        BandColor::Violet,
        BandColor::Grey,
        BandColor::White,
        BandColor::Gold,
        BandColor::Silver,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Brown => "brown",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Grey => "grey",
            Self::White => "white",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Unknown => "unknown",
        }
    }

    /// Gold and silver: never a digit and never a body color.
    pub const fn is_metallic(self) -> bool {
        matches!(self, Self::Gold | Self::Silver)
    }

    /// Position in the palette; `None` for `Unknown`.
    pub const fn palette_index(self) -> Option<usize> {
        match self {
            Self::Unknown => None,
            c => Some(c as usize),
        }
    }
}

impl fmt::Display for BandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognised color name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown band color name: {0:?}")]
pub struct ParseBandColorError(pub String);

impl FromStr for BandColor {
    type Err = ParseBandColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let color = match lower.as_str() {
            "black" => Self::Black,
            "brown" => Self::Brown,
            "red" => Self::Red,
            "orange" => Self::Orange,
            "yellow" => Self::Yellow,
            "green" => Self::Green,
            "blue" => Self::Blue,
            "violet" | "purple" => Self::Violet,
            "grey" | "gray" => Self::Grey,
            "white" => Self::White,
            "gold" => Self::Gold,
            "silver" => Self::Silver,
            "unknown" => Self::Unknown,
            _ => return Err(ParseBandColorError(s.to_string())),
        };
        Ok(color)
    }
}

/// One palette entry: a color and its reference HSV.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CanonicalColor {
    pub color: BandColor,
    pub hsv: Hsv,
}

const fn entry(color: BandColor, h: f32, s: f32, v: f32) -> CanonicalColor {
    CanonicalColor {
        color,
        hsv: Hsv::new(h, s, v),
    }
}

/// Reference colors, indexed by [`BandColor::palette_index`].
pub static PALETTE: [CanonicalColor; 12] = [
    entry(BandColor::Black, 0.0, 0.0, 0.10),
    entry(BandColor::Brown, 20.0, 0.65, 0.35),
    entry(BandColor::Red, 0.0, 0.85, 0.75),
    entry(BandColor::Orange, 25.0, 0.90, 0.95),
    entry(BandColor::Yellow, 55.0, 0.85, 0.95),
    entry(BandColor::Green, 120.0, 0.70, 0.55),
    entry(BandColor::Blue, 220.0, 0.75, 0.65),
    entry(BandColor::Violet, 280.0, 0.55, 0.55),
    entry(BandColor::Grey, 0.0, 0.0, 0.50),
    entry(BandColor::White, 0.0, 0.0, 0.95),
    entry(BandColor::Gold, 45.0, 0.60, 0.70),
    entry(BandColor::Silver, 0.0, 0.0, 0.75),
];

/// Reference HSV of a canonical color; `None` for `Unknown`.
pub fn reference(color: BandColor) -> Option<Hsv> {
    color.palette_index().map(|i| PALETTE[i].hsv)
}

/// Circular hue distance normalised to `[0, 1]`.
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs().rem_euclid(360.0);
    d.min(360.0 - d) / 180.0
}

/// Weighted HSV distance used for palette matching.
pub fn hsv_distance(a: &Hsv, b: &Hsv) -> f32 {
    let dh = hue_distance(a.h, b.h);
    let ds = a.s - b.s;
    let dv = a.v - b.v;
    (HUE_WEIGHT * dh * dh + ds * ds + dv * dv).sqrt()
}

/// Nearest canonical color and its distance.
pub fn classify_with_distance(hsv: &Hsv) -> (BandColor, f32) {
    let mut best = PALETTE[0].color;
    let mut best_dist = f32::INFINITY;
    for c in PALETTE.iter() {
        let d = hsv_distance(hsv, &c.hsv);
        if d < best_dist {
            best = c.color;
            best_dist = d;
        }
    }
    (best, best_dist)
}

/// Nearest canonical color.
pub fn classify(hsv: &Hsv) -> BandColor {
    classify_with_distance(hsv).0
}

/// Nearest canonical color, or `Unknown` when farther than `max_distance`.
pub fn classify_confident(hsv: &Hsv, max_distance: Option<f32>) -> BandColor {
    let (color, dist) = classify_with_distance(hsv);
    match max_distance {
        Some(limit) if dist > limit => BandColor::Unknown,
        _ => color,
    }
}
