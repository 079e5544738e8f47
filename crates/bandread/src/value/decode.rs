//! Band sequence → resistance decoding.
//!
//! Layouts:
//! - 4 bands: `[digit, digit, multiplier, tolerance]`
//! - 5 bands: `[digit, digit, digit, multiplier, tolerance]`
//! - 6 bands: as 5, plus a trailing temperature-coefficient band (ignored)
//!
//! Both the given order and its reverse are tried. A candidate is valid when
//! every digit and the multiplier resolve; among valid candidates one with a
//! resolvable tolerance is preferred, otherwise the first in `[as-read,
//! reversed]` order wins. No valid candidate is a normal outcome and yields
//! null value/tolerance.

use crate::color::BandColor;

/// Significant-digit value of a band.
pub const fn digit_value(c: BandColor) -> Option<u8> {
    match c {
        BandColor::Black => Some(0),
        BandColor::Brown => Some(1),
        BandColor::Red => Some(2),
        BandColor::Orange => Some(3),
        BandColor::Yellow => Some(4),
        BandColor::Green => Some(5),
        BandColor::Blue => Some(6),
        BandColor::Violet => Some(7),
        BandColor::Grey => Some(8),
        BandColor::White => Some(9),
        BandColor::Gold | BandColor::Silver | BandColor::Unknown => None,
    }
}

/// Power-of-ten exponent of a multiplier band.
pub const fn multiplier_exponent(c: BandColor) -> Option<i32> {
    match c {
        BandColor::Gold => Some(-1),
        BandColor::Silver => Some(-2),
        BandColor::Unknown => None,
        // The ten digit colors share their digit as the exponent.
        other => match digit_value(other) {
            Some(d) => Some(d as i32),
            None => None,
        },
    }
}

/// Multiplier factor of a band (`black = 1` … `white = 1e9`, `gold = 0.1`,
/// `silver = 0.01`).
pub fn multiplier_value(c: BandColor) -> Option<f64> {
    multiplier_exponent(c).map(|e| 10f64.powi(e))
}

/// Tolerance in percent of a band in the tolerance position.
pub const fn tolerance_percent(c: BandColor) -> Option<f64> {
    match c {
        BandColor::Brown => Some(1.0),
        BandColor::Red => Some(2.0),
        BandColor::Green => Some(0.5),
        BandColor::Blue => Some(0.25),
        BandColor::Violet => Some(0.1),
        BandColor::Grey => Some(0.05),
        BandColor::Gold => Some(5.0),
        BandColor::Silver => Some(10.0),
        _ => None,
    }
}

/// Which way a candidate reads the detected sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadDirection {
    AsRead,
    Reversed,
}

/// Stable reason code for a failed or partial decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeRejectReason {
    /// Fewer than four bands.
    InsufficientBands,
    /// More than six bands.
    UnsupportedBandCount,
    UnmappableDigit,
    UnmappableMultiplier,
    /// Value decoded but the last band is not a tolerance color.
    UnresolvableTolerance,
}

impl DecodeRejectReason {
    pub const fn code(self) -> &'static str {
        match self {
            Self::InsufficientBands => "insufficient_bands",
            Self::UnsupportedBandCount => "unsupported_band_count",
            Self::UnmappableDigit => "unmappable_digit",
            Self::UnmappableMultiplier => "unmappable_multiplier",
            Self::UnresolvableTolerance => "unresolvable_tolerance",
        }
    }
}

impl std::fmt::Display for DecodeRejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Band positions for a given band count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLayout {
    /// Number of leading significant-digit bands.
    pub digits: usize,
    /// Index of the multiplier band.
    pub multiplier: usize,
    /// Index of the tolerance band.
    pub tolerance: usize,
}

impl BandLayout {
    pub const fn for_count(n: usize) -> Option<Self> {
        match n {
            4 => Some(Self {
                digits: 2,
                multiplier: 2,
                tolerance: 3,
            }),
            5 | 6 => Some(Self {
                digits: 3,
                multiplier: 3,
                tolerance: 4,
            }),
            _ => None,
        }
    }
}

/// One scored reading direction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecodeCandidate {
    pub direction: ReadDirection,
    pub ohms: Option<f64>,
    pub tolerance_percent: Option<f64>,
    pub valid: bool,
    /// Why the candidate is invalid, or `unresolvable_tolerance` for a valid
    /// candidate without tolerance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject: Option<DecodeRejectReason>,
}

impl DecodeCandidate {
    fn invalid(direction: ReadDirection, reason: DecodeRejectReason) -> Self {
        Self {
            direction,
            ohms: None,
            tolerance_percent: None,
            valid: false,
            reject: Some(reason),
        }
    }
}

/// Outcome of [`decode`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValueDecode {
    pub ohms: Option<f64>,
    pub tolerance_percent: Option<f64>,
    /// Direction of the accepted candidate.
    pub selected: Option<ReadDirection>,
    /// Every candidate tried, in trial order.
    pub candidates: Vec<DecodeCandidate>,
    /// Set when decoding was skipped before any candidate was tried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject: Option<DecodeRejectReason>,
}

impl ValueDecode {
    fn skipped(reason: DecodeRejectReason) -> Self {
        Self {
            ohms: None,
            tolerance_percent: None,
            selected: None,
            candidates: Vec::new(),
            reject: Some(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ohms.is_some()
    }
}

/// Scale significant digits by a power of ten.
///
/// Negative exponents divide by an exact power of ten so `47 × 10⁻²` reads
/// back as `0.47` rather than `0.47000000000000003`.
fn scale_digits(digits: u64, exponent: i32) -> f64 {
    if exponent >= 0 {
        digits as f64 * 10f64.powi(exponent)
    } else {
        digits as f64 / 10f64.powi(-exponent)
    }
}

/// Decode `bands` (already in the order to try) with `layout`.
pub fn decode_with_layout(
    bands: &[BandColor],
    layout: BandLayout,
    direction: ReadDirection,
) -> DecodeCandidate {
    if bands.len() <= layout.multiplier {
        return DecodeCandidate::invalid(direction, DecodeRejectReason::InsufficientBands);
    }
    let mut digits: u64 = 0;
    for &band in &bands[..layout.digits] {
        match digit_value(band) {
            Some(d) => digits = digits * 10 + d as u64,
            None => return DecodeCandidate::invalid(direction, DecodeRejectReason::UnmappableDigit),
        }
    }
    let Some(exponent) = multiplier_exponent(bands[layout.multiplier]) else {
        return DecodeCandidate::invalid(direction, DecodeRejectReason::UnmappableMultiplier);
    };
    let tolerance = bands.get(layout.tolerance).copied().and_then(tolerance_percent);

    DecodeCandidate {
        direction,
        ohms: Some(scale_digits(digits, exponent)),
        tolerance_percent: tolerance,
        valid: true,
        reject: tolerance
            .is_none()
            .then_some(DecodeRejectReason::UnresolvableTolerance),
    }
}

/// Decode an ordered band sequence, trying both reading directions.
pub fn decode(bands: &[BandColor]) -> ValueDecode {
    let Some(layout) = BandLayout::for_count(bands.len()) else {
        let reason = if bands.len() < 4 {
            DecodeRejectReason::InsufficientBands
        } else {
            DecodeRejectReason::UnsupportedBandCount
        };
        tracing::debug!("decode skipped for {} bands: {}", bands.len(), reason);
        return ValueDecode::skipped(reason);
    };

    let reversed: Vec<BandColor> = bands.iter().rev().copied().collect();
    let candidates = vec![
        decode_with_layout(bands, layout, ReadDirection::AsRead),
        decode_with_layout(&reversed, layout, ReadDirection::Reversed),
    ];
    for c in &candidates {
        tracing::trace!(
            "candidate {:?}: valid={} ohms={:?} tol={:?} reject={:?}",
            c.direction,
            c.valid,
            c.ohms,
            c.tolerance_percent,
            c.reject
        );
    }

    let chosen = candidates
        .iter()
        .find(|c| c.valid && c.tolerance_percent.is_some())
        .or_else(|| candidates.iter().find(|c| c.valid))
        .map(|c| (c.ohms, c.tolerance_percent, c.direction));

    let (ohms, tolerance_percent, selected) = match chosen {
        Some((ohms, tol, dir)) => (ohms, tol, Some(dir)),
        None => (None, None, None),
    };
    ValueDecode {
        ohms,
        tolerance_percent,
        selected,
        candidates,
        reject: None,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use BandColor::*;

    const KNOWN: [([BandColor; 4], f64); 5] = [
        ([Brown, Black, Black, Gold], 10.0),
        ([Brown, Black, Red, Gold], 1_000.0),
        ([Blue, Grey, Red, Gold], 6_800.0),
        ([Violet, Green, Orange, Gold], 75_000.0),
        ([Red, Violet, Green, Gold], 2_700_000.0),
    ];

    #[test]
    fn known_values_decode_exactly() {
        for (bands, ohms) in KNOWN {
            let d = decode(&bands);
            assert_eq!(d.ohms, Some(ohms), "{bands:?}");
            assert_eq!(d.tolerance_percent, Some(5.0), "{bands:?}");
            assert_eq!(d.selected, Some(ReadDirection::AsRead));
        }
    }

    #[test]
    fn reversed_known_values_are_recovered() {
        for (bands, ohms) in KNOWN {
            let mut rev = bands;
            rev.reverse();
            let d = decode(&rev);
            assert!(d
                .candidates
                .iter()
                .any(|c| c.valid && c.ohms == Some(ohms) && c.tolerance_percent == Some(5.0)));
            assert_eq!(d.ohms, Some(ohms), "{rev:?}");
            assert_eq!(d.selected, Some(ReadDirection::Reversed));
        }
    }

    #[test]
    fn too_few_bands_are_null() {
        for bands in [vec![], vec![Brown], vec![Brown, Black, Red]] {
            let d = decode(&bands);
            assert_eq!(d.ohms, None);
            assert_eq!(d.tolerance_percent, None);
            assert_eq!(d.reject, Some(DecodeRejectReason::InsufficientBands));
            assert!(d.candidates.is_empty());
        }
    }

    #[test]
    fn too_many_bands_are_null() {
        let d = decode(&[Brown, Black, Black, Red, Brown, Red, Gold]);
        assert_eq!(d.ohms, None);
        assert_eq!(d.reject, Some(DecodeRejectReason::UnsupportedBandCount));
    }

    #[test]
    fn gold_digit_invalidates_candidate() {
        let d = decode(&[Gold, Black, Red, Gold]);
        let as_read = &d.candidates[0];
        assert!(!as_read.valid);
        assert_eq!(as_read.reject, Some(DecodeRejectReason::UnmappableDigit));
        // Reversed reads gold as a digit too.
        assert!(!d.candidates[1].valid);
        assert_eq!(d.ohms, None);
        assert_eq!(d.selected, None);
    }

    #[test]
    fn unknown_multiplier_invalidates_candidate() {
        let c = decode_with_layout(
            &[Brown, Black, Unknown, Gold],
            BandLayout::for_count(4).unwrap(),
            ReadDirection::AsRead,
        );
        assert!(!c.valid);
        assert_eq!(c.reject, Some(DecodeRejectReason::UnmappableMultiplier));
    }

    #[test]
    fn candidate_with_tolerance_is_preferred() {
        // As read: 22 × 10 = 220 Ω, black is no tolerance.
        // Reversed: 01 × 100 = 100 Ω ±2 %.
        let d = decode(&[Red, Red, Brown, Black]);
        assert!(d.candidates[0].valid);
        assert_eq!(
            d.candidates[0].reject,
            Some(DecodeRejectReason::UnresolvableTolerance)
        );
        assert_eq!(d.selected, Some(ReadDirection::Reversed));
        assert_eq!(d.ohms, Some(100.0));
        assert_eq!(d.tolerance_percent, Some(2.0));
    }

    #[test]
    fn first_valid_candidate_wins_without_tolerance() {
        // As read: 47 × 1000; reversed: 33 × 1e7. Neither ends in a tolerance color.
        let d = decode(&[Yellow, Violet, Orange, Orange]);
        assert_eq!(d.selected, Some(ReadDirection::AsRead));
        assert_eq!(d.ohms, Some(47_000.0));
        assert_eq!(d.tolerance_percent, None);
    }

    #[test]
    fn five_band_precision_resistor() {
        let d = decode(&[Brown, Black, Black, Brown, Brown]);
        assert_eq!(d.ohms, Some(1_000.0));
        assert_eq!(d.tolerance_percent, Some(1.0));
    }

    #[test]
    fn six_band_ignores_temperature_coefficient() {
        let d = decode(&[Orange, Orange, Black, Black, Blue, Red]);
        assert_eq!(d.selected, Some(ReadDirection::AsRead));
        assert_eq!(d.ohms, Some(330.0));
        assert_eq!(d.tolerance_percent, Some(0.25));
    }

    #[test]
    fn fractional_multipliers() {
        let d = decode(&[Yellow, Violet, Silver, Gold]);
        assert_relative_eq!(d.ohms.unwrap(), 0.47);
        assert_eq!(d.ohms, Some(0.47));
        let d = decode(&[Brown, Black, Gold, Gold]);
        assert_eq!(d.ohms, Some(1.0));
    }

    #[test]
    fn lookup_tables() {
        assert_eq!(digit_value(White), Some(9));
        assert_eq!(digit_value(Silver), None);
        assert_eq!(multiplier_value(White), Some(1e9));
        assert_eq!(multiplier_value(Gold), Some(0.1));
        assert_eq!(multiplier_value(Silver), Some(0.01));
        assert_eq!(tolerance_percent(Orange), None);
        assert_eq!(tolerance_percent(Silver), Some(10.0));
        assert_eq!(DecodeRejectReason::UnmappableDigit.to_string(), "unmappable_digit");
    }
}
