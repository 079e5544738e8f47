//! Human-readable value strings. Presentation only; stored ohms are never
//! rounded.

use crate::ResistorReading;

/// Render `v` with at most `decimals` places, trailing zeros removed.
fn trimmed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// `2_700_000 → "2.7M"`, `4_700 → "4.7k"`, `220 → "220"`, `0.47 → "0.47"`.
pub fn format_ohms(ohms: f64) -> String {
    if ohms >= 1_000_000.0 {
        format!("{}M", trimmed(ohms / 1_000_000.0, 3))
    } else if ohms >= 1_000.0 {
        format!("{}k", trimmed(ohms / 1_000.0, 3))
    } else if ohms.fract() == 0.0 {
        format!("{}", ohms as u64)
    } else {
        trimmed(ohms, 2)
    }
}

/// `"1kΩ ±5%"`, or `"1kΩ"` without tolerance; `None` without a value.
pub fn format_reading(reading: &ResistorReading) -> Option<String> {
    let ohms = reading.value_ohms?;
    let value = format!("{}Ω", format_ohms(ohms));
    Some(match reading.tolerance_percent {
        Some(tol) => format!("{value} ±{}%", trimmed(tol, 2)),
        None => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BandColor;

    #[test]
    fn suffixes_follow_magnitude() {
        assert_eq!(format_ohms(10.0), "10");
        assert_eq!(format_ohms(999.0), "999");
        assert_eq!(format_ohms(1_000.0), "1k");
        assert_eq!(format_ohms(6_800.0), "6.8k");
        assert_eq!(format_ohms(75_000.0), "75k");
        assert_eq!(format_ohms(1_000_000.0), "1M");
        assert_eq!(format_ohms(2_700_000.0), "2.7M");
        assert_eq!(format_ohms(0.47), "0.47");
        assert_eq!(format_ohms(1.0), "1");
    }

    #[test]
    fn formatting_leaves_value_untouched() {
        let reading = ResistorReading {
            bands: vec![BandColor::Brown, BandColor::Black, BandColor::Red, BandColor::Gold],
            band_count: Some(4),
            value_ohms: Some(1_000.0),
            tolerance_percent: Some(5.0),
        };
        assert_eq!(format_reading(&reading).as_deref(), Some("1kΩ ±5%"));
        assert_eq!(reading.value_ohms, Some(1_000.0));
    }

    #[test]
    fn reading_without_value_has_no_label() {
        assert_eq!(format_reading(&ResistorReading::empty()), None);
    }

    #[test]
    fn fractional_tolerance() {
        let reading = ResistorReading {
            value_ohms: Some(330.0),
            tolerance_percent: Some(0.25),
            ..ResistorReading::empty()
        };
        assert_eq!(format_reading(&reading).as_deref(), Some("330Ω ±0.25%"));
    }
}
