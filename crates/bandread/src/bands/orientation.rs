//! Reading-direction resolution.
//!
//! Convention: significant digits first, tolerance last. A gold or silver
//! band can only be a multiplier or tolerance, so a metallic first band with
//! a non-metallic last band means the resistor was photographed backwards.

use crate::color::BandColor;

/// Whether `bands` should be reversed before decoding.
pub fn needs_flip(bands: &[BandColor]) -> bool {
    match (bands.first(), bands.last()) {
        (Some(first), Some(last)) if bands.len() >= 4 => {
            first.is_metallic() && !last.is_metallic()
        }
        _ => false,
    }
}

/// Return `bands` in reading order.
pub fn resolve_orientation(bands: &[BandColor]) -> Vec<BandColor> {
    let mut out = bands.to_vec();
    if needs_flip(bands) {
        out.reverse();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use BandColor::*;

    #[test]
    fn metallic_first_is_flipped() {
        let bands = [Gold, Red, Black, Brown];
        assert_eq!(resolve_orientation(&bands), vec![Brown, Black, Red, Gold]);
    }

    #[test]
    fn conventional_order_is_kept() {
        let bands = [Brown, Black, Red, Gold];
        assert!(!needs_flip(&bands));
        assert_eq!(resolve_orientation(&bands), bands.to_vec());
    }

    #[test]
    fn metallic_at_both_ends_is_kept() {
        let bands = [Silver, Red, Black, Gold];
        assert_eq!(resolve_orientation(&bands), bands.to_vec());
    }

    #[test]
    fn short_sequences_are_never_flipped() {
        let bands = [Gold, Red, Brown];
        assert_eq!(resolve_orientation(&bands), bands.to_vec());
        assert!(resolve_orientation(&[]).is_empty());
    }

    #[test]
    fn resolution_is_idempotent() {
        for bands in [
            vec![Gold, Red, Black, Brown],
            vec![Silver, Orange, Violet, Yellow, Red],
            vec![Brown, Black, Red, Gold],
            vec![Gold, Gold, Red, Gold],
        ] {
            let once = resolve_orientation(&bands);
            assert_eq!(resolve_orientation(&once), once, "{bands:?}");
        }
    }
}
