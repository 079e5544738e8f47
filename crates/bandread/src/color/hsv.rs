//! RGB → HSV conversion.
//!
//! Hue is comparatively stable under the warm/cool casts of indoor lighting,
//! so every classification stage works in HSV rather than raw RGB.

use image::Rgb;

/// Hue/saturation/value triple.
///
/// - `h` in degrees, `[0, 360)`
/// - `s` in `[0, 1]`
/// - `v` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

impl From<Rgb<u8>> for Hsv {
    fn from(px: Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        rgb_to_hsv(r, g, b)
    }
}

impl From<&Rgb<u8>> for Hsv {
    fn from(px: &Rgb<u8>) -> Self {
        Hsv::from(*px)
    }
}

/// Convert an 8-bit RGB triple to [`Hsv`].
///
/// Standard max/min/chroma construction. Achromatic inputs (chroma 0) get
/// hue 0; pure black gets saturation 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let h = if chroma == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / chroma + 2.0)
    } else {
        60.0 * ((r - g) / chroma + 4.0)
    };
    // rem_euclid(6.0) can land on exactly 360 through rounding.
    let h = if h >= 360.0 { h - 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { chroma / max };

    Hsv { h, s, v: max }
}
