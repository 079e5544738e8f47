//! Shared helpers for synthetic resistor renders and label sequences.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::color::palette::reference;
use crate::color::{BandColor, Hsv};

/// Inverse of [`crate::color::rgb_to_hsv`], rounded to 8-bit channels.
pub(crate) fn hsv_to_rgb(hsv: &Hsv) -> [u8; 3] {
    let c = hsv.v * hsv.s;
    let hp = hsv.h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = hsv.v - c;
    [r, g, b].map(|ch| ((ch + m) * 255.0).round().clamp(0.0, 255.0) as u8)
}

/// 8-bit RGB rendering of a palette reference color.
pub(crate) fn reference_rgb(color: BandColor) -> [u8; 3] {
    let hsv = reference(color).expect("canonical color");
    hsv_to_rgb(&hsv)
}

/// A vertical stripe painted across the full image height.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SyntheticBand {
    pub color: BandColor,
    pub start: u32,
    pub width: u32,
}

impl SyntheticBand {
    pub(crate) fn new(color: BandColor, start: u32, width: u32) -> Self {
        Self {
            color,
            start,
            width,
        }
    }
}

/// Render a resistor body filling the frame with the given bands.
pub(crate) fn paint_resistor(
    w: u32,
    h: u32,
    body: BandColor,
    bands: &[SyntheticBand],
) -> RgbImage {
    let mut img = RgbImage::from_pixel(w, h, Rgb(reference_rgb(body)));
    for band in bands {
        let px = Rgb(reference_rgb(band.color));
        for x in band.start..(band.start + band.width).min(w) {
            for y in 0..h {
                img.put_pixel(x, y, px);
            }
        }
    }
    img
}

/// Encode an image as PNG bytes.
pub(crate) fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("png encode");
    buf.into_inner()
}

/// Expand `(color, count)` runs into a flat label sequence.
pub(crate) fn label_runs(runs: &[(BandColor, usize)]) -> Vec<BandColor> {
    runs.iter()
        .flat_map(|&(c, n)| std::iter::repeat(c).take(n))
        .collect()
}
