//! Image decoding and normalisation.
//!
//! Produces an upright RGB buffer whose long edge equals the canonical
//! sampling width, so column-count thresholds downstream mean the same thing
//! regardless of the source resolution.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};

use crate::error::ImageError;

/// Preprocessing parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Target length of the long image edge, in pixels.
    /// Default: [`PreprocessConfig::DEFAULT_CANONICAL_WIDTH`].
    pub canonical_width: u32,
    /// Apply EXIF orientation metadata when present.
    pub apply_exif_orientation: bool,
    /// Rotate portrait images by 90° so the resistor axis runs along x.
    pub landscape: bool,
    /// Median filter radius applied after resizing (0 disables).
    /// Default: [`PreprocessConfig::DEFAULT_MEDIAN_RADIUS`].
    pub median_radius: u32,
}

impl PreprocessConfig {
    pub const DEFAULT_CANONICAL_WIDTH: u32 = 320;
    pub const DEFAULT_MEDIAN_RADIUS: u32 = 1;
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            canonical_width: Self::DEFAULT_CANONICAL_WIDTH,
            apply_exif_orientation: true,
            landscape: false,
            median_radius: Self::DEFAULT_MEDIAN_RADIUS,
        }
    }
}

/// Decode encoded bytes into an upright RGB buffer.
pub fn decode_rgb(bytes: &[u8], cfg: &PreprocessConfig) -> Result<RgbImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyBuffer);
    }
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::from)?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    if cfg.apply_exif_orientation {
        img.apply_orientation(orientation);
    }

    let rgb = img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(ImageError::EmptyBuffer);
    }
    Ok(rgb)
}

/// Scale so the long edge equals `canonical`, preserving aspect ratio.
pub fn resize_long_edge(img: &RgbImage, canonical: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let long = w.max(h);
    if long == 0 || canonical == 0 || long == canonical {
        return img.clone();
    }
    let scale = canonical as f64 / long as f64;
    let nw = ((w as f64 * scale).round() as u32).max(1);
    let nh = ((h as f64 * scale).round() as u32).max(1);
    imageops::resize(img, nw, nh, FilterType::Triangle)
}

/// Orientation, resize and denoise on an already-decoded buffer.
pub fn prepare(img: RgbImage, cfg: &PreprocessConfig) -> RgbImage {
    let img = if cfg.landscape && img.height() > img.width() {
        imageops::rotate90(&img)
    } else {
        img
    };
    let img = resize_long_edge(&img, cfg.canonical_width);
    if cfg.median_radius > 0 {
        imageproc::filter::median_filter(&img, cfg.median_radius, cfg.median_radius)
    } else {
        img
    }
}

/// Decode and normalise encoded image bytes.
pub fn load_rgb(bytes: &[u8], cfg: &PreprocessConfig) -> Result<RgbImage, ImageError> {
    let rgb = decode_rgb(bytes, cfg)?;
    let (w, h) = rgb.dimensions();
    let out = prepare(rgb, cfg);
    tracing::debug!(
        "preprocessed {}x{} -> {}x{}",
        w,
        h,
        out.width(),
        out.height()
    );
    Ok(out)
}

/// Read an image file and normalise it.
pub fn load_rgb_path(path: &Path, cfg: &PreprocessConfig) -> Result<RgbImage, ImageError> {
    let bytes = std::fs::read(path).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_rgb(&bytes, cfg)
}
