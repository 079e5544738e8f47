//! High-level reading API.
//!
//! [`BandReader`] is the primary entry point. It owns a [`ReadConfig`] and
//! exposes the pipeline at three depths: encoded bytes, decoded pixels, and
//! pre-classified columns.

use std::path::Path;

use image::RgbImage;

use crate::bands::{columns_from_labels, ClassifiedColumn};
use crate::color::BandColor;
use crate::config::ReadConfig;
use crate::error::ImageError;
use crate::pipeline;
use crate::preprocess;
use crate::trace::ReadTrace;
use crate::ResistorReading;

/// Primary reading interface.
///
/// Holds only immutable configuration; one reader can serve any number of
/// images, from any number of threads.
///
/// # Examples
///
/// ```no_run
/// use bandread::BandReader;
///
/// let reader = BandReader::new();
/// let bytes = std::fs::read("resistor.jpg").unwrap();
/// let reading = reader.read_bytes(&bytes).unwrap();
/// println!("{:?} -> {:?} ohm", reading.bands, reading.value_ohms);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BandReader {
    config: ReadConfig,
}

impl BandReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: ReadConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut ReadConfig {
        &mut self.config
    }

    /// Read a resistor from encoded image bytes (PNG, JPEG, WebP).
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<ResistorReading, ImageError> {
        self.read_bytes_with_trace(bytes).map(|(r, _)| r)
    }

    /// Like [`read_bytes`](Self::read_bytes), also returning stage diagnostics.
    pub fn read_bytes_with_trace(
        &self,
        bytes: &[u8],
    ) -> Result<(ResistorReading, ReadTrace), ImageError> {
        let img = preprocess::load_rgb(bytes, &self.config.preprocess)?;
        Ok(pipeline::read_prepared(&img, &self.config))
    }

    /// Read a resistor from an image file.
    pub fn read_path(&self, path: &Path) -> Result<ResistorReading, ImageError> {
        self.read_path_with_trace(path).map(|(r, _)| r)
    }

    /// Like [`read_path`](Self::read_path), also returning stage diagnostics.
    pub fn read_path_with_trace(
        &self,
        path: &Path,
    ) -> Result<(ResistorReading, ReadTrace), ImageError> {
        let img = preprocess::load_rgb_path(path, &self.config.preprocess)?;
        Ok(pipeline::read_prepared(&img, &self.config))
    }

    /// Read from decoded pixels of any size; resizing and denoising still apply.
    pub fn read_image(&self, img: &RgbImage) -> ResistorReading {
        self.read_image_with_trace(img).0
    }

    /// Like [`read_image`](Self::read_image), also returning stage diagnostics.
    pub fn read_image_with_trace(&self, img: &RgbImage) -> (ResistorReading, ReadTrace) {
        let prepared = preprocess::prepare(img.clone(), &self.config.preprocess);
        pipeline::read_prepared(&prepared, &self.config)
    }

    /// Read from an already-classified column sequence.
    pub fn read_columns(&self, columns: &[ClassifiedColumn]) -> ResistorReading {
        pipeline::read_columns(columns, &self.config).0
    }

    /// Read from a plain per-column label sequence.
    pub fn read_labels(&self, labels: &[BandColor]) -> ResistorReading {
        self.read_columns(&columns_from_labels(labels))
    }
}
