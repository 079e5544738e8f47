//! Color primitives: HSV conversion and the canonical band palette.

pub mod hsv;
pub mod palette;

pub use hsv::{rgb_to_hsv, Hsv};
pub use palette::{
    classify, classify_confident, classify_with_distance, hsv_distance, hue_distance, BandColor,
    CanonicalColor, ParseBandColorError, PALETTE,
};
