//! Color-code value decoding and display formatting.

pub mod decode;
pub mod format;

pub use decode::{
    decode, decode_with_layout, digit_value, multiplier_exponent, multiplier_value,
    tolerance_percent, BandLayout, DecodeCandidate, DecodeRejectReason, ReadDirection,
    ValueDecode,
};
pub use format::{format_ohms, format_reading};
