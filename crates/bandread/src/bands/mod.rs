//! Column sampling, band segmentation and reading-direction resolution.

pub mod orientation;
pub mod sampling;
pub mod segment;

pub use orientation::{needs_flip, resolve_orientation};
pub use sampling::{
    columns_from_labels, sample_columns, ClassifiedColumn, ColumnAggregator, SamplingConfig,
};
pub use segment::{body_color, min_band_width, runs, segment_bands, Segment, SegmentConfig, Segmentation};
