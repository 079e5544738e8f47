//! Stage orchestration: sample → segment → orient → decode.

use image::RgbImage;

use crate::bands::{
    needs_flip, resolve_orientation, sample_columns, segment_bands, ClassifiedColumn,
};
use crate::config::ReadConfig;
use crate::trace::ReadTrace;
use crate::value::decode;
use crate::ResistorReading;

/// Run segmentation onward on an already-classified column sequence.
pub(crate) fn read_columns(
    columns: &[ClassifiedColumn],
    config: &ReadConfig,
) -> (ResistorReading, ReadTrace) {
    let seg = segment_bands(columns, &config.segment);
    let detected = seg.bands();
    tracing::debug!(
        "{} columns -> {} runs kept, {} noise, body {:?}",
        columns.len(),
        seg.segments.len(),
        seg.noise.len(),
        seg.body_color
    );

    let flipped = needs_flip(&detected);
    let bands = resolve_orientation(&detected);
    if flipped {
        tracing::debug!("metallic first band; reading reversed");
    }

    let value = decode(&bands);
    let reading = ResistorReading::from_decode(bands, &value);

    match (reading.value_ohms, reading.tolerance_percent) {
        (Some(ohms), tol) => tracing::info!(
            "bands [{}] -> {} ohm, tolerance {:?}%",
            reading.band_names().join(", "),
            ohms,
            tol
        ),
        (None, _) => tracing::info!(
            "bands [{}] -> no value ({})",
            reading.band_names().join(", "),
            value
                .reject
                .map(|r| r.code())
                .unwrap_or("no valid candidate")
        ),
    }

    let trace = ReadTrace {
        image_size: None,
        sample_width: columns.len(),
        min_band_width: seg.min_width,
        body_color: seg.body_color,
        segments: seg.segments,
        noise: seg.noise,
        detected_bands: detected,
        flipped,
        decode: value,
    };
    (reading, trace)
}

/// Classify and read an already-preprocessed image.
pub(crate) fn read_prepared(img: &RgbImage, config: &ReadConfig) -> (ResistorReading, ReadTrace) {
    let columns = sample_columns(img, &config.sampling);
    let (reading, mut trace) = read_columns(&columns, config);
    trace.image_size = Some([img.width(), img.height()]);
    (reading, trace)
}
