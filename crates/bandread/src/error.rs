//! Fatal errors. Decode failures are not errors; see
//! [`DecodeRejectReason`](crate::value::DecodeRejectReason).

use std::path::PathBuf;

/// The input could not be turned into pixels.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    InvalidEncoding(#[from] image::ImageError),

    /// No bytes, or an image with a zero-sized dimension.
    #[error("image buffer is empty")]
    EmptyBuffer,

    /// The image file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
