use std::path::PathBuf;

use avm_image::{ImageError, ImageSize};
use avm_io::IoError;

use crate::config::CameraRole;

/// An error raised while building or validating the rig configuration.
///
/// These are the only errors that abort the construction of a processor.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A quad was given with a number of points other than four.
    #[error("A quad needs exactly 4 points, got {0}")]
    InvalidQuad(usize),

    /// The crop margin removes the whole canvas.
    #[error("Crop margin {margin} must be smaller than half the canvas width {width}")]
    InvalidCropMargin {
        /// The requested margin on each side.
        margin: usize,
        /// The width of the canvas being cropped.
        width: usize,
    },

    /// One of the configured sizes has a zero dimension.
    #[error("The {0} size must be non-zero, got {1}")]
    EmptySize(&'static str, ImageSize),

    /// One of the configured sizes is too large to be allocated.
    #[error("The {0} size {1} is too large")]
    SizeTooLarge(&'static str, ImageSize),

    /// The far corner of a view placement does not fit in `usize`.
    #[error("The {0} placement ({1}, {2}) is out of range")]
    PlacementOverflow(CameraRole, usize, usize),

    /// The configuration could not be parsed.
    #[error("Failed to parse the rig configuration. {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("Failed to read the rig configuration {0}. {1}")]
    File(PathBuf, #[source] std::io::Error),
}

/// An error raised by the compositing engine.
#[derive(thiserror::Error, Debug)]
pub enum AvmError {
    /// Invalid configuration or crop margin.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error from an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error reading or writing an image file.
    #[error(transparent)]
    Io(#[from] IoError),
}
