// THEORY:
// Errors are split along the same line as the architecture. `AnalysisError` is the
// closed taxonomy of the pure analysis core; it never mentions files, decoders or
// processes. `SourceError` belongs to the frame-source boundary (image decoding,
// ffmpeg). `PipelineError` is what a caller of the end-to-end API sees and simply
// wraps the other two.
//
// Nothing here is retried. The core never substitutes a default brightness or
// coordinate for a failure.

use thiserror::Error;

/// Failures of the brightness-analysis core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The pixel buffer does not match the declared dimensions.
    #[error("invalid frame: {width}x{height} needs {expected} bytes, buffer has {actual}")]
    InvalidFrame {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A well-formed frame with zero pixels was scanned.
    #[error("frame has no pixels to scan")]
    NoPixels,

    /// The frame sequence ended before a single frame was scanned.
    #[error("no frames processed")]
    NoFramesProcessed,

    /// A neighborhood window contained no in-bounds pixels.
    #[error("neighborhood of radius {radius} around ({x}, {y}) has no in-bounds pixels")]
    DegenerateWindow { x: u32, y: u32, radius: u32 },
}

/// Failures of the frame-source boundary (decoding stills, sampling video).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("ffmpeg error: {0}")]
    Ffmpeg(String),

    #[error("decoder produced an unusable frame: {0}")]
    InvalidFrame(#[from] AnalysisError),
}

/// Failures of one end-to-end analysis call.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("analysis task failed: {0}")]
    Join(String),
}

/// Result type for end-to-end analysis calls.
pub type Result<T> = std::result::Result<T, PipelineError>;
