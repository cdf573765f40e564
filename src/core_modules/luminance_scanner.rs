// THEORY:
// The `LuminanceScanner` answers one question about one frame: where is its
// brightest pixel, and how bright is it?
//
// Key principles:
// 1.  **Canonical scan order**: Pixels are visited strictly in row-major index order
//     (left to right, top to bottom). The running maximum starts below any valid
//     luminance and is only replaced by a *strictly* greater value, so ties always
//     resolve to the earliest pixel. Results are therefore fully deterministic.
// 2.  **Single pass**: One linear walk over the buffer, no allocation.
// 3.  **Pure**: No state survives a call; the frame is only read.

use crate::core_modules::frame::{Coordinate, Frame};
use crate::core_modules::pixel::pixel::{CHANNELS, Luminance, luminance_of};
use crate::error::AnalysisError;

/// Starting value of every running maximum; lower than any real luminance.
pub const LUMINANCE_SENTINEL: Luminance = -1.0;

/// The brightest pixel of a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanResult {
    pub brightness: Luminance,
    pub coordinate: Coordinate,
}

pub struct LuminanceScanner;

impl LuminanceScanner {
    /// Finds the first pixel (in row-major order) holding the frame's maximum luminance.
    pub fn scan(frame: &Frame) -> Result<ScanResult, AnalysisError> {
        frame.validate()?;
        if frame.is_empty() {
            return Err(AnalysisError::NoPixels);
        }

        let mut max_brightness = LUMINANCE_SENTINEL;
        let mut max_index = 0usize;

        for (index, rgba) in frame.data.chunks_exact(CHANNELS).enumerate() {
            let brightness = luminance_of(rgba[0], rgba[1], rgba[2]);
            if brightness > max_brightness {
                max_brightness = brightness;
                max_index = index;
            }
        }

        Ok(ScanResult {
            brightness: max_brightness,
            coordinate: frame.coordinate_of(max_index),
        })
    }
}
