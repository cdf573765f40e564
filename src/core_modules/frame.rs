// THEORY:
// A `Frame` is one decoded raster image: a still picture, or one instant of a video.
// It is the only shape the analysis core understands. Decoders on the boundary
// produce it once and nothing downstream mutates it.
//
// The buffer is row-major, 4 bytes per pixel (R, G, B, A). The invariant
// `data.len() == width * height * 4` is checked by `Frame::new`, and re-checked by
// `validate` because the fields are public and a frame can be built literally.

use crate::core_modules::pixel::pixel::{CHANNELS, Luminance, Pixel};
use crate::error::AnalysisError;

/// A pixel position inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One decoded RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The width of the frame in pixels.
    pub width: u32,
    /// The height of the frame in pixels.
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Frame {
    /// Wraps a decoded buffer, rejecting any length that disagrees with the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AnalysisError> {
        let frame = Self {
            width,
            height,
            data,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Number of bytes a buffer of these dimensions must hold.
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * CHANNELS
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let expected = Self::expected_len(self.width, self.height);
        if self.data.len() != expected {
            return Err(AnalysisError::InvalidFrame {
                width: self.width,
                height: self.height,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// The pixel at (x, y). The caller guarantees the position is in bounds.
    #[inline]
    pub fn pixel_at(&self, x: u32, y: u32) -> Pixel {
        let base = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Pixel::new(
            self.data[base],
            self.data[base + 1],
            self.data[base + 2],
            self.data[base + 3],
        )
    }

    #[inline]
    pub fn luminance_at(&self, x: u32, y: u32) -> Luminance {
        self.pixel_at(x, y).luminance()
    }

    /// Converts a row-major pixel index to its coordinate.
    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        let width = self.width as usize;
        Coordinate::new((index % width) as u32, (index / width) as u32)
    }
}
