use crate::core_modules::frame::Frame;
use crate::error::SourceError;
use std::path::Path;

/// Decodes a still image into a single RGBA frame.
pub fn decode_still(path: &Path) -> Result<Frame, SourceError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded {} ({}x{})", path.display(), width, height);
    Ok(Frame::new(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn decodes_png_into_rgba_frame() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("dot.png");

        let mut img = RgbaImage::from_pixel(5, 4, Rgba([0, 0, 0, 255]));
        img.put_pixel(3, 2, Rgba([250, 240, 230, 255]));
        img.save(&path).expect("write png");

        let frame = decode_still(&path).expect("decode");
        assert_eq!((frame.width, frame.height), (5, 4));
        assert_eq!(frame.data.len(), 5 * 4 * 4);
        let base = (2 * 5 + 3) * 4;
        assert_eq!(&frame.data[base..base + 4], &[250, 240, 230, 255]);
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = decode_still(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, SourceError::Image(_) | SourceError::Io(_)));
    }
}
