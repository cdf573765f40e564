// Helpers for getting frames back out of the engine as pictures: the raw winning
// frame as a PNG, or the same frame marked up the way the result view shows it, with
// a red ring around the brightest point and a crosshair through it.

pub mod image_helper {
    use crate::core_modules::frame::Frame;
    use crate::core_modules::frame_sequence::AnalysisResult;
    use crate::error::{AnalysisError, SourceError};
    use image::{ImageEncoder, Rgba, RgbaImage};
    use std::path::Path;

    /// Marker color, #ef4444.
    pub const MARKER_COLOR: Rgba<u8> = Rgba([0xef, 0x44, 0x44, 0xff]);
    /// Radius of the ring drawn around the brightest point.
    pub const RING_RADIUS: f64 = 10.0;
    /// Stroke width of the ring.
    pub const RING_STROKE: f64 = 2.0;
    /// Half-length of each crosshair arm.
    pub const CROSSHAIR_ARM: i64 = 15;

    pub fn save(path: &Path, width: u32, height: u32, buffer: &[u8]) -> Result<(), image::ImageError> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(buffer, width, height, image::ExtendedColorType::Rgba8)?;

        Ok(())
    }

    pub fn save_frame(path: &Path, frame: &Frame) -> Result<(), image::ImageError> {
        save(path, frame.width, frame.height, &frame.data)
    }

    /// Copy of the winning frame with the ring and crosshair drawn over it.
    pub fn annotate(result: &AnalysisResult) -> Result<RgbaImage, AnalysisError> {
        let frame = &result.frame;
        frame.validate()?;
        let mut canvas = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or(
            AnalysisError::InvalidFrame {
                width: frame.width,
                height: frame.height,
                expected: Frame::expected_len(frame.width, frame.height),
                actual: frame.data.len(),
            },
        )?;

        draw_ring(&mut canvas, result.brightest_x as i64, result.brightest_y as i64);
        draw_crosshair(&mut canvas, result.brightest_x as i64, result.brightest_y as i64);
        Ok(canvas)
    }

    pub fn save_annotated(path: &Path, result: &AnalysisResult) -> Result<(), SourceError> {
        let canvas = annotate(result)?;
        save(path, canvas.width(), canvas.height(), canvas.as_raw())?;
        Ok(())
    }

    fn put(canvas: &mut RgbaImage, x: i64, y: i64) {
        if x >= 0 && y >= 0 && x < canvas.width() as i64 && y < canvas.height() as i64 {
            canvas.put_pixel(x as u32, y as u32, MARKER_COLOR);
        }
    }

    fn draw_ring(canvas: &mut RgbaImage, cx: i64, cy: i64) {
        let reach = (RING_RADIUS + RING_STROKE).ceil() as i64;
        let half_stroke = RING_STROKE / 2.0;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let distance = ((dx * dx + dy * dy) as f64).sqrt();
                if (distance - RING_RADIUS).abs() <= half_stroke {
                    put(canvas, cx + dx, cy + dy);
                }
            }
        }
    }

    fn draw_crosshair(canvas: &mut RgbaImage, cx: i64, cy: i64) {
        for offset in -CROSSHAIR_ARM..=CROSSHAIR_ARM {
            put(canvas, cx + offset, cy);
            put(canvas, cx, cy + offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::image_helper::*;
    use crate::core_modules::frame::Frame;
    use crate::core_modules::frame_sequence::FrameSequenceReducer;

    fn dark_result(width: u32, height: u32, bright: (u32, u32)) -> crate::core_modules::frame_sequence::AnalysisResult {
        let mut data = vec![0u8; Frame::expected_len(width, height)];
        for alpha in data.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        let base = ((bright.1 * width + bright.0) * 4) as usize;
        data[base..base + 3].copy_from_slice(&[200, 200, 200]);
        let frame = Frame::new(width, height, data).expect("test frame");
        FrameSequenceReducer::reduce([frame], 10).expect("reduce")
    }

    #[test]
    fn save_white_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("white_file.png");
        let buffer = vec![255u8; 50 * 40 * 4];

        save(&path, 50, 40, &buffer).expect("Error Saving File.");

        let decoded = image::open(&path).expect("decode").to_rgba8();
        assert_eq!(decoded.dimensions(), (50, 40));
        assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn ring_and_crosshair_are_drawn_around_the_peak() {
        let result = dark_result(64, 48, (30, 20));
        let canvas = annotate(&result).expect("annotate");

        // Crosshair arms, including their tips.
        assert_eq!(*canvas.get_pixel(30, 20), MARKER_COLOR);
        assert_eq!(*canvas.get_pixel(45, 20), MARKER_COLOR);
        assert_eq!(*canvas.get_pixel(30, 5), MARKER_COLOR);
        // On the ring, off the crosshair.
        assert_eq!(*canvas.get_pixel(37, 27), MARKER_COLOR);
        // Inside the ring, off the crosshair: untouched.
        assert_eq!(canvas.get_pixel(33, 23).0, [0, 0, 0, 255]);
        // Beyond the arms: untouched.
        assert_eq!(canvas.get_pixel(46, 20).0, [0, 0, 0, 255]);
    }

    #[test]
    fn markers_are_clipped_at_the_frame_edge() {
        let result = dark_result(8, 8, (0, 0));
        let canvas = annotate(&result).expect("annotate");
        assert_eq!(canvas.dimensions(), (8, 8));
        assert_eq!(*canvas.get_pixel(7, 0), MARKER_COLOR);
    }

    #[test]
    fn annotation_leaves_the_result_frame_untouched() {
        let result = dark_result(32, 32, (16, 16));
        let before = result.frame.clone();
        let _ = annotate(&result).expect("annotate");
        assert_eq!(result.frame, before);
    }

    #[test]
    fn malformed_result_frame_is_rejected() {
        let mut result = dark_result(8, 8, (4, 4));
        result.frame.data.truncate(10);

        assert_eq!(
            annotate(&result).unwrap_err(),
            crate::error::AnalysisError::InvalidFrame {
                width: 8,
                height: 8,
                expected: 256,
                actual: 10,
            }
        );

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("malformed.png");
        assert!(matches!(
            save_annotated(&path, &result),
            Err(crate::error::SourceError::InvalidFrame(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn annotated_png_round_trips_dimensions() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("annotated.png");
        let result = dark_result(40, 30, (5, 25));

        save_annotated(&path, &result).expect("save");
        let decoded = image::open(&path).expect("decode").to_rgba8();
        assert_eq!(decoded.dimensions(), (40, 30));
        assert_eq!(*decoded.get_pixel(5, 25), MARKER_COLOR);
    }
}
