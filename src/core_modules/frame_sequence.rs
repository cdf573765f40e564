// THEORY:
// The `FrameSequenceReducer` turns a stream of frames into a single verdict. A still
// image is a sequence of one; a video is whatever frames the sampler produced, in
// temporal order. The reducer does not know or care which.
//
// Key architectural principles:
// 1.  **Running best, first wins**: Each frame is scanned exactly once. It replaces
//     the running best only when its brightest pixel is *strictly* brighter, so the
//     first frame to reach the maximum keeps it. This mirrors the tie-break inside a
//     frame and depends on frames arriving in order.
// 2.  **Bounded memory**: Only the current winner is retained. Losing frames are
//     dropped as soon as they are scanned.
// 3.  **Deferred neighborhood**: The neighborhood mean is only computed once, for the
//     winner, after the sequence is exhausted.
// 4.  **Incremental or whole**: `push`/`finish` lets a caller feed frames as they are
//     decoded; `reduce` is the same thing over any `IntoIterator`.

use crate::core_modules::frame::Frame;
use crate::core_modules::luminance_scanner::{LUMINANCE_SENTINEL, LuminanceScanner, ScanResult};
use crate::core_modules::neighborhood::NeighborhoodAverager;
use crate::core_modules::pixel::pixel::Luminance;
use crate::error::AnalysisError;
use log::trace;

/// The final verdict for one analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// The single frame judged brightest.
    pub frame: Frame,
    /// Luminance of the brightest pixel.
    pub max_brightness: Luminance,
    /// Mean luminance of the clipped window around the brightest pixel.
    pub radius_mean: Luminance,
    pub brightest_x: u32,
    pub brightest_y: u32,
    /// How many frames of the sequence were scanned.
    pub frames_scanned: usize,
    /// Zero-based position of the winning frame within the sequence.
    pub winning_frame_index: usize,
}

struct BestFrame {
    frame: Frame,
    scan: ScanResult,
    index: usize,
}

/// Reduces a temporally ordered frame sequence to its brightest frame.
pub struct FrameSequenceReducer {
    radius: u32,
    max_brightness: Luminance,
    best: Option<BestFrame>,
    frames_scanned: usize,
}

impl FrameSequenceReducer {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            max_brightness: LUMINANCE_SENTINEL,
            best: None,
            frames_scanned: 0,
        }
    }

    /// Scans the next frame of the sequence and keeps it only if it is the new best.
    pub fn push(&mut self, frame: Frame) -> Result<ScanResult, AnalysisError> {
        let scan = LuminanceScanner::scan(&frame)?;
        let index = self.frames_scanned;
        self.frames_scanned += 1;

        trace!(
            "frame {}: max {:.3} at ({}, {})",
            index, scan.brightness, scan.coordinate.x, scan.coordinate.y
        );

        if scan.brightness > self.max_brightness {
            self.max_brightness = scan.brightness;
            self.best = Some(BestFrame { frame, scan, index });
        }
        Ok(scan)
    }

    pub fn frames_scanned(&self) -> usize {
        self.frames_scanned
    }

    /// Brightness of the current winner, if any frame has been scanned.
    pub fn current_best(&self) -> Option<Luminance> {
        self.best.as_ref().map(|best| best.scan.brightness)
    }

    /// Ends the sequence: measures the winner's neighborhood and assembles the result.
    pub fn finish(self) -> Result<AnalysisResult, AnalysisError> {
        let frames_scanned = self.frames_scanned;
        let BestFrame { frame, scan, index } = self.best.ok_or(AnalysisError::NoFramesProcessed)?;

        let radius_mean =
            NeighborhoodAverager::mean_around(&frame, scan.coordinate.x, scan.coordinate.y, self.radius)?;

        Ok(AnalysisResult {
            frame,
            max_brightness: scan.brightness,
            radius_mean,
            brightest_x: scan.coordinate.x,
            brightest_y: scan.coordinate.y,
            frames_scanned,
            winning_frame_index: index,
        })
    }

    /// Reduces a whole sequence in one call.
    pub fn reduce<I>(frames: I, radius: u32) -> Result<AnalysisResult, AnalysisError>
    where
        I: IntoIterator<Item = Frame>,
    {
        Self::reduce_with(frames, radius, |_, _| {})
    }

    /// Like `reduce`, reporting every frame's scan to `on_scanned` as it happens.
    pub fn reduce_with<I, F>(frames: I, radius: u32, mut on_scanned: F) -> Result<AnalysisResult, AnalysisError>
    where
        I: IntoIterator<Item = Frame>,
        F: FnMut(usize, &ScanResult),
    {
        let mut reducer = Self::new(radius);
        for frame in frames {
            let scan = reducer.push(frame)?;
            on_scanned(reducer.frames_scanned() - 1, &scan);
        }
        reducer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::neighborhood::DEFAULT_RADIUS;

    /// A 4x4 frame whose only non-black pixel is a gray of `level` at (x, y).
    fn frame_with_peak(level: u8, x: u32, y: u32) -> Frame {
        let mut data = vec![0u8; Frame::expected_len(4, 4)];
        let base = ((y * 4 + x) * 4) as usize;
        data[base..base + 3].copy_from_slice(&[level, level, level]);
        Frame::new(4, 4, data).expect("test frame")
    }

    #[test]
    fn first_frame_reaching_the_max_wins() {
        let frames = vec![
            frame_with_peak(10, 0, 0),
            frame_with_peak(50, 1, 1),
            frame_with_peak(50, 2, 2),
            frame_with_peak(30, 3, 3),
        ];
        let result = FrameSequenceReducer::reduce(frames, DEFAULT_RADIUS).expect("reduce");

        assert_eq!(result.winning_frame_index, 1);
        assert_eq!((result.brightest_x, result.brightest_y), (1, 1));
        assert!((result.max_brightness - 50.0).abs() < 1e-9);
        assert_eq!(result.frames_scanned, 4);
    }

    #[test]
    fn single_frame_sequence_is_a_still_image() {
        let mut data = vec![0u8; Frame::expected_len(3, 3)];
        let base = (1 * 3 + 2) * 4;
        data[base..base + 3].copy_from_slice(&[255, 255, 255]);
        let frame = Frame::new(3, 3, data).expect("test frame");

        let result = FrameSequenceReducer::reduce([frame.clone()], 1).expect("reduce");
        assert_eq!(result.frame, frame);
        assert_eq!((result.brightest_x, result.brightest_y), (2, 1));
        assert!((result.max_brightness - 255.0).abs() < 1e-6);
        assert!((result.radius_mean - 42.5).abs() < 1e-3);
    }

    #[test]
    fn empty_sequence_processes_no_frames() {
        let result = FrameSequenceReducer::reduce(Vec::<Frame>::new(), DEFAULT_RADIUS);
        assert_eq!(result, Err(AnalysisError::NoFramesProcessed));
    }

    #[test]
    fn all_black_sequence_keeps_the_first_frame() {
        let frames = (0..3).map(|_| frame_with_peak(0, 3, 3));
        let result = FrameSequenceReducer::reduce(frames, DEFAULT_RADIUS).expect("reduce");
        assert_eq!(result.winning_frame_index, 0);
        assert_eq!(result.max_brightness, 0.0);
        assert_eq!((result.brightest_x, result.brightest_y), (0, 0));
    }

    #[test]
    fn empty_frame_aborts_the_reduction() {
        let frames = vec![frame_with_peak(10, 0, 0), Frame::new(0, 0, Vec::new()).expect("empty")];
        assert_eq!(
            FrameSequenceReducer::reduce(frames, DEFAULT_RADIUS),
            Err(AnalysisError::NoPixels)
        );
    }

    #[test]
    fn reports_every_scan_in_order() {
        let levels = [5u8, 90, 40];
        let frames = levels.iter().map(|&level| frame_with_peak(level, 0, 0));
        let mut seen = Vec::new();
        FrameSequenceReducer::reduce_with(frames, DEFAULT_RADIUS, |index, scan| {
            seen.push((index, scan.brightness.round() as u8));
        })
        .expect("reduce");
        assert_eq!(seen, vec![(0, 5), (1, 90), (2, 40)]);
    }

    #[test]
    fn incremental_pushes_match_whole_reduction() {
        let mut reducer = FrameSequenceReducer::new(DEFAULT_RADIUS);
        assert_eq!(reducer.current_best(), None);

        reducer.push(frame_with_peak(20, 1, 0)).expect("push");
        reducer.push(frame_with_peak(70, 2, 3)).expect("push");
        assert_eq!(reducer.frames_scanned(), 2);
        assert!((reducer.current_best().expect("best") - 70.0).abs() < 1e-9);

        let result = reducer.finish().expect("finish");
        assert_eq!(result.winning_frame_index, 1);
        assert_eq!((result.brightest_x, result.brightest_y), (2, 3));
    }
}
