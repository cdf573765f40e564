// Terminal rendering of analysis outcomes: the brightest point, its value and the
// neighborhood mean, one block per file.

use lumen_spot::pipeline::{AnalysisObserver, ScanResult};
use lumen_spot::{AnalysisResult, LogObserver, PipelineError};
use std::path::Path;

/// Formats a finished analysis as a short, human-readable block.
pub fn format_result(path: &Path, result: &AnalysisResult) -> String {
    let mut lines = vec![
        format!("{}", path.display()),
        format!("  Maximum Brightness               {:.1}", result.max_brightness),
        format!("  Average Brightness (Radius)      {:.1}", result.radius_mean),
        format!(
            "  Location (X, Y)                  {}, {}",
            result.brightest_x, result.brightest_y
        ),
    ];
    if result.frames_scanned > 1 {
        lines.push(format!(
            "  Frame                            {} of {}",
            result.winning_frame_index + 1,
            result.frames_scanned
        ));
    }
    lines.join("\n")
}

pub fn format_failure(path: &Path, error: &PipelineError) -> String {
    format!("{}\n  Error: {}", path.display(), error)
}

/// Logs progress through `LogObserver` and prints results as they complete.
pub struct TerminalObserver {
    log: LogObserver,
}

impl TerminalObserver {
    pub fn new() -> Self {
        Self { log: LogObserver }
    }
}

impl Default for TerminalObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisObserver for TerminalObserver {
    fn on_started(&self, path: &Path) {
        self.log.on_started(path);
    }

    fn on_frame_scanned(&self, path: &Path, frame_index: usize, scan: &ScanResult) {
        self.log.on_frame_scanned(path, frame_index, scan);
    }

    fn on_completed(&self, path: &Path, result: &AnalysisResult) {
        println!("{}", format_result(path, result));
    }

    fn on_failed(&self, path: &Path, error: &PipelineError) {
        eprintln!("{}", format_failure(path, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_spot::core_modules::frame_sequence::FrameSequenceReducer;
    use lumen_spot::{AnalysisError, Frame};

    fn result_for(frames: usize) -> AnalysisResult {
        let mut data = vec![0u8; 4 * 4 * 4];
        data[(2 * 4 + 1) * 4..(2 * 4 + 1) * 4 + 3].copy_from_slice(&[255, 255, 255]);
        let frame = Frame::new(4, 4, data).expect("frame");
        FrameSequenceReducer::reduce(std::iter::repeat(frame).take(frames), 1).expect("reduce")
    }

    #[test]
    fn still_result_has_three_metrics() {
        let text = format_result(Path::new("a.png"), &result_for(1));
        assert!(text.starts_with("a.png"));
        assert!(text.contains("Maximum Brightness               255.0"));
        assert!(text.contains("Location (X, Y)                  1, 2"));
        assert!(!text.contains("Frame "));
    }

    #[test]
    fn video_result_names_the_frame() {
        let text = format_result(Path::new("clip.mp4"), &result_for(3));
        assert!(text.contains("1 of 3"));
    }

    #[test]
    fn failure_shows_the_message() {
        let error = PipelineError::Analysis(AnalysisError::NoFramesProcessed);
        let text = format_failure(Path::new("clip.mp4"), &error);
        assert_eq!(text, "clip.mp4\n  Error: no frames processed");
    }

    #[test]
    fn default_observer_accepts_every_event() {
        let observer: Box<dyn AnalysisObserver> = Box::new(TerminalObserver::default());
        let path = Path::new("clip.mp4");
        let result = result_for(2);
        observer.on_started(path);
        observer.on_completed(path, &result);
        observer.on_failed(path, &PipelineError::Analysis(AnalysisError::NoFramesProcessed));
    }
}
