// THEORY:
// The `pipeline` module is the top-level API of the engine. It wires one frame source
// to the reducer for a single file and hands back an `AnalysisResult`.
//
// Everything an application wants to show about an analysis in progress (a spinner,
// per-file status, the final numbers) flows out through an `AnalysisObserver`. The
// observer only receives events; it shares no mutable state with the analysis, so
// any number of calls can report to the same observer concurrently.

use crate::config::AnalyzerConfig;
use crate::core_modules::frame::Frame;
use crate::core_modules::frame_sequence::FrameSequenceReducer;
use crate::error::{PipelineError, Result};
use crate::sources::{self, FrameSource};
use log::{debug, info, warn};
use std::path::Path;

// Re-export key data structures for the public API.
pub use crate::core_modules::frame_sequence::AnalysisResult;
pub use crate::core_modules::luminance_scanner::ScanResult;

/// Receives progress and outcome events for analysis calls.
pub trait AnalysisObserver: Send + Sync {
    fn on_started(&self, _path: &Path) {}

    fn on_frame_scanned(&self, _path: &Path, _frame_index: usize, _scan: &ScanResult) {}

    fn on_completed(&self, _path: &Path, _result: &AnalysisResult) {}

    fn on_failed(&self, _path: &Path, _error: &PipelineError) {}
}

/// Observer that ignores every event.
pub struct NullObserver;

impl AnalysisObserver for NullObserver {}

/// Observer that reports through the `log` facade.
pub struct LogObserver;

impl AnalysisObserver for LogObserver {
    fn on_started(&self, path: &Path) {
        info!("analyzing {}", path.display());
    }

    fn on_frame_scanned(&self, path: &Path, frame_index: usize, scan: &ScanResult) {
        debug!(
            "{} frame {}: {:.1} at ({}, {})",
            path.display(),
            frame_index,
            scan.brightness,
            scan.coordinate.x,
            scan.coordinate.y
        );
    }

    fn on_completed(&self, path: &Path, result: &AnalysisResult) {
        info!(
            "{}: max {:.1} at ({}, {}), radius mean {:.1}, frame {} of {}",
            path.display(),
            result.max_brightness,
            result.brightest_x,
            result.brightest_y,
            result.radius_mean,
            result.winning_frame_index + 1,
            result.frames_scanned
        );
    }

    fn on_failed(&self, path: &Path, error: &PipelineError) {
        warn!("{}: {}", path.display(), error);
    }
}

/// The main, top-level struct for the analysis engine.
pub struct BrightnessPipeline {
    config: AnalyzerConfig,
}

impl BrightnessPipeline {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Reduces an already decoded frame sequence.
    pub fn analyze_frames<I>(&self, frames: I) -> Result<AnalysisResult>
    where
        I: IntoIterator<Item = Frame>,
    {
        Ok(FrameSequenceReducer::reduce(frames, self.config.radius)?)
    }

    /// Decodes or samples `path` and analyzes it, reporting to `observer`.
    pub fn analyze_path(&self, path: &Path, observer: &dyn AnalysisObserver) -> Result<AnalysisResult> {
        observer.on_started(path);
        let outcome = self.run(path, observer);
        match &outcome {
            Ok(result) => observer.on_completed(path, result),
            Err(error) => observer.on_failed(path, error),
        }
        outcome
    }

    fn run(&self, path: &Path, observer: &dyn AnalysisObserver) -> Result<AnalysisResult> {
        let frames = sources::open_frames(path, &self.config)?;
        self.reduce_source(path, frames, observer)
    }

    /// A source that produced nothing and failed reports its own error, not
    /// `NoFramesProcessed`. A failure after some frames is logged and the result kept.
    fn reduce_source<S: FrameSource>(
        &self,
        path: &Path,
        mut frames: S,
        observer: &dyn AnalysisObserver,
    ) -> Result<AnalysisResult> {
        let mut reducer = FrameSequenceReducer::new(self.config.radius);
        for frame in frames.by_ref() {
            let scan = reducer.push(frame)?;
            observer.on_frame_scanned(path, reducer.frames_scanned() - 1, &scan);
        }

        if let Some(error) = frames.failure() {
            if reducer.frames_scanned() == 0 {
                return Err(error.into());
            }
            warn!(
                "{}: source failed after {} frames: {}",
                path.display(),
                reducer.frames_scanned(),
                error
            );
        }
        Ok(reducer.finish()?)
    }
}
