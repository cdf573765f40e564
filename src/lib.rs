// THEORY:
// This file is the main entry point for the `lumen_spot` library crate.
//
// The engine answers one question about a picture or a clip: where is its brightest
// point, how bright is it, and how bright is the area around it? The answer is an
// `AnalysisResult` that also carries the winning frame, ready to be drawn.
//
// Layers, from the bottom up:
// - `core_modules`: the pure analysis core (pixel luminance, per-frame scan,
//   neighborhood mean, frame-sequence reduction) plus image output helpers.
// - `sources`: turns image and video files into frame sequences.
// - `pipeline`: one file in, one result out, with an observer for progress.
// - `batch`: many files at once with bounded concurrency.

pub mod batch;
pub mod config;
pub mod core_modules;
pub mod error;
pub mod pipeline;
pub mod sources;

pub use config::{AnalyzerConfig, SamplingCadence};
pub use core_modules::frame::{Coordinate, Frame};
pub use error::{AnalysisError, PipelineError, SourceError};
pub use pipeline::{AnalysisObserver, AnalysisResult, BrightnessPipeline, LogObserver};
