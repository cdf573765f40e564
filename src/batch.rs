// THEORY:
// Batch mode analyzes many independent files at once. Each file is still one strictly
// sequential analysis call; only *different* files run side by side.
//
// Key principles:
// 1.  **Blocking work off the runtime**: Decoding and scanning are CPU and process
//     bound, so every call runs on tokio's blocking pool via `spawn_blocking`.
// 2.  **Bounded fan-out**: A `futures` stream with `buffered(limit)` keeps at most
//     `max_concurrency` calls in flight.
// 3.  **Stable order**: `buffered` yields results in input order, whatever order the
//     calls finish in.
// 4.  **Shared observer, no shared state**: The observer is behind an `Arc` and only
//     receives events.

use crate::config::AnalyzerConfig;
use crate::error::{PipelineError, Result};
use crate::pipeline::{AnalysisObserver, AnalysisResult, BrightnessPipeline};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub path: PathBuf,
    pub outcome: Result<AnalysisResult>,
}

/// Analyzes every path with at most `config.max_concurrency` running at once.
///
/// Fails up front only if the configuration is invalid; per-file failures are
/// reported in the returned items and to the observer.
pub async fn analyze_batch(
    paths: Vec<PathBuf>,
    config: AnalyzerConfig,
    observer: Arc<dyn AnalysisObserver>,
) -> Result<Vec<BatchItem>> {
    let limit = config.max_concurrency;
    let pipeline = Arc::new(BrightnessPipeline::new(config)?);
    log::debug!("batch of {} files, concurrency {}", paths.len(), limit);

    let items = stream::iter(paths)
        .map(|path| {
            let pipeline = Arc::clone(&pipeline);
            let observer = Arc::clone(&observer);
            async move {
                let task_path = path.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    pipeline.analyze_path(&task_path, observer.as_ref())
                })
                .await;
                let outcome = match joined {
                    Ok(outcome) => outcome,
                    Err(e) => Err(PipelineError::Join(e.to_string())),
                };
                BatchItem { path, outcome }
            }
        })
        .buffered(limit)
        .collect::<Vec<_>>()
        .await;

    Ok(items)
}
