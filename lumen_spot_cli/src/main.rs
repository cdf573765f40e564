mod cli;
mod report;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use lumen_spot::batch::analyze_batch;
use lumen_spot::core_modules::utils::image_helper::image_helper;
use report::TerminalObserver;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // --- 1. Argument Parsing & Setup ---
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = cli.analyzer_config();
    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    // --- 2. Analysis ---
    let observer = Arc::new(TerminalObserver::new());
    let items = analyze_batch(cli.inputs.clone(), config, observer).await?;

    // --- 3. Annotated Output ---
    let mut failures = 0usize;
    for item in &items {
        match (&item.outcome, &cli.output_dir) {
            (Ok(result), Some(dir)) => {
                let target = annotated_path(dir, &item.path);
                image_helper::save_annotated(&target, result)
                    .with_context(|| format!("writing {}", target.display()))?;
                log::info!("wrote {}", target.display());
            }
            (Ok(_), None) => {}
            (Err(_), _) => failures += 1,
        }
    }

    if failures > 0 {
        log::warn!("{} of {} files failed", failures, items.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// `<dir>/<input file stem>.spot.png`
fn annotated_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    dir.join(format!("{stem}.spot.png"))
}
