// Command-line argument definitions and their translation into an `AnalyzerConfig`.

use clap::Parser;
use lumen_spot::sources::MediaKind;
use lumen_spot::{AnalyzerConfig, SamplingCadence};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Finds the brightest point in images and videos",
    long_about = "Scans every pixel of a still image, or of frames sampled from a video, \
                  reports the brightest point, its luminance and the mean luminance around it, \
                  and can write the winning frame out with the point marked."
)]
pub struct Cli {
    /// Image or video files to analyze
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Radius in pixels of the neighborhood averaged around the brightest point
    #[arg(short, long, default_value_t = 10)]
    pub radius: u32,

    /// Seconds between sampled video frames
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        env = "LUMEN_SPOT_INTERVAL",
        conflicts_with = "every_frame"
    )]
    pub interval: Option<f64>,

    /// Scan every decoded video frame instead of sampling at an interval
    #[arg(long)]
    pub every_frame: bool,

    /// Treat every input as a still image or as a video, skipping extension detection
    #[arg(long, value_name = "KIND", value_parser = parse_media_kind)]
    pub media: Option<MediaKind>,

    /// Number of files analyzed at the same time (default: number of CPU cores)
    #[arg(short, long, env = "LUMEN_SPOT_JOBS")]
    pub jobs: Option<usize>,

    /// Directory to write each winning frame to, annotated, as <name>.spot.png
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable detailed logging output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_media_kind(value: &str) -> Result<MediaKind, String> {
    match value.to_ascii_lowercase().as_str() {
        "image" | "still" => Ok(MediaKind::Still),
        "video" => Ok(MediaKind::Video),
        other => Err(format!("unknown media kind '{other}', expected 'image' or 'video'")),
    }
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        let defaults = AnalyzerConfig::default();
        let cadence = if self.every_frame {
            SamplingCadence::EveryFrame
        } else {
            match self.interval {
                Some(interval_secs) => SamplingCadence::FixedInterval { interval_secs },
                None => defaults.cadence,
            }
        };
        AnalyzerConfig {
            radius: self.radius,
            cadence,
            max_concurrency: self.jobs.unwrap_or(defaults.max_concurrency),
            media_override: self.media,
        }
    }
}
