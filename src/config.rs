// THEORY:
// `AnalyzerConfig` gathers every tunable of an analysis call in one plain struct, the
// same way the pipeline is configured everywhere else in the engine: public fields,
// sensible defaults, and a `validate` pass before anything runs.
//
// How a video is sampled is deliberately a parameter, not a policy baked into the
// core. A fixed time step (the default, one frame every 0.1 s) and "every decoded
// frame" are both supported.

use crate::core_modules::neighborhood::DEFAULT_RADIUS;
use crate::error::PipelineError;
use crate::sources::MediaKind;

/// Default spacing between sampled video frames, in seconds.
pub const DEFAULT_SAMPLE_INTERVAL_SECS: f64 = 0.1;

/// How a video is turned into a frame sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingCadence {
    /// One frame every `interval_secs` seconds of presentation time, starting at 0.
    FixedInterval { interval_secs: f64 },
    /// Every frame the decoder produces.
    EveryFrame,
}

impl Default for SamplingCadence {
    fn default() -> Self {
        SamplingCadence::FixedInterval {
            interval_secs: DEFAULT_SAMPLE_INTERVAL_SECS,
        }
    }
}

/// Configuration for an analysis call or a batch of them.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Radius, in pixels, of the neighborhood averaged around the brightest point.
    pub radius: u32,
    /// Video sampling cadence. Ignored for still images.
    pub cadence: SamplingCadence,
    /// Upper bound on files analyzed at the same time in batch mode.
    pub max_concurrency: usize,
    /// Forces the media kind instead of detecting it from the file extension.
    pub media_override: Option<MediaKind>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            cadence: SamplingCadence::default(),
            max_concurrency: num_cpus::get().max(1),
            media_override: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if let SamplingCadence::FixedInterval { interval_secs } = self.cadence
            && (!interval_secs.is_finite() || interval_secs <= 0.0)
        {
            return Err(PipelineError::InvalidConfig(format!(
                "sample interval must be a positive number of seconds, got {interval_secs}"
            )));
        }
        if self.max_concurrency == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.radius, 10);
        assert_eq!(
            config.cadence,
            SamplingCadence::FixedInterval { interval_secs: 0.1 }
        );
        assert!(config.max_concurrency >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_interval() {
        for interval_secs in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = AnalyzerConfig {
                cadence: SamplingCadence::FixedInterval { interval_secs },
                ..AnalyzerConfig::default()
            };
            assert!(matches!(config.validate(), Err(PipelineError::InvalidConfig(_))));
        }
    }

    #[test]
    fn rejects_zero_concurrency() {
        let config = AnalyzerConfig {
            max_concurrency: 0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn every_frame_needs_no_interval() {
        let config = AnalyzerConfig {
            cadence: SamplingCadence::EveryFrame,
            radius: 0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
