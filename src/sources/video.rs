// THEORY:
// Video sampling is delegated to an `ffmpeg` child process, driven through
// `ffmpeg-sidecar`. ffmpeg decodes the container, applies the sampling cadence with
// its `fps` filter, converts every sampled frame to packed RGBA and streams the raw
// bytes to stdout. `ffmpeg-sidecar` parses that stream back into frame events, which
// `VideoFrames` hands out one at a time as an ordinary iterator.
//
// ffmpeg error lines are logged and do not end the sequence, but the last one is kept.
// When a clip yields no frames at all, `failure` reports that error (or a failing
// exit status) so the caller sees the decoder's reason instead of an empty sequence.
// Dropping the iterator kills the child, so a caller aborts an analysis by simply not
// pulling any more frames.

use crate::config::SamplingCadence;
use crate::core_modules::frame::Frame;
use crate::error::SourceError;
use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel, OutputVideoFrame};
use ffmpeg_sidecar::iter::FfmpegIterator;
use log::{debug, warn};
use std::path::Path;

/// The `-vf` filter implementing a cadence, if it needs one.
pub fn cadence_filter(cadence: SamplingCadence) -> Option<String> {
    match cadence {
        SamplingCadence::FixedInterval { interval_secs } => Some(format!("fps=fps={}", 1.0 / interval_secs)),
        SamplingCadence::EveryFrame => None,
    }
}

/// Output arguments placed after the input: cadence filter, then raw RGBA on stdout.
pub fn output_args(cadence: SamplingCadence) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(filter) = cadence_filter(cadence) {
        args.push("-vf".to_string());
        args.push(filter);
    }
    args.extend(["-an", "-sn", "-f", "rawvideo", "-pix_fmt", "rgba", "-"].map(String::from));
    args
}

/// Frames carried by a stream of ffmpeg events.
///
/// Output frames whose buffer disagrees with their dimensions are skipped. ffmpeg error
/// lines and skipped frames are remembered, so that a stream which ends without a
/// single frame can say why.
pub struct SampledFrames<I> {
    events: I,
    frames_produced: usize,
    last_error: Option<SourceError>,
}

impl<I> SampledFrames<I>
where
    I: Iterator<Item = FfmpegEvent>,
{
    pub fn new(events: I) -> Self {
        Self {
            events,
            frames_produced: 0,
            last_error: None,
        }
    }

    pub fn frames_produced(&self) -> usize {
        self.frames_produced
    }

    /// The most recent decoder failure seen so far, if any.
    pub fn take_error(&mut self) -> Option<SourceError> {
        self.last_error.take()
    }
}

impl<I> Iterator for SampledFrames<I>
where
    I: Iterator<Item = FfmpegEvent>,
{
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        for event in self.events.by_ref() {
            match event {
                FfmpegEvent::OutputFrame(OutputVideoFrame {
                    width,
                    height,
                    data,
                    frame_num,
                    timestamp,
                    ..
                }) => match Frame::new(width, height, data) {
                    Ok(frame) => {
                        debug!("sampled frame {} at {:.3}s", frame_num, timestamp);
                        self.frames_produced += 1;
                        return Some(frame);
                    }
                    Err(err) => {
                        warn!("skipping frame {}: {}", frame_num, err);
                        self.last_error = Some(SourceError::InvalidFrame(err));
                    }
                },
                FfmpegEvent::Error(line) | FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) => {
                    warn!("ffmpeg: {}", line);
                    self.last_error = Some(SourceError::Ffmpeg(line));
                }
                _ => {}
            }
        }
        None
    }
}

/// Frames sampled from a running ffmpeg process, in presentation order.
pub struct VideoFrames {
    child: FfmpegChild,
    frames: SampledFrames<FfmpegIterator>,
}

impl VideoFrames {
    pub fn spawn(path: &Path, cadence: SamplingCadence) -> Result<Self, SourceError> {
        let mut command = FfmpegCommand::new();
        command.input(path);
        command.args(output_args(cadence));

        debug!("sampling {} with {:?}", path.display(), cadence);

        let mut child = command.spawn()?;
        let events = child
            .iter()
            .map_err(|e| SourceError::Ffmpeg(e.to_string()))?;

        Ok(Self {
            child,
            frames: SampledFrames::new(events),
        })
    }

    /// Why the stream ended, once it has: the last ffmpeg error, else a failing exit
    /// status. `None` when ffmpeg finished cleanly.
    pub fn failure(&mut self) -> Option<SourceError> {
        if let Some(err) = self.frames.take_error() {
            return Some(err);
        }
        match self.child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => Some(SourceError::Ffmpeg(format!("ffmpeg exited with {status}"))),
            Err(err) => Some(SourceError::Io(err)),
        }
    }
}

impl Iterator for VideoFrames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.frames.next()
    }
}

impl Drop for VideoFrames {
    fn drop(&mut self) {
        // The child may already have exited.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
