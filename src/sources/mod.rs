// THEORY:
// The `sources` layer is the boundary between files on disk and the analysis core.
// Its only job is to turn a path into a lazily produced, temporally ordered sequence
// of `Frame`s. The core never sees a decoder, a process or a file handle.
//
// - Still images are decoded in one go with the `image` crate: a sequence of one.
// - Videos are sampled by an `ffmpeg` child process, one frame per event, so a long
//   clip is never fully decoded into memory and a caller can stop pulling at any time.
//
// Which kind a file is gets decided from its extension, unless the configuration
// forces one.

pub mod still;
pub mod video;

use crate::config::AnalyzerConfig;
use crate::core_modules::frame::Frame;
use crate::error::SourceError;
use std::path::Path;

pub use video::{SampledFrames, VideoFrames};

/// The two kinds of media the engine can analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Still,
    Video,
}

impl MediaKind {
    /// Still when the `image` crate recognizes the extension, video otherwise.
    pub fn detect(path: &Path) -> Self {
        if image::ImageFormat::from_path(path).is_ok() {
            MediaKind::Still
        } else {
            MediaKind::Video
        }
    }
}

/// A lazily produced frame sequence from either kind of media.
pub enum MediaFrames {
    Still(std::option::IntoIter<Frame>),
    Video(VideoFrames),
}

impl Iterator for MediaFrames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        match self {
            MediaFrames::Still(frames) => frames.next(),
            MediaFrames::Video(frames) => frames.next(),
        }
    }
}

/// A frame sequence that can explain why it ended.
pub trait FrameSource: Iterator<Item = Frame> {
    /// The reason the source stopped early, asked once the sequence is exhausted.
    fn failure(&mut self) -> Option<SourceError> {
        None
    }
}

impl FrameSource for MediaFrames {
    fn failure(&mut self) -> Option<SourceError> {
        match self {
            MediaFrames::Still(_) => None,
            MediaFrames::Video(frames) => frames.failure(),
        }
    }
}

impl FrameSource for VideoFrames {
    fn failure(&mut self) -> Option<SourceError> {
        VideoFrames::failure(self)
    }
}

impl<I> FrameSource for SampledFrames<I>
where
    I: Iterator<Item = ffmpeg_sidecar::event::FfmpegEvent>,
{
    fn failure(&mut self) -> Option<SourceError> {
        self.take_error()
    }
}

/// Opens `path` as a frame sequence according to `config`.
pub fn open_frames(path: &Path, config: &AnalyzerConfig) -> Result<MediaFrames, SourceError> {
    let kind = config.media_override.unwrap_or_else(|| MediaKind::detect(path));
    log::debug!("opening {} as {:?}", path.display(), kind);
    match kind {
        MediaKind::Still => {
            let frame = still::decode_still(path)?;
            Ok(MediaFrames::Still(Some(frame).into_iter()))
        }
        MediaKind::Video => Ok(MediaFrames::Video(VideoFrames::spawn(path, config.cadence)?)),
    }
}
