// THEORY:
// The `NeighborhoodAverager` summarizes the region around a point of interest with a
// single number: the mean luminance of a square window centered on it.
//
// The window spans `radius` pixels in every direction, so it holds (2r + 1)^2
// candidates (441 for the default radius of 10). Candidates that fall outside the
// frame are skipped, not padded or mirrored. Near an edge the effective window is
// therefore smaller and lopsided, and the mean is taken over only the pixels that
// were actually summed.

use crate::core_modules::frame::Frame;
use crate::core_modules::pixel::pixel::Luminance;
use crate::error::AnalysisError;
use std::ops::RangeInclusive;

/// Radius used when the caller does not choose one.
pub const DEFAULT_RADIUS: u32 = 10;

pub struct NeighborhoodAverager;

impl NeighborhoodAverager {
    /// Mean luminance of the window of `radius` around (x, y), clipped to the frame.
    ///
    /// (x, y) is expected to lie inside the frame. A center far enough outside that no
    /// candidate survives clipping fails with `DegenerateWindow` rather than NaN.
    pub fn mean_around(frame: &Frame, x: u32, y: u32, radius: u32) -> Result<Luminance, AnalysisError> {
        frame.validate()?;

        let degenerate = AnalysisError::DegenerateWindow { x, y, radius };
        let columns = clipped_span(x, radius, frame.width).ok_or(degenerate.clone())?;
        let rows = clipped_span(y, radius, frame.height).ok_or(degenerate)?;

        let mut sum: Luminance = 0.0;
        for py in rows.clone() {
            for px in columns.clone() {
                sum += frame.luminance_at(px, py);
            }
        }

        let count = columns.count() as u64 * rows.count() as u64;
        Ok(sum / count as Luminance)
    }

    /// How many in-bounds pixels the clipped window around (x, y) contains.
    pub fn window_len(frame: &Frame, x: u32, y: u32, radius: u32) -> u64 {
        let span = |center: u32, limit: u32| {
            clipped_span(center, radius, limit).map_or(0, |range| range.count() as u64)
        };
        span(x, frame.width) * span(y, frame.height)
    }
}

/// The in-bounds part of `center - radius ..= center + radius` along an axis of
/// `limit` pixels, or `None` when nothing is left.
fn clipped_span(center: u32, radius: u32, limit: u32) -> Option<RangeInclusive<u32>> {
    let low = center.saturating_sub(radius);
    let high = center.saturating_add(radius).min(limit.checked_sub(1)?);
    (low <= high).then_some(low..=high)
}
