//! Near-duplicate filtering.
//!
//! Greedy single-pass policy: the first frame is always retained, every
//! later frame is compared against the most recently *retained* frame, and
//! the baseline only advances on retain. A slow fade therefore collapses to
//! one frame, while any dissimilar frame resets the baseline immediately.

use log::debug;

use crate::analysis::classifier::{is_similar, DEFAULT_SIMILARITY_THRESHOLD};
use crate::analysis::difference::frame_difference;
use crate::error::ExtractError;
use crate::frame::FrameBuffer;

/// A frame paired with its source timestamp.
#[derive(Debug, Clone)]
pub struct TimedFrame {
    pub buffer: FrameBuffer,
    pub timestamp: f64,
}

/// Streaming duplicate filter holding the last retained frame as baseline.
pub struct DuplicateFilter {
    threshold: f64,
    baseline: Option<FrameBuffer>,
}

impl DuplicateFilter {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SIMILARITY_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            baseline: None,
        }
    }

    /// Decides whether `frame` should be kept. On keep, `frame` becomes the
    /// new comparison baseline. The first frame is kept unconditionally.
    pub fn check(&mut self, frame: &FrameBuffer) -> Result<bool, ExtractError> {
        let keep = match &self.baseline {
            None => true,
            Some(baseline) => {
                let score = frame_difference(baseline, frame)?;
                !is_similar(score, self.threshold)
            }
        };

        if keep {
            self.baseline = Some(frame.clone());
        }
        Ok(keep)
    }

    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

impl Default for DuplicateFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Filters an ordered frame sequence, dropping entries too similar to the
/// most recently retained one.
pub fn filter_duplicates(
    frames: Vec<TimedFrame>,
    similarity_threshold: f64,
) -> Result<Vec<TimedFrame>, ExtractError> {
    if frames.len() <= 1 {
        return Ok(frames);
    }

    let total = frames.len();
    let mut filter = DuplicateFilter::with_threshold(similarity_threshold);
    let mut unique = Vec::with_capacity(total);

    for frame in frames {
        if filter.check(&frame.buffer)? {
            unique.push(frame);
        } else {
            debug!("skipping similar frame at {:.2}s", frame.timestamp);
        }
    }

    debug!("filtered {} duplicate frames", total - unique.len());
    Ok(unique)
}
