//! Smart timestamp detection.
//!
//! Walks the whole video on a coarse grid, comparing each grid sample
//! against the immediately preceding one, and collects the timestamps where
//! a scene change or significant movement shows up. Windowing to the
//! requested extraction range is the caller's post-step.

use log::{debug, warn};

use crate::analysis::classifier::{has_movement, is_scene_change, movement_threshold};
use crate::analysis::difference::frame_difference;
use crate::error::ExtractError;
use crate::frame::{FrameBuffer, ANALYSIS_HEIGHT, ANALYSIS_WIDTH};
use crate::source::FrameRenderer;

/// Coarse scan step in seconds.
pub const DEFAULT_GRID_STEP: f64 = 0.5;

/// Default minimum spacing between captured timestamps.
pub const DEFAULT_MIN_INTERVAL: f64 = 1.0;

/// The final timestamp is pulled this far in from the end so the tail frame
/// is still decodable.
const TAIL_MARGIN: f64 = 0.1;

/// Scan state threaded through [`SceneDetector::step`].
///
/// `prev_frame` is the comparison baseline and advances on every grid
/// sample, captured or not; `last_capture` only moves when a timestamp is
/// actually taken. Keeping the two apart is what lets slow drift stay
/// visible between captures.
#[derive(Debug, Clone, Default)]
pub struct DetectorState {
    prev_frame: Option<FrameBuffer>,
    last_capture: f64,
}

pub struct SceneDetector {
    grid_step: f64,
    min_interval: f64,
    scene_threshold: f64,
}

impl SceneDetector {
    pub fn new(min_interval: f64, scene_threshold: f64) -> Self {
        Self {
            grid_step: DEFAULT_GRID_STEP,
            min_interval,
            scene_threshold,
        }
    }

    pub fn with_grid_step(mut self, grid_step: f64) -> Self {
        self.grid_step = grid_step;
        self
    }

    /// One grid sample: decides whether `time` is worth capturing and
    /// returns the advanced state.
    ///
    /// The first sample never captures (no baseline to compare against).
    pub fn step(
        &self,
        state: DetectorState,
        time: f64,
        frame: FrameBuffer,
    ) -> Result<(bool, DetectorState), ExtractError> {
        let captured = match &state.prev_frame {
            None => false,
            Some(prev) => {
                let score = frame_difference(prev, &frame)?;
                let interesting = is_scene_change(score, self.scene_threshold)
                    || has_movement(score, movement_threshold(self.scene_threshold));
                interesting && time - state.last_capture >= self.min_interval
            }
        };

        let next = DetectorState {
            prev_frame: Some(frame),
            last_capture: if captured { time } else { state.last_capture },
        };
        Ok((captured, next))
    }

    /// Scans the full video and returns candidate timestamps: always starts
    /// at `0.0` and covers the tail with `duration - 0.1` (clamped to zero
    /// for near-empty videos).
    pub fn detect<R: FrameRenderer>(&self, renderer: &mut R) -> Result<Vec<f64>, ExtractError> {
        let duration = renderer.info().duration;
        debug!(
            "scene scan: duration={duration:.2}s step={:.2}s min_interval={:.2}s threshold={}",
            self.grid_step, self.min_interval, self.scene_threshold
        );

        let mut timestamps = vec![0.0];
        let mut state = DetectorState::default();

        let mut time = self.grid_step;
        while time < duration {
            match renderer.render_scaled(time, ANALYSIS_WIDTH, ANALYSIS_HEIGHT) {
                Ok(frame) => {
                    let (captured, next) = self.step(state, time, frame)?;
                    if captured {
                        debug!("interesting frame at {time:.2}s");
                        timestamps.push(time);
                    }
                    state = next;
                }
                Err(err) if err.is_recoverable() => {
                    // baseline keeps its previous value for this step
                    warn!("scene scan skipping t={time:.2}s: {err}");
                }
                Err(err) => return Err(err),
            }
            time += self.grid_step;
        }

        let tail = (duration - TAIL_MARGIN).max(0.0);
        if timestamps.last().is_some_and(|&last| tail > last) {
            timestamps.push(tail);
        }

        debug!("scene scan found {} candidate timestamps", timestamps.len());
        Ok(timestamps)
    }
}

impl Default for SceneDetector {
    fn default() -> Self {
        Self::new(
            DEFAULT_MIN_INTERVAL,
            crate::analysis::classifier::DEFAULT_SCENE_THRESHOLD,
        )
    }
}
