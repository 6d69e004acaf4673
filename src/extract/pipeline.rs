//! Extraction pipeline.
//!
//! Composes the timestamp planner (fixed grid or scene scan), the frame
//! renderer, the duplicate filter and the encoder into one sequential run.
//! The decode handle supports a single pending seek, so rendering is
//! strictly one timestamp at a time, in order.

use log::{debug, info, warn};

use crate::analysis::dedup::DuplicateFilter;
use crate::analysis::detector::SceneDetector;
use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::extract::encode::{artifact_file_name, encode_frame};
use crate::extract::sampler::{sample_timestamps, window_timestamps};
use crate::report::{
    CancelToken, ErrorRecord, ErrorReporter, NullProgress, NullReporter, ProgressSink,
};
use crate::source::{FrameRenderer, VideoSource};

/// One encoded extracted frame plus its metadata. Ownership of the encoded
/// bytes passes to the caller.
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Post-filter sequence position, 0-based, gapless.
    pub index: usize,
    pub timestamp: f64,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub file_name: String,
}

static NULL_REPORTER: NullReporter = NullReporter;
static NULL_PROGRESS: NullProgress = NullProgress;

/// Drives one extraction run. Reporter, progress sink and cancellation are
/// injected by the caller; a run either completes with a (possibly partial)
/// screenshot sequence or fails with a single error.
pub struct FrameExtractor<'a> {
    config: ExtractionConfig,
    reporter: &'a dyn ErrorReporter,
    progress: &'a dyn ProgressSink,
    cancel: CancelToken,
}

impl<'a> FrameExtractor<'a> {
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self {
            config,
            reporter: &NULL_REPORTER,
            progress: &NULL_PROGRESS,
            cancel: CancelToken::new(),
        })
    }

    pub fn with_reporter(mut self, reporter: &'a dyn ErrorReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs the extraction. The handle is held for the whole run and
    /// released when this returns, successfully or not.
    pub fn extract<S: VideoSource>(&self, source: &S) -> Result<Vec<Screenshot>, ExtractError> {
        let config = &self.config;
        let mut handle = source.open()?;
        let video = handle.info();

        info!(
            "extraction start: duration={:.2}s {}x{} smart={} format={:?}",
            video.duration, video.width, video.height, config.use_smart_analysis, config.format
        );

        let effective_end = if config.end_time > 0.0 {
            config.end_time.min(video.duration)
        } else {
            video.duration
        };
        if config.start_time >= effective_end {
            return Err(ExtractError::InvalidConfig(format!(
                "start_time {} is past the effective end {effective_end}",
                config.start_time
            )));
        }

        let planned = if config.use_smart_analysis && config.detect_scenes {
            // the scan always covers the whole video; windowing to the
            // requested range is a pure post-step
            let detector = SceneDetector::new(config.interval, config.scene_threshold);
            let candidates = detector.detect(&mut handle)?;
            window_timestamps(candidates, config.start_time, effective_end)
        } else {
            sample_timestamps(config.start_time, effective_end, config.interval)
        };
        info!("planned {} capture timestamps", planned.len());

        let mut dup_filter = (config.use_smart_analysis && config.skip_similar)
            .then(|| DuplicateFilter::with_threshold(config.similarity_threshold));

        let total = planned.len();
        let mut screenshots: Vec<Screenshot> = Vec::with_capacity(total);

        for (i, &timestamp) in planned.iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!("extraction cancelled at {timestamp:.2}s");
                return Err(ExtractError::Cancelled);
            }

            match handle.render_at(timestamp) {
                Ok(frame) => {
                    let keep = match dup_filter.as_mut() {
                        Some(filter) => filter.check(&frame)?,
                        None => true,
                    };

                    if keep {
                        match encode_frame(&frame, config.format, config.quality) {
                            Ok(data) => {
                                let index = screenshots.len();
                                debug!(
                                    "captured frame {}/{total} at t={timestamp:.2}s",
                                    i + 1
                                );
                                screenshots.push(Screenshot {
                                    index,
                                    timestamp,
                                    width: frame.width,
                                    height: frame.height,
                                    file_name: artifact_file_name(index, timestamp, config.format),
                                    data,
                                });
                            }
                            Err(err) => {
                                warn!("encode failed at t={timestamp:.2}s: {err}");
                                self.reporter.report(
                                    ErrorRecord::new("pipeline", "encode", err.to_string())
                                        .with_metadata(
                                            serde_json::json!({ "timestamp": timestamp }),
                                        ),
                                );
                            }
                        }
                    } else {
                        debug!("skipping similar frame at t={timestamp:.2}s");
                    }
                }
                Err(err) if err.is_recoverable() => {
                    warn!("skipping t={timestamp:.2}s: {err}");
                    self.reporter.report(
                        ErrorRecord::new("pipeline", "seek", err.to_string())
                            .with_metadata(serde_json::json!({ "timestamp": timestamp })),
                    );
                }
                Err(err) => return Err(err),
            }

            // progress tracks the planned count, so skipped or failed
            // timestamps still move it and 100% is always reached
            let percent = ((i + 1) as f64 / total as f64 * 100.0).round() as u8;
            self.progress.update(percent);
        }

        info!("extraction complete: {} screenshots", screenshots.len());
        Ok(screenshots)
    }
}
