//! framesift - client-side video frame extraction.
//!
//! Given a decodable video source (reached through the [`source`] traits)
//! and an [`ExtractionConfig`], the engine plans capture timestamps (fixed
//! interval or scene/motion scan), renders and compares frames, filters
//! near-duplicates and encodes the survivors to PNG or JPEG.

pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod frame;
pub mod report;
pub mod source;
pub mod timecode;

pub use config::{ExtractionConfig, ImageFormat};
pub use error::ExtractError;
pub use extract::{FrameExtractor, Screenshot};
pub use frame::FrameBuffer;
pub use report::{CancelToken, ErrorRecord, ErrorReporter, MemoryReporter, ProgressSink};
pub use source::{FrameRenderer, VideoInfo, VideoSource};
