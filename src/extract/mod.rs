//! Timestamp planning, encoding and the extraction pipeline.

pub mod encode;
pub mod pipeline;
pub mod sampler;

pub use encode::{artifact_file_name, encode_frame};
pub use pipeline::{FrameExtractor, Screenshot};
pub use sampler::{sample_timestamps, window_timestamps};
