use thiserror::Error;

/// Extraction error taxonomy.
///
/// `SourceOpen`, `Unsupported`, `InvalidConfig` and `Cancelled` are fatal and
/// abort the run. `Seek` and `Encode` are recoverable per timestamp: the
/// pipeline reports them and continues. `DimensionMismatch` signals an
/// internal invariant violation between two compared buffers and is never
/// expected under the fixed analysis resolution.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to open video source: {0}")]
    SourceOpen(String),

    #[error("platform lacks required decode capability: {0}")]
    Unsupported(String),

    #[error("invalid extraction config: {0}")]
    InvalidConfig(String),

    #[error("seek to t={timestamp:.2}s failed: {reason}")]
    Seek { timestamp: f64, reason: String },

    #[error("cannot compare {a_width}x{a_height} buffer against {b_width}x{b_height}")]
    DimensionMismatch {
        a_width: u32,
        a_height: u32,
        b_width: u32,
        b_height: u32,
    },

    #[error("image encode failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("extraction cancelled")]
    Cancelled,
}

impl ExtractError {
    /// Recoverable errors affect one timestamp only; everything else aborts
    /// the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExtractError::Seek { .. } | ExtractError::Encode(_))
    }
}
