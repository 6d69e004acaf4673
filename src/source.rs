//! Collaborator seams for the host platform's media decoding.
//!
//! The engine never decodes video itself: it asks a [`VideoSource`] to open a
//! decodable handle, then drives that handle one seek at a time. The handle
//! is stateful and supports a single pending seek, which is why the pipeline
//! renders strictly sequentially.

use crate::error::ExtractError;
use crate::frame::FrameBuffer;

/// Metadata exposed by an opened video handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    /// Seconds, >= 0.
    pub duration: f64,
    pub width: u32,
    pub height: u32,
}

/// An opened, seekable video handle. Released on drop.
pub trait FrameRenderer {
    fn info(&self) -> VideoInfo;

    /// Seeks to `timestamp` and rasterizes the frame at native resolution.
    /// Fails with [`ExtractError::Seek`] when that instant cannot be
    /// rendered.
    fn render_at(&mut self, timestamp: f64) -> Result<FrameBuffer, ExtractError>;

    /// Renders at a reduced resolution for analysis. The default goes
    /// through [`FrameRenderer::render_at`] and downsamples; decoders that
    /// can scale during decode may override this.
    fn render_scaled(
        &mut self,
        timestamp: f64,
        width: u32,
        height: u32,
    ) -> Result<FrameBuffer, ExtractError> {
        Ok(self.render_at(timestamp)?.resize_to(width, height))
    }
}

/// Something that can be opened into a [`FrameRenderer`].
///
/// Opening may fail with [`ExtractError::SourceOpen`] (unparseable source)
/// or [`ExtractError::Unsupported`] (host lacks decode capability); both are
/// fatal before any frame work starts.
pub trait VideoSource {
    type Handle: FrameRenderer;

    fn open(&self) -> Result<Self::Handle, ExtractError>;
}
