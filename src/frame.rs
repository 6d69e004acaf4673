/// Decoded RGBA pixel grid at one instant.
///
/// Immutable once produced; used for comparison and encoding only, never
/// persisted directly.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA
}

/// Default analysis resolution. Comparisons always run at a fixed downsample
/// size so two buffers are guaranteed to be dimension-compatible regardless
/// of the source resolution.
pub const ANALYSIS_WIDTH: u32 = 160;
pub const ANALYSIS_HEIGHT: u32 = 90;

impl FrameBuffer {
    /// Wraps raw RGBA data. Returns `None` when the byte length does not
    /// match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Solid-color buffer. Handy for collaborator stubs and tests.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Downsamples to the given size with a triangle filter.
    pub fn resize_to(&self, target_width: u32, target_height: u32) -> FrameBuffer {
        if (self.width, self.height) == (target_width, target_height) {
            return self.clone();
        }
        // Length is guaranteed by construction.
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .expect("frame buffer length matches dimensions");
        let resized = image::imageops::resize(
            &img,
            target_width,
            target_height,
            image::imageops::FilterType::Triangle,
        );

        FrameBuffer {
            width: target_width,
            height: target_height,
            data: resized.into_raw(),
        }
    }

    /// Downsamples to the fixed analysis resolution.
    pub fn to_analysis_size(&self) -> FrameBuffer {
        self.resize_to(ANALYSIS_WIDTH, ANALYSIS_HEIGHT)
    }
}
