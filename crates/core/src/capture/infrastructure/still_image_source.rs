use std::path::Path;

use crate::capture::domain::capture_error::CaptureError;
use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// A still image presented as a source that repeats the same frame.
pub struct StillImageSource {
    frame: Option<Frame>,
    reads: usize,
}

impl StillImageSource {
    /// Decode `path` with the `image` crate.
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let img = image::open(path).map_err(|e| CaptureError::ImageRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rgb = img.to_rgb8();
        log::info!(
            "Loaded image {} ({}x{})",
            path.display(),
            rgb.width(),
            rgb.height()
        );
        Ok(Self::from_frame(Frame::from_rgb_image(rgb, 0)))
    }

    pub fn from_frame(frame: Frame) -> Self {
        Self {
            frame: Some(frame),
            reads: 0,
        }
    }
}

impl FrameSource for StillImageSource {
    fn read(&mut self) -> Option<Frame> {
        let frame = self.frame.as_ref()?.clone().with_index(self.reads);
        self.reads += 1;
        Some(frame)
    }

    fn is_live(&self) -> bool {
        false
    }

    fn release(&mut self) {
        self.frame = None;
    }
}
