use crate::capture::domain::capture_error::CaptureError;
use crate::capture::domain::frame_source::{FrameSource, SourceSpec};

use super::camera_source::CameraSource;
use super::still_image_source::StillImageSource;

/// Open the source described by `spec` on the calling thread.
pub fn open_source(spec: &SourceSpec) -> Result<Box<dyn FrameSource>, CaptureError> {
    log::info!("Opening {spec}");
    match spec {
        SourceSpec::Camera { index } => Ok(Box::new(CameraSource::open(*index)?)),
        SourceSpec::Image(path) => Ok(Box::new(StillImageSource::open(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_opens_image_as_still_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        image::RgbImage::new(5, 5).save(&path).unwrap();

        let mut source = open_source(&SourceSpec::Image(path)).unwrap();
        assert!(!source.is_live());
        assert!(source.read().is_some());
    }

    #[test]
    fn test_missing_image_is_error() {
        let result = open_source(&SourceSpec::Image(PathBuf::from("/nonexistent.png")));
        assert!(matches!(result, Err(CaptureError::ImageRead { .. })));
    }
}
