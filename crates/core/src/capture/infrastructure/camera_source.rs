use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::capture::domain::capture_error::CaptureError;
use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Webcam frames through `nokhwa`, decoded to RGB.
pub struct CameraSource {
    camera: Option<Camera>,
    index: u32,
    frames_read: usize,
}

impl CameraSource {
    /// Open camera `index` and start streaming.
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let open_error = |e: nokhwa::NokhwaError| CaptureError::CameraOpen {
            index,
            reason: e.to_string(),
        };

        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(open_error)?;
        camera.open_stream().map_err(open_error)?;

        let resolution = camera.resolution();
        log::info!(
            "Camera {} opened: {}x{} @ {} fps",
            index,
            resolution.width(),
            resolution.height(),
            camera.frame_rate()
        );

        Ok(Self {
            camera: Some(camera),
            index,
            frames_read: 0,
        })
    }
}

impl FrameSource for CameraSource {
    fn read(&mut self) -> Option<Frame> {
        let camera = self.camera.as_mut()?;
        let decoded = camera
            .frame()
            .and_then(|buffer| buffer.decode_image::<RgbFormat>());
        match decoded {
            Ok(image) => {
                let (width, height) = (image.width(), image.height());
                let frame = Frame::new(image.into_raw(), width, height, 3, self.frames_read);
                self.frames_read += 1;
                Some(frame)
            }
            Err(e) => {
                log::error!("Camera {} read failed: {e}", self.index);
                None
            }
        }
    }

    fn is_live(&self) -> bool {
        true
    }

    fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                log::warn!("Failed to stop camera {}: {e}", self.index);
            }
            log::info!("Camera {} released after {} frames", self.index, self.frames_read);
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires camera hardware
    fn test_open_and_read_default_camera() {
        let mut source = CameraSource::open(0).unwrap();
        let frame = source.read().unwrap();
        assert!(!frame.is_empty());
        source.release();
        assert!(source.read().is_none());
    }

    #[test]
    #[ignore] // Probes camera drivers
    fn test_missing_camera_is_camera_open_error() {
        match CameraSource::open(999) {
            Err(CaptureError::CameraOpen { index, .. }) => assert_eq!(index, 999),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => {}
        }
    }
}
