use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// A face found by a detector, in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub region: Region,
    pub confidence: f32,
}

/// Domain interface for face detection.
///
/// `confidence` is the minimum score a face must exceed to be returned.
/// The threshold is passed per call since the user can change it while a
/// source is running.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        frame: &Frame,
        confidence: f64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
