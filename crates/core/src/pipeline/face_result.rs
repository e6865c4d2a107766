use crate::classification::domain::face_classifier::Classification;
use crate::detection::domain::face_detector::Detection;

/// A detected face together with its predicted attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceResult {
    pub detection: Detection,
    pub classification: Classification,
}
