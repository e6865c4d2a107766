use crate::classification::domain::attributes::{AgeBracket, Gender};
use crate::shared::frame::Frame;

/// Age and gender predicted for one face crop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub gender: Gender,
    pub gender_probability: f32,
    pub age: AgeBracket,
    pub age_probability: f32,
}

impl Classification {
    /// Overlay text drawn above the face box.
    pub fn label(&self) -> String {
        format!("{}, {}", self.gender, self.age)
    }
}

/// Domain interface for predicting age and gender from a cropped face.
pub trait FaceClassifier: Send {
    fn classify(&mut self, face: &Frame) -> Result<Classification, Box<dyn std::error::Error>>;
}
