pub mod attributes;
pub mod face_classifier;
