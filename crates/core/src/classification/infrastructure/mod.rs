pub mod onnx_age_gender_classifier;
