pub mod execution_provider;
pub mod onnx_ssd_detector;
