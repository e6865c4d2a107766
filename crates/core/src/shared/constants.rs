use std::time::Duration;

pub const FACE_MODEL_NAME: &str = "opencv_face_detector.onnx";
pub const AGE_MODEL_NAME: &str = "age_net.onnx";
pub const GENDER_MODEL_NAME: &str = "gender_net.onnx";

/// Environment variable that points at a directory holding the model files.
pub const MODELS_DIR_ENV: &str = "AGESIGHT_MODELS_DIR";

/// Per-channel means subtracted from face crops before classification,
/// in B, G, R order.
pub const MODEL_MEAN_VALUES: [f32; 3] = [78.426_34, 87.768_91, 114.895_85];

/// Per-channel means subtracted before face detection, in R, G, B order.
pub const DETECTOR_MEAN_VALUES: [f32; 3] = [104.0, 117.0, 123.0];

pub const DETECTOR_INPUT_SIZE: u32 = 300;
pub const CLASSIFIER_INPUT_SIZE: u32 = 227;

/// Pixels added around a detected face before it is cropped for classification.
pub const FACE_PADDING: i32 = 20;

pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Confidence slider bounds, in percent.
pub const MIN_CONFIDENCE_PERCENT: u32 = 50;
pub const MAX_CONFIDENCE_PERCENT: u32 = 100;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Interval between frame polls while a source is active (~33 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(30);

pub const RESULT_FILE_NAME: &str = "result.jpg";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
