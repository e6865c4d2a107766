pub mod analysis_options;
pub mod analyze_frame_use_case;
pub mod analyze_image_use_case;
pub mod analyzer_factory;
pub mod face_result;
