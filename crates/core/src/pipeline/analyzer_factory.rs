use std::path::Path;

use crate::annotation::overlay::Annotator;
use crate::classification::infrastructure::onnx_age_gender_classifier::OnnxAgeGenderClassifier;
use crate::detection::infrastructure::execution_provider::backend_label;
use crate::detection::infrastructure::onnx_ssd_detector::OnnxSsdDetector;
use crate::pipeline::analysis_options::AnalysisOptions;
use crate::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use crate::shared::constants::{AGE_MODEL_NAME, FACE_MODEL_NAME, GENDER_MODEL_NAME};
use crate::shared::model_resolver;

/// Where to find models and fonts, and which backend to prefer.
#[derive(Clone, Debug, Default)]
pub struct AnalyzerConfig<'a> {
    pub models_dir: Option<&'a Path>,
    pub font_path: Option<&'a Path>,
    pub use_gpu: bool,
}

/// Resolve the three models and assemble the per-frame pipeline.
pub fn build_analyzer(
    config: &AnalyzerConfig<'_>,
    options: AnalysisOptions,
) -> Result<AnalyzeFrameUseCase, Box<dyn std::error::Error>> {
    let face_model = model_resolver::resolve(FACE_MODEL_NAME, config.models_dir)?;
    let age_model = model_resolver::resolve(AGE_MODEL_NAME, config.models_dir)?;
    let gender_model = model_resolver::resolve(GENDER_MODEL_NAME, config.models_dir)?;

    log::info!(
        "Loading models on {} backend",
        backend_label(config.use_gpu)
    );
    let detector = OnnxSsdDetector::new(&face_model, config.use_gpu)?;
    let classifier = OnnxAgeGenderClassifier::new(&age_model, &gender_model, config.use_gpu)?;
    let annotator = Annotator::with_font_path(config.font_path);

    Ok(AnalyzeFrameUseCase::new(
        Box::new(detector),
        Box::new(classifier),
        annotator,
        options,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_invalid_model_files_are_error() {
        let tmp = tempfile::tempdir().unwrap();
        for name in [FACE_MODEL_NAME, AGE_MODEL_NAME, GENDER_MODEL_NAME] {
            fs::write(tmp.path().join(name), b"not an onnx graph").unwrap();
        }
        let config = AnalyzerConfig {
            models_dir: Some(tmp.path()),
            ..AnalyzerConfig::default()
        };
        assert!(build_analyzer(&config, AnalysisOptions::default()).is_err());
    }
}
