/// Age and gender classification with the Levi–Hassner CaffeNet-style
/// networks exported to ONNX.
use std::path::Path;

use crate::classification::domain::attributes::{AgeBracket, Gender};
use crate::classification::domain::face_classifier::{Classification, FaceClassifier};
use crate::detection::infrastructure::execution_provider;
use crate::shared::blob::{blob_from_frame, ChannelOrder};
use crate::shared::constants::{CLASSIFIER_INPUT_SIZE, MODEL_MEAN_VALUES};
use crate::shared::frame::Frame;

/// Runs the gender and age networks on the same 227×227 blob.
pub struct OnnxAgeGenderClassifier {
    gender_session: ort::session::Session,
    age_session: ort::session::Session,
}

impl OnnxAgeGenderClassifier {
    pub fn new(
        age_model: &Path,
        gender_model: &Path,
        use_gpu: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let gender_session = execution_provider::build_session(gender_model, use_gpu)?;
        let age_session = execution_provider::build_session(age_model, use_gpu)?;
        log::info!(
            "Loaded classifiers from {} and {}",
            age_model.display(),
            gender_model.display()
        );
        Ok(Self {
            gender_session,
            age_session,
        })
    }
}

/// Runs one session and returns its flattened score vector.
fn run_scores(
    session: &mut ort::session::Session,
    blob: ndarray::Array4<f32>,
) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let input_value = ort::value::Tensor::from_array(blob)?;
    let outputs = session.run(ort::inputs![input_value])?;
    if outputs.len() == 0 {
        return Err("Classifier produced no outputs".into());
    }
    let tensor = outputs[0].try_extract_array::<f32>()?;
    Ok(tensor.iter().copied().collect())
}

/// Index and value of the largest score. Ties keep the first index.
fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((i, v)),
        })
}

impl FaceClassifier for OnnxAgeGenderClassifier {
    fn classify(&mut self, face: &Frame) -> Result<Classification, Box<dyn std::error::Error>> {
        if face.is_empty() {
            return Err("Cannot classify an empty face crop".into());
        }

        // Channels reach the network as B, G, R.
        let blob = blob_from_frame(
            face,
            CLASSIFIER_INPUT_SIZE,
            MODEL_MEAN_VALUES,
            ChannelOrder::Bgr,
        );

        let gender_scores = run_scores(&mut self.gender_session, blob.clone())?;
        let age_scores = run_scores(&mut self.age_session, blob)?;

        let (gender_idx, gender_probability) =
            argmax(&gender_scores).ok_or("Gender network returned no scores")?;
        let (age_idx, age_probability) =
            argmax(&age_scores).ok_or("Age network returned no scores")?;

        let gender = Gender::from_index(gender_idx)
            .ok_or_else(|| format!("Gender index {gender_idx} out of range"))?;
        let age = AgeBracket::from_index(age_idx)
            .ok_or_else(|| format!("Age index {age_idx} out of range"))?;

        Ok(Classification {
            gender,
            gender_probability,
            age,
            age_probability,
        })
    }
}
