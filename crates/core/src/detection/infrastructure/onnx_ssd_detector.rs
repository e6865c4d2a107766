/// SSD face detector (ResNet-10 backbone, 300×300 input) using ONNX Runtime via `ort`.
///
/// The network carries its own NMS in the detection-output layer, so
/// post-processing is only thresholding and scaling to frame pixels.
use std::path::Path;

use crate::detection::domain::face_detector::{Detection, FaceDetector};
use crate::shared::blob::{blob_from_frame, ChannelOrder};
use crate::shared::constants::{DETECTOR_INPUT_SIZE, DETECTOR_MEAN_VALUES};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::execution_provider;

/// Values per detection row: `[image_id, label, confidence, x1, y1, x2, y2]`.
const ROW_LEN: usize = 7;

/// SSD face detector backed by an ONNX Runtime session.
pub struct OnnxSsdDetector {
    session: ort::session::Session,
}

impl OnnxSsdDetector {
    /// Load the detector model. `use_gpu` registers the platform's
    /// accelerated provider when one exists.
    pub fn new(model_path: &Path, use_gpu: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let session = execution_provider::build_session(model_path, use_gpu)?;
        log::info!("Loaded face detector from {}", model_path.display());
        Ok(Self { session })
    }
}

impl FaceDetector for OnnxSsdDetector {
    fn detect(
        &mut self,
        frame: &Frame,
        confidence: f64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        if frame.is_empty() {
            return Ok(Vec::new());
        }

        let blob = blob_from_frame(
            frame,
            DETECTOR_INPUT_SIZE,
            DETECTOR_MEAN_VALUES,
            ChannelOrder::Rgb,
        );

        let input_value = ort::value::Tensor::from_array(blob)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("Face detector produced no outputs".into());
        }

        // Output shape is [1, 1, N, 7].
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        if shape.last().copied() != Some(ROW_LEN) {
            return Err(format!("Unexpected face detector output shape: {shape:?}").into());
        }
        let data = tensor.as_slice().ok_or("Cannot get detector output slice")?;

        Ok(parse_detections(
            data,
            frame.width(),
            frame.height(),
            confidence,
        ))
    }
}

/// Convert raw detection rows into frame-space detections.
///
/// Rows whose confidence does not strictly exceed `threshold` are dropped.
/// Coordinates are normalized; they are scaled and truncated toward zero.
fn parse_detections(data: &[f32], width: u32, height: u32, threshold: f64) -> Vec<Detection> {
    data.chunks_exact(ROW_LEN)
        .filter(|row| row[2] as f64 > threshold)
        .map(|row| {
            let x1 = (row[3] * width as f32) as i32;
            let y1 = (row[4] * height as f32) as i32;
            let x2 = (row[5] * width as f32) as i32;
            let y2 = (row[6] * height as f32) as i32;
            Detection {
                region: Region::from_corners(x1, y1, x2, y2),
                confidence: row[2],
            }
        })
        .collect()
}
