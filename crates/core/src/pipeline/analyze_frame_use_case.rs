use crate::annotation::overlay::Annotator;
use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::blurring::infrastructure::blurrer_factory::create_blurrer;
use crate::classification::domain::face_classifier::FaceClassifier;
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::analysis_options::AnalysisOptions;
use crate::pipeline::face_result::FaceResult;
use crate::shared::frame::Frame;
use crate::statistics::fps_meter::FpsMeter;

/// Output of one pass over a frame.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    /// Input frame with boxes, labels, masks and the optional FPS text.
    pub annotated: Frame,
    /// Faces in detector order. Faces with an empty crop are left out.
    pub faces: Vec<FaceResult>,
    pub fps: f64,
}

/// Per-frame pipeline: detect → crop → classify → draw → mask → FPS.
pub struct AnalyzeFrameUseCase {
    detector: Box<dyn FaceDetector>,
    classifier: Box<dyn FaceClassifier>,
    annotator: Annotator,
    options: AnalysisOptions,
    blurrer: Option<Box<dyn FrameBlurrer>>,
    fps: FpsMeter,
}

impl AnalyzeFrameUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        classifier: Box<dyn FaceClassifier>,
        annotator: Annotator,
        options: AnalysisOptions,
    ) -> Self {
        Self {
            detector,
            classifier,
            annotator,
            blurrer: create_blurrer(options.mask),
            options,
            fps: FpsMeter::new(),
        }
    }

    pub fn set_options(&mut self, options: AnalysisOptions) {
        if options.mask != self.options.mask {
            self.blurrer = create_blurrer(options.mask);
        }
        self.options = options;
    }

    /// Restart the FPS average, e.g. when a new source starts.
    pub fn reset_fps(&mut self) {
        self.fps.reset();
    }

    pub fn execute(&mut self, frame: &Frame) -> Result<FrameAnalysis, Box<dyn std::error::Error>> {
        let detections = self.detector.detect(frame, self.options.confidence)?;
        let mut annotated = frame.clone();
        let mut faces = Vec::with_capacity(detections.len());

        for detection in detections {
            let crop_region =
                detection
                    .region
                    .padded(self.options.padding, frame.width(), frame.height());
            let crop = frame.crop(&crop_region);
            if crop.is_empty() {
                log::debug!(
                    "Skipping face at {:?} in frame {}: empty crop",
                    detection.region,
                    frame.index()
                );
                continue;
            }

            let classification = self.classifier.classify(&crop)?;
            self.annotator
                .draw_face(&mut annotated, &detection.region, &classification.label());
            if let Some(blurrer) = &self.blurrer {
                blurrer.blur(&mut annotated, &[detection.region])?;
            }

            faces.push(FaceResult {
                detection,
                classification,
            });
        }

        let fps = self.fps.tick();
        if self.options.show_fps {
            self.annotator.draw_fps(&mut annotated, fps);
        }

        Ok(FrameAnalysis {
            annotated,
            faces,
            fps,
        })
    }
}
