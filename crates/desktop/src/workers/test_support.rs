//! Stub pipeline parts for worker tests; no model files or camera needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use agesight_core::annotation::overlay::Annotator;
use agesight_core::capture::domain::frame_source::FrameSource;
use agesight_core::classification::domain::attributes::{AgeBracket, Gender};
use agesight_core::classification::domain::face_classifier::{Classification, FaceClassifier};
use agesight_core::detection::domain::face_detector::{Detection, FaceDetector};
use agesight_core::pipeline::analysis_options::AnalysisOptions;
use agesight_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use agesight_core::shared::frame::Frame;
use agesight_core::shared::region::Region;

/// Confidence thresholds the stub detector was called with.
#[derive(Clone, Default)]
pub struct Thresholds(Arc<Mutex<Vec<f64>>>);

impl Thresholds {
    pub fn recorded(&self) -> Vec<f64> {
        self.0.lock().unwrap().clone()
    }
}

struct StubDetector {
    thresholds: Thresholds,
    fail: bool,
}

impl FaceDetector for StubDetector {
    fn detect(
        &mut self,
        _frame: &Frame,
        confidence: f64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        if self.fail {
            return Err("detector exploded".into());
        }
        self.thresholds.0.lock().unwrap().push(confidence);
        Ok(vec![Detection {
            region: Region::from_corners(2, 2, 8, 8),
            confidence: 0.99,
        }])
    }
}

struct StubClassifier;

impl FaceClassifier for StubClassifier {
    fn classify(&mut self, _face: &Frame) -> Result<Classification, Box<dyn std::error::Error>> {
        Ok(Classification {
            gender: Gender::Female,
            gender_probability: 0.8,
            age: AgeBracket::Adult,
            age_probability: 0.7,
        })
    }
}

/// Analyzer that finds one face per frame and records thresholds.
pub fn stub_analyzer(thresholds: &Thresholds) -> AnalyzeFrameUseCase {
    AnalyzeFrameUseCase::new(
        Box::new(StubDetector {
            thresholds: thresholds.clone(),
            fail: false,
        }),
        Box::new(StubClassifier),
        Annotator::new(None),
        AnalysisOptions::default(),
    )
}

/// Analyzer whose detector always fails.
pub fn failing_analyzer() -> AnalyzeFrameUseCase {
    AnalyzeFrameUseCase::new(
        Box::new(StubDetector {
            thresholds: Thresholds::default(),
            fail: true,
        }),
        Box::new(StubClassifier),
        Annotator::new(None),
        AnalysisOptions::default(),
    )
}

/// Serves a gray 10×10 frame, optionally only `remaining` times.
pub struct StubSource {
    live: bool,
    remaining: Option<usize>,
    released: Arc<AtomicBool>,
}

impl StubSource {
    pub fn still() -> Self {
        Self {
            live: false,
            remaining: None,
            released: Arc::default(),
        }
    }

    pub fn live(remaining: Option<usize>) -> Self {
        Self {
            live: true,
            remaining,
            released: Arc::default(),
        }
    }

    /// Flag set once the source is released.
    pub fn released(&self) -> Arc<AtomicBool> {
        self.released.clone()
    }
}

impl FrameSource for StubSource {
    fn read(&mut self) -> Option<Frame> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        Some(Frame::new(vec![128; 300], 10, 10, 3, 0))
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::Relaxed);
    }
}
