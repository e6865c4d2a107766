use crate::blurring::infrastructure::blurrer_factory::FaceMask;
use crate::shared::constants::{
    DEFAULT_CONFIDENCE, FACE_PADDING, MAX_CONFIDENCE_PERCENT, MIN_CONFIDENCE_PERCENT,
};

/// Per-frame knobs the user can change while a source is running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisOptions {
    /// Detections must score strictly above this (0..1).
    pub confidence: f64,
    pub mask: FaceMask,
    pub show_fps: bool,
    /// Pixels added around a face before classification.
    pub padding: i32,
}

impl AnalysisOptions {
    /// Confidence from a slider percentage, limited to the slider range.
    pub fn confidence_from_percent(percent: u32) -> f64 {
        percent.clamp(MIN_CONFIDENCE_PERCENT, MAX_CONFIDENCE_PERCENT) as f64 / 100.0
    }

    pub fn with_confidence_percent(mut self, percent: u32) -> Self {
        self.confidence = Self::confidence_from_percent(percent);
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            mask: FaceMask::None,
            show_fps: false,
            padding: FACE_PADDING,
        }
    }
}
