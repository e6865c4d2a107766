use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use agesight_core::blurring::infrastructure::blurrer_factory::FaceMask;
use agesight_core::pipeline::analysis_options::AnalysisOptions;
use agesight_core::shared::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_HISTORY_CAPACITY, RESULT_FILE_NAME,
};

use crate::workers::model_cache::ModelKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Dark,
    Light,
}

impl Appearance {
    pub const ALL: &[Appearance] = &[Appearance::Dark, Appearance::Light];
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::Dark => write!(f, "Dark"),
            Appearance::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub blur_faces: bool,
    pub pixelate_faces: bool,
    pub show_fps: bool,
    pub save_result: bool,
    pub use_gpu: bool,
    /// Detection threshold in percent (slider value).
    pub confidence: u32,
    pub camera_index: u32,
    pub appearance: Appearance,
    pub history_capacity: usize,
    /// Where "Save result" writes. `None` uses [`default_result_path`].
    pub result_path: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blur_faces: false,
            pixelate_faces: false,
            show_fps: false,
            save_result: false,
            use_gpu: false,
            confidence: (DEFAULT_CONFIDENCE * 100.0).round() as u32,
            camera_index: 0,
            appearance: Appearance::Dark,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            result_path: None,
            models_dir: None,
            font_path: None,
        }
    }
}

/// `<Pictures>/Agesight/result.jpg`, falling back to the working directory.
pub fn default_result_path() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join("Agesight").join(RESULT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(RESULT_FILE_NAME))
}

impl Settings {
    /// `<config_dir>/Agesight/settings.json`.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Agesight").join("settings.json"))
    }

    /// Read settings from `path`. Missing or malformed files give defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Inputs that decide which models get loaded.
    pub fn model_key(&self) -> ModelKey {
        ModelKey {
            use_gpu: self.use_gpu,
            models_dir: self.models_dir.clone(),
            font_path: self.font_path.clone(),
        }
    }

    pub fn mask(&self) -> FaceMask {
        FaceMask::from_flags(self.blur_faces, self.pixelate_faces)
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            mask: self.mask(),
            show_fps: self.show_fps,
            ..AnalysisOptions::default()
        }
        .with_confidence_percent(self.confidence)
    }

    pub fn result_path(&self) -> PathBuf {
        self.result_path.clone().unwrap_or_else(default_result_path)
    }

    /// Destination for per-frame results, or `None` when saving is off.
    pub fn save_target(&self) -> Option<PathBuf> {
        self.save_result.then(|| self.result_path())
    }
}
