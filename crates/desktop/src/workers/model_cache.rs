use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use agesight_core::pipeline::analysis_options::AnalysisOptions;
use agesight_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use agesight_core::pipeline::analyzer_factory::{build_analyzer, AnalyzerConfig};

/// The settings an analyzer's sessions were built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelKey {
    pub use_gpu: bool,
    pub models_dir: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
}

impl ModelKey {
    fn config(&self) -> AnalyzerConfig<'_> {
        AnalyzerConfig {
            models_dir: self.models_dir.as_deref(),
            font_path: self.font_path.as_deref(),
            use_gpu: self.use_gpu,
        }
    }
}

enum Slot {
    Empty,
    Loading,
    Ready(ModelKey, Box<AnalyzeFrameUseCase>),
    Failed(ModelKey, String),
}

/// Holds the loaded inference sessions between analysis sessions.
///
/// Models are loaded once in the background at startup. A worker checks the
/// analyzer out while it runs and checks it back in when it finishes, so
/// starting the next source reuses the same sessions.
pub struct ModelCache {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl ModelCache {
    /// An empty cache; the first checkout loads the models.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(Slot::Empty),
            ready: Condvar::new(),
        })
    }

    /// Create a cache and begin loading models for `key` in the background.
    pub fn preload(key: ModelKey) -> Arc<Self> {
        let cache = Arc::new(Self {
            slot: Mutex::new(Slot::Loading),
            ready: Condvar::new(),
        });

        let loader = cache.clone();
        thread::spawn(move || {
            log::info!("Preloading models");
            let slot = match build_analyzer(&key.config(), AnalysisOptions::default()) {
                Ok(analyzer) => Slot::Ready(key, Box::new(analyzer)),
                Err(e) => {
                    log::warn!("Model preload failed: {e}");
                    Slot::Failed(key, e.to_string())
                }
            };
            *loader.lock() = slot;
            loader.ready.notify_all();
        });

        cache
    }

    /// Take the analyzer for `key`, waiting for a preload in progress.
    ///
    /// Loads fresh sessions when the cache is empty or holds another key. A
    /// cached load failure is returned once and then forgotten, so the next
    /// checkout retries. Returns early if `cancelled` is set while waiting.
    pub fn checkout(
        &self,
        key: &ModelKey,
        options: AnalysisOptions,
        cancelled: &AtomicBool,
    ) -> Result<AnalyzeFrameUseCase, Box<dyn std::error::Error>> {
        let mut slot = self.lock();
        loop {
            if cancelled.load(Ordering::Relaxed) {
                return Err("Cancelled".into());
            }
            match std::mem::replace(&mut *slot, Slot::Empty) {
                Slot::Loading => {
                    *slot = Slot::Loading;
                    let (guard, _) = self
                        .ready
                        .wait_timeout(slot, Duration::from_millis(100))
                        .unwrap_or_else(PoisonError::into_inner);
                    slot = guard;
                }
                Slot::Ready(cached, mut analyzer) if cached == *key => {
                    log::debug!("Reusing loaded models");
                    analyzer.set_options(options);
                    analyzer.reset_fps();
                    return Ok(*analyzer);
                }
                Slot::Failed(cached, e) if cached == *key => return Err(e.into()),
                _ => break,
            }
        }
        drop(slot);

        log::info!("Loading models");
        build_analyzer(&key.config(), options)
    }

    /// Return an analyzer for the next session to reuse.
    pub fn checkin(&self, key: ModelKey, analyzer: AnalyzeFrameUseCase) {
        *self.lock() = Slot::Ready(key, Box::new(analyzer));
        self.ready.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
