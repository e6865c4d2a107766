use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use iced::widget::image;

use agesight_core::capture::domain::capture_error::CaptureError;
use agesight_core::capture::domain::frame_source::{FrameSource, SourceSpec};
use agesight_core::capture::domain::image_writer::ImageWriter;
use agesight_core::capture::infrastructure::image_file_writer::ImageFileWriter;
use agesight_core::capture::infrastructure::source_factory::open_source;
use agesight_core::detection::infrastructure::execution_provider::backend_label;
use agesight_core::pipeline::analysis_options::AnalysisOptions;
use agesight_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use agesight_core::pipeline::face_result::FaceResult;
use agesight_core::shared::constants::FRAME_INTERVAL;
use agesight_core::shared::frame::Frame;

use super::model_cache::{ModelCache, ModelKey};

/// One analyzed frame, ready to display.
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    pub annotated: Frame,
    pub preview: image::Handle,
    pub faces: Vec<FaceResult>,
    pub fps: f64,
}

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum AnalysisMessage {
    Started { live: bool, backend: &'static str },
    Frame(Box<FrameUpdate>),
    /// The camera could not be opened.
    CameraError(String),
    Error(String),
    Finished,
}

/// Messages sent from the UI to the worker thread.
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    UpdateOptions {
        options: AnalysisOptions,
        save_result_to: Option<PathBuf>,
    },
}

/// Parameters for an analysis session.
pub struct AnalysisParams {
    pub source: SourceSpec,
    pub options: AnalysisOptions,
    pub save_result_to: Option<PathBuf>,
    pub models: ModelKey,
    pub cache: Arc<ModelCache>,
    /// Thread of the previous session. It is joined before the source opens,
    /// so a camera is never held by two sessions.
    pub previous: Option<JoinHandle<()>>,
}

/// UI-side ends of a running worker.
pub struct WorkerHandle {
    pub messages: Receiver<AnalysisMessage>,
    commands: Sender<WorkerCommand>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    pub fn update_options(&self, options: AnalysisOptions, save_result_to: Option<PathBuf>) {
        let _ = self.commands.send(WorkerCommand::UpdateOptions {
            options,
            save_result_to,
        });
    }

    /// Ask the worker to release its source and exit.
    ///
    /// Returns the thread so the next session can wait for it.
    pub fn stop(mut self) -> Option<JoinHandle<()>> {
        self.stop.store(true, Ordering::Relaxed);
        self.thread.take()
    }

    #[cfg(test)]
    pub fn detached(messages: Receiver<AnalysisMessage>) -> Self {
        let (commands, _) = crossbeam_channel::unbounded();
        Self {
            messages,
            commands,
            stop: Arc::default(),
            thread: None,
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Spawn a background analysis worker.
pub fn spawn(params: AnalysisParams) -> WorkerHandle {
    let (tx, rx) = crossbeam_channel::unbounded::<AnalysisMessage>();
    let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<WorkerCommand>();
    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();

    let thread = thread::spawn(move || run_session(params, &tx, &cmd_rx, &stop_clone));

    WorkerHandle {
        messages: rx,
        commands: cmd_tx,
        stop,
        thread: Some(thread),
    }
}

fn run_session(
    params: AnalysisParams,
    tx: &Sender<AnalysisMessage>,
    commands: &Receiver<WorkerCommand>,
    stop: &AtomicBool,
) {
    let AnalysisParams {
        source,
        options,
        save_result_to,
        models,
        cache,
        previous,
    } = params;

    if let Some(previous) = previous {
        if previous.join().is_err() {
            log::error!("Previous analysis thread panicked");
        }
    }

    let mut analyzer = match cache.checkout(&models, options, stop) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            if !stop.load(Ordering::Relaxed) {
                log::error!("Failed to load models: {e}");
                let _ = tx.send(AnalysisMessage::Error(e.to_string()));
            }
            let _ = tx.send(AnalysisMessage::Finished);
            return;
        }
    };

    match open_source(&source) {
        Ok(mut frames) => {
            log::info!("Opened {source}");
            let _ = tx.send(AnalysisMessage::Started {
                live: frames.is_live(),
                backend: backend_label(models.use_gpu),
            });
            run_loop(
                &mut analyzer,
                frames.as_mut(),
                &ImageFileWriter::new(),
                tx,
                commands,
                stop,
                save_result_to,
            );
        }
        Err(e) => {
            log::error!("Failed to open {source}: {e}");
            let _ = tx.send(error_message(&e));
            let _ = tx.send(AnalysisMessage::Finished);
        }
    }

    cache.checkin(models, analyzer);
}

/// Analyze frames until the source ends, an error occurs or `stop` is set.
///
/// Live sources are polled every [`FRAME_INTERVAL`]. A still image is
/// analyzed once and then again only after an options update. Always
/// releases the source and finishes with [`AnalysisMessage::Finished`].
fn run_loop(
    analyzer: &mut AnalyzeFrameUseCase,
    source: &mut dyn FrameSource,
    writer: &dyn ImageWriter,
    tx: &Sender<AnalysisMessage>,
    commands: &Receiver<WorkerCommand>,
    stop: &AtomicBool,
    save_result_to: Option<PathBuf>,
) {
    if let Err(e) = analyze_frames(analyzer, source, writer, tx, commands, stop, save_result_to) {
        log::error!("Analysis stopped: {e}");
        let _ = tx.send(error_message(e.as_ref()));
    }
    source.release();
    let _ = tx.send(AnalysisMessage::Finished);
}

fn analyze_frames(
    analyzer: &mut AnalyzeFrameUseCase,
    source: &mut dyn FrameSource,
    writer: &dyn ImageWriter,
    tx: &Sender<AnalysisMessage>,
    commands: &Receiver<WorkerCommand>,
    stop: &AtomicBool,
    mut save_result_to: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let live = source.is_live();
    let mut pending = true;

    while !stop.load(Ordering::Relaxed) {
        let command = if live || pending {
            commands.try_recv().ok()
        } else {
            match commands.recv_timeout(FRAME_INTERVAL) {
                Ok(cmd) => Some(cmd),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        };
        // A slider drag queues one update per step; only the newest counts.
        let command = command.map(|first| commands.try_iter().last().unwrap_or(first));
        if let Some(WorkerCommand::UpdateOptions {
            options,
            save_result_to: target,
        }) = command
        {
            analyzer.set_options(options);
            save_result_to = target;
            pending = true;
        }

        if !(live || pending) {
            continue;
        }

        let started = Instant::now();
        let Some(frame) = source.read() else {
            log::info!("Source ended");
            break;
        };
        if !live {
            // A still image is re-analyzed after an idle wait; its rate is meaningless.
            analyzer.reset_fps();
        }
        let analysis = analyzer.execute(&frame)?;
        pending = false;

        if let Some(path) = &save_result_to {
            if let Err(e) = writer.write(path, &analysis.annotated) {
                log::warn!("Failed to save result to {}: {e}", path.display());
            }
        }

        let update = FrameUpdate {
            preview: to_handle(&analysis.annotated),
            annotated: analysis.annotated,
            faces: analysis.faces,
            fps: analysis.fps,
        };
        if tx.send(AnalysisMessage::Frame(Box::new(update))).is_err() {
            break;
        }

        if live {
            if let Some(rest) = FRAME_INTERVAL.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }
    Ok(())
}

fn error_message(e: &(dyn std::error::Error + 'static)) -> AnalysisMessage {
    match e.downcast_ref::<CaptureError>() {
        Some(CaptureError::CameraOpen { .. }) => AnalysisMessage::CameraError(e.to_string()),
        _ => AnalysisMessage::Error(e.to_string()),
    }
}

/// RGBA image handle for the preview widget.
pub fn to_handle(frame: &Frame) -> image::Handle {
    image::Handle::from_rgba(frame.width(), frame.height(), rgb_to_rgba(frame.data()))
}

fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for px in rgb.chunks_exact(3) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    rgba
}
