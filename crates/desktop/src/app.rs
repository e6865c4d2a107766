use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use chrono::Local;
use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};

use agesight_core::capture::domain::frame_source::SourceSpec;
use agesight_core::capture::domain::image_writer::ImageWriter;
use agesight_core::capture::infrastructure::image_file_writer::ImageFileWriter;
use agesight_core::shared::constants::{FRAME_INTERVAL, IMAGE_EXTENSIONS};
use agesight_core::shared::frame::Frame;
use agesight_core::shared::model_resolver::model_data_dir;
use agesight_core::statistics::detection_stats::DetectionStats;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::workers::analysis_worker::{self, AnalysisMessage, AnalysisParams, WorkerHandle};
use crate::workers::model_cache::ModelCache;

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Detection,
    Options,
    Statistics,
    About,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Detection, Tab::Options, Tab::Statistics, Tab::About];

    fn label(self) -> &'static str {
        match self {
            Tab::Detection => "Detection",
            Tab::Options => "Options",
            Tab::Statistics => "Statistics",
            Tab::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    StartWebcam,
    LoadImage,
    ImageSelected(Option<PathBuf>),
    Stop,
    SaveSnapshot,
    SnapshotTarget(Option<PathBuf>),
    Tick,
    BlurToggled(bool),
    PixelateToggled(bool),
    ShowFpsToggled(bool),
    SaveResultToggled(bool),
    UseGpuToggled(bool),
    ConfidenceChanged(u32),
    CameraIndexChanged(u32),
    HistoryCapacityChanged(usize),
    AppearanceChanged(Appearance),
    OpenResultFolder,
    OpenModelsFolder,
    ResetStatistics,
    WebcamHovered(bool),
    LoadImageHovered(bool),
    DialogClosed,
}

/// What the preview is currently fed by.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceState {
    Idle,
    Starting(SourceSpec),
    Running { spec: SourceSpec, backend: &'static str },
}

impl SourceState {
    pub fn is_active(&self) -> bool {
        !matches!(self, SourceState::Idle)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HoverState {
    pub webcam: bool,
    pub load_image: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    pub stats: DetectionStats,
    pub source: SourceState,
    pub preview: Option<image::Handle>,
    pub last_frame: Option<Frame>,
    pub fps: f64,
    pub status: String,
    pub hover: HoverState,
    settings_path: Option<PathBuf>,
    cache: Arc<ModelCache>,
    worker: Option<WorkerHandle>,
    /// Thread of the last session, joined by the next one before it opens a source.
    retired: Option<JoinHandle<()>>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings_path = Settings::config_path();
        let settings = settings_path
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();
        let cache = ModelCache::preload(settings.model_key());
        (Self::with_settings(settings, cache, settings_path), Task::none())
    }

    fn with_settings(
        settings: Settings,
        cache: Arc<ModelCache>,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let stats = DetectionStats::new(settings.history_capacity);
        Self {
            active_tab: Tab::Detection,
            settings,
            stats,
            source: SourceState::Idle,
            preview: None,
            last_frame: None,
            fps: 0.0,
            status: "Idle".into(),
            hover: HoverState::default(),
            settings_path,
            cache,
            worker: None,
            retired: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::StartWebcam => {
                self.start(SourceSpec::Camera {
                    index: self.settings.camera_index,
                });
            }
            Message::LoadImage => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select an image")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::ImageSelected,
                );
            }
            Message::ImageSelected(Some(path)) => {
                self.start(SourceSpec::Image(path));
            }
            Message::ImageSelected(None) => {}
            Message::Stop => {
                self.stop();
                self.status = "Stopped".into();
            }
            Message::SaveSnapshot => {
                if self.last_frame.is_none() {
                    self.status = "Nothing to save yet".into();
                    return Task::none();
                }
                let start_dir = self
                    .settings
                    .result_path()
                    .parent()
                    .map(|d| d.to_path_buf());
                return Task::perform(
                    async move {
                        let mut dialog = rfd::AsyncFileDialog::new()
                            .set_title("Save snapshot as")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .set_file_name(snapshot_file_name());
                        if let Some(dir) = start_dir {
                            dialog = dialog.set_directory(dir);
                        }
                        dialog.save_file().await.map(|h| h.path().to_path_buf())
                    },
                    Message::SnapshotTarget,
                );
            }
            Message::SnapshotTarget(Some(path)) => {
                if let Some(frame) = &self.last_frame {
                    match ImageFileWriter::new().write(&path, frame) {
                        Ok(()) => {
                            log::info!("Snapshot saved to {}", path.display());
                            self.status = format!("Snapshot saved to {}", path.display());
                        }
                        Err(e) => {
                            log::error!("Failed to save snapshot to {}: {e}", path.display());
                            return show_error("Save failed", format!("Could not save snapshot: {e}"));
                        }
                    }
                }
            }
            Message::SnapshotTarget(None) => {}
            Message::Tick => {
                return self.drain_worker();
            }
            Message::BlurToggled(enabled) => {
                self.settings.blur_faces = enabled;
                self.options_changed();
            }
            Message::PixelateToggled(enabled) => {
                self.settings.pixelate_faces = enabled;
                self.options_changed();
            }
            Message::ShowFpsToggled(enabled) => {
                self.settings.show_fps = enabled;
                self.options_changed();
            }
            Message::SaveResultToggled(enabled) => {
                self.settings.save_result = enabled;
                self.options_changed();
            }
            Message::UseGpuToggled(enabled) => {
                // Sessions are built when a source starts.
                self.settings.use_gpu = enabled;
                self.save_settings();
            }
            Message::ConfidenceChanged(val) => {
                self.settings.confidence = val;
                self.options_changed();
            }
            Message::CameraIndexChanged(index) => {
                self.settings.camera_index = index;
                self.save_settings();
            }
            Message::HistoryCapacityChanged(capacity) => {
                self.settings.history_capacity = capacity;
                self.stats.set_capacity(capacity);
                self.save_settings();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.save_settings();
            }
            Message::OpenResultFolder => {
                let path = self.settings.result_path();
                if let Some(dir) = path.parent() {
                    open_folder(dir.to_path_buf());
                }
            }
            Message::OpenModelsFolder => {
                if let Some(dir) = model_data_dir() {
                    open_folder(dir);
                }
            }
            Message::ResetStatistics => {
                self.stats.reset();
            }
            Message::WebcamHovered(hovered) => {
                self.hover.webcam = hovered;
            }
            Message::LoadImageHovered(hovered) => {
                self.hover.load_image = hovered;
            }
            Message::DialogClosed => {}
        }
        Task::none()
    }

    /// Stop whatever is running and start analyzing `spec`.
    fn start(&mut self, spec: SourceSpec) {
        self.stop();
        log::info!("Starting {spec}");
        self.status = format!("Opening {spec}…");
        self.fps = 0.0;
        self.worker = Some(analysis_worker::spawn(AnalysisParams {
            source: spec.clone(),
            options: self.settings.analysis_options(),
            save_result_to: self.settings.save_target(),
            models: self.settings.model_key(),
            cache: self.cache.clone(),
            previous: self.retired.take(),
        }));
        self.source = SourceState::Starting(spec);
    }

    fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.retired = worker.stop();
            log::info!("Stopped analysis");
        }
        self.source = SourceState::Idle;
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            log::warn!("Failed to save settings to {}: {e}", path.display());
        }
    }

    fn options_changed(&mut self) {
        self.save_settings();
        if let Some(worker) = &self.worker {
            worker.update_options(self.settings.analysis_options(), self.settings.save_target());
        }
    }

    fn drain_worker(&mut self) -> Task<Message> {
        let Some(worker) = &self.worker else {
            return Task::none();
        };
        let messages: Vec<AnalysisMessage> = worker.messages.try_iter().collect();

        let mut latest = None;
        let mut dialog = Task::none();
        let mut failed = false;
        for message in messages {
            match message {
                AnalysisMessage::Started { backend, .. } => {
                    if let SourceState::Starting(spec) = &self.source {
                        self.status = format!("Running {spec} on {backend}");
                        self.source = SourceState::Running {
                            spec: spec.clone(),
                            backend,
                        };
                    }
                }
                AnalysisMessage::Frame(update) => {
                    self.stats.record_frame(&update.faces, Local::now());
                    latest = Some(update);
                }
                AnalysisMessage::CameraError(e) => {
                    self.status = "Camera unavailable".into();
                    failed = true;
                    dialog = show_error("Camera error", e);
                }
                AnalysisMessage::Error(e) => {
                    self.status = "Analysis failed".into();
                    failed = true;
                    dialog = show_error("Error", e);
                }
                AnalysisMessage::Finished => {
                    if let Some(worker) = self.worker.take() {
                        self.retired = worker.stop();
                    }
                    self.source = SourceState::Idle;
                    if !failed {
                        self.status = "Source ended".into();
                    }
                }
            }
        }

        // Only the newest frame is shown.
        if let Some(update) = latest {
            self.fps = update.fps;
            self.preview = Some(update.preview);
            self.last_frame = Some(update.annotated);
        }
        dialog
    }

    pub fn view(&self) -> Element<'_, Message> {
        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let btn = button(text(tab.label()).size(13))
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Detection => tabs::detection_tab::view(
                self.preview.as_ref(),
                &self.source,
                self.last_frame.is_some(),
                self.hover,
            ),
            Tab::Options => tabs::options_tab::view(&self.settings),
            Tab::Statistics => tabs::statistics_tab::view(&self.stats),
            Tab::About => tabs::about_tab::view(),
        };

        let tab_content: Element<'_, Message> = if self.active_tab == Tab::Detection {
            container(content).padding(16).height(Length::Fill).into()
        } else {
            container(scrollable(content).height(Length::Fill))
                .padding(16)
                .height(Length::Fill)
                .into()
        };

        let status_line = if self.source.is_active() && self.settings.show_fps {
            format!("{}  |  {:.1} fps", self.status, self.fps)
        } else {
            self.status.clone()
        };
        let footer = container(text(status_line).size(12))
            .width(Length::Fill)
            .padding([4, 16]);

        column![tab_bar, tab_content, footer]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.worker.is_some() {
            iced::time::every(FRAME_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }
}

fn show_error(title: &'static str, description: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title(title)
                .set_description(description)
                .set_buttons(rfd::MessageButtons::Ok)
                .show()
                .await;
        },
        |_| Message::DialogClosed,
    )
}

fn open_folder(dir: PathBuf) {
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("Failed to create {}: {e}", dir.display());
    }
    if let Err(e) = open::that(&dir) {
        log::warn!("Failed to open {}: {e}", dir.display());
    }
}

fn snapshot_file_name() -> String {
    format!("snapshot_{}.jpg", Local::now().format("%Y%m%d_%H%M%S"))
}
