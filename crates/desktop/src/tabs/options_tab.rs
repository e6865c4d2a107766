use iced::widget::{button, checkbox, column, pick_list, row, slider, text, Space};
use iced::{Element, Length, Theme};

use agesight_core::shared::constants::{MAX_CONFIDENCE_PERCENT, MIN_CONFIDENCE_PERCENT};

use crate::app::Message;
use crate::settings::{Appearance, Settings};
use crate::theme::muted_color;

const CAMERA_INDICES: &[u32] = &[0, 1, 2, 3, 4, 5, 6, 7];
const HISTORY_SIZES: &[usize] = &[10, 25, 50, 100, 200];

pub fn view(settings: &Settings) -> Element<'_, Message> {
    let masking = column![
        section("Face masking"),
        checkbox(settings.blur_faces)
            .label("Blur faces")
            .on_toggle(Message::BlurToggled),
        checkbox(settings.pixelate_faces)
            .label("Pixelate faces")
            .on_toggle(Message::PixelateToggled),
        hint("Blur takes precedence when both are enabled."),
    ]
    .spacing(8);

    let detection = column![
        section("Detection"),
        row![
            text("Confidence").size(13).width(110),
            slider(
                MIN_CONFIDENCE_PERCENT..=MAX_CONFIDENCE_PERCENT,
                settings.confidence,
                Message::ConfidenceChanged,
            )
            .step(1u32),
            text(format!("{}%", settings.confidence)).size(13).width(50),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center),
        checkbox(settings.show_fps)
            .label("Show FPS")
            .on_toggle(Message::ShowFpsToggled),
        checkbox(settings.use_gpu)
            .label("Use GPU")
            .on_toggle(Message::UseGpuToggled),
        hint("GPU changes apply the next time a source starts."),
    ]
    .spacing(8);

    let input = column![
        section("Input"),
        row![
            text("Camera").size(13).width(110),
            pick_list(
                CAMERA_INDICES,
                Some(settings.camera_index),
                Message::CameraIndexChanged
            ),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(8);

    let statistics = column![
        section("Statistics"),
        row![
            text("History size").size(13).width(110),
            pick_list(
                HISTORY_SIZES,
                Some(settings.history_capacity),
                Message::HistoryCapacityChanged
            ),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(8);

    let output = column![
        section("Output"),
        checkbox(settings.save_result)
            .label("Save result")
            .on_toggle(Message::SaveResultToggled),
        hint_owned(format!(
            "Each analyzed frame overwrites {}",
            settings.result_path().display()
        )),
        button(text("Open result folder").size(13))
            .on_press(Message::OpenResultFolder)
            .padding([6, 14])
            .style(button::secondary),
    ]
    .spacing(8);

    let appearance = column![
        section("Appearance"),
        pick_list(
            Appearance::ALL,
            Some(settings.appearance),
            Message::AppearanceChanged
        ),
    ]
    .spacing(8);

    column![
        masking,
        Space::new().height(16),
        detection,
        Space::new().height(16),
        input,
        Space::new().height(16),
        statistics,
        Space::new().height(16),
        output,
        Space::new().height(16),
        appearance,
    ]
    .width(Length::Fill)
    .into()
}

fn section(title: &str) -> Element<'_, Message> {
    text(title)
        .size(15)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..iced::Font::DEFAULT
        })
        .into()
}

fn hint(message: &str) -> Element<'_, Message> {
    text(message)
        .size(12)
        .style(|theme: &Theme| text::Style {
            color: Some(muted_color(theme)),
        })
        .into()
}

fn hint_owned<'a>(message: String) -> Element<'a, Message> {
    text(message)
        .size(12)
        .style(|theme: &Theme| text::Style {
            color: Some(muted_color(theme)),
        })
        .into()
}
