use iced::border::Border;
use iced::widget::{button, column, container, image, row, text, Space};
use iced::{ContentFit, Element, Length, Theme};

use crate::app::{HoverState, Message, SourceState};
use crate::theme::{muted_color, surface_color};
use crate::widgets::primary_button::{primary_button, Tone};

pub fn view<'a>(
    preview: Option<&'a image::Handle>,
    source: &'a SourceState,
    has_frame: bool,
    hover: HoverState,
) -> Element<'a, Message> {
    let preview_area: Element<'a, Message> = match preview {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => placeholder(source),
    };

    let preview_panel = container(preview_area)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|theme: &Theme| container::Style {
            background: Some(surface_color(theme).into()),
            border: Border {
                radius: 12.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    let controls = row![
        primary_button(
            "Webcam",
            Tone::Success,
            Some(Message::StartWebcam),
            hover.webcam,
            Message::WebcamHovered,
        ),
        primary_button(
            "Load Image",
            Tone::Primary,
            Some(Message::LoadImage),
            hover.load_image,
            Message::LoadImageHovered,
        ),
        Space::new().width(Length::Fill),
        button(text("Stop").size(14))
            .on_press_maybe(source.is_active().then_some(Message::Stop))
            .padding([10, 18])
            .style(button::secondary),
        button(text("Save Snapshot…").size(14))
            .on_press_maybe(has_frame.then_some(Message::SaveSnapshot))
            .padding([10, 18])
            .style(button::secondary),
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center);

    column![preview_panel, Space::new().height(12), controls].into()
}

fn placeholder(source: &SourceState) -> Element<'_, Message> {
    let message = match source {
        SourceState::Idle => "Start the webcam or load an image to begin",
        SourceState::Starting(_) => "Loading models…",
        SourceState::Running { .. } => "Waiting for the first frame…",
    };
    text(message)
        .size(15)
        .style(|theme: &Theme| text::Style {
            color: Some(muted_color(theme)),
        })
        .into()
}
