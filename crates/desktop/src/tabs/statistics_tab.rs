use iced::widget::{button, column, row, text, Column, Space};
use iced::{Color, Element, Length, Theme};

use agesight_core::statistics::detection_stats::DetectionStats;

use crate::app::Message;
use crate::theme::muted_color;
use crate::widgets::stat_bar::stat_bar;

pub fn view(stats: &DetectionStats) -> Element<'_, Message> {
    let summary = stats.frame_summary();
    let current = if summary.is_empty() {
        "No faces in the current frame".to_string()
    } else {
        summary
    };

    let counters = row![
        counter("Frames", stats.frames_processed()),
        counter("Faces", stats.faces_seen()),
        counter("History", stats.history_len() as u64),
    ]
    .spacing(32);

    let totals = stats.totals();
    let age_max = totals.ages().map(|(_, n)| n).max().unwrap_or(0);
    let gender_max = totals.genders().map(|(_, n)| n).max().unwrap_or(0);

    let ages = Column::with_children(
        totals
            .ages()
            .map(|(age, n)| stat_bar(age.label(), n, age_max, age_color)),
    )
    .spacing(6);
    let genders = Column::with_children(
        totals
            .genders()
            .map(|(gender, n)| stat_bar(gender.label(), n, gender_max, gender_color)),
    )
    .spacing(6);

    let history_lines = stats.history_lines();
    let history: Element<'_, Message> = if history_lines.is_empty() {
        muted("No detections yet")
    } else {
        Column::with_children(
            history_lines
                .into_iter()
                .map(|line| text(line).size(12).font(iced::Font::MONOSPACE).into()),
        )
        .spacing(2)
        .into()
    };

    column![
        heading("Current frame"),
        text(current).size(13),
        Space::new().height(16),
        counters,
        Space::new().height(16),
        heading("Age"),
        ages,
        Space::new().height(16),
        heading("Gender"),
        genders,
        Space::new().height(16),
        heading_owned(format!(
            "History ({} of {})",
            stats.history_len(),
            stats.capacity()
        )),
        history,
        Space::new().height(16),
        button(text("Reset statistics").size(13))
            .on_press(Message::ResetStatistics)
            .padding([6, 14])
            .style(button::secondary),
    ]
    .spacing(6)
    .width(Length::Fill)
    .into()
}

fn age_color(theme: &Theme) -> Color {
    theme.extended_palette().primary.base.color
}

fn gender_color(theme: &Theme) -> Color {
    theme.extended_palette().success.base.color
}

fn heading(title: &str) -> Element<'_, Message> {
    heading_owned(title.to_string())
}

fn heading_owned<'a>(title: String) -> Element<'a, Message> {
    text(title)
        .size(15)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..iced::Font::DEFAULT
        })
        .into()
}

fn counter<'a>(label: &'a str, value: u64) -> Element<'a, Message> {
    column![
        text(value.to_string()).size(22),
        text(label).size(12).style(|theme: &Theme| text::Style {
            color: Some(muted_color(theme)),
        }),
    ]
    .spacing(2)
    .into()
}

fn muted<'a>(message: &'a str) -> Element<'a, Message> {
    text(message)
        .size(13)
        .style(|theme: &Theme| text::Style {
            color: Some(muted_color(theme)),
        })
        .into()
}
