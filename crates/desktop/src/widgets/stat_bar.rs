use iced::border::Border;
use iced::widget::{container, row, text, Space};
use iced::{Color, Element, Length, Theme};

const LABEL_WIDTH: f32 = 90.0;
const COUNT_WIDTH: f32 = 50.0;
const BAR_HEIGHT: f32 = 14.0;
/// Portions the bar track is split into.
const RESOLUTION: u16 = 1000;

/// A labelled horizontal bar whose filled length is `count / max`.
///
/// `color` picks the fill from the active theme.
pub fn stat_bar<'a, Message: 'a>(
    label: &'a str,
    count: u64,
    max: u64,
    color: fn(&Theme) -> Color,
) -> Element<'a, Message> {
    let (filled, empty) = portions(count, max);

    let mut track = row![].height(BAR_HEIGHT);
    if filled > 0 {
        track = track.push(
            container(Space::new())
                .width(Length::FillPortion(filled))
                .height(Length::Fill)
                .style(move |theme: &Theme| container::Style {
                    background: Some(color(theme).into()),
                    border: Border {
                        radius: 3.0.into(),
                        ..Border::default()
                    },
                    ..container::Style::default()
                }),
        );
    }
    if empty > 0 {
        track = track.push(Space::new().width(Length::FillPortion(empty)));
    }

    let track = container(track)
        .width(Length::Fill)
        .style(|theme: &Theme| container::Style {
            background: Some(Color {
                a: 0.08,
                ..theme.palette().text
            }
            .into()),
            border: Border {
                radius: 3.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    row![
        text(label).size(13).width(LABEL_WIDTH),
        track,
        text(count.to_string()).size(13).width(COUNT_WIDTH),
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center)
    .into()
}

/// Split the track into (filled, empty) portions.
fn portions(count: u64, max: u64) -> (u16, u16) {
    if max == 0 || count == 0 {
        return (0, RESOLUTION);
    }
    let filled = ((count.min(max) as f64 / max as f64) * RESOLUTION as f64).round() as u16;
    let filled = filled.max(1);
    (filled, RESOLUTION - filled)
}
