use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::settings::Appearance;

pub fn resolve_theme(appearance: Appearance) -> Theme {
    match appearance {
        Appearance::Dark => Theme::custom("Agesight Dark", dark_palette()),
        Appearance::Light => Theme::custom("Agesight Light", light_palette()),
    }
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x1c, 0x1c, 0x1e),
        text: color!(0xdd, 0xdd, 0xdd),
        primary: color!(0x3a, 0x86, 0xff),
        success: color!(0x2e, 0xb8, 0x4b),
        warning: color!(0xff, 0xcc, 0x00),
        danger: color!(0xff, 0x45, 0x3a),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf5, 0xf5, 0xf7),
        text: color!(0x1d, 0x1d, 0x1f),
        primary: color!(0x1f, 0x6f, 0xeb),
        success: color!(0x28, 0xa7, 0x45),
        warning: color!(0xff, 0x9f, 0x0a),
        danger: color!(0xff, 0x3b, 0x30),
    }
}

/// Secondary text: the theme's text color at reduced opacity.
pub fn muted_color(theme: &Theme) -> Color {
    Color {
        a: 0.6,
        ..theme.palette().text
    }
}

/// Background of panels that sit on the window background.
pub fn surface_color(theme: &Theme) -> Color {
    theme.extended_palette().background.weak.color
}
