use iced::{widget::button, Background, Color, Theme};

use crate::tickets::Priority;

pub const ACCENT: Color = Color::from_rgb8(0x06, 0x5f, 0x46);
pub const DRAWER_BG: Color = Color::from_rgb8(0x0b, 0x14, 0x12);
pub const DRAWER_ITEM_BG: Color = Color::from_rgb8(0x0f, 0x1f, 0x1a);
pub const DRAWER_TEXT_ACTIVE: Color = Color::from_rgb8(0xe6, 0xf4, 0xf1);
pub const DRAWER_TEXT_INACTIVE: Color = Color::from_rgb8(0xa5, 0xb3, 0xad);
pub const TEXT_ON_ACCENT: Color = Color::from_rgb8(0xe9, 0xf7, 0xf3);

// Every other step of a reversed yellow-orange-red ramp, urgent darkest.
const PRIORITY_COLORS: [Color; 4] = [
    Color::from_rgb8(0x80, 0x00, 0x26),
    Color::from_rgb8(0xe3, 0x1a, 0x1c),
    Color::from_rgb8(0xfd, 0x8d, 0x3c),
    Color::from_rgb8(0xfe, 0xd9, 0x76),
];

const SERIES_COLORS: [Color; 6] = [
    Color::from_rgb(0.35, 0.62, 0.96),
    Color::from_rgb(0.42, 0.85, 0.53),
    Color::from_rgb(0.95, 0.67, 0.29),
    Color::from_rgb(0.89, 0.40, 0.40),
    Color::from_rgb(0.73, 0.54, 0.96),
    Color::from_rgb(0.35, 0.85, 0.83),
];

pub fn priority_color(priority: Priority) -> Color {
    PRIORITY_COLORS[priority.num() as usize - 1]
}

pub fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

pub fn accent_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    toggle_button_style(true, status)
}

/// Filled accent when `active`, drawer background otherwise.
pub fn toggle_button_style(active: bool, status: button::Status) -> button::Style {
    let mut background = if active { ACCENT } else { DRAWER_ITEM_BG };

    if matches!(status, button::Status::Hovered) {
        background.a = 0.85;
    }

    if matches!(status, button::Status::Pressed) {
        background.a = 0.7;
    }

    button::Style {
        background: Some(Background::Color(background)),
        text_color: if active {
            TEXT_ON_ACCENT
        } else {
            DRAWER_TEXT_INACTIVE
        },
        ..Default::default()
    }
}
