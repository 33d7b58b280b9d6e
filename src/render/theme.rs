use ratatui::style::Color;

use crate::game::Theme;

/// Colours used by the renderer for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub head: Color,
    pub body: Color,
    pub food: Color,
    pub special_food: Color,
    pub empty: Color,
    pub border: Color,
    pub label: Color,
    pub text: Color,
    pub muted: Color,
    pub alert: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                head: Color::Cyan,
                body: Color::Green,
                food: Color::Red,
                special_food: Color::LightBlue,
                empty: Color::DarkGray,
                border: Color::White,
                label: Color::Yellow,
                text: Color::White,
                muted: Color::Gray,
                alert: Color::Red,
            },
            Theme::Light => Self {
                head: Color::Blue,
                body: Color::Rgb(0, 128, 64),
                food: Color::Rgb(200, 30, 50),
                special_food: Color::Magenta,
                empty: Color::Gray,
                border: Color::Black,
                label: Color::Rgb(150, 90, 0),
                text: Color::Black,
                muted: Color::DarkGray,
                alert: Color::Rgb(200, 30, 50),
            },
        }
    }
}
