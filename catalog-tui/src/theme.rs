//! SynthBrute theme and color utilities.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            text_muted: Color::Rgb(68, 68, 68),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

impl Default for SynthBruteTheme {
    fn default() -> Self {
        Self::synthbrute()
    }
}

/// Ratings are out of five.
pub fn rating_color(rating: f64, theme: &SynthBruteTheme) -> Color {
    if rating >= 4.5 {
        theme.success
    } else if rating >= 3.5 {
        theme.text
    } else if rating >= 2.5 {
        theme.warning
    } else {
        theme.error
    }
}
