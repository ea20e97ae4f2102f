//! Terminal colors for the configured theme

use ratatui::style::{Color, Modifier, Style};

use crate::config::Theme;
use crate::models::HexColor;

/// Convert a stored color to a terminal color
pub fn to_color(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Styles derived from a theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub header_background: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            accent: to_color(theme.accent()),
            header_background: to_color(theme.header_background()),
        }
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.header_background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

/// Income in green, expense in red
pub fn amount_color(is_income: bool) -> Color {
    if is_income {
        Color::Rgb(0x4c, 0xaf, 0x50)
    } else {
        Color::Rgb(0xd6, 0x27, 0x28)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(HexColor::rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_palettes_differ_by_theme() {
        let gray = Palette::for_theme(Theme::DefaultLightGray);
        let mint = Palette::for_theme(Theme::PastelMint);
        assert_ne!(gray.header_background, mint.header_background);
    }
}
