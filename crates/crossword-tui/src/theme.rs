use clap::ValueEnum;
use crossterm::style::Color;

/// Named themes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
    HighContrast,
}

impl ThemeName {
    pub fn next(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::HighContrast,
            ThemeName::HighContrast => ThemeName::Dark,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
            ThemeName::HighContrast => Theme::high_contrast(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::HighContrast => "high contrast",
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Inactive (blocked) cell fill
    pub block: Color,
    /// Active cell background
    pub cell_bg: Color,
    /// Start number color
    pub number: Color,
    /// Typed letter color
    pub filled: Color,
    /// Empty cell placeholder color
    pub empty: Color,
    /// Focused cell background
    pub selected_bg: Color,
    /// Post-solve highlight background
    pub highlight_bg: Color,
    /// Error color
    pub error: Color,
    /// Success color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            block: Color::Rgb { r: 45, g: 48, b: 60 },
            cell_bg: Color::Rgb { r: 28, g: 30, b: 40 },
            number: Color::Rgb { r: 255, g: 170, b: 80 },
            filled: Color::Rgb { r: 80, g: 180, b: 255 },
            empty: Color::DarkGrey,
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            highlight_bg: Color::Rgb { r: 120, g: 105, b: 30 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 60, g: 60, b: 80 },
            block: Color::Rgb { r: 40, g: 40, b: 50 },
            cell_bg: Color::Rgb { r: 255, g: 255, b: 255 },
            number: Color::Rgb { r: 200, g: 90, b: 20 },
            filled: Color::Rgb { r: 30, g: 100, b: 200 },
            empty: Color::Rgb { r: 190, g: 190, b: 200 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            highlight_bg: Color::Rgb { r: 254, g: 240, b: 160 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            block: Color::DarkGrey,
            cell_bg: Color::Black,
            number: Color::Yellow,
            filled: Color::Cyan,
            empty: Color::Grey,
            selected_bg: Color::Blue,
            highlight_bg: Color::DarkYellow,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
