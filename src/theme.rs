//! Color themes for the terminal UI.

use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Muted modern palette (default)
    #[default]
    Nord,
    /// Orange/amber on black, retro terminal
    AmberCrt,
    /// Green on black, classic terminal
    GreenPhosphor,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nord" => Ok(Theme::Nord),
            "amber" | "ambercrt" | "amber-crt" => Ok(Theme::AmberCrt),
            "green" | "greenphosphor" | "green-phosphor" => Ok(Theme::GreenPhosphor),
            _ => Err(format!(
                "Unknown theme '{s}'. Available: nord, amber-crt, green-phosphor"
            )),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Nord => write!(f, "nord"),
            Theme::AmberCrt => write!(f, "amber-crt"),
            Theme::GreenPhosphor => write!(f, "green-phosphor"),
        }
    }
}

impl Theme {
    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Nord => ColorScheme::nord(),
            Theme::AmberCrt => ColorScheme::amber_crt(),
            Theme::GreenPhosphor => ColorScheme::green_phosphor(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub text: Color,
    /// Labels and secondary info
    pub text_dim: Color,
    /// Block numbers and the screen title
    pub accent: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub toast_success: Color,
    pub toast_error: Color,
}

impl ColorScheme {
    pub fn nord() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::Gray,
            accent: Color::Rgb(153, 69, 255), // Solana purple
            border: Color::DarkGray,
            selection_bg: Color::Yellow,
            selection_fg: Color::Black,
            toast_success: Color::Green,
            toast_error: Color::Red,
        }
    }

    pub fn amber_crt() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_bright = Color::Rgb(255, 200, 100);
        let amber_dim = Color::Rgb(180, 120, 0);
        Self {
            text: amber,
            text_dim: amber_dim,
            accent: amber_bright,
            border: amber_dim,
            selection_bg: amber,
            selection_fg: Color::Black,
            toast_success: Color::Rgb(100, 255, 100),
            toast_error: Color::Red,
        }
    }

    pub fn green_phosphor() -> Self {
        let green = Color::Rgb(0, 255, 0);
        let green_dim = Color::Rgb(0, 180, 0);
        let green_bright = Color::Rgb(100, 255, 100);
        Self {
            text: green,
            text_dim: green_dim,
            accent: green_bright,
            border: green_dim,
            selection_bg: green,
            selection_fg: Color::Black,
            toast_success: green_bright,
            toast_error: Color::Red,
        }
    }
}
