//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for terminal rendering using ratatui's
//! color system directly to avoid unnecessary abstractions.

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::str::FromStr;

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Border of the focused search box
    pub input_border: Color,

    /// Enabled pagination buttons
    pub button: Style,

    /// Pagination buttons that cannot be pressed right now
    pub button_disabled: Style,

    /// Selected row in the history dropdown
    pub history_selected: Style,

    /// Result titles
    pub result_title: Style,

    /// Result image urls
    pub result_url: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            input_border: Color::Cyan,
            button: Style::default().fg(Color::Black).bg(Color::Cyan),
            button_disabled: Style::default().fg(Color::DarkGray),
            history_selected: Style::default().fg(Color::Black).bg(Color::Yellow),
            result_title: Style::default().add_modifier(Modifier::BOLD),
            result_url: Style::default().fg(Color::DarkGray),
            status_bg: Color::Blue,
            status_fg: Color::White,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            input_border: Color::White,
            button: Style::default().fg(Color::Black).bg(Color::White),
            button_disabled: Style::default().add_modifier(Modifier::DIM),
            history_selected: Style::default().add_modifier(Modifier::REVERSED),
            result_title: Style::default().add_modifier(Modifier::BOLD),
            result_url: Style::default(),
            status_bg: Color::Black,
            status_fg: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            input_border: Color::LightYellow,
            button: Style::default().fg(Color::Black).bg(Color::LightYellow),
            button_disabled: Style::default().fg(Color::Gray),
            history_selected: Style::default().fg(Color::LightYellow).bg(Color::Black),
            result_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            result_url: Style::default().fg(Color::LightGreen),
            status_bg: Color::White,
            status_fg: Color::Black,
        }
    }
}

/// Theme selector used by configuration and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl ThemeName {
    pub fn theme(self) -> ColorTheme {
        match self {
            ThemeName::Default => ColorTheme::default(),
            ThemeName::Monochrome => ColorTheme::monochrome(),
            ThemeName::HighContrast => ColorTheme::high_contrast(),
        }
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "default" => Ok(ThemeName::Default),
            "monochrome" => Ok(ThemeName::Monochrome),
            "high-contrast" => Ok(ThemeName::HighContrast),
            other => Err(format!(
                "unknown theme '{other}' (expected default, monochrome or high-contrast)"
            )),
        }
    }
}
