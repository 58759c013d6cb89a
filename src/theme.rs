//! Dark/light mode reconciliation between a stored preference, the system
//! color-scheme signal and explicit toggling.

use ratatui::style::Color;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeManager {
    dark: bool,
    user_overridden: bool,
}

impl ThemeManager {
    /// A stored preference wins over the system signal at startup.
    pub fn new(stored: Option<Mode>, system_prefers_dark: bool) -> Self {
        let dark = match stored {
            Some(mode) => mode == Mode::Dark,
            None => system_prefers_dark,
        };
        Self {
            dark,
            user_overridden: false,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    #[cfg(test)]
    pub fn user_overridden(&self) -> bool {
        self.user_overridden
    }

    pub fn toggle(&mut self) {
        self.user_overridden = true;
        self.dark = !self.dark;
        tracing::debug!(dark = self.dark, "theme toggled by user");
    }

    /// Follows the system signal until the user has toggled explicitly.
    pub fn on_system_change(&mut self, prefers_dark: bool) {
        if self.user_overridden {
            tracing::debug!(prefers_dark, "ignoring system theme change");
            return;
        }
        self.dark = prefers_dark;
    }

    pub fn toggle_icon(&self) -> &'static str {
        if self.dark {
            "☀️"
        } else {
            "🌙"
        }
    }

    pub fn toggle_tooltip(&self) -> &'static str {
        if self.dark {
            "Switch to Light Mode"
        } else {
            "Switch to Dark Mode"
        }
    }

    pub fn palette(&self) -> Palette {
        if self.dark {
            Palette {
                bg: Color::Black,
                fg: Color::White,
                dim: Color::DarkGray,
                border: Color::Cyan,
                accent: Color::Yellow,
                error: Color::LightRed,
            }
        } else {
            Palette {
                bg: Color::White,
                fg: Color::Black,
                dim: Color::Gray,
                border: Color::Blue,
                accent: Color::Magenta,
                error: Color::Red,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub border: Color,
    pub accent: Color,
    pub error: Color,
}

impl Palette {
    /// Card accent for a condition style token.
    pub fn card(&self, style_class: &str) -> Color {
        match style_class {
            "sunny" => Color::Yellow,
            "partly" => Color::LightYellow,
            "fog" => Color::Gray,
            "rain" => Color::LightBlue,
            "snow" => Color::White,
            "storm" => Color::Magenta,
            _ => self.dim,
        }
    }
}
