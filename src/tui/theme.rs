//! Style palettes for the two page themes.
//!
//! Pure data consumed by the rendering layer. Every visual role the
//! page uses has one color per theme; the active palette is selected
//! from the root element's `data-theme` attribute on each frame.

use ratatui::style::{Color, Modifier, Style};

use crate::types::Theme;

/// Colors for every visual role the page renders.
#[derive(Debug)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    /// Headings, the typing line, interactive accents.
    pub accent: Color,
    /// Placeholder text, not-yet-revealed sections, help line.
    pub dim: Color,
    pub success: Color,
    pub error: Color,
    /// Focused control highlight.
    pub focus: Color,
    /// Sidebar overlay background.
    pub panel_bg: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(24, 24, 37),
    fg: Color::Rgb(205, 214, 244),
    accent: Color::Rgb(137, 180, 250),
    dim: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    focus: Color::Rgb(249, 226, 175),
    panel_bg: Color::Rgb(36, 36, 52),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(239, 241, 245),
    fg: Color::Rgb(56, 58, 66),
    accent: Color::Rgb(30, 102, 245),
    dim: Color::Rgb(140, 143, 161),
    success: Color::Rgb(64, 160, 43),
    error: Color::Rgb(210, 15, 57),
    focus: Color::Rgb(223, 142, 29),
    panel_bg: Color::Rgb(220, 224, 232),
};

/// The palette for a theme.
pub fn palette_for(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    pub fn heading(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn dimmed(&self) -> Style {
        Style::new().fg(self.dim)
    }

    pub fn focused(&self) -> Style {
        Style::new().fg(self.focus).add_modifier(Modifier::BOLD)
    }

    pub fn status_ok(&self) -> Style {
        Style::new().fg(self.success)
    }

    pub fn status_err(&self) -> Style {
        Style::new().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Sidebar overlay surface.
    pub fn panel(&self) -> Style {
        Style::new().fg(self.fg).bg(self.panel_bg)
    }
}

// ============================================================================
// TESTS
// ============================================================================
