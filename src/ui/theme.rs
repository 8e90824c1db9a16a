//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::Color;

/// Color theme for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent color for titles and active borders.
    pub accent: Color,
    /// Success color (passing builds).
    pub success: Color,
    /// Warning color (in-flight builds, canceled builds).
    pub warning: Color,
    /// Error color (failing builds).
    pub error: Color,
    /// Informational color.
    pub info: Color,
    /// Muted color for secondary text.
    pub muted: Color,
    /// Dim color for hints.
    pub dim: Color,
    /// Border color for inactive chrome.
    pub border: Color,
    /// Highlight color for selected items.
    pub highlight: Color,
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
            muted: Color::Gray,
            dim: Color::DarkGray,
            border: Color::DarkGray,
            highlight: Color::Cyan,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the global theme. A second call has no effect.
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

/// The active theme, falling back to the dark default.
pub fn theme() -> Theme {
    *THEME.get_or_init(Theme::dark)
}
