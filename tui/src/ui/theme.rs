use ratatui::style::{Color, Modifier, Style};

/// Warm terracotta theme.
///
/// Base aesthetic:
/// - sand foreground on a dark brown background
/// - gold for focus, green for a successful estimate, red for errors
pub struct Theme;

impl Theme {
    // Core palette
    pub const BG: Color = Color::Rgb(28, 20, 16);
    pub const FG_SAND: Color = Color::Rgb(236, 222, 198);
    pub const FG_DIM: Color = Color::Rgb(176, 152, 120);
    pub const FG_MUTED: Color = Color::Rgb(110, 92, 76);

    // Accents
    pub const ACCENT_GOLD: Color = Color::Rgb(232, 178, 60);
    pub const ACCENT_GREEN: Color = Color::Rgb(120, 200, 120);
    pub const ACCENT_RED: Color = Color::Rgb(235, 90, 70);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG_SAND).bg(Self::BG)
    }

    /// Panel borders.
    pub fn border() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Border of the focused input.
    pub fn focus() -> Style {
        Style::default()
            .fg(Self::ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::FG_SAND)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG_SAND)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    /// Placeholders and key hints.
    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    }

    /// The submit button while it holds the focus.
    pub fn button_active() -> Style {
        Style::default()
            .fg(Self::BG)
            .bg(Self::ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    }
}
