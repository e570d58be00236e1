//! Styles shared by the viewer widgets.

use ratatui::style::{Color, Modifier, Style};

/// Style palette for the sidebar and page pane.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Regular link entries.
    pub text: Style,
    /// Ordinals, toggles, and secondary detail.
    pub muted: Style,
    /// The entry matching the displayed page.
    pub active: Style,
    /// The keyboard cursor row.
    pub selection: Style,
    /// Part-title section captions.
    pub part_title: Style,
    /// Pane borders.
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Style::default().fg(Color::Gray),
            muted: Style::default().fg(Color::DarkGray),
            active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selection: Style::default().add_modifier(Modifier::REVERSED),
            part_title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
        }
    }
}
