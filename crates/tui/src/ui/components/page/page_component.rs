//! Rendering for the page pane.
//!
//! The viewer does not render document bodies; the pane shows which page is
//! on display and how to move through the book, which is enough to exercise
//! next/previous navigation arriving at pages without touching the sidebar.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::components::Component;

/// Read-only pane for the displayed page.
#[derive(Debug, Default)]
pub struct PageComponent;

impl Component for PageComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &app.theme;
        let title = app
            .active_chapter_label()
            .unwrap_or_else(|| "No matching chapter".to_string());

        let lines = vec![
            Line::raw(""),
            Line::from(vec![Span::styled(title, theme.active)]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Path  ", theme.muted),
                Span::styled(app.current_page().to_string(), theme.text),
            ]),
            Line::raw(""),
            Line::from(vec![Span::styled(
                "n next chapter · p previous chapter · ↑/↓ move · space toggle · enter open · q quit",
                theme.muted,
            )]),
        ];

        let block = Block::default()
            .title("Page")
            .borders(Borders::ALL)
            .border_style(theme.border);
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), rect);
    }
}
