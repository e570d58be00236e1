//! Rendering and input handling for the sidebar navigation tree.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use quire_types::{Effect, is_relative_href};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::components::sidebar::SidebarRow;
use crate::ui::theme::Theme;

/// Sidebar component; all durable state lives on [`App::sidebar`].
#[derive(Debug, Default)]
pub struct SidebarComponent {
    list_area: Rect,
}

impl SidebarComponent {
    fn activate_row(&self, app: &mut App, row: SidebarRow) -> Vec<Effect> {
        if let Some(href) = row.href.as_deref() {
            if is_relative_href(href) {
                // Persist the scroll position before the page changes so the
                // next activation can restore it.
                app.sidebar.persist_scroll(app.session.as_ref());
                return vec![Effect::Navigate(href.to_string())];
            }
            tracing::debug!(href, "external link; not opened by the viewer");
            return Vec::new();
        }
        if row.has_children {
            app.sidebar.toggle_section(&row.path);
        }
        Vec::new()
    }
}

impl Component for SidebarComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let block = Block::default()
            .title("Contents")
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(rect);
        self.list_area = inner;

        let state = &mut app.sidebar;
        let content_height = state.visible_len() as u16;
        state.metrics_mut().update_viewport_height(inner.height);
        state.metrics_mut().update_content_height(content_height);
        state.apply_pending_scroll();

        let offset = state.metrics().offset() as usize;
        let selected = state.selected();
        let mut items: Vec<ListItem> = Vec::with_capacity(inner.height as usize);
        for (index, row) in state
            .visible_rows()
            .enumerate()
            .skip(offset)
            .take(inner.height as usize)
        {
            let is_expanded = state.is_expanded(&row.path);
            let is_active = state.is_active(&row.path);
            items.push(build_row_item(
                row,
                index == selected,
                is_active,
                is_expanded,
                inner.width,
                &theme,
            ));
        }

        frame.render_widget(List::new(items).block(block), rect);
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up => app.sidebar.select_previous(),
            KeyCode::Down => app.sidebar.select_next(),
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                let section = app
                    .sidebar
                    .selected_row()
                    .filter(|row| row.has_children)
                    .map(|row| row.path.clone());
                if let Some(path) = section {
                    app.sidebar.toggle_section(&path);
                }
            }
            KeyCode::Enter => {
                if let Some(row) = app.sidebar.selected_row().cloned() {
                    return self.activate_row(app, row);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let pos = Position {
            x: mouse.column,
            y: mouse.row,
        };
        match mouse.kind {
            MouseEventKind::ScrollUp => app.sidebar.metrics_mut().scroll_lines(-3),
            MouseEventKind::ScrollDown => app.sidebar.metrics_mut().scroll_lines(3),
            MouseEventKind::Down(MouseButton::Left) if self.list_area.contains(pos) => {
                let offset = app.sidebar.metrics().offset() as usize;
                let index = pos.y.saturating_sub(self.list_area.y) as usize + offset;
                app.sidebar.select_index(index);
                let Some(row) = app
                    .sidebar
                    .selected_row()
                    .filter(|row| app.sidebar.selected() == index)
                    .cloned()
                else {
                    return Vec::new();
                };
                // Clicking the toggle marker collapses/expands the section;
                // clicking anywhere else on the row follows the link.
                let marker = self.list_area.x + (row.depth as u16) * 2;
                if row.has_children && (marker..marker + 2).contains(&pos.x) {
                    app.sidebar.toggle_section(&row.path);
                    return Vec::new();
                }
                return self.activate_row(app, row);
            }
            _ => {}
        }
        Vec::new()
    }
}

fn build_row_item(
    row: &SidebarRow,
    is_selected: bool,
    is_active: bool,
    is_expanded: bool,
    width: u16,
    theme: &Theme,
) -> ListItem<'static> {
    let mut spans = Vec::with_capacity(4);
    spans.push(Span::raw("  ".repeat(row.depth)));
    if row.has_children {
        spans.push(Span::styled(if is_expanded { "▾ " } else { "▸ " }, theme.muted));
    } else {
        spans.push(Span::raw("  "));
    }
    if let Some(number) = &row.number {
        spans.push(Span::styled(format!("{number} "), theme.muted));
    }

    let label_style = if is_active {
        theme.active
    } else if row.is_part_title {
        theme.part_title
    } else if row.href.is_some() {
        theme.text
    } else {
        theme.muted
    };
    let used: usize = spans.iter().map(|span| span.content.width()).sum();
    let remaining = (width as usize).saturating_sub(used);
    spans.push(Span::styled(truncate_to_width(&row.label, remaining), label_style));

    let mut line = Line::from(spans);
    if is_selected {
        line = line.patch_style(theme.selection);
    }
    ListItem::new(line)
}

fn truncate_to_width(label: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out
}
