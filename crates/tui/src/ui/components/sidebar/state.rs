//! State container for the sidebar navigation tree.
//!
//! The state is rebuilt from scratch on every page activation: rows are
//! materialized from the immutable chapter tree, reconciled against the
//! current page location, and the scroll position is either restored from
//! session storage (read once, then cleared) or queued to center on the
//! active entry.

use std::collections::BTreeSet;

use quire_types::{ChapterNode, NodePath, PageLocation, Reconciliation, Toc};
use quire_util::session_store::{self, SessionStore};

use crate::ui::components::common::ScrollMetrics;

/// One renderable row materialized from the chapter tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    /// Identity of the backing tree node.
    pub path: NodePath,
    /// Nesting depth (0 for top-level entries).
    pub depth: usize,
    /// Entry label.
    pub label: String,
    /// Ordinal such as `3.` or `3.1.`; affix items and part titles have none.
    pub number: Option<String>,
    /// Href rewritten for the displayed page's depth, ready to navigate to.
    pub href: Option<String>,
    /// Non-link section caption.
    pub is_part_title: bool,
    /// Whether the row heads a collapsible section.
    pub has_children: bool,
}

impl SidebarRow {
    /// Part titles are captions, not stops for the keyboard cursor.
    pub fn is_selectable(&self) -> bool {
        !self.is_part_title
    }
}

/// Scroll adjustment queued by `activate` and applied on the next render,
/// once viewport dimensions are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingScroll {
    /// Restore a persisted offset.
    Offset(u16),
    /// Center the active entry in the viewport.
    CenterActive,
}

/// UI state backing the sidebar component.
#[derive(Debug, Default)]
pub struct SidebarState {
    rows: Vec<SidebarRow>,
    active: Option<NodePath>,
    expanded: BTreeSet<NodePath>,
    selected: usize,
    metrics: ScrollMetrics,
    pending_scroll: Option<PendingScroll>,
}

impl SidebarState {
    /// Rebuilds the sidebar for a newly displayed page.
    ///
    /// Materializes the tree once, reconciles it against `location`, and
    /// consumes any persisted scroll offset from `session`. When no offset
    /// was stored (the page was reached without using the sidebar), the
    /// active entry is centered instead.
    pub fn activate(&mut self, toc: &Toc, location: &PageLocation, session: &dyn SessionStore) {
        self.rows = materialize_rows(toc, location);
        let Reconciliation { active, expanded } = toc.reconcile(location);
        self.active = active;
        self.expanded = expanded;
        self.metrics.reset();
        self.pending_scroll = Some(match session_store::take_scroll_offset(session) {
            Some(offset) => PendingScroll::Offset(offset),
            None => PendingScroll::CenterActive,
        });
        self.selected = self
            .active
            .as_deref()
            .and_then(|path| self.visible_index_of(path))
            .unwrap_or(0);
    }

    /// All materialized rows, including rows inside collapsed sections.
    pub fn rows(&self) -> &[SidebarRow] {
        &self.rows
    }

    /// Rows whose ancestor sections are all expanded, in document order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &SidebarRow> + '_ {
        self.rows.iter().filter(|row| self.is_visible(&row.path))
    }

    /// Number of currently visible rows.
    pub fn visible_len(&self) -> usize {
        self.visible_rows().count()
    }

    /// Identity of the entry matching the displayed page, if any.
    pub fn active(&self) -> Option<&NodePath> {
        self.active.as_ref()
    }

    /// Whether the given node is the active entry.
    pub fn is_active(&self, path: &[usize]) -> bool {
        self.active.as_deref() == Some(path)
    }

    /// Whether the given section renders expanded.
    pub fn is_expanded(&self, path: &[usize]) -> bool {
        self.expanded.contains(path)
    }

    /// Currently expanded sections.
    pub fn expanded(&self) -> &BTreeSet<NodePath> {
        &self.expanded
    }

    /// Index of the keyboard cursor among visible rows.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Row under the keyboard cursor.
    pub fn selected_row(&self) -> Option<&SidebarRow> {
        self.visible_rows().nth(self.selected)
    }

    /// Moves the cursor to the next selectable visible row.
    pub fn select_next(&mut self) {
        let selectable = self.selectable_indices();
        if let Some(&next) = selectable.iter().find(|&&index| index > self.selected) {
            self.selected = next;
            self.metrics.scroll_into_view(next as u16);
        }
    }

    /// Moves the cursor to the previous selectable visible row.
    pub fn select_previous(&mut self) {
        let selectable = self.selectable_indices();
        if let Some(&previous) = selectable.iter().rev().find(|&&index| index < self.selected) {
            self.selected = previous;
            self.metrics.scroll_into_view(previous as u16);
        }
    }

    /// Places the cursor on the visible row at `index`, if selectable.
    pub fn select_index(&mut self, index: usize) {
        if self
            .visible_rows()
            .nth(index)
            .is_some_and(|row| row.is_selectable())
        {
            self.selected = index;
        }
    }

    /// Flips the expanded/collapsed state of a section, independent of
    /// active-chapter logic.
    pub fn toggle_section(&mut self, path: &[usize]) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_vec());
        }
        let last = self.visible_len().saturating_sub(1);
        self.selected = self.selected.min(last);
    }

    /// Scroll metrics for the sidebar viewport.
    pub fn metrics(&self) -> &ScrollMetrics {
        &self.metrics
    }

    /// Mutable scroll metrics.
    pub fn metrics_mut(&mut self) -> &mut ScrollMetrics {
        &mut self.metrics
    }

    /// Applies the scroll adjustment queued by the last activation.
    ///
    /// Called by the renderer after viewport dimensions are known; a missing
    /// active entry makes the centering variant a no-op.
    pub fn apply_pending_scroll(&mut self) {
        let Some(pending) = self.pending_scroll.take() else {
            return;
        };
        match pending {
            PendingScroll::Offset(offset) => self.metrics.set_offset(offset),
            PendingScroll::CenterActive => {
                let index = self.active.as_deref().and_then(|path| self.visible_index_of(path));
                if let Some(index) = index {
                    self.metrics.center_on(index as u16);
                }
            }
        }
    }

    /// Persists the current scroll offset for the next activation.
    pub fn persist_scroll(&self, session: &dyn SessionStore) {
        session_store::persist_scroll_offset(session, self.metrics.offset());
    }

    fn visible_index_of(&self, path: &[usize]) -> Option<usize> {
        self.visible_rows().position(|row| row.path == path)
    }

    fn is_visible(&self, path: &[usize]) -> bool {
        (1..path.len()).all(|depth| self.expanded.contains(&path[..depth]))
    }

    fn selectable_indices(&self) -> Vec<usize> {
        self.visible_rows()
            .enumerate()
            .filter(|(_, row)| row.is_selectable())
            .map(|(index, _)| index)
            .collect()
    }
}

fn materialize_rows(toc: &Toc, location: &PageLocation) -> Vec<SidebarRow> {
    let mut rows = Vec::new();
    push_rows(&toc.chapters, location, &Vec::new(), "", &mut rows);
    rows
}

fn push_rows(
    nodes: &[ChapterNode],
    location: &PageLocation,
    parent_path: &NodePath,
    parent_number: &str,
    rows: &mut Vec<SidebarRow>,
) {
    let mut ordinal = 0usize;
    for (index, node) in nodes.iter().enumerate() {
        let mut path = parent_path.clone();
        path.push(index);
        let number = if node.is_part_title || node.is_affix {
            None
        } else {
            ordinal += 1;
            Some(format!("{parent_number}{ordinal}."))
        };
        rows.push(SidebarRow {
            path: path.clone(),
            depth: parent_path.len(),
            label: node.label.clone(),
            number: number.clone(),
            href: node.href.as_ref().map(|href| location.resolve_href(href)),
            is_part_title: node.is_part_title,
            has_children: !node.children.is_empty(),
        });
        let child_prefix = number.unwrap_or_default();
        push_rows(&node.children, location, &path, &child_prefix, rows);
    }
}

#[cfg(test)]
mod tests {
    use quire_types::{ChapterNode, PageLocation, Toc};
    use quire_util::session_store::{MemorySession, SCROLL_OFFSET_KEY, SessionStore};

    use super::SidebarState;

    fn link(label: &str, href: &str) -> ChapterNode {
        ChapterNode {
            href: Some(href.to_string()),
            label: label.to_string(),
            ..ChapterNode::default()
        }
    }

    fn book() -> Toc {
        Toc {
            chapters: vec![
                ChapterNode {
                    is_affix: true,
                    ..link("Introduction", "introduction.html")
                },
                ChapterNode {
                    label: "Guide".to_string(),
                    is_part_title: true,
                    ..ChapterNode::default()
                },
                ChapterNode {
                    children: vec![link("One", "guide/one.html"), link("Two", "guide/two.html")],
                    ..link("Guide Index", "guide/index.html")
                },
                link("Appendix", "appendix.html"),
            ],
        }
    }

    fn activated(page: &str, session: &MemorySession) -> SidebarState {
        let mut state = SidebarState::default();
        state.activate(&book(), &PageLocation::new(page, ""), session);
        state
    }

    #[test]
    fn numbering_skips_affix_items_and_part_titles() {
        let state = activated("/guide/one.html", &MemorySession::default());
        let numbers: Vec<Option<&str>> = state.rows().iter().map(|row| row.number.as_deref()).collect();
        assert_eq!(
            numbers,
            vec![None, None, Some("1."), Some("1.1."), Some("1.2."), Some("2.")]
        );
    }

    #[test]
    fn collapsed_sections_hide_descendants() {
        // A page outside the guide leaves the guide section collapsed.
        let state = activated("/appendix.html", &MemorySession::default());
        let labels: Vec<&str> = state.visible_rows().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Introduction", "Guide", "Guide Index", "Appendix"]);
    }

    #[test]
    fn activation_expands_ancestors_of_the_active_entry() {
        let state = activated("/guide/two.html", &MemorySession::default());
        assert!(state.is_active(&[2, 1]));
        assert!(state.is_expanded(&[2]));
        assert_eq!(state.visible_len(), 6);
        assert_eq!(state.selected_row().map(|row| row.label.as_str()), Some("Two"));
    }

    #[test]
    fn reactivation_yields_the_same_state() {
        let session = MemorySession::default();
        let first = activated("/guide/two.html", &session);
        let second = activated("/guide/two.html", &session);
        assert_eq!(first.active(), second.active());
        assert_eq!(first.expanded(), second.expanded());
    }

    #[test]
    fn stored_scroll_offset_is_applied_and_cleared() {
        let session = MemorySession::default();
        session.set(SCROLL_OFFSET_KEY, "2".to_string());
        let mut state = activated("/guide/one.html", &session);

        state.metrics_mut().update_viewport_height(3);
        let content = state.visible_len() as u16;
        state.metrics_mut().update_content_height(content);
        state.apply_pending_scroll();

        assert_eq!(state.metrics().offset(), 2);
        assert_eq!(session.get(SCROLL_OFFSET_KEY), None);
    }

    #[test]
    fn missing_offset_centers_the_active_entry() {
        let mut state = activated("/guide/one.html", &MemorySession::default());

        state.metrics_mut().update_viewport_height(3);
        let content = state.visible_len() as u16;
        state.metrics_mut().update_content_height(content);
        state.apply_pending_scroll();

        // The active entry sits at visible index 3 of 6 rows.
        assert_eq!(state.metrics().offset(), 2);
    }

    #[test]
    fn unmatched_page_keeps_the_default_state() {
        let mut state = activated("/missing.html", &MemorySession::default());
        assert_eq!(state.active(), None);
        assert!(state.expanded().is_empty());

        state.metrics_mut().update_viewport_height(3);
        let content = state.visible_len() as u16;
        state.metrics_mut().update_content_height(content);
        state.apply_pending_scroll();
        assert_eq!(state.metrics().offset(), 0);
    }

    #[test]
    fn link_activation_persists_the_scroll_offset() {
        let session = MemorySession::default();
        let mut state = activated("/guide/one.html", &session);
        state.metrics_mut().update_viewport_height(3);
        let content = state.visible_len() as u16;
        state.metrics_mut().update_content_height(content);
        state.metrics_mut().set_offset(1);

        state.persist_scroll(&session);
        assert_eq!(session.get(SCROLL_OFFSET_KEY), Some("1".to_string()));
    }

    #[test]
    fn toggle_flips_section_visibility() {
        let mut state = activated("/appendix.html", &MemorySession::default());
        assert_eq!(state.visible_len(), 4);
        state.toggle_section(&[2]);
        assert_eq!(state.visible_len(), 6);
        state.toggle_section(&[2]);
        assert_eq!(state.visible_len(), 4);
    }

    #[test]
    fn cursor_skips_part_titles() {
        let mut state = activated("/index.html", &MemorySession::default());
        assert_eq!(state.selected(), 0);
        state.select_next();
        // Row 1 is the part title; the cursor lands on the guide index.
        assert_eq!(state.selected_row().map(|row| row.label.as_str()), Some("Guide Index"));
        state.select_previous();
        assert_eq!(state.selected_row().map(|row| row.label.as_str()), Some("Introduction"));
    }

    #[test]
    fn hrefs_are_rewritten_for_the_page_depth() {
        let mut state = SidebarState::default();
        let session = MemorySession::default();
        state.activate(&book(), &PageLocation::new("../guide/one.html", "../"), &session);
        let row = state.rows().iter().find(|row| row.label == "One").unwrap();
        assert_eq!(row.href.as_deref(), Some("../guide/one.html"));
        assert!(state.is_active(&[2, 0]));
    }
}
