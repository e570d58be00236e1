//! Application state shared across the viewer's components.

use quire_types::{PageLocation, Toc, is_relative_href};
use quire_util::session_store::SessionStore;

use crate::ui::components::sidebar::SidebarState;
use crate::ui::theme::Theme;

/// Top-level viewer state: the immutable chapter tree, the identity of the
/// page on display, and the per-activation sidebar state derived from them.
#[derive(Debug)]
pub struct App {
    /// Build-time chapter tree shared by every page.
    pub toc: Toc,
    /// Styles used by the widgets.
    pub theme: Theme,
    /// Per-activation sidebar state.
    pub sidebar: SidebarState,
    /// Session-scoped storage for cross-navigation continuity.
    pub session: Box<dyn SessionStore>,
    /// Set by the runtime when an `Exit` effect is processed.
    pub should_exit: bool,
    root_prefix: String,
    current_page: String,
}

impl App {
    /// Builds the application state and performs the initial activation.
    pub fn new(
        toc: Toc,
        root_prefix: impl Into<String>,
        initial_page: impl Into<String>,
        session: Box<dyn SessionStore>,
    ) -> Self {
        let mut app = Self {
            toc,
            theme: Theme::default(),
            sidebar: SidebarState::default(),
            session,
            should_exit: false,
            root_prefix: root_prefix.into(),
            current_page: String::new(),
        };
        app.navigate(initial_page.into());
        app
    }

    /// Path of the page currently on display.
    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    /// Derives a fresh location for the displayed page.
    pub fn location(&self) -> PageLocation {
        PageLocation::new(&self.current_page, self.root_prefix.clone())
    }

    /// Switches the displayed page and re-activates the sidebar.
    pub fn navigate(&mut self, page: String) {
        self.current_page = self.canonicalize(page);
        self.activate_sidebar();
    }

    /// Materializes and reconciles the sidebar for the displayed page.
    ///
    /// Runs exactly once per page activation.
    pub fn activate_sidebar(&mut self) {
        let location = self.location();
        self.sidebar.activate(&self.toc, &location, self.session.as_ref());
    }

    /// Label of the chapter matching the displayed page, if any.
    pub fn active_chapter_label(&self) -> Option<String> {
        let path = self.sidebar.active()?;
        self.toc.node(path).map(|node| node.label.clone())
    }

    /// Page path `step` links away from the active one in document order.
    ///
    /// Returns `None` at the ends of the book, when no entry is active, or
    /// when the adjacent entry points outside the book.
    pub fn adjacent_page(&self, step: isize) -> Option<String> {
        let location = self.location();
        let active = self.toc.reconcile(&location).active?;
        let links = self.toc.links();
        let position = links.iter().position(|link| link.path == active)?;
        let target = position.checked_add_signed(step)?;
        let href = location.resolve_href(&links.get(target)?.href);
        is_relative_href(&href).then_some(href)
    }

    fn canonicalize(&self, page: String) -> String {
        // Pages at the book root are addressed with a leading separator so
        // the canonical-index check sees `…/index.html`.
        if self.root_prefix.is_empty() && !page.starts_with('/') {
            format!("/{page}")
        } else {
            page
        }
    }
}
