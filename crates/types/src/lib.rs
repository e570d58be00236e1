//! Shared type definitions for the Quire documentation viewer.
//!
//! This crate holds the pure, UI-free core: the chapter tree model, page
//! identity normalization, and the reconciliation logic that decides which
//! tree entry is active for the currently displayed page.

pub mod location;
pub mod toc;

pub use location::{PageLocation, is_relative_href};
pub use toc::{ChapterNode, NodePath, Reconciliation, Toc, TocLink};

/// Side effects reported by UI components back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Navigate the viewer to the given page path.
    Navigate(String),
    /// Exit the viewer.
    Exit,
}
