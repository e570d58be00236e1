//! Page pane showing the identity of the displayed document.

pub mod page_component;

pub use page_component::PageComponent;
