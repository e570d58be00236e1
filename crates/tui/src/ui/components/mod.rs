//! UI components: sidebar navigation tree and page pane.

pub mod common;
pub mod component;
pub mod page;
pub mod sidebar;

pub use component::Component;
pub use page::PageComponent;
pub use sidebar::SidebarComponent;
