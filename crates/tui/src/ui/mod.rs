//! UI modules: components, theme, and the event-loop runtime.

pub mod components;
pub mod runtime;
pub mod theme;
