//! Widgets and helpers shared across components.

pub mod scroll_metrics;

pub use scroll_metrics::ScrollMetrics;
