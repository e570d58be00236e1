//! Terminal user interface for the Quire book viewer.

pub mod app;
pub mod ui;

use anyhow::Result;

pub use app::App;

/// Runs the viewer until the user exits.
pub fn run(app: App) -> Result<()> {
    ui::runtime::run_app(app)
}
