use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quire_types::Toc;
use quire_util::session_store::{FileSession, SessionStore};
use tracing::Level;

/// Terminal viewer for statically generated documentation books.
#[derive(Debug, Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    /// Table-of-contents JSON emitted by the book build; defaults to the
    /// embedded book.
    #[arg(long)]
    toc: Option<PathBuf>,

    /// Page to open first.
    #[arg(long, default_value = "/index.html")]
    page: String,

    /// Relative path from the displayed page back to the book root.
    #[arg(long, default_value = "")]
    root_prefix: String,

    /// Discard any session state from a previous run.
    #[arg(long)]
    fresh_session: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let toc = load_toc(cli.toc.as_deref())?;
    let session: Box<dyn SessionStore> = if cli.fresh_session {
        Box::new(FileSession::ephemeral())
    } else {
        match FileSession::new() {
            Ok(session) => Box::new(session),
            Err(error) => {
                tracing::warn!(%error, "session store unavailable; falling back to in-memory session");
                Box::new(FileSession::ephemeral())
            }
        }
    };

    let app = quire_tui::App::new(toc, cli.root_prefix, cli.page, session);
    quire_tui::run(app)
}

fn load_toc(path: Option<&std::path::Path>) -> Result<Toc> {
    match path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read TOC file {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("failed to parse TOC file {}", path.display()))
        }
        None => Toc::embedded().context("embedded TOC is malformed"),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}
