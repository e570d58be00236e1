//! Session-scoped key-value storage for cross-navigation continuity.
//!
//! The sidebar keeps exactly one value here: its scroll offset, written when
//! the user follows a sidebar link and consumed (read once, then cleared) by
//! the next activation. The backing store is injectable so tests run against
//! an in-memory map; the file-backed implementation persists a small JSON
//! payload next to the rest of the viewer's configuration.
//!
//! Store failures are a UX inconvenience, not an error condition: every
//! implementation degrades to a no-op with a warning rather than surfacing
//! failures to the controller.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the session file path.
pub const SESSION_PATH_ENV: &str = "QUIRE_SESSION_PATH";

/// Default filename for the JSON payload.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Well-known key holding the sidebar scroll offset.
pub const SCROLL_OFFSET_KEY: &str = "sidebar-scroll";

/// Error surfaced when reading or writing the session file fails.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("session store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Session-scoped key-value storage.
///
/// Implementations use interior mutability so a shared store handle can be
/// threaded through read-only component code.
pub trait SessionStore: fmt::Debug {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: String);

    /// Removes `key` from the store.
    fn remove(&self, key: &str);

    /// Reads `key` and immediately clears it.
    fn take(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        if value.is_some() {
            self.remove(key);
        }
        value
    }
}

/// Persists the sidebar scroll offset under the well-known key.
pub fn persist_scroll_offset(store: &dyn SessionStore, offset: u16) {
    store.set(SCROLL_OFFSET_KEY, offset.to_string());
}

/// Consumes a previously persisted scroll offset.
///
/// Unparseable stored values are discarded and treated as absent.
pub fn take_scroll_offset(store: &dyn SessionStore) -> Option<u16> {
    store.take(SCROLL_OFFSET_KEY)?.parse().ok()
}

/// In-memory store used in tests and as a fallback when no session file is
/// available.
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("session lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .lock()
            .expect("session lock poisoned")
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().expect("session lock poisoned").remove(key);
    }
}

/// JSON-file-backed store.
///
/// The file lives in the standard configuration directory
/// (`~/.config/quire/session.json` on most platforms) unless overridden via
/// [`SESSION_PATH_ENV`]. Write failures are logged and the store keeps
/// serving the in-memory view for the rest of the session.
#[derive(Debug, Default)]
pub struct FileSession {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
    persist_to_disk: bool,
}

impl FileSession {
    /// Opens (or initializes) the session file at the default path.
    pub fn new() -> Result<Self, SessionStoreError> {
        let path = default_session_path();
        let entries = load_entries(&path)?;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
            persist_to_disk: true,
        })
    }

    /// Builds an in-memory store used when the config directory cannot be
    /// accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            entries: Mutex::new(HashMap::new()),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_locked(&self, entries: &HashMap<String, String>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        if !self.persist_to_disk {
            return;
        }
        if let Err(error) = self.save_locked(entries) {
            warn!(path = %self.path.display(), error = %error, "Failed to persist session store");
        }
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("session lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().expect("session lock poisoned");
        entries.insert(key.to_string(), value);
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("session lock poisoned");
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

fn default_session_path() -> PathBuf {
    if let Ok(path) = env::var(SESSION_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quire")
        .join(SESSION_FILE_NAME)
}

fn load_entries(path: &Path) -> Result<HashMap<String, String>, SessionStoreError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(entries) => Ok(entries),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse session file; starting empty"
                );
                Ok(HashMap::new())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(error) => Err(SessionStoreError::Io(error)),
    }
}
