//! Page identity normalization and href rewriting.
//!
//! One static chapter tree is shared by every generated page, so its relative
//! hrefs are only meaningful after they are rewritten for the directory depth
//! of the page currently on display. `PageLocation` carries the normalized
//! identity of that page together with the root prefix used for rewriting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches absolute URLs: an optional scheme followed by `//`.
static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z+]+:)?//").expect("absolute URL pattern is valid"));

/// Returns whether an href should be rewritten with the root prefix.
///
/// Fragment references and absolute URLs are left untouched; everything else
/// is treated as relative to the book root.
pub fn is_relative_href(href: &str) -> bool {
    !href.starts_with('#') && !ABSOLUTE_URL.is_match(href)
}

/// Identity of the page currently on display, derived fresh on each
/// activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    current_page: String,
    root_prefix: String,
    aliases_root_index: bool,
}

impl PageLocation {
    /// Builds a location from a raw page path and the page-supplied root
    /// prefix.
    ///
    /// The raw path is normalized: query string and fragment are stripped,
    /// and a path ending in `/` references that directory's implicit
    /// `index.html`. The canonical root index (`…/index.html` with an empty
    /// root prefix) additionally aliases the first link of the tree.
    pub fn new(raw_page: &str, root_prefix: impl Into<String>) -> Self {
        let root_prefix = root_prefix.into();
        let normalized = normalize_page(raw_page);
        let aliases_root_index = root_prefix.is_empty() && normalized.ends_with("/index.html");
        Self {
            current_page: normalized.trim_start_matches('/').to_string(),
            root_prefix,
            aliases_root_index,
        }
    }

    /// Normalized page path compared against rewritten hrefs.
    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    /// Relative path from the displayed page back to the book root.
    pub fn root_prefix(&self) -> &str {
        &self.root_prefix
    }

    /// Whether the displayed page is the canonical index document that
    /// aliases the tree's first link.
    pub fn aliases_root_index(&self) -> bool {
        self.aliases_root_index
    }

    /// Rewrites a tree href for this page's directory depth.
    ///
    /// Hrefs that fail the relative test are returned unmodified.
    pub fn resolve_href(&self, href: &str) -> String {
        if is_relative_href(href) {
            format!("{}{}", self.root_prefix, href)
        } else {
            href.to_string()
        }
    }
}

fn normalize_page(raw: &str) -> String {
    let stripped = raw.split(['#', '?']).next().unwrap_or("");
    if stripped.is_empty() || stripped.ends_with('/') {
        format!("{stripped}index.html")
    } else {
        stripped.to_string()
    }
}
