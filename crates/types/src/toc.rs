//! Chapter tree model shared by every page of a generated book.
//!
//! The tree is produced at build time and embedded as a literal constant so
//! each page ships one copy instead of inlining the full table of contents
//! per page. At runtime the tree is immutable; all per-page state is derived
//! by [`Toc::reconcile`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::location::PageLocation;

/// Table of contents embedded at build time.
const EMBEDDED_TOC: &str = include_str!("../assets/book_toc.json");

/// Stable identity of a tree node: the child-index path from the root.
pub type NodePath = Vec<usize>;

/// One documentation page (or section caption) in the chapter tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNode {
    /// Relative or absolute target of the entry. Part titles and draft
    /// chapters have none.
    #[serde(default)]
    pub href: Option<String>,
    /// Human-readable entry label.
    pub label: String,
    /// Subchapters in document order.
    #[serde(default)]
    pub children: Vec<ChapterNode>,
    /// Excluded from ordinal numbering (e.g. an introduction page).
    #[serde(default)]
    pub is_affix: bool,
    /// Non-link section caption separating groups of chapters.
    #[serde(default)]
    pub is_part_title: bool,
}

/// A link in the tree, flattened in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocLink {
    /// Identity of the owning node.
    pub path: NodePath,
    /// Raw, un-rewritten href.
    pub href: String,
}

/// Per-activation outcome of matching the tree against a page location.
///
/// `expanded` holds the active node and every ancestor section on the path
/// to it, guaranteeing the active leaf is reachable regardless of default
/// collapse state. An empty reconciliation (no active node, default collapse
/// state) is a valid degenerate outcome, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Node whose rewritten href matches the current page, if any.
    pub active: Option<NodePath>,
    /// Sections that must render expanded.
    pub expanded: BTreeSet<NodePath>,
}

/// The immutable chapter tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toc {
    /// Top-level entries in document order.
    pub chapters: Vec<ChapterNode>,
}

impl Toc {
    /// Loads the tree embedded at build time.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        serde_json::from_str(EMBEDDED_TOC)
    }

    /// Looks up a node by its child-index path.
    pub fn node(&self, path: &[usize]) -> Option<&ChapterNode> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.chapters.get(first)?;
        for &index in rest {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Flattens every linked entry in document order.
    pub fn links(&self) -> Vec<TocLink> {
        let mut links = Vec::new();
        collect_links(&self.chapters, &mut Vec::new(), &mut links);
        links
    }

    /// Computes the active entry and the set of sections to expand for the
    /// given page location.
    ///
    /// The active entry is the first link, in document order, whose rewritten
    /// href equals the normalized current page. When the current page is the
    /// canonical root index, the very first link aliases it even if its href
    /// is not literally `index.html`; this mirrors the build convention that
    /// the index document reproduces the first chapter.
    pub fn reconcile(&self, location: &PageLocation) -> Reconciliation {
        for (index, link) in self.links().iter().enumerate() {
            let matches_page = location.resolve_href(&link.href) == location.current_page();
            let aliases_index = index == 0 && location.aliases_root_index();
            if !matches_page && !aliases_index {
                continue;
            }
            let mut expanded = BTreeSet::new();
            for depth in 1..=link.path.len() {
                expanded.insert(link.path[..depth].to_vec());
            }
            return Reconciliation {
                active: Some(link.path.clone()),
                expanded,
            };
        }
        Reconciliation::default()
    }
}

fn collect_links(nodes: &[ChapterNode], prefix: &mut NodePath, links: &mut Vec<TocLink>) {
    for (index, node) in nodes.iter().enumerate() {
        prefix.push(index);
        if let Some(href) = node.href.as_ref() {
            links.push(TocLink {
                path: prefix.clone(),
                href: href.clone(),
            });
        }
        collect_links(&node.children, prefix, links);
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::{ChapterNode, Toc};
    use crate::location::PageLocation;

    fn link(label: &str, href: &str) -> ChapterNode {
        ChapterNode {
            href: Some(href.to_string()),
            label: label.to_string(),
            ..ChapterNode::default()
        }
    }

    fn sample_toc() -> Toc {
        Toc {
            chapters: vec![
                ChapterNode {
                    is_affix: true,
                    ..link("Introduction", "introduction.html")
                },
                ChapterNode {
                    label: "CLI Reference".to_string(),
                    is_part_title: true,
                    ..ChapterNode::default()
                },
                ChapterNode {
                    children: vec![link("create", "cli/create.html"), link("start", "cli/start.html")],
                    ..link("Commands", "cli/index.html")
                },
                link("External", "https://example.com/x"),
            ],
        }
    }

    #[test]
    fn root_index_aliases_the_first_link() {
        // The first link's href is not literally `index.html`.
        let toc = sample_toc();
        let outcome = toc.reconcile(&PageLocation::new("/index.html", ""));
        assert_eq!(outcome.active, Some(vec![0]));
        assert_eq!(outcome.expanded.iter().collect::<Vec<_>>(), vec![&vec![0]]);
    }

    #[test]
    fn nested_page_activates_link_and_expands_ancestor_section() {
        let toc = sample_toc();
        let outcome = toc.reconcile(&PageLocation::new("/cli/create.html", ""));
        assert_eq!(outcome.active, Some(vec![2, 0]));
        assert!(outcome.expanded.contains(&vec![2]));
        assert!(outcome.expanded.contains(&vec![2, 0]));
    }

    #[test]
    fn unmatched_page_yields_the_degenerate_outcome() {
        let toc = sample_toc();
        let outcome = toc.reconcile(&PageLocation::new("/missing.html", ""));
        assert_eq!(outcome.active, None);
        assert!(outcome.expanded.is_empty());
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let toc = sample_toc();
        let location = PageLocation::new("/cli/start.html", "");
        assert_eq!(toc.reconcile(&location), toc.reconcile(&location));
    }

    #[test]
    fn pages_at_depth_find_their_own_entry() {
        let toc = sample_toc();
        let location = PageLocation::new("../../cli/start.html", "../../");
        let outcome = toc.reconcile(&location);
        assert_eq!(outcome.active, Some(vec![2, 1]));
    }

    #[test]
    fn links_flatten_in_document_order() {
        let hrefs: Vec<String> = sample_toc().links().into_iter().map(|l| l.href).collect();
        assert_eq!(
            hrefs,
            vec![
                "introduction.html",
                "cli/index.html",
                "cli/create.html",
                "cli/start.html",
                "https://example.com/x",
            ]
        );
    }

    #[test]
    fn node_lookup_follows_child_index_paths() {
        let toc = sample_toc();
        assert_eq!(toc.node(&[2, 1]).map(|n| n.label.as_str()), Some("start"));
        assert_eq!(toc.node(&[]), None);
        assert_eq!(toc.node(&[2, 9]), None);
    }

    #[test]
    fn embedded_tree_parses() {
        let toc = Toc::embedded().expect("embedded TOC is valid JSON");
        assert!(!toc.chapters.is_empty());
        assert!(!toc.links().is_empty());
    }
}
