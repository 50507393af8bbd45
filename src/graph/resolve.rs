//! Article title → output URL resolution.
//!
//! Category listings name member pages by title strings that do not
//! always match the stored article title byte-for-byte: MediaWiki treats
//! spaces and underscores as the same page. Resolution tries the verbatim
//! title first, then the opposite underscore/space variant. Names that
//! resolve to nothing are dropped from rendered listings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where an article ended up, and where it came from.
#[derive(Debug, Clone)]
pub struct PageEntry {
    /// Output path relative to the site root, e.g. `pages/L/Long_Sword.html`.
    pub url: String,
    /// Source snapshot the article was extracted from. The breadcrumb
    /// phase re-extracts from this path once the category graph is final.
    pub source: PathBuf,
}

/// All known articles, keyed by display title. First insertion per title
/// wins; source roots are scanned in priority order.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    entries: BTreeMap<String, PageEntry>,
}

impl PageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an article. Returns `false` (and changes nothing) when
    /// the title is already taken by an earlier source.
    pub fn insert(&mut self, title: &str, url: String, source: &Path) -> bool {
        if self.entries.contains_key(title) {
            return false;
        }
        self.entries
            .insert(title.to_owned(), PageEntry { url, source: source.to_owned() });
        true
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    pub fn get(&self, title: &str) -> Option<&PageEntry> {
        self.entries.get(title)
    }

    /// Resolve a member-page name to its output URL, tolerating the
    /// underscore/space variant. `None` means the listing entry should be
    /// omitted rather than rendered as a dead link.
    pub fn resolve_url(&self, title: &str) -> Option<&str> {
        if let Some(entry) = self.entries.get(title) {
            return Some(&entry.url);
        }
        self.entries
            .get(&swap_variant(title))
            .map(|entry| entry.url.as_str())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PageEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Underscores become spaces when present, otherwise spaces become
/// underscores.
fn swap_variant(title: &str) -> String {
    if title.contains('_') {
        title.replace('_', " ")
    } else {
        title.replace(' ', "_")
    }
}

// ============================================================================
// Tests
// ============================================================================
