//! Client-side search index generation.
//!
//! Emits the same JSON array twice: `search-index.json` for environments
//! that can fetch, and `search-index.js` assigning it to a global for
//! `file://` browsing where fetch is unavailable.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One searchable article: title, site-relative URL, and visible text.
#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Accumulated search index, one entry per article in discovery order.
#[derive(Debug, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: &str, url: &str, content: &str) {
        self.entries.push(SearchEntry {
            title: title.to_owned(),
            url: url.to_owned(),
            content: content.to_owned(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write both index files into the site root.
    pub fn write(&self, site_dir: &Path) -> Result<()> {
        let json = serde_json::to_string(&self.entries).context("Failed to encode search index")?;

        let json_path = site_dir.join("search-index.json");
        fs::write(&json_path, &json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;

        let js_path = site_dir.join("search-index.js");
        fs::write(&js_path, format!("window.SEARCH_INDEX={json};"))
            .with_context(|| format!("Failed to write {}", js_path.display()))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entry_field_order() {
        let mut index = SearchIndex::new();
        index.push("Long Sword", "pages/L/Long_Sword.html", "A heavy blade.");
        let json = serde_json::to_string(&index.entries).unwrap();
        assert_eq!(
            json,
            r#"[{"title":"Long Sword","url":"pages/L/Long_Sword.html","content":"A heavy blade."}]"#
        );
    }

    #[test]
    fn test_write_emits_json_and_js_wrapper() {
        let tmp = TempDir::new().unwrap();
        let mut index = SearchIndex::new();
        index.push("A", "pages/A/A.html", "alpha");
        index.write(tmp.path()).unwrap();

        let json = fs::read_to_string(tmp.path().join("search-index.json")).unwrap();
        let js = fs::read_to_string(tmp.path().join("search-index.js")).unwrap();
        assert_eq!(js, format!("window.SEARCH_INDEX={json};"));
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_empty_index_still_writes() {
        let tmp = TempDir::new().unwrap();
        SearchIndex::new().write(tmp.path()).unwrap();
        assert_eq!(
            fs::read_to_string(tmp.path().join("search-index.json")).unwrap(),
            "[]"
        );
    }
}
