//! A–Z article index.
//!
//! Articles bucket by the uppercased first character of their display
//! title; anything non-alphabetic lands in a `#` catch-all bucket. Bucket
//! keys render in sorted order, entries case-insensitively sorted.

use crate::dom::escape_html;
use crate::template::PageTemplate;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// One linked article entry.
#[derive(Debug, Clone)]
struct Link {
    title: String,
    url: String,
}

/// Accumulated A–Z listing.
#[derive(Debug, Default)]
pub struct AzIndex {
    buckets: BTreeMap<String, Vec<Link>>,
}

impl AzIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: &str, url: &str) {
        self.buckets
            .entry(title_bucket(title))
            .or_default()
            .push(Link { title: title.to_owned(), url: url.to_owned() });
    }

    /// Render the listing body.
    pub fn body(&self) -> String {
        let mut out = String::from("<div class=\"az\">");
        for (letter, links) in &self.buckets {
            out.push_str(&format!("<h2>{}</h2><ul>", escape_html(letter)));
            let mut links: Vec<&Link> = links.iter().collect();
            links.sort_by_key(|link| link.title.to_lowercase());
            for link in links {
                out.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    link.url,
                    escape_html(&link.title)
                ));
            }
            out.push_str("</ul>");
        }
        out.push_str("</div>");
        out
    }

    /// Write `A-Z.html` at the site root.
    pub fn write(&self, site_dir: &Path, template: &PageTemplate) -> Result<()> {
        template.write_page(&site_dir.join("A-Z.html"), "A–Z Index", &self.body(), "", "")
    }
}

/// Uppercased first character of the title, `#` when non-alphabetic.
fn title_bucket(title: &str) -> String {
    match title.chars().next() {
        Some(c) if c.is_alphabetic() => c.to_uppercase().to_string(),
        _ => "#".to_owned(),
    }
}

// ============================================================================
// Tests
// ============================================================================
