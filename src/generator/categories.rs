//! Category page and category index rendering.
//!
//! Every category node renders twice: once under `categories/` (article
//! links climb out with a `../` prefix) and once at the site root (no
//! prefix). Both renderings come from the same body builder and differ
//! only by prefix.
//!
//! `Categories.html` leads with the curated Featured section in its fixed
//! declared order, then collapses every other root category into a Legacy
//! tree.

use crate::dom::escape_html;
use crate::graph::resolve::PageIndex;
use crate::graph::taxonomy::CURATED_ROOTS;
use crate::graph::{CategoryGraph, CategoryNode};
use crate::template::PageTemplate;
use crate::utils::slug::category_output_filename;
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

// ============================================================================
// Per-Category Pages
// ============================================================================

/// Write both renderings of every category node.
pub fn write_category_pages(
    site_dir: &Path,
    template: &PageTemplate,
    graph: &CategoryGraph,
    pages: &PageIndex,
) -> Result<()> {
    let mut entries: Vec<(&String, &CategoryNode)> = graph.iter().collect();
    entries.sort_by_key(|(name, _)| name.to_lowercase());

    for (name, node) in entries {
        let filename = category_output_filename(name);
        let title = format!("Category: {name}");

        // categories/ copy: assets and article links live one level up.
        let body = category_body(name, node, pages, "../");
        template.write_page(&site_dir.join("categories").join(&filename), &title, &body, "../", "")?;

        // Root copy, no prefixes.
        let body = category_body(name, node, pages, "");
        template.write_page(&site_dir.join(&filename), &title, &body, "", "")?;
    }
    Ok(())
}

/// Category page body: heading, subcategory links, resolvable member
/// links. Unresolvable member names are omitted, never rendered dead.
fn category_body(
    name: &str,
    node: &CategoryNode,
    pages: &PageIndex,
    page_link_prefix: &str,
) -> String {
    let mut out = format!(
        "<div class=\"category\"><h2>Category: {}</h2>",
        escape_html(name)
    );

    if !node.subcategories.is_empty() {
        out.push_str("<h3>Subcategories</h3><ul>");
        let mut subs: Vec<&String> = node.subcategories.iter().collect();
        subs.sort_by_key(|sub| sub.to_lowercase());
        for sub in subs {
            // Sibling category files sit in the same directory in both
            // renderings, so no prefix here.
            out.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                category_output_filename(sub),
                escape_html(sub)
            ));
        }
        out.push_str("</ul>");
    }

    if !node.pages.is_empty() {
        out.push_str("<h3>Pages</h3><ul>");
        let mut members: Vec<&String> = node.pages.iter().collect();
        members.sort_by_key(|title| title.to_lowercase());
        for member in members {
            if let Some(url) = pages.resolve_url(member) {
                out.push_str(&format!(
                    "<li><a href=\"{page_link_prefix}{url}\">{}</a></li>",
                    escape_html(member)
                ));
            }
        }
        out.push_str("</ul>");
    }

    out.push_str("</div>");
    out
}

// ============================================================================
// Category Index
// ============================================================================

/// Write `Categories.html`: Featured section plus collapsed Legacy tree.
pub fn write_category_index(
    site_dir: &Path,
    template: &PageTemplate,
    graph: &CategoryGraph,
) -> Result<()> {
    let mut out = String::from(
        "<div class=\"categories\"><p>Browse by category and subcategory.</p>",
    );

    out.push_str("<h3>Featured</h3><ul>");
    for name in CURATED_ROOTS {
        out.push_str(&format!(
            "<li><a href=\"categories/{}\">{}</a></li>",
            category_output_filename(name),
            escape_html(name)
        ));
    }
    out.push_str("</ul>");

    let curated: BTreeSet<&str> = CURATED_ROOTS.iter().copied().collect();
    let legacy: Vec<String> = graph
        .roots()
        .into_iter()
        .filter(|root| !curated.contains(root.as_str()))
        .collect();
    if !legacy.is_empty() {
        out.push_str("<details><summary>Legacy</summary><ul>");
        for root in &legacy {
            let mut path = Vec::new();
            out.push_str(&render_tree(graph, root, &mut path));
        }
        out.push_str("</ul></details>");
    }

    out.push_str("</div>");
    template.write_page(&site_dir.join("Categories.html"), "Categories", &out, "", "")
}

/// Recursive category tree item. `path` tracks the current ancestor
/// chain: a category that names one of its own ancestors as a subcategory
/// renders as a plain link instead of recursing forever. Acyclic graphs
/// render exactly as a naive recursion would.
fn render_tree(graph: &CategoryGraph, name: &str, path: &mut Vec<String>) -> String {
    let mut out = format!(
        "<li><a href=\"categories/{}\">{}</a>",
        category_output_filename(name),
        escape_html(name)
    );

    let children: Vec<&String> = graph
        .get(name)
        .map(|node| {
            let mut subs: Vec<&String> = node.subcategories.iter().collect();
            subs.sort_by_key(|sub| sub.to_lowercase());
            subs
        })
        .unwrap_or_default();

    if !children.is_empty() && !path.iter().any(|ancestor| ancestor == name) {
        path.push(name.to_owned());
        out.push_str("<ul>");
        for child in children {
            out.push_str(&render_tree(graph, child, path));
        }
        out.push_str("</ul>");
        path.pop();
    }

    out.push_str("</li>");
    out
}

// ============================================================================
// Tests
// ============================================================================
