//! Article page rendering, in two phases.
//!
//! Phase 1 (during the source scan) writes each article as soon as it is
//! extracted, with an empty breadcrumb slot — the category graph does not
//! exist yet. Phase 2 runs after the graph is final: every article with a
//! non-empty category set is re-extracted from its recorded source
//! snapshot and rewritten with a breadcrumb strip. Re-extracting trades a
//! second parse for never having to re-open and re-parse already-rendered
//! output.

use crate::dom::{self, escape_html};
use crate::extract;
use crate::graph::resolve::PageIndex;
use crate::template::{PageTemplate, asset_prefix_for};
use crate::utils::slug::category_output_filename;
use anyhow::Result;
use scraper::Html;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Most categories shown in a breadcrumb strip.
const BREADCRUMB_CAP: usize = 5;

/// Phase-1 write of one extracted article.
pub fn write_article(
    site_dir: &Path,
    template: &PageTemplate,
    title: &str,
    body_html: &str,
    url: &str,
) -> Result<()> {
    let prefix = asset_prefix_for(url);
    template.write_page(&site_dir.join(url), title, body_html, &prefix, "")
}

/// Phase-2 rewrite of every categorized article with its breadcrumb
/// strip. Articles whose source has meanwhile become unreadable or
/// unextractable keep their phase-1 rendering.
pub fn inject_breadcrumbs(
    site_dir: &Path,
    template: &PageTemplate,
    pages: &PageIndex,
    article_categories: &BTreeMap<String, BTreeSet<String>>,
) -> Result<()> {
    for (title, entry) in pages.iter() {
        let Some(categories) = article_categories.get(title) else {
            continue;
        };
        if categories.is_empty() {
            continue;
        }

        let Ok(markup) = dom::read_markup(&entry.source) else {
            continue;
        };
        let doc = Html::parse_document(&markup);
        let Some(article) = extract::extract_article(&doc) else {
            continue;
        };

        let mut names: Vec<&str> = categories.iter().map(String::as_str).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names.truncate(BREADCRUMB_CAP);

        let prefix = asset_prefix_for(&entry.url);
        let crumbs = breadcrumb_strip(&names, &prefix);
        template.write_page(&site_dir.join(&entry.url), title, &article.body_html, &prefix, &crumbs)?;
    }
    Ok(())
}

/// Breadcrumb strip markup: category links separated by a pipe, targets
/// prefixed so they resolve from the page's own directory depth.
fn breadcrumb_strip(categories: &[&str], asset_prefix: &str) -> String {
    let links: Vec<String> = categories
        .iter()
        .map(|name| {
            format!(
                "<a href=\"{asset_prefix}categories/{}\">{}</a>",
                category_output_filename(name),
                escape_html(name)
            )
        })
        .collect();
    format!(
        "<div class=\"breadcrumbs\">Categories:{}</div>",
        links.join(" <span class=\"sep\">|</span> ")
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn template() -> PageTemplate {
        PageTemplate::from_markup("<title>{{TITLE}}</title>{{BREADCRUMBS}}{{BODY}}")
    }

    #[test]
    fn test_breadcrumb_strip_single() {
        let strip = breadcrumb_strip(&["Weapons"], "../../");
        assert_eq!(
            strip,
            "<div class=\"breadcrumbs\">Categories:\
             <a href=\"../../categories/Category_Weapons.html\">Weapons</a></div>"
        );
    }

    #[test]
    fn test_breadcrumb_strip_separator() {
        let strip = breadcrumb_strip(&["Equipment", "Quests"], "");
        assert!(strip.contains(
            "</a> <span class=\"sep\">|</span> <a href=\"categories/Category_Quests.html\">"
        ));
    }

    #[test]
    fn test_inject_breadcrumbs_rewrites_categorized_articles() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        fs::create_dir_all(&site).unwrap();

        let source = tmp.path().join("Sword.html");
        fs::write(
            &source,
            "<html><body><div id=\"content\"><h1 class=\"firstHeading\">Long Sword</h1>\
             <div id=\"bodyContent\"><p>blade</p></div></div></body></html>",
        )
        .unwrap();

        let mut pages = PageIndex::new();
        pages.insert("Long Sword", "pages/L/Long_Sword.html".to_owned(), &source);
        let mut cats = BTreeMap::new();
        cats.insert(
            "Long Sword".to_owned(),
            BTreeSet::from(["Weapons".to_owned(), "Equipment".to_owned()]),
        );

        inject_breadcrumbs(&site, &template(), &pages, &cats).unwrap();

        let html = fs::read_to_string(site.join("pages/L/Long_Sword.html")).unwrap();
        assert!(html.contains("class=\"breadcrumbs\""));
        // alphabetical: Equipment before Weapons
        assert!(html.find("Equipment").unwrap() < html.find("Weapons").unwrap());
        assert!(html.contains("../../categories/Category_Weapons.html"));
    }

    #[test]
    fn test_inject_breadcrumbs_caps_at_five() {
        let cats: Vec<&str> = vec!["A", "B", "C", "D", "E", "F"];
        let mut names = cats.clone();
        names.truncate(BREADCRUMB_CAP);
        let strip = breadcrumb_strip(&names, "");
        assert!(strip.contains("Category_E.html"));
        assert!(!strip.contains("Category_F.html"));
    }

    #[test]
    fn test_inject_breadcrumbs_skips_uncategorized() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        fs::create_dir_all(&site).unwrap();

        let mut pages = PageIndex::new();
        pages.insert("Plain", "pages/P/Plain.html".to_owned(), &tmp.path().join("gone.html"));
        inject_breadcrumbs(&site, &template(), &pages, &BTreeMap::new()).unwrap();
        assert!(!site.join("pages/P/Plain.html").exists());
    }
}
