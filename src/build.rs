//! Site building orchestration.
//!
//! One synchronous batch run over the snapshot roots.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output() ──► delete + recreate the site tree
//!     ├── copy_assets()
//!     │
//!     ├── scan_articles()          pass 1: extract, write pages,
//!     │                            collect inline category signals
//!     ├── scan_category_pages()    pass 2: dedicated Category_*.html
//!     ├── apply_curated_taxonomy() pass 3: title-pattern rules
//!     │
//!     ├── write category pages / Categories.html / A-Z.html / search
//!     ├── inject_breadcrumbs()     re-extract categorized articles
//!     └── home pages
//! ```
//!
//! All accumulated state lives in a [`BuildContext`] owned here and
//! passed down by reference; the passes share no globals.

use crate::assets::copy_assets;
use crate::config::SiteConfig;
use crate::dom;
use crate::extract;
use crate::generator::az::AzIndex;
use crate::generator::search::SearchIndex;
use crate::generator::{articles, categories, home};
use crate::graph::resolve::PageIndex;
use crate::graph::{CategoryGraph, taxonomy};
use crate::log;
use crate::template::PageTemplate;
use crate::utils::slug::{page_bucket, to_safe_name};
use anyhow::{Context, Result};
use scraper::Html;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything the passes accumulate, owned by [`build_site`].
#[derive(Debug, Default)]
pub struct BuildContext {
    /// Known articles: title → output URL + source snapshot.
    pub pages: PageIndex,
    /// The category graph all three signal passes enrich.
    pub graph: CategoryGraph,
    /// Title → categories from inline and curated signals. Dedicated
    /// category pages do not write here; articles known only through
    /// them render without breadcrumbs.
    pub article_categories: BTreeMap<String, BTreeSet<String>>,
    /// Search index entries in discovery order.
    pub search: SearchIndex,
    /// A–Z listing buckets.
    pub az: AzIndex,
}

/// Build the entire site from the configured snapshot roots.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let site_dir = config.site_dir();
    prepare_output(&site_dir)?;
    copy_assets(&config.templates_dir(), &site_dir)?;
    let template = PageTemplate::load(&config.templates_dir())?;

    let mut ctx = BuildContext::default();

    scan_articles(config, &site_dir, &template, &mut ctx)?;
    log!("scan"; "{} articles", ctx.pages.len());

    scan_category_pages(config, &mut ctx)?;
    apply_curated_taxonomy(&mut ctx);
    // The Featured section renders every curated category even when a
    // snapshot yields no members for it.
    for root in taxonomy::CURATED_ROOTS {
        ctx.graph.ensure(root);
    }
    log!("graph"; "{} categories", ctx.graph.len());

    categories::write_category_pages(&site_dir, &template, &ctx.graph, &ctx.pages)?;
    categories::write_category_index(&site_dir, &template, &ctx.graph)?;
    ctx.az.write(&site_dir, &template)?;
    ctx.search.write(&site_dir)?;
    articles::inject_breadcrumbs(&site_dir, &template, &ctx.pages, &ctx.article_categories)?;
    home::write_home(config, &template)?;
    if config.build.root_index {
        home::write_root_index(config, &template)?;
    }

    log!("build"; "done");
    Ok(())
}

/// Delete any previous output and lay out the site skeleton.
fn prepare_output(site_dir: &Path) -> Result<()> {
    if site_dir.exists() {
        fs::remove_dir_all(site_dir)
            .with_context(|| format!("Failed to clear output directory: {}", site_dir.display()))?;
    }
    fs::create_dir_all(site_dir.join("pages"))
        .with_context(|| format!("Failed to create output directory: {}", site_dir.display()))?;
    fs::create_dir_all(site_dir.join("categories"))?;
    Ok(())
}

/// All `.html` files under `base`, in sorted traversal order so identical
/// input trees build identical sites.
fn html_files(base: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
}

// ============================================================================
// Pass 1: Articles
// ============================================================================

/// Extract every usable article, write its phase-1 page, and collect the
/// inline category signals. First source root to produce a title wins;
/// unreadable files and error pages are skipped, not fatal.
fn scan_articles(
    config: &SiteConfig,
    site_dir: &Path,
    template: &PageTemplate,
    ctx: &mut BuildContext,
) -> Result<()> {
    for base in config.source_dirs() {
        if !base.exists() {
            continue;
        }
        for path in html_files(&base) {
            let Ok(markup) = dom::read_markup(&path) else {
                continue;
            };
            let doc = Html::parse_document(&markup);
            if extract::is_error_page(&doc) {
                continue;
            }
            let Some(article) = extract::extract_article(&doc) else {
                continue;
            };
            if article.title.is_empty() || ctx.pages.contains(&article.title) {
                continue;
            }

            let safe = to_safe_name(&article.title);
            let url = format!("pages/{}/{safe}.html", page_bucket(&safe));
            articles::write_article(site_dir, template, &article.title, &article.body_html, &url)?;

            ctx.pages.insert(&article.title, url.clone(), &path);
            ctx.search.push(&article.title, &url, &article.text);
            ctx.az.insert(&article.title, &url);

            for category in extract::inline_categories(&doc) {
                ctx.graph.add_member(&category, &article.title);
                ctx.article_categories
                    .entry(article.title.clone())
                    .or_default()
                    .insert(category);
            }
        }
    }
    Ok(())
}

// ============================================================================
// Pass 2: Dedicated Category Pages
// ============================================================================

/// Enrich the graph from every `Category_*.html` listing page. Member
/// titles recorded here deliberately stay out of `article_categories`:
/// a listing page names other pages, it does not categorize itself.
fn scan_category_pages(config: &SiteConfig, ctx: &mut BuildContext) -> Result<()> {
    for base in config.source_dirs() {
        if !base.exists() {
            continue;
        }
        for path in html_files(&base) {
            let is_category_file = path
                .file_name()
                .and_then(OsStr::to_str)
                .is_some_and(|name| name.starts_with("Category_"));
            if !is_category_file {
                continue;
            }
            let Ok(markup) = dom::read_markup(&path) else {
                continue;
            };
            let doc = Html::parse_document(&markup);
            if extract::is_error_page(&doc) || !extract::is_category_page(&doc) {
                continue;
            }
            let Some(listing) = extract::extract_category_listing(&doc) else {
                continue;
            };

            ctx.graph.ensure(&listing.name);
            for sub in &listing.subcategories {
                ctx.graph.add_subcategory(&listing.name, sub);
            }
            for page in &listing.pages {
                ctx.graph.add_member(&listing.name, page);
            }
        }
    }
    Ok(())
}

// ============================================================================
// Pass 3: Curated Taxonomy
// ============================================================================

/// Apply the fixed title-pattern rules to every known article. Every
/// matching rule applies; a title can land in several categories.
fn apply_curated_taxonomy(ctx: &mut BuildContext) {
    let titles: Vec<String> = ctx.pages.titles().map(str::to_owned).collect();
    for title in titles {
        for category in taxonomy::categories_for(&title) {
            ctx.graph.add_member(category, &title);
            ctx.article_categories
                .entry(title.clone())
                .or_default()
                .insert(category.to_owned());
        }
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
    fn test_html_files_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.html"), "x").unwrap();
        fs::write(tmp.path().join("a.html"), "x").unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/c.html"), "x").unwrap();

        let names: Vec<String> = html_files(tmp.path())
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.html", "b.html", "c.html"]);
    }

    #[test]
    fn test_prepare_output_clears_previous_tree() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        fs::create_dir_all(site.join("stale")).unwrap();
        fs::write(site.join("stale/old.html"), "x").unwrap();

        prepare_output(&site).unwrap();
        assert!(!site.join("stale").exists());
        assert!(site.join("pages").is_dir());
        assert!(site.join("categories").is_dir());
    }

    #[test]
    fn test_apply_curated_taxonomy_updates_graph_and_index() {
        let mut ctx = BuildContext::default();
        ctx.pages.insert(
            "Shield Quest",
            "pages/S/Shield_Quest.html".to_owned(),
            Path::new("s.html"),
        );
        apply_curated_taxonomy(&mut ctx);

        assert!(ctx.graph.get("Equipment").unwrap().pages.contains("Shield Quest"));
        assert!(ctx.graph.get("Quests").unwrap().pages.contains("Shield Quest"));
        let cats = ctx.article_categories.get("Shield Quest").unwrap();
        assert!(cats.contains("Equipment") && cats.contains("Quests"));
    }
}
