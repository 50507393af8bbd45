//! Article and category-listing extraction from salvaged wiki snapshots.
//!
//! Snapshot trees mix real MediaWiki pages with hosting-provider error
//! pages (dead web server, 5xx edge errors, 404 landing pages, Cloudflare
//! blocks), so classification runs before any extraction. A usable article
//! is the content region of a MediaWiki page with its navigation chrome
//! stripped and its local links flattened to bare filenames, since output
//! pages are regrouped into bucketed directories.

use crate::dom::{self, SerializeFilter};
use crate::utils::slug::normalize_category_name;
use regex::Regex;
use scraper::node::Element;
use scraper::{Html, Selector};
use std::sync::LazyLock;

// ============================================================================
// Selectors and Signatures
// ============================================================================

static TITLE: LazyLock<Selector> = LazyLock::new(|| dom::selector("title"));
static CONTENT_NESTED: LazyLock<Selector> =
    LazyLock::new(|| dom::selector("#content #bodyContent"));
static CONTENT: LazyLock<Selector> = LazyLock::new(|| dom::selector("#content"));
static BODY_CONTENT: LazyLock<Selector> = LazyLock::new(|| dom::selector("#bodyContent"));
static FIRST_HEADING: LazyLock<Selector> = LazyLock::new(|| dom::selector("h1.firstHeading"));
static ANY_H1: LazyLock<Selector> = LazyLock::new(|| dom::selector("h1"));
static BODY: LazyLock<Selector> = LazyLock::new(|| dom::selector("body"));
static CF_WRAPPER: LazyLock<Selector> = LazyLock::new(|| dom::selector("#cf-wrapper"));
static CATLINKS: LazyLock<Selector> =
    LazyLock::new(|| dom::selector("#catlinks a[title^=\"Category:\"]"));
static SUBCATEGORY_LINKS: LazyLock<Selector> =
    LazyLock::new(|| dom::selector("#mw-subcategories a[title^=\"Category:\"]"));
static MEMBER_PAGE_LINKS: LazyLock<Selector> =
    LazyLock::new(|| dom::selector("#mw-pages a[title]"));

/// `<title>` signatures of hosting-provider failure pages.
static ERROR_TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)Web server is down",
        r"(?i)Error code\s*5\d\d",
        r"(?i)Erreur\s*404|404\s*Not\s*Found|Free Pages Personnelles",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Cloudflare block pages carry a diagnostic ray id in body text.
static CF_RAY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Cloudflare Ray ID").expect("static pattern"));

// ============================================================================
// Error Page Classification
// ============================================================================

/// True if the document is a hosting-provider failure page rather than
/// salvaged wiki content.
pub fn is_error_page(doc: &Html) -> bool {
    let title_text = dom::select_first(doc, &TITLE)
        .map(dom::text_concat)
        .unwrap_or_default();
    if ERROR_TITLE_PATTERNS.iter().any(|p| p.is_match(&title_text)) {
        return true;
    }
    if dom::select_first(doc, &CF_WRAPPER).is_some() {
        return true;
    }
    doc.root_element().text().any(|t| CF_RAY_ID.is_match(t))
}

// ============================================================================
// Article Extraction
// ============================================================================

/// One extracted wiki page: display title, filtered body markup, and the
/// visible text used for the search index.
#[derive(Debug, Clone)]
pub struct ExtractedArticle {
    pub title: String,
    pub body_html: String,
    pub text: String,
}

/// Extract the article from a parsed snapshot, or `None` when the document
/// lacks a recognizable content region or heading.
///
/// Callers are expected to run [`is_error_page`] first; error pages often
/// still carry an `h1` and would otherwise extract as garbage articles.
pub fn extract_article(doc: &Html) -> Option<ExtractedArticle> {
    let content = dom::select_first(doc, &CONTENT_NESTED)
        .or_else(|| dom::select_first(doc, &CONTENT))
        .or_else(|| dom::select_first(doc, &BODY_CONTENT))?;
    let heading = dom::select_first(doc, &FIRST_HEADING)
        .or_else(|| dom::select_first(doc, &ANY_H1))?;

    let filter = SerializeFilter {
        skip: &is_page_chrome,
        rewrite_href: &flatten_local_href,
    };
    Some(ExtractedArticle {
        title: dom::text_concat(heading),
        body_html: dom::serialize(content, &filter),
        text: dom::visible_text(content, &is_page_chrome),
    })
}

/// Non-article UI inside the content region: jump-to-nav links, the print
/// footer, the category-links footer, and the table-of-contents box.
fn is_page_chrome(el: &Element) -> bool {
    matches!(el.id(), Some("jump-to-nav" | "catlinks"))
        || el.classes().any(|c| c == "printfooter" || c == "toc")
}

/// Flatten a local `.html` link to its base filename so it stays valid
/// once pages are regrouped into bucketed output directories. External
/// links pass through untouched.
fn flatten_local_href(href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return None;
    }
    if !href.ends_with(".html") {
        return None;
    }
    href.rsplit('/').next().map(str::to_owned)
}

/// Category names declared in the article's own footer links, normalized,
/// in document order.
pub fn inline_categories(doc: &Html) -> Vec<String> {
    doc.select(&CATLINKS)
        .filter_map(|a| a.value().attr("title"))
        .map(normalize_category_name)
        .collect()
}

// ============================================================================
// Dedicated Category Pages
// ============================================================================

/// Subcategories and member pages listed by a dedicated category page.
#[derive(Debug, Clone)]
pub struct CategoryListing {
    /// Canonical category name, `Category:` prefix stripped.
    pub name: String,
    pub subcategories: Vec<String>,
    pub pages: Vec<String>,
}

/// True if the document is a category-namespace page: the MediaWiki body
/// class marker, or a heading literally prefixed `Category:`.
pub fn is_category_page(doc: &Html) -> bool {
    if let Some(body) = dom::select_first(doc, &BODY) {
        if body.value().classes().any(|c| c.starts_with("ns-14")) {
            return true;
        }
    }
    dom::select_first(doc, &FIRST_HEADING)
        .map(|h1| dom::text_concat(h1).starts_with("Category:"))
        .unwrap_or(false)
}

/// Read a classified category page's own name and listings. `None` when
/// the page has no `firstHeading` to name it.
pub fn extract_category_listing(doc: &Html) -> Option<CategoryListing> {
    let heading = dom::select_first(doc, &FIRST_HEADING)?;
    let name = normalize_category_name(&dom::text_concat(heading));

    let subcategories = doc
        .select(&SUBCATEGORY_LINKS)
        .filter_map(|a| a.value().attr("title"))
        .map(normalize_category_name)
        .filter(|s| !s.is_empty())
        .collect();
    let pages = doc
        .select(&MEMBER_PAGE_LINKS)
        .filter_map(|a| a.value().attr("title"))
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();

    Some(CategoryListing { name, subcategories, pages })
}

// ============================================================================
// Tests
// ============================================================================
