//! Title-to-filename transliteration and category name handling.
//!
//! Every page and category file name in the output tree is derived from a
//! display title through `to_safe_name`, so links between generated pages
//! can be computed from titles alone.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of characters that are not filesystem/URL safe.
static UNSAFE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("static pattern"));

// ============================================================================
// Safe Names
// ============================================================================

/// Map a display title to a filesystem-safe name.
///
/// Each run of unsafe characters collapses to a single underscore; leading
/// and trailing underscores are trimmed. An empty result falls back to
/// `"page"`. Distinct titles can collide after transliteration — collisions
/// are not detected, the last writer wins on disk.
pub fn to_safe_name(title: &str) -> String {
    let safe = UNSAFE_RUNS.replace_all(title, "_");
    let safe = safe.trim_matches('_');
    if safe.is_empty() {
        "page".to_owned()
    } else {
        safe.to_owned()
    }
}

/// Strip the `Category:` namespace prefix (exact match) and trim whitespace.
pub fn normalize_category_name(name: &str) -> String {
    name.strip_prefix("Category:").unwrap_or(name).trim().to_owned()
}

/// Output file name for a category page.
pub fn category_output_filename(category_name: &str) -> String {
    let base = to_safe_name(&format!("Category_{category_name}"));
    format!("{base}.html")
}

/// Directory bucket for an article file, by first character of its safe
/// name: `A`–`Z`, or a `0-9` catch-all. Keeps any single output directory
/// from accumulating thousands of files.
pub fn page_bucket(safe_name: &str) -> String {
    match safe_name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase().to_string(),
        _ => "0-9".to_owned(),
    }
}

// ============================================================================
// Tests
// ============================================================================
