//! Narrow HTML document capabilities over `scraper`.
//!
//! The extraction pipeline needs exactly five operations from its parsing
//! substrate: parse, first-match selection, attribute reads, text
//! extraction, and re-serialization with some subtrees removed and some
//! links rewritten. Everything here returns typed `Option`s; "not found"
//! is an outcome, never a panic.
//!
//! Removal and rewriting happen *during* serialization: the parsed tree is
//! never mutated, a serializer walk simply skips pruned subtrees and maps
//! anchor `href` values on the way out. Output is this crate's own
//! normalized serialization, identical across runs for identical input.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use std::fs;
use std::io;
use std::path::Path;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// ============================================================================
// Parsing and Selection
// ============================================================================

/// Parse a selector literal known at compile time.
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// First element matching `sel`, if any.
pub fn select_first<'a>(doc: &'a Html, sel: &Selector) -> Option<ElementRef<'a>> {
    doc.select(sel).next()
}

/// Read a file as markup, replacing invalid UTF-8 instead of failing.
/// Salvaged snapshots carry mixed encodings; a mangled character is better
/// than a dropped page.
pub fn read_markup(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ============================================================================
// Text Extraction
// ============================================================================

/// Concatenated text of an element, each fragment trimmed.
/// Used for titles and headings.
pub fn text_concat(el: ElementRef) -> String {
    let mut out = String::new();
    for fragment in el.text() {
        out.push_str(fragment.trim());
    }
    out
}

/// Visible text of an element, fragments trimmed and space-joined, with
/// subtrees matching `skip` excluded. Used for the search index.
pub fn visible_text(el: ElementRef, skip: &dyn Fn(&Element) -> bool) -> String {
    let mut fragments = Vec::new();
    collect_text(*el, skip, &mut fragments);
    fragments.join(" ")
}

fn collect_text(node: NodeRef<'_, Node>, skip: &dyn Fn(&Element) -> bool, out: &mut Vec<String>) {
    match node.value() {
        Node::Element(el) => {
            if skip(el) {
                return;
            }
            for child in node.children() {
                collect_text(child, skip, out);
            }
        }
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_owned());
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, skip, out);
            }
        }
    }
}

// ============================================================================
// Filtered Serialization
// ============================================================================

/// What to drop and what to rewrite while serializing.
pub struct SerializeFilter<'a> {
    /// Subtrees rooted at a matching element are omitted entirely.
    pub skip: &'a dyn Fn(&Element) -> bool,
    /// Maps an anchor `href` value; `None` leaves it unchanged.
    pub rewrite_href: &'a dyn Fn(&str) -> Option<String>,
}

/// Serialize an element (tag included) applying the filter.
pub fn serialize(el: ElementRef, filter: &SerializeFilter) -> String {
    let mut out = String::new();
    write_node(*el, filter, &mut out);
    out
}

fn write_node(node: NodeRef<'_, Node>, filter: &SerializeFilter, out: &mut String) {
    match node.value() {
        Node::Element(el) => {
            if (filter.skip)(el) {
                return;
            }
            let name = el.name();
            out.push('<');
            out.push_str(name);
            for (attr, value) in el.attrs() {
                let rewritten = if name == "a" && attr == "href" {
                    (filter.rewrite_href)(value)
                } else {
                    None
                };
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                out.push_str(&escape_attr(rewritten.as_deref().unwrap_or(value)));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            for child in node.children() {
                write_node(child, filter, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        // Document/fragment wrappers and doctypes contribute children only.
        _ => {
            for child in node.children() {
                write_node(child, filter, out);
            }
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

/// Escape text for inclusion in generated markup (labels in listings).
pub fn escape_html(s: &str) -> String {
    escape_text(s)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn keep_all(_: &Element) -> bool {
        false
    }

    fn no_rewrite(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_select_first_hit_and_miss() {
        let doc = Html::parse_document("<div id='content'><p>hi</p></div>");
        let sel = selector("#content");
        assert!(select_first(&doc, &sel).is_some());
        let missing = selector("#nothing");
        assert!(select_first(&doc, &missing).is_none());
    }

    #[test]
    fn test_text_concat_trims_fragments() {
        let doc = Html::parse_document("<h1>  Long\n  <i>Sword</i>  </h1>");
        let el = select_first(&doc, &selector("h1")).unwrap();
        assert_eq!(text_concat(el), "LongSword");
    }

    #[test]
    fn test_visible_text_space_joined() {
        let doc = Html::parse_document("<div><p>alpha</p><p>beta  gamma</p></div>");
        let el = select_first(&doc, &selector("div")).unwrap();
        assert_eq!(visible_text(el, &keep_all), "alpha beta  gamma");
    }

    #[test]
    fn test_visible_text_skips_filtered_subtree() {
        let doc = Html::parse_document("<div><p>keep</p><nav id='skipme'>drop</nav></div>");
        let el = select_first(&doc, &selector("div")).unwrap();
        let skip = |e: &Element| e.id() == Some("skipme");
        assert_eq!(visible_text(el, &skip), "keep");
    }

    #[test]
    fn test_serialize_round_structure() {
        let doc = Html::parse_document("<div class=\"x\"><p>a &amp; b</p></div>");
        let el = select_first(&doc, &selector("div")).unwrap();
        let filter = SerializeFilter { skip: &keep_all, rewrite_href: &no_rewrite };
        assert_eq!(serialize(el, &filter), "<div class=\"x\"><p>a &amp; b</p></div>");
    }

    #[test]
    fn test_serialize_drops_skipped_elements() {
        let doc = Html::parse_document("<div><span>keep</span><ul id='toc-list'>drop</ul></div>");
        let el = select_first(&doc, &selector("div")).unwrap();
        let skip = |e: &Element| e.id() == Some("toc-list");
        let filter = SerializeFilter { skip: &skip, rewrite_href: &no_rewrite };
        assert_eq!(serialize(el, &filter), "<div><span>keep</span></div>");
    }

    #[test]
    fn test_serialize_rewrites_anchor_href_only() {
        let doc = Html::parse_document(
            "<div><a href=\"sub/Page.html\">x</a><img src=\"sub/pic.png\"></div>",
        );
        let el = select_first(&doc, &selector("div")).unwrap();
        let rewrite = |href: &str| href.rsplit('/').next().map(str::to_owned);
        let filter = SerializeFilter { skip: &keep_all, rewrite_href: &rewrite };
        let html = serialize(el, &filter);
        assert!(html.contains("<a href=\"Page.html\">x</a>"));
        assert!(html.contains("<img src=\"sub/pic.png\">"));
    }

    #[test]
    fn test_serialize_void_elements_have_no_close_tag() {
        let doc = Html::parse_document("<div>a<br>b</div>");
        let el = select_first(&doc, &selector("div")).unwrap();
        let filter = SerializeFilter { skip: &keep_all, rewrite_href: &no_rewrite };
        assert_eq!(serialize(el, &filter), "<div>a<br>b</div>");
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(escape_attr(r#"a"b&c"#), "a&quot;b&amp;c");
    }
}
