//! Home page and companion root index.

use crate::config::SiteConfig;
use crate::template::PageTemplate;
use anyhow::Result;

/// Write the site home page.
pub fn write_home(config: &SiteConfig, template: &PageTemplate) -> Result<()> {
    let body = home_body(&config.base.description, "");
    template.write_page(&config.site_dir().join("index.html"), &config.base.title, &body, "", "")
}

/// Write the companion `index.html` at the project root, pointing into
/// the site tree. Useful when the repository root itself is served.
pub fn write_root_index(config: &SiteConfig, template: &PageTemplate) -> Result<()> {
    let site_name = config
        .build
        .output
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("site");
    let prefix = format!("{site_name}/");
    let body = home_body(&config.base.description, &prefix);
    template.write_page(
        &config.get_root().join("index.html"),
        &config.base.title,
        &body,
        &prefix,
        "",
    )
}

fn home_body(description: &str, link_prefix: &str) -> String {
    format!(
        "<div class=\"home\">\
         <p>{description} Use the search box above, or browse:</p>\
         <ul>\
         <li><a href=\"{link_prefix}A-Z.html\">A–Z Index</a></li>\
         <li><a href=\"{link_prefix}Categories.html\">Categories</a></li>\
         </ul>\
         </div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_body_links() {
        let body = home_body("An archive.", "");
        assert!(body.contains("<a href=\"A-Z.html\">"));
        assert!(body.contains("<a href=\"Categories.html\">"));
        assert!(body.contains("An archive."));
    }

    #[test]
    fn test_home_body_prefixed_links() {
        let body = home_body("d", "site/");
        assert!(body.contains("<a href=\"site/A-Z.html\">"));
        assert!(body.contains("<a href=\"site/Categories.html\">"));
    }
}
