//! The fixed page template every output file goes through.
//!
//! One template, four placeholders: `{{TITLE}}`, `{{BODY}}`,
//! `{{ASSET_PREFIX}}`, `{{BREADCRUMBS}}`. A `page.html` in the configured
//! templates directory overrides the compiled-in default, so an archive
//! can restyle its shell without rebuilding the binary.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Compiled-in fallback shell.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/page.html");

/// Loaded page template.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    template: String,
}

impl PageTemplate {
    /// Load `page.html` from the templates directory, falling back to the
    /// embedded default when the directory carries none.
    pub fn load(templates_dir: &Path) -> Result<Self> {
        let path = templates_dir.join("page.html");
        let template = if path.is_file() {
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template {}", path.display()))?
        } else {
            DEFAULT_TEMPLATE.to_owned()
        };
        Ok(Self { template })
    }

    /// Build a template from markup directly.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self { template: markup.into() }
    }

    /// Substitute the four placeholders.
    pub fn render(&self, title: &str, body: &str, asset_prefix: &str, breadcrumbs: &str) -> String {
        self.template
            .replace("{{TITLE}}", title)
            .replace("{{BODY}}", body)
            .replace("{{ASSET_PREFIX}}", asset_prefix)
            .replace("{{BREADCRUMBS}}", breadcrumbs)
    }

    /// Render and write a page, creating parent directories as needed.
    pub fn write_page(
        &self,
        path: &Path,
        title: &str,
        body: &str,
        asset_prefix: &str,
        breadcrumbs: &str,
    ) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let html = self.render(title, body, asset_prefix, breadcrumbs);
        fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Relative prefix that climbs from a site-relative URL back to the site
/// root: one `../` per directory level.
pub fn asset_prefix_for(site_relative_url: &str) -> String {
    let depth = site_relative_url.split('/').count().saturating_sub(1);
    "../".repeat(depth)
}

// ============================================================================
// Tests
// ============================================================================
