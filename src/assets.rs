//! Static asset copying.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copy `templates/assets/*` into `<site>/assets/`, preserving the
/// directory layout. Missing source directory is fine — the embedded
/// template degrades to unstyled pages.
pub fn copy_assets(templates_dir: &Path, site_dir: &Path) -> Result<()> {
    let src = templates_dir.join("assets");
    if !src.is_dir() {
        return Ok(());
    }
    let dest_root = site_dir.join("assets");

    for entry in WalkDir::new(&src).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(&src)
            .context("asset path outside assets directory")?;
        let dest = dest_root.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(entry.path(), &dest)
            .with_context(|| format!("Failed to copy asset to {}", dest.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_assets_preserves_layout() {
        let tmp = TempDir::new().unwrap();
        let templates = tmp.path().join("templates");
        let site = tmp.path().join("site");
        fs::create_dir_all(templates.join("assets/fonts")).unwrap();
        fs::write(templates.join("assets/style.css"), "body{}").unwrap();
        fs::write(templates.join("assets/fonts/mono.woff2"), "x").unwrap();

        copy_assets(&templates, &site).unwrap();

        assert_eq!(fs::read_to_string(site.join("assets/style.css")).unwrap(), "body{}");
        assert!(site.join("assets/fonts/mono.woff2").is_file());
    }

    #[test]
    fn test_copy_assets_missing_source_is_ok() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        copy_assets(&tmp.path().join("nope"), &site).unwrap();
        assert!(!site.join("assets").exists());
    }
}
