//! Site configuration management for `arcwiki.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                            |
//! |-----------|----------------------------------------------------|
//! | `[base]`  | Site metadata (title, description)                 |
//! | `[build]` | Source roots, output dir, templates dir            |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Requiem Wiki (2009 Archive)"
//! description = "Rebuilt static archive of the 2009 Requiem Wiki."
//!
//! [build]
//! sources = ["mirror-a/wiki", "mirror-b/wiki"]
//! output = "site"
//! ```

use crate::cli::{Cli, Commands};
use anyhow::Result;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default values for config fields.
pub mod defaults {
    use std::path::PathBuf;

    pub mod base {
        pub fn title() -> String {
            "Wiki Archive".to_owned()
        }
        pub fn description() -> String {
            "Rebuilt static archive of a salvaged wiki.".to_owned()
        }
    }

    pub mod build {
        use super::PathBuf;

        pub fn output() -> PathBuf {
            "site".into()
        }
        pub fn templates() -> PathBuf {
            "templates".into()
        }
        pub fn root_index() -> bool {
            true
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

// ============================================================================
// Sections
// ============================================================================

/// `[base]` section - site metadata shown on the generated pages.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title used on the home pages.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// One-sentence description shown on the home page.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,
}

/// `[build]` section - where snapshots come from and where the site goes.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root, set from the CLI after loading.
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Snapshot source roots in priority order. The first root to produce
    /// a given article title wins.
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Site output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Templates directory (`page.html` plus an `assets/` subtree).
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Also write a companion `index.html` at the project root pointing
    /// into the site tree.
    #[serde(default = "defaults::build::root_index")]
    #[educe(Default = defaults::build::root_index())]
    pub root_index: bool,
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing arcwiki.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the project root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the project root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.set_root(&root);

        let Commands::Build { build_args } = &cli.command;
        if !build_args.source.is_empty() {
            self.build.sources = build_args.source.clone();
        }
        Self::update_option_field(&mut self.build.output, build_args.output.as_ref());
        Self::update_option_field(&mut self.build.templates, build_args.templates.as_ref());
        Self::update_option_field(&mut self.build.root_index, build_args.root_index.as_ref());
    }

    /// Validate config state before building
    pub fn validate(&self) -> Result<()> {
        if self.build.sources.is_empty() {
            return Err(ConfigError::Validation(
                "no snapshot source roots configured ([build].sources or --source)".to_owned(),
            )
            .into());
        }
        Ok(())
    }

    /// Source roots resolved against the project root, in priority order.
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        self.build
            .sources
            .iter()
            .map(|src| self.resolve(src))
            .collect()
    }

    /// Site output directory resolved against the project root.
    pub fn site_dir(&self) -> PathBuf {
        self.resolve(&self.build.output)
    }

    /// Templates directory resolved against the project root.
    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.build.templates)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.get_root().join(path)
        }
    }

    fn update_option_field<T: Clone>(field: &mut T, value: Option<&T>) {
        if let Some(value) = value {
            *field = value.clone();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_full() {
        let config = r#"
            [base]
            title = "Requiem Wiki (2009 Archive)"
            description = "Rebuilt static archive."

            [build]
            sources = ["a/wiki", "b/wiki"]
            output = "public"
            templates = "shell"
            root_index = false
        "#;
        let config = SiteConfig::from_str(config).unwrap();

        assert_eq!(config.base.title, "Requiem Wiki (2009 Archive)");
        assert_eq!(config.build.sources.len(), 2);
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.templates, PathBuf::from("shell"));
        assert!(!config.build.root_index);
    }

    #[test]
    fn test_config_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.base.title, "Wiki Archive");
        assert_eq!(config.build.output, PathBuf::from("site"));
        assert_eq!(config.build.templates, PathBuf::from("templates"));
        assert!(config.build.root_index);
        assert!(config.build.sources.is_empty());
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            unknown_field = "should_fail"
        "#;
        let result = SiteConfig::from_str(config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parsing error"));
    }

    #[test]
    fn test_validate_requires_sources() {
        let config = SiteConfig::from_str("").unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("source roots"));

        let with_sources = SiteConfig::from_str("[build]\nsources = [\"wiki\"]").unwrap();
        assert!(with_sources.validate().is_ok());
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let mut config = SiteConfig::from_str("[build]\nsources = [\"wiki\"]").unwrap();
        config.set_root(Path::new("/srv/archive"));
        assert_eq!(config.site_dir(), PathBuf::from("/srv/archive/site"));
        assert_eq!(config.source_dirs(), vec![PathBuf::from("/srv/archive/wiki")]);
        assert_eq!(config.templates_dir(), PathBuf::from("/srv/archive/templates"));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let mut config = SiteConfig::from_str("[build]\nsources = [\"/data/wiki\"]").unwrap();
        config.set_root(Path::new("/srv/archive"));
        assert_eq!(config.source_dirs(), vec![PathBuf::from("/data/wiki")]);
    }
}
