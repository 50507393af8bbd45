//! Arcwiki CLI entry point.

use anyhow::Result;
use arcwiki::build::build_site;
use arcwiki::cli::{Cli, Commands};
use arcwiki::config::SiteConfig;
use clap::Parser;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error by itself — source roots can
/// come entirely from `--source` — but validation must pass either way.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(&cli);
    config.validate()?;
    Ok(config)
}
