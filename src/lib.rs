//! Arcwiki - rebuilds a browsable static site from salvaged wiki HTML
//! snapshots.
//!
//! Raw snapshot trees mix real wiki pages with hosting-provider error
//! pages and inconsistent category tagging. One batch run classifies and
//! extracts the usable articles, merges three category signals (inline
//! footer links, dedicated category pages, curated title rules) into a
//! single graph, and renders a self-contained cross-linked site: article
//! pages, category pages, an A–Z index, a category index, and a
//! client-side search index.

pub mod assets;
pub mod build;
pub mod cli;
pub mod config;
pub mod dom;
pub mod extract;
pub mod generator;
pub mod graph;
pub mod logger;
pub mod template;
pub mod utils;
