//! The category graph: named nodes with subcategory edges and member pages.
//!
//! Three independent signals enrich one graph: inline category footers
//! found during article extraction, dedicated category-listing pages, and
//! the curated title taxonomy. All writes are idempotent set unions, so a
//! category first seen as an inline link and later described by its own
//! listing page accumulates into a single node.
//!
//! Invariant: every subcategory name referenced by any node has a node of
//! its own (possibly empty), so rendering never dereferences a missing
//! key. [`CategoryGraph::add_subcategory`] maintains this on every edge
//! insert.
//!
//! Ordered collections throughout: the renderer walks the graph directly
//! and must produce identical bytes on identical input.

pub mod resolve;
pub mod taxonomy;

use std::collections::{BTreeMap, BTreeSet};

/// One category: its child categories and member article titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryNode {
    pub subcategories: BTreeSet<String>,
    pub pages: BTreeSet<String>,
}

/// Mapping from canonical category name to node.
#[derive(Debug, Clone, Default)]
pub struct CategoryGraph {
    nodes: BTreeMap<String, CategoryNode>,
}

impl CategoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node for `name`, created empty on first reference.
    pub fn ensure(&mut self, name: &str) -> &mut CategoryNode {
        self.nodes.entry(name.to_owned()).or_default()
    }

    /// Record `title` as a member page of `category`.
    pub fn add_member(&mut self, category: &str, title: &str) {
        self.ensure(category).pages.insert(title.to_owned());
    }

    /// Record `child` as a subcategory of `parent`, ensuring `child` has a
    /// node so the graph never holds a dangling reference.
    pub fn add_subcategory(&mut self, parent: &str, child: &str) {
        self.ensure(parent).subcategories.insert(child.to_owned());
        self.ensure(child);
    }

    pub fn get(&self, name: &str) -> Option<&CategoryNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CategoryNode)> {
        self.nodes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level categories: those no other category claims as a
    /// subcategory, case-insensitively sorted. When every category is
    /// somebody's child the full key set is returned instead, so the
    /// category index never renders empty.
    pub fn roots(&self) -> Vec<String> {
        let children: BTreeSet<&str> = self
            .nodes
            .values()
            .flat_map(|n| n.subcategories.iter().map(String::as_str))
            .collect();
        let mut roots: Vec<String> = self
            .nodes
            .keys()
            .filter(|name| !children.contains(name.as_str()))
            .cloned()
            .collect();
        if roots.is_empty() {
            roots = self.nodes.keys().cloned().collect();
        }
        roots.sort_by_key(|name| name.to_lowercase());
        roots
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_creates_empty_node_once() {
        let mut graph = CategoryGraph::new();
        graph.ensure("Weapons");
        graph.ensure("Weapons");
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("Weapons"), Some(&CategoryNode::default()));
    }

    #[test]
    fn test_add_member_is_idempotent() {
        let mut graph = CategoryGraph::new();
        graph.add_member("Weapons", "Long Sword");
        graph.add_member("Weapons", "Long Sword");
        let node = graph.get("Weapons").unwrap();
        assert_eq!(node.pages.len(), 1);
        assert!(node.pages.contains("Long Sword"));
    }

    #[test]
    fn test_add_subcategory_ensures_child_node() {
        let mut graph = CategoryGraph::new();
        graph.add_subcategory("Equipment", "Shields");
        assert!(graph.contains("Shields"));
        assert!(graph.get("Equipment").unwrap().subcategories.contains("Shields"));
    }

    #[test]
    fn test_no_dangling_subcategory_references() {
        let mut graph = CategoryGraph::new();
        graph.add_subcategory("A", "B");
        graph.add_subcategory("B", "C");
        graph.add_subcategory("A", "D");
        for (_, node) in graph.iter() {
            for sub in &node.subcategories {
                assert!(graph.contains(sub), "dangling reference to {sub}");
            }
        }
    }

    #[test]
    fn test_three_signal_sources_union_into_one_node() {
        let mut graph = CategoryGraph::new();
        // inline signal
        graph.add_member("Weapons", "Long Sword");
        // dedicated category page
        graph.add_subcategory("Weapons", "Swords");
        graph.add_member("Weapons", "Short Sword");
        // curated rule
        graph.add_member("Weapons", "Long Sword");
        let node = graph.get("Weapons").unwrap();
        assert_eq!(node.pages.len(), 2);
        assert_eq!(node.subcategories.len(), 1);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_roots_excludes_children() {
        let mut graph = CategoryGraph::new();
        graph.add_subcategory("Equipment", "Shields");
        graph.ensure("Quests");
        assert_eq!(graph.roots(), vec!["Equipment", "Quests"]);
    }

    #[test]
    fn test_roots_fall_back_to_all_when_cyclic() {
        let mut graph = CategoryGraph::new();
        graph.add_subcategory("A", "B");
        graph.add_subcategory("B", "A");
        assert_eq!(graph.roots(), vec!["A", "B"]);
    }

    #[test]
    fn test_roots_sorted_case_insensitively() {
        let mut graph = CategoryGraph::new();
        graph.ensure("beta");
        graph.ensure("Alpha");
        graph.ensure("GAMMA");
        assert_eq!(graph.roots(), vec!["Alpha", "beta", "GAMMA"]);
    }
}
