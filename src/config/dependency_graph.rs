use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::config::{DeployedNode, NodeIdentity};

/// Newtype wrapper for the resolved dependency graph.
///
/// Maps each resolved unit to the ordered list of children it requires.
/// Every processed unit has an entry, leaves included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph(pub BTreeMap<NodeIdentity, Vec<DeployedNode>>);

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Register a node with no children yet
    pub fn add_node(&mut self, node: NodeIdentity) {
        self.0.entry(node).or_default();
    }

    /// Add a parent -> child edge; repeated edges are ignored
    pub fn add_edge(&mut self, parent: &NodeIdentity, child: DeployedNode) {
        let children = self.0.entry(parent.clone()).or_default();
        if !children.iter().any(|c| c.identity == child.identity) {
            children.push(child);
        }
    }

    /// Get the children of a node
    pub fn children(&self, node: &NodeIdentity) -> Option<&Vec<DeployedNode>> {
        self.0.get(node)
    }

    /// Iterate over (parent, child) pairs in a stable order
    pub fn edges(&self) -> impl Iterator<Item = (&NodeIdentity, &DeployedNode)> {
        self.0
            .iter()
            .flat_map(|(parent, children)| children.iter().map(move |c| (parent, c)))
    }

    /// Get all node identities in the graph
    pub fn keys(&self) -> impl Iterator<Item = &NodeIdentity> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k.key(), v)))
    }
}

impl From<BTreeMap<NodeIdentity, Vec<DeployedNode>>> for DependencyGraph {
    fn from(graph: BTreeMap<NodeIdentity, Vec<DeployedNode>>) -> Self {
        Self(graph)
    }
}

impl From<DependencyGraph> for BTreeMap<NodeIdentity, Vec<DeployedNode>> {
    fn from(graph: DependencyGraph) -> Self {
        graph.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, version: &str) -> DeployedNode {
        DeployedNode::new(NodeIdentity::new(name, version, "basic"))
    }

    #[test]
    fn test_add_edge_deduplicates_children() {
        let parent = NodeIdentity::new("root", "1.0.0", "basic");
        let mut graph = DependencyGraph::new();

        graph.add_edge(&parent, node("kms", "1.0.0"));
        graph.add_edge(&parent, node("kms", "1.0.0"));
        graph.add_edge(&parent, node("kms", "2.0.0"));

        assert_eq!(graph.children(&parent).unwrap().len(), 2);
        assert_eq!(graph.edges().count(), 2);
    }

    #[test]
    fn test_add_node_keeps_existing_children() {
        let parent = NodeIdentity::new("root", "1.0.0", "basic");
        let mut graph = DependencyGraph::new();

        graph.add_edge(&parent, node("kms", "1.0.0"));
        graph.add_node(parent.clone());

        assert_eq!(graph.children(&parent).unwrap().len(), 1);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_serializes_with_stable_keys() {
        let parent = NodeIdentity::new("root", "1.0.0", "basic");
        let mut graph = DependencyGraph::new();
        graph.add_edge(&parent, node("kms", "1.0.0"));

        let json = serde_json::to_value(&graph).unwrap();
        assert!(json.get("root|1.0.0|basic").is_some());
    }
}
