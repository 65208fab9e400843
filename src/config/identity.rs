// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity of one deployable unit: offering name, resolved version and flavor.
///
/// Two nodes are the same deployable unit if and only if all three fields are
/// equal. The same offering at a different version is a distinct unit, so
/// `account-base@v3.0.11` and `account-base@v3.0.7` may both be expected.
///
/// # Examples
///
/// ```
/// use addon_closure::config::NodeIdentity;
///
/// let a = NodeIdentity::new("kms", "v5.1.4", "fully-configurable");
/// let b = NodeIdentity::new("kms", "v5.1.4", "fully-configurable");
/// let c = NodeIdentity::new("kms", "v5.1.3", "fully-configurable");
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert_eq!(a.key(), "kms|v5.1.4|fully-configurable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIdentity {
    pub name: String,
    pub version: String,
    pub flavor: String,
}

impl NodeIdentity {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        flavor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            flavor: flavor.into(),
        }
    }

    /// Stable string encoding, usable as a map key in serialized output.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.name, self.version, self.flavor)
    }

    /// True when `other` is the same offering packaged with the same flavor.
    pub fn same_offering_and_flavor(&self, other: &NodeIdentity) -> bool {
        self.name == other.name && self.flavor == other.flavor
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.flavor)
    }
}

/// A record bearing a [`NodeIdentity`] plus the catalog coordinates it was
/// resolved from.
///
/// Observed (actually deployed) records often only know the identity, so the
/// catalog coordinates default to empty strings when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedNode {
    #[serde(flatten)]
    pub identity: NodeIdentity,
    #[serde(default)]
    pub catalog_id: String,
    #[serde(default)]
    pub offering_id: String,
    #[serde(default)]
    pub version_locator: String,
}

impl DeployedNode {
    pub fn new(identity: NodeIdentity) -> Self {
        Self {
            identity,
            catalog_id: String::new(),
            offering_id: String::new(),
            version_locator: String::new(),
        }
    }

    pub fn with_catalog(
        mut self,
        catalog_id: impl Into<String>,
        offering_id: impl Into<String>,
        version_locator: impl Into<String>,
    ) -> Self {
        self.catalog_id = catalog_id.into();
        self.offering_id = offering_id.into();
        self.version_locator = version_locator.into();
        self
    }
}

impl fmt::Display for DeployedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_equality_is_all_three_fields() {
        let base = NodeIdentity::new("account-base", "v3.0.11", "standard");

        assert_eq!(base, NodeIdentity::new("account-base", "v3.0.11", "standard"));
        assert_ne!(base, NodeIdentity::new("account-base", "v3.0.7", "standard"));
        assert_ne!(base, NodeIdentity::new("account-base", "v3.0.11", "minimal"));
        assert_ne!(base, NodeIdentity::new("kms", "v3.0.11", "standard"));
    }

    #[test]
    fn test_identity_hashes_structurally() {
        let mut set = HashSet::new();
        set.insert(NodeIdentity::new("kms", "v5.1.4", "basic"));
        set.insert(NodeIdentity::new("kms", "v5.1.4", "basic"));
        set.insert(NodeIdentity::new("kms", "v5.1.4", "premium"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_key_does_not_collide_on_separator_placement() {
        // naive concatenation would make these identical
        let a = NodeIdentity::new("a-b", "c", "d");
        let b = NodeIdentity::new("a", "b-c", "d");

        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_deployed_node_deserializes_identity_only() {
        let yaml = "name: kms\nversion: v5.1.4\nflavor: basic\n";
        let node: DeployedNode = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(node.identity, NodeIdentity::new("kms", "v5.1.4", "basic"));
        assert!(node.version_locator.is_empty());
    }

    #[test]
    fn test_display() {
        let id = NodeIdentity::new("kms", "v5.1.4", "basic");
        assert_eq!(id.to_string(), "kms@v5.1.4 (basic)");
    }
}
