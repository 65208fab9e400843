// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::config::{DependencyGraph, DeployedNode, NodeIdentity};
use crate::observability::messages::validation::{
    DependencyMismatch, MissingDeployment, UnexpectedDeployment, ValidationCompleted,
    ValidationStarted,
};
use crate::observability::messages::StructuredLog;

/// A deployed parent whose required child version is not deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyError {
    pub parent: NodeIdentity,
    pub required: NodeIdentity,
    /// Deployed units of the same offering and flavor at another version
    pub alternatives: Vec<NodeIdentity>,
}

impl fmt::Display for DependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} requires {}", self.parent, self.required)?;
        if self.alternatives.is_empty() {
            write!(f, ", which is not deployed")
        } else {
            let found: Vec<String> = self.alternatives.iter().map(|a| a.to_string()).collect();
            write!(f, ", but found {} instead", found.join(", "))
        }
    }
}

/// Outcome of [`validate_dependencies`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub missing_configs: Vec<DeployedNode>,
    pub unexpected_configs: Vec<DeployedNode>,
    pub dependency_errors: Vec<DependencyError>,
    pub messages: Vec<String>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return writeln!(f, "Deployment is valid: every expected unit is deployed");
        }

        writeln!(f, "Deployment is NOT valid")?;
        if !self.missing_configs.is_empty() {
            writeln!(f, "Missing (expected, not deployed):")?;
            for node in &self.missing_configs {
                writeln!(f, "  - {}", node)?;
            }
        }
        if !self.unexpected_configs.is_empty() {
            writeln!(f, "Unexpected (deployed, not expected):")?;
            for node in &self.unexpected_configs {
                writeln!(f, "  - {}", node)?;
            }
        }
        if !self.dependency_errors.is_empty() {
            writeln!(f, "Dependency errors:")?;
            for error in &self.dependency_errors {
                writeln!(f, "  - {}", error)?;
            }
        }
        Ok(())
    }
}

/// Compares the expected dependency closure against what actually got deployed.
///
/// Pure and deterministic: findings are listed in input order and every list
/// is deduplicated by identity.
///
/// # Example
/// ```
/// use addon_closure::config::{DependencyGraph, DeployedNode, NodeIdentity};
/// use addon_closure::validation::validate_dependencies;
///
/// let kms = DeployedNode::new(NodeIdentity::new("kms", "v5.1.4", "basic"));
/// let result = validate_dependencies(&DependencyGraph::new(), &[kms.clone()], &[kms]);
///
/// assert!(result.is_valid);
/// ```
pub fn validate_dependencies(
    graph: &DependencyGraph,
    expected: &[DeployedNode],
    actual: &[DeployedNode],
) -> ValidationResult {
    let started = ValidationStarted {
        expected_count: expected.len(),
        actual_count: actual.len(),
    };
    let span = started.span("validate_dependencies");
    let _guard = span.enter();
    started.log();

    let expected_ids: HashSet<&NodeIdentity> = expected.iter().map(|n| &n.identity).collect();
    let actual_ids: HashSet<&NodeIdentity> = actual.iter().map(|n| &n.identity).collect();

    let missing_configs = unique(expected.iter().filter(|n| !actual_ids.contains(&n.identity)));
    let unexpected_configs = unique(actual.iter().filter(|n| !expected_ids.contains(&n.identity)));

    let mut dependency_errors = Vec::new();
    for (parent, child) in graph.edges() {
        if !actual_ids.contains(parent) || actual_ids.contains(&child.identity) {
            continue;
        }

        let mut alternatives: Vec<NodeIdentity> = Vec::new();
        for node in actual {
            let candidate = &node.identity;
            if candidate.same_offering_and_flavor(&child.identity)
                && candidate.version != child.identity.version
                && !alternatives.contains(candidate)
            {
                alternatives.push(candidate.clone());
            }
        }

        DependencyMismatch {
            parent,
            required: &child.identity,
            alternative_count: alternatives.len(),
        }
        .log();

        dependency_errors.push(DependencyError {
            parent: parent.clone(),
            required: child.identity.clone(),
            alternatives,
        });
    }

    let mut messages = Vec::new();
    for node in &missing_configs {
        MissingDeployment { identity: &node.identity }.log();
        messages.push(format!("missing: {} is expected but was not deployed", node));
    }
    for node in &unexpected_configs {
        UnexpectedDeployment { identity: &node.identity }.log();
        messages.push(format!("unexpected: {} was deployed but is not expected", node));
    }
    for error in &dependency_errors {
        messages.push(format!("dependency: {}", error));
    }

    let completed = ValidationCompleted {
        missing_count: missing_configs.len(),
        unexpected_count: unexpected_configs.len(),
        dependency_error_count: dependency_errors.len(),
    };
    completed.log();
    messages.push(completed.to_string());

    ValidationResult {
        is_valid: missing_configs.is_empty()
            && unexpected_configs.is_empty()
            && dependency_errors.is_empty(),
        missing_configs,
        unexpected_configs,
        dependency_errors,
        messages,
    }
}

fn unique<'a>(nodes: impl Iterator<Item = &'a DeployedNode>) -> Vec<DeployedNode> {
    let mut seen = HashSet::new();
    nodes
        .filter(|n| seen.insert(n.identity.clone()))
        .cloned()
        .collect()
}
