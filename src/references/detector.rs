// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Circular and unresolved reference detection over pending configurations.
//!
//! A pending configuration whose input references another pending
//! configuration must wait for it. When those waits form a closed chain the
//! deployment cannot be scheduled. Detection is mode-free: whether a finding is
//! fatal or a warning is the caller's decision.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::observability::messages::references::{
    CircularReferenceDetected, CycleDetectionStarted, MalformedReferenceIgnored,
    UnresolvedReference,
};
use crate::observability::messages::StructuredLog;
use crate::references::{find_cycles, ConfigDependencyInfo, Reference, ReferenceKind};

/// One step of a cycle: `source`'s input `input_field` reads `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleHop {
    pub source_id: String,
    pub source_name: String,
    pub input_field: String,
    pub kind: ReferenceKind,
    pub target_id: String,
    pub target_name: String,
    /// Field read on the target
    pub target_field: String,
}

impl fmt::Display for CycleHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}:{} → {} (reads {}.{})",
            self.source_name,
            self.kind,
            self.input_field,
            self.target_name,
            self.kind,
            self.target_field
        )
    }
}

/// A closed chain of references among pending configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub hops: Vec<CycleHop>,
}

impl Cycle {
    /// Configuration names along the chain, closed back to the start.
    pub fn chain(&self) -> Vec<&str> {
        let mut chain: Vec<&str> = self.hops.iter().map(|h| h.source_name.as_str()).collect();
        if let Some(first) = self.hops.first() {
            chain.push(first.source_name.as_str());
        }
        chain
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.hops.len() == 1 {
            "configuration"
        } else {
            "configurations"
        };
        writeln!(
            f,
            "CIRCULAR DEPENDENCY DETECTED ({} {})",
            self.hops.len(),
            noun
        )?;
        for hop in &self.hops {
            writeln!(f, "  {}", hop)?;
        }
        writeln!(f, "Resolution:")?;
        writeln!(
            f,
            "  - Break one of the edges above by removing the reference or restructuring the inputs."
        )?;
        write!(
            f,
            "  - Move the shared value into a configuration that neither side depends on."
        )
    }
}

/// Label of the first reference found from one pending configuration to another
struct EdgeLabel {
    reference: Reference,
    input_field: String,
}

/// Finds reference cycles among pending configurations.
///
/// Only references that parse and point at another pending configuration are
/// edges; malformed references and references to anything else are ignored.
pub fn find_circular_references(pending: &[ConfigDependencyInfo]) -> Vec<Cycle> {
    let mut by_id: BTreeMap<&str, &ConfigDependencyInfo> = BTreeMap::new();
    for config in pending {
        by_id.entry(config.id.as_str()).or_insert(config);
    }

    let mut graph: BTreeMap<&str, BTreeSet<&str>> =
        by_id.keys().map(|id| (*id, BTreeSet::new())).collect();
    let mut labels: BTreeMap<(&str, &str), EdgeLabel> = BTreeMap::new();

    for &config in by_id.values() {
        for raw in &config.references {
            let Some(reference) = Reference::parse(raw) else {
                MalformedReferenceIgnored {
                    config_name: &config.name,
                    reference: raw,
                }
                .log();
                continue;
            };
            let Some((&target, _)) = by_id.get_key_value(reference.config_id.as_str()) else {
                continue;
            };

            let source = config.id.as_str();
            if let Some(successors) = graph.get_mut(source) {
                successors.insert(target);
            }
            labels.entry((source, target)).or_insert_with(|| EdgeLabel {
                input_field: config.find_input_field_name(raw).to_string(),
                reference,
            });
        }
    }

    CycleDetectionStarted {
        pending_count: by_id.len(),
        edge_count: labels.len(),
    }
    .log();

    find_cycles(&graph)
        .into_iter()
        .map(|ids| {
            let hops = ids
                .iter()
                .enumerate()
                .filter_map(|(i, source)| {
                    let target = ids[(i + 1) % ids.len()];
                    let label = labels.get(&(*source, target))?;
                    Some(CycleHop {
                        source_id: source.to_string(),
                        source_name: by_id.get(source)?.name.clone(),
                        input_field: label.input_field.clone(),
                        kind: label.reference.kind,
                        target_id: target.to_string(),
                        target_name: by_id.get(target)?.name.clone(),
                        target_field: label.reference.field.clone(),
                    })
                })
                .collect();
            Cycle { hops }
        })
        .inspect(|cycle| CircularReferenceDetected { chain: &cycle.chain() }.log())
        .collect()
}

/// Detects cycles and renders each one as a human-readable report.
///
/// Returns an empty list when there is nothing pending or no reference edges.
///
/// ```
/// use addon_closure::references::{detect_circular_dependencies, ConfigDependencyInfo};
///
/// let vpc = ConfigDependencyInfo::new("vpc", "VPC")
///     .with_input("cluster_id", "ref:/configs/cluster/outputs/id");
/// let cluster = ConfigDependencyInfo::new("cluster", "Cluster")
///     .with_input("vpc_id", "ref:/configs/vpc/outputs/vpc_id");
///
/// let cycles = detect_circular_dependencies(&[vpc, cluster]);
///
/// assert_eq!(cycles.len(), 1);
/// assert!(cycles[0].contains("VPC.outputs:cluster_id → Cluster"));
/// ```
pub fn detect_circular_dependencies(pending: &[ConfigDependencyInfo]) -> Vec<String> {
    find_circular_references(pending)
        .iter()
        .map(|cycle| cycle.to_string())
        .collect()
}

/// Flags references whose target configuration is not in `existing`.
///
/// `existing` should hold the ids of every configuration that exists,
/// including the pending ones. Each message names the referencing
/// configuration, its input and the missing id.
pub fn find_unresolved_references(
    pending: &[ConfigDependencyInfo],
    existing: &BTreeSet<String>,
) -> Vec<String> {
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut findings = Vec::new();

    for config in pending {
        for raw in &config.references {
            let Some(reference) = Reference::parse(raw) else {
                continue;
            };
            if existing.contains(&reference.config_id) || !seen.insert((config.id.as_str(), raw.as_str())) {
                continue;
            }

            UnresolvedReference {
                config_name: &config.name,
                missing_id: &reference.config_id,
                reference: raw,
            }
            .log();

            findings.push(format!(
                "Configuration '{}' (id '{}') input '{}' references configuration '{}' which does not exist ({})",
                config.name,
                config.id,
                config.find_input_field_name(raw),
                reference.config_id,
                raw
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(id: &str, name: &str, inputs: &[(&str, &str)]) -> ConfigDependencyInfo {
        inputs
            .iter()
            .fold(ConfigDependencyInfo::new(id, name), |c, (field, reference)| {
                c.with_input(*field, *reference)
            })
    }

    #[test]
    fn test_no_pending_configs() {
        assert!(detect_circular_dependencies(&[]).is_empty());
    }

    #[test]
    fn test_no_reference_edges() {
        let pending = vec![config("a", "A", &[]), config("b", "B", &[])];
        assert!(detect_circular_dependencies(&pending).is_empty());
    }

    #[test]
    fn test_mutual_reference_renders_real_field_names() {
        let pending = vec![
            config("a", "Alpha", &[("subnet_input", "ref:/configs/b/outputs/subnet_id")]),
            config("b", "Beta", &[("cluster_input", "ref:/configs/a/outputs/cluster_id")]),
        ];

        let cycles = detect_circular_dependencies(&pending);

        assert_eq!(cycles.len(), 1);
        let text = &cycles[0];
        assert!(text.contains("CIRCULAR DEPENDENCY DETECTED (2 configurations)"));
        assert!(text.contains("Alpha.outputs:subnet_input → Beta"));
        assert!(text.contains("Beta.outputs:cluster_input → Alpha"));
        assert!(!text.contains("unknown_input"));
        assert!(text.contains("Resolution:"));
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let pending = vec![config("a", "Alpha", &[("seed", "ref:/configs/a/outputs/value")])];

        let cycles = find_circular_references(&pending);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].hops.len(), 1);
        assert_eq!(cycles[0].chain(), vec!["Alpha", "Alpha"]);
        assert!(cycles[0].to_string().contains("(1 configuration)"));
    }

    #[test]
    fn test_external_references_are_not_cycles() {
        let pending = vec![config("a", "Alpha", &[("vpc", "ref:/configs/deployed-vpc/outputs/id")])];

        assert!(detect_circular_dependencies(&pending).is_empty());
    }

    #[test]
    fn test_malformed_references_are_ignored() {
        let pending = vec![
            config("a", "Alpha", &[("x", "ref:/configs/b/bogus/id")]),
            config("b", "Beta", &[("y", "ref:/configs/a/outputs/id")]),
        ];

        assert!(detect_circular_dependencies(&pending).is_empty());
    }

    #[test]
    fn test_inputs_kind_is_rendered() {
        let pending = vec![
            config("a", "Alpha", &[("region", "ref:/configs/b/inputs/region")]),
            config("b", "Beta", &[("zone", "ref:/configs/a/outputs/zone")]),
        ];

        let cycles = find_circular_references(&pending);

        assert_eq!(cycles[0].hops[0].kind, ReferenceKind::Inputs);
        assert!(cycles[0].to_string().contains("Alpha.inputs:region → Beta"));
    }

    #[test]
    fn test_first_reference_in_input_order_labels_the_hop() {
        let inputs = serde_json::json!({
            "primary_vpc": "ref:/configs/b/outputs/vpc_id",
            "backup_vpc": "ref:/configs/b/outputs/backup_id"
        });
        let pending = vec![
            ConfigDependencyInfo::from_inputs("a", "Alpha", inputs.as_object().unwrap()),
            config("b", "Beta", &[("peer", "ref:/configs/a/outputs/id")]),
        ];

        let cycles = find_circular_references(&pending);

        assert_eq!(cycles[0].hops[0].input_field, "primary_vpc");
        assert_eq!(cycles[0].hops[0].target_field, "vpc_id");
    }

    #[test]
    fn test_three_node_chain_order() {
        let pending = vec![
            config("a", "A", &[("to_b", "ref:/configs/b/outputs/o")]),
            config("b", "B", &[("to_c", "ref:/configs/c/outputs/o")]),
            config("c", "C", &[("to_a", "ref:/configs/a/outputs/o")]),
        ];

        let cycles = find_circular_references(&pending);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].chain(), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_unresolved_reference_names_both_sides() {
        let pending = vec![config("a", "Alpha", &[("vpc_id", "ref:/configs/ghost/outputs/vpc_id")])];
        let existing: BTreeSet<String> = ["a".to_string()].into_iter().collect();

        let findings = find_unresolved_references(&pending, &existing);

        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("Alpha"));
        assert!(findings[0].contains("'ghost'"));
        assert!(findings[0].contains("vpc_id"));
    }

    #[test]
    fn test_existing_references_are_resolved() {
        let pending = vec![
            config("a", "Alpha", &[("vpc_id", "ref:/configs/vpc/outputs/vpc_id")]),
            config("b", "Beta", &[("x", "ref:/configs/a/outputs/x"), ("bad", "not-a-ref")]),
        ];
        let existing: BTreeSet<String> = ["a", "b", "vpc"].iter().map(|s| s.to_string()).collect();

        assert!(find_unresolved_references(&pending, &existing).is_empty());
    }
}
