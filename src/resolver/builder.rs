// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Recursive dependency graph builder.
//!
//! Expands a root addon into the full set of units that should be deployed.
//! The build runs in two passes:
//!
//! 1. **Global disable scan**: every `enabled: false` override anywhere in the
//!    caller's override tree disables that offering everywhere.
//! 2. **Traversal**: depth-first over catalog-declared dependencies, deciding
//!    per edge whether to follow it (see [`decide`]), resolving the concrete
//!    version through the gateway, recording the edge and recursing.
//!
//! Any gateway failure for a reachable, enabled node aborts the whole build;
//! a partial graph would be misleading.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{CatalogGateway, OfferingVersion, ResolvedVersion, SolutionDependency};
use crate::config::{AddonConfig, DependencyGraph, DeployedNode, NodeIdentity};
use crate::errors::ResolutionError;
use crate::observability::messages::resolution::{
    DependencyResolved, DependencySkipped, RequiredDependencyForced, ResolutionCompleted,
    ResolutionFailed, ResolutionStarted,
};
use crate::observability::messages::StructuredLog;
use crate::resolver::{decide, Decision, DependencyFlags, GlobalDisables, RequiredPolicy};

/// Output of [`DependencyGraphBuilder::build_dependency_graph`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyGraphResult {
    pub graph: DependencyGraph,
    /// Units that should be deployed, in discovery order, without duplicates
    pub expected_deployed: Vec<DeployedNode>,
    pub visited: BTreeSet<NodeIdentity>,
}

/// Transient traversal state, discarded when the build returns
struct ResolutionState {
    disabled: GlobalDisables,
    visited: BTreeSet<NodeIdentity>,
    graph: DependencyGraph,
    expected: Vec<DeployedNode>,
}

/// Builds expected dependency graphs from a catalog gateway.
///
/// # Example
/// ```
/// use addon_closure::catalog::StaticCatalog;
/// use addon_closure::config::AddonConfig;
/// use addon_closure::resolver::DependencyGraphBuilder;
/// use std::collections::BTreeSet;
///
/// let catalog: StaticCatalog = serde_yaml::from_str(r#"
/// - catalog_id: cat
///   offering_id: kms-id
///   name: kms
///   versions:
///     - version_locator: cat.kms-5.1.4
///       version: v5.1.4
///       flavor: basic
/// "#).unwrap();
///
/// let builder = DependencyGraphBuilder::new(&catalog);
/// let result = builder
///     .build_dependency_graph("cat", "kms-id", "cat.kms-5.1.4", "basic", &AddonConfig::new("kms"), BTreeSet::new())
///     .unwrap();
///
/// assert_eq!(result.expected_deployed.len(), 1);
/// ```
pub struct DependencyGraphBuilder<'a, G: CatalogGateway + ?Sized> {
    gateway: &'a G,
    required_policy: RequiredPolicy,
}

impl<'a, G: CatalogGateway + ?Sized> DependencyGraphBuilder<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self {
            gateway,
            required_policy: RequiredPolicy::default(),
        }
    }

    pub fn with_required_policy(mut self, policy: RequiredPolicy) -> Self {
        self.required_policy = policy;
        self
    }

    /// Resolves the dependency closure of one root unit.
    ///
    /// `visited` seeds the set of already-processed identities; units in it are
    /// neither added to the expected list nor expanded again. Pass an empty set
    /// for a fresh build.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] when the gateway fails or returns unusable
    /// metadata for any reachable, enabled node, or when a required dependency
    /// is disabled under [`RequiredPolicy::Reject`].
    pub fn build_dependency_graph(
        &self,
        catalog_id: &str,
        offering_id: &str,
        version_locator: &str,
        flavor: &str,
        root: &AddonConfig,
        visited: BTreeSet<NodeIdentity>,
    ) -> Result<DependencyGraphResult, ResolutionError> {
        let disabled = GlobalDisables::scan(root, self.required_policy);

        let started = ResolutionStarted {
            catalog_id,
            offering_id,
            version_locator,
            disabled_count: disabled.len(),
        };
        let span = started.span("build_dependency_graph");
        let _guard = span.enter();
        started.log();

        let mut state = ResolutionState {
            disabled,
            visited,
            graph: DependencyGraph::new(),
            expected: Vec::new(),
        };

        if let Err(error) =
            self.resolve_root(catalog_id, offering_id, version_locator, flavor, root, &mut state)
        {
            ResolutionFailed {
                offering_id,
                error: &error,
            }
            .log();
            return Err(error);
        }

        ResolutionCompleted {
            offering_id,
            expected_count: state.expected.len(),
            edge_count: state.graph.edges().count(),
        }
        .log();

        Ok(DependencyGraphResult {
            graph: state.graph,
            expected_deployed: state.expected,
            visited: state.visited,
        })
    }

    fn resolve_root(
        &self,
        catalog_id: &str,
        offering_id: &str,
        version_locator: &str,
        flavor: &str,
        root: &AddonConfig,
        state: &mut ResolutionState,
    ) -> Result<(), ResolutionError> {
        if !root.offering_name.is_empty() && state.disabled.contains(&root.offering_name) {
            return Ok(());
        }

        let (catalog_name, version) = self.load_version(catalog_id, offering_id, version_locator)?;
        let name = if root.offering_name.is_empty() {
            catalog_name
        } else {
            root.offering_name.clone()
        };
        let flavor = if flavor.is_empty() {
            version.flavor.clone()
        } else {
            flavor.to_string()
        };

        let node = DeployedNode::new(NodeIdentity::new(name, version.version.clone(), flavor))
            .with_catalog(catalog_id, offering_id, version_locator);

        self.process(node, Some(version), Some(root), false, state)
    }

    /// Adds `node` to the expected set and expands its declared dependencies.
    fn process(
        &self,
        node: DeployedNode,
        preloaded: Option<OfferingVersion>,
        overrides: Option<&AddonConfig>,
        forced: bool,
        state: &mut ResolutionState,
    ) -> Result<(), ResolutionError> {
        if !forced && state.disabled.contains(&node.identity.name) {
            return Ok(());
        }
        if !state.visited.insert(node.identity.clone()) {
            return Ok(());
        }

        state.graph.add_node(node.identity.clone());
        if !state.expected.iter().any(|e| e.identity == node.identity) {
            state.expected.push(node.clone());
        }

        let version = match preloaded {
            Some(version) => version,
            None => {
                self.load_version(&node.catalog_id, &node.offering_id, &node.version_locator)?
                    .1
            }
        };

        for dependency in &version.dependencies {
            let declarations = version
                .dependencies
                .iter()
                .filter(|d| d.name == dependency.name)
                .count();
            self.process_dependency(&node, dependency, declarations == 1, overrides, state)?;
        }

        Ok(())
    }

    fn process_dependency(
        &self,
        parent: &DeployedNode,
        dependency: &SolutionDependency,
        sole_declaration: bool,
        overrides: Option<&AddonConfig>,
        state: &mut ResolutionState,
    ) -> Result<(), ResolutionError> {
        let catalog_flavor = dependency.catalog_flavor();
        let matched = overrides
            .and_then(|o| o.find_override(&dependency.name, catalog_flavor, sole_declaration));

        let flags = DependencyFlags {
            explicit_override: matched.and_then(|o| o.enabled),
            on_by_default: dependency.on_by_default,
            globally_disabled: state.disabled.contains(&dependency.name),
            required: dependency.required || matched.is_some_and(|o| o.required),
        };

        let forced = match decide(flags, self.required_policy) {
            Decision::Include => false,
            Decision::ForceInclude => {
                RequiredDependencyForced {
                    parent: &parent.identity.name,
                    dependency: &dependency.name,
                }
                .log();
                true
            }
            Decision::Skip(reason) => {
                DependencySkipped {
                    parent: &parent.identity,
                    dependency: &dependency.name,
                    reason,
                }
                .log();
                return Ok(());
            }
            Decision::RejectRequired => {
                return Err(ResolutionError::RequiredDependencyDisabled {
                    parent: parent.identity.to_string(),
                    dependency: dependency.name.clone(),
                    catalog_id: dependency.catalog_id.clone(),
                    offering_id: dependency.offering_id.clone(),
                });
            }
        };

        let flavor = matched
            .and_then(|o| o.flavor.clone())
            .unwrap_or_else(|| catalog_flavor.to_string());
        let catalog_id = matched
            .and_then(|o| o.catalog_id.clone())
            .unwrap_or_else(|| dependency.catalog_id.clone());
        let offering_id = matched
            .and_then(|o| o.offering_id.clone())
            .unwrap_or_else(|| dependency.offering_id.clone());

        let resolved = match matched.and_then(|o| o.version.clone().zip(o.version_locator.clone())) {
            Some((version, version_locator)) => ResolvedVersion {
                version,
                version_locator,
            },
            None => {
                let constraint = matched
                    .and_then(|o| o.version.as_deref())
                    .unwrap_or(&dependency.version_constraint);
                self.gateway
                    .resolve_version(&catalog_id, &offering_id, constraint, &flavor)
                    .map_err(|source| ResolutionError::VersionResolution {
                        parent: parent.identity.to_string(),
                        catalog_id: catalog_id.clone(),
                        offering_id: offering_id.clone(),
                        constraint: constraint.to_string(),
                        flavor: flavor.clone(),
                        source,
                    })?
            }
        };

        let child = DeployedNode::new(NodeIdentity::new(
            dependency.name.clone(),
            resolved.version,
            flavor,
        ))
        .with_catalog(catalog_id, offering_id, resolved.version_locator);

        state.graph.add_edge(&parent.identity, child.clone());
        DependencyResolved {
            parent: &parent.identity,
            child: &child.identity,
            version_locator: &child.version_locator,
        }
        .log();

        self.process(child, None, matched, forced, state)
    }

    /// Fetches metadata and picks the version addressed by `version_locator`.
    fn load_version(
        &self,
        catalog_id: &str,
        offering_id: &str,
        version_locator: &str,
    ) -> Result<(String, OfferingVersion), ResolutionError> {
        let metadata = self
            .gateway
            .get_offering_metadata(catalog_id, offering_id)
            .map_err(|source| ResolutionError::Gateway {
                catalog_id: catalog_id.to_string(),
                offering_id: offering_id.to_string(),
                version_locator: version_locator.to_string(),
                source,
            })?;

        if metadata.install_kind.as_deref().map_or(true, str::is_empty) {
            return Err(ResolutionError::MissingInstallKind {
                catalog_id: catalog_id.to_string(),
                offering_id: offering_id.to_string(),
                version_locator: version_locator.to_string(),
            });
        }
        if metadata.versions.is_empty() {
            return Err(ResolutionError::EmptyVersionList {
                catalog_id: catalog_id.to_string(),
                offering_id: offering_id.to_string(),
                version_locator: version_locator.to_string(),
            });
        }

        let version = metadata
            .version_by_locator(version_locator)
            .cloned()
            .ok_or_else(|| ResolutionError::VersionLocatorNotFound {
                catalog_id: catalog_id.to_string(),
                offering_id: offering_id.to_string(),
                version_locator: version_locator.to_string(),
            })?;

        Ok((metadata.name, version))
    }
}
