// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for dependency graph resolution.
//!
//! This module contains message types for logging events related to:
//! * Global disable pre-scan
//! * Per-dependency enable/skip decisions
//! * Required dependency enforcement
//! * Build lifecycle (start, completion, failure)

use crate::config::NodeIdentity;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Dependency graph build started for a root offering.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use addon_closure::observability::messages::resolution::ResolutionStarted;
///
/// let msg = ResolutionStarted {
///     catalog_id: "cat",
///     offering_id: "observability-id",
///     version_locator: "cat.obs-1.0.0",
///     disabled_count: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ResolutionStarted<'a> {
    pub catalog_id: &'a str,
    pub offering_id: &'a str,
    pub version_locator: &'a str,
    pub disabled_count: usize,
}

impl Display for ResolutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolving dependency graph for offering '{}' in catalog '{}' ({}), {} offerings disabled by overrides",
            self.offering_id, self.catalog_id, self.version_locator, self.disabled_count
        )
    }
}

impl StructuredLog for ResolutionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            catalog_id = self.catalog_id,
            offering_id = self.offering_id,
            version_locator = self.version_locator,
            disabled_count = self.disabled_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "resolution",
            span_name = name,
            catalog_id = self.catalog_id,
            offering_id = self.offering_id,
            version_locator = self.version_locator,
        )
    }
}

/// A dependency was not followed.
///
/// # Log Level
/// `debug!` - Per-edge decision
pub struct DependencySkipped<'a> {
    pub parent: &'a NodeIdentity,
    pub dependency: &'a str,
    pub reason: SkipReason,
}

/// Why a declared dependency was left out of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DisabledByOverride,
    DisabledByCatalogDefault,
    DisabledGlobally,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let text = match self {
            SkipReason::DisabledByOverride => "disabled by override",
            SkipReason::DisabledByCatalogDefault => "off by default in catalog",
            SkipReason::DisabledGlobally => "offering disabled elsewhere in the tree",
        };
        f.write_str(text)
    }
}

impl Display for DependencySkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping dependency '{}' of {}: {}",
            self.dependency, self.parent, self.reason
        )
    }
}

impl StructuredLog for DependencySkipped<'_> {
    fn log(&self) {
        tracing::debug!(
            parent = %self.parent,
            dependency = self.dependency,
            reason = %self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dependency_skipped",
            span_name = name,
            parent = %self.parent,
            dependency = self.dependency,
        )
    }
}

/// A dependency was resolved and added to the graph.
///
/// # Log Level
/// `debug!` - Per-edge decision
pub struct DependencyResolved<'a> {
    pub parent: &'a NodeIdentity,
    pub child: &'a NodeIdentity,
    pub version_locator: &'a str,
}

impl Display for DependencyResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved {} -> {} [{}]",
            self.parent, self.child, self.version_locator
        )
    }
}

impl StructuredLog for DependencyResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            parent = %self.parent,
            child = %self.child,
            version_locator = self.version_locator,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dependency_resolved",
            span_name = name,
            parent = %self.parent,
            child = %self.child,
        )
    }
}

/// A required dependency was included despite an override disabling it.
///
/// # Log Level
/// `warn!` - Caller intent was overruled
///
/// # Example
/// ```
/// use addon_closure::observability::messages::resolution::RequiredDependencyForced;
///
/// let msg = RequiredDependencyForced {
///     parent: "observability",
///     dependency: "account-base",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct RequiredDependencyForced<'a> {
    pub parent: &'a str,
    pub dependency: &'a str,
}

impl Display for RequiredDependencyForced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dependency '{}' of '{}' is required; ignoring override that disables it",
            self.dependency, self.parent
        )
    }
}

impl StructuredLog for RequiredDependencyForced<'_> {
    fn log(&self) {
        tracing::warn!(
            parent = self.parent,
            dependency = self.dependency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "required_forced",
            span_name = name,
            parent = self.parent,
            dependency = self.dependency,
        )
    }
}

/// Dependency graph build completed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ResolutionCompleted<'a> {
    pub offering_id: &'a str,
    pub expected_count: usize,
    pub edge_count: usize,
}

impl Display for ResolutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved dependency graph for '{}': {} expected deployments, {} edges",
            self.offering_id, self.expected_count, self.edge_count
        )
    }
}

impl StructuredLog for ResolutionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            offering_id = self.offering_id,
            expected_count = self.expected_count,
            edge_count = self.edge_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "resolution_completed",
            span_name = name,
            offering_id = self.offering_id,
            expected_count = self.expected_count,
            edge_count = self.edge_count,
        )
    }
}

/// Dependency graph build aborted.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ResolutionFailed<'a> {
    pub offering_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ResolutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dependency graph resolution for '{}' failed: {}",
            self.offering_id, self.error
        )
    }
}

impl StructuredLog for ResolutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            offering_id = self.offering_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "resolution_failed",
            span_name = name,
            offering_id = self.offering_id,
            error = %self.error,
        )
    }
}
