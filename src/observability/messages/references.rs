// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration reference checks.
//!
//! This module contains message types for logging events related to:
//! * Circular reference detection between pending configurations
//! * References to configurations that do not exist
//! * Reference strings that could not be parsed

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cycle detection started over a set of pending configurations.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct CycleDetectionStarted {
    pub pending_count: usize,
    pub edge_count: usize,
}

impl Display for CycleDetectionStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Checking {} pending configurations ({} reference edges) for cycles",
            self.pending_count, self.edge_count
        )
    }
}

impl StructuredLog for CycleDetectionStarted {
    fn log(&self) {
        tracing::debug!(
            pending_count = self.pending_count,
            edge_count = self.edge_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "cycle_detection",
            span_name = name,
            pending_count = self.pending_count,
            edge_count = self.edge_count,
        )
    }
}

/// A circular reference chain was found.
///
/// # Log Level
/// `warn!` - Whether this is fatal is up to the caller
///
/// # Example
/// ```
/// use addon_closure::observability::messages::references::CircularReferenceDetected;
///
/// let chain = vec!["vpc", "cluster", "vpc"];
/// let msg = CircularReferenceDetected { chain: &chain };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct CircularReferenceDetected<'a> {
    pub chain: &'a [&'a str],
}

impl Display for CircularReferenceDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Circular reference detected: {}", self.chain.join(" → "))
    }
}

impl StructuredLog for CircularReferenceDetected<'_> {
    fn log(&self) {
        tracing::warn!(
            chain = self.chain.join(" -> "),
            cycle_length = self.chain.len().saturating_sub(1),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "circular_reference",
            span_name = name,
            chain = self.chain.join(" -> "),
        )
    }
}

/// A pending configuration references a configuration that does not exist.
///
/// # Log Level
/// `warn!` - Discrepancy
///
/// # Example
/// ```
/// use addon_closure::observability::messages::references::UnresolvedReference;
///
/// let msg = UnresolvedReference {
///     config_name: "cluster",
///     missing_id: "vpc-123",
///     reference: "ref:/configs/vpc-123/outputs/vpc_id",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct UnresolvedReference<'a> {
    pub config_name: &'a str,
    pub missing_id: &'a str,
    pub reference: &'a str,
}

impl Display for UnresolvedReference<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration '{}' references missing configuration '{}' ({})",
            self.config_name, self.missing_id, self.reference
        )
    }
}

impl StructuredLog for UnresolvedReference<'_> {
    fn log(&self) {
        tracing::warn!(
            config_name = self.config_name,
            missing_id = self.missing_id,
            reference = self.reference,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unresolved_reference",
            span_name = name,
            config_name = self.config_name,
            missing_id = self.missing_id,
        )
    }
}

/// A reference-looking string could not be parsed and was ignored.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct MalformedReferenceIgnored<'a> {
    pub config_name: &'a str,
    pub reference: &'a str,
}

impl Display for MalformedReferenceIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Ignoring malformed reference '{}' in configuration '{}'",
            self.reference, self.config_name
        )
    }
}

impl StructuredLog for MalformedReferenceIgnored<'_> {
    fn log(&self) {
        tracing::debug!(
            config_name = self.config_name,
            reference = self.reference,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "malformed_reference",
            span_name = name,
            config_name = self.config_name,
            reference = self.reference,
        )
    }
}
