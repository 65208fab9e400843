// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for deployment validation.
//!
//! This module contains message types for logging events related to:
//! * Expected vs. actual deployment comparison
//! * Missing and unexpected deployments
//! * Parents deployed without the child version they require

use crate::config::NodeIdentity;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Deployment validation started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use addon_closure::observability::messages::validation::ValidationStarted;
///
/// let msg = ValidationStarted {
///     expected_count: 4,
///     actual_count: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ValidationStarted {
    pub expected_count: usize,
    pub actual_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validating deployment: {} expected, {} actually deployed",
            self.expected_count, self.actual_count
        )
    }
}

impl StructuredLog for ValidationStarted {
    fn log(&self) {
        tracing::info!(
            expected_count = self.expected_count,
            actual_count = self.actual_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "validation",
            span_name = name,
            expected_count = self.expected_count,
            actual_count = self.actual_count,
        )
    }
}

/// An expected unit is absent from the deployment.
///
/// # Log Level
/// `warn!` - Discrepancy
pub struct MissingDeployment<'a> {
    pub identity: &'a NodeIdentity,
}

impl Display for MissingDeployment<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Expected {} but it was not deployed", self.identity)
    }
}

impl StructuredLog for MissingDeployment<'_> {
    fn log(&self) {
        tracing::warn!(identity = %self.identity, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("missing_deployment", span_name = name, identity = %self.identity)
    }
}

/// A deployed unit was not expected.
///
/// # Log Level
/// `warn!` - Discrepancy
pub struct UnexpectedDeployment<'a> {
    pub identity: &'a NodeIdentity,
}

impl Display for UnexpectedDeployment<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Deployed {} but it was not expected", self.identity)
    }
}

impl StructuredLog for UnexpectedDeployment<'_> {
    fn log(&self) {
        tracing::warn!(identity = %self.identity, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("unexpected_deployment", span_name = name, identity = %self.identity)
    }
}

/// A deployed parent is missing the exact child version it requires.
///
/// # Log Level
/// `warn!` - Discrepancy
///
/// # Example
/// ```
/// use addon_closure::config::NodeIdentity;
/// use addon_closure::observability::messages::validation::DependencyMismatch;
///
/// let parent = NodeIdentity::new("kms", "v5.1.4", "basic");
/// let required = NodeIdentity::new("account-base", "v3.0.7", "standard");
/// let msg = DependencyMismatch {
///     parent: &parent,
///     required: &required,
///     alternative_count: 1,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct DependencyMismatch<'a> {
    pub parent: &'a NodeIdentity,
    pub required: &'a NodeIdentity,
    pub alternative_count: usize,
}

impl Display for DependencyMismatch<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} requires {} which is not deployed ({} other versions present)",
            self.parent, self.required, self.alternative_count
        )
    }
}

impl StructuredLog for DependencyMismatch<'_> {
    fn log(&self) {
        tracing::warn!(
            parent = %self.parent,
            required = %self.required,
            alternative_count = self.alternative_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "dependency_mismatch",
            span_name = name,
            parent = %self.parent,
            required = %self.required,
        )
    }
}

/// Deployment validation completed.
///
/// # Log Level
/// `info!` when valid, `warn!` otherwise
pub struct ValidationCompleted {
    pub missing_count: usize,
    pub unexpected_count: usize,
    pub dependency_error_count: usize,
}

impl ValidationCompleted {
    fn is_valid(&self) -> bool {
        self.missing_count == 0 && self.unexpected_count == 0 && self.dependency_error_count == 0
    }
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "Deployment matches the expected dependency graph")
        } else {
            write!(
                f,
                "Deployment validation found {} missing, {} unexpected, {} dependency errors",
                self.missing_count, self.unexpected_count, self.dependency_error_count
            )
        }
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        if self.is_valid() {
            tracing::info!(is_valid = true, "{}", self);
        } else {
            tracing::warn!(
                is_valid = false,
                missing_count = self.missing_count,
                unexpected_count = self.unexpected_count,
                dependency_error_count = self.dependency_error_count,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "validation_completed",
            span_name = name,
            missing_count = self.missing_count,
            unexpected_count = self.unexpected_count,
            dependency_error_count = self.dependency_error_count,
        )
    }
}
