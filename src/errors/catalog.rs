// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors returned by catalog metadata gateways.

use thiserror::Error;

/// Errors a [`CatalogGateway`](crate::catalog::CatalogGateway) implementation can report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The catalog has no offering with this id
    #[error("offering '{offering_id}' not found in catalog '{catalog_id}'")]
    OfferingNotFound {
        catalog_id: String,
        offering_id: String,
    },

    /// No version of the requested flavor satisfies the constraint
    #[error(
        "no version of offering '{offering_id}' (flavor '{flavor}') satisfies constraint '{constraint}'"
    )]
    NoMatchingVersion {
        offering_id: String,
        constraint: String,
        flavor: String,
    },

    /// The version constraint could not be parsed
    #[error("invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    /// The backing service failed or could not be reached
    #[error("catalog service unavailable: {0}")]
    Unavailable(String),
}
