// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors that abort a dependency graph build.
//!
//! Every variant names the catalog coordinates of the node being resolved so a
//! failure can be located in the tree.

use thiserror::Error;

use crate::errors::GatewayError;

/// Hard failures of the dependency graph builder
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// The gateway failed while fetching metadata for a reachable node
    #[error(
        "failed to fetch metadata for offering '{offering_id}' in catalog '{catalog_id}' (version locator '{version_locator}'): {source}"
    )]
    Gateway {
        catalog_id: String,
        offering_id: String,
        version_locator: String,
        #[source]
        source: GatewayError,
    },

    /// The gateway could not resolve a dependency's version constraint
    #[error(
        "failed to resolve version '{constraint}' (flavor '{flavor}') of offering '{offering_id}' in catalog '{catalog_id}', required by '{parent}': {source}"
    )]
    VersionResolution {
        parent: String,
        catalog_id: String,
        offering_id: String,
        constraint: String,
        flavor: String,
        #[source]
        source: GatewayError,
    },

    /// Metadata came back without an install kind
    #[error(
        "offering '{offering_id}' in catalog '{catalog_id}' has no install kind (version locator '{version_locator}')"
    )]
    MissingInstallKind {
        catalog_id: String,
        offering_id: String,
        version_locator: String,
    },

    /// Metadata came back without any versions
    #[error(
        "offering '{offering_id}' in catalog '{catalog_id}' has no versions (version locator '{version_locator}')"
    )]
    EmptyVersionList {
        catalog_id: String,
        offering_id: String,
        version_locator: String,
    },

    /// The requested version locator is not one of the offering's versions
    #[error(
        "version locator '{version_locator}' not found for offering '{offering_id}' in catalog '{catalog_id}'"
    )]
    VersionLocatorNotFound {
        catalog_id: String,
        offering_id: String,
        version_locator: String,
    },

    /// A required dependency was disabled and the policy forbids forcing it on
    #[error(
        "dependency '{dependency}' (offering '{offering_id}' in catalog '{catalog_id}') of '{parent}' is required but disabled by an override"
    )]
    RequiredDependencyDisabled {
        parent: String,
        dependency: String,
        catalog_id: String,
        offering_id: String,
    },
}
