// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Catalog metadata gateway contract.
//!
//! The resolver never talks to a catalog service directly. It consumes offering
//! metadata and version resolution through [`CatalogGateway`], so connections,
//! retries and caching stay with the implementation. [`StaticCatalog`] is an
//! in-memory implementation backed by scenario files and used by the tests.

mod static_catalog;

use serde::{Deserialize, Serialize};

use crate::errors::GatewayError;

pub use static_catalog::{CatalogOffering, StaticCatalog};

/// Source of offering metadata for the dependency graph builder.
pub trait CatalogGateway: Send + Sync {
    /// Declared versions of an offering and, per version, its solution dependencies.
    fn get_offering_metadata(
        &self,
        catalog_id: &str,
        offering_id: &str,
    ) -> Result<OfferingMetadata, GatewayError>;

    /// Resolves a version constraint plus flavor to a concrete version and locator.
    fn resolve_version(
        &self,
        catalog_id: &str,
        offering_id: &str,
        version_constraint: &str,
        flavor: &str,
    ) -> Result<ResolvedVersion, GatewayError>;
}

/// Metadata for one offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingMetadata {
    pub name: String,
    #[serde(default = "default_install_kind")]
    pub install_kind: Option<String>,
    #[serde(default)]
    pub versions: Vec<OfferingVersion>,
}

fn default_install_kind() -> Option<String> {
    Some("terraform".to_string())
}

impl OfferingMetadata {
    /// Looks up a declared version by its locator.
    pub fn version_by_locator(&self, version_locator: &str) -> Option<&OfferingVersion> {
        self.versions
            .iter()
            .find(|v| v.version_locator == version_locator)
    }
}

/// One concrete, addressable version of an offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingVersion {
    pub version_locator: String,
    pub version: String,
    #[serde(default)]
    pub flavor: String,
    #[serde(default)]
    pub dependencies: Vec<SolutionDependency>,
}

/// A catalog-declared dependency of an offering version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionDependency {
    pub name: String,
    pub offering_id: String,
    pub catalog_id: String,
    #[serde(default)]
    pub version_constraint: String,
    #[serde(default)]
    pub on_by_default: bool,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub default_flavor: String,
    #[serde(default)]
    pub required: bool,
}

impl SolutionDependency {
    /// The catalog's default flavor, falling back to the first listed flavor.
    pub fn catalog_flavor(&self) -> &str {
        if !self.default_flavor.is_empty() {
            &self.default_flavor
        } else {
            self.flavors.first().map(String::as_str).unwrap_or("")
        }
    }
}

/// Output of [`CatalogGateway::resolve_version`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVersion {
    pub version: String,
    pub version_locator: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_flavor_falls_back_to_first_listed() {
        let mut dep = SolutionDependency {
            name: "kms".into(),
            offering_id: "kms-id".into(),
            catalog_id: "cat".into(),
            version_constraint: String::new(),
            on_by_default: true,
            flavors: vec!["basic".into(), "premium".into()],
            default_flavor: String::new(),
            required: false,
        };
        assert_eq!(dep.catalog_flavor(), "basic");

        dep.default_flavor = "premium".into();
        assert_eq!(dep.catalog_flavor(), "premium");

        dep.default_flavor.clear();
        dep.flavors.clear();
        assert_eq!(dep.catalog_flavor(), "");
    }

    #[test]
    fn test_install_kind_defaults_when_absent() {
        let meta: OfferingMetadata = serde_yaml::from_str("name: kms\n").unwrap();
        assert_eq!(meta.install_kind.as_deref(), Some("terraform"));

        let meta: OfferingMetadata =
            serde_yaml::from_str("name: kms\ninstall_kind: null\n").unwrap();
        assert!(meta.install_kind.is_none());
    }
}
