// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogGateway, OfferingMetadata, ResolvedVersion};
use crate::config::consts::LATEST_VERSION_CONSTRAINT;
use crate::errors::GatewayError;

/// One offering registered in a [`StaticCatalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogOffering {
    pub catalog_id: String,
    pub offering_id: String,
    #[serde(flatten)]
    pub metadata: OfferingMetadata,
}

/// In-memory catalog gateway.
///
/// Deserializes from a list of offerings, so a scenario file can describe the
/// whole catalog inline:
///
/// ```yaml
/// - catalog_id: cat
///   offering_id: kms-id
///   name: kms
///   versions:
///     - version_locator: cat.kms-5.1.4
///       version: v5.1.4
///       flavor: fully-configurable
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    offerings: Vec<CatalogOffering>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an offering, replacing any previous entry with the same ids.
    pub fn insert(&mut self, offering: CatalogOffering) {
        self.offerings
            .retain(|o| !(o.catalog_id == offering.catalog_id && o.offering_id == offering.offering_id));
        self.offerings.push(offering);
    }

    pub fn with_offering(
        mut self,
        catalog_id: impl Into<String>,
        offering_id: impl Into<String>,
        metadata: OfferingMetadata,
    ) -> Self {
        self.insert(CatalogOffering {
            catalog_id: catalog_id.into(),
            offering_id: offering_id.into(),
            metadata,
        });
        self
    }

    pub fn offerings(&self) -> &[CatalogOffering] {
        &self.offerings
    }

    fn find(&self, catalog_id: &str, offering_id: &str) -> Result<&CatalogOffering, GatewayError> {
        self.offerings
            .iter()
            .find(|o| o.catalog_id == catalog_id && o.offering_id == offering_id)
            .ok_or_else(|| GatewayError::OfferingNotFound {
                catalog_id: catalog_id.to_string(),
                offering_id: offering_id.to_string(),
            })
    }
}

impl CatalogGateway for StaticCatalog {
    fn get_offering_metadata(
        &self,
        catalog_id: &str,
        offering_id: &str,
    ) -> Result<OfferingMetadata, GatewayError> {
        self.find(catalog_id, offering_id).map(|o| o.metadata.clone())
    }

    fn resolve_version(
        &self,
        catalog_id: &str,
        offering_id: &str,
        version_constraint: &str,
        flavor: &str,
    ) -> Result<ResolvedVersion, GatewayError> {
        let offering = self.find(catalog_id, offering_id)?;
        let candidates: Vec<_> = offering
            .metadata
            .versions
            .iter()
            .filter(|v| flavor.is_empty() || v.flavor == flavor)
            .collect();

        let no_match = || GatewayError::NoMatchingVersion {
            offering_id: offering_id.to_string(),
            constraint: version_constraint.to_string(),
            flavor: flavor.to_string(),
        };

        // exact string match covers catalogs that do not use semver
        let wanted = strip_v(version_constraint.trim());
        if let Some(exact) = candidates.iter().find(|v| strip_v(&v.version) == wanted) {
            return Ok(ResolvedVersion {
                version: exact.version.clone(),
                version_locator: exact.version_locator.clone(),
            });
        }

        let matcher = VersionMatcher::parse(version_constraint)?;
        candidates
            .into_iter()
            .filter_map(|v| Version::parse(strip_v(&v.version)).ok().map(|parsed| (parsed, v)))
            .filter(|(parsed, _)| matcher.matches(parsed))
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, v)| ResolvedVersion {
                version: v.version.clone(),
                version_locator: v.version_locator.clone(),
            })
            .ok_or_else(no_match)
    }
}

fn strip_v(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// How a catalog version constraint selects candidate versions
#[derive(Debug)]
enum VersionMatcher {
    Latest,
    Exact(Version),
    Requirement(VersionReq),
}

impl VersionMatcher {
    fn parse(constraint: &str) -> Result<Self, GatewayError> {
        let trimmed = constraint.trim();
        if trimmed.is_empty() || trimmed == LATEST_VERSION_CONSTRAINT || trimmed == "latest" {
            return Ok(Self::Latest);
        }

        let bare = strip_v(trimmed);
        if let Ok(version) = Version::parse(bare) {
            return Ok(Self::Exact(version));
        }

        VersionReq::parse(bare)
            .map(Self::Requirement)
            .map_err(|e| GatewayError::InvalidConstraint {
                constraint: constraint.to_string(),
                reason: e.to_string(),
            })
    }

    fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Latest => version.pre.is_empty(),
            Self::Exact(exact) => exact == version,
            Self::Requirement(req) => req.matches(version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OfferingVersion;

    fn version(v: &str, flavor: &str) -> OfferingVersion {
        OfferingVersion {
            version_locator: format!("cat.kms-{}-{}", v, flavor),
            version: v.to_string(),
            flavor: flavor.to_string(),
            dependencies: vec![],
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new().with_offering(
            "cat",
            "kms-id",
            OfferingMetadata {
                name: "kms".into(),
                install_kind: Some("terraform".into()),
                versions: vec![
                    version("v5.1.4", "basic"),
                    version("v5.2.0", "basic"),
                    version("v6.0.0", "basic"),
                    version("v5.1.9", "premium"),
                ],
            },
        )
    }

    #[test]
    fn test_exact_version_with_and_without_prefix() {
        let cat = catalog();

        let resolved = cat.resolve_version("cat", "kms-id", "v5.1.4", "basic").unwrap();
        assert_eq!(resolved.version, "v5.1.4");
        assert_eq!(resolved.version_locator, "cat.kms-v5.1.4-basic");

        let resolved = cat.resolve_version("cat", "kms-id", "5.1.4", "basic").unwrap();
        assert_eq!(resolved.version, "v5.1.4");
    }

    #[test]
    fn test_requirement_picks_highest_match_for_flavor() {
        let cat = catalog();

        let resolved = cat.resolve_version("cat", "kms-id", "^5.1", "basic").unwrap();
        assert_eq!(resolved.version, "v5.2.0");

        let resolved = cat.resolve_version("cat", "kms-id", "^5.1", "premium").unwrap();
        assert_eq!(resolved.version, "v5.1.9");
    }

    #[test]
    fn test_latest_constraint() {
        let cat = catalog();

        let resolved = cat.resolve_version("cat", "kms-id", "", "basic").unwrap();
        assert_eq!(resolved.version, "v6.0.0");

        let resolved = cat.resolve_version("cat", "kms-id", "*", "basic").unwrap();
        assert_eq!(resolved.version, "v6.0.0");
    }

    #[test]
    fn test_no_matching_version() {
        let cat = catalog();

        let err = cat.resolve_version("cat", "kms-id", ">=7.0.0", "basic").unwrap_err();
        assert!(matches!(err, GatewayError::NoMatchingVersion { .. }));
    }

    #[test]
    fn test_invalid_constraint() {
        let cat = catalog();

        let err = cat.resolve_version("cat", "kms-id", "not a version", "basic").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidConstraint { .. }));
    }

    #[test]
    fn test_unknown_offering() {
        let cat = catalog();

        let err = cat.get_offering_metadata("cat", "missing").unwrap_err();
        assert_eq!(
            err,
            GatewayError::OfferingNotFound {
                catalog_id: "cat".into(),
                offering_id: "missing".into(),
            }
        );
    }

    #[test]
    fn test_deserializes_from_offering_list() {
        let yaml = r#"
- catalog_id: cat
  offering_id: kms-id
  name: kms
  versions:
    - version_locator: cat.kms-5.1.4
      version: v5.1.4
      flavor: basic
"#;
        let cat: StaticCatalog = serde_yaml::from_str(yaml).unwrap();
        let meta = cat.get_offering_metadata("cat", "kms-id").unwrap();

        assert_eq!(meta.name, "kms");
        assert_eq!(meta.versions.len(), 1);
        assert!(meta.version_by_locator("cat.kms-5.1.4").is_some());
    }
}
