// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Caller-authored override tree attached to a root addon.
///
/// The root entry names the addon being tested; each entry in `dependencies`
/// overrides how one catalog-declared dependency of its parent is resolved.
/// Overrides are matched by `offering_name` and, when `flavor` is set,
/// preferably by flavor too.
///
/// `enabled` is tri-state: `None` defers to the catalog's on-by-default flag,
/// `Some(true)` forces the dependency on, `Some(false)` disables the offering
/// everywhere in the resolved tree.
///
/// # Example
/// ```yaml
/// offering_name: observability
/// dependencies:
///   - offering_name: account-base
///     version: v3.0.11
///     enabled: true
///   - offering_name: kms
///     dependencies:
///       - offering_name: account-base
///         version: v3.0.7
///         enabled: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddonConfig {
    pub offering_name: String,
    #[serde(default)]
    pub offering_id: Option<String>,
    #[serde(default)]
    pub catalog_id: Option<String>,
    /// Exact version or version constraint replacing the catalog's constraint.
    #[serde(default)]
    pub version: Option<String>,
    /// Pre-resolved locator; used together with an exact `version`.
    #[serde(default)]
    pub version_locator: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub dependencies: Vec<AddonConfig>,
}

impl AddonConfig {
    pub fn new(offering_name: impl Into<String>) -> Self {
        Self {
            offering_name: offering_name.into(),
            ..Self::default()
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn version_locator(mut self, locator: impl Into<String>) -> Self {
        self.version_locator = Some(locator.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_dependency(mut self, dependency: AddonConfig) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Finds the override for a catalog dependency among this entry's children.
    ///
    /// An override naming a flavor only applies to the declaration of that
    /// flavor. Otherwise an override without a flavor applies. When the parent
    /// declares the offering once (`sole_declaration`), a flavor-scoped
    /// override may also retarget it to another flavor.
    pub fn find_override(
        &self,
        offering_name: &str,
        flavor: &str,
        sole_declaration: bool,
    ) -> Option<&AddonConfig> {
        let by_name = || {
            self.dependencies
                .iter()
                .filter(move |d| d.offering_name == offering_name)
        };

        by_name()
            .find(|d| d.flavor.as_deref() == Some(flavor))
            .or_else(|| by_name().find(|d| d.flavor.is_none()))
            .or_else(|| by_name().next().filter(|_| sole_declaration))
    }

    /// Visits this entry and every nested override, depth first.
    pub fn walk(&self) -> Vec<&AddonConfig> {
        let mut out = vec![self];
        for dep in &self.dependencies {
            out.extend(dep.walk());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override_tree() {
        let yaml = r#"
offering_name: observability
dependencies:
  - offering_name: account-base
    version: v3.0.11
    enabled: true
  - offering_name: kms
    dependencies:
      - offering_name: account-base
        version: v3.0.7
        enabled: true
"#;
        let cfg: AddonConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.offering_name, "observability");
        assert_eq!(cfg.dependencies.len(), 2);
        assert_eq!(cfg.dependencies[0].enabled, Some(true));
        assert_eq!(cfg.dependencies[1].enabled, None);
        assert_eq!(cfg.dependencies[1].dependencies[0].version.as_deref(), Some("v3.0.7"));
    }

    #[test]
    fn test_find_override_prefers_flavor_match() {
        let cfg = AddonConfig::new("root")
            .with_dependency(AddonConfig::new("kms").flavor("basic").version("1.0.0"))
            .with_dependency(AddonConfig::new("kms").flavor("premium").version("2.0.0"));

        let found = cfg.find_override("kms", "premium", false).unwrap();
        assert_eq!(found.version.as_deref(), Some("2.0.0"));

        assert!(cfg.find_override("missing", "basic", true).is_none());
    }

    #[test]
    fn test_flavor_scoped_override_leaves_other_flavors_alone() {
        let cfg = AddonConfig::new("root")
            .with_dependency(AddonConfig::new("kms").flavor("basic").version("1.0.0"));

        assert!(cfg.find_override("kms", "premium", false).is_none());

        // a single declaration may be retargeted to the override's flavor
        let retarget = cfg.find_override("kms", "premium", true).unwrap();
        assert_eq!(retarget.flavor.as_deref(), Some("basic"));
    }

    #[test]
    fn test_unscoped_override_applies_to_every_flavor() {
        let cfg = AddonConfig::new("root")
            .with_dependency(AddonConfig::new("kms").flavor("basic").version("1.0.0"))
            .with_dependency(AddonConfig::new("kms").enabled(true));

        let found = cfg.find_override("kms", "premium", false).unwrap();
        assert!(found.flavor.is_none());
        assert_eq!(found.enabled, Some(true));
    }

    #[test]
    fn test_walk_visits_every_depth() {
        let cfg = AddonConfig::new("root").with_dependency(
            AddonConfig::new("a").with_dependency(AddonConfig::new("b").enabled(false)),
        );

        let names: Vec<&str> = cfg.walk().iter().map(|c| c.offering_name.as_str()).collect();
        assert_eq!(names, vec!["root", "a", "b"]);
    }
}
