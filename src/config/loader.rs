// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::StaticCatalog;
use crate::config::{AddonConfig, DeployedNode};
use crate::errors::ScenarioError;
use crate::references::ConfigDependencyInfo;
use crate::resolver::RequiredPolicy;

/// Everything one check needs: the catalog, the addon under test with its
/// overrides, and what is deployed or pending.
///
/// Only `root`, `addon` and `catalog` are mandatory; the observed lists
/// default to empty.
///
/// # Example
/// ```yaml
/// settings:
///   required_policy: reject
/// root:
///   catalog_id: cat
///   offering_id: observability-id
///   version_locator: cat.observability-v1.0.0-standard
///   flavor: standard
/// addon:
///   offering_name: observability
/// catalog:
///   - catalog_id: cat
///     offering_id: observability-id
///     name: observability
///     versions:
///       - version_locator: cat.observability-v1.0.0-standard
///         version: v1.0.0
///         flavor: standard
/// pending:
///   - id: vpc
///     name: VPC
///     inputs:
///       cluster_id: ref:/configs/cluster/outputs/cluster_id
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: Settings,
    pub root: RootTarget,
    pub addon: AddonConfig,
    pub catalog: StaticCatalog,
    #[serde(default)]
    pub deployed: Vec<DeployedNode>,
    #[serde(default)]
    pub pending: Vec<PendingConfig>,
    #[serde(default)]
    pub existing: Vec<String>,
}

impl Scenario {
    /// Pending configurations reduced to their references.
    pub fn pending_dependency_info(&self) -> Vec<ConfigDependencyInfo> {
        self.pending.iter().map(PendingConfig::dependency_info).collect()
    }

    /// Ids of every configuration that exists, pending ones included.
    pub fn existing_ids(&self) -> BTreeSet<String> {
        self.existing
            .iter()
            .cloned()
            .chain(self.pending.iter().map(|p| p.id.clone()))
            .collect()
    }
}

/// Behaviour switches for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub required_policy: RequiredPolicy,
    /// Treat circular and unresolved references as failures
    #[serde(default)]
    pub strict_cycles: bool,
}

/// Catalog coordinates of the root unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RootTarget {
    pub catalog_id: String,
    pub offering_id: String,
    pub version_locator: String,
    #[serde(default)]
    pub flavor: String,
}

/// A configuration awaiting deployment, with its raw input values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PendingConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub inputs: Map<String, Value>,
}

impl PendingConfig {
    pub fn dependency_info(&self) -> ConfigDependencyInfo {
        ConfigDependencyInfo::from_inputs(&self.id, &self.name, &self.inputs)
    }
}

/// Serialization formats a scenario may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
    Toml,
}

impl ScenarioFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Ok(ScenarioFormat::Yaml),
            "json" => Ok(ScenarioFormat::Json),
            "toml" => Ok(ScenarioFormat::Toml),
            _ => Err(ScenarioError::UnsupportedFormat { extension }),
        }
    }
}

/// Parses scenario text in the given format.
pub fn parse_scenario(content: &str, format: ScenarioFormat) -> Result<Scenario, ScenarioError> {
    let scenario = match format {
        ScenarioFormat::Yaml => serde_yaml::from_str(content)?,
        ScenarioFormat::Json => serde_json::from_str(content)?,
        ScenarioFormat::Toml => toml::from_str(content)?,
    };
    Ok(scenario)
}

/// Loads a scenario file, choosing the format by extension.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let format = ScenarioFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeIdentity;
    use std::io::Write;
    use std::path::PathBuf;

    fn checked_in_scenario() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs/observability-scenario.yaml")
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_checked_in_scenario() {
        let scenario = load_scenario(checked_in_scenario()).unwrap();

        assert_eq!(scenario.settings.required_policy, RequiredPolicy::ForceEnable);
        assert!(!scenario.settings.strict_cycles);
        assert_eq!(scenario.root.offering_id, "observability-id");
        assert_eq!(scenario.addon.dependencies.len(), 2);
        assert_eq!(scenario.catalog.offerings().len(), 3);
        assert_eq!(scenario.deployed.len(), 4);
        assert_eq!(
            scenario.deployed[3].identity,
            NodeIdentity::new("account-base", "v3.0.7", "standard")
        );
    }

    #[test]
    fn test_pending_inputs_become_references() {
        let scenario = load_scenario(checked_in_scenario()).unwrap();

        let pending = scenario.pending_dependency_info();

        assert_eq!(pending.len(), 2);
        assert_eq!(pending[1].references.len(), 2);
        assert_eq!(
            pending[1].find_input_field_name("ref:/configs/kms-config/outputs/key_crn"),
            "kms.key_ref"
        );
    }

    #[test]
    fn test_existing_ids_include_pending() {
        let scenario = load_scenario(checked_in_scenario()).unwrap();

        let ids: Vec<String> = scenario.existing_ids().into_iter().collect();

        assert_eq!(ids, vec!["cluster", "kms-config", "vpc"]);
    }

    #[test]
    fn test_minimal_json_scenario_uses_defaults() {
        let json = r#"{
            "root": { "catalog_id": "cat", "offering_id": "a-id", "version_locator": "cat.a" },
            "addon": { "offering_name": "a" },
            "catalog": []
        }"#;
        let file = write_temp(".json", json);

        let scenario = load_scenario(file.path()).unwrap();

        assert_eq!(scenario.settings, Settings::default());
        assert_eq!(scenario.root.flavor, "");
        assert!(scenario.deployed.is_empty());
        assert!(scenario.pending.is_empty());
    }

    #[test]
    fn test_toml_scenario() {
        let toml = r#"
[settings]
required_policy = "reject"
strict_cycles = true

[root]
catalog_id = "cat"
offering_id = "a-id"
version_locator = "cat.a"
flavor = "standard"

[addon]
offering_name = "a"

[[catalog]]
catalog_id = "cat"
offering_id = "a-id"
name = "a"

[[pending]]
id = "x"
name = "X"
[pending.inputs]
peer = "ref:/configs/y/outputs/id"
"#;
        let file = write_temp(".toml", toml);

        let scenario = load_scenario(file.path()).unwrap();

        assert_eq!(scenario.settings.required_policy, RequiredPolicy::Reject);
        assert!(scenario.settings.strict_cycles);
        assert_eq!(scenario.catalog.offerings()[0].metadata.install_kind.as_deref(), Some("terraform"));
        assert_eq!(scenario.pending_dependency_info()[0].references.len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".ini", "root = nothing");

        let error = load_scenario(file.path()).unwrap_err();

        assert!(matches!(error, ScenarioError::UnsupportedFormat { ref extension } if extension == "ini"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = load_scenario("/definitely/not/here.yaml").unwrap_err();

        assert!(matches!(error, ScenarioError::Io { .. }));
        assert!(error.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let error = parse_scenario("root: [", ScenarioFormat::Yaml).unwrap_err();

        assert!(matches!(error, ScenarioError::Yaml(_)));
    }
}
