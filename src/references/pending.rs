// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::consts::{REFERENCE_PREFIX, UNKNOWN_INPUT};

/// A configuration that has not been deployed yet, reduced to its references.
///
/// `references` lists every reference string found anywhere in the inputs, in
/// input order. `input_references` maps the input path carrying a reference
/// (`vpc_id`, `network.subnet`, `zones[1]`) back to that reference, so a cycle
/// can name the exact wiring to break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDependencyInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub input_references: BTreeMap<String, String>,
}

impl ConfigDependencyInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Records that input `field` carries `reference`.
    pub fn with_input(mut self, field: impl Into<String>, reference: impl Into<String>) -> Self {
        let reference = reference.into();
        self.references.push(reference.clone());
        self.input_references.entry(field.into()).or_insert(reference);
        self
    }

    /// Extracts references from a configuration's raw input values.
    ///
    /// ```
    /// use addon_closure::references::ConfigDependencyInfo;
    /// use serde_json::json;
    ///
    /// let inputs = json!({
    ///     "region": "us-south",
    ///     "vpc_id": "ref:/configs/vpc/outputs/vpc_id",
    ///     "network": { "subnets": ["ref:/configs/vpc/outputs/subnet_a"] }
    /// });
    /// let info = ConfigDependencyInfo::from_inputs("cluster", "Cluster", inputs.as_object().unwrap());
    ///
    /// assert_eq!(info.references.len(), 2);
    /// assert_eq!(info.find_input_field_name("ref:/configs/vpc/outputs/subnet_a"), "network.subnets[0]");
    /// ```
    pub fn from_inputs(
        id: impl Into<String>,
        name: impl Into<String>,
        inputs: &Map<String, Value>,
    ) -> Self {
        let mut info = Self::new(id, name);
        for (field, value) in inputs {
            info.collect(field.clone(), value);
        }
        info
    }

    fn collect(&mut self, path: String, value: &Value) {
        match value {
            Value::String(s) if s.starts_with(REFERENCE_PREFIX) => {
                self.references.push(s.clone());
                self.input_references.entry(path).or_insert_with(|| s.clone());
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.collect(format!("{}[{}]", path, index), item);
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    self.collect(format!("{}.{}", path, key), item);
                }
            }
            _ => {}
        }
    }

    /// Which of this configuration's input fields carries `target_reference`.
    ///
    /// Returns `"unknown_input"` when no field does; never fails.
    pub fn find_input_field_name(&self, target_reference: &str) -> &str {
        self.input_references
            .iter()
            .find(|(_, reference)| reference.as_str() == target_reference)
            .map(|(field, _)| field.as_str())
            .unwrap_or(UNKNOWN_INPUT)
    }
}

/// Free-function form of [`ConfigDependencyInfo::find_input_field_name`].
pub fn find_input_field_name(config: &ConfigDependencyInfo, target_reference: &str) -> String {
    config.find_input_field_name(target_reference).to_string()
}
