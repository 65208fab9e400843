// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a scenario file
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML scenario: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension does not name a supported format
    #[error("unsupported scenario format '{extension}' (expected yaml, yml, json or toml)")]
    UnsupportedFormat { extension: String },
}
