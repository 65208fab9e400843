// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod addon;
mod dependency_graph;
mod identity;
mod loader;

pub mod consts;

pub use addon::AddonConfig;
pub use dependency_graph::DependencyGraph;
pub use identity::{DeployedNode, NodeIdentity};
pub use loader::{
    load_scenario, parse_scenario, PendingConfig, RootTarget, Scenario, ScenarioFormat, Settings,
};
