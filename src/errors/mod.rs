// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod catalog;
mod config;
mod resolution;

pub use catalog::GatewayError;
pub use config::ScenarioError;
pub use resolution::ResolutionError;
