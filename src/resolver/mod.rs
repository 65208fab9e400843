// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builder;
mod enablement;
mod overrides;


pub use builder::{DependencyGraphBuilder, DependencyGraphResult};
pub use enablement::{decide, effective_enabled, Decision, DependencyFlags, RequiredPolicy};
pub use overrides::GlobalDisables;
