// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Deployment validation: expected dependency graph vs. what actually got deployed.
//!
//! Both lists are treated as sets keyed by [`NodeIdentity`](crate::config::NodeIdentity):
//!
//! * **Missing**: expected but not deployed
//! * **Unexpected**: deployed but not expected
//! * **Dependency errors**: a deployed parent whose required child version is
//!   absent, together with the other versions of that child that *are* present
//!
//! Validation never fails; imperfect input simply yields more findings.

mod deployment;

pub use deployment::{validate_dependencies, DependencyError, ValidationResult};
