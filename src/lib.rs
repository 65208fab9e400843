// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod catalog;      // catalog metadata gateway
pub mod config;       // identities, override trees, scenario files
pub mod errors;       // error handling
pub mod observability;
pub mod references;   // circular reference detection
pub mod resolver;     // dependency graph builder
pub mod validation;   // expected vs. actual diff
