// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic event emitted by the resolver, the validator and the
//! reference detector is a small struct implementing `Display` and
//! [`StructuredLog`](messages::StructuredLog). Keeping the wording in one place
//! keeps log output consistent and keeps string literals out of the algorithms.
//!
//! # Usage
//!
//! ```rust
//! use addon_closure::observability::messages::StructuredLog;
//! use addon_closure::observability::messages::validation::ValidationStarted;
//!
//! let msg = ValidationStarted {
//!     expected_count: 4,
//!     actual_count: 3,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
