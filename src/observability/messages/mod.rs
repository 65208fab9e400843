// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `resolution` - dependency graph building
//! * `validation` - expected vs. actual deployment diff
//! * `references` - circular and unresolved configuration references

use tracing::Span;

pub mod references;
pub mod resolution;
pub mod validation;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the event at the message's documented level.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
