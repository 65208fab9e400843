// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration references among pending deployments.
//!
//! A configuration input may carry a reference string of the form
//! `ref:/configs/<configID>/<outputs|inputs>/<fieldName>`. This module parses
//! those strings, maps them back to the input that carries them, and finds
//! reference cycles and references to configurations that do not exist.

mod cycles;
mod detector;
mod pending;
mod reference;

pub use cycles::find_cycles;
pub use detector::{
    detect_circular_dependencies, find_circular_references, find_unresolved_references, Cycle,
    CycleHop,
};
pub use pending::{find_input_field_name, ConfigDependencyInfo};
pub use reference::{parse_reference, Reference, ReferenceKind};
