// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use serde::Serialize;

use crate::config::consts::{INPUTS_COLLECTION, OUTPUTS_COLLECTION, REFERENCE_PREFIX};

/// Which collection of the target configuration a reference reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Outputs,
    Inputs,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Outputs => OUTPUTS_COLLECTION,
            ReferenceKind::Inputs => INPUTS_COLLECTION,
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `ref:/configs/<configID>/<outputs|inputs>/<fieldName>` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    pub config_id: String,
    pub kind: ReferenceKind,
    pub field: String,
}

impl Reference {
    /// Parses the exact wire shape; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(REFERENCE_PREFIX)?;
        let mut parts = rest.split('/');
        let config_id = parts.next()?;
        let kind = parts.next()?;
        let field = parts.next()?;

        if parts.next().is_some() || config_id.is_empty() || field.is_empty() {
            return None;
        }

        let kind = match kind {
            OUTPUTS_COLLECTION => ReferenceKind::Outputs,
            INPUTS_COLLECTION => ReferenceKind::Inputs,
            _ => return None,
        };

        Some(Self {
            config_id: config_id.to_string(),
            kind,
            field: field.to_string(),
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}/{}", REFERENCE_PREFIX, self.config_id, self.kind, self.field)
    }
}

/// Parses a reference string, returning `None` for anything that is not one.
///
/// ```
/// use addon_closure::references::{parse_reference, ReferenceKind};
///
/// let r = parse_reference("ref:/configs/vpc-1/outputs/vpc_id").unwrap();
/// assert_eq!(r.config_id, "vpc-1");
/// assert_eq!(r.kind, ReferenceKind::Outputs);
/// assert_eq!(r.field, "vpc_id");
///
/// assert!(parse_reference("ref:/configs/vpc-1/secrets/vpc_id").is_none());
/// ```
pub fn parse_reference(raw: &str) -> Option<Reference> {
    Reference::parse(raw)
}
