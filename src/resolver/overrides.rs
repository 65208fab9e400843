// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;

use crate::config::AddonConfig;
use crate::resolver::RequiredPolicy;

/// Offering names disabled anywhere in an override tree.
///
/// Disabling is an offering-level decision: an override that disables
/// offering `O` at any depth, for any flavor, suppresses `O` everywhere in the
/// resolved tree. The set is computed once, before traversal, so a disable
/// declared deep in one branch also hides `O` when it is reached earlier
/// through another branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalDisables(BTreeSet<String>);

impl GlobalDisables {
    /// Scans the whole tree for `enabled: false` overrides.
    ///
    /// Under [`RequiredPolicy::ForceEnable`] a disable on an override that is
    /// itself marked required can never take effect and is not collected.
    pub fn scan(root: &AddonConfig, policy: RequiredPolicy) -> Self {
        let names = root
            .walk()
            .into_iter()
            .filter(|cfg| cfg.enabled == Some(false))
            .filter(|cfg| !(cfg.required && policy == RequiredPolicy::ForceEnable))
            .map(|cfg| cfg.offering_name.clone())
            .collect();
        Self(names)
    }

    pub fn contains(&self, offering_name: &str) -> bool {
        self.0.contains(offering_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}
