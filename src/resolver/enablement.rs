// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Enablement precedence for catalog dependencies.
//!
//! Whether a declared dependency is followed is a small decision table over the
//! caller's tri-state override, the catalog's on-by-default flag, the global
//! disable set and the required marker. It is kept apart from graph traversal
//! so each rule can be tested on its own.

use serde::{Deserialize, Serialize};

use crate::observability::messages::resolution::SkipReason;

/// Explicit override wins; otherwise the catalog default applies.
///
/// ```
/// use addon_closure::resolver::effective_enabled;
///
/// assert!(effective_enabled(Some(true), false));
/// assert!(!effective_enabled(Some(false), true));
/// assert!(effective_enabled(None, true));
/// assert!(!effective_enabled(None, false));
/// ```
pub fn effective_enabled(explicit_override: Option<bool>, catalog_default: bool) -> bool {
    explicit_override.unwrap_or(catalog_default)
}

/// What to do with a required dependency that an override disables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredPolicy {
    /// Include it anyway and log a warning
    #[default]
    ForceEnable,
    /// Abort the build
    Reject,
}

/// Outcome of [`decide`] for one declared dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Include,
    /// Required dependency included against an override
    ForceInclude,
    Skip(SkipReason),
    /// Required dependency disabled under [`RequiredPolicy::Reject`]
    RejectRequired,
}

/// Inputs to [`decide`]
#[derive(Debug, Clone, Copy)]
pub struct DependencyFlags {
    pub explicit_override: Option<bool>,
    pub on_by_default: bool,
    pub globally_disabled: bool,
    pub required: bool,
}

/// Decides whether a declared dependency is followed.
///
/// Precedence: required (subject to `policy`) > global disable > explicit
/// override > catalog on-by-default.
pub fn decide(flags: DependencyFlags, policy: RequiredPolicy) -> Decision {
    let explicitly_disabled = flags.explicit_override == Some(false);
    let wanted =
        effective_enabled(flags.explicit_override, flags.on_by_default) && !flags.globally_disabled;

    if wanted {
        return Decision::Include;
    }

    if flags.required {
        if explicitly_disabled || flags.globally_disabled {
            return match policy {
                RequiredPolicy::ForceEnable => Decision::ForceInclude,
                RequiredPolicy::Reject => Decision::RejectRequired,
            };
        }
        // off only by catalog default
        return Decision::Include;
    }

    if explicitly_disabled {
        Decision::Skip(SkipReason::DisabledByOverride)
    } else if flags.globally_disabled {
        Decision::Skip(SkipReason::DisabledGlobally)
    } else {
        Decision::Skip(SkipReason::DisabledByCatalogDefault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(explicit: Option<bool>, on_by_default: bool) -> DependencyFlags {
        DependencyFlags {
            explicit_override: explicit,
            on_by_default,
            globally_disabled: false,
            required: false,
        }
    }

    #[test]
    fn test_precedence_table() {
        let cases = [
            (None, false, false),
            (None, true, true),
            (Some(true), false, true),
            (Some(true), true, true),
            (Some(false), false, false),
            (Some(false), true, false),
        ];

        for (explicit, default, expected) in cases {
            assert_eq!(
                effective_enabled(explicit, default),
                expected,
                "explicit={:?} default={}",
                explicit,
                default
            );
        }
    }

    #[test]
    fn test_skip_reasons() {
        let policy = RequiredPolicy::ForceEnable;

        assert_eq!(
            decide(flags(None, false), policy),
            Decision::Skip(SkipReason::DisabledByCatalogDefault)
        );
        assert_eq!(
            decide(flags(Some(false), true), policy),
            Decision::Skip(SkipReason::DisabledByOverride)
        );

        let global = DependencyFlags {
            globally_disabled: true,
            ..flags(Some(true), true)
        };
        assert_eq!(decide(global, policy), Decision::Skip(SkipReason::DisabledGlobally));
    }

    #[test]
    fn test_global_disable_beats_explicit_enable() {
        let f = DependencyFlags {
            globally_disabled: true,
            ..flags(Some(true), true)
        };
        assert!(matches!(decide(f, RequiredPolicy::ForceEnable), Decision::Skip(_)));
    }

    #[test]
    fn test_required_is_forced_or_rejected() {
        let f = DependencyFlags {
            required: true,
            ..flags(Some(false), true)
        };

        assert_eq!(decide(f, RequiredPolicy::ForceEnable), Decision::ForceInclude);
        assert_eq!(decide(f, RequiredPolicy::Reject), Decision::RejectRequired);
    }

    #[test]
    fn test_required_off_by_default_is_included() {
        let f = DependencyFlags {
            required: true,
            ..flags(None, false)
        };

        assert_eq!(decide(f, RequiredPolicy::Reject), Decision::Include);
    }

    #[test]
    fn test_policy_parses_snake_case() {
        let policy: RequiredPolicy = serde_yaml::from_str("reject").unwrap();
        assert_eq!(policy, RequiredPolicy::Reject);
        assert_eq!(RequiredPolicy::default(), RequiredPolicy::ForceEnable);
    }
}
