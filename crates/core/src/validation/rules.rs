//! Versioned rule sets.
//!
//! Every schema-dependent constant lives on a [`RuleSet`]; validators read
//! the constants instead of hard-coding a version. [`RuleRegistry`] maps a
//! version tag to its rule set.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The schema version currently accepted by the authority.
pub const VERSION_3_1: &str = "3.1";

/// `CCC` followed by a UUID-v4-shaped suffix, 36 characters in total.
const IDENTIFIER_PATTERN_3_1: &str =
    r"^CCC[0-9A-Fa-f]{5}-[0-9A-Fa-f]{4}-4[0-9A-Fa-f]{3}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$";

static IDENTIFIER_RE_3_1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN_3_1).expect("valid regex"));

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// Schema-specific parameters consumed by the validators.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub version: &'static str,
    pub identifier_length: usize,
    pub identifier_pattern: &'static Regex,
    /// Minimum detailed-description length for protected species.
    pub protected_description_min_chars: usize,
    pub max_customs_regimes: usize,
    /// Allowed absolute difference between declared and computed gross weight.
    pub weight_tolerance: f64,
    pub gross_weight_mandatory: bool,
    /// Permits expiring within this many days get a renewal recommendation.
    pub permit_expiry_horizon_days: i64,
    pub national_id_length: usize,
    pub vin_length: usize,
}

impl RuleSet {
    /// Rules for schema version 3.1.
    pub fn v3_1() -> Self {
        Self {
            version: VERSION_3_1,
            identifier_length: 36,
            identifier_pattern: &*IDENTIFIER_RE_3_1,
            protected_description_min_chars: 50,
            max_customs_regimes: 10,
            weight_tolerance: 0.01,
            gross_weight_mandatory: true,
            permit_expiry_horizon_days: 30,
            national_id_length: 18,
            vin_length: 17,
        }
    }
}

// ---------------------------------------------------------------------------
// RuleRegistry
// ---------------------------------------------------------------------------

/// Rule sets keyed by version tag.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    sets: BTreeMap<&'static str, RuleSet>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with every built-in rule set.
    pub fn builtin() -> Self {
        let mut sets = BTreeMap::new();
        let v31 = RuleSet::v3_1();
        sets.insert(v31.version, v31);
        Self { sets }
    }

    /// Add a rule set. Registering the same version twice is an error.
    pub fn register(&mut self, rules: RuleSet) -> Result<(), CoreError> {
        if self.sets.contains_key(rules.version) {
            return Err(CoreError::DuplicateRuleSet(rules.version.to_string()));
        }
        self.sets.insert(rules.version, rules);
        Ok(())
    }

    /// Look up the rule set for `version`.
    pub fn get(&self, version: &str) -> Result<&RuleSet, CoreError> {
        self.sets
            .get(version)
            .ok_or_else(|| CoreError::UnsupportedVersion(version.to_string()))
    }

    /// Registered version tags in ascending order.
    pub fn versions(&self) -> Vec<&'static str> {
        self.sets.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn builtin_contains_3_1() {
        let registry = RuleRegistry::builtin();
        assert_eq!(registry.versions(), vec![VERSION_3_1]);
        let rules = registry.get("3.1").unwrap();
        assert_eq!(rules.identifier_length, 36);
        assert_eq!(rules.max_customs_regimes, 10);
    }

    #[test]
    fn unknown_version_is_error() {
        let registry = RuleRegistry::builtin();
        assert_matches!(
            registry.get("3.0"),
            Err(CoreError::UnsupportedVersion(v)) if v == "3.0"
        );
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = RuleRegistry::builtin();
        assert_matches!(
            registry.register(RuleSet::v3_1()),
            Err(CoreError::DuplicateRuleSet(_))
        );
    }

    #[test]
    fn identifier_pattern_accepts_canonical_form() {
        let rules = RuleSet::v3_1();
        let id = "CCC1A2B3-C4D5-4E6F-8A9B-0C1D2E3F4A5B";
        assert_eq!(id.len(), 36);
        assert!(rules.identifier_pattern.is_match(id));
        assert!(!rules
            .identifier_pattern
            .is_match("XYZ1A2B3-C4D5-4E6F-8A9B-0C1D2E3F4A5B"));
    }
}
