//! The canonical validation result and its two source adapters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::findings::Findings;
use super::score::completeness_score;

/// Message of the synthetic error appended when the authoritative check
/// could not be completed.
pub const INTERNAL_FAILURE_MESSAGE: &str = "internal validation failure";

/// Aggregated outcome of validating one manifest.
///
/// Recomputed from scratch on every run; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// 0–100.
    pub completeness_score: u8,
    pub missing_fields: BTreeSet<String>,
    pub recommendations: Vec<String>,
}

/// Response shape of the authoritative remote check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteVerdict {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub score: f64,
}

impl ValidationResult {
    /// Normalize a remote verdict. The score is rounded and clamped to
    /// 0–100 (non-finite scores become 0). The remote source produces no
    /// missing fields or recommendations.
    pub fn from_remote(verdict: RemoteVerdict) -> Self {
        let score = if verdict.score.is_finite() {
            verdict.score.round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        Self {
            is_valid: verdict.valid,
            errors: verdict.errors,
            warnings: verdict.warnings,
            completeness_score: score,
            missing_fields: BTreeSet::new(),
            recommendations: Vec::new(),
        }
    }

    /// Build the local result from accumulated findings.
    pub fn from_local(findings: Findings) -> Self {
        let score = completeness_score(findings.error_count(), findings.warning_count());
        Self {
            is_valid: findings.errors.is_empty(),
            errors: findings.errors,
            warnings: findings.warnings,
            completeness_score: score,
            missing_fields: findings.missing_fields,
            recommendations: findings.recommendations,
        }
    }

    /// Result for a run where not even local evaluation could complete.
    pub fn internal_failure() -> Self {
        Self {
            is_valid: false,
            errors: vec![INTERNAL_FAILURE_MESSAGE.to_string()],
            warnings: Vec::new(),
            completeness_score: 0,
            missing_fields: BTreeSet::new(),
            recommendations: Vec::new(),
        }
    }

    /// The local result, marked invalid with a single synthetic error.
    /// Used when the authoritative check fails; the score is left as
    /// computed locally.
    pub fn with_internal_failure(mut self) -> Self {
        self.is_valid = false;
        self.errors.push(INTERNAL_FAILURE_MESSAGE.to_string());
        self
    }
}
