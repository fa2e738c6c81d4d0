//! Finding types and the ordered accumulator used by the validators.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How a finding affects the manifest's submittability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Blocks submission and costs score.
    Error,
    /// Non-blocking, costs a little score.
    Warning,
    /// Informational: drives field highlighting.
    MissingField,
    /// Informational: never blocks, never penalized.
    Recommendation,
}

/// A single outcome of a field-level rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub message: String,
    /// Field path for missing-field findings (e.g. `goods[1].description`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Error,
            message: message.into(),
            field: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Warning,
            message: message.into(),
            field: None,
        }
    }

    pub fn recommendation(message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Recommendation,
            message: message.into(),
            field: None,
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            kind: FindingKind::MissingField,
            message: format!("{field} is missing"),
            field: Some(field),
        }
    }
}

/// Result of one field-level rule. Empty means the rule passed.
pub type Outcome = Vec<Finding>;

/// A mandatory value is absent: one blocking error plus the missing-field
/// advisory for the same path.
pub fn missing(field: &str, message: impl Into<String>) -> Outcome {
    vec![Finding::error(message), Finding::missing_field(field)]
}

// ---------------------------------------------------------------------------
// Findings accumulator
// ---------------------------------------------------------------------------

/// Ordered accumulation of findings across a whole evaluation.
///
/// Errors, warnings and recommendations keep insertion order. Missing
/// fields are a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub missing_fields: BTreeSet<String>,
    pub recommendations: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        match finding.kind {
            FindingKind::Error => self.errors.push(finding.message),
            FindingKind::Warning => self.warnings.push(finding.message),
            FindingKind::Recommendation => self.recommendations.push(finding.message),
            FindingKind::MissingField => {
                if let Some(field) = finding.field {
                    self.missing_fields.insert(field);
                }
            }
        }
    }

    pub fn extend(&mut self, outcome: Outcome) {
        for finding in outcome {
            self.push(finding);
        }
    }

    /// Add `outcome` with every message prefixed by `label` (e.g.
    /// `"Location #2: "`) and every field path by `path` (e.g.
    /// `"locations[2]."`).
    pub fn extend_prefixed(&mut self, label: &str, path: &str, outcome: Outcome) {
        for mut finding in outcome {
            finding.message = format!("{label}{}", finding.message);
            finding.field = finding.field.map(|f| format!("{path}{f}"));
            self.push(finding);
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Prefix every message and field path of an outcome without flattening it
/// into a [`Findings`]. Used for nested collections (permits inside goods).
pub fn prefix_outcome(label: &str, path: &str, outcome: Outcome) -> Outcome {
    outcome
        .into_iter()
        .map(|mut f| {
            f.message = format!("{label}{}", f.message);
            f.field = f.field.map(|p| format!("{path}{p}"));
            f
        })
        .collect()
}
