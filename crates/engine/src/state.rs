//! Orchestrator state machine.

use cartaporte_core::validation::ValidationResult;
use serde::Serialize;

/// Observable state of the orchestrator.
///
/// `Idle` only before the first trigger. Every trigger moves to
/// `Validating` with its sequence number; only the run holding the highest
/// issued sequence number may move to `Settled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ValidationState {
    Idle,
    Validating {
        seq: u64,
    },
    Settled {
        seq: u64,
        result: ValidationResult,
    },
}

impl ValidationState {
    /// The settled result, if any.
    pub fn result(&self) -> Option<&ValidationResult> {
        match self {
            Self::Settled { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Sequence number of the trigger this state belongs to (0 when idle).
    pub fn seq(&self) -> u64 {
        match self {
            Self::Idle => 0,
            Self::Validating { seq } | Self::Settled { seq, .. } => *seq,
        }
    }

    pub fn is_validating(&self) -> bool {
        matches!(self, Self::Validating { .. })
    }
}
