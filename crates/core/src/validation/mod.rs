//! Carta Porte compliance validation.
//!
//! Field rules, list and cross-entity validators, scoring, and the merge
//! of remote and local results. Everything here is pure: no I/O, no clock.

pub mod aggregate;
pub mod evaluator;
pub mod field;
pub mod findings;
pub mod lists;
pub mod merge;
pub mod result;
pub mod rules;
pub mod score;

pub use evaluator::evaluate_manifest;
pub use findings::{Finding, FindingKind, Findings, Outcome};
pub use merge::merge;
pub use result::{RemoteVerdict, ValidationResult, INTERNAL_FAILURE_MESSAGE};
pub use rules::{RuleRegistry, RuleSet, VERSION_3_1};
