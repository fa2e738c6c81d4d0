//! Pessimistic merge of the remote and local results.

use super::result::ValidationResult;

/// Combine the authoritative `remote` result with the `local` one so that
/// neither source can mask a failure reported by the other.
///
/// - validity is the AND of both
/// - errors and warnings are concatenated, remote first, without
///   deduplication
/// - the score is the minimum of both
/// - missing fields and recommendations come from `local` only
///
/// Argument order matters for the message lists: always pass the remote
/// result first.
pub fn merge(remote: ValidationResult, local: ValidationResult) -> ValidationResult {
    let mut errors = remote.errors;
    errors.extend(local.errors);
    let mut warnings = remote.warnings;
    warnings.extend(local.warnings);

    ValidationResult {
        is_valid: remote.is_valid && local.is_valid,
        errors,
        warnings,
        completeness_score: remote.completeness_score.min(local.completeness_score),
        missing_fields: local.missing_fields,
        recommendations: local.recommendations,
    }
}
