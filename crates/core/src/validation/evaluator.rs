//! Local manifest evaluator. Pure logic, no I/O.

use super::aggregate::validate_aggregates;
use super::field;
use super::findings::Findings;
use super::lists::{validate_figures, validate_goods, validate_locations, validate_transport_unit};
use super::result::ValidationResult;
use super::rules::RuleSet;
use crate::manifest::Manifest;
use crate::types::Timestamp;

/// Evaluate every local rule against a manifest snapshot.
///
/// Order: header fields, then locations, goods, transport unit and
/// figures, then the cross-entity rules. The output is fully determined
/// by `(manifest, rules, now)`.
pub fn evaluate_manifest(manifest: &Manifest, rules: &RuleSet, now: Timestamp) -> ValidationResult {
    ValidationResult::from_local(collect_findings(manifest, rules, now))
}

/// The raw findings behind [`evaluate_manifest`].
pub fn collect_findings(manifest: &Manifest, rules: &RuleSet, now: Timestamp) -> Findings {
    let mut findings = Findings::new();

    findings.extend(field::check_version(&manifest.version, rules));
    findings.extend(field::check_identifier(&manifest.identifier, rules));
    findings.extend(field::check_tax_id(
        "sender_tax_id",
        manifest.sender_tax_id.as_ref(),
    ));
    findings.extend(field::check_tax_id(
        "receiver_tax_id",
        manifest.receiver_tax_id.as_ref(),
    ));

    validate_locations(&manifest.locations, &mut findings);
    validate_goods(&manifest.goods, rules, now, &mut findings);
    validate_transport_unit(&manifest.transport_unit, rules, now, &mut findings);
    validate_figures(&manifest.figures, rules, now, &mut findings);

    validate_aggregates(manifest, rules, &mut findings);

    findings
}
