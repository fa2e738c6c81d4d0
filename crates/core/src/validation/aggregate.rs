//! Cross-entity validators.
//!
//! Rules reading more than one entity. They run after the list validators
//! since they consume per-good totals the list pass has already checked.

use std::collections::BTreeMap;

use super::findings::{Finding, Findings};
use super::rules::RuleSet;
use crate::manifest::{LocationRole, Manifest};

/// Sum of goods gross weight against the vehicle's gross weight. A
/// violation is a warning, never an error.
pub fn check_cargo_weight(manifest: &Manifest, findings: &mut Findings) {
    let Some(capacity) = manifest.transport_unit.gross_vehicle_weight_kg else {
        return;
    };
    if capacity <= 0.0 {
        return;
    }
    let total = manifest.total_gross_weight();
    if total > capacity {
        findings.push(Finding::warning(format!(
            "total cargo weight {total} kg exceeds vehicle gross weight {capacity} kg"
        )));
    }
}

pub fn check_customs_regimes(manifest: &Manifest, rules: &RuleSet, findings: &mut Findings) {
    if manifest.customs_regimes.len() > rules.max_customs_regimes {
        findings.push(Finding::error(format!(
            "maximum {} regimes",
            rules.max_customs_regimes
        )));
    }
}

/// Each duplicated identifier is reported once, in first-seen order.
pub fn check_duplicate_locations(manifest: &Manifest, findings: &mut Findings) {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    let mut order = Vec::new();
    for id in manifest
        .locations
        .iter()
        .filter_map(|l| l.identifier.as_deref())
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        let count = seen.entry(id).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(id);
        }
    }
    for id in order {
        findings.push(Finding::warning(format!(
            "location identifier {id} is used more than once"
        )));
    }
}

/// Arrivals earlier than the earliest departure.
pub fn check_route_chronology(manifest: &Manifest, findings: &mut Findings) {
    let Some(departure) = manifest
        .locations
        .iter()
        .filter(|l| l.role == LocationRole::Origin)
        .filter_map(|l| l.timestamp)
        .min()
    else {
        return;
    };
    for (index, location) in manifest.locations.iter().enumerate() {
        if location.role == LocationRole::Origin {
            continue;
        }
        if let Some(arrival) = location.timestamp {
            if arrival < departure {
                findings.push(Finding::warning(format!(
                    "Location #{}: arrival is earlier than departure",
                    index + 1
                )));
            }
        }
    }
}

pub fn check_hazmat_operator(manifest: &Manifest, findings: &mut Findings) {
    let hazardous = manifest.goods.iter().any(|g| g.hazardous);
    if hazardous && !manifest.operators().any(|f| f.sct_operator) {
        findings.push(Finding::recommendation(
            "hazardous cargo should be driven by an SCT-registered operator",
        ));
    }
}

/// All aggregate rules, in fixed order.
pub fn validate_aggregates(manifest: &Manifest, rules: &RuleSet, findings: &mut Findings) {
    check_cargo_weight(manifest, findings);
    check_customs_regimes(manifest, rules, findings);
    check_duplicate_locations(manifest, findings);
    check_route_chronology(manifest, findings);
    check_hazmat_operator(manifest, findings);
}
