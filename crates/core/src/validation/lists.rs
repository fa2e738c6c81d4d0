//! Entity-list validators.
//!
//! Apply the field rules to every element of an ordered collection and
//! flatten the outcomes into a [`Findings`]. Messages are prefixed with the
//! element's 1-based position (`"Location #2: "`) and field paths with the
//! collection index (`"locations[2]."`). Findings are emitted in collection
//! order, then rule order within an element.

use super::field;
use super::findings::{prefix_outcome, Finding, Findings, Outcome};
use super::rules::RuleSet;
use crate::manifest::{FigureRole, Good, Location, LocationRole, TransportFigure, TransportUnit};
use crate::types::Timestamp;

pub fn validate_locations(locations: &[Location], findings: &mut Findings) {
    for (index, location) in locations.iter().enumerate() {
        let n = index + 1;
        let mut outcome =
            field::check_location_identifier(location.role, location.identifier.as_ref());
        outcome.extend(field::check_location_timestamp(location.timestamp));
        outcome.extend(field::check_distance(location.role, location.distance_km));
        findings.extend_prefixed(&format!("Location #{n}: "), &format!("locations[{n}]."), outcome);
    }

    if !locations.iter().any(|l| l.role == LocationRole::Origin) {
        findings.push(Finding::error("at least one origin location is required"));
        findings.push(Finding::missing_field("locations.origin"));
    }
    if !locations.iter().any(|l| l.role == LocationRole::Destination) {
        findings.push(Finding::error(
            "at least one destination location is required",
        ));
        findings.push(Finding::missing_field("locations.destination"));
    }
}

/// Rules for a single good, nested permits and documents included.
fn good_outcome(good: &Good, rules: &RuleSet, now: Timestamp) -> Outcome {
    let mut outcome = field::check_good_description(good.description.as_ref());
    outcome.extend(field::check_classification_code(
        good.classification_code.as_ref(),
    ));
    outcome.extend(field::check_unit_code(good.unit_code.as_ref()));
    outcome.extend(field::check_quantity(good.quantity));
    outcome.extend(field::check_gross_weight(good, rules));
    outcome.extend(field::check_value(good.value));
    outcome.extend(field::check_hazmat(good));
    outcome.extend(field::check_protected_species(good, rules));
    outcome.extend(field::check_cites(good));

    for (index, permit) in good.permits.iter().enumerate() {
        let n = index + 1;
        outcome.extend(prefix_outcome(
            &format!("Permit #{n}: "),
            &format!("permits[{n}]."),
            field::check_permit(permit, rules, now),
        ));
    }
    for (index, document) in good.customs_documents.iter().enumerate() {
        let n = index + 1;
        outcome.extend(prefix_outcome(
            &format!("Document #{n}: "),
            &format!("customs_documents[{n}]."),
            field::check_customs_document(document),
        ));
    }
    outcome
}

pub fn validate_goods(goods: &[Good], rules: &RuleSet, now: Timestamp, findings: &mut Findings) {
    if goods.is_empty() {
        findings.push(Finding::error("at least one good is required"));
        findings.push(Finding::missing_field("goods"));
        return;
    }
    for (index, good) in goods.iter().enumerate() {
        let n = index + 1;
        findings.extend_prefixed(
            &format!("Good #{n}: "),
            &format!("goods[{n}]."),
            good_outcome(good, rules, now),
        );
    }
}

/// The transport unit is a single entity, validated under a fixed label.
pub fn validate_transport_unit(
    unit: &TransportUnit,
    rules: &RuleSet,
    now: Timestamp,
    findings: &mut Findings,
) {
    let mut outcome = field::check_gross_vehicle_weight(unit.gross_vehicle_weight_kg);
    outcome.extend(field::check_insurance(unit.insurance.as_ref(), now));
    outcome.extend(field::check_vin(unit.vin.as_ref(), rules));
    findings.extend_prefixed("Transport unit: ", "transport_unit.", outcome);
}

pub fn validate_figures(
    figures: &[TransportFigure],
    rules: &RuleSet,
    now: Timestamp,
    findings: &mut Findings,
) {
    for (index, figure) in figures.iter().enumerate() {
        let n = index + 1;
        findings.extend_prefixed(
            &format!("Figure #{n}: "),
            &format!("figures[{n}]."),
            field::check_operator(figure, rules, now),
        );
    }
    if !figures.iter().any(|f| f.role == FigureRole::Operator) {
        findings.push(Finding::error("at least one operator is required"));
        findings.push(Finding::missing_field("figures"));
    }
}
