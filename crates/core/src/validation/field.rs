//! Field-level validators.
//!
//! Each function inspects one value (plus whatever sibling fields the rule
//! needs) and returns an [`Outcome`]. An empty outcome means the rule
//! passed. None of these functions allocate findings for valid data, touch
//! I/O, or read the clock: callers pass `now` explicitly.
//!
//! Field paths in missing-field findings are relative to the entity; the
//! list validators add the collection prefix.

use std::sync::LazyLock;

use regex::Regex;

use super::findings::{missing, Finding, Outcome};
use super::rules::RuleSet;
use crate::manifest::{
    CustomsDocument, Good, InsurancePeriod, LocationRole, Permit, TransportFigure,
};
use crate::types::{Date, Timestamp};

/// Absorbs representation error when comparing computed weights.
const FLOAT_SLACK: f64 = 1e-9;

static TAX_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z&Ñ]{3,4}\d{6}[A-Z0-9]{3}$").expect("valid regex"));

static ORIGIN_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^OR\d{6}$").expect("valid regex"));

static DESTINATION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DE\d{6}$").expect("valid regex"));

static CLASSIFICATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}$").expect("valid regex"));

/// Trimmed, non-empty view of an optional string.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn pass() -> Outcome {
    Vec::new()
}

// ---------------------------------------------------------------------------
// Manifest header
// ---------------------------------------------------------------------------

pub fn check_version(version: &str, rules: &RuleSet) -> Outcome {
    if version.trim().is_empty() {
        return missing("version", format!("version is required ({})", rules.version));
    }
    if version.trim() != rules.version {
        return vec![Finding::error(format!("version must be {}", rules.version))];
    }
    pass()
}

/// Length is checked first; the format is only checked on a correctly
/// sized identifier so a short value yields a single error.
pub fn check_identifier(identifier: &str, rules: &RuleSet) -> Outcome {
    if identifier.trim().is_empty() {
        return missing("identifier", "identifier is required");
    }
    if identifier.chars().count() != rules.identifier_length {
        return vec![Finding::error(format!(
            "identifier must be {} characters",
            rules.identifier_length
        ))];
    }
    if !rules.identifier_pattern.is_match(identifier) {
        return vec![Finding::error("identifier has an invalid format")];
    }
    pass()
}

/// Sender/receiver fiscal identifier (RFC).
pub fn check_tax_id(field: &str, value: Option<&String>) -> Outcome {
    let Some(tax_id) = present(value) else {
        return missing(field, format!("{field} is required"));
    };
    if !TAX_ID_RE.is_match(&tax_id.to_uppercase()) {
        return vec![Finding::error(format!("{field} is not a valid RFC"))];
    }
    pass()
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

pub fn check_location_identifier(role: LocationRole, value: Option<&String>) -> Outcome {
    let Some(id) = present(value) else {
        return missing("identifier", "identifier is required");
    };
    let pattern = match role {
        LocationRole::Origin => &*ORIGIN_ID_RE,
        LocationRole::Destination => &*DESTINATION_ID_RE,
        LocationRole::Intermediate => return pass(),
    };
    if !pattern.is_match(id) {
        let prefix = role.identifier_prefix().unwrap_or_default();
        return vec![Finding::error(format!(
            "{} identifier must be {prefix} followed by 6 digits",
            role.as_str()
        ))];
    }
    pass()
}

pub fn check_location_timestamp(value: Option<Timestamp>) -> Outcome {
    match value {
        Some(_) => pass(),
        None => missing("timestamp", "date and time are required"),
    }
}

/// Destinations must carry a positive traveled distance. Other roles are
/// not checked.
pub fn check_distance(role: LocationRole, distance_km: Option<f64>) -> Outcome {
    if role != LocationRole::Destination {
        return pass();
    }
    match distance_km {
        None => missing(
            "distance_km",
            "traveled distance is required for destinations",
        ),
        Some(d) if d > 0.0 => pass(),
        Some(_) => vec![Finding::error("traveled distance must be positive")],
    }
}

// ---------------------------------------------------------------------------
// Goods
// ---------------------------------------------------------------------------

pub fn check_good_description(value: Option<&String>) -> Outcome {
    match present(value) {
        Some(_) => pass(),
        None => missing("description", "description is required"),
    }
}

pub fn check_classification_code(value: Option<&String>) -> Outcome {
    let Some(code) = present(value) else {
        return missing("classification_code", "classification code is required");
    };
    if !CLASSIFICATION_RE.is_match(code) {
        return vec![Finding::error("classification code must be 8 digits")];
    }
    pass()
}

pub fn check_unit_code(value: Option<&String>) -> Outcome {
    match present(value) {
        Some(_) => pass(),
        None => missing("unit_code", "unit of measure is required"),
    }
}

pub fn check_quantity(quantity: f64) -> Outcome {
    if quantity > 0.0 {
        pass()
    } else {
        vec![Finding::error("quantity must be positive")]
    }
}

/// Presence, sign, and `gross == quantity * unit_weight` within the rule
/// set's tolerance. A consistency violation is always exactly one error.
pub fn check_gross_weight(good: &Good, rules: &RuleSet) -> Outcome {
    let Some(gross) = good.gross_weight_kg else {
        if rules.gross_weight_mandatory {
            return missing("gross_weight_kg", "gross weight is required");
        }
        return pass();
    };
    if !(gross > 0.0) {
        return vec![Finding::error("gross weight must be positive")];
    }
    match good.expected_gross_weight() {
        Some(expected) if (gross - expected).abs() > rules.weight_tolerance + FLOAT_SLACK => {
            vec![Finding::error(format!(
                "gross weight {gross} does not match quantity × unit weight ({expected})"
            ))]
        }
        Some(_) => pass(),
        None => vec![Finding::recommendation(
            "add the unit weight so the gross weight can be verified",
        )],
    }
}

pub fn check_value(value: Option<f64>) -> Outcome {
    match value {
        None => vec![Finding::recommendation("declare the goods value")],
        Some(v) if v < 0.0 => vec![Finding::error("value cannot be negative")],
        Some(_) => pass(),
    }
}

pub fn check_hazmat(good: &Good) -> Outcome {
    let code = present(good.hazmat_code.as_ref());
    match (good.hazardous, code) {
        (true, None) => missing("hazmat_code", "hazardous material requires a hazmat code"),
        (false, Some(_)) => vec![Finding::recommendation(
            "hazmat code given for a good not flagged as hazardous",
        )],
        _ => pass(),
    }
}

/// Protected species need a detailed description of the configured
/// minimum length and at least one permit.
pub fn check_protected_species(good: &Good, rules: &RuleSet) -> Outcome {
    if !good.protected_species {
        return pass();
    }
    let mut outcome = Vec::new();
    let min = rules.protected_description_min_chars;
    match present(good.detailed_description.as_ref()) {
        None => outcome.extend(missing(
            "detailed_description",
            format!("detailed description of at least {min} characters is required for protected species"),
        )),
        Some(text) if text.chars().count() < min => outcome.push(Finding::error(format!(
            "detailed description must be at least {min} characters for protected species"
        ))),
        Some(_) => {}
    }
    if good.permits.is_empty() {
        outcome.push(Finding::error(
            "protected species require at least one permit",
        ));
        outcome.push(Finding::missing_field("permits"));
    }
    outcome
}

pub fn check_permit(permit: &Permit, rules: &RuleSet, now: Timestamp) -> Outcome {
    let mut outcome = Vec::new();
    if present(permit.number.as_ref()).is_none() {
        outcome.extend(missing("number", "permit number is required"));
    }
    if present(permit.issuing_authority.as_ref()).is_none() {
        outcome.extend(missing(
            "issuing_authority",
            "issuing authority is required",
        ));
    }
    let Some(expires_on) = permit.expires_on else {
        outcome.extend(missing("expires_on", "permit expiry date is required"));
        return outcome;
    };
    if let Some(issued_on) = permit.issued_on {
        if issued_on > expires_on {
            outcome.push(Finding::error(
                "permit issue date is after its expiry date",
            ));
        }
    }
    let today = now.date_naive();
    if !permit.is_valid_at(now) {
        outcome.push(Finding::error(format!("permit expired on {expires_on}")));
    } else if (expires_on - today).num_days() <= rules.permit_expiry_horizon_days {
        outcome.push(Finding::recommendation(format!(
            "permit expires on {expires_on}; renew it before shipping"
        )));
    }
    outcome
}

pub fn check_cites(good: &Good) -> Outcome {
    if good.cites_required && !good.has_cites_document() {
        return vec![
            Finding::error("CITES-required goods need a CITES customs document"),
            Finding::missing_field("customs_documents"),
        ];
    }
    pass()
}

pub fn check_customs_document(document: &CustomsDocument) -> Outcome {
    match present(document.reference.as_ref()) {
        Some(_) => pass(),
        None => missing("reference", "document reference is required"),
    }
}

// ---------------------------------------------------------------------------
// Transport unit
// ---------------------------------------------------------------------------

pub fn check_gross_vehicle_weight(value: Option<f64>) -> Outcome {
    match value {
        None => missing(
            "gross_vehicle_weight_kg",
            "gross vehicle weight is required",
        ),
        Some(w) if w > 0.0 => pass(),
        Some(_) => vec![Finding::error("gross vehicle weight must be positive")],
    }
}

pub fn check_insurance(insurance: Option<&InsurancePeriod>, now: Timestamp) -> Outcome {
    let Some(period) = insurance else {
        return vec![Finding::recommendation("add the vehicle insurance period")];
    };
    let mut outcome = Vec::new();
    if period.starts_on > period.ends_on {
        outcome.push(Finding::warning("insurance period ends before it starts"));
    }
    if period.ends_on < now.date_naive() {
        outcome.push(Finding::warning(format!(
            "vehicle insurance expired on {}",
            period.ends_on
        )));
    }
    outcome
}

pub fn check_vin(value: Option<&String>, rules: &RuleSet) -> Outcome {
    let Some(vin) = present(value) else {
        return vec![Finding::recommendation(
            "add the vehicle identification number",
        )];
    };
    if vin.chars().count() != rules.vin_length {
        return vec![Finding::warning(format!(
            "vehicle identification number must be {} characters",
            rules.vin_length
        ))];
    }
    pass()
}

// ---------------------------------------------------------------------------
// Figures
// ---------------------------------------------------------------------------

pub fn check_license_type(value: Option<&String>) -> Outcome {
    match present(value) {
        Some(_) => pass(),
        None => missing("license_type", "operator license type is required"),
    }
}

pub fn check_license_validity(value: Option<Date>, now: Timestamp) -> Outcome {
    match value {
        None => missing(
            "license_valid_until",
            "operator license validity date is required",
        ),
        Some(d) if d < now.date_naive() => {
            vec![Finding::error(format!("operator license expired on {d}"))]
        }
        Some(_) => pass(),
    }
}

pub fn check_national_id(value: Option<&String>, rules: &RuleSet) -> Outcome {
    let Some(id) = present(value) else {
        return missing("national_id", "national identifier is required");
    };
    if id.chars().count() != rules.national_id_length {
        return vec![Finding::error(format!(
            "national identifier must be {} characters",
            rules.national_id_length
        ))];
    }
    pass()
}

/// All operator rules, in order. Non-operator figures pass.
pub fn check_operator(figure: &TransportFigure, rules: &RuleSet, now: Timestamp) -> Outcome {
    if figure.role != crate::manifest::FigureRole::Operator {
        return pass();
    }
    let mut outcome = check_license_type(figure.license_type.as_ref());
    outcome.extend(check_license_validity(figure.license_valid_until, now));
    outcome.extend(check_national_id(figure.national_id.as_ref(), rules));
    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
