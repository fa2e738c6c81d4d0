//! Carta Porte manifest data model.
//!
//! Plain data carriers for the shipment manifest under validation. The
//! editing layer owns and mutates these values; the validators only read
//! them. No invariant is enforced at construction time: a manifest may be
//! arbitrarily incomplete, and every gap is reported as a finding by
//! [`crate::validation`].

use serde::{Deserialize, Serialize};

use crate::types::{Date, Timestamp};

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// A shipment manifest ("Carta Porte") as edited by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Schema version tag, e.g. `"3.1"`.
    pub version: String,
    /// 36-character manifest identifier (`CCC` + UUID-shaped suffix).
    pub identifier: String,
    /// Fiscal identifier (RFC) of the sender.
    pub sender_tax_id: Option<String>,
    /// Fiscal identifier (RFC) of the receiver.
    pub receiver_tax_id: Option<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub goods: Vec<Good>,
    #[serde(default)]
    pub transport_unit: TransportUnit,
    #[serde(default)]
    pub figures: Vec<TransportFigure>,
    /// Customs-regime codes; at most ten are accepted.
    #[serde(default)]
    pub customs_regimes: Vec<String>,
}

impl Manifest {
    /// Sum of every good's declared gross weight. Goods without a gross
    /// weight contribute nothing.
    pub fn total_gross_weight(&self) -> f64 {
        self.goods.iter().filter_map(|g| g.gross_weight_kg).sum()
    }

    /// Sum of the traveled distance declared on destination locations.
    pub fn total_distance_km(&self) -> f64 {
        self.locations
            .iter()
            .filter(|l| l.role == LocationRole::Destination)
            .filter_map(|l| l.distance_km)
            .sum()
    }

    /// Operator figures, in declaration order.
    pub fn operators(&self) -> impl Iterator<Item = &TransportFigure> {
        self.figures
            .iter()
            .filter(|f| f.role == FigureRole::Operator)
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationRole {
    Origin,
    Destination,
    Intermediate,
}

impl LocationRole {
    /// Required identifier prefix for this role, if any.
    pub fn identifier_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Origin => Some("OR"),
            Self::Destination => Some("DE"),
            Self::Intermediate => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::Intermediate => "intermediate",
        }
    }
}

/// A stop on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub role: LocationRole,
    /// `OR` + 6 digits for origins, `DE` + 6 digits for destinations.
    pub identifier: Option<String>,
    /// Departure time for origins, arrival time otherwise.
    pub timestamp: Option<Timestamp>,
    /// Traveled distance; required and positive on destinations.
    pub distance_km: Option<f64>,
}

// ---------------------------------------------------------------------------
// Goods
// ---------------------------------------------------------------------------

/// One line of cargo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Good {
    pub description: Option<String>,
    /// Mandatory (and at least 50 characters) for protected species.
    pub detailed_description: Option<String>,
    /// Eight-digit product/service classification key.
    pub classification_code: Option<String>,
    pub unit_code: Option<String>,
    pub quantity: f64,
    pub unit_weight_kg: Option<f64>,
    /// Must equal `quantity * unit_weight_kg` within tolerance.
    pub gross_weight_kg: Option<f64>,
    pub value: Option<f64>,
    #[serde(default)]
    pub hazardous: bool,
    pub hazmat_code: Option<String>,
    #[serde(default)]
    pub protected_species: bool,
    #[serde(default)]
    pub cites_required: bool,
    #[serde(default)]
    pub permits: Vec<Permit>,
    #[serde(default)]
    pub customs_documents: Vec<CustomsDocument>,
}

impl Good {
    /// `quantity * unit_weight_kg`, when the unit weight is known.
    pub fn expected_gross_weight(&self) -> Option<f64> {
        self.unit_weight_kg.map(|w| self.quantity * w)
    }

    /// Whether at least one attached customs document is CITES paperwork.
    pub fn has_cites_document(&self) -> bool {
        self.customs_documents
            .iter()
            .any(|d| d.document_type == CustomsDocumentType::Cites)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitType {
    Transfer,
    UsageAuthorization,
    LegalOrigin,
}

/// A time-bounded authorization attached to a protected-species good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permit {
    pub permit_type: PermitType,
    pub number: Option<String>,
    pub issued_on: Option<Date>,
    pub expires_on: Option<Date>,
    pub issuing_authority: Option<String>,
}

impl Permit {
    /// A permit is valid while `expires_on >= now` (date comparison).
    /// A permit with no expiry date is never valid.
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        self.expires_on
            .is_some_and(|expiry| expiry >= now.date_naive())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomsDocumentType {
    Cites,
    Pedimento,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomsDocument {
    pub document_type: CustomsDocumentType,
    pub reference: Option<String>,
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// The motor vehicle carrying the cargo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportUnit {
    /// Mandatory and positive.
    pub gross_vehicle_weight_kg: Option<f64>,
    pub insurance: Option<InsurancePeriod>,
    /// Vehicle identification number (17 characters when present).
    pub vin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePeriod {
    pub starts_on: Date,
    pub ends_on: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureRole {
    Operator,
    Other,
}

/// A person or company taking part in the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportFigure {
    pub role: FigureRole,
    pub name: Option<String>,
    pub license_type: Option<String>,
    pub license_valid_until: Option<Date>,
    /// 18-character national personal identifier.
    pub national_id: Option<String>,
    #[serde(default)]
    pub sct_operator: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
