//! Shared fixtures for core integration tests.

use cartaporte_core::manifest::{
    FigureRole, Good, InsurancePeriod, Location, LocationRole, Manifest, TransportFigure,
    TransportUnit,
};
use cartaporte_core::types::{Date, Timestamp};
use chrono::TimeZone;

/// Fixed evaluation instant so results are reproducible.
pub fn now() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

pub fn compliant_good() -> Good {
    Good {
        description: Some("Cajas de carton corrugado".to_string()),
        detailed_description: None,
        classification_code: Some("24121500".to_string()),
        unit_code: Some("H87".to_string()),
        quantity: 10.0,
        unit_weight_kg: Some(5.0),
        gross_weight_kg: Some(50.0),
        value: Some(1500.0),
        hazardous: false,
        hazmat_code: None,
        protected_species: false,
        cites_required: false,
        permits: Vec::new(),
        customs_documents: Vec::new(),
    }
}

pub fn operator() -> TransportFigure {
    TransportFigure {
        role: FigureRole::Operator,
        name: Some("Juan Perez".to_string()),
        license_type: Some("E".to_string()),
        license_valid_until: Some(date(2027, 6, 30)),
        national_id: Some("GODE561231HDFRRN09".to_string()),
        sct_operator: true,
    }
}

/// One origin, one destination, one good, one operator: passes every rule.
pub fn compliant_manifest() -> Manifest {
    Manifest {
        version: "3.1".to_string(),
        identifier: "CCC1A2B3-C4D5-4E6F-8A9B-0C1D2E3F4A5B".to_string(),
        sender_tax_id: Some("EKU9003173C9".to_string()),
        receiver_tax_id: Some("GODE561231GR8".to_string()),
        locations: vec![
            Location {
                role: LocationRole::Origin,
                identifier: Some("OR000001".to_string()),
                timestamp: Some(chrono::Utc.with_ymd_and_hms(2026, 3, 15, 8, 0, 0).unwrap()),
                distance_km: None,
            },
            Location {
                role: LocationRole::Destination,
                identifier: Some("DE000002".to_string()),
                timestamp: Some(chrono::Utc.with_ymd_and_hms(2026, 3, 15, 18, 0, 0).unwrap()),
                distance_km: Some(350.0),
            },
        ],
        goods: vec![compliant_good()],
        transport_unit: TransportUnit {
            gross_vehicle_weight_kg: Some(15_000.0),
            insurance: Some(InsurancePeriod {
                starts_on: date(2026, 1, 1),
                ends_on: date(2026, 12, 31),
            }),
            vin: Some("1HGCM82633A004352".to_string()),
        },
        figures: vec![operator()],
        customs_regimes: Vec::new(),
    }
}
