//! Shared fixtures for orchestrator tests: a compliant manifest and a
//! scripted authority double.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cartaporte_core::manifest::{
    FigureRole, Good, InsurancePeriod, Location, LocationRole, Manifest, TransportFigure,
    TransportUnit,
};
use cartaporte_core::types::{Date, Timestamp};
use cartaporte_core::validation::RemoteVerdict;
use cartaporte_oracle::{ComplianceOracle, OracleError};
use chrono::TimeZone;

pub fn fixed_now() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

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
        goods: vec![Good {
            description: Some("Cajas de carton corrugado".to_string()),
            classification_code: Some("24121500".to_string()),
            unit_code: Some("H87".to_string()),
            quantity: 10.0,
            unit_weight_kg: Some(5.0),
            gross_weight_kg: Some(50.0),
            value: Some(1500.0),
            ..Default::default()
        }],
        transport_unit: TransportUnit {
            gross_vehicle_weight_kg: Some(15_000.0),
            insurance: Some(InsurancePeriod {
                starts_on: date(2026, 1, 1),
                ends_on: date(2026, 12, 31),
            }),
            vin: Some("1HGCM82633A004352".to_string()),
        },
        figures: vec![TransportFigure {
            role: FigureRole::Operator,
            name: Some("Juan Perez".to_string()),
            license_type: Some("E".to_string()),
            license_valid_until: Some(date(2027, 6, 30)),
            national_id: Some("GODE561231HDFRRN09".to_string()),
            sct_operator: true,
        }],
        customs_regimes: Vec::new(),
    }
}

pub fn approving_verdict() -> RemoteVerdict {
    RemoteVerdict {
        valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
        score: 100.0,
    }
}

/// One scripted reply: how long the call takes and what it returns.
pub enum Reply {
    Verdict(Duration, RemoteVerdict),
    Unavailable(Duration),
}

/// Authority double returning scripted replies in call order. Once the
/// script is exhausted every call approves immediately.
#[derive(Default)]
pub struct ScriptedOracle {
    script: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Identifiers of the manifests received, in call order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ComplianceOracle for ScriptedOracle {
    async fn verify(&self, manifest: &Manifest) -> Result<RemoteVerdict, OracleError> {
        self.seen.lock().unwrap().push(manifest.identifier.clone());
        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Verdict(delay, verdict)) => {
                tokio::time::sleep(delay).await;
                Ok(verdict)
            }
            Some(Reply::Unavailable(delay)) => {
                tokio::time::sleep(delay).await;
                Err(OracleError::Status {
                    status: 503,
                    body: "service unavailable".to_string(),
                })
            }
            None => Ok(approving_verdict()),
        }
    }
}

/// Authority double whose every call panics.
pub struct PanickingOracle;

#[async_trait]
impl ComplianceOracle for PanickingOracle {
    async fn verify(&self, _manifest: &Manifest) -> Result<RemoteVerdict, OracleError> {
        panic!("authority client invariant broken");
    }
}

/// Clock that panics, breaking local evaluation.
pub fn broken_clock() -> Timestamp {
    panic!("clock unavailable");
}
