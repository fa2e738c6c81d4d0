//! Client side of the authority's remote compliance check.
//!
//! The authority's rules are opaque: this crate only ships a manifest and
//! decodes `{valid, errors, warnings, score}` back into a
//! [`RemoteVerdict`]. Retries are the caller's concern.
//!
//! - [`ComplianceOracle`] — the seam the orchestrator depends on.
//! - [`HttpOracle`] — reqwest-backed implementation.
//! - [`OracleConfig`] — environment configuration.

pub mod config;
pub mod http;

use async_trait::async_trait;
use cartaporte_core::manifest::Manifest;
use cartaporte_core::validation::RemoteVerdict;

pub use config::OracleConfig;
pub use http::{HttpOracle, OracleError};

/// An authoritative, remote source of validation verdicts.
#[async_trait]
pub trait ComplianceOracle: Send + Sync {
    /// Submit a manifest snapshot and return the authority's verdict.
    async fn verify(&self, manifest: &Manifest) -> Result<RemoteVerdict, OracleError>;
}
