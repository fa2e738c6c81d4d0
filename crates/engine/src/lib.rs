//! Validation orchestrator for Carta Porte manifests.
//!
//! The only entry point the editing layer talks to. Runs the local rules
//! from `cartaporte-core`, asks the authority through a
//! [`ComplianceOracle`](cartaporte_oracle::ComplianceOracle), merges both
//! results pessimistically and publishes the latest one.
//!
//! - [`ValidationOrchestrator`] — sequence-numbered runs, last trigger wins.
//! - [`ValidationState`] — `Idle → Validating → Settled`.
//! - [`EngineConfig`] — debounce window, oracle deadline, rule version.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod state;
pub mod telemetry;

pub use config::EngineConfig;
pub use error::EngineError;
pub use orchestrator::ValidationOrchestrator;
pub use state::ValidationState;
