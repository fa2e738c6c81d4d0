use cartaporte_core::error::CoreError;
use cartaporte_oracle::OracleError;

/// Errors raised while assembling an orchestrator. Validation runs
/// themselves never fail: faults are folded into the result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Rules(#[from] CoreError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
