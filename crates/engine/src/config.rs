//! Orchestrator configuration.

use std::time::Duration;

use cartaporte_core::validation::VERSION_3_1;

use crate::error::EngineError;

/// Default debounce window for change-triggered validation.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default hard deadline around one authority call.
const DEFAULT_ORACLE_DEADLINE_SECS: u64 = 15;

/// Orchestrator settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet period after the last manifest change before validating.
    pub debounce: Duration,
    /// The authority call is abandoned (and treated as failed) after this.
    pub oracle_deadline: Duration,
    /// Version tag looked up in the rule registry.
    pub rule_version: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            oracle_deadline: Duration::from_secs(DEFAULT_ORACLE_DEADLINE_SECS),
            rule_version: VERSION_3_1.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default |
    /// |-----------------------------------|---------|
    /// | `VALIDATION_DEBOUNCE_MS`          | `500`   |
    /// | `VALIDATION_ORACLE_DEADLINE_SECS` | `15`    |
    /// | `CARTA_PORTE_VERSION`             | `3.1`   |
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let defaults = Self::default();

        let debounce = match var("VALIDATION_DEBOUNCE_MS") {
            Some(v) => Duration::from_millis(parse_u64("VALIDATION_DEBOUNCE_MS", &v)?),
            None => defaults.debounce,
        };
        let oracle_deadline = match var("VALIDATION_ORACLE_DEADLINE_SECS") {
            Some(v) => Duration::from_secs(parse_u64("VALIDATION_ORACLE_DEADLINE_SECS", &v)?),
            None => defaults.oracle_deadline,
        };
        if oracle_deadline.is_zero() {
            return Err(EngineError::Config(
                "VALIDATION_ORACLE_DEADLINE_SECS must be greater than 0".to_string(),
            ));
        }
        let rule_version = var("CARTA_PORTE_VERSION")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.rule_version);

        Ok(Self {
            debounce,
            oracle_deadline,
            rule_version,
        })
    }
}

fn parse_u64(name: &str, value: &str) -> Result<u64, EngineError> {
    value
        .trim()
        .parse()
        .map_err(|_| EngineError::Config(format!("{name} must be a valid u64, got '{value}'")))
}
