//! Oracle endpoint configuration.

use std::time::Duration;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the authority endpoint.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL, e.g. `https://authority.example/api`. No trailing slash.
    pub base_url: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// HTTP timeout for a single request.
    pub timeout: Duration,
}

impl OracleConfig {
    /// Configuration with the default timeout and no credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `ORACLE_URL` is not set.
    ///
    /// | Variable              | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `ORACLE_URL`          | yes      | —       |
    /// | `ORACLE_API_KEY`      | no       | —       |
    /// | `ORACLE_TIMEOUT_SECS` | no       | `10`    |
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let base_url = var("ORACLE_URL").filter(|u| !u.trim().is_empty())?;
        let timeout_secs = var("ORACLE_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            api_key: var("ORACLE_API_KEY").filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(timeout_secs),
            ..Self::new(base_url)
        })
    }
}
