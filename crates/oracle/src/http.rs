//! HTTP client for the authority's validation endpoint.
//!
//! Sends `POST {base_url}/validate` with the manifest as JSON and decodes
//! the verdict body. One attempt per call.

use async_trait::async_trait;
use cartaporte_core::manifest::Manifest;
use cartaporte_core::validation::RemoteVerdict;

use crate::config::OracleConfig;
use crate::ComplianceOracle;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the remote check.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The authority returned a non-2xx status code.
    #[error("Authority returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body is not a verdict.
    #[error("Malformed verdict: {0}")]
    Decode(#[from] serde_json::Error),
}

impl OracleError {
    /// Authentication or authorization was refused.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

// ---------------------------------------------------------------------------
// HttpOracle
// ---------------------------------------------------------------------------

/// reqwest-backed [`ComplianceOracle`].
pub struct HttpOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl HttpOracle {
    /// Build a client honoring the configured timeout.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling). The
    /// client's own timeout applies.
    pub fn with_client(client: reqwest::Client, config: OracleConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/validate", self.config.base_url)
    }

    /// Ensure the response has a success status code, or capture the
    /// status and body text as [`OracleError::Status`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, OracleError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ComplianceOracle for HttpOracle {
    async fn verify(&self, manifest: &Manifest) -> Result<RemoteVerdict, OracleError> {
        let mut request = self.client.post(self.endpoint()).json(manifest);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = Self::ensure_success(request.send().await?).await?;
        let body = response.text().await?;
        let verdict: RemoteVerdict = serde_json::from_str(&body)?;

        tracing::debug!(
            identifier = %manifest.identifier,
            valid = verdict.valid,
            errors = verdict.errors.len(),
            score = verdict.score,
            "Authority verdict received",
        );
        Ok(verdict)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
