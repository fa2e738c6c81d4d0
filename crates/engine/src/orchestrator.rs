//! Validation orchestrator.
//!
//! Every trigger (an explicit [`validate`](ValidationOrchestrator::validate)
//! call, or a debounced manifest change seen by
//! [`watch_changes`](ValidationOrchestrator::watch_changes)) takes a
//! snapshot of the manifest and a sequence number. When the run finishes,
//! its result is published only if no later trigger has started in the
//! meantime; otherwise it is dropped without error. In-flight authority
//! calls are never cancelled.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cartaporte_core::manifest::Manifest;
use cartaporte_core::types::Timestamp;
use cartaporte_core::validation::{
    evaluate_manifest, merge, RuleRegistry, RuleSet, ValidationResult,
};
use cartaporte_oracle::{ComplianceOracle, HttpOracle, OracleConfig};
use futures::FutureExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::state::ValidationState;

/// Runs local and authoritative validation and publishes the latest result.
pub struct ValidationOrchestrator {
    oracle: Arc<dyn ComplianceOracle>,
    rules: RuleSet,
    config: EngineConfig,
    clock: fn() -> Timestamp,
    /// Highest sequence number issued so far.
    issued: AtomicU64,
    state: watch::Sender<ValidationState>,
}

impl std::fmt::Debug for ValidationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationOrchestrator")
            .field("rules", &self.rules)
            .field("config", &self.config)
            .field("issued", &self.issued)
            .finish_non_exhaustive()
    }
}

impl ValidationOrchestrator {
    /// Create an orchestrator with an explicit rule set.
    pub fn new(oracle: Arc<dyn ComplianceOracle>, rules: RuleSet, config: EngineConfig) -> Self {
        let (state, _) = watch::channel(ValidationState::Idle);
        Self {
            oracle,
            rules,
            config,
            clock: chrono::Utc::now,
            issued: AtomicU64::new(0),
            state,
        }
    }

    /// Create an orchestrator using the registry entry for
    /// `config.rule_version`.
    pub fn from_registry(
        oracle: Arc<dyn ComplianceOracle>,
        registry: &RuleRegistry,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let rules = registry.get(&config.rule_version)?.clone();
        Ok(Self::new(oracle, rules, config))
    }

    /// Build an HTTP-backed orchestrator from the environment (`.env` is
    /// loaded if present). `ORACLE_URL` is required.
    pub fn from_env() -> Result<Self, EngineError> {
        dotenvy::dotenv().ok();

        let oracle_config = OracleConfig::from_env()
            .ok_or_else(|| EngineError::Config("ORACLE_URL is required".to_string()))?;
        let config = EngineConfig::from_env()?;
        let oracle = HttpOracle::new(oracle_config)?;

        tracing::info!(
            rule_version = %config.rule_version,
            debounce_ms = config.debounce.as_millis() as u64,
            "Validation orchestrator configured",
        );
        Self::from_registry(Arc::new(oracle), &RuleRegistry::builtin(), config)
    }

    /// Replace the wall clock used for date-based rules.
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ValidationState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> ValidationState {
        self.state.borrow().clone()
    }

    /// Highest sequence number issued so far (0 before the first trigger).
    pub fn latest_sequence(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a snapshot of `manifest` now.
    ///
    /// Returns the merged result if it was published, or `None` if a newer
    /// trigger started while this one was in flight.
    ///
    /// Dropping the returned future mid-run leaves the state at
    /// `Validating` until the next trigger settles, so callers should let
    /// it run to completion.
    pub async fn validate(&self, manifest: &Manifest) -> Option<ValidationResult> {
        let snapshot = manifest.clone();
        let seq = self.begin();
        self.complete(seq, &snapshot).await
    }

    /// Issue the next sequence number and enter `Validating`.
    fn begin(&self) -> u64 {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(ValidationState::Validating { seq });
        tracing::debug!(seq, "Validation started");
        seq
    }

    async fn complete(&self, seq: u64, snapshot: &Manifest) -> Option<ValidationResult> {
        let result = self.evaluate(seq, snapshot).await;
        self.settle(seq, result)
    }

    /// Local rules, then the authority, then the pessimistic merge.
    async fn evaluate(&self, seq: u64, snapshot: &Manifest) -> ValidationResult {
        let clock = self.clock;
        let rules = &self.rules;
        let local = match std::panic::catch_unwind(AssertUnwindSafe(|| {
            evaluate_manifest(snapshot, rules, clock())
        })) {
            Ok(local) => local,
            Err(_) => {
                tracing::error!(seq, "Local evaluation panicked");
                return ValidationResult::internal_failure();
            }
        };
        tracing::debug!(
            seq,
            errors = local.errors.len(),
            warnings = local.warnings.len(),
            score = local.completeness_score,
            "Local evaluation finished",
        );

        let verify = AssertUnwindSafe(self.oracle.verify(snapshot)).catch_unwind();
        match tokio::time::timeout(self.config.oracle_deadline, verify).await {
            Ok(Ok(Ok(verdict))) => merge(ValidationResult::from_remote(verdict), local),
            Ok(Ok(Err(e))) => {
                tracing::warn!(
                    seq,
                    error = %e,
                    auth_failure = e.is_auth_failure(),
                    "Authority check failed, using local result",
                );
                local.with_internal_failure()
            }
            Ok(Err(_)) => {
                tracing::error!(seq, "Authority check panicked, using local result");
                local.with_internal_failure()
            }
            Err(_) => {
                tracing::warn!(
                    seq,
                    deadline_ms = self.config.oracle_deadline.as_millis() as u64,
                    "Authority check timed out, using local result",
                );
                local.with_internal_failure()
            }
        }
    }

    /// Publish `result` if `seq` is still the highest issued number.
    fn settle(&self, seq: u64, result: ValidationResult) -> Option<ValidationResult> {
        let mut published = None;
        self.state.send_if_modified(|state| {
            if seq != self.issued.load(Ordering::SeqCst) {
                return false;
            }
            *state = ValidationState::Settled {
                seq,
                result: result.clone(),
            };
            published = Some(result.clone());
            true
        });

        match &published {
            Some(r) => tracing::info!(
                seq,
                is_valid = r.is_valid,
                score = r.completeness_score,
                "Validation settled",
            ),
            None => tracing::debug!(
                seq,
                latest = self.latest_sequence(),
                "Discarding stale validation result",
            ),
        }
        published
    }

    /// Re-validate whenever `changes` publishes a new manifest, once the
    /// debounce window has passed without further changes.
    ///
    /// Runs until `cancel` fires or the sender side is dropped, then waits
    /// for validations it started to finish.
    pub async fn watch_changes(
        self: Arc<Self>,
        mut changes: watch::Receiver<Manifest>,
        cancel: CancellationToken,
    ) {
        let tracker = TaskTracker::new();
        tracing::info!(
            debounce_ms = self.config.debounce.as_millis() as u64,
            "Manifest watcher started",
        );

        'watch: loop {
            tokio::select! {
                _ = cancel.cancelled() => break 'watch,
                changed = changes.changed() => {
                    if changed.is_err() {
                        break 'watch;
                    }
                }
            }

            // Every further change restarts the window.
            let mut sender_closed = false;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break 'watch,
                    _ = tokio::time::sleep(self.config.debounce) => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            sender_closed = true;
                            break;
                        }
                    }
                }
            }

            let snapshot = changes.borrow_and_update().clone();
            let seq = self.begin();
            let this = Arc::clone(&self);
            tracker.spawn(async move {
                this.complete(seq, &snapshot).await;
            });

            if sender_closed {
                break;
            }
        }

        tracker.close();
        tracker.wait().await;
        tracing::info!("Manifest watcher stopped");
    }
}
