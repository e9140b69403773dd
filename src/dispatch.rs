//! Dispatcher: input checks, registry lookup, timing and failure
//! normalization. `validate` never fails: every problem comes back as a
//! `ValidationResult` with `success: false`.

use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::error::ProbeError;
use crate::registry::Registry;
use crate::validators::{Details, ProbeContext, ProbeOutcome, ResultType};

/// The normalized report returned to callers. Fields are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    success: bool,
    status: u16,
    #[serde(rename = "type")]
    kind: ResultType,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Details>,
    response_time: u64,
}

impl ValidationResult {
    fn from_outcome(outcome: ProbeOutcome, response_time: u64) -> Self {
        let (status, kind, message, details) = outcome.into_parts();
        Self {
            success: kind == ResultType::Valid,
            status,
            kind,
            message,
            details,
            response_time,
        }
    }

    /// A failure produced by the dispatcher itself.
    fn local_error(status: u16, message: impl Into<String>, response_time: u64) -> Self {
        Self::from_outcome(ProbeOutcome::rejected(status, ResultType::Error, message), response_time)
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn kind(&self) -> ResultType {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Elapsed milliseconds of the probe; 0 when no probe was sent.
    pub fn response_time(&self) -> u64 {
        self.response_time
    }
}

pub struct Dispatcher {
    registry: Registry,
    ctx: ProbeContext,
}

impl Dispatcher {
    pub fn new(registry: Registry, ctx: ProbeContext) -> Self {
        Self { registry, ctx }
    }

    /// Builtin providers with a client built from `config`.
    pub fn from_config(config: &Config) -> Result<Self, ProbeError> {
        Ok(Self::new(Registry::builtin(), ProbeContext::from_config(config)?))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn provider_count(&self) -> usize {
        self.registry.len()
    }

    /// Probe `key` against `provider`.
    pub async fn validate(&self, provider: &str, key: &str) -> ValidationResult {
        // Also strips a byte-order mark left by files saved as UTF-8 with BOM.
        let key = Zeroizing::new(
            key.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
                .to_string(),
        );
        if key.is_empty() {
            return ValidationResult::local_error(400, "API key is required", 0);
        }

        let entry = match self.registry.get(provider) {
            Some(entry) => entry,
            None => {
                return ValidationResult::local_error(404, format!("Unknown provider: {provider}"), 0)
            }
        };

        let span = tracing::info_span!("probe", request_id = %Uuid::new_v4(), provider = entry.id);
        async {
            let start = Instant::now();
            let outcome = (entry.validate)(&self.ctx, key.as_str()).await;
            let elapsed = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(outcome) => {
                    let result = ValidationResult::from_outcome(outcome, elapsed);
                    info!(
                        status = result.status,
                        kind = %result.kind,
                        elapsed_ms = elapsed,
                        "Probe finished"
                    );
                    result
                }
                Err(e) => {
                    warn!(error = %e, elapsed_ms = elapsed, "Probe failed");
                    ValidationResult::local_error(500, format!("Connection failed: {e}"), elapsed)
                }
            }
        }
        .instrument(span)
        .await
    }
}
