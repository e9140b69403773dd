//! Per-provider credential probes.
//!
//! Every provider module exposes one `validate` function with the
//! [`ValidatorFn`] signature. A validator issues exactly one request against
//! a fixed endpoint, reads the JSON body and classifies the outcome. It
//! never retries and never touches anything but the shared [`ProbeContext`].
//! Validators never see each other or the dispatcher.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{self, Config, Endpoints};
use crate::error::ProbeError;

pub mod anthropic;
pub mod cohere;
pub mod deepseek;
pub mod facebook;
pub mod fal;
pub mod gemini;
pub mod groq;
pub mod leonardo;
pub mod linkedin;
pub mod mistral;
pub mod openai;
pub mod pinterest;
pub mod stripe;
pub mod tiktok;
pub mod youtube;

// ── Core Types ──────────────────────────────────────────────────────

/// Closed classification of a validation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Valid,
    Invalid,
    Expired,
    RateLimited,
    InsufficientCredits,
    ApiDisabled,
    QuotaExceeded,
    Forbidden,
    Error,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Valid => "valid",
            ResultType::Invalid => "invalid",
            ResultType::Expired => "expired",
            ResultType::RateLimited => "rate_limited",
            ResultType::InsufficientCredits => "insufficient_credits",
            ResultType::ApiDisabled => "api_disabled",
            ResultType::QuotaExceeded => "quota_exceeded",
            ResultType::Forbidden => "forbidden",
            ResultType::Error => "error",
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-specific facts reported on success (model, usage, account...).
pub type Details = Map<String, Value>;

/// What a validator concluded, before the dispatcher adds timing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    status: u16,
    kind: ResultType,
    message: String,
    details: Option<Details>,
}

impl ProbeOutcome {
    /// The provider accepted the credential.
    pub fn valid(message: impl Into<String>, details: Details) -> Self {
        Self {
            status: 200,
            kind: ResultType::Valid,
            message: message.into(),
            details: Some(details),
        }
    }

    /// The provider refused, or something went wrong. `kind` must not be
    /// `Valid`; a stray one is downgraded to `Error`.
    pub fn rejected(status: u16, kind: ResultType, message: impl Into<String>) -> Self {
        let kind = if kind == ResultType::Valid { ResultType::Error } else { kind };
        Self {
            status,
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn success(&self) -> bool {
        self.kind == ResultType::Valid
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

    pub(crate) fn into_parts(self) -> (u16, ResultType, String, Option<Details>) {
        (self.status, self.kind, self.message, self.details)
    }
}

/// Shared, read-only state handed to every validator.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ProbeContext {
    pub fn new(client: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Build the process-wide HTTP client with the configured timeout.
    pub fn from_config(config: &Config) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("keyprobe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client, config.endpoints.clone()))
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Absolute URL for `path` under the configured base.
    pub fn url(&self, base: &str, path: &str) -> String {
        config::join(base, path)
    }
}

/// A provider probe. Plain function pointer so the registry is a lookup
/// table rather than a hierarchy.
pub type ValidatorFn =
    for<'a> fn(&'a ProbeContext, &'a str) -> BoxFuture<'a, Result<ProbeOutcome, ProbeError>>;

// ── Response Helpers ────────────────────────────────────────────────

/// Read the body as JSON. A non-JSON body is a probe failure, not a
/// classification.
pub(crate) async fn read_json(resp: reqwest::Response) -> Result<Value, ProbeError> {
    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// `None` for null, false, zero and empty strings.
pub(crate) fn present(value: &Value) -> Option<&Value> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other),
    }
}

/// Strings verbatim, everything else as compact JSON.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First present candidate as text. When none is present the last
/// candidate is rendered anyway, so callers pass the whole body last.
pub(crate) fn message_from(candidates: &[&Value]) -> String {
    candidates
        .iter()
        .find_map(|v| present(v))
        .or_else(|| candidates.last().copied())
        .map(render)
        .unwrap_or_default()
}

/// `value` if present, else `fallback`.
pub(crate) fn or_default(value: &Value, fallback: impl Into<Value>) -> Value {
    present(value).cloned().unwrap_or_else(|| fallback.into())
}

/// Unwrap a `json!({...})` literal into a details map. Fields the
/// provider left out (null) are dropped rather than reported.
pub(crate) fn details(value: Value) -> Details {
    match value {
        Value::Object(map) => map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
        _ => Map::new(),
    }
}

/// The one-line chat prompt shared by the completion-style probes.
pub(crate) fn say_hi() -> Value {
    serde_json::json!([{ "role": "user", "content": "Say hi" }])
}

// ── Test Support ────────────────────────────────────────────────────
