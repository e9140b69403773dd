//! Runtime configuration: probe timeout and provider endpoint bases.
//!
//! Layered as built-in defaults, then an optional YAML file, then CLI/env
//! overrides applied by `main`. The endpoint bases exist so the probes can
//! be pointed at a proxy or a mock server; in normal use they stay at the
//! providers' public origins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Outbound request bound applied to every probe.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load from an explicit file, else from the per-user config file when
    /// one exists, else fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `~/.config/keyprobe/config.yaml` (platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keyprobe").join("config.yaml"))
}

/// Scheme + host of each provider API. Paths are fixed per validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    pub openai: String,
    pub anthropic: String,
    pub gemini: String,
    pub mistral: String,
    pub deepseek: String,
    pub groq: String,
    pub cohere: String,
    pub leonardo: String,
    pub fal: String,
    pub facebook: String,
    pub youtube: String,
    pub linkedin: String,
    pub tiktok: String,
    pub pinterest: String,
    pub stripe: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openai: "https://api.openai.com".into(),
            anthropic: "https://api.anthropic.com".into(),
            gemini: "https://generativelanguage.googleapis.com".into(),
            mistral: "https://api.mistral.ai".into(),
            deepseek: "https://api.deepseek.com".into(),
            groq: "https://api.groq.com".into(),
            cohere: "https://api.cohere.com".into(),
            leonardo: "https://cloud.leonardo.ai".into(),
            fal: "https://queue.fal.run".into(),
            facebook: "https://graph.facebook.com".into(),
            youtube: "https://www.googleapis.com".into(),
            linkedin: "https://api.linkedin.com".into(),
            tiktok: "https://open.tiktokapis.com".into(),
            pinterest: "https://api.pinterest.com".into(),
            stripe: "https://api.stripe.com".into(),
        }
    }
}

impl Endpoints {
    /// Every provider routed to one origin. Used to aim all probes at a
    /// single local server.
    pub fn all(base: &str) -> Self {
        let base = base.to_string();
        Self {
            openai: base.clone(),
            anthropic: base.clone(),
            gemini: base.clone(),
            mistral: base.clone(),
            deepseek: base.clone(),
            groq: base.clone(),
            cohere: base.clone(),
            leonardo: base.clone(),
            fal: base.clone(),
            facebook: base.clone(),
            youtube: base.clone(),
            linkedin: base.clone(),
            tiktok: base.clone(),
            pinterest: base.clone(),
            stripe: base,
        }
    }
}

/// Join a configured base with a fixed API path.
pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.endpoints.openai, "https://api.openai.com");
        assert_eq!(config.endpoints.fal, "https://queue.fal.run");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "timeout_secs: 3\nendpoints:\n  stripe: http://localhost:12111\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.endpoints.stripe, "http://localhost:12111");
        assert_eq!(config.endpoints.openai, "https://api.openai.com");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "endpoints:\n  myspace: http://example.com\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_join_trims_trailing_slash() {
        assert_eq!(join("http://127.0.0.1:8080/", "/v1/me"), "http://127.0.0.1:8080/v1/me");
        assert_eq!(join("https://api.stripe.com", "/v1/balance"), "https://api.stripe.com/v1/balance");
    }
}
