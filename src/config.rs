//! Verifier configuration and the process-wide configuration cell.

use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Serialize};

/// Signature version accepted by default.
pub const DEFAULT_SIGNATURE_VERSION: &str = "v1";

/// Timestamp tolerance applied by default, in seconds.
pub const DEFAULT_TOLERANCE_SECONDS: u64 = 60;

/// Configuration for webhook signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Version tag a signature header must carry to be accepted.
    pub accepted_version: String,
    /// Maximum accepted age of a signature timestamp, in seconds.
    pub tolerance_seconds: u64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            accepted_version: DEFAULT_SIGNATURE_VERSION.to_string(),
            tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
        }
    }
}

impl VerifierConfig {
    /// Creates a configuration with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accepted version tag.
    pub fn accepted_version(mut self, version: impl Into<String>) -> Self {
        self.accepted_version = version.into();
        self
    }

    /// Sets the timestamp tolerance in seconds.
    pub fn tolerance_seconds(mut self, secs: u64) -> Self {
        self.tolerance_seconds = secs;
        self
    }
}

static CURRENT: LazyLock<RwLock<VerifierConfig>> =
    LazyLock::new(|| RwLock::new(VerifierConfig::default()));

/// Replaces the process-wide configuration.
///
/// The value is swapped wholesale. A `VerifierConfig` built through
/// [`VerifierConfig::new`] (or deserialized from a partial document) starts
/// from the built-in defaults, so fields not set explicitly fall back to the
/// defaults rather than to a previously configured value:
///
/// ```rust,ignore
/// configure(VerifierConfig::new().tolerance_seconds(10));
/// configure(VerifierConfig::new().accepted_version("v2"));
/// // tolerance is back to 60 here, not 10
/// ```
///
/// Verification calls started after `configure` returns observe the new
/// configuration; calls racing with `configure` may observe either value.
pub fn configure(config: VerifierConfig) {
    let mut current = CURRENT.write().expect("configuration lock poisoned");
    *current = config;
}

/// Returns a snapshot of the process-wide configuration.
pub fn current_config() -> VerifierConfig {
    CURRENT.read().expect("configuration lock poisoned").clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert_eq!(config.accepted_version, "v1");
        assert_eq!(config.tolerance_seconds, 60);
    }

    #[test]
    fn test_builder() {
        let config = VerifierConfig::new()
            .accepted_version("v2")
            .tolerance_seconds(300);
        assert_eq!(config.accepted_version, "v2");
        assert_eq!(config.tolerance_seconds, 300);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: VerifierConfig = serde_json::from_str(r#"{"tolerance_seconds": 10}"#).unwrap();
        assert_eq!(config.accepted_version, "v1");
        assert_eq!(config.tolerance_seconds, 10);

        let config: VerifierConfig =
            serde_json::from_str(r#"{"accepted_version": "v3"}"#).unwrap();
        assert_eq!(config.accepted_version, "v3");
        assert_eq!(config.tolerance_seconds, 60);
    }

    #[test]
    fn test_config_round_trip() {
        let config = VerifierConfig::new().tolerance_seconds(120);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: VerifierConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
