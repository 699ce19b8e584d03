//! Webhook signature verification.

use serde::Serialize;

use crate::config::{self, VerifierConfig};
use crate::error::{SignatureError, VerifyResult};
use crate::signature::{compute_digest, digests_match, SignatureHeader};

/// Outcome of a checked verification.
///
/// Returned by the `*_checked` entry points, which never panic and never
/// raise: every failure is carried as [`VerificationOutcome::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The signature is authentic and fresh.
    Valid,
    /// Verification failed for the carried reason.
    Invalid(SignatureError),
}

impl VerificationOutcome {
    /// Returns true if verification succeeded.
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }

    /// Returns the failure reason, if any.
    pub fn error(&self) -> Option<&SignatureError> {
        match self {
            VerificationOutcome::Valid => None,
            VerificationOutcome::Invalid(err) => Some(err),
        }
    }
}

impl From<VerifyResult<()>> for VerificationOutcome {
    fn from(result: VerifyResult<()>) -> Self {
        match result {
            Ok(()) => VerificationOutcome::Valid,
            Err(err) => VerificationOutcome::Invalid(err),
        }
    }
}

/// Verifier for signed webhook headers.
///
/// Each verifier carries its own configuration. The module-level functions
/// ([`verify`], [`verify_checked`], ...) construct one from the process-wide
/// configuration on every call.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    config: VerifierConfig,
}

impl WebhookVerifier {
    /// Creates a verifier with the built-in default configuration.
    pub fn new() -> Self {
        Self {
            config: VerifierConfig::default(),
        }
    }

    /// Creates a verifier with an explicit configuration.
    pub fn with_config(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Sets the accepted version tag.
    pub fn accepted_version(mut self, version: impl Into<String>) -> Self {
        self.config.accepted_version = version.into();
        self
    }

    /// Sets the timestamp tolerance in seconds.
    pub fn tolerance_seconds(mut self, secs: u64) -> Self {
        self.config.tolerance_seconds = secs;
        self
    }

    /// Returns this verifier's configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verifies a signature header against the payload, using the current
    /// wall clock for the freshness check.
    ///
    /// The payload must be the exact bytes the signer signed; any
    /// serialization difference between signer and verifier is
    /// indistinguishable from tampering.
    pub fn verify(
        &self,
        header: &str,
        payload: impl AsRef<[u8]>,
        secret: &str,
    ) -> VerifyResult<()> {
        self.verify_at(header, payload, secret, chrono::Utc::now().timestamp())
    }

    /// Verifies a signature header with an explicit clock reading.
    ///
    /// Checks run in order, short-circuiting on the first failure:
    /// header parse, timestamp freshness, version tag, digest comparison.
    /// The freshness check is one-sided: a timestamp of exactly
    /// `now - tolerance_seconds` passes, one second older fails, and a
    /// timestamp ahead of `now` is never rejected.
    pub fn verify_at(
        &self,
        header: &str,
        payload: impl AsRef<[u8]>,
        secret: &str,
        now: i64,
    ) -> VerifyResult<()> {
        let parsed = SignatureHeader::parse(header)?;

        if now.saturating_sub(parsed.timestamp) > self.config.tolerance_seconds as i64 {
            tracing::debug!(
                timestamp = parsed.timestamp,
                tolerance_seconds = self.config.tolerance_seconds,
                "signature timestamp outside tolerance window"
            );
            return Err(SignatureError::TimestampOutOfTolerance);
        }

        if parsed.version != self.config.accepted_version {
            return Err(SignatureError::UnsupportedVersion);
        }

        let expected = compute_digest(secret, parsed.timestamp, payload.as_ref());
        if !digests_match(&expected, &parsed.digest) {
            tracing::debug!(version = %parsed.version, "signature digest mismatch");
            return Err(SignatureError::SignatureMismatch);
        }

        Ok(())
    }

    /// Verifies a signature header against a JSON-serializable payload.
    ///
    /// The payload is serialized with `serde_json` and the serialized string
    /// is what gets verified, so the signer must have signed an identical
    /// serialization (including map key order).
    pub fn verify_json<T: Serialize>(
        &self,
        header: &str,
        payload: &T,
        secret: &str,
    ) -> VerifyResult<()> {
        let payload = serde_json::to_string(payload)?;
        self.verify(header, payload, secret)
    }

    /// Non-raising variant of [`WebhookVerifier::verify`].
    pub fn verify_checked(
        &self,
        header: &str,
        payload: impl AsRef<[u8]>,
        secret: &str,
    ) -> VerificationOutcome {
        self.verify(header, payload, secret).into()
    }

    /// Non-raising variant of [`WebhookVerifier::verify_json`].
    pub fn verify_json_checked<T: Serialize>(
        &self,
        header: &str,
        payload: &T,
        secret: &str,
    ) -> VerificationOutcome {
        self.verify_json(header, payload, secret).into()
    }
}

impl Default for WebhookVerifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Verifies a signature header using the process-wide configuration.
pub fn verify(header: &str, payload: impl AsRef<[u8]>, secret: &str) -> VerifyResult<()> {
    WebhookVerifier::with_config(config::current_config()).verify(header, payload, secret)
}

/// Verifies a JSON-serializable payload using the process-wide configuration.
pub fn verify_json<T: Serialize>(header: &str, payload: &T, secret: &str) -> VerifyResult<()> {
    WebhookVerifier::with_config(config::current_config()).verify_json(header, payload, secret)
}

/// Non-raising variant of [`verify`].
pub fn verify_checked(
    header: &str,
    payload: impl AsRef<[u8]>,
    secret: &str,
) -> VerificationOutcome {
    verify(header, payload, secret).into()
}

/// Non-raising variant of [`verify_json`].
pub fn verify_json_checked<T: Serialize>(
    header: &str,
    payload: &T,
    secret: &str,
) -> VerificationOutcome {
    verify_json(header, payload, secret).into()
}
