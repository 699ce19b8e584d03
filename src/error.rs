//! Signature verification error types.

use thiserror::Error;

/// Result type for signature verification operations.
pub type VerifyResult<T> = Result<T, SignatureError>;

/// Error type for signature verification.
///
/// Every variant means "verification failed"; none of them is a crash. The
/// checked entry points carry these through unchanged inside
/// [`VerificationOutcome`](crate::VerificationOutcome).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The header is not of the form `t=<unix-seconds>,<version>=<hex-digest>`.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// The header timestamp is older than the tolerance window allows.
    /// Signals a possible replay or clock skew.
    #[error("Signature timestamp is outside the tolerance window")]
    TimestampOutOfTolerance,

    /// The header's version tag does not match the accepted version.
    #[error("Unsupported signature version")]
    UnsupportedVersion,

    /// The supplied digest does not match the recomputed digest. Signals
    /// payload tampering, a wrong secret, or a signer/verifier
    /// serialization mismatch.
    #[error("Invalid signature")]
    SignatureMismatch,

    /// The payload could not be serialized for verification.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<serde_json::Error> for SignatureError {
    fn from(err: serde_json::Error) -> Self {
        SignatureError::InvalidPayload(err.to_string())
    }
}
