//! # Webhook Signature
//!
//! Verification of HMAC-SHA256 signed webhook headers of the form
//! `t=<unix-seconds>,v1=<hex-digest>`:
//! - Strict header parsing with explicit malformed-input errors
//! - Replay protection through a timestamp tolerance window
//! - Signature version gating
//! - Constant-time digest comparison
//!
//! The crate only verifies signatures it receives; it does not produce or
//! deliver them, and secrets are supplied per call.
//!
//! ## Example
//!
//! ```rust,ignore
//! use webhook_signature::{verify_checked, VerificationOutcome};
//!
//! match verify_checked(header, body, secret) {
//!     VerificationOutcome::Valid => handle_event(body),
//!     VerificationOutcome::Invalid(reason) => reject(reason),
//! }
//! ```
//!
//! Verifiers can also carry their own configuration instead of the
//! process-wide one:
//!
//! ```rust,ignore
//! use webhook_signature::WebhookVerifier;
//!
//! let verifier = WebhookVerifier::new().tolerance_seconds(300);
//! verifier.verify(header, body, secret)?;
//! ```

mod config;
mod error;
mod signature;
mod verifier;

pub use config::{
    configure, current_config, VerifierConfig, DEFAULT_SIGNATURE_VERSION,
    DEFAULT_TOLERANCE_SECONDS,
};
pub use error::{SignatureError, VerifyResult};
pub use signature::SignatureHeader;
pub use verifier::{
    verify, verify_checked, verify_json, verify_json_checked, VerificationOutcome,
    WebhookVerifier,
};
