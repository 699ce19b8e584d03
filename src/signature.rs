//! Signature header parsing and HMAC digest computation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{SignatureError, VerifyResult};

type HmacSha256 = Hmac<Sha256>;

/// A parsed signature header.
///
/// Wire format: `t=<unix-seconds>,<version>=<hex-digest>` with exactly one
/// comma and no whitespace, e.g. `t=1700000000,v1=5f4dcc3b...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp (seconds) embedded by the signer.
    pub timestamp: i64,
    /// Version tag preceding the digest, compared as an opaque string.
    pub version: String,
    /// Digest as supplied by the sender. Kept verbatim: the verifier
    /// recomputes lowercase hex, so an uppercase digest never matches.
    pub digest: String,
}

impl SignatureHeader {
    /// Parses a raw signature header.
    ///
    /// Any structural defect (wrong segment count, missing `t=`,
    /// non-integer timestamp, missing `=` in the signature segment) is
    /// reported as [`SignatureError::MalformedHeader`].
    pub fn parse(raw: &str) -> VerifyResult<Self> {
        let mut segments = raw.split(',');
        let timestamp_segment = segments.next().unwrap_or_default();
        let signature_segment = segments
            .next()
            .ok_or_else(|| malformed("expected two comma-separated segments"))?;
        if segments.next().is_some() {
            return Err(malformed("expected exactly one comma"));
        }

        let timestamp = timestamp_segment
            .strip_prefix("t=")
            .ok_or_else(|| malformed("first segment must be t=<unix-seconds>"))?
            .parse::<i64>()
            .map_err(|_| malformed("timestamp is not an integer"))?;

        let (version, digest) = signature_segment
            .split_once('=')
            .ok_or_else(|| malformed("second segment must be <version>=<hex-digest>"))?;

        Ok(Self {
            timestamp,
            version: version.to_string(),
            digest: digest.to_string(),
        })
    }
}

fn malformed(reason: &str) -> SignatureError {
    SignatureError::MalformedHeader(reason.to_string())
}

/// Computes the lowercase hex HMAC-SHA256 digest of `<timestamp>.<payload>`.
pub(crate) fn compute_digest(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");

    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time digest comparison. Digest length is not secret, so a
/// length mismatch may return early.
pub(crate) fn digests_match(expected: &str, provided: &str) -> bool {
    if expected.len() != provided.len() {
        return false;
    }
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let header = SignatureHeader::parse("t=1700000000,v1=abcdef0123456789").unwrap();
        assert_eq!(header.timestamp, 1700000000);
        assert_eq!(header.version, "v1");
        assert_eq!(header.digest, "abcdef0123456789");
    }

    #[test]
    fn test_parse_negative_timestamp() {
        let header = SignatureHeader::parse("t=-5,v1=abc").unwrap();
        assert_eq!(header.timestamp, -5);
    }

    #[test]
    fn test_parse_rejects_missing_comma() {
        let result = SignatureHeader::parse("t=1700000000");
        assert!(matches!(result, Err(SignatureError::MalformedHeader(_))));
    }

    #[test]
    fn test_parse_rejects_extra_segment() {
        let result = SignatureHeader::parse("t=1700000000,v1=abc,v0=def");
        assert!(matches!(result, Err(SignatureError::MalformedHeader(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_timestamp_key() {
        let result = SignatureHeader::parse("ts=1700000000,v1=abc");
        assert!(matches!(result, Err(SignatureError::MalformedHeader(_))));
    }

    #[test]
    fn test_parse_rejects_non_integer_timestamp() {
        let result = SignatureHeader::parse("t=soon,v1=abc");
        assert!(matches!(result, Err(SignatureError::MalformedHeader(_))));
    }

    #[test]
    fn test_parse_rejects_signature_segment_without_equals() {
        let result = SignatureHeader::parse("t=1700000000,abc");
        assert!(matches!(result, Err(SignatureError::MalformedHeader(_))));
    }

    #[test]
    fn test_compute_digest_known_vector() {
        // HMAC-SHA256("s3cr3t", "1700000000.{\"id\":\"abc\"}")
        let digest = compute_digest("s3cr3t", 1700000000, br#"{"id":"abc"}"#);
        assert_eq!(
            digest,
            "910acc495a5026fff5444803c72c97fb4782eda41200c0a720a23e84e3a677e8"
        );
    }

    #[test]
    fn test_digest_depends_on_timestamp_and_payload() {
        let digest = compute_digest("secret", 1234567890, b"payload");
        assert_ne!(digest, compute_digest("secret", 1234567891, b"payload"));
        assert_ne!(digest, compute_digest("secret", 1234567890, b"payloae"));
        assert_ne!(digest, compute_digest("wrong", 1234567890, b"payload"));
    }

    #[test]
    fn test_digests_match() {
        assert!(digests_match("abcdef", "abcdef"));
        assert!(!digests_match("abcdef", "abcdee"));
        assert!(!digests_match("abcdef", "abcde"));
    }

    #[test]
    fn test_digests_match_is_case_sensitive() {
        assert!(!digests_match("abcdef", "ABCDEF"));
    }
}
