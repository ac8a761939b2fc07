//! Webhook signature verification.
//!
//! Stripe signs each delivery with a `Stripe-Signature` header of the form
//! `t=<unix-seconds>,v1=<hex hmac>`, where the MAC is HMAC-SHA256 over
//! `"{t}.{raw body}"` keyed by the endpoint's signing secret. Verification
//! recomputes the MAC, compares in constant time, and bounds the timestamp
//! to reject replays.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use super::types::Event;

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum accepted clock skew between the signed timestamp and now.
const TOLERANCE_SECONDS: i64 = 300;

type HmacSha256 = Hmac<Sha256>;

/// Reasons a delivery fails authentication. The `Display` text is surfaced
/// to the caller in the 400 response body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature header is malformed")]
    Malformed,
    #[error("no timestamp in signature header")]
    MissingTimestamp,
    #[error("no v1 signature in signature header")]
    MissingSignature,
    #[error("timestamp outside the tolerance zone")]
    TimestampOutOfTolerance,
    #[error("no signatures found matching the expected signature for payload")]
    NoMatch,
}

/// Verify a webhook delivery against the signing secret.
///
/// # Errors
///
/// Returns a [`SignatureError`] describing the first check that failed.
pub fn verify_signature(
    header: &str,
    body: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<&str> = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            return Err(SignatureError::Malformed);
        };
        match key {
            "t" => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| SignatureError::Malformed)?,
                );
            }
            "v1" => candidates.push(value),
            // Unknown schemes (e.g. v0) are ignored.
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
    if candidates.is_empty() {
        return Err(SignatureError::MissingSignature);
    }

    if (now.timestamp() - timestamp).abs() > TOLERANCE_SECONDS {
        return Err(SignatureError::TimestampOutOfTolerance);
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::Malformed)?;
    mac.update(format!("{timestamp}.{body}").as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());

    if candidates
        .iter()
        .any(|candidate| constant_time_compare(candidate.as_bytes(), expected.as_bytes()))
    {
        Ok(())
    } else {
        Err(SignatureError::NoMatch)
    }
}

/// Parse the raw body into an event envelope.
///
/// # Errors
///
/// Returns the underlying JSON error if the body does not match the
/// event shape.
pub fn parse_event(body: &str) -> Result<Event, serde_json::Error> {
    serde_json::from_str(body)
}

/// Compare two byte strings without short-circuiting on the first
/// mismatching byte.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const BODY: &str = r#"{"id":"evt_1","type":"checkout.session.completed"}"#;

    fn sign(timestamp: i64, body: &str, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac key");
        mac.update(format!("{timestamp}.{body}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn header_for(timestamp: i64, body: &str) -> String {
        format!("t={timestamp},v1={}", sign(timestamp, body, SECRET))
    }

    #[test]
    fn test_valid_signature_accepted() {
        let now = Utc::now();
        let header = header_for(now.timestamp(), BODY);
        assert_eq!(verify_signature(&header, BODY, SECRET, now), Ok(()));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = Utc::now();
        let ts = now.timestamp();
        let header = format!("t={ts},v1={}", sign(ts, BODY, "whsec_other"));
        assert_eq!(
            verify_signature(&header, BODY, SECRET, now),
            Err(SignatureError::NoMatch)
        );
    }

    #[test]
    fn test_tampered_body_rejected() {
        let now = Utc::now();
        let header = header_for(now.timestamp(), BODY);
        assert_eq!(
            verify_signature(&header, r#"{"id":"evt_2"}"#, SECRET, now),
            Err(SignatureError::NoMatch)
        );
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let now = Utc::now();
        let stale = now.timestamp() - TOLERANCE_SECONDS - 1;
        let header = header_for(stale, BODY);
        assert_eq!(
            verify_signature(&header, BODY, SECRET, now),
            Err(SignatureError::TimestampOutOfTolerance)
        );
    }

    #[test]
    fn test_timestamp_at_tolerance_boundary_accepted() {
        let now = Utc::now();
        let edge = now.timestamp() - TOLERANCE_SECONDS;
        let header = header_for(edge, BODY);
        assert_eq!(verify_signature(&header, BODY, SECRET, now), Ok(()));
    }

    #[test]
    fn test_missing_timestamp_rejected() {
        let now = Utc::now();
        let header = format!("v1={}", sign(now.timestamp(), BODY, SECRET));
        assert_eq!(
            verify_signature(&header, BODY, SECRET, now),
            Err(SignatureError::MissingTimestamp)
        );
    }

    #[test]
    fn test_missing_v1_rejected() {
        let now = Utc::now();
        let header = format!("t={}", now.timestamp());
        assert_eq!(
            verify_signature(&header, BODY, SECRET, now),
            Err(SignatureError::MissingSignature)
        );
    }

    #[test]
    fn test_garbage_header_rejected() {
        let now = Utc::now();
        assert_eq!(
            verify_signature("not a signature", BODY, SECRET, now),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn test_second_v1_candidate_accepted() {
        // Stripe sends multiple v1 entries during secret rotation.
        let now = Utc::now();
        let ts = now.timestamp();
        let header = format!(
            "t={ts},v1={},v1={}",
            sign(ts, BODY, "whsec_retired"),
            sign(ts, BODY, SECRET)
        );
        assert_eq!(verify_signature(&header, BODY, SECRET, now), Ok(()));
    }

    #[test]
    fn test_constant_time_compare_length_mismatch() {
        assert!(!constant_time_compare(b"abc", b"abcd"));
        assert!(constant_time_compare(b"abc", b"abc"));
    }
}
