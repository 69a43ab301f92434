//! Slack v0 request-signature verification.
//!
//! Slack signs each request with `HMAC-SHA256(secret, "v0:<timestamp>:<body>")`
//! and sends the hex digest as `x-slack-signature: v0=<hex>` alongside
//! `x-slack-request-timestamp`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

pub const SLACK_SIGNATURE_HEADER: &str = "x-slack-signature";
pub const SLACK_TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Reasons an inbound request fails signature verification.
pub enum SlackSignatureError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),
    #[error("slack request signature must use v0=<hex> format")]
    InvalidFormat,
    #[error("invalid signature digest: {0}")]
    InvalidDigest(String),
    #[error("invalid slack request timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("slack request timestamp skew {skew_seconds}s exceeds max {max_skew_seconds}s")]
    StaleTimestamp {
        skew_seconds: u64,
        max_skew_seconds: u64,
    },
    #[error("slack request signature verification failed")]
    Mismatch,
    #[error("failed to initialize hmac verifier")]
    InvalidKey,
}

impl SlackSignatureError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingHeader(_) => "missing_header",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidDigest(_) => "invalid_digest",
            Self::InvalidTimestamp(_) => "invalid_timestamp",
            Self::StaleTimestamp { .. } => "stale_timestamp",
            Self::Mismatch => "invalid_signature",
            Self::InvalidKey => "invalid_key",
        }
    }
}

#[derive(Clone)]
pub struct SlackRequestVerifier {
    signing_secret: String,
    max_skew_seconds: u64,
}

impl std::fmt::Debug for SlackRequestVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackRequestVerifier")
            .field("signing_secret", &"<redacted>")
            .field("max_skew_seconds", &self.max_skew_seconds)
            .finish()
    }
}

impl SlackRequestVerifier {
    /// A `max_skew_seconds` of zero disables the timestamp freshness check.
    pub fn new(signing_secret: &str, max_skew_seconds: u64) -> Self {
        Self {
            signing_secret: signing_secret.trim().to_string(),
            max_skew_seconds,
        }
    }

    pub fn verify(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
        now_unix_seconds: u64,
    ) -> Result<(), SlackSignatureError> {
        let signature = signature
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SlackSignatureError::MissingHeader(SLACK_SIGNATURE_HEADER))?;
        let timestamp = timestamp
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SlackSignatureError::MissingHeader(SLACK_TIMESTAMP_HEADER))?;

        self.validate_timestamp_skew(timestamp, now_unix_seconds)?;

        let digest_hex = signature
            .strip_prefix("v0=")
            .ok_or(SlackSignatureError::InvalidFormat)?;
        let signature_bytes = decode_hex(digest_hex)?;
        signing_mac(&self.signing_secret, timestamp, body)?
            .verify_slice(&signature_bytes)
            .map_err(|_| SlackSignatureError::Mismatch)
    }

    fn validate_timestamp_skew(
        &self,
        timestamp: &str,
        now_unix_seconds: u64,
    ) -> Result<(), SlackSignatureError> {
        let timestamp_seconds = timestamp
            .parse::<u64>()
            .map_err(|_| SlackSignatureError::InvalidTimestamp(timestamp.to_string()))?;
        if self.max_skew_seconds == 0 {
            return Ok(());
        }
        let skew_seconds = now_unix_seconds.abs_diff(timestamp_seconds);
        if skew_seconds > self.max_skew_seconds {
            return Err(SlackSignatureError::StaleTimestamp {
                skew_seconds,
                max_skew_seconds: self.max_skew_seconds,
            });
        }
        Ok(())
    }
}

/// Computes the `v0=<hex>` header value Slack would send for `body`.
pub fn compute_slack_v0_signature(
    secret: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<String, SlackSignatureError> {
    let digest = signing_mac(secret.trim(), timestamp, body)?
        .finalize()
        .into_bytes();
    Ok(format!(
        "v0={}",
        digest
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>()
    ))
}

fn signing_mac(
    secret: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<Hmac<Sha256>, SlackSignatureError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| SlackSignatureError::InvalidKey)?;
    mac.update(b"v0:");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Ok(mac)
}

fn decode_hex(raw: &str) -> Result<Vec<u8>, SlackSignatureError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SlackSignatureError::InvalidDigest(
            "signature digest cannot be empty".to_string(),
        ));
    }
    if !trimmed.is_ascii() || trimmed.len() % 2 != 0 {
        return Err(SlackSignatureError::InvalidDigest(
            "signature digest must have an even number of hex characters".to_string(),
        ));
    }
    let mut bytes = Vec::with_capacity(trimmed.len() / 2);
    let mut index = 0usize;
    while index < trimmed.len() {
        let next = index.saturating_add(2);
        let chunk = &trimmed[index..next];
        let byte = u8::from_str_radix(chunk, 16).map_err(|_| {
            SlackSignatureError::InvalidDigest(format!(
                "invalid hex byte '{chunk}' in signature digest"
            ))
        })?;
        bytes.push(byte);
        index = next;
    }
    Ok(bytes)
}
