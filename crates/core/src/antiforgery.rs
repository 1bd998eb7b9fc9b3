//! Stateless anti-forgery tokens for server-rendered forms.
//!
//! Every rendered form embeds a token; every mutating POST must echo it
//! back. A token has the shape `{nonce}.{issued_at}.{signature}` where the
//! signature is an HMAC-SHA256 over `{nonce}.{issued_at}` keyed with a
//! server secret. Tokens expire after a configurable lifetime.

use std::time::Duration;

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the hidden form field carrying the token.
pub const TOKEN_FIELD: &str = "__RequestVerificationToken";

/// Random bytes per token nonce.
const NONCE_LENGTH: usize = 16;

/// Tokens issued this many seconds in the future are still accepted.
const CLOCK_SKEW_SECS: i64 = 60;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Anti-forgery token is missing")]
    Missing,

    #[error("Anti-forgery token is malformed")]
    Malformed,

    #[error("Anti-forgery token signature is invalid")]
    BadSignature,

    #[error("Anti-forgery token has expired")]
    Expired,
}

/// Issues and verifies anti-forgery tokens with a single server secret.
#[derive(Clone)]
pub struct Antiforgery {
    secret: Vec<u8>,
    lifetime: Duration,
}

impl std::fmt::Debug for Antiforgery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Antiforgery")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl Antiforgery {
    pub fn new(secret: impl Into<Vec<u8>>, lifetime: Duration) -> Self {
        Self {
            secret: secret.into(),
            lifetime,
        }
    }

    /// Build an issuer with a random per-process secret.
    ///
    /// Tokens issued by one process are rejected after a restart.
    pub fn with_random_secret(lifetime: Duration) -> Self {
        let mut secret = [0u8; 32];
        rand::rng().fill(&mut secret);
        Self::new(secret.to_vec(), lifetime)
    }

    /// Issue a fresh token stamped with the current time.
    pub fn issue(&self) -> String {
        self.issue_at(chrono::Utc::now().timestamp())
    }

    pub fn issue_at(&self, issued_at: i64) -> String {
        let mut nonce = [0u8; NONCE_LENGTH];
        rand::rng().fill(&mut nonce);
        let payload = format!("{}.{issued_at}", hex::encode(nonce));
        let signature = hex::encode(self.sign(&payload).finalize().into_bytes());
        format!("{payload}.{signature}")
    }

    /// Verify a submitted token against the current time.
    pub fn verify(&self, token: Option<&str>) -> Result<(), TokenError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: Option<&str>, now: i64) -> Result<(), TokenError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let token = token.ok_or(TokenError::Missing)?;

        let (payload, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
        let (nonce, issued_at) = payload.split_once('.').ok_or(TokenError::Malformed)?;
        if nonce.len() != NONCE_LENGTH * 2 || hex::decode(nonce).is_none() {
            return Err(TokenError::Malformed);
        }
        let issued_at: i64 = issued_at.parse().map_err(|_| TokenError::Malformed)?;
        let signature = hex::decode(signature).ok_or(TokenError::Malformed)?;

        self.sign(payload)
            .verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let lifetime = i64::try_from(self.lifetime.as_secs()).unwrap_or(i64::MAX);
        if issued_at > now.saturating_add(CLOCK_SKEW_SECS)
            || now.saturating_sub(issued_at) > lifetime
        {
            return Err(TokenError::Expired);
        }

        Ok(())
    }

    fn sign(&self, payload: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        mac
    }
}

// ---------------------------------------------------------------------------
// hex helpers (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string, returning `None` on odd length or bad digits.
    pub fn decode(text: &str) -> Option<Vec<u8>> {
        if text.len() % 2 != 0 || !text.is_ascii() {
            return None;
        }
        (0..text.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn issuer() -> Antiforgery {
        Antiforgery::new("test-secret", Duration::from_secs(7200))
    }

    #[test]
    fn issued_token_verifies() {
        let af = issuer();
        let token = af.issue_at(NOW);
        assert_eq!(af.verify_at(Some(&token), NOW + 10), Ok(()));
    }

    #[test]
    fn tokens_are_unique() {
        let af = issuer();
        assert_ne!(af.issue_at(NOW), af.issue_at(NOW));
    }

    #[test]
    fn missing_token_is_rejected() {
        let af = issuer();
        assert_eq!(af.verify_at(None, NOW), Err(TokenError::Missing));
        assert_eq!(af.verify_at(Some("  "), NOW), Err(TokenError::Missing));
    }

    #[test]
    fn garbage_is_malformed() {
        let af = issuer();
        assert_matches!(af.verify_at(Some("abc"), NOW), Err(TokenError::Malformed));
        assert_matches!(af.verify_at(Some("a.b.c"), NOW), Err(TokenError::Malformed));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = Antiforgery::new("other-secret", Duration::from_secs(7200));
        let token = other.issue_at(NOW);
        assert_eq!(issuer().verify_at(Some(&token), NOW), Err(TokenError::BadSignature));
    }

    #[test]
    fn tampered_timestamp_is_rejected() {
        let af = issuer();
        let token = af.issue_at(NOW);
        let mut parts: Vec<&str> = token.split('.').collect();
        let bumped = (NOW + 1).to_string();
        parts[1] = &bumped;
        let forged = parts.join(".");
        assert_eq!(af.verify_at(Some(&forged), NOW), Err(TokenError::BadSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let af = issuer();
        let token = af.issue_at(NOW);
        assert_eq!(af.verify_at(Some(&token), NOW + 7200), Ok(()));
        assert_eq!(af.verify_at(Some(&token), NOW + 7201), Err(TokenError::Expired));
    }

    #[test]
    fn token_from_the_future_is_rejected() {
        let af = issuer();
        let token = af.issue_at(NOW + 3600);
        assert_eq!(af.verify_at(Some(&token), NOW), Err(TokenError::Expired));
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(hex::encode([0x00, 0xab, 0xff]), "00abff");
        assert_eq!(hex::decode("00abff"), Some(vec![0x00, 0xab, 0xff]));
        assert_eq!(hex::decode("abc"), None);
        assert_eq!(hex::decode("zz"), None);
    }
}
