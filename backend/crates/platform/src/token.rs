//! Signed Opaque Tokens
//!
//! HMAC-SHA256 signed tokens of the form `<payload>.<signature-b64>`.
//! The payload is an opaque identifier (e.g. a session id); the signature
//! lets the server reject forged or tampered cookies without a database
//! round trip.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a payload, producing `<payload>.<signature>`
pub fn sign(secret: &[u8], payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a token and return its payload
///
/// Returns `None` for malformed tokens, invalid base64, or signature
/// mismatch. Signature comparison is constant-time (hmac's `verify_slice`).
pub fn verify(secret: &[u8], token: &str) -> Option<String> {
    let (payload, signature_b64) = token.split_once('.')?;
    if payload.is_empty() || signature_b64.contains('.') {
        return None;
    }

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-key";

    #[test]
    fn test_sign_verify_roundtrip() {
        let token = sign(SECRET, "f4c1a2d0");
        assert_eq!(verify(SECRET, &token), Some("f4c1a2d0".to_string()));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let token = sign(SECRET, "f4c1a2d0");
        let tampered = token.replacen("f4c1a2d0", "deadbeef", 1);
        assert_eq!(verify(SECRET, &tampered), None);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = sign(SECRET, "f4c1a2d0");
        assert_eq!(verify(b"other-secret", &token), None);
    }

    #[test]
    fn test_verify_rejects_malformed() {
        assert_eq!(verify(SECRET, "no-separator"), None);
        assert_eq!(verify(SECRET, ".sig-only"), None);
        assert_eq!(verify(SECRET, "payload.!!!not-base64!!!"), None);
        assert_eq!(verify(SECRET, "a.b.c"), None);
    }
}
