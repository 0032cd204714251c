//! Webhook request signing.
//!
//! Optional authentication for the confirmation callback: when a
//! signing secret is configured, the caller must send the hex-encoded
//! HMAC-SHA256 of the raw request body in the signature header. With no
//! secret configured the endpoint trusts the payload verbatim, which is
//! the original wire contract.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

/// Header carrying the hex-encoded body signature.
pub const SIGNATURE_HEADER: &str = "X-Verification-Signature";

/// Errors that can occur during signature handling.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The signing key could not be used.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    /// The provided signature does not match the body.
    #[error("signature mismatch")]
    Mismatch,
}

/// Compute the hex signature for a body (the caller's side of the
/// contract).
///
/// # Errors
///
/// Returns error if the key cannot be used for HMAC.
pub fn sign(secret: &SecretString, body: &str) -> Result<String, SignatureError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|e| SignatureError::InvalidKey(e.to_string()))?;

    mac.update(body.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a caller-supplied signature against the raw body.
///
/// # Errors
///
/// Returns error if signature verification fails.
pub fn verify(secret: &SecretString, body: &str, signature: &str) -> Result<(), SignatureError> {
    let expected = sign(secret, body)?;

    // Constant-time comparison
    if !constant_time_compare(&expected, signature) {
        return Err(SignatureError::Mismatch);
    }

    Ok(())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("k9!vQ2#mX7$pL4@nR8%wT1&zC5^bF3*j".to_string())
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hello", "helloo"));
    }

    #[test]
    fn test_signature_round_trip() {
        let body = r#"{"discordUserId":"155149108183695360"}"#;
        let signature = sign(&secret(), body).expect("signs");

        assert!(verify(&secret(), body, &signature).is_ok());
    }

    #[test]
    fn test_signature_rejects_tampered_body() {
        let signature = sign(&secret(), r#"{"discordUserId":"1"}"#).expect("signs");

        let result = verify(&secret(), r#"{"discordUserId":"2"}"#, &signature);
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }

    #[test]
    fn test_signature_rejects_wrong_secret() {
        let body = r#"{"discordUserId":"1"}"#;
        let signature = sign(&secret(), body).expect("signs");

        let other = SecretString::from("a completely different signing key!!".to_string());
        assert!(verify(&other, body, &signature).is_err());
    }

    #[test]
    fn test_signature_rejects_garbage() {
        assert!(verify(&secret(), "body", "not-a-signature").is_err());
        assert!(verify(&secret(), "body", "").is_err());
    }
}
