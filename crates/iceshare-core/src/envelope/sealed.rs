//! In-process authenticated-encryption envelope.
//!
//! Seal: UTF-8 -> AES-256-GCM (fresh 16-byte IV) -> `iv:tag:ct` hex -> URL-safe
//! Open: alphabet check -> undo URL-safe -> split/hex-decode -> verify+decrypt -> UTF-8

use std::sync::Arc;

use async_trait::async_trait;
use iceshare_crypto::{EncryptionKey, SealedPayload};

use super::{Envelope, EnvelopeKind};
use crate::error::ShareError;
use crate::url_safe::{check_alphabet, from_url_safe, to_url_safe};

/// Variant A envelope for the side that holds the key.
#[derive(Debug, Clone)]
pub struct SealedEnvelope {
    key: Arc<EncryptionKey>,
}

impl SealedEnvelope {
    pub fn new(key: EncryptionKey) -> Self {
        Self { key: Arc::new(key) }
    }

    pub fn from_shared(key: Arc<EncryptionKey>) -> Self {
        Self { key }
    }

    /// Build from an optional hex key, as read from configuration.
    pub fn from_hex(key_hex: Option<&str>) -> Result<Self, ShareError> {
        let key_hex = key_hex
            .filter(|k| !k.trim().is_empty())
            .ok_or(ShareError::MissingKeyConfiguration)?;
        Ok(Self::new(EncryptionKey::from_hex(key_hex)?))
    }

    /// Encrypt to the three-segment hex form, without the URL-safety transform.
    pub fn seal_hex(&self, plaintext: &str) -> Result<String, ShareError> {
        let sealed = iceshare_crypto::seal(&self.key, plaintext.as_bytes())?;
        Ok(sealed.to_hex_string())
    }

    /// Decrypt the three-segment hex form.
    pub fn open_hex(&self, encrypted: &str) -> Result<String, ShareError> {
        let sealed = SealedPayload::parse(encrypted)?;
        let plaintext = iceshare_crypto::open(&self.key, &sealed)?;
        String::from_utf8(plaintext).map_err(|e| ShareError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl Envelope for SealedEnvelope {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Sealed
    }

    async fn seal(&self, plaintext: &str) -> Result<String, ShareError> {
        let token = to_url_safe(&self.seal_hex(plaintext)?);
        tracing::debug!(
            plaintext_len = plaintext.len(),
            token_len = token.len(),
            "sealed share payload"
        );
        Ok(token)
    }

    async fn open(&self, token: &str) -> Result<String, ShareError> {
        check_alphabet(token, true)?;
        self.open_hex(&from_url_safe(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> SealedEnvelope {
        SealedEnvelope::new(EncryptionKey::generate().unwrap())
    }

    fn is_sealed_alphabet(token: &str) -> bool {
        token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '~' || c == '-')
    }

    #[tokio::test]
    async fn round_trip_various_strings() {
        let env = envelope();
        let long = "x".repeat(10_000);
        let inputs = [
            "",
            r#"{"n":"Test"}"#,
            "a:b:c",
            "+/=+/=",
            "héllo wörld ✓ 日本語 🚑",
            long.as_str(),
        ];
        for input in inputs {
            let token = env.seal(input).await.unwrap();
            assert!(is_sealed_alphabet(&token), "token {token:?}");
            assert_eq!(env.open(&token).await.unwrap(), input);
        }
    }

    #[tokio::test]
    async fn token_has_three_tilde_segments() {
        let env = envelope();
        let token = env.seal(r#"{"n":"Test"}"#).await.unwrap();
        let parts: Vec<&str> = token.split('~').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 32);
        assert_eq!(parts[1].len(), 32);
        assert!(!token.contains(':'));
    }

    #[tokio::test]
    async fn same_plaintext_gives_different_tokens() {
        let env = envelope();
        let t1 = env.seal("same").await.unwrap();
        let t2 = env.seal("same").await.unwrap();
        assert_ne!(t1, t2);
    }

    #[tokio::test]
    async fn two_segments_is_malformed() {
        let env = envelope();
        let token = env.seal("payload").await.unwrap();
        let parts: Vec<&str> = token.split('~').collect();
        let missing_tag = format!("{}~{}", parts[0], parts[2]);
        let err = env.open(&missing_tag).await.unwrap_err();
        assert!(matches!(err, ShareError::MalformedToken(_)));
    }

    #[tokio::test]
    async fn invalid_alphabet_is_malformed() {
        let env = envelope();
        let err = env.open("abc:def:012").await.unwrap_err();
        assert!(matches!(err, ShareError::MalformedToken(_)));
    }

    #[tokio::test]
    async fn bit_flip_in_ciphertext_fails_authentication() {
        let env = envelope();
        let token = env.seal(r#"{"n":"Test"}"#).await.unwrap();
        let sealed = SealedPayload::parse(&from_url_safe(&token)).unwrap();

        for byte in 0..sealed.ciphertext.len() {
            for bit in 0..8 {
                let mut tampered = sealed.clone();
                tampered.ciphertext[byte] ^= 1 << bit;
                let tampered_token = to_url_safe(&tampered.to_hex_string());
                let err = env.open(&tampered_token).await.unwrap_err();
                assert!(matches!(err, ShareError::AuthenticationFailed));
            }
        }
    }

    #[tokio::test]
    async fn bit_flip_in_tag_fails_authentication() {
        let env = envelope();
        let token = env.seal("tagged").await.unwrap();
        let sealed = SealedPayload::parse(&from_url_safe(&token)).unwrap();

        for byte in 0..sealed.tag.len() {
            let mut tampered = sealed.clone();
            tampered.tag[byte] ^= 0x80;
            let tampered_token = to_url_safe(&tampered.to_hex_string());
            let err = env.open(&tampered_token).await.unwrap_err();
            assert!(matches!(err, ShareError::AuthenticationFailed));
        }
    }

    #[tokio::test]
    async fn wrong_key_fails_authentication() {
        let token = envelope().seal("secret").await.unwrap();
        let err = envelope().open(&token).await.unwrap_err();
        assert!(matches!(err, ShareError::AuthenticationFailed));
    }

    #[test]
    fn missing_key_configuration() {
        assert!(matches!(
            SealedEnvelope::from_hex(None),
            Err(ShareError::MissingKeyConfiguration)
        ));
        assert!(matches!(
            SealedEnvelope::from_hex(Some("  ")),
            Err(ShareError::MissingKeyConfiguration)
        ));
        assert!(SealedEnvelope::from_hex(Some(&"ab".repeat(32))).is_ok());
        assert!(matches!(
            SealedEnvelope::from_hex(Some("abcd")),
            Err(ShareError::Crypto(_))
        ));
    }

    #[test]
    fn hex_form_round_trip() {
        let env = envelope();
        let encrypted = env.seal_hex("raw form").unwrap();
        assert_eq!(encrypted.matches(':').count(), 2);
        assert_eq!(env.open_hex(&encrypted).unwrap(), "raw form");
    }
}
