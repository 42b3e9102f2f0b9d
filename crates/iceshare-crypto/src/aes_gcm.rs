//! AES-256-GCM sealing for share tokens.
//!
//! Uses a 16-byte IV (GHASH-derived counter block) and a detached
//! 128-bit tag, matching the `iv:tag:ciphertext` transmission format.
//! No associated data is bound.

use ::aes_gcm::aead::consts::U16;
use ::aes_gcm::aead::{AeadInPlace, KeyInit};
use ::aes_gcm::aes::Aes256;
use ::aes_gcm::{AesGcm, Nonce, Tag};

use crate::error::CryptoError;
use crate::key::EncryptionKey;
use crate::sealed::SealedPayload;
use crate::types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH};

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

fn cipher(key: &EncryptionKey) -> Result<Aes256Gcm16, CryptoError> {
    Aes256Gcm16::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Generate a random 16-byte IV. Must be fresh for every seal.
pub fn generate_iv() -> Result<[u8; AES_GCM_IV_LENGTH], CryptoError> {
    let mut iv = [0u8; AES_GCM_IV_LENGTH];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
    Ok(iv)
}

/// Encrypt `plaintext` under `key` with a freshly generated IV.
pub fn seal(key: &EncryptionKey, plaintext: &[u8]) -> Result<SealedPayload, CryptoError> {
    let iv = generate_iv()?;
    seal_with_iv(key, iv, plaintext)
}

/// Encrypt with a caller-chosen IV.
///
/// Reusing an IV under the same key breaks confidentiality; outside of
/// fixed test vectors, use [`seal`].
pub fn seal_with_iv(
    key: &EncryptionKey,
    iv: [u8; AES_GCM_IV_LENGTH],
    plaintext: &[u8],
) -> Result<SealedPayload, CryptoError> {
    let cipher = cipher(key)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut buffer)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut tag_bytes = [0u8; AES_GCM_TAG_LENGTH];
    tag_bytes.copy_from_slice(&tag);

    Ok(SealedPayload {
        iv,
        tag: tag_bytes,
        ciphertext: buffer,
    })
}

/// Verify and decrypt a sealed payload.
///
/// Every failure (tag mismatch, wrong key, tampered IV or ciphertext)
/// collapses into [`CryptoError::AuthenticationFailed`].
pub fn open(key: &EncryptionKey, sealed: &SealedPayload) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher(key)?;
    let mut buffer = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(&sealed.iv),
            b"",
            &mut buffer,
            Tag::<U16>::from_slice(&sealed.tag),
        )
        .map_err(|_| CryptoError::AuthenticationFailed)?;
    Ok(buffer)
}
