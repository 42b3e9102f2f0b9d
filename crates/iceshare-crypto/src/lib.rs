//! Authenticated encryption for share tokens.
//!
//! AES-256-GCM with a 16-byte IV, emitted as `iv:tag:ciphertext` hex text.

pub mod aes_gcm;
pub mod error;
pub mod key;
pub mod sealed;
pub mod types;

pub use crate::aes_gcm::{generate_iv, open, seal, seal_with_iv};
pub use error::CryptoError;
pub use key::EncryptionKey;
pub use sealed::SealedPayload;
pub use types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, SEGMENT_DELIMITER};
