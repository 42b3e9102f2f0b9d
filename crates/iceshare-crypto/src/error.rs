use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("Malformed sealed payload: {0}")]
    MalformedSealed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Tag mismatch, wrong key, or any corruption. Deliberately carries no detail.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
