use iceshare_crypto::CryptoError;
use serde_json::error::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed wire shape: {0}")]
    MalformedWireShape(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Tag mismatch, wrong key, or corruption. Intentionally indistinguishable.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    #[error("Encryption key not configured")]
    MissingKeyConfiguration,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Crypto error: {0}")]
    Crypto(CryptoError),
}

impl ShareError {
    /// Classify a JSON error: syntax problems vs. a document of the wrong shape.
    ///
    /// Only the category and position are kept. serde_json's own message can
    /// quote the offending value, which here is decrypted record content.
    pub fn from_json(e: serde_json::Error) -> Self {
        let category = e.classify();
        let detail = format!("{category:?} error at line {} column {}", e.line(), e.column());
        match category {
            Category::Data => ShareError::MalformedWireShape(detail),
            Category::Io | Category::Syntax | Category::Eof => ShareError::Serialization(detail),
        }
    }
}

impl From<CryptoError> for ShareError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::AuthenticationFailed => ShareError::AuthenticationFailed,
            CryptoError::MalformedSealed(msg) => ShareError::MalformedToken(msg),
            other => ShareError::Crypto(other),
        }
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for ShareError {
    fn from(e: reqwest::Error) -> Self {
        ShareError::Transport(e.to_string())
    }
}
