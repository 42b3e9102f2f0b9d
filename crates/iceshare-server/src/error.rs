//! Error types for the iceshare binary and its endpoints.

use iceshare_core::ShareError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    #[error("invalid configuration: {message}")]
    ConfigValidation { message: String },

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_errors_display_transparently() {
        let err: Error = ShareError::MissingKeyConfiguration.into();
        assert_eq!(err.to_string(), "Encryption key not configured");
    }

    #[test]
    fn config_validation_display() {
        let err = Error::config_validation("bad bind address");
        assert_eq!(err.to_string(), "invalid configuration: bad bind address");
    }
}
