//! `POST /api/encrypt` and `POST /api/decrypt`.
//!
//! The only shared state is the optional key. Bodies are taken as raw JSON
//! values so every malformed request gets the documented 400 message rather
//! than the extractor's default rejection.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use iceshare_core::protocol::{
    DecryptResponse, EncryptResponse, ErrorBody, ErrorCode, DECRYPT_PATH, ENCRYPT_PATH,
};
use iceshare_core::{SealedEnvelope, ShareError};
use iceshare_crypto::{EncryptionKey, SEGMENT_DELIMITER};
use serde_json::Value;

pub const INVALID_DATA: &str = "Invalid data format";
pub const INVALID_ENCRYPTED: &str = "Invalid encrypted data format";
pub const KEY_NOT_CONFIGURED: &str = "Encryption key not configured";
pub const ENCRYPTION_FAILED: &str = "Encryption failed";
pub const DECRYPTION_FAILED: &str = "Decryption failed - data may be corrupted";

#[derive(Debug, Clone, Default)]
pub struct AppState {
    key: Option<Arc<EncryptionKey>>,
}

impl AppState {
    pub fn new(key: Option<EncryptionKey>) -> Self {
        Self {
            key: key.map(Arc::new),
        }
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    fn envelope(&self) -> Result<SealedEnvelope, ApiError> {
        self.key
            .clone()
            .map(SealedEnvelope::from_shared)
            .ok_or_else(ApiError::missing_key)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ENCRYPT_PATH, post(encrypt))
        .route(DECRYPT_PATH, post(decrypt))
        .with_state(state)
}

/// Endpoint failure, rendered as [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn invalid_input(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: ErrorCode::InvalidInput,
            message,
        }
    }

    pub fn missing_key() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: ErrorCode::MissingKey,
            message: KEY_NOT_CONFIGURED,
        }
    }

    pub fn authentication_failed() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: ErrorCode::AuthenticationFailed,
            message: DECRYPTION_FAILED,
        }
    }

    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: ErrorCode::Internal,
            message,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status_code: self.status.as_u16(),
            message: self.message.to_string(),
            error: Some(self.code),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

/// Non-empty string field of a JSON object body.
fn string_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Encrypt `{ "data": <string> }` into `{ "encrypted": "iv:tag:ct" }`.
pub fn encrypt_payload(state: &AppState, body: &Value) -> Result<EncryptResponse, ApiError> {
    let data = string_field(body, "data").ok_or(ApiError::invalid_input(INVALID_DATA))?;
    let envelope = state.envelope()?;
    let encrypted = envelope.seal_hex(data).map_err(|e| {
        tracing::error!(error = %e, "encryption failed");
        ApiError::internal(ENCRYPTION_FAILED)
    })?;
    Ok(EncryptResponse { encrypted })
}

/// Decrypt `{ "encrypted": "iv:tag:ct" }` into `{ "data": <string> }`.
pub fn decrypt_payload(state: &AppState, body: &Value) -> Result<DecryptResponse, ApiError> {
    let encrypted =
        string_field(body, "encrypted").ok_or(ApiError::invalid_input(INVALID_ENCRYPTED))?;
    let envelope = state.envelope()?;

    let segments: Vec<&str> = encrypted.split(SEGMENT_DELIMITER).collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(ApiError::invalid_input(INVALID_ENCRYPTED));
    }

    let data = envelope.open_hex(encrypted).map_err(|e| match e {
        ShareError::MalformedToken(_) => ApiError::invalid_input(INVALID_ENCRYPTED),
        ShareError::AuthenticationFailed => ApiError::authentication_failed(),
        other => {
            tracing::error!(error = %other, "decryption failed");
            ApiError::internal(DECRYPTION_FAILED)
        }
    })?;
    Ok(DecryptResponse { data })
}

fn json_or_null(body: Result<Json<Value>, JsonRejection>, endpoint: &str) -> Value {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!(endpoint, error = %rejection, "rejected request body");
            Value::Null
        }
    }
}

async fn encrypt(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EncryptResponse>, ApiError> {
    let body = json_or_null(body, ENCRYPT_PATH);
    encrypt_payload(&state, &body).map(Json).map_err(|e| {
        tracing::error!(status = e.status.as_u16(), reason = e.message, "encrypt request failed");
        e
    })
}

async fn decrypt(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let body = json_or_null(body, DECRYPT_PATH);
    decrypt_payload(&state, &body).map(Json).map_err(|e| {
        tracing::error!(status = e.status.as_u16(), reason = e.message, "decrypt request failed");
        e
    })
}
