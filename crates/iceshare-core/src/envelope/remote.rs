//! Sealed envelope driven over HTTP, for clients that never see the key.
//!
//! The server performs AES-256-GCM and returns the `iv:tag:ct` hex form;
//! this side only applies and undoes the URL-safety transform.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Envelope, EnvelopeKind};
use crate::error::ShareError;
use crate::protocol::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, ErrorBody, ErrorCode,
    DECRYPT_PATH, ENCRYPT_PATH,
};
use crate::url_safe::{check_alphabet, from_url_safe, to_url_safe};

/// Variant A envelope for the side without the key.
#[derive(Debug, Clone)]
pub struct RemoteEnvelope {
    client: Client,
    endpoint: String,
}

impl RemoteEnvelope {
    /// `endpoint` is the server origin, e.g. `https://ice.example.org`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<Req, Resp>(&self, call: Call, body: &Req) -> Result<Resp, ShareError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint, call.path());
        let response = self.client.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, call).await);
        }
        response
            .json::<Resp>()
            .await
            .map_err(|e| ShareError::Transport(format!("invalid response body: {e}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Encrypt,
    Decrypt,
}

impl Call {
    fn path(self) -> &'static str {
        match self {
            Call::Encrypt => ENCRYPT_PATH,
            Call::Decrypt => DECRYPT_PATH,
        }
    }
}

async fn error_from_response(response: Response, call: Call) -> ShareError {
    let status = response.status().as_u16();
    match response.text().await {
        Ok(text) => error_from_body(status, text, call),
        Err(e) => ShareError::Transport(e.to_string()),
    }
}

/// Map a non-2xx reply onto the error taxonomy.
///
/// A rejected input on encrypt means the request body was wrong, not that a
/// token was malformed.
fn error_from_body(status: u16, text: String, call: Call) -> ShareError {
    let Ok(body) = serde_json::from_str::<ErrorBody>(&text) else {
        return ShareError::Server {
            status,
            message: text,
        };
    };
    match body.error {
        Some(ErrorCode::AuthenticationFailed) => ShareError::AuthenticationFailed,
        Some(ErrorCode::MissingKey) => ShareError::MissingKeyConfiguration,
        Some(ErrorCode::InvalidInput) => match call {
            Call::Encrypt => ShareError::Serialization(body.message),
            Call::Decrypt => ShareError::MalformedToken(body.message),
        },
        Some(ErrorCode::Internal) | None => ShareError::Server {
            status,
            message: body.message,
        },
    }
}

#[async_trait]
impl Envelope for RemoteEnvelope {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Sealed
    }

    async fn seal(&self, plaintext: &str) -> Result<String, ShareError> {
        let request = EncryptRequest {
            data: plaintext.to_string(),
        };
        let response: EncryptResponse = self.post(Call::Encrypt, &request).await?;
        if response.encrypted.is_empty() {
            return Err(ShareError::Transport(
                "server returned invalid encrypted data".to_string(),
            ));
        }
        tracing::debug!(
            endpoint = %self.endpoint,
            plaintext_len = plaintext.len(),
            "remote sealed share payload"
        );
        Ok(to_url_safe(&response.encrypted))
    }

    async fn open(&self, token: &str) -> Result<String, ShareError> {
        check_alphabet(token, true)?;
        let request = DecryptRequest {
            encrypted: from_url_safe(token),
        };
        let response: DecryptResponse = self.post(Call::Decrypt, &request).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let env = RemoteEnvelope::new("http://localhost:3000/");
        assert_eq!(env.endpoint(), "http://localhost:3000");
        assert_eq!(env.kind(), EnvelopeKind::Sealed);
    }

    #[tokio::test]
    async fn bad_alphabet_fails_before_any_request() {
        // Port 9 (discard) is never contacted: the token is rejected first.
        let env = RemoteEnvelope::new("http://127.0.0.1:9");
        let err = env.open("abc:def").await.unwrap_err();
        assert!(matches!(err, ShareError::MalformedToken(_)));
    }

    fn body(error: ErrorCode, message: &str) -> String {
        serde_json::to_string(&ErrorBody {
            status_code: 400,
            message: message.to_string(),
            error: Some(error),
        })
        .unwrap()
    }

    #[test]
    fn invalid_input_depends_on_the_call() {
        let text = body(ErrorCode::InvalidInput, "Invalid data format");
        let err = error_from_body(400, text.clone(), Call::Encrypt);
        assert!(matches!(err, ShareError::Serialization(ref m) if m == "Invalid data format"));

        let err = error_from_body(400, text, Call::Decrypt);
        assert!(matches!(err, ShareError::MalformedToken(_)));
    }

    #[test]
    fn error_codes_map_the_same_for_both_calls() {
        for call in [Call::Encrypt, Call::Decrypt] {
            let text = body(ErrorCode::MissingKey, "Encryption key not configured");
            let err = error_from_body(500, text, call);
            assert!(matches!(err, ShareError::MissingKeyConfiguration));

            let text = body(ErrorCode::AuthenticationFailed, "Decryption failed");
            let err = error_from_body(500, text, call);
            assert!(matches!(err, ShareError::AuthenticationFailed));

            let err = error_from_body(502, "<html>bad gateway</html>".into(), call);
            assert!(matches!(err, ShareError::Server { status: 502, .. }));
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let env = RemoteEnvelope::new("http://127.0.0.1:1");
        let err = env.seal("{}").await.unwrap_err();
        assert!(matches!(err, ShareError::Transport(_)));
    }
}
