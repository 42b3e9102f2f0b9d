//! Drives the real endpoints over HTTP: raw status codes and the remote envelope.

use iceshare_core::protocol::{ErrorBody, DECRYPT_PATH, ENCRYPT_PATH};
use iceshare_core::{Envelope, IceRecord, RemoteEnvelope, ShareCodec, ShareError};
use iceshare_crypto::EncryptionKey;
use iceshare_server::{router, AppState};
use serde_json::json;
use tokio::net::TcpListener;

async fn spawn_server(key: Option<EncryptionKey>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(key));
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{addr}")
}

fn random_key() -> EncryptionKey {
    EncryptionKey::generate().unwrap()
}

async fn post_raw(base: &str, path: &str, body: String) -> (u16, String) {
    let response = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn remote_envelope_round_trips_a_record() {
    let base = spawn_server(Some(random_key())).await;
    let codec = ShareCodec::new(RemoteEnvelope::new(base.as_str()));

    let mut record = IceRecord {
        name: "Jane Roe".into(),
        age: Some(9),
        medical_notes: "Asthma: inhaler in backpack".into(),
        ..IceRecord::default()
    };
    record.add_contact("John Roe", "Father", "555-0100", None);

    let token = codec.encode_record(&record).await.unwrap();
    assert_eq!(token.split('~').count(), 3);
    assert!(token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '~' || c == '-'));

    let decoded = codec.decode_token(&token).await.unwrap();
    assert_eq!(decoded.name, "Jane Roe");
    assert_eq!(decoded.medical_notes, record.medical_notes);
    assert_eq!(decoded.emergency_contacts, record.emergency_contacts);
}

#[tokio::test]
async fn remote_envelope_maps_server_errors() {
    let keyed = spawn_server(Some(random_key())).await;
    let other = spawn_server(Some(random_key())).await;

    let token = RemoteEnvelope::new(keyed.as_str()).seal("secret").await.unwrap();
    let err = RemoteEnvelope::new(other.as_str()).open(&token).await.unwrap_err();
    assert!(matches!(err, ShareError::AuthenticationFailed));

    let keyless = spawn_server(None).await;
    let err = RemoteEnvelope::new(keyless.as_str()).seal("x").await.unwrap_err();
    assert!(matches!(err, ShareError::MissingKeyConfiguration));

    let err = RemoteEnvelope::new(keyed.as_str()).open("abc~def").await.unwrap_err();
    assert!(matches!(err, ShareError::MalformedToken(_)));

    // Decode path never surfaces the error.
    let codec = ShareCodec::new(RemoteEnvelope::new(other.as_str()));
    assert!(codec.decode_token(&token).await.is_none());
}

#[tokio::test]
async fn encrypt_endpoint_status_codes() {
    let base = spawn_server(Some(random_key())).await;

    let (status, body) = post_raw(&base, ENCRYPT_PATH, json!({ "data": "x" }).to_string()).await;
    assert_eq!(status, 200);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["encrypted"].as_str().unwrap().matches(':').count(), 2);

    for bad in [
        json!({}).to_string(),
        json!({ "data": 7 }).to_string(),
        json!({ "data": "" }).to_string(),
        "not json".to_string(),
    ] {
        let (status, body) = post_raw(&base, ENCRYPT_PATH, bad).await;
        assert_eq!(status, 400);
        let error: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(error.status_code, 400);
        assert_eq!(error.message, "Invalid data format");
    }
}

#[tokio::test]
async fn decrypt_endpoint_status_codes() {
    let base = spawn_server(Some(random_key())).await;

    let body = json!({ "encrypted": "a:b" }).to_string();
    let (status, body) = post_raw(&base, DECRYPT_PATH, body).await;
    assert_eq!(status, 400);
    let error: ErrorBody = serde_json::from_str(&body).unwrap();
    assert_eq!(error.message, "Invalid encrypted data format");

    let forged = format!("{}:{}:{}", "00".repeat(16), "00".repeat(16), "abcd");
    let body = json!({ "encrypted": forged }).to_string();
    let (status, body) = post_raw(&base, DECRYPT_PATH, body).await;
    assert_eq!(status, 500);
    let error: ErrorBody = serde_json::from_str(&body).unwrap();
    assert_eq!(error.message, "Decryption failed - data may be corrupted");
}

#[tokio::test]
async fn missing_key_answers_500() {
    let base = spawn_server(None).await;
    let (status, body) = post_raw(&base, ENCRYPT_PATH, json!({ "data": "x" }).to_string()).await;
    assert_eq!(status, 500);
    let error: ErrorBody = serde_json::from_str(&body).unwrap();
    assert_eq!(error.message, "Encryption key not configured");
}
