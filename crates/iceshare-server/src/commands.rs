//! Handlers for the `encode`, `decode` and `keygen` commands.

use std::io::Read;

use iceshare_core::{
    build_share_url, token_from_url, CompressedEnvelope, Envelope, EnvelopeKind, IceRecord,
    RemoteEnvelope, SealedEnvelope, ShareBase, ShareCodec, ShareError,
};
use iceshare_crypto::EncryptionKey;
use url::Url;

use crate::config::Config;
use crate::error::Result;

/// Build the one envelope this deployment uses.
///
/// Sealed prefers a local key and falls back to `share.endpoint`.
pub fn envelope_from_config(config: &Config) -> Result<Box<dyn Envelope>> {
    match config.share.envelope {
        EnvelopeKind::Compressed => Ok(Box::new(CompressedEnvelope::new())),
        EnvelopeKind::Sealed => {
            if let Some(key) = config.encryption_key()? {
                return Ok(Box::new(SealedEnvelope::new(key)));
            }
            match &config.share.endpoint {
                Some(endpoint) => Ok(Box::new(RemoteEnvelope::new(endpoint.as_str()))),
                None => Err(ShareError::MissingKeyConfiguration.into()),
            }
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// Encode a full-shape record JSON into a share link (or a bare token).
pub async fn encode(
    codec: &ShareCodec<Box<dyn Envelope>>,
    record_json: &str,
    base_url: &str,
    token_only: bool,
) -> Result<String> {
    let record = IceRecord::import_json(record_json)?;
    let token = codec.encode_record(&record).await?;
    tracing::info!(token_len = token.len(), "encoded record");
    if token_only {
        Ok(token)
    } else {
        Ok(build_share_url(&token, ShareBase::Explicit(base_url)))
    }
}

/// Pull the token out of a share link, or take the input as a bare token.
pub fn token_from_input(input: &str) -> std::result::Result<String, ShareError> {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) => token_from_url(&url)
            .ok_or_else(|| ShareError::MalformedToken("URL carries no data parameter".into())),
        Err(_) => Ok(input.to_string()),
    }
}

/// Decode a token or share link into pretty full-shape JSON.
pub async fn decode(codec: &ShareCodec<Box<dyn Envelope>>, input: &str) -> Result<String> {
    let token = token_from_input(input)?;
    let record = codec.try_decode_token(&token).await?;
    Ok(record.export_json()?)
}

pub fn keygen() -> Result<String> {
    Ok(EncryptionKey::generate().map_err(ShareError::from)?.to_hex())
}

/// Dispatch `encode` with input read from a file or stdin.
pub async fn run_encode(
    config: &Config,
    input: &str,
    base_url: Option<String>,
    token_only: bool,
) -> Result<String> {
    let codec = ShareCodec::new(envelope_from_config(config)?);
    let base = base_url.unwrap_or_else(|| config.share_base());
    encode(&codec, &read_input(input)?, &base, token_only).await
}

pub async fn run_decode(config: &Config, input: &str) -> Result<String> {
    let codec = ShareCodec::new(envelope_from_config(config)?);
    decode(&codec, input).await
}
