//! Share pipeline: record -> compact -> JSON -> envelope -> token, and back.
//!
//! Encoding surfaces every failure to the caller. Decoding has two faces:
//! [`ShareCodec::try_decode_token`] reports why a token was rejected, while
//! [`ShareCodec::decode_token`] resolves any failure to `None`.

use crate::codec::{compact, expand};
use crate::envelope::Envelope;
use crate::error::ShareError;
use crate::types::IceRecord;
use crate::url::{build_share_url, extract_token, ShareBase};
use crate::wire;

/// Binds the compact codec to one envelope implementation.
#[derive(Debug, Clone)]
pub struct ShareCodec<E> {
    envelope: E,
}

impl<E: Envelope> ShareCodec<E> {
    pub fn new(envelope: E) -> Self {
        Self { envelope }
    }

    pub fn envelope(&self) -> &E {
        &self.envelope
    }

    /// Turn a record into a URL-safe token.
    pub async fn encode_record(&self, record: &IceRecord) -> Result<String, ShareError> {
        let json = wire::to_json(&compact(record))?;
        self.envelope.seal(&json).await
    }

    /// Recover a record from a token, reporting the failure class.
    pub async fn try_decode_token(&self, token: &str) -> Result<IceRecord, ShareError> {
        let json = self.envelope.open(token).await?;
        let wire = wire::from_json(&json)?;
        Ok(expand(wire))
    }

    /// Recover a record from a token; any failure yields `None`.
    pub async fn decode_token(&self, token: &str) -> Option<IceRecord> {
        match self.try_decode_token(token).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    envelope = %self.envelope.kind(),
                    token_len = token.len(),
                    error = %e,
                    "failed to decode share token"
                );
                None
            }
        }
    }

    /// Encode a record and embed the token in a share link.
    pub async fn share_url(
        &self,
        record: &IceRecord,
        base: ShareBase<'_>,
    ) -> Result<String, ShareError> {
        let token = self.encode_record(record).await?;
        Ok(build_share_url(&token, base))
    }

    /// Decode the record carried by a page's query string, if any.
    pub async fn decode_from_query(&self, query: &str) -> Option<IceRecord> {
        let token = extract_token(query)?;
        self.decode_token(&token).await
    }

    /// Length of the token for `record`, or 0 when encoding fails.
    pub async fn encoded_size(&self, record: &IceRecord) -> usize {
        match self.encode_record(record).await {
            Ok(token) => token.len(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to measure share token");
                0
            }
        }
    }
}
