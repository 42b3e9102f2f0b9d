//! Compression envelope for static hosting: compact, not confidential.
//!
//! Seal: UTF-8 -> zlib deflate (best) -> Base64 -> URL-safe
//! Open: alphabet check -> undo URL-safe -> re-pad -> Base64 -> inflate -> UTF-8

use std::io::Write;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use super::{Envelope, EnvelopeKind};
use crate::error::ShareError;
use crate::url_safe::{check_alphabet, from_url_safe, restore_padding, to_url_safe};

/// Variant B envelope. Anyone holding the token can read it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressedEnvelope;

impl CompressedEnvelope {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous seal; the trait method simply wraps this.
    pub fn seal_sync(&self, plaintext: &str) -> Result<String, ShareError> {
        let deflate_failed =
            |e: std::io::Error| ShareError::Serialization(format!("deflate failed: {e}"));
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(plaintext.as_bytes()).map_err(deflate_failed)?;
        let compressed = encoder.finish().map_err(deflate_failed)?;
        Ok(to_url_safe(&Base64::encode_string(&compressed)))
    }

    /// Synchronous open; the trait method simply wraps this.
    pub fn open_sync(&self, token: &str) -> Result<String, ShareError> {
        check_alphabet(token, false)?;
        let padded = restore_padding(&from_url_safe(token));
        let compressed = Base64::decode_vec(&padded)
            .map_err(|e| ShareError::MalformedToken(format!("base64: {e}")))?;

        let decompressed = inflate(&compressed)?;
        String::from_utf8(decompressed).map_err(|e| ShareError::CorruptPayload(e.to_string()))
    }
}

/// Inflate a zlib stream, requiring it to reach its end marker.
///
/// A stream that runs out of input before the end marker is reported as
/// corrupt rather than returned as a silently truncated prefix.
fn inflate(compressed: &[u8]) -> Result<Vec<u8>, ShareError> {
    let mut inflater = Decompress::new(true);
    let mut output = Vec::with_capacity(compressed.len().saturating_mul(4).max(64));

    loop {
        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        if output.len() == output.capacity() {
            output.reserve(output.capacity());
        }

        let status = inflater
            .decompress_vec(
                &compressed[in_before as usize..],
                &mut output,
                FlushDecompress::None,
            )
            .map_err(|e| ShareError::CorruptPayload(e.to_string()))?;

        if status == Status::StreamEnd {
            return Ok(output);
        }
        if inflater.total_in() == in_before && inflater.total_out() == out_before {
            return Err(ShareError::CorruptPayload(
                "truncated deflate stream".to_string(),
            ));
        }
    }
}

#[async_trait]
impl Envelope for CompressedEnvelope {
    fn kind(&self) -> EnvelopeKind {
        EnvelopeKind::Compressed
    }

    async fn seal(&self, plaintext: &str) -> Result<String, ShareError> {
        let token = self.seal_sync(plaintext)?;
        tracing::debug!(
            plaintext_len = plaintext.len(),
            token_len = token.len(),
            "compressed share payload"
        );
        Ok(token)
    }

    async fn open(&self, token: &str) -> Result<String, ShareError> {
        self.open_sync(token)
    }
}
