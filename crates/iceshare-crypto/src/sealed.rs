//! Hex text form of a sealed payload.
//!
//! Format: `<IV hex:32>:<tag hex:32>:<ciphertext hex>`

use std::fmt;

use crate::error::CryptoError;
use crate::types::{
    AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, IV_HEX_LENGTH, SEGMENT_DELIMITER, TAG_HEX_LENGTH,
};

/// AES-GCM output split into its three transmitted parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    pub iv: [u8; AES_GCM_IV_LENGTH],
    pub tag: [u8; AES_GCM_TAG_LENGTH],
    pub ciphertext: Vec<u8>,
}

impl SealedPayload {
    /// Render as `iv:tag:ciphertext`, lowercase hex.
    pub fn to_hex_string(&self) -> String {
        format!(
            "{}{SEGMENT_DELIMITER}{}{SEGMENT_DELIMITER}{}",
            hex::encode(self.iv),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext)
        )
    }

    /// Parse the `iv:tag:ciphertext` form.
    ///
    /// Requires exactly three segments with a 32-character IV and tag.
    /// The ciphertext segment may be empty (empty plaintext).
    pub fn parse(encoded: &str) -> Result<Self, CryptoError> {
        let segments: Vec<&str> = encoded.split(SEGMENT_DELIMITER).collect();
        if segments.len() != 3 {
            return Err(CryptoError::MalformedSealed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        }

        let iv = decode_fixed::<AES_GCM_IV_LENGTH>(segments[0], IV_HEX_LENGTH, "IV")?;
        let tag = decode_fixed::<AES_GCM_TAG_LENGTH>(segments[1], TAG_HEX_LENGTH, "tag")?;
        let ciphertext = hex::decode(segments[2])
            .map_err(|e| CryptoError::MalformedSealed(format!("ciphertext: {}", e)))?;

        Ok(Self {
            iv,
            tag,
            ciphertext,
        })
    }
}

impl fmt::Display for SealedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

fn decode_fixed<const N: usize>(
    segment: &str,
    hex_len: usize,
    name: &'static str,
) -> Result<[u8; N], CryptoError> {
    if segment.len() != hex_len {
        return Err(CryptoError::MalformedSealed(format!(
            "{name} must be {hex_len} hex characters, got {}",
            segment.len()
        )));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(segment, &mut out)
        .map_err(|e| CryptoError::MalformedSealed(format!("{name}: {e}")))?;
    Ok(out)
}
