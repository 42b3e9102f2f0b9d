//! Transport envelopes: wire JSON text <-> URL-safe token.
//!
//! Two interchangeable designs share the [`Envelope`] contract:
//! - sealed (AES-256-GCM, confidential; in-process or via the HTTP endpoints)
//! - compressed (deflate + Base64, compact only, anyone can read it)
//!
//! A deployment constructs exactly one of them, chosen by [`EnvelopeKind`].

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ShareError;

#[cfg(feature = "compressed")]
mod compressed;
#[cfg(feature = "remote")]
mod remote;
mod sealed;

#[cfg(feature = "compressed")]
pub use compressed::CompressedEnvelope;
#[cfg(feature = "remote")]
pub use remote::RemoteEnvelope;
pub use sealed::SealedEnvelope;

/// Which envelope design a deployment uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    /// Authenticated encryption (requires a server-held key).
    #[default]
    Sealed,
    /// Deflate + Base64, no secrecy (static hosting).
    Compressed,
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeKind::Sealed => f.write_str("sealed"),
            EnvelopeKind::Compressed => f.write_str("compressed"),
        }
    }
}

impl FromStr for EnvelopeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sealed" => Ok(EnvelopeKind::Sealed),
            "compressed" => Ok(EnvelopeKind::Compressed),
            other => Err(format!("unknown envelope kind: {other}")),
        }
    }
}

/// String-in/string-out token transport.
///
/// `open(seal(s)) == s` for every string `s`, and every sealed token uses
/// only URL-safe characters. Implementations hold no per-call state.
#[async_trait]
pub trait Envelope: Send + Sync {
    fn kind(&self) -> EnvelopeKind;

    /// Turn plaintext (wire JSON) into a URL-safe token.
    async fn seal(&self, plaintext: &str) -> Result<String, ShareError>;

    /// Recover the plaintext from a token produced by [`Envelope::seal`].
    async fn open(&self, token: &str) -> Result<String, ShareError>;
}

#[async_trait]
impl<T: Envelope + ?Sized> Envelope for Box<T> {
    fn kind(&self) -> EnvelopeKind {
        (**self).kind()
    }

    async fn seal(&self, plaintext: &str) -> Result<String, ShareError> {
        (**self).seal(plaintext).await
    }

    async fn open(&self, token: &str) -> Result<String, ShareError> {
        (**self).open(token).await
    }
}
