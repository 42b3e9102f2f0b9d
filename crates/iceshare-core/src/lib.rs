//! ICE record sharing: compact codec, transport envelopes, and share-link binding.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod protocol;
pub mod share;
pub mod types;
pub mod url;
pub mod url_safe;
pub mod wire;

pub use codec::{compact, expand};
#[cfg(feature = "compressed")]
pub use envelope::CompressedEnvelope;
#[cfg(feature = "remote")]
pub use envelope::RemoteEnvelope;
pub use envelope::{Envelope, EnvelopeKind, SealedEnvelope};
pub use error::ShareError;
pub use share::ShareCodec;
pub use types::{EmergencyContact, IceRecord, SchoolInfo};
pub use crate::url::{build_share_url, extract_token, strip_token, token_from_url, ShareBase};
pub use wire::{WireContact, WireRecord, WireSchool};
