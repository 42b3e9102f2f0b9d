/// AES-GCM IV length in bytes.
///
/// The share format uses a 16-byte IV rather than the 96-bit NIST default,
/// so tokens produced by earlier deployments remain readable.
pub const AES_GCM_IV_LENGTH: usize = 16;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// Separator between the IV, tag and ciphertext segments of a sealed payload.
pub const SEGMENT_DELIMITER: char = ':';

/// Number of hex characters in a hex-encoded IV.
pub const IV_HEX_LENGTH: usize = AES_GCM_IV_LENGTH * 2;

/// Number of hex characters in a hex-encoded tag.
pub const TAG_HEX_LENGTH: usize = AES_GCM_TAG_LENGTH * 2;
