//! Base58-check encoding
//!
//! Every wire record carries a 4-byte checksum: the first four bytes of
//! double-SHA-256 of the record body, appended in digest order. The whole
//! blob is then Base58-encoded with the Bitcoin alphabet.

use obscura_hash::double_sha256;
use thiserror::Error;

/// Length of the checksum suffix
pub const CHECKSUM_LEN: usize = 4;

/// Errors from Base58-check decoding
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("base58 decoding failed: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("record shorter than its checksum")]
    Truncated,
}

/// Append the 4-byte double-SHA-256 checksum of `data` to `data`.
pub fn append_checksum(data: &mut Vec<u8>) {
    let digest = double_sha256(data);
    data.extend_from_slice(&digest[..CHECKSUM_LEN]);
}

/// Check the trailing 4-byte checksum against the preceding body.
pub fn verify_checksum(data: &[u8]) -> bool {
    if data.len() < CHECKSUM_LEN {
        return false;
    }
    let (body, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    double_sha256(body)[..CHECKSUM_LEN] == *checksum
}

/// Base58-encode `body` with its checksum appended.
pub fn encode_base58check(body: &[u8]) -> String {
    let mut raw = body.to_vec();
    append_checksum(&mut raw);
    bs58::encode(raw).into_string()
}

/// Decode a Base58-check string, verifying and stripping the checksum.
pub fn decode_base58check(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    let mut raw = bs58::decode(encoded).into_vec()?;
    if raw.len() < CHECKSUM_LEN {
        return Err(EncodingError::Truncated);
    }
    if !verify_checksum(&raw) {
        return Err(EncodingError::ChecksumMismatch);
    }
    raw.truncate(raw.len() - CHECKSUM_LEN);
    Ok(raw)
}
