//! OBSCURA Hash Functions
//!
//! SHA-256 wrappers used by the stealth protocol: the shared-secret
//! derivation hashes compressed points with a single SHA-256, and the
//! Base58-check codec uses the double hash.

use sha2::{Digest, Sha256};

pub use sha2;

/// Hash data with SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice, the Bitcoin checksum hash
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}
