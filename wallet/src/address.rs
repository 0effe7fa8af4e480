//! Stealth address records and their wire formats
//!
//! A stealth address publishes a scan pubkey and a spend pubkey in a
//! single Base58-check string; the owning wallet keeps the matching
//! secret scalars alongside. Two wire formats exist:
//!
//! - the published address (version 0x28) carrying only public keys
//! - the secret export (version 0x2b) carrying both keypairs in full
//!
//! # Published address layout
//! ```text
//! [version=0x28] [options] [scan pubkey: 33]
//! [spend key count=1] [spend pubkey: 33]
//! [signature count=0] [prefix length=0] [checksum: 4]
//! ```
//!
//! The spend-key count, signature count, and prefix length are reserved
//! for multi-spend-key and prefix-filter extensions; only the baseline
//! profile shown above is emitted, and bytes past it are ignored on
//! decode.

use obscura_curve::{random_scalar, CurveError, Point, Scalar, COMPRESSED_POINT_LEN, SCALAR_LEN};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

use crate::encoding::{
    append_checksum, decode_base58check, encode_base58check, EncodingError, CHECKSUM_LEN,
};

/// Version byte of the published address format
pub const STEALTH_ADDRESS_VERSION: u8 = 0x28;

/// Version byte of the secret export format
pub const STEALTH_SECRET_VERSION: u8 = 0x2b;

/// Minimum raw length of a published address, checksum included
const MIN_ADDRESS_RAW_LEN: usize =
    1 + 1 + COMPRESSED_POINT_LEN + 1 + COMPRESSED_POINT_LEN + 1 + 1 + CHECKSUM_LEN;

/// Minimum raw length of a secret export, checksum included
const MIN_EXPORT_RAW_LEN: usize =
    1 + COMPRESSED_POINT_LEN + SCALAR_LEN + COMPRESSED_POINT_LEN + SCALAR_LEN + CHECKSUM_LEN;

/// Stealth address errors
#[derive(Debug, Error)]
pub enum AddressError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("record too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("version mismatch: expected 0x{expected:02x}, got 0x{actual:02x}")]
    VersionMismatch { expected: u8, actual: u8 },

    #[error("curve operation failed: {0}")]
    Curve(#[from] CurveError),

    #[error("address holds no secret keys to export")]
    MissingSecrets,

    #[error("imported secret does not match its public key")]
    SecretMismatch,
}

/// A published stealth address with optionally-held secret halves.
///
/// `scan_pubkey = scan_secret·G` and `spend_pubkey = spend_secret·G`
/// whenever both halves are present. The label is wallet-local and never
/// enters the wire encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StealthAddress {
    /// Reserved options byte, 0 in the baseline profile
    pub options: u8,
    /// Q = d·G, identifies incoming payments
    pub scan_pubkey: Point,
    /// R = f·G, spends incoming payments
    pub spend_pubkey: Point,
    /// d, held only by the owning wallet
    #[serde(skip)]
    pub scan_secret: Option<Scalar>,
    /// f, held only by the owning wallet
    #[serde(skip)]
    pub spend_secret: Option<Scalar>,
    /// Human-readable label
    pub label: String,
}

impl StealthAddress {
    /// Generate a fresh address: two random scalars and their pubkeys.
    pub fn generate(label: impl Into<String>) -> Result<Self, AddressError> {
        let scan_secret = random_scalar()?;
        let spend_secret = random_scalar()?;
        let scan_pubkey = Point::mul_base(&scan_secret)?;
        let spend_pubkey = Point::mul_base(&spend_secret)?;

        Ok(Self {
            options: 0,
            scan_pubkey,
            spend_pubkey,
            scan_secret: Some(scan_secret),
            spend_secret: Some(spend_secret),
            label: label.into(),
        })
    }

    /// Encode the published form.
    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(MIN_ADDRESS_RAW_LEN);
        raw.push(STEALTH_ADDRESS_VERSION);
        raw.push(self.options);
        raw.extend_from_slice(&self.scan_pubkey.to_bytes());
        raw.push(1); // spend pubkey count
        raw.extend_from_slice(&self.spend_pubkey.to_bytes());
        raw.push(0); // signature count
        raw.push(0); // prefix length
        encode_base58check(&raw)
    }

    /// Decode a published address. Both points are validated on-curve;
    /// secrets come back empty and the label blank.
    pub fn decode(encoded: &str) -> Result<Self, AddressError> {
        let body = decode_base58check(encoded).map_err(|e| {
            debug!(error = %e, "stealth address decode failed");
            e
        })?;
        if body.len() + CHECKSUM_LEN < MIN_ADDRESS_RAW_LEN {
            debug!(len = body.len() + CHECKSUM_LEN, "stealth address too short");
            return Err(AddressError::TooShort {
                expected: MIN_ADDRESS_RAW_LEN,
                actual: body.len() + CHECKSUM_LEN,
            });
        }
        if body[0] != STEALTH_ADDRESS_VERSION {
            debug!(version = body[0], "stealth address version mismatch");
            return Err(AddressError::VersionMismatch {
                expected: STEALTH_ADDRESS_VERSION,
                actual: body[0],
            });
        }

        const SCAN: usize = 2;
        const SPEND: usize = SCAN + COMPRESSED_POINT_LEN + 1;

        let options = body[1];
        let scan_pubkey = Point::from_bytes(&body[SCAN..SCAN + COMPRESSED_POINT_LEN])?;
        // body[SCAN + 33] is the spend-key count, unchecked like the rest
        // of the reserved fields
        let spend_pubkey = Point::from_bytes(&body[SPEND..SPEND + COMPRESSED_POINT_LEN])?;

        Ok(Self {
            options,
            scan_pubkey,
            spend_pubkey,
            scan_secret: None,
            spend_secret: None,
            label: String::new(),
        })
    }

    /// Encode the full-secret backup form.
    pub fn export_secrets(&self) -> Result<String, AddressError> {
        let (scan_secret, spend_secret) = match (&self.scan_secret, &self.spend_secret) {
            (Some(d), Some(f)) => (d, f),
            _ => return Err(AddressError::MissingSecrets),
        };

        let mut raw = Vec::with_capacity(MIN_EXPORT_RAW_LEN);
        raw.push(STEALTH_SECRET_VERSION);
        raw.extend_from_slice(&self.scan_pubkey.to_bytes());
        raw.extend_from_slice(&scan_secret.to_bytes());
        raw.extend_from_slice(&self.spend_pubkey.to_bytes());
        raw.extend_from_slice(&spend_secret.to_bytes());
        append_checksum(&mut raw);

        let encoded = bs58::encode(&raw).into_string();
        raw.zeroize();
        Ok(encoded)
    }

    /// Import a secret backup. `options` is reset to 0 and both secret
    /// halves are checked against their public keys.
    pub fn import_secrets(encoded: &str) -> Result<Self, AddressError> {
        let mut body = decode_base58check(encoded).map_err(|e| {
            debug!(error = %e, "stealth secret import decode failed");
            e
        })?;
        let parsed = Self::parse_secret_body(&body);
        body.zeroize();
        parsed
    }

    fn parse_secret_body(body: &[u8]) -> Result<Self, AddressError> {
        if body.len() + CHECKSUM_LEN < MIN_EXPORT_RAW_LEN {
            debug!(
                len = body.len() + CHECKSUM_LEN,
                "stealth secret import too short"
            );
            return Err(AddressError::TooShort {
                expected: MIN_EXPORT_RAW_LEN,
                actual: body.len() + CHECKSUM_LEN,
            });
        }
        if body[0] != STEALTH_SECRET_VERSION {
            debug!(version = body[0], "stealth secret import version mismatch");
            return Err(AddressError::VersionMismatch {
                expected: STEALTH_SECRET_VERSION,
                actual: body[0],
            });
        }

        const SCAN_PUB: usize = 1;
        const SCAN_SEC: usize = SCAN_PUB + COMPRESSED_POINT_LEN;
        const SPEND_PUB: usize = SCAN_SEC + SCALAR_LEN;
        const SPEND_SEC: usize = SPEND_PUB + COMPRESSED_POINT_LEN;

        let scan_pubkey = Point::from_bytes(&body[SCAN_PUB..SCAN_PUB + COMPRESSED_POINT_LEN])?;
        let scan_secret = scalar_at(body, SCAN_SEC)?;
        let spend_pubkey = Point::from_bytes(&body[SPEND_PUB..SPEND_PUB + COMPRESSED_POINT_LEN])?;
        let spend_secret = scalar_at(body, SPEND_SEC)?;

        if Point::mul_base(&scan_secret)? != scan_pubkey
            || Point::mul_base(&spend_secret)? != spend_pubkey
        {
            return Err(AddressError::SecretMismatch);
        }

        Ok(Self {
            options: 0,
            scan_pubkey,
            spend_pubkey,
            scan_secret: Some(scan_secret),
            spend_secret: Some(spend_secret),
            label: String::new(),
        })
    }
}

/// Cheap prefilter: does `encoded` look like a published stealth
/// address? Checks Base58, checksum, length, and version only; point
/// encodings are not validated.
pub fn is_stealth_address(encoded: &str) -> bool {
    match decode_base58check(encoded) {
        Ok(body) => {
            body.len() + CHECKSUM_LEN >= MIN_ADDRESS_RAW_LEN && body[0] == STEALTH_ADDRESS_VERSION
        }
        Err(_) => false,
    }
}

fn scalar_at(body: &[u8], offset: usize) -> Result<Scalar, AddressError> {
    let mut bytes = [0u8; SCALAR_LEN];
    bytes.copy_from_slice(&body[offset..offset + SCALAR_LEN]);
    let scalar = Scalar::from_bytes(&bytes);
    bytes.zeroize();
    Ok(scalar?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_addresses_are_consistent() {
        let addr = StealthAddress::generate("test").unwrap();
        assert_eq!(addr.options, 0);
        assert_eq!(addr.label, "test");
        assert_eq!(
            Point::mul_base(addr.scan_secret.as_ref().unwrap()).unwrap(),
            addr.scan_pubkey
        );
        assert_eq!(
            Point::mul_base(addr.spend_secret.as_ref().unwrap()).unwrap(),
            addr.spend_pubkey
        );
    }

    #[test]
    fn published_form_roundtrips() {
        let addr = StealthAddress::generate("test").unwrap();
        let decoded = StealthAddress::decode(&addr.encode()).unwrap();

        assert_eq!(decoded.options, addr.options);
        assert_eq!(decoded.scan_pubkey, addr.scan_pubkey);
        assert_eq!(decoded.spend_pubkey, addr.spend_pubkey);
        assert!(decoded.scan_secret.is_none());
        assert!(decoded.spend_secret.is_none());
    }

    #[test]
    fn decode_rejects_wrong_version() {
        let addr = StealthAddress::generate("test").unwrap();
        let mut raw = vec![STEALTH_SECRET_VERSION, 0];
        raw.extend_from_slice(&addr.scan_pubkey.to_bytes());
        raw.push(1);
        raw.extend_from_slice(&addr.spend_pubkey.to_bytes());
        raw.push(0);
        raw.push(0);

        let encoded = encode_base58check(&raw);
        assert!(matches!(
            StealthAddress::decode(&encoded),
            Err(AddressError::VersionMismatch { .. })
        ));
        assert!(!is_stealth_address(&encoded));
    }

    #[test]
    fn decode_rejects_truncated_records() {
        let encoded = encode_base58check(&[STEALTH_ADDRESS_VERSION, 0, 1, 2, 3]);
        assert!(matches!(
            StealthAddress::decode(&encoded),
            Err(AddressError::TooShort { .. })
        ));
        assert!(!is_stealth_address(&encoded));
    }

    #[test]
    fn decode_rejects_off_curve_points() {
        let mut raw = vec![STEALTH_ADDRESS_VERSION, 0];
        raw.extend_from_slice(&[0xff; COMPRESSED_POINT_LEN]);
        raw.push(1);
        raw.extend_from_slice(&[0xff; COMPRESSED_POINT_LEN]);
        raw.push(0);
        raw.push(0);

        let encoded = encode_base58check(&raw);
        assert!(matches!(
            StealthAddress::decode(&encoded),
            Err(AddressError::Curve(_))
        ));
        // the prefilter only checks the envelope
        assert!(is_stealth_address(&encoded));
    }

    #[test]
    fn decode_ignores_reserved_trailing_bytes() {
        let addr = StealthAddress::generate("test").unwrap();
        let mut raw = vec![STEALTH_ADDRESS_VERSION, 0];
        raw.extend_from_slice(&addr.scan_pubkey.to_bytes());
        raw.push(1);
        raw.extend_from_slice(&addr.spend_pubkey.to_bytes());
        raw.push(0);
        raw.push(0);
        raw.extend_from_slice(&[0xaa; 8]); // reserved extension data

        let decoded = StealthAddress::decode(&encode_base58check(&raw)).unwrap();
        assert_eq!(decoded.scan_pubkey, addr.scan_pubkey);
        assert_eq!(decoded.spend_pubkey, addr.spend_pubkey);
    }

    #[test]
    fn secret_export_roundtrips() {
        let addr = StealthAddress::generate("backup").unwrap();
        let imported = StealthAddress::import_secrets(&addr.export_secrets().unwrap()).unwrap();

        assert_eq!(imported.options, 0);
        assert_eq!(imported.scan_pubkey, addr.scan_pubkey);
        assert_eq!(imported.spend_pubkey, addr.spend_pubkey);
        assert_eq!(imported.scan_secret, addr.scan_secret);
        assert_eq!(imported.spend_secret, addr.spend_secret);
    }

    #[test]
    fn export_requires_secrets() {
        let addr = StealthAddress::generate("test").unwrap();
        let watch_only = StealthAddress::decode(&addr.encode()).unwrap();
        assert!(matches!(
            watch_only.export_secrets(),
            Err(AddressError::MissingSecrets)
        ));
    }

    #[test]
    fn import_rejects_mismatched_secrets() {
        let addr = StealthAddress::generate("test").unwrap();
        let other = StealthAddress::generate("other").unwrap();

        let mut raw = vec![STEALTH_SECRET_VERSION];
        raw.extend_from_slice(&addr.scan_pubkey.to_bytes());
        raw.extend_from_slice(&other.scan_secret.as_ref().unwrap().to_bytes());
        raw.extend_from_slice(&addr.spend_pubkey.to_bytes());
        raw.extend_from_slice(&addr.spend_secret.as_ref().unwrap().to_bytes());

        assert!(matches!(
            StealthAddress::import_secrets(&encode_base58check(&raw)),
            Err(AddressError::SecretMismatch)
        ));
    }

    #[test]
    fn import_rejects_published_addresses() {
        let addr = StealthAddress::generate("test").unwrap();
        assert!(matches!(
            StealthAddress::import_secrets(&addr.encode()),
            Err(AddressError::TooShort { .. })
        ));
    }

    #[test]
    fn prefilter_accepts_published_addresses() {
        let addr = StealthAddress::generate("test").unwrap();
        assert!(is_stealth_address(&addr.encode()));
        assert!(!is_stealth_address("not an address"));
        assert!(!is_stealth_address(""));
    }
}
