//! OBSCURA Wallet Primitives
//!
//! Stealth address support for Bitcoin-family chains:
//! - Published address and secret-backup wire formats (Base58-check)
//! - Sender-side one-time key derivation
//! - Receiver-side scanning and spend-key derivation
//!
//! Wallet storage, transaction construction, and the chain-scanning loop
//! are external collaborators that call into these primitives.

pub mod address;
pub mod encoding;
pub mod stealth;

pub use address::{
    is_stealth_address, AddressError, StealthAddress, STEALTH_ADDRESS_VERSION,
    STEALTH_SECRET_VERSION,
};
pub use encoding::{
    append_checksum, decode_base58check, encode_base58check, verify_checksum, EncodingError,
    CHECKSUM_LEN,
};
pub use stealth::{
    create_payment, is_payment_for, shared_to_spend, stealth_scan, stealth_send, stealth_spend,
    EphemeralOutput, SharedSecret,
};
