//! OBSCURA: Stealth Address Subsystem
//!
//! This is the root crate that re-exports all components for integration
//! testing and provides unified access to the protocol primitives.
//!
//! ## Architecture Overview
//!
//! A stealth address lets a recipient publish one long-term address while
//! every actual payment goes to a distinct one-time key derived via ECDH
//! over secp256k1. Observers cannot link payments to the published
//! address; only the holder of the scan secret can recognize payments,
//! and only the holder of the spend secret can spend them.
//!
//! ## Crate Organization
//!
//! - `obscura-curve`: secp256k1 scalar and point primitives
//! - `obscura-hash`: SHA-256 and the Base58-check double hash
//! - `obscura-wallet`: stealth protocol derivations and wire formats

pub use obscura_curve as curve;
pub use obscura_hash as hash;
pub use obscura_wallet as wallet;

/// Protocol version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use obscura_curve::{random_scalar, CurveError, Point, Scalar};
    pub use obscura_wallet::{
        create_payment, is_payment_for, is_stealth_address, shared_to_spend, stealth_scan,
        stealth_send, stealth_spend, AddressError, EphemeralOutput, SharedSecret, StealthAddress,
    };
}
