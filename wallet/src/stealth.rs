//! Stealth payment derivations
//!
//! Dual-key stealth address protocol over secp256k1. The recipient
//! publishes a scan keypair (d, Q = d·G) and a spend keypair
//! (f, R = f·G); each payment goes to a distinct one-time key:
//!
//! 1. Sender samples an ephemeral secret e and publishes P = e·G
//! 2. Both sides derive c = H(e·Q) = H(d·P) over the compressed point
//! 3. The payment destination is R' = R + c·G
//! 4. Only the recipient can form its private key k = (f + c) mod n
//!
//! The scan secret d alone identifies payments; spending requires f.
//! All operations are pure and stateless; cryptographic failures
//! (infinity, zero scalars) abort the operation with no retry.

use std::fmt;

use obscura_curve::{random_scalar, CurveError, Point, Scalar};
use obscura_hash::sha256;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::address::StealthAddress;

/// ECDH-derived tweak shared between sender and receiver.
///
/// c = H(compressed(e·Q)) = H(compressed(d·P)), interpreted as a scalar.
/// Zeroized on drop; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret {
    tweak: Scalar,
}

impl SharedSecret {
    /// Rebuild a cached shared secret from its serialized form.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        Ok(Self {
            tweak: Scalar::from_bytes(bytes)?,
        })
    }

    /// The tweak as a scalar
    pub fn as_scalar(&self) -> &Scalar {
        &self.tweak
    }

    /// Big-endian serialization (use with caution)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.tweak.to_bytes()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret([REDACTED])")
    }
}

/// Per-payment record the sender publishes with the transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralOutput {
    /// P = e·G, the metadata receivers scan against
    pub ephem_pubkey: Point,
    /// R' = R + c·G, the payment destination observers see
    pub one_time_pubkey: Point,
}

/// S = secret·point, c = H(compressed(S)) mod n.
///
/// Send and scan are the same derivation with the roles swapped: the
/// sender passes (e, Q), the receiver passes (d, P).
fn derive_tweak(secret: &Scalar, point: &Point) -> Result<Scalar, CurveError> {
    let shared_point = point.mul(secret)?;
    let mut digest = sha256(&shared_point.to_bytes());
    let tweak = Scalar::reduce(&digest);
    digest.zeroize();
    Ok(tweak)
}

/// Sender-side derivation: from an ephemeral secret and the recipient's
/// published keys, produce the shared secret and the one-time payment
/// key R'. The caller publishes e·G alongside the payment and may
/// discard the shared secret; the receiver reconstructs it.
pub fn stealth_send(
    ephem_secret: &Scalar,
    scan_pubkey: &Point,
    spend_pubkey: &Point,
) -> Result<(SharedSecret, Point), CurveError> {
    let tweak = derive_tweak(ephem_secret, scan_pubkey)?;
    let one_time_pubkey = spend_pubkey.add(&Point::mul_base(&tweak)?)?;
    Ok((SharedSecret { tweak }, one_time_pubkey))
}

/// Receiver-side scan: recompute the candidate one-time key for an
/// observed ephemeral pubkey. A payment belongs to this wallet when the
/// result matches the output's payment target.
pub fn stealth_scan(
    scan_secret: &Scalar,
    ephem_pubkey: &Point,
    spend_pubkey: &Point,
) -> Result<Point, CurveError> {
    let tweak = derive_tweak(scan_secret, ephem_pubkey)?;
    spend_pubkey.add(&Point::mul_base(&tweak)?)
}

/// Receiver-side spend-key derivation: k = (f + c) mod n, the private
/// key authorizing a spend of the one-time output. Fails when k is zero.
pub fn stealth_spend(
    scan_secret: &Scalar,
    ephem_pubkey: &Point,
    spend_secret: &Scalar,
) -> Result<Scalar, CurveError> {
    let tweak = derive_tweak(scan_secret, ephem_pubkey)?;
    spend_secret.add_mod_n(&tweak)
}

/// Fast path when the scanner already holds the shared secret: skip the
/// ECDH step and form k = (f + c) mod n directly.
pub fn shared_to_spend(
    shared: &SharedSecret,
    spend_secret: &Scalar,
) -> Result<Scalar, CurveError> {
    spend_secret.add_mod_n(shared.as_scalar())
}

/// Build a payment to `recipient`: sample a fresh ephemeral secret,
/// derive the one-time destination, and return the on-chain record
/// together with the sender's copy of the shared secret. The ephemeral
/// secret does not outlive the call.
pub fn create_payment(
    recipient: &StealthAddress,
) -> Result<(EphemeralOutput, SharedSecret), CurveError> {
    let ephem_secret = random_scalar()?;
    let (shared, one_time_pubkey) =
        stealth_send(&ephem_secret, &recipient.scan_pubkey, &recipient.spend_pubkey)?;
    let ephem_pubkey = Point::mul_base(&ephem_secret)?;
    Ok((
        EphemeralOutput {
            ephem_pubkey,
            one_time_pubkey,
        },
        shared,
    ))
}

/// Scan predicate: is `output` addressed to the wallet holding
/// `scan_secret`?
pub fn is_payment_for(
    scan_secret: &Scalar,
    spend_pubkey: &Point,
    output: &EphemeralOutput,
) -> Result<bool, CurveError> {
    let candidate = stealth_scan(scan_secret, &output.ephem_pubkey, spend_pubkey)?;
    Ok(candidate == output.one_time_pubkey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair() -> (Scalar, Point) {
        let secret = random_scalar().unwrap();
        let pubkey = Point::mul_base(&secret).unwrap();
        (secret, pubkey)
    }

    #[test]
    fn sender_and_receiver_agree_on_the_one_time_key() {
        let (scan_secret, scan_pubkey) = keypair();
        let (_, spend_pubkey) = keypair();
        let (ephem_secret, ephem_pubkey) = keypair();

        let (_, one_time) = stealth_send(&ephem_secret, &scan_pubkey, &spend_pubkey).unwrap();
        let candidate = stealth_scan(&scan_secret, &ephem_pubkey, &spend_pubkey).unwrap();

        assert_eq!(one_time, candidate);
    }

    #[test]
    fn spend_key_opens_the_one_time_output() {
        let (scan_secret, scan_pubkey) = keypair();
        let (spend_secret, spend_pubkey) = keypair();
        let (ephem_secret, ephem_pubkey) = keypair();

        let (_, one_time) = stealth_send(&ephem_secret, &scan_pubkey, &spend_pubkey).unwrap();
        let spend_key = stealth_spend(&scan_secret, &ephem_pubkey, &spend_secret).unwrap();

        assert_eq!(Point::mul_base(&spend_key).unwrap(), one_time);
    }

    #[test]
    fn cached_shared_secret_yields_the_same_spend_key() {
        let (scan_secret, scan_pubkey) = keypair();
        let (spend_secret, spend_pubkey) = keypair();
        let (ephem_secret, ephem_pubkey) = keypair();

        let (shared, _) = stealth_send(&ephem_secret, &scan_pubkey, &spend_pubkey).unwrap();
        let fast = shared_to_spend(&shared, &spend_secret).unwrap();
        let full = stealth_spend(&scan_secret, &ephem_pubkey, &spend_secret).unwrap();

        assert_eq!(fast.to_bytes(), full.to_bytes());
    }

    #[test]
    fn payments_reach_only_their_recipient() {
        let recipient = StealthAddress::generate("alice").unwrap();
        let stranger = StealthAddress::generate("mallory").unwrap();

        let (output, _) = create_payment(&recipient).unwrap();

        let recipient_scan = recipient.scan_secret.as_ref().unwrap();
        assert!(is_payment_for(recipient_scan, &recipient.spend_pubkey, &output).unwrap());

        let stranger_scan = stranger.scan_secret.as_ref().unwrap();
        assert!(!is_payment_for(stranger_scan, &stranger.spend_pubkey, &output).unwrap());
    }

    #[test]
    fn each_payment_is_unlinkable() {
        let recipient = StealthAddress::generate("alice").unwrap();

        let (first, _) = create_payment(&recipient).unwrap();
        let (second, _) = create_payment(&recipient).unwrap();

        assert_ne!(first.ephem_pubkey, second.ephem_pubkey);
        assert_ne!(first.one_time_pubkey, second.one_time_pubkey);
    }

    #[test]
    fn shared_secret_roundtrips_bytes() {
        let recipient = StealthAddress::generate("alice").unwrap();
        let (_, shared) = create_payment(&recipient).unwrap();

        let restored = SharedSecret::from_bytes(&shared.to_bytes()).unwrap();
        assert_eq!(shared, restored);
    }

    #[test]
    fn shared_secret_debug_is_redacted() {
        let recipient = StealthAddress::generate("alice").unwrap();
        let (_, shared) = create_payment(&recipient).unwrap();
        assert_eq!(format!("{:?}", shared), "SharedSecret([REDACTED])");
    }
}
