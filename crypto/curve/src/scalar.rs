//! secp256k1 scalars
//!
//! A [`Scalar`] is a 32-byte big-endian integer modulo the curve order n.
//! Constructors enforce `0 < s < n`, with one documented exception:
//! [`Scalar::reduce`] maps arbitrary 32-byte strings (hash output) into
//! the scalar field and may land on zero, which every downstream
//! operation rejects.

use std::fmt;

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::{Field, PrimeField};
use zeroize::Zeroize;

use crate::errors::CurveError;

/// Byte length of a serialized scalar
pub const SCALAR_LEN: usize = 32;

/// A scalar modulo the secp256k1 order, zeroized on drop
#[derive(Clone, PartialEq, Eq)]
pub struct Scalar {
    inner: k256::Scalar,
}

impl Scalar {
    /// Parse a 32-byte big-endian scalar, rejecting zero and values not
    /// below the curve order.
    pub fn from_bytes(bytes: &[u8; SCALAR_LEN]) -> Result<Self, CurveError> {
        let inner = Option::<k256::Scalar>::from(k256::Scalar::from_repr((*bytes).into()))
            .ok_or(CurveError::ScalarOutOfRange)?;
        if bool::from(inner.is_zero()) {
            return Err(CurveError::ZeroScalar);
        }
        Ok(Self { inner })
    }

    /// Interpret 32 bytes as a big-endian integer reduced modulo the
    /// curve order. Used to turn a SHA-256 digest into the shared-secret
    /// tweak; the result may be zero.
    pub fn reduce(bytes: &[u8; SCALAR_LEN]) -> Self {
        let inner = <k256::Scalar as Reduce<k256::U256>>::reduce_bytes(&(*bytes).into());
        Self { inner }
    }

    /// Big-endian, fixed-width serialization
    pub fn to_bytes(&self) -> [u8; SCALAR_LEN] {
        self.inner.to_bytes().into()
    }

    /// Compute (self + other) mod n. Fails when the sum is zero.
    pub fn add_mod_n(&self, other: &Scalar) -> Result<Self, CurveError> {
        let sum = self.inner + other.inner;
        if bool::from(sum.is_zero()) {
            return Err(CurveError::ZeroScalar);
        }
        Ok(Self { inner: sum })
    }

    pub(crate) fn raw(&self) -> &k256::Scalar {
        &self.inner
    }

    pub(crate) fn is_zero(&self) -> bool {
        bool::from(self.inner.is_zero())
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.inner = k256::Scalar::ZERO;
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar([REDACTED])")
    }
}
