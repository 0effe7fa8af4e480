//! secp256k1 group elements
//!
//! Points serialize exclusively in 33-byte compressed SEC1 form, so every
//! hashing input built from points is length-unambiguous. The point at
//! infinity has no serialization and every operation that could produce
//! it fails instead.

use std::fmt;

use k256::elliptic_curve::generic_array::GenericArray;
use k256::elliptic_curve::group::{Group, GroupEncoding};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, ProjectivePoint};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CurveError;
use crate::scalar::Scalar;

/// Byte length of a compressed SEC1 point
pub const COMPRESSED_POINT_LEN: usize = 33;

/// A secp256k1 group element, never the point at infinity
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Point {
    inner: ProjectivePoint,
}

impl Point {
    /// Compute s·G. Fails when s is zero.
    pub fn mul_base(scalar: &Scalar) -> Result<Self, CurveError> {
        if scalar.is_zero() {
            return Err(CurveError::ZeroScalar);
        }
        Ok(Self {
            inner: ProjectivePoint::GENERATOR * scalar.raw(),
        })
    }

    /// Compute s·P. Fails when the result is the point at infinity.
    pub fn mul(&self, scalar: &Scalar) -> Result<Self, CurveError> {
        let product = self.inner * scalar.raw();
        if bool::from(product.is_identity()) {
            return Err(CurveError::PointAtInfinity);
        }
        Ok(Self { inner: product })
    }

    /// Compute P+Q. Fails when the result is the point at infinity.
    pub fn add(&self, other: &Point) -> Result<Self, CurveError> {
        let sum = self.inner + other.inner;
        if bool::from(sum.is_identity()) {
            return Err(CurveError::PointAtInfinity);
        }
        Ok(Self { inner: sum })
    }

    /// Compressed SEC1 encoding: parity byte plus the X coordinate.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_POINT_LEN] {
        let encoded = self.inner.to_affine().to_encoded_point(true);
        let mut bytes = [0u8; COMPRESSED_POINT_LEN];
        bytes.copy_from_slice(encoded.as_bytes());
        bytes
    }

    /// Decode a 33-byte compressed SEC1 point. Fails on wrong length or
    /// an encoding that is not on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != COMPRESSED_POINT_LEN {
            return Err(CurveError::InvalidPointLength(bytes.len()));
        }
        let affine =
            Option::<AffinePoint>::from(AffinePoint::from_bytes(GenericArray::from_slice(bytes)))
                .ok_or(CurveError::InvalidPoint)?;
        Ok(Self {
            inner: ProjectivePoint::from(affine),
        })
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point(")?;
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().to_vec().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Point::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
