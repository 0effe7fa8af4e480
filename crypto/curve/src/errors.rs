//! Error types for curve operations

use thiserror::Error;

/// Errors from secp256k1 scalar and point operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("scalar is zero")]
    ZeroScalar,

    #[error("scalar not below the curve order")]
    ScalarOutOfRange,

    #[error("invalid compressed point encoding")]
    InvalidPoint,

    #[error("compressed point has wrong length: expected 33, got {0}")]
    InvalidPointLength(usize),

    #[error("curve operation produced the point at infinity")]
    PointAtInfinity,

    #[error("system rng failure: {0}")]
    Rng(String),

    #[error("random scalar sampling exhausted {0} attempts")]
    RngExhausted(u32),
}
