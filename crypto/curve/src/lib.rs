//! OBSCURA secp256k1 Primitives
//!
//! Thin typed wrappers over the k256 arithmetic backend, exposing exactly
//! the operations the stealth protocol needs:
//!
//! - scalar-times-base and point-times-scalar multiplication
//! - point addition and scalar addition modulo the curve order
//! - 33-byte compressed SEC1 point encoding
//! - rejection-sampled uniform random scalars
//!
//! Scalars frequently carry secret key material: they overwrite their
//! backing memory on drop and never print their value through `Debug`.
//! The point at infinity has no serialization and is rejected wherever a
//! curve operation could produce it.

pub mod errors;
pub mod point;
pub mod rng;
pub mod scalar;

pub use errors::CurveError;
pub use point::{Point, COMPRESSED_POINT_LEN};
pub use rng::{random_scalar, SCALAR_FLOOR};
pub use scalar::{Scalar, SCALAR_LEN};
