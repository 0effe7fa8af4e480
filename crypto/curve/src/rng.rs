//! Uniform random scalar sampling
//!
//! Rejection sampling over the raw 32-byte space: draw, keep only values
//! in (SCALAR_FLOOR, n), retry a bounded number of times. With a sound
//! entropy source the first draw succeeds essentially always; the retry
//! cap exists to surface a broken one instead of looping forever.

use zeroize::Zeroize;

use crate::errors::CurveError;
use crate::scalar::Scalar;

/// Lower bound on sampled scalars. Far below any cryptographic
/// threshold; filters pathologically small draws.
pub const SCALAR_FLOOR: u16 = 16_000;

/// Sampling attempts before giving up.
const MAX_ATTEMPTS: u32 = 32;

/// Draw a uniform random scalar in (SCALAR_FLOOR, n).
pub fn random_scalar() -> Result<Scalar, CurveError> {
    for _ in 0..MAX_ATTEMPTS {
        let mut bytes = [0u8; 32];
        getrandom::getrandom(&mut bytes).map_err(|e| CurveError::Rng(e.to_string()))?;

        let candidate = Scalar::from_bytes(&bytes);
        let in_range = above_floor(&bytes);
        bytes.zeroize();

        if let (Ok(scalar), true) = (candidate, in_range) {
            return Ok(scalar);
        }
    }
    Err(CurveError::RngExhausted(MAX_ATTEMPTS))
}

fn above_floor(bytes: &[u8; 32]) -> bool {
    bytes[..30].iter().any(|&b| b != 0)
        || u16::from_be_bytes([bytes[30], bytes[31]]) > SCALAR_FLOOR
}
