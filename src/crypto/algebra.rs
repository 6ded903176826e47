//! Homomorphic combination of keys.
//!
//! If Alice holds `a` with public key `A = aG` and Bob finds `b` with `B = bG`,
//! then `A + B` is the public key of `a + b` and `bA` is the public key of
//! `a * b`. Either party can therefore search for a partial key whose
//! combination with the other's public key has a wanted address, without
//! learning the other's private key.
//!
//! Scalar results use the convention `((x − 1) mod N) + 1`, which maps into
//! [1, N] rather than [0, N−1]. A result equal to N is not a usable private
//! key and is rejected wherever a key is derived from it.

use num_bigint::BigUint;
use num_traits::One;

use super::curve;
use super::keys::{PublicPoint, Scalar};
use crate::error::Result;

/// Reduces `x` into [1, N] via `((x − 1) mod N) + 1`; zero maps to N.
fn reduce_shifted(x: BigUint) -> Scalar {
    let n = curve::order();
    let one = BigUint::one();
    let reduced = if x < one {
        n.clone()
    } else {
        ((x - &one) % &n) + one
    };
    // Values in [1, N] always fit in 32 bytes.
    Scalar::from_big(&reduced).unwrap_or(Scalar::from_bytes(curve::CURVE_ORDER))
}

/// `((a + b − 1) mod N) + 1`
pub fn add_scalars(a: &Scalar, b: &Scalar) -> Scalar {
    reduce_shifted(a.to_big() + b.to_big())
}

/// `((a · b − 1) mod N) + 1`
pub fn multiply_scalars(a: &Scalar, b: &Scalar) -> Scalar {
    reduce_shifted(a.to_big() * b.to_big())
}

/// `P1 + P2`
#[inline]
pub fn add_public_points(p1: &PublicPoint, p2: &PublicPoint) -> Result<PublicPoint> {
    p1.add(p2)
}

/// `scalar · base`, for any base point rather than only G.
#[inline]
pub fn scalar_multiply_against_point(scalar: &Scalar, base: &PublicPoint) -> Result<PublicPoint> {
    base.multiply(scalar)
}

/// Adds two public keys given as 130 character hex strings.
pub fn add_public_keys_hex(one: &str, two: &str) -> Result<PublicPoint> {
    add_public_points(&PublicPoint::from_hex(one)?, &PublicPoint::from_hex(two)?)
}
