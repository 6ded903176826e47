//! secp256k1 parameters and the point operations the rest of the crate builds on.
//!
//! Field and group arithmetic is delegated to the `secp256k1` crate; this
//! module only adapts its API to the crate's error type.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use secp256k1::{PublicKey, SecretKey, SECP256K1};

use crate::error::{Error, Result};

pub const CURVE_NAME: &str = "secp256k1";

/// Prime field modulus P.
pub const FIELD_MODULUS: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
];

/// Group order N.
pub const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

pub const GENERATOR_X: [u8; 32] = [
    0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B, 0x07,
    0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8, 0x17, 0x98,
];

pub const GENERATOR_Y: [u8; 32] = [
    0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08, 0xA8,
    0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10, 0xD4, 0xB8,
];

/// N as a big integer.
pub fn order() -> BigUint {
    BigUint::from_bytes_be(&CURVE_ORDER)
}

/// Accepts `bytes` as a private key if it lies in [1, N-1].
#[inline]
pub fn secret_key(bytes: &[u8; 32]) -> Result<SecretKey> {
    SecretKey::from_slice(bytes).map_err(|_| Error::InvalidScalar)
}

/// Draws a uniformly random private key; out of range candidates are rejected and redrawn.
#[inline]
pub fn random_secret_key<R: RngCore + CryptoRng>(rng: &mut R) -> SecretKey {
    SecretKey::new(rng)
}

/// `secret * G`
#[inline]
pub fn multiply_generator(secret: &SecretKey) -> PublicKey {
    PublicKey::from_secret_key(SECP256K1, secret)
}

/// `scalar * point` for an arbitrary base point.
pub fn multiply_point(point: &PublicKey, scalar: &[u8; 32]) -> Result<PublicKey> {
    let tweak = secp256k1::Scalar::from_be_bytes(*scalar).map_err(|_| Error::InvalidScalar)?;
    point
        .mul_tweak(SECP256K1, &tweak)
        .map_err(|_| Error::InvalidScalar)
}

/// `a + b`
pub fn add_points(a: &PublicKey, b: &PublicKey) -> Result<PublicKey> {
    a.combine(b)
        .map_err(|_| Error::InvalidPoint("sum is the point at infinity".into()))
}

/// Parses a 65 byte uncompressed or 33 byte compressed encoding, checking it lies on the curve.
pub fn parse_point(encoding: &[u8]) -> Result<PublicKey> {
    PublicKey::from_slice(encoding).map_err(|_| Error::InvalidPoint("not on curve".into()))
}

/// Returns true if (x, y) satisfies y² = x³ + 7 over the field.
pub fn is_on_curve(x: &[u8; 32], y: &[u8; 32]) -> bool {
    let mut encoding = [0u8; 65];
    encoding[0] = 0x04;
    encoding[1..33].copy_from_slice(x);
    encoding[33..].copy_from_slice(y);
    PublicKey::from_slice(&encoding).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_on_curve() {
        assert!(is_on_curve(&GENERATOR_X, &GENERATOR_Y));
        let mut y = GENERATOR_Y;
        y[31] ^= 1;
        assert!(!is_on_curve(&GENERATOR_X, &y));
    }

    #[test]
    fn test_one_times_generator() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let point = multiply_generator(&secret_key(&one).unwrap());
        let encoded = point.serialize_uncompressed();
        assert_eq!(&encoded[1..33], &GENERATOR_X);
        assert_eq!(&encoded[33..], &GENERATOR_Y);
    }

    #[test]
    fn test_scalar_range() {
        assert_eq!(secret_key(&[0u8; 32]), Err(Error::InvalidScalar));
        assert_eq!(secret_key(&CURVE_ORDER), Err(Error::InvalidScalar));
        let mut below = CURVE_ORDER;
        below[31] -= 1;
        assert!(secret_key(&below).is_ok());
    }

    #[test]
    fn test_add_inverse_points_fails() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let g = multiply_generator(&secret_key(&one).unwrap());
        let minus_g = g.negate(SECP256K1);
        assert!(matches!(add_points(&g, &minus_g), Err(Error::InvalidPoint(_))));
    }
}
