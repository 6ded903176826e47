//! Private scalars and public points.

use std::fmt;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use secp256k1::{PublicKey, SecretKey};

use super::bytes::{big_to_fixed, bytes_to_hex, hex_to_bytes, left_pad};
use super::curve;
use crate::error::{Error, Result};

/// A private key as 32 big-endian bytes.
///
/// Any 256-bit value can be held; [`Scalar::is_valid`] tells whether it is a
/// usable key in [1, N-1]. Results of the key algebra may equal N.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scalar([u8; 32]);

impl Scalar {
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds a scalar from up to 32 big-endian bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        left_pad(bytes).map(Self)
    }

    /// Parses up to 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&hex_to_bytes(s)?)
    }

    pub fn from_big(n: &BigUint) -> Result<Self> {
        big_to_fixed(n).map(Self)
    }

    /// Draws a fresh key in [1, N-1].
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(curve::random_secret_key(rng).secret_bytes())
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_big(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Uppercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Returns true if the scalar lies in [1, N-1].
    pub fn is_valid(&self) -> bool {
        self.to_secret_key().is_ok()
    }

    pub fn to_secret_key(&self) -> Result<SecretKey> {
        curve::secret_key(&self.0)
    }
}

impl From<SecretKey> for Scalar {
    fn from(secret: SecretKey) -> Self {
        Self(secret.secret_bytes())
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self.to_hex())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A point on the curve other than infinity.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicPoint(PublicKey);

impl PublicPoint {
    /// `scalar * G`
    pub fn from_scalar(scalar: &Scalar) -> Result<Self> {
        Ok(Self::from_secret_key(&scalar.to_secret_key()?))
    }

    #[inline]
    pub(crate) fn from_secret_key(secret: &SecretKey) -> Self {
        Self(curve::multiply_generator(secret))
    }

    /// Accepts coordinates only if they lie on the curve.
    pub fn from_coordinates(x: &[u8; 32], y: &[u8; 32]) -> Result<Self> {
        let mut encoding = [0u8; 65];
        encoding[0] = 0x04;
        encoding[1..33].copy_from_slice(x);
        encoding[33..].copy_from_slice(y);
        Self::from_slice(&encoding)
    }

    /// Parses a 65 byte uncompressed or 33 byte compressed encoding.
    pub fn from_slice(encoding: &[u8]) -> Result<Self> {
        match (encoding.len(), encoding.first()) {
            (65, Some(0x04)) | (33, Some(0x02 | 0x03)) => curve::parse_point(encoding).map(Self),
            (65 | 33, _) => Err(Error::InvalidPoint("bad prefix byte".into())),
            (len, _) => Err(Error::InvalidPoint(format!("bad length {}", len))),
        }
    }

    /// Parses a 130 character hex string of the form `04‖X‖Y`.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 130 {
            return Err(Error::InvalidPoint(format!(
                "expected 130 hex characters, got {}",
                s.len()
            )));
        }
        if !s.starts_with("04") {
            return Err(Error::InvalidPoint("expected 04 prefix".into()));
        }
        let bytes = hex_to_bytes(s).map_err(|_| Error::InvalidPoint("not hex".into()))?;
        Self::from_slice(&bytes)
    }

    pub fn x(&self) -> [u8; 32] {
        let mut x = [0u8; 32];
        x.copy_from_slice(&self.uncompressed()[1..33]);
        x
    }

    pub fn y(&self) -> [u8; 32] {
        let mut y = [0u8; 32];
        y.copy_from_slice(&self.uncompressed()[33..]);
        y
    }

    /// `0x04 ‖ X ‖ Y`
    #[inline]
    pub fn uncompressed(&self) -> [u8; 65] {
        self.0.serialize_uncompressed()
    }

    /// `(0x02|0x03) ‖ X`, prefix chosen by the parity of Y.
    #[inline]
    pub fn compressed(&self) -> [u8; 33] {
        compress(&self.uncompressed())
    }

    /// Point addition.
    pub fn add(&self, other: &PublicPoint) -> Result<Self> {
        curve::add_points(&self.0, &other.0).map(Self)
    }

    /// `scalar * self`
    pub fn multiply(&self, scalar: &Scalar) -> Result<Self> {
        curve::multiply_point(&self.0, scalar.as_bytes()).map(Self)
    }

    /// Uppercase hex of the uncompressed encoding.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.uncompressed())
    }
}

impl fmt::Debug for PublicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicPoint({})", self.to_hex())
    }
}

/// Drops Y from an uncompressed encoding, keeping only its parity in the prefix.
pub fn compress(uncompressed: &[u8; 65]) -> [u8; 33] {
    let mut out = [0u8; 33];
    out[0] = if uncompressed[64] & 1 == 0 { 0x02 } else { 0x03 };
    out[1..].copy_from_slice(&uncompressed[1..33]);
    out
}

/// Returns true for a 130 character `04` prefixed hex key that lies on the curve.
pub fn is_public_key_valid(s: &str) -> bool {
    PublicPoint::from_hex(s).is_ok()
}
