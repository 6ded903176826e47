//! Versioned, checksummed addresses.

use std::fmt;

use super::base58::{self, Alphabet};
use super::hash::{checksum, hash160};
use crate::error::{Error, Result};

/// Length of `version ‖ Hash160 ‖ checksum4`.
pub const PAYLOAD_LEN: usize = 25;

/// `version ‖ Hash160 ‖ checksum4`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionedPayload([u8; PAYLOAD_LEN]);

impl VersionedPayload {
    /// Builds the payload and computes its checksum.
    pub fn new(version: u8, hash160: &[u8; 20]) -> Self {
        let mut bytes = [0u8; PAYLOAD_LEN];
        bytes[0] = version;
        bytes[1..21].copy_from_slice(hash160);
        let sum = checksum(&bytes[..21]);
        bytes[21..].copy_from_slice(&sum);
        Self(bytes)
    }

    /// Hash160 of a public key encoding, wrapped with `version`.
    pub fn from_public_key(version: u8, public_key: &[u8]) -> Self {
        Self::new(version, &hash160(public_key))
    }

    /// Wraps 25 raw bytes without checking the checksum.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; PAYLOAD_LEN] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: PAYLOAD_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(bytes))
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.0[0]
    }

    pub fn hash160(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.0[1..21]);
        out
    }

    /// The checksum predicate: bytes 22-25 equal the checksum of bytes 1-21.
    pub fn is_checksum_valid(&self) -> bool {
        checksum(&self.0[..21]) == self.0[21..]
    }

    pub fn to_address(&self) -> Address {
        Address(base58::bytes_to_base58(&self.0))
    }
}

impl fmt::Debug for VersionedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionedPayload({})", hex::encode(self.0))
    }
}

/// Base58Check text of a [`VersionedPayload`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Derives the address of a public key encoding (compressed or uncompressed).
    pub fn from_public_key(version: u8, public_key: &[u8]) -> Self {
        VersionedPayload::from_public_key(version, public_key).to_address()
    }

    /// Wraps an address string without validating it.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes back to the 25 byte payload.
    pub fn payload(&self) -> Result<VersionedPayload> {
        VersionedPayload::from_slice(&base58::base58_to_bytes(&self.0)?)
    }

    /// The same digits spelled in the Ripple alphabet.
    pub fn to_ripple(&self) -> Result<String> {
        base58::to_ripple(&self.0)
    }

    /// Returns true if the address starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Hash160 → VersionedPayload → Base58Check.
#[inline]
pub fn derive_address(version: u8, public_key: &[u8]) -> Address {
    Address::from_public_key(version, public_key)
}

/// Checks the checksum of `address` and, when given, its version byte.
///
/// Malformed input (bad characters, wrong decoded length) is reported as `false`.
pub fn validate_address(address: &str, expected_version: Option<u8>) -> bool {
    let Ok(payload) = Address::new(address).payload() else {
        return false;
    };
    if let Some(version) = expected_version {
        if payload.version() != version {
            return false;
        }
    }
    payload.is_checksum_valid()
}

/// Checks an address written in the Ripple alphabet.
pub fn validate_ripple_address(address: &str) -> bool {
    match base58::from_ripple(address) {
        Ok(standard) => validate_address(&standard, None),
        Err(_) => false,
    }
}

/// Base58Check over an arbitrary payload, as used for seeds and WIF keys.
pub fn encode_check(version: u8, payload: &[u8], alphabet: Alphabet) -> String {
    base58::encode_check(version, payload, alphabet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED: &str = "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs";
    const UNCOMPRESSED: &str = "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM";

    #[test]
    fn test_validate_known_addresses() {
        assert!(validate_address(COMPRESSED, None));
        assert!(validate_address(UNCOMPRESSED, Some(0)));
        assert!(!validate_address(UNCOMPRESSED, Some(5)));
        assert!(!validate_address("1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAt", None));
        assert!(!validate_address("not an address", None));
        assert!(!validate_address("", None));
    }

    #[test]
    fn test_payload_round_trip() {
        let payload = VersionedPayload::new(0x30, &[0xAB; 20]);
        assert!(payload.is_checksum_valid());
        let address = payload.to_address();
        assert!(address.starts_with("L"));
        assert_eq!(address.payload().unwrap(), payload);
        assert_eq!(address.payload().unwrap().hash160(), [0xAB; 20]);
    }

    #[test]
    fn test_single_byte_flip_breaks_checksum() {
        let payload = VersionedPayload::new(0, &[0x11; 20]);
        for i in 0..21 {
            let mut bytes = *payload.as_bytes();
            bytes[i] ^= 0x01;
            let flipped = VersionedPayload::from_slice(&bytes).unwrap();
            assert!(!flipped.is_checksum_valid(), "byte {} flip went unnoticed", i);
            assert!(!validate_address(flipped.to_address().as_str(), None));
        }
    }

    #[test]
    fn test_wrong_length_payload() {
        assert_eq!(
            VersionedPayload::from_slice(&[0u8; 24]),
            Err(Error::InvalidLength {
                expected: 25,
                actual: 24
            })
        );
    }

    #[test]
    fn test_ripple_validation() {
        let ripple = Address::new(COMPRESSED).to_ripple().unwrap();
        assert!(ripple.starts_with('r'));
        assert!(validate_ripple_address(&ripple));
        assert!(!validate_ripple_address(COMPRESSED));
    }
}
