//! Key generation and derivation of both address forms from one private key.

use rand::{CryptoRng, RngCore};

use super::address::{encode_check, Address, VersionedPayload};
use super::base58::Alphabet;
use super::curve;
use super::keys::{PublicPoint, Scalar};
use crate::error::Result;

/// Version byte of mainnet WIF private keys.
pub const WIF_MAINNET: u8 = 0x80;

/// Which public key encoding an address is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyForm {
    Uncompressed,
    Compressed,
}

/// `scalar * G` as `0x04 ‖ X ‖ Y`.
pub fn derive_uncompressed_public_key(scalar: &Scalar) -> Result<[u8; 65]> {
    Ok(PublicPoint::from_scalar(scalar)?.uncompressed())
}

/// `scalar * G` as `(0x02|0x03) ‖ X`.
pub fn derive_compressed_public_key(scalar: &Scalar) -> Result<[u8; 33]> {
    Ok(PublicPoint::from_scalar(scalar)?.compressed())
}

/// One public key encoding and the address derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    pub public_key: Vec<u8>,
    pub payload: VersionedPayload,
    pub address: Address,
}

impl DerivedAddress {
    pub fn new(version: u8, public_key: &[u8]) -> Self {
        let payload = VersionedPayload::from_public_key(version, public_key);
        Self {
            public_key: public_key.to_vec(),
            address: payload.to_address(),
            payload,
        }
    }

    pub fn hash160(&self) -> [u8; 20] {
        self.payload.hash160()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(&self.public_key)
    }
}

/// A private key with its compressed and uncompressed addresses for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinAddress {
    pub version: u8,
    pub private_key: Scalar,
    pub compressed: DerivedAddress,
    pub uncompressed: DerivedAddress,
}

impl CoinAddress {
    /// Generates a new random key using the thread-local CSPRNG.
    #[inline]
    pub fn generate(version: u8) -> Self {
        Self::generate_with(version, &mut rand::thread_rng())
    }

    /// Generates a new random key from `rng`.
    pub fn generate_with<R: RngCore + CryptoRng>(version: u8, rng: &mut R) -> Self {
        let secret = curve::random_secret_key(rng);
        Self::from_point(version, Scalar::from(secret), PublicPoint::from_secret_key(&secret))
    }

    /// Derives both addresses for an existing private key.
    pub fn from_scalar(version: u8, private_key: Scalar) -> Result<Self> {
        let point = PublicPoint::from_scalar(&private_key)?;
        Ok(Self::from_point(version, private_key, point))
    }

    /// Builds the record from a private key and the public point attributed to it.
    ///
    /// In collaborative search the point is not `private_key * G` but a
    /// combination with the requester's key.
    pub fn from_point(version: u8, private_key: Scalar, point: PublicPoint) -> Self {
        Self {
            version,
            private_key,
            compressed: DerivedAddress::new(version, &point.compressed()),
            uncompressed: DerivedAddress::new(version, &point.uncompressed()),
        }
    }

    pub fn derived(&self, form: KeyForm) -> &DerivedAddress {
        match form {
            KeyForm::Compressed => &self.compressed,
            KeyForm::Uncompressed => &self.uncompressed,
        }
    }

    #[inline]
    pub fn address(&self, form: KeyForm) -> &Address {
        &self.derived(form).address
    }

    /// Wallet Import Format for the uncompressed key.
    pub fn wif_uncompressed(&self, prefix: u8) -> String {
        encode_check(prefix, self.private_key.as_bytes(), Alphabet::Bitcoin)
    }

    /// Wallet Import Format for the compressed key (trailing 0x01 flag).
    pub fn wif_compressed(&self, prefix: u8) -> String {
        let mut payload = [0u8; 33];
        payload[..32].copy_from_slice(self.private_key.as_bytes());
        payload[32] = 0x01;
        encode_check(prefix, &payload, Alphabet::Bitcoin)
    }
}

/// Draws a fresh key and derives both of its addresses.
pub fn generate_random_key(version: u8) -> (Scalar, CoinAddress) {
    let address = CoinAddress::generate(version);
    (address.private_key, address)
}
