//! Ripple account derivation.
//!
//! seed → private generator → public generator → second scalar → combined
//! private key → account ID. Every text form is Base58Check spelled in the
//! Ripple alphabet.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::address::{encode_check, Address};
use super::algebra::add_scalars;
use super::base58::{self, Alphabet};
use super::bytes::bytes_to_hex;
use super::hash::sha512_half;
use super::keys::{PublicPoint, Scalar};
use crate::error::{Error, Result};

pub const SEED_LEN: usize = 16;

pub const SEED_VERSION: u8 = 0x21;
pub const PUBLIC_GENERATOR_VERSION: u8 = 0x29;
pub const PUBLIC_KEY_VERSION: u8 = 0x23;
pub const ACCOUNT_VERSION: u8 = 0x00;

/// Every derivation step of one Ripple account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleAddress {
    pub account_id: String,
    pub master_seed: String,
    pub master_seed_hex: String,

    pub private_generator: Scalar,
    pub public_generator: String,
    pub public_generator_hex: String,

    pub private_key: Scalar,
    pub public_key: String,
    pub public_key_hex: String,
}

/// Hashes `prefix ‖ counter` for increasing counters until the digest is a usable key.
fn first_valid_scalar(prefix: &[u8]) -> Result<(u32, Scalar)> {
    let mut input = Vec::with_capacity(prefix.len() + 4);
    (0..=u32::MAX)
        .find_map(|counter| {
            input.clear();
            input.extend_from_slice(prefix);
            input.extend_from_slice(&counter.to_be_bytes());
            let candidate = Scalar::from_bytes(sha512_half(&input));
            candidate.is_valid().then_some((counter, candidate))
        })
        .ok_or(Error::InvalidScalar)
}

/// Base58Check of `version ‖ payload` in the Ripple alphabet.
fn ripple_check(version: u8, payload: &[u8]) -> Result<String> {
    base58::to_ripple(&encode_check(version, payload, Alphabet::Bitcoin))
}

impl RippleAddress {
    /// Derives the account for a known seed.
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Result<Self> {
        let master_seed = ripple_check(SEED_VERSION, seed)?;

        let (sequence, private_generator) = first_valid_scalar(seed)?;
        let public_generator_bytes = PublicPoint::from_scalar(&private_generator)?.compressed();

        let mut prefix = Vec::with_capacity(37);
        prefix.extend_from_slice(&public_generator_bytes);
        prefix.extend_from_slice(&sequence.to_be_bytes());
        let (_, second) = first_valid_scalar(&prefix)?;

        let private_key = add_scalars(&private_generator, &second);
        let public_key_bytes = PublicPoint::from_scalar(&private_key)?.compressed();

        let account_id =
            Address::from_public_key(ACCOUNT_VERSION, &public_key_bytes).to_ripple()?;

        Ok(Self {
            account_id,
            master_seed,
            master_seed_hex: bytes_to_hex(seed),
            private_generator,
            public_generator: ripple_check(PUBLIC_GENERATOR_VERSION, &public_generator_bytes)?,
            public_generator_hex: bytes_to_hex(&public_generator_bytes),
            private_key,
            public_key: ripple_check(PUBLIC_KEY_VERSION, &public_key_bytes)?,
            public_key_hex: bytes_to_hex(&public_key_bytes),
        })
    }

    /// Derives an account from a fresh seed drawn from `rng`.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut seed = [0u8; SEED_LEN];
        rng.fill_bytes(&mut seed);
        Self::from_seed(&seed)
    }

    /// Derives an account from a fresh seed drawn from the operating system.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }
}

/// Draws a 16 byte seed and derives its account.
#[inline]
pub fn generate_ripple_address() -> Result<RippleAddress> {
    RippleAddress::generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::address::validate_ripple_address;
    use crate::crypto::bytes::hex_to_bytes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn passphrase_seed() -> [u8; SEED_LEN] {
        // sha512_half("masterpassphrase")[..16]
        hex_to_bytes("DEDCE9CE67B451D852FD4E846FCDE31C")
            .unwrap()
            .try_into()
            .unwrap()
    }

    #[test]
    fn test_known_account() {
        let address = RippleAddress::from_seed(&passphrase_seed()).unwrap();
        assert_eq!(address.master_seed, "snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
        assert_eq!(address.account_id, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        assert_eq!(address.master_seed_hex, "DEDCE9CE67B451D852FD4E846FCDE31C");
    }

    #[test]
    fn test_seed_comes_from_passphrase_hash() {
        assert_eq!(sha512_half(b"masterpassphrase")[..16], passphrase_seed());
    }

    #[test]
    fn test_generated_account_is_consistent() {
        let mut rng = StdRng::seed_from_u64(42);
        let address = RippleAddress::generate_with(&mut rng).unwrap();
        assert!(address.account_id.starts_with('r'));
        assert!(validate_ripple_address(&address.account_id));
        assert!(address.private_key.is_valid());

        let public_key = PublicPoint::from_scalar(&address.private_key).unwrap();
        assert_eq!(bytes_to_hex(&public_key.compressed()), address.public_key_hex);

        let again = RippleAddress::from_seed(
            &hex_to_bytes(&address.master_seed_hex)
                .unwrap()
                .try_into()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(again, address);
    }

    #[test]
    fn test_random_accounts_differ() {
        let a = generate_ripple_address().unwrap();
        let b = generate_ripple_address().unwrap();
        assert_ne!(a.account_id, b.account_id);
    }
}
