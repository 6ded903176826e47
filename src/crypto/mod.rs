//! Cryptographic operations for key and address generation.
//!
//! This module provides:
//! - Base58 / Base58Check encoding in the Bitcoin and Ripple alphabets
//! - Public key and address derivation from a private scalar
//! - Key algebra for collaborative (split-key) address search
//! - Proof-of-burn and Ripple account construction

pub mod address;
pub mod algebra;
pub mod base58;
pub mod burn;
pub mod bytes;
pub mod curve;
pub mod hash;
pub mod keypair;
pub mod keys;
pub mod ripple;

pub use address::{derive_address, validate_address, validate_ripple_address, Address, VersionedPayload};
pub use algebra::{add_public_points, add_scalars, multiply_scalars, scalar_multiply_against_point};
pub use base58::Alphabet;
pub use burn::generate_proof_of_burn_address;
pub use keypair::{
    derive_compressed_public_key, derive_uncompressed_public_key, generate_random_key, CoinAddress,
    DerivedAddress, KeyForm,
};
pub use keys::{is_public_key_valid, PublicPoint, Scalar};
pub use ripple::{generate_ripple_address, RippleAddress};
