//! Digest helpers used by address derivation.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// SHA-256 of `data`.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice; the first four bytes form a Base58Check checksum.
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Hash160 = RIPEMD160(SHA256(data))
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// First half of a SHA-512 digest.
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let digest = Sha512::digest(data);
    let mut half = [0u8; 32];
    half.copy_from_slice(&digest[..32]);
    half
}

/// Four byte Base58Check checksum of `data`.
#[inline]
pub fn checksum(data: &[u8]) -> [u8; 4] {
    let digest = double_sha256(data);
    [digest[0], digest[1], digest[2], digest[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash160_of_compressed_key() {
        // Public key for the bitcoin wiki test scalar 18E14A7B...
        let public_key =
            hex::decode("0250863ad64a87ae8a2fe83c1af1a8403cb53f53e486d8511dad8a04887e5b2352")
                .unwrap();
        assert_eq!(
            hex::encode(hash160(&public_key)),
            "f54a5851e9372b87810a8e60cdd2e7cfd80b6e31"
        );
    }

    #[test]
    fn test_sha512_half_is_prefix() {
        let full = Sha512::digest(b"masterpassphrase");
        assert_eq!(&sha512_half(b"masterpassphrase")[..], &full[..32]);
    }
}
