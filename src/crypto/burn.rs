//! Proof-of-burn addresses.
//!
//! A human chosen root such as `1BurnAddress` is padded up to a full 25 byte
//! payload and given a valid checksum. Its Hash160 was never produced by
//! hashing a public key, so nobody holds a private key for it.

use super::address::{Address, PAYLOAD_LEN};
use super::base58::{self, Alphabet};
use super::hash::checksum;
use crate::error::{Error, Result};

/// Largest decoded root that is still accepted.
const MAX_ROOT_LEN: usize = PAYLOAD_LEN + 1;

/// Pads `root` with `padding` until it decodes to at least 25 bytes, then fixes the checksum.
///
/// A root that already decodes to 26 bytes is kept whole: the checksum still
/// goes into bytes 21..25 and the trailing byte is left alone, so the root
/// digits survive re-encoding.
pub fn generate_proof_of_burn_address(root: &str, padding: char) -> Result<Address> {
    if let Some((index, character)) = root
        .char_indices()
        .find(|&(_, c)| Alphabet::Bitcoin.rank(c).is_none())
    {
        return Err(Error::InvalidCharacter { character, index });
    }
    if Alphabet::Bitcoin.rank(padding).is_none() {
        return Err(Error::InvalidCharacter {
            character: padding,
            index: root.len(),
        });
    }

    let mut candidate = root.to_string();
    let mut payload = base58::base58_to_bytes(&candidate)?;
    if payload.len() > MAX_ROOT_LEN {
        return Err(Error::InputTooLong(payload.len()));
    }

    // Each appended digit grows the decoded value by a factor of 58, which
    // adds at most one byte, so the loop stops on exactly 25.
    while payload.len() < PAYLOAD_LEN {
        candidate.push(padding);
        payload = base58::base58_to_bytes(&candidate)?;
        if payload.len() > MAX_ROOT_LEN {
            return Err(Error::InputTooLong(payload.len()));
        }
    }

    let sum = checksum(&payload[..21]);
    payload[21..PAYLOAD_LEN].copy_from_slice(&sum);

    Ok(Address::new(base58::bytes_to_base58(&payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::address::validate_address;
    use crate::crypto::hash::double_sha256;

    #[test]
    fn test_burn_address_is_valid() {
        let address = generate_proof_of_burn_address("1BurnAddress", 'X').unwrap();
        assert!(address.starts_with("1BurnAddress"));
        assert!(validate_address(address.as_str(), Some(0)));

        let payload = base58::base58_to_bytes(address.as_str()).unwrap();
        assert_eq!(payload.len(), 25);
        assert_eq!(payload[21..], double_sha256(&payload[..21])[..4]);
    }

    #[test]
    fn test_other_network_root() {
        let address = generate_proof_of_burn_address("LBurn", 'X').unwrap();
        assert!(address.starts_with("LBurn"));
        assert!(validate_address(address.as_str(), None));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            generate_proof_of_burn_address("1Burn0", 'z'),
            Err(Error::InvalidCharacter {
                character: '0',
                index: 5
            })
        );
        assert!(matches!(
            generate_proof_of_burn_address("1Burn", 'l'),
            Err(Error::InvalidCharacter { character: 'l', .. })
        ));
    }

    #[test]
    fn test_root_too_long() {
        let root = "z".repeat(40);
        assert!(matches!(
            generate_proof_of_burn_address(&root, 'z'),
            Err(Error::InputTooLong(_))
        ));
    }

    #[test]
    fn test_26_byte_root_keeps_its_digits() {
        let root = format!("LBurn{}", "X".repeat(30));
        assert_eq!(base58::base58_to_bytes(&root).unwrap().len(), 26);

        let address = generate_proof_of_burn_address(&root, 'X').unwrap();
        assert_eq!(address.as_str(), "LBurnXXXXXXXXXXXXXXXXXXXXXXXLapbo4m");

        let payload = base58::base58_to_bytes(address.as_str()).unwrap();
        let original = base58::base58_to_bytes(&root).unwrap();
        assert_eq!(payload.len(), 26);
        assert_eq!(payload[..21], original[..21]);
        assert_eq!(payload[21..25], double_sha256(&payload[..21])[..4]);
        assert_eq!(payload[25], original[25]);
    }

    #[test]
    fn test_27_byte_root_rejected() {
        let root = format!("L{}", "X".repeat(36));
        assert_eq!(
            generate_proof_of_burn_address(&root, 'X'),
            Err(Error::InputTooLong(27))
        );
    }

    #[test]
    fn test_full_length_root_gets_checksum_fixed() {
        let address = generate_proof_of_burn_address("1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAt", '1')
            .unwrap();
        assert_eq!(address.as_str(), "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs");
    }
}
