//! Base58 and Base58Check encoding over the Bitcoin and Ripple alphabets.
//!
//! Both alphabets contain the same 58 symbols in a different order, so a
//! string can be translated between them digit-for-digit by rank.

use crate::error::{Error, Result};

use super::hash::checksum;

const BITCOIN_DIGITS: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const RIPPLE_DIGITS: &[u8; 58] = b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

const NO_RANK: u8 = 0xFF;

const fn rank_table(digits: &[u8; 58]) -> [u8; 128] {
    let mut table = [NO_RANK; 128];
    let mut i = 0;
    while i < 58 {
        table[digits[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static BITCOIN_RANKS: [u8; 128] = rank_table(BITCOIN_DIGITS);
static RIPPLE_RANKS: [u8; 128] = rank_table(RIPPLE_DIGITS);

/// A Base58 digit alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// `123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz`
    #[default]
    Bitcoin,
    /// `rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz`
    Ripple,
}

impl Alphabet {
    /// The 58 digits of this alphabet, ordered by value.
    pub const fn digits(self) -> &'static [u8; 58] {
        match self {
            Alphabet::Bitcoin => BITCOIN_DIGITS,
            Alphabet::Ripple => RIPPLE_DIGITS,
        }
    }

    fn ranks(self) -> &'static [u8; 128] {
        match self {
            Alphabet::Bitcoin => &BITCOIN_RANKS,
            Alphabet::Ripple => &RIPPLE_RANKS,
        }
    }

    fn codec(self) -> &'static bs58::Alphabet {
        match self {
            Alphabet::Bitcoin => bs58::Alphabet::BITCOIN,
            Alphabet::Ripple => bs58::Alphabet::RIPPLE,
        }
    }

    /// Value of `c` as a digit of this alphabet.
    #[inline]
    pub fn rank(self, c: char) -> Option<usize> {
        if !c.is_ascii() {
            return None;
        }
        match self.ranks()[c as usize] {
            NO_RANK => None,
            rank => Some(rank as usize),
        }
    }

    /// Digit with value `rank`.
    #[inline]
    pub fn digit(self, rank: usize) -> Option<char> {
        self.digits().get(rank).map(|&b| b as char)
    }

    /// Returns true if every character of `s` is a digit of this alphabet.
    pub fn is_valid(self, s: &str) -> bool {
        s.chars().all(|c| self.rank(c).is_some())
    }

    fn check(self, s: &str) -> Result<()> {
        match s.char_indices().find(|&(_, c)| self.rank(c).is_none()) {
            Some((index, character)) => Err(Error::InvalidCharacter { character, index }),
            None => Ok(()),
        }
    }
}

/// Encodes bytes as Base58. Each leading zero byte becomes one leading zero digit.
pub fn encode(data: &[u8], alphabet: Alphabet) -> String {
    bs58::encode(data).with_alphabet(alphabet.codec()).into_string()
}

/// Decodes a Base58 string back to bytes.
pub fn decode(s: &str, alphabet: Alphabet) -> Result<Vec<u8>> {
    alphabet.check(s)?;
    bs58::decode(s)
        .with_alphabet(alphabet.codec())
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                Error::InvalidCharacter { character, index }
            }
            _ => Error::InvalidCharacter {
                character: s.chars().next().unwrap_or_default(),
                index: 0,
            },
        })
}

/// Encodes bytes with the Bitcoin alphabet.
#[inline]
pub fn bytes_to_base58(data: &[u8]) -> String {
    encode(data, Alphabet::Bitcoin)
}

/// Decodes a Bitcoin alphabet string.
#[inline]
pub fn base58_to_bytes(s: &str) -> Result<Vec<u8>> {
    decode(s, Alphabet::Bitcoin)
}

/// Builds `version ‖ payload ‖ checksum4`.
pub fn with_checksum(version: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 5);
    out.push(version);
    out.extend_from_slice(payload);
    let sum = checksum(&out);
    out.extend_from_slice(&sum);
    out
}

/// Base58Check string of `version ‖ payload`.
pub fn encode_check(version: u8, payload: &[u8], alphabet: Alphabet) -> String {
    encode(&with_checksum(version, payload), alphabet)
}

/// Translates `s` digit-for-digit from one alphabet to the other.
pub fn remap(s: &str, from: Alphabet, to: Alphabet) -> Result<String> {
    s.char_indices()
        .map(|(index, character)| {
            from.rank(character)
                .and_then(|rank| to.digit(rank))
                .ok_or(Error::InvalidCharacter { character, index })
        })
        .collect()
}

/// Bitcoin alphabet string to its Ripple alphabet spelling.
#[inline]
pub fn to_ripple(s: &str) -> Result<String> {
    remap(s, Alphabet::Bitcoin, Alphabet::Ripple)
}

/// Ripple alphabet string to its Bitcoin alphabet spelling.
#[inline]
pub fn from_ripple(s: &str) -> Result<String> {
    remap(s, Alphabet::Ripple, Alphabet::Bitcoin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leading_zero_bytes() {
        assert_eq!(bytes_to_base58(&[0, 0, 0]), "111");
        assert_eq!(bytes_to_base58(&[0, 0, 1]), "112");
        assert_eq!(base58_to_bytes("111").unwrap(), vec![0, 0, 0]);
        assert_eq!(bytes_to_base58(&[]), "");
    }

    #[test]
    fn test_invalid_character() {
        let err = base58_to_bytes("1Piach0").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCharacter {
                character: '0',
                index: 6
            }
        );
        assert!(base58_to_bytes("Il").is_err());
    }

    #[test]
    fn test_ranks() {
        assert_eq!(Alphabet::Bitcoin.rank('1'), Some(0));
        assert_eq!(Alphabet::Bitcoin.rank('z'), Some(57));
        assert_eq!(Alphabet::Bitcoin.rank('0'), None);
        assert_eq!(Alphabet::Ripple.rank('r'), Some(0));
        assert_eq!(Alphabet::Ripple.rank('1'), Some(50));
        assert_eq!(Alphabet::Ripple.rank('é'), None);
    }

    #[test]
    fn test_remap() {
        assert_eq!(to_ripple("123").unwrap(), "rps");
        assert_eq!(from_ripple("rps").unwrap(), "123");
        assert!(to_ripple("10").is_err());
    }

    #[test]
    fn test_remap_matches_direct_encoding() {
        let payload = with_checksum(0x21, &[0x42; 16]);
        let bitcoin = encode(&payload, Alphabet::Bitcoin);
        assert_eq!(to_ripple(&bitcoin).unwrap(), encode(&payload, Alphabet::Ripple));
    }

    proptest! {
        #[test]
        fn test_round_trip(data in prop::collection::vec(any::<u8>(), 0..64)) {
            let encoded = bytes_to_base58(&data);
            prop_assert_eq!(base58_to_bytes(&encoded).unwrap(), data);
        }

        #[test]
        fn test_ripple_round_trip(data in prop::collection::vec(any::<u8>(), 0..40)) {
            let encoded = encode(&data, Alphabet::Ripple);
            prop_assert_eq!(decode(&encoded, Alphabet::Ripple).unwrap(), data);
        }
    }
}
