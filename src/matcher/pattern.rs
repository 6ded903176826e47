//! Pattern matching implementation.

use std::str::FromStr;

use crate::crypto::{Alphabet, KeyForm};
use crate::error::{Error, Result};

use super::economics::pattern_complexity;

/// Which public key encodings a search accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyType {
    /// Only the 65 byte uncompressed key
    Uncompressed,
    /// Only the 33 byte compressed key
    Compressed,
    /// Either encoding, compressed checked first
    #[default]
    Either,
}

impl KeyType {
    /// Key forms to test for each candidate, in checking order.
    pub fn forms(self) -> &'static [KeyForm] {
        match self {
            KeyType::Uncompressed => &[KeyForm::Uncompressed],
            KeyType::Compressed => &[KeyForm::Compressed],
            KeyType::Either => &[KeyForm::Compressed, KeyForm::Uncompressed],
        }
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uncompressed" | "u" => Ok(KeyType::Uncompressed),
            "compressed" | "c" => Ok(KeyType::Compressed),
            "either" | "any" | "both" => Ok(KeyType::Either),
            _ => Err(format!("Unknown key type: {}", s)),
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Uncompressed => write!(f, "uncompressed"),
            KeyType::Compressed => write!(f, "compressed"),
            KeyType::Either => write!(f, "either"),
        }
    }
}

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Full match found
    Match,
    /// Everything but the last character matches
    Partial,
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }

    #[inline]
    pub fn is_partial(self) -> bool {
        matches!(self, MatchResult::Partial)
    }
}

/// A case sensitive address prefix in one Base58 alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pattern: String,
    /// Byte length of the prefix used as the cheap filter
    filter_len: usize,
    alphabet: Alphabet,
}

impl Pattern {
    /// Creates a new pattern, rejecting characters outside `alphabet`.
    pub fn new(pattern: impl Into<String>, alphabet: Alphabet) -> Result<Self> {
        let pattern = pattern.into();
        if let Some((index, character)) = pattern
            .char_indices()
            .find(|&(_, c)| alphabet.rank(c).is_none())
        {
            return Err(Error::InvalidCharacter { character, index });
        }
        // Every accepted character is ASCII, so byte and char lengths agree.
        let filter_len = pattern.len().saturating_sub(1);

        Ok(Self {
            pattern,
            filter_len,
            alphabet,
        })
    }

    /// Returns the pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the pattern without its last character.
    pub fn subpattern(&self) -> &str {
        &self.pattern[..self.filter_len]
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Matches an address against this pattern.
    #[inline]
    pub fn matches(&self, address: &str) -> MatchResult {
        if !address.starts_with(self.subpattern()) {
            return MatchResult::NoMatch;
        }
        if address.starts_with(&self.pattern) {
            MatchResult::Match
        } else {
            MatchResult::Partial
        }
    }

    /// Returns the estimated difficulty (number of attempts to find a match).
    ///
    /// Bitcoin style patterns use the complexity model; Ripple account IDs
    /// always start with 'r', so every further character costs 58.
    pub fn estimated_difficulty(&self) -> u64 {
        let attempts = match self.alphabet {
            Alphabet::Bitcoin => pattern_complexity(&self.pattern),
            Alphabet::Ripple => 58f64.powi(self.filter_len as i32),
        };
        // Float to int casts saturate.
        attempts as u64
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        match diff {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "1PMycacnJaSqwwJqjawXBErnLsZ7RkXUAs";

    #[test]
    fn test_prefix_match() {
        let pattern = Pattern::new("1PMy", Alphabet::Bitcoin).unwrap();
        assert!(pattern.matches(ADDRESS).is_match());
    }

    #[test]
    fn test_partial_match() {
        let pattern = Pattern::new("1PMz", Alphabet::Bitcoin).unwrap();
        assert_eq!(pattern.subpattern(), "1PM");
        assert!(pattern.matches(ADDRESS).is_partial());
    }

    #[test]
    fn test_prefix_no_match() {
        let pattern = Pattern::new("1Piachu", Alphabet::Bitcoin).unwrap();
        assert_eq!(pattern.matches(ADDRESS), MatchResult::NoMatch);
    }

    #[test]
    fn test_case_sensitive() {
        let pattern = Pattern::new("1pmy", Alphabet::Bitcoin).unwrap();
        assert_eq!(pattern.matches(ADDRESS), MatchResult::NoMatch);
    }

    #[test]
    fn test_single_character() {
        let pattern = Pattern::new("1", Alphabet::Bitcoin).unwrap();
        assert_eq!(pattern.subpattern(), "");
        assert!(pattern.matches(ADDRESS).is_match());
        assert!(pattern.matches("3Foo").is_partial());
    }

    #[test]
    fn test_rejects_foreign_characters() {
        assert_eq!(
            Pattern::new("1Oops", Alphabet::Bitcoin),
            Err(Error::InvalidCharacter {
                character: 'O',
                index: 1
            })
        );
        // Ripple drops '0' and 'l' like Bitcoin but keeps '1'.
        assert_eq!(
            Pattern::new("r0", Alphabet::Ripple),
            Err(Error::InvalidCharacter {
                character: '0',
                index: 1
            })
        );
        assert!(Pattern::new("rl", Alphabet::Ripple).is_err());
        assert!(Pattern::new("r1", Alphabet::Ripple).is_ok());
        assert!(Pattern::new("rHb9", Alphabet::Ripple).is_ok());
    }

    #[test]
    fn test_difficulty() {
        let pattern = Pattern::new("1Pi", Alphabet::Bitcoin).unwrap();
        assert_eq!(pattern.estimated_difficulty(), 22 * 58);
        let ripple = Pattern::new("rHb", Alphabet::Ripple).unwrap();
        assert_eq!(ripple.estimated_difficulty(), 58 * 58);
        assert_eq!(pattern.difficulty_description(), "Easy (seconds)");
    }

    #[test]
    fn test_key_type_parsing() {
        assert_eq!("compressed".parse::<KeyType>().unwrap(), KeyType::Compressed);
        assert_eq!("U".parse::<KeyType>().unwrap(), KeyType::Uncompressed);
        assert_eq!("either".parse::<KeyType>().unwrap(), KeyType::Either);
        assert!("hybrid".parse::<KeyType>().is_err());
        assert_eq!(KeyType::Either.to_string(), "either");
    }

    #[test]
    fn test_either_checks_compressed_first() {
        assert_eq!(
            KeyType::Either.forms(),
            &[KeyForm::Compressed, KeyForm::Uncompressed]
        );
    }
}
