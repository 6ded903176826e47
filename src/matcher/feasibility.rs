//! Whether a prefix can occur at all for a given version byte.
//!
//! Every address of one version lies between the encodings of
//! `version ‖ 00…00` and `version ‖ FF…FF`, so a prefix that sorts outside
//! that band (digit by digit, by alphabet rank) can never be mined.

use crate::crypto::address::{Address, PAYLOAD_LEN};
use crate::crypto::base58::{self, Alphabet};

/// Leading characters an address can start with, indexed by version byte.
/// Versions above 144 all start with '2'.
static VERSION_PREFIXES: [&str; 145] = [
    "1", "QRSTUVWXYZabcdefghijkmno", "opqrstuvwxyz", "2", "23", "3", "3", "34", "4", "45", // 0-9
    "5", "5", "56", "6", "67", "7", "7", "78", "8", "89", // 10-19
    "9", "9", "9A", "A", "AB", "B", "B", "BC", "C", "CD", // 20-29
    "D", "D", "DE", "E", "EF", "F", "F", "FG", "G", "GH", // 30-39
    "H", "H", "HJ", "J", "JK", "K", "K", "KL", "L", "LM", // 40-49
    "M", "M", "MN", "N", "NP", "P", "P", "PQ", "Q", "QR", // 50-59
    "R", "R", "RS", "S", "ST", "T", "T", "TU", "U", "UV", // 60-69
    "V", "V", "VW", "W", "WX", "X", "X", "XY", "Y", "YZ", // 70-79
    "Z", "Z", "Za", "a", "ab", "b", "bc", "c", "c", "cd", // 80-89
    "d", "de", "e", "e", "ef", "f", "fg", "g", "g", "gh", // 90-99
    "h", "hi", "i", "i", "ij", "j", "jk", "k", "k", "km", // 100-109
    "m", "mn", "n", "n", "no", "o", "op", "p", "p", "pq", // 110-119
    "q", "qr", "r", "r", "rs", "s", "st", "t", "t", "tu", // 120-129
    "u", "uv", "v", "v", "vw", "w", "wx", "x", "x", "xy", // 130-139
    "y", "yz", "z", "z", "z2", // 140-144
];

/// Characters an address with this version byte may start with.
pub fn version_prefix_chars(version: u8) -> &'static str {
    VERSION_PREFIXES
        .get(version as usize)
        .copied()
        .unwrap_or("2")
}

/// Returns true if an address with this version byte can start with `first`.
#[inline]
pub fn does_version_byte_yield_prefix_char(version: u8, first: char) -> bool {
    version_prefix_chars(version).contains(first)
}

fn bound_address(version: u8, fill: u8) -> Address {
    let mut bytes = [fill; PAYLOAD_LEN];
    bytes[0] = version;
    Address::new(base58::bytes_to_base58(&bytes))
}

/// Encoding of `version` followed by 24 zero bytes.
pub fn min_address_for_version(version: u8) -> Address {
    bound_address(version, 0x00)
}

/// Encoding of `version` followed by 24 0xFF bytes.
pub fn max_address_for_version(version: u8) -> Address {
    bound_address(version, 0xFF)
}

/// Returns true if some address of this version starts with `pattern`.
///
/// Version 0 patterns starting with '1' are always accepted: leading zero
/// bytes encode as an unbounded run of '1', so the lower bound says nothing.
/// Empty patterns and patterns with characters outside the alphabet are
/// rejected.
pub fn is_pattern_solvable(pattern: &str, version: u8) -> bool {
    let Some(first) = pattern.chars().next() else {
        return false;
    };
    if !Alphabet::Bitcoin.is_valid(pattern) {
        return false;
    }
    if version == 0 && first == '1' {
        return true;
    }

    let min = min_address_for_version(version);
    let max = max_address_for_version(version);
    tracing::trace!(pattern, min = %min, max = %max, "checking pattern bounds");

    if pattern.len() > max.as_str().len() {
        return false;
    }

    let ranks = |s: &str| -> Vec<usize> {
        s.chars()
            .filter_map(|c| Alphabet::Bitcoin.rank(c))
            .collect()
    };
    let wanted = ranks(pattern);
    let lower = ranks(min.as_str());
    let upper = ranks(max.as_str());

    for (p, lo) in wanted.iter().zip(&lower) {
        if p < lo {
            return false;
        }
        if p > lo {
            break;
        }
    }
    for (p, hi) in wanted.iter().zip(&upper) {
        if p > hi {
            return false;
        }
        if p < hi {
            break;
        }
    }
    true
}

/// A pattern is minable if its first character suits the version and it is solvable.
pub fn does_pattern_have_right_prefix(pattern: &str, version: u8) -> bool {
    match pattern.chars().next() {
        Some(first) => {
            does_version_byte_yield_prefix_char(version, first)
                && is_pattern_solvable(pattern, version)
        }
        None => false,
    }
}
