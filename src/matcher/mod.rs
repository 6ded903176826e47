//! Pattern matching and pattern analysis for Base58 addresses.
//!
//! - Prefix matching with a cheap filter on all but the last character
//! - Feasibility of a prefix for a network version byte
//! - Complexity and lavishness pricing
//! - Verification of collaborative (split-key) solutions

pub mod economics;
pub mod feasibility;
mod pattern;
pub mod solution;

pub use economics::{bounty, lavishness, pattern_complexity, pattern_lavishness};
pub use feasibility::{
    does_pattern_have_right_prefix, does_version_byte_yield_prefix_char, is_pattern_solvable,
    max_address_for_version, min_address_for_version,
};
pub use pattern::{KeyType, MatchResult, Pattern};
pub use solution::{check_solution, Combine, SolutionError};
