//! # coin_vanity
//!
//! Vanity address mining for Base58Check (Bitcoin style) and Ripple addresses.
//!
//! ## Architecture
//!
//! - `crypto`: Base58 codecs, key and address derivation, key algebra,
//!   proof-of-burn and Ripple accounts
//! - `matcher`: Prefix matching, feasibility and pattern pricing
//! - `worker`: Parallel search and worker pool management
//! - `config`: Command line configuration

pub mod config;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod worker;

pub use config::Config;
pub use crypto::{Address, CoinAddress, PublicPoint, Scalar};
pub use error::{Error, Result};
pub use matcher::{KeyType, MatchResult, Pattern};
pub use worker::{Found, SearchLimits, SearchMode, VanityResult, WorkerPool};
