//! Runtime configuration for the vanity address tools.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::crypto::{Alphabet, PublicPoint};
use crate::matcher::{
    does_version_byte_yield_prefix_char, is_pattern_solvable, Combine, KeyType, Pattern,
};
use crate::worker::{SearchLimits, SearchMode};

/// Base58 vanity address miner and address tools
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search for an address starting with a pattern
    Mine(MineArgs),
    /// Build an unspendable proof-of-burn address
    Burn(BurnArgs),
    /// Generate a fresh Ripple account
    Ripple,
    /// Price a pattern: complexity, lavishness or bounty
    Price(PriceArgs),
    /// Validate an address checksum
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MineArgs {
    /// Address prefix to search for (case sensitive, Base58 characters only)
    #[arg(short, long)]
    pub pattern: String,

    /// Network version byte (0 = Bitcoin mainnet)
    #[arg(short = 'n', long, default_value = "0")]
    pub net_byte: u8,

    /// Key encodings to accept: uncompressed, compressed or either
    #[arg(short = 'k', long, default_value = "either")]
    pub key_type: KeyType,

    /// Combine each candidate with --public-key: add or multiply
    #[arg(long, requires = "public_key")]
    pub combine: Option<Combine>,

    /// Requester's uncompressed public key (130 hex characters)
    #[arg(long)]
    pub public_key: Option<String>,

    /// Search Ripple account IDs instead
    #[arg(long, default_value = "false")]
    pub ripple: bool,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Stop after this many attempts in total (0 = no limit)
    #[arg(long, default_value = "0")]
    pub max_attempts: u64,

    /// Stop after this many seconds (0 = no limit)
    #[arg(short = 't', long, default_value = "0")]
    pub timeout: u64,

    /// Progress report interval in seconds
    #[arg(short = 'r', long, default_value = "5")]
    pub report_interval: u64,
}

impl MineArgs {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    fn alphabet(&self) -> Alphabet {
        if self.ripple {
            Alphabet::Ripple
        } else {
            Alphabet::Bitcoin
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::InvalidPattern("Pattern cannot be empty".into()));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidArgument(
                "At least one worker is required".into(),
            ));
        }
        self.pattern()?;

        if self.ripple {
            if self.combine.is_some() {
                return Err(ConfigError::InvalidArgument(
                    "--ripple cannot be combined with --combine".into(),
                ));
            }
            if !self.pattern.starts_with('r') {
                return Err(ConfigError::InvalidPattern(
                    "Ripple account IDs always start with 'r'".into(),
                ));
            }
            return Ok(());
        }

        let first = self.pattern.chars().next().unwrap_or_default();
        if !does_version_byte_yield_prefix_char(self.net_byte, first) {
            return Err(ConfigError::InvalidPattern(format!(
                "Addresses with version byte {} cannot start with '{}'",
                self.net_byte, first
            )));
        }
        if !is_pattern_solvable(&self.pattern, self.net_byte) {
            return Err(ConfigError::InvalidPattern(format!(
                "No address with version byte {} starts with {}",
                self.net_byte, self.pattern
            )));
        }

        if self.combine.is_some() {
            self.requester_key()?;
        }
        Ok(())
    }

    /// The compiled pattern in the active alphabet.
    pub fn pattern(&self) -> Result<Pattern, ConfigError> {
        Pattern::new(self.pattern.clone(), self.alphabet())
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))
    }

    fn requester_key(&self) -> Result<PublicPoint, ConfigError> {
        let hex = self.public_key.as_deref().ok_or_else(|| {
            ConfigError::InvalidPublicKey("--combine requires --public-key".into())
        })?;
        PublicPoint::from_hex(hex).map_err(|e| ConfigError::InvalidPublicKey(e.to_string()))
    }

    /// What the workers generate on each attempt.
    pub fn mode(&self) -> Result<SearchMode, ConfigError> {
        if self.ripple {
            return Ok(SearchMode::Ripple);
        }
        Ok(match self.combine {
            None => SearchMode::Coin {
                version: self.net_byte,
                key_type: self.key_type,
            },
            Some(combine) => SearchMode::Combined {
                version: self.net_byte,
                key_type: self.key_type,
                combine,
                public_key: self.requester_key()?,
            },
        })
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_attempts: (self.max_attempts > 0).then_some(self.max_attempts),
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct BurnArgs {
    /// Human readable start of the address, e.g. 1BurnAddress
    #[arg(short, long)]
    pub root: String,

    /// Base58 character appended until the address has full length
    #[arg(short, long, default_value = "X")]
    pub padding: char,
}

#[derive(Args, Debug, Clone)]
pub struct PriceArgs {
    /// Pattern to price
    #[arg(short, long)]
    pub pattern: String,

    /// Bounty offered; prints the resulting lavishness
    #[arg(short, long, conflicts_with = "lavishness")]
    pub bounty: Option<f64>,

    /// Wanted lavishness; prints the bounty needed
    #[arg(short, long)]
    pub lavishness: Option<f64>,
}

impl PriceArgs {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::InvalidPattern("Pattern cannot be empty".into()));
        }
        if let Some((index, c)) = self
            .pattern
            .char_indices()
            .find(|&(_, c)| Alphabet::Bitcoin.rank(c).is_none())
        {
            return Err(ConfigError::InvalidPattern(format!(
                "Invalid character '{}' at position {}",
                c, index
            )));
        }
        for value in [self.bounty, self.lavishness].into_iter().flatten() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidArgument(format!(
                    "Expected a non-negative amount, got {}",
                    value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Address to validate
    pub address: String,

    /// Also require this version byte
    #[arg(short = 'n', long)]
    pub net_byte: Option<u8>,

    /// The address is a Ripple account ID
    #[arg(long, default_value = "false", conflicts_with = "net_byte")]
    pub ripple: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
