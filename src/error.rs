//! Error types shared by the derivation, encoding and key algebra code.

/// Errors produced while encoding, decoding or deriving keys and addresses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A character outside the active Base58 alphabet was encountered.
    #[error("Invalid character '{character}' at position {index}")]
    InvalidCharacter { character: char, index: usize },

    /// Private key is outside [1, N-1] or was rejected by the curve.
    #[error("Invalid private key scalar")]
    InvalidScalar,

    /// Public key is malformed or its coordinates are not on the curve.
    #[error("Invalid public key: {0}")]
    InvalidPoint(String),

    /// Proof-of-burn root decodes to more bytes than an address payload holds.
    #[error("Input too long: decodes to {0} bytes")]
    InputTooLong(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(String),
}

pub type Result<T> = std::result::Result<T, Error>;
