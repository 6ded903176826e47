//! Collaborative vanity search.
//!
//! A requester publishes a public key and a pattern. A miner searches for a
//! partial private key that, combined with the requester's public key,
//! yields a matching address. Only the requester can recover the final
//! private key, by combining the partial key with their own.

use std::str::FromStr;

use crate::crypto::algebra::{add_scalars, multiply_scalars};
use crate::crypto::{Address, KeyForm, PublicPoint, Scalar};
use crate::error::Error;

/// How a partial key is combined with the requester's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    /// `requester + partial · G`
    #[default]
    Add,
    /// `partial · requester`
    Multiply,
}

impl Combine {
    /// Public key of the combined key pair.
    pub fn combine_point(
        self,
        requester: &PublicPoint,
        partial: &Scalar,
    ) -> crate::error::Result<PublicPoint> {
        match self {
            Combine::Add => requester.add(&PublicPoint::from_scalar(partial)?),
            Combine::Multiply => requester.multiply(partial),
        }
    }

    /// Final private key, computed by whoever holds both halves.
    pub fn combine_scalars(self, requester: &Scalar, partial: &Scalar) -> Scalar {
        match self {
            Combine::Add => add_scalars(requester, partial),
            Combine::Multiply => multiply_scalars(requester, partial),
        }
    }
}

impl FromStr for Combine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Combine::Add),
            "multiply" | "mult" | "mul" | "*" => Ok(Combine::Multiply),
            _ => Err(format!("Unknown combination: {}", s)),
        }
    }
}

impl std::fmt::Display for Combine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combine::Add => write!(f, "add"),
            Combine::Multiply => write!(f, "multiply"),
        }
    }
}

/// Why a submitted partial key was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolutionError {
    #[error("Point is not on curve")]
    NotOnCurve,

    #[error("Wrong pattern: {address} does not start with {pattern}")]
    WrongPattern { address: String, pattern: String },

    #[error(transparent)]
    Key(#[from] Error),
}

/// Verifies a partial key submitted for a collaborative search.
///
/// `public_key` is the requester's key as 130 hex characters and `solution`
/// the partial private key in hex. Returns the combined address when it
/// starts with `pattern`.
pub fn check_solution(
    public_key: &str,
    solution: &str,
    pattern: &str,
    net_byte: u8,
    combine: Combine,
    key_form: KeyForm,
) -> Result<Address, SolutionError> {
    let partial = Scalar::from_hex(solution).map_err(|_| SolutionError::NotOnCurve)?;
    if !partial.is_valid() {
        return Err(SolutionError::NotOnCurve);
    }
    let requester = PublicPoint::from_hex(public_key)?;

    let point = combine.combine_point(&requester, &partial)?;
    let address = match key_form {
        KeyForm::Compressed => Address::from_public_key(net_byte, &point.compressed()),
        KeyForm::Uncompressed => Address::from_public_key(net_byte, &point.uncompressed()),
    };

    if !address.starts_with(pattern) {
        return Err(SolutionError::WrongPattern {
            address: address.to_string(),
            pattern: pattern.to_string(),
        });
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CoinAddress;

    const REQUESTER_KEY: &str = "18E14A7B6A307F426A94F8114701E7C8E774E7F9A47E2C2035DB29A206321725";
    const PARTIAL_KEY: &str = "00000000000000000000000000000000000000000000000000000000DEADBEEF";

    fn requester() -> (Scalar, String) {
        let scalar = Scalar::from_hex(REQUESTER_KEY).unwrap();
        let hex = PublicPoint::from_scalar(&scalar).unwrap().to_hex();
        (scalar, hex)
    }

    fn expected_address(combine: Combine, form: KeyForm) -> Address {
        let (scalar, _) = requester();
        let partial = Scalar::from_hex(PARTIAL_KEY).unwrap();
        let combined = combine.combine_scalars(&scalar, &partial);
        CoinAddress::from_scalar(0, combined)
            .unwrap()
            .address(form)
            .clone()
    }

    #[test]
    fn test_accepts_matching_solutions() {
        let (_, public_key) = requester();
        for combine in [Combine::Add, Combine::Multiply] {
            for form in [KeyForm::Compressed, KeyForm::Uncompressed] {
                let expected = expected_address(combine, form);
                let pattern = &expected.as_str()[..4];
                let address =
                    check_solution(&public_key, PARTIAL_KEY, pattern, 0, combine, form).unwrap();
                assert_eq!(address, expected);
            }
        }
    }

    #[test]
    fn test_wrong_pattern() {
        let (_, public_key) = requester();
        let expected = expected_address(Combine::Add, KeyForm::Compressed);
        // Pattern longer than any address can never match.
        let pattern = format!("{}1", expected);
        assert!(matches!(
            check_solution(&public_key, PARTIAL_KEY, &pattern, 0, Combine::Add, KeyForm::Compressed),
            Err(SolutionError::WrongPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_solution() {
        let (_, public_key) = requester();
        let zero = "0".repeat(64);
        assert_eq!(
            check_solution(&public_key, &zero, "1", 0, Combine::Add, KeyForm::Compressed),
            Err(SolutionError::NotOnCurve)
        );
        assert_eq!(
            check_solution(&public_key, "zz", "1", 0, Combine::Multiply, KeyForm::Compressed),
            Err(SolutionError::NotOnCurve)
        );
    }

    #[test]
    fn test_invalid_public_key() {
        assert!(matches!(
            check_solution("04abcd", PARTIAL_KEY, "1", 0, Combine::Add, KeyForm::Compressed),
            Err(SolutionError::Key(Error::InvalidPoint(_)))
        ));
    }

    #[test]
    fn test_combination_parsing() {
        assert_eq!("add".parse::<Combine>().unwrap(), Combine::Add);
        assert_eq!("Mult".parse::<Combine>().unwrap(), Combine::Multiply);
        assert!("xor".parse::<Combine>().is_err());
        assert_eq!(Combine::Multiply.to_string(), "multiply");
    }
}
