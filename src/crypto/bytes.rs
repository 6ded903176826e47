//! Byte, hex and big integer conversions.

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Decodes a hex string (either case).
#[inline]
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}

/// Uppercase hex of `data`.
#[inline]
pub fn bytes_to_hex(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Returns `data` in reverse byte order.
pub fn reversed(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}

/// Big-endian unsigned integer from bytes.
#[inline]
pub fn bytes_to_big(data: &[u8]) -> BigUint {
    BigUint::from_bytes_be(data)
}

/// Big-endian bytes of `n`, left padded with zeros to `N` bytes.
pub fn big_to_fixed<const N: usize>(n: &BigUint) -> Result<[u8; N]> {
    let raw = n.to_bytes_be();
    // BigUint encodes zero as a single zero byte.
    let raw = if raw.iter().all(|&b| b == 0) { &[][..] } else { &raw[..] };
    if raw.len() > N {
        return Err(Error::InvalidLength {
            expected: N,
            actual: raw.len(),
        });
    }
    let mut out = [0u8; N];
    out[N - raw.len()..].copy_from_slice(raw);
    Ok(out)
}

/// Left pads `data` with zeros to `N` bytes.
pub fn left_pad<const N: usize>(data: &[u8]) -> Result<[u8; N]> {
    if data.len() > N {
        return Err(Error::InvalidLength {
            expected: N,
            actual: data.len(),
        });
    }
    let mut out = [0u8; N];
    out[N - data.len()..].copy_from_slice(data);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reversed(&[1, 2, 3]), vec![3, 2, 1]);
        assert!(reversed(&[]).is_empty());
    }

    #[test]
    fn test_hex() {
        assert_eq!(bytes_to_hex(&[0xde, 0xad]), "DEAD");
        assert_eq!(hex_to_bytes("DeAd").unwrap(), vec![0xde, 0xad]);
        assert!(matches!(hex_to_bytes("abc"), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn test_big_padding() {
        let n = BigUint::from(0x0102u32);
        let fixed: [u8; 4] = big_to_fixed(&n).unwrap();
        assert_eq!(fixed, [0, 0, 1, 2]);
        let zero: [u8; 2] = big_to_fixed(&BigUint::from(0u8)).unwrap();
        assert_eq!(zero, [0, 0]);
        assert!(big_to_fixed::<1>(&n).is_err());
        assert_eq!(bytes_to_big(&fixed), n);
    }

    #[test]
    fn test_left_pad() {
        assert_eq!(left_pad::<3>(&[7]).unwrap(), [0, 0, 7]);
        assert!(left_pad::<1>(&[1, 2]).is_err());
    }
}
