//! Byte-level encodings shared by the hashes: endianness, unsigned integer
//! decoding, and the fixed 32-byte digest layout.

use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Serialize};

/// Width of every digest produced by this crate.
pub const DIGEST_LEN: usize = 32;

/// Byte order of an encoded integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endian {
    #[serde(rename = "be", alias = "big")]
    Big,
    #[serde(rename = "le", alias = "little")]
    Little,
}

impl Endian {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endian::Big => "be",
            Endian::Little => "le",
        }
    }
}

impl std::str::FromStr for Endian {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "be" | "big" => Ok(Endian::Big),
            "le" | "little" => Ok(Endian::Little),
            other => Err(format!("unknown endianness '{other}'")),
        }
    }
}

/// Interpret `bytes` as an unsigned integer. The empty string decodes to zero.
pub fn decode_uint(bytes: &[u8], endian: Endian) -> BigUint {
    match endian {
        Endian::Big => BigUint::from_bytes_be(bytes),
        Endian::Little => BigUint::from_bytes_le(bytes),
    }
}

/// Same as [`decode_uint`] but lifted into the signed domain used by the field engine.
pub fn decode_int(bytes: &[u8], endian: Endian) -> BigInt {
    BigInt::from_biguint(Sign::Plus, decode_uint(bytes, endian))
}

/// Serialize the magnitude of `value` into exactly 32 bytes, zero-padded on
/// the high-order side. Magnitudes wider than 256 bits keep their low 32 bytes.
pub fn to_fixed_bytes(value: &BigInt, endian: Endian) -> [u8; DIGEST_LEN] {
    let be = value.magnitude().to_bytes_be();
    let take = be.len().min(DIGEST_LEN);
    let mut out = [0u8; DIGEST_LEN];
    out[DIGEST_LEN - take..].copy_from_slice(&be[be.len() - take..]);
    if endian == Endian::Little {
        out.reverse();
    }
    out
}
