//! Secure randomness backed by the operating system's CSPRNG.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::RandomError;

/// `n` bytes from the OS entropy source.
pub fn get_bytes(n: usize) -> Result<Vec<u8>, RandomError> {
    let mut buf = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| RandomError::Source(e.to_string()))?;
    Ok(buf)
}

/// Uniform integer in `[1, modulus - 1]`.
///
/// Candidates are drawn with exactly `modulus.bits()` bits and rejected when
/// out of range, so the result carries no modular bias.
pub fn get_integer(modulus: &BigUint) -> Result<BigUint, RandomError> {
    if *modulus <= BigUint::one() {
        return Err(RandomError::InvalidModulus);
    }
    let bits = modulus.bits();
    let len = bits.div_ceil(8) as usize;
    let excess = (len as u64 * 8 - bits) as u32;
    loop {
        let mut buf = get_bytes(len)?;
        buf[0] &= 0xff >> excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if !candidate.is_zero() && candidate < *modulus {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_have_requested_length() {
        assert!(get_bytes(0).unwrap().is_empty());
        let a = get_bytes(32).unwrap();
        let b = get_bytes(32).unwrap();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn integers_stay_in_range() {
        let two = BigUint::from(2u32);
        for _ in 0..16 {
            assert_eq!(get_integer(&two).unwrap(), BigUint::one());
        }
        let m = BigUint::from(1000u32);
        for _ in 0..256 {
            let v = get_integer(&m).unwrap();
            assert!(!v.is_zero() && v < m);
        }
    }

    #[test]
    fn rejects_trivial_modulus() {
        assert_eq!(get_integer(&BigUint::one()), Err(RandomError::InvalidModulus));
        assert_eq!(get_integer(&BigUint::zero()), Err(RandomError::InvalidModulus));
    }
}
