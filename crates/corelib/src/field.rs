//! Arithmetic modulo a caller-supplied prime over arbitrary-precision integers.
//!
//! Every operation accepts signed inputs of any magnitude and returns the
//! canonical representative in `[0, p)`. Operations that are undefined for
//! some inputs (inverse of zero, square root of a non-residue) return
//! [`FieldError`] instead of panicking.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::{Lazy, OnceCell};

use crate::encoding::{decode_int, Endian};
use crate::errors::FieldError;

/// Scalar field of BN254, the base field of BabyJubJub.
const BN254_DEC: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Candidates tried when searching for a quadratic non-residue.
const NON_RESIDUE_SEARCH_LIMIT: u32 = 1 << 16;

static BN254: Lazy<FieldEngine> = Lazy::new(|| {
    FieldEngine::new(bn254_modulus()).expect("BN254 modulus is greater than one")
});

/// The BN254 scalar-field prime.
pub fn bn254_modulus() -> BigInt {
    BN254_DEC
        .parse()
        .expect("BN254 modulus literal is valid decimal")
}

#[derive(Debug, Clone)]
pub struct FieldEngine {
    p: BigInt,
    // p - 1 = q * 2^s with q odd
    q: BigInt,
    s: u32,
    non_residue: OnceCell<Option<BigInt>>,
}

impl PartialEq for FieldEngine {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p
    }
}

impl Eq for FieldEngine {}

impl FieldEngine {
    /// Build an engine for modulus `p`. Primality is not checked; square
    /// roots and inverses are only guaranteed correct for prime `p`.
    pub fn new(p: impl Into<BigInt>) -> Result<Self, FieldError> {
        let p = p.into();
        if p <= BigInt::one() {
            return Err(FieldError::InvalidModulus(p.to_string()));
        }
        let mut q: BigInt = &p - 1u32;
        let mut s = 0u32;
        while q.is_even() {
            q >>= 1;
            s += 1;
        }
        Ok(Self {
            p,
            q,
            s,
            non_residue: OnceCell::new(),
        })
    }

    /// Shared engine over the BN254 scalar field.
    pub fn bn254() -> &'static FieldEngine {
        &BN254
    }

    pub fn modulus(&self) -> &BigInt {
        &self.p
    }

    pub fn mod_reduce(&self, a: &BigInt) -> BigInt {
        a.mod_floor(&self.p)
    }

    /// Decode `bytes` as an unsigned integer and reduce it into the field.
    pub fn from_bytes(&self, bytes: &[u8], endian: Endian) -> BigInt {
        self.mod_reduce(&decode_int(bytes, endian))
    }

    pub fn is_zero(&self, a: &BigInt) -> bool {
        self.mod_reduce(a).is_zero()
    }

    pub fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.mod_reduce(&(self.mod_reduce(a) + self.mod_reduce(b)))
    }

    pub fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.mod_reduce(&(self.mod_reduce(a) - self.mod_reduce(b)))
    }

    pub fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.mod_reduce(&(self.mod_reduce(a) * self.mod_reduce(b)))
    }

    pub fn square(&self, a: &BigInt) -> BigInt {
        self.mul(a, a)
    }

    pub fn neg(&self, a: &BigInt) -> BigInt {
        let r = self.mod_reduce(a);
        if r.is_zero() {
            r
        } else {
            &self.p - r
        }
    }

    pub fn div(&self, a: &BigInt, b: &BigInt) -> Result<BigInt, FieldError> {
        if self.is_zero(b) {
            return Err(FieldError::DivisionByZero);
        }
        let inv = self.mod_inv(b)?;
        Ok(self.mul(a, &inv))
    }

    /// Inverse via the extended Euclidean algorithm.
    pub fn mod_inv(&self, a: &BigInt) -> Result<BigInt, FieldError> {
        let r = self.mod_reduce(a);
        if r.is_zero() {
            return Err(FieldError::NotInvertible);
        }
        let egcd = r.extended_gcd(&self.p);
        if !egcd.gcd.is_one() {
            return Err(FieldError::NotInvertible);
        }
        Ok(self.mod_reduce(&egcd.x))
    }

    /// `base^exp mod p` for any signed exponent. `pow(a, 0) == 1` for every `a`,
    /// zero included; a negative exponent inverts `base` first.
    pub fn pow(&self, base: &BigInt, exp: &BigInt) -> Result<BigInt, FieldError> {
        let base = self.mod_reduce(base);
        if exp.is_zero() {
            return Ok(BigInt::one());
        }
        if exp.sign() == num_bigint::Sign::Minus {
            let inv = self.mod_inv(&base)?;
            return Ok(inv.modpow(&-exp, &self.p));
        }
        Ok(base.modpow(exp, &self.p))
    }

    /// Exponentiation by a non-negative exponent; never fails.
    pub(crate) fn pow_unsigned(&self, base: &BigInt, exp: &BigInt) -> BigInt {
        debug_assert!(exp.sign() != num_bigint::Sign::Minus);
        if exp.is_zero() {
            return BigInt::one();
        }
        self.mod_reduce(base).modpow(exp, &self.p)
    }

    /// Euler's criterion: zero or `a^((p-1)/2) == 1`.
    pub fn has_sqrt(&self, a: &BigInt) -> bool {
        let a = self.mod_reduce(a);
        if a.is_zero() {
            return true;
        }
        let exp: BigInt = (&self.p - 1u32) >> 1;
        self.pow_unsigned(&a, &exp).is_one()
    }

    /// Legendre symbol of `a`: 0, 1 or -1.
    pub fn legendre(&self, a: &BigInt) -> i8 {
        if self.is_zero(a) {
            0
        } else if self.has_sqrt(a) {
            1
        } else {
            -1
        }
    }

    /// One square root of `a`. Which of the two roots is returned is unspecified.
    pub fn sqrt(&self, a: &BigInt) -> Result<BigInt, FieldError> {
        let a = self.mod_reduce(a);
        if a.is_zero() {
            return Ok(a);
        }
        if !self.has_sqrt(&a) {
            return Err(FieldError::NoSquareRoot);
        }
        if self.s == 0 {
            // p == 2
            return Ok(a);
        }
        let root = if self.s == 1 {
            // p ≡ 3 (mod 4)
            let exp: BigInt = (&self.p + 1u32) >> 2;
            self.pow_unsigned(&a, &exp)
        } else {
            self.tonelli_shanks(&a)?
        };
        if self.square(&root) != a {
            // only reachable for composite moduli
            return Err(FieldError::NoSquareRoot);
        }
        Ok(root)
    }

    fn tonelli_shanks(&self, a: &BigInt) -> Result<BigInt, FieldError> {
        let z = self.non_residue().ok_or(FieldError::NoSquareRoot)?;
        let mut m = self.s;
        let mut c = self.pow_unsigned(z, &self.q);
        let mut t = self.pow_unsigned(a, &self.q);
        let half: BigInt = (&self.q + 1u32) >> 1;
        let mut r = self.pow_unsigned(a, &half);

        while !t.is_one() {
            // least i with t^(2^i) == 1
            let mut i = 0u32;
            let mut t2i = t.clone();
            while !t2i.is_one() {
                t2i = self.square(&t2i);
                i += 1;
                if i == m {
                    return Err(FieldError::NoSquareRoot);
                }
            }
            let mut b = c.clone();
            for _ in 0..(m - i - 1) {
                b = self.square(&b);
            }
            m = i;
            c = self.square(&b);
            t = self.mul(&t, &c);
            r = self.mul(&r, &b);
        }
        Ok(r)
    }

    /// Smallest quadratic non-residue, found on first use.
    fn non_residue(&self) -> Option<&BigInt> {
        self.non_residue
            .get_or_init(|| {
                let minus_one: BigInt = &self.p - 1u32;
                let exp: BigInt = (&self.p - 1u32) >> 1;
                let limit = BigInt::from(NON_RESIDUE_SEARCH_LIMIT).min(self.p.clone());
                let mut z = BigInt::from(2u32);
                while z < limit {
                    if self.pow_unsigned(&z, &exp) == minus_one {
                        tracing::trace!(modulus = %self.p, non_residue = %z, "found quadratic non-residue");
                        return Some(z);
                    }
                    z += 1u32;
                }
                None
            })
            .as_ref()
    }
}
