//! BabyJubJub: the twisted Edwards curve `A·x² + y² = 1 + D·x²·y²` over the
//! BN254 scalar field (EIP-2494), with A = 168700 and D = 168696.
//!
//! Only what the Pedersen hash and its generator derivation need: the
//! addition law, scalar multiplication, membership checks, and point compression.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use once_cell::sync::Lazy;

use crate::encoding::{decode_int, to_fixed_bytes, Endian, DIGEST_LEN};
use crate::errors::CurveError;
use crate::field::FieldEngine;

static A: Lazy<BigInt> = Lazy::new(|| BigInt::from(168_700u32));
static D: Lazy<BigInt> = Lazy::new(|| BigInt::from(168_696u32));

static GROUP_ORDER: Lazy<BigInt> = Lazy::new(|| {
    dec("21888242871839275222246405745257275088614511777268538073601725287587578984328")
});
static SUBGROUP_ORDER: Lazy<BigInt> = Lazy::new(|| &*GROUP_ORDER >> 3);

static GENERATOR: Lazy<Point> = Lazy::new(|| Point {
    x: dec("995203441582195749578291179787384436505546430278305826713579947235728471134"),
    y: dec("5472060717959818805561601436314318772137091100104008585924551046643952123905"),
});
static BASE8: Lazy<Point> = Lazy::new(|| mul_scalar(&GENERATOR, &BigInt::from(8u32)));

// (p - 1) / 2: x coordinates above it are "negative" for compression
static HALF_P: Lazy<BigInt> = Lazy::new(|| (field().modulus() - 1u32) >> 1);

fn dec(s: &str) -> BigInt {
    s.parse().expect("curve constant literal is valid decimal")
}

fn field() -> &'static FieldEngine {
    FieldEngine::bn254()
}

/// Affine point. Construction through [`Point::new`] guarantees it lies on the curve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    x: BigInt,
    y: BigInt,
}

impl Point {
    pub fn new(x: BigInt, y: BigInt) -> Result<Self, CurveError> {
        let f = field();
        let p = Point {
            x: f.mod_reduce(&x),
            y: f.mod_reduce(&y),
        };
        if !in_curve(&p) {
            return Err(CurveError::NotOnCurve);
        }
        Ok(p)
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_one()
    }
}

/// Neutral element (0, 1).
pub fn identity() -> Point {
    Point {
        x: BigInt::zero(),
        y: BigInt::one(),
    }
}

pub fn generator() -> &'static Point {
    &GENERATOR
}

/// `8 · generator`, the generator of the prime-order subgroup.
pub fn base8() -> &'static Point {
    &BASE8
}

pub fn group_order() -> &'static BigInt {
    &GROUP_ORDER
}

pub fn sub_group_order() -> &'static BigInt {
    &SUBGROUP_ORDER
}

/// Point in projective coordinates `(X : Y : Z)` with `x = X/Z`, `y = Y/Z`.
/// Used to accumulate sums without a field inversion per addition.
#[derive(Debug, Clone)]
pub struct ProjectivePoint {
    x: BigInt,
    y: BigInt,
    z: BigInt,
}

impl ProjectivePoint {
    pub fn identity() -> Self {
        Self {
            x: BigInt::zero(),
            y: BigInt::one(),
            z: BigInt::one(),
        }
    }

    pub fn to_affine(&self) -> Point {
        let f = field();
        let z_inv = f
            .mod_inv(&self.z)
            .expect("projective Z is nonzero under the complete addition law");
        Point {
            x: f.mul(&self.x, &z_inv),
            y: f.mul(&self.y, &z_inv),
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            x: field().neg(&self.x),
            y: self.y.clone(),
            z: self.z.clone(),
        }
    }

    /// Projective twisted Edwards addition (add-2008-bbjlp). Complete on this
    /// curve since A is a square and D is not.
    pub fn add(&self, other: &Self) -> Self {
        let f = field();
        let a = f.mul(&self.z, &other.z);
        let b = f.square(&a);
        let c = f.mul(&self.x, &other.x);
        let d = f.mul(&self.y, &other.y);
        let e = f.mul(&D, &f.mul(&c, &d));
        let ff = f.sub(&b, &e);
        let g = f.add(&b, &e);
        let cross = f.mul(
            &f.add(&self.x, &self.y),
            &f.add(&other.x, &other.y),
        );
        let x3 = f.mul(&f.mul(&a, &ff), &f.sub(&f.sub(&cross, &c), &d));
        let y3 = f.mul(&f.mul(&a, &g), &f.sub(&d, &f.mul(&A, &c)));
        let z3 = f.mul(&ff, &g);
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }
}

impl From<&Point> for ProjectivePoint {
    fn from(p: &Point) -> Self {
        Self {
            x: p.x.clone(),
            y: p.y.clone(),
            z: BigInt::one(),
        }
    }
}

pub fn add(a: &Point, b: &Point) -> Point {
    ProjectivePoint::from(a)
        .add(&ProjectivePoint::from(b))
        .to_affine()
}

pub fn neg(p: &Point) -> Point {
    Point {
        x: field().neg(&p.x),
        y: p.y.clone(),
    }
}

pub fn double(p: &Point) -> Point {
    add(p, p)
}

/// Double-and-add; negative scalars multiply the negated point.
pub fn mul_scalar(p: &Point, k: &BigInt) -> Point {
    mul_scalar_projective(&ProjectivePoint::from(p), k).to_affine()
}

pub fn mul_scalar_projective(p: &ProjectivePoint, k: &BigInt) -> ProjectivePoint {
    if k.is_negative() {
        return mul_scalar_projective(&p.neg(), &-k);
    }
    let mut acc = ProjectivePoint::identity();
    let mut exp = p.clone();
    let mut rem = k.clone();
    while !rem.is_zero() {
        if rem.is_odd() {
            acc = acc.add(&exp);
        }
        exp = exp.double();
        rem >>= 1;
    }
    acc
}

pub fn in_curve(p: &Point) -> bool {
    let f = field();
    let x2 = f.square(&p.x);
    let y2 = f.square(&p.y);
    let lhs = f.add(&f.mul(&A, &x2), &y2);
    let rhs = f.add(&BigInt::one(), &f.mul(&D, &f.mul(&x2, &y2)));
    lhs == rhs
}

pub fn in_sub_group(p: &Point) -> bool {
    in_curve(p) && mul_scalar(p, sub_group_order()).is_identity()
}

/// Pack a point into 32 bytes: `y` in the given byte order, with the top bit
/// of the most significant byte carrying the sign of `x`.
pub fn compress(p: &Point, endian: Endian) -> [u8; DIGEST_LEN] {
    let mut out = to_fixed_bytes(&p.y, endian);
    if p.x > *HALF_P {
        let msb = match endian {
            Endian::Little => DIGEST_LEN - 1,
            Endian::Big => 0,
        };
        out[msb] |= 0x80;
    }
    out
}

/// Inverse of [`compress`]: recover `x` from `y` and the sign bit.
pub fn decompress(packed: &[u8; DIGEST_LEN], endian: Endian) -> Result<Point, CurveError> {
    let f = field();
    let mut bytes = *packed;
    let msb = match endian {
        Endian::Little => DIGEST_LEN - 1,
        Endian::Big => 0,
    };
    let sign = bytes[msb] & 0x80 != 0;
    bytes[msb] &= 0x7f;

    let y = decode_int(&bytes, endian);
    if &y >= f.modulus() {
        return Err(CurveError::InvalidEncoding("y coordinate is not canonical"));
    }
    let y2 = f.square(&y);
    let x2 = f
        .div(&f.sub(&BigInt::one(), &y2), &f.sub(&A, &f.mul(&D, &y2)))
        .map_err(|_| CurveError::InvalidEncoding("degenerate y coordinate"))?;
    let mut x = f.sqrt(&x2).map_err(|_| CurveError::NotOnCurve)?;
    if sign != (x > *HALF_P) {
        x = f.neg(&x);
    }
    let p = Point { x, y };
    if !in_curve(&p) {
        return Err(CurveError::NotOnCurve);
    }
    Ok(p)
}
