use thiserror::Error;

/// Domain and construction errors raised by [`crate::field::FieldEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("modulus must be greater than 1, got {0}")]
    InvalidModulus(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("element has no inverse modulo p")]
    NotInvertible,
    #[error("element is not a quadratic residue")]
    NoSquareRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitVecError {
    #[error("bit index {index} out of range for length {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,
    #[error("invalid point encoding: {0}")]
    InvalidEncoding(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("at least one output must be requested")]
    ZeroOutputs,
    #[error("permutation needs at least 2 rounds, got {0}")]
    TooFewRounds(usize),
    #[error("{bits}-bit modulus does not fit a {max}-bit digest")]
    ModulusTooWide { bits: u64, max: u64 },
    #[error(transparent)]
    Curve(#[from] CurveError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    #[error("sampling modulus must be greater than 1")]
    InvalidModulus,
    #[error("entropy source failed: {0}")]
    Source(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Hash(#[from] HashError),
}
