//! Elliptic curves over the BN254 scalar field.

pub mod babyjub;

pub use babyjub::Point;
