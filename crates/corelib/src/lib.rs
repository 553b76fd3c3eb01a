//! Core library: prime-field arithmetic and circuit-compatible hashes.
//!
//! - [`field::FieldEngine`]: arithmetic modulo an arbitrary prime.
//! - [`hash::mimc`]: keyed MiMC-Feistel sponge (circomlib `MiMCSponge`).
//! - [`hash::pedersen`]: windowed Pedersen hash over BabyJubJub (circomlib `pedersenHash`).
//!
//! Digests are bit-for-bit identical to the circuit implementations, so values
//! computed here can be fed to proofs as public inputs.

pub mod bitvec;
pub mod config;
pub mod crypto;
pub mod ec;
pub mod encoding;
pub mod errors;
pub mod field;
pub mod hash;
pub mod random;

pub use bitvec::BitVec;
pub use config::{HashConfig, PedersenConfig, SpongeConfig};
pub use encoding::{Endian, DIGEST_LEN};
pub use errors::{BitVecError, ConfigError, CurveError, FieldError, HashError, RandomError};
pub use field::FieldEngine;
pub use hash::{mimc_sponge, pedersen_hash, MimcSponge, PedersenHasher};

/// Version helper for CLI
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
