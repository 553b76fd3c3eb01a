//! Field-native hash functions over the BN254 scalar field.

pub mod mimc;
pub mod pedersen;

pub use mimc::{mimc_sponge, MimcSponge, RoundConstants};
pub use pedersen::{pedersen_hash, BasePointTable, PedersenHasher};
