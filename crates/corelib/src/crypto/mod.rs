//! Byte-oriented hash primitives the field hashes are seeded from.

pub mod blake256;
pub mod hash;
pub mod keccak;
pub mod registry;
