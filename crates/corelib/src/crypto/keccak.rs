//! Keccak-256 with the original (pre-FIPS) padding, as Ethereum and circomlib use it.
//! Seeds the MiMC round-constant chain.

use tiny_keccak::{Hasher, Keccak};

use crate::crypto::hash::Hash32;

#[derive(Clone)]
pub struct Keccak256(Keccak);

impl Default for Keccak256 {
    fn default() -> Self {
        Self(Keccak::v256())
    }
}

impl Hash32 for Keccak256 {
    fn new() -> Self {
        Self::default()
    }

    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.finalize(&mut out);
        out
    }
}
