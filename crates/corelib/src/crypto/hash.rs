//! Generic hash trait and helpers.

/// A streaming hash with fixed-size 32-byte digests.
/// Implemented by the byte-oriented primitives the field hashes are seeded
/// from: Keccak-256 for sponge round constants, BLAKE-256 for Pedersen base points.
pub trait Hash32 {
    /// Create a new hasher.
    fn new() -> Self
    where
        Self: Sized;
    /// Absorb bytes into the state.
    fn update(&mut self, data: &[u8]);
    /// Finalize and produce a 32-byte digest.
    fn finalize(self) -> [u8; 32];
}

/// Compute one-shot hash.
pub fn hash_one_shot<H: Hash32>(data: &[u8]) -> [u8; 32] {
    let mut h = H::new();
    h.update(data);
    h.finalize()
}

/// Domain-separated hashing: H(label || data)
pub fn hash_labeled<H: Hash32>(label: &str, data: &[u8]) -> [u8; 32] {
    let mut h = H::new();
    h.update(label.as_bytes());
    h.update(data);
    h.finalize()
}

/// Iterated hashing: `H(H(...H(seed)))`, `rounds` applications, each round
/// hashing the previous 32-byte digest.
pub fn hash_chain<H: Hash32>(seed: &[u8], rounds: usize) -> impl Iterator<Item = [u8; 32]> {
    let first = hash_one_shot::<H>(seed);
    std::iter::successors(Some(first), |prev| Some(hash_one_shot::<H>(prev))).take(rounds)
}
