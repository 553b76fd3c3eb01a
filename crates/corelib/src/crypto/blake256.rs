//! BLAKE-256 (the SHA-3 finalist, not BLAKE2s) as Hash32.
//! Only used to derive Pedersen generators, so it must match the reference
//! digests bit for bit.

use crate::crypto::hash::Hash32;
use blake_hash::Digest;

pub struct Blake256 {
    inner: blake_hash::Blake256,
}

impl Hash32 for Blake256 {
    fn new() -> Self {
        Self {
            inner: <blake_hash::Blake256 as Digest>::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&Digest::finalize(self.inner));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::hash_one_shot;

    fn digest_hex(data: &[u8]) -> String {
        hex::encode(hash_one_shot::<Blake256>(data))
    }

    #[test]
    fn single_byte_vectors() {
        assert_eq!(
            digest_hex(&[0x00]),
            "0ce8d4ef4dd7cd8d62dfded9d4edb0a774ae6a41929a74da23109e8f11139c87"
        );
        assert_eq!(
            digest_hex(&[0xaa]),
            "2057dc48805e7e0a1140f2a80e72d58dd9607dfeffcb0159b98658fc15322c1e"
        );
    }

    #[test]
    fn padding_boundaries() {
        // 55 bytes leaves room for exactly one padding byte
        assert_eq!(
            digest_hex(&[0xaa; 55]),
            "2cd6a7d2bc557e771cc7b482f987cb18ffd5d2d19cf444ff03f1fcc736da44a4"
        );
        assert_eq!(
            digest_hex(&[0xaa; 64]),
            "00bb5fa2cd91c47bb8bfaf8f8489a2603d7b7d7291894d476d4858961436ae9a"
        );
        assert_eq!(
            digest_hex(&[0x00; 100]),
            "db10fa7d8a13c4bb74729474485366132da7e221ec651f57a3b7fc3258af9696"
        );
    }
}
