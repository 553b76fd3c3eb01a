//! Append-only bit vector backed by packed bytes.
//!
//! Bits are packed most-significant-bit first in push order: the first pushed
//! bit lands in bit 7 of byte 0, the ninth in bit 7 of byte 1.

use crate::errors::BitVecError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitVec {
    bytes: Vec<u8>,
    size: usize,
}

impl BitVec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `bits` pushes up front.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            size: 0,
        }
    }

    /// Decode a byte string into bits, least-significant bit of each byte first.
    ///
    /// This is the preimage order used by the Pedersen hash: byte 0 bit 0,
    /// byte 0 bit 1, ..., byte 1 bit 0, ...
    pub fn from_bytes_lsb_first(data: &[u8]) -> Self {
        let mut bits = Self::with_capacity(data.len() * 8);
        for byte in data {
            for shift in 0..8 {
                bits.push((byte >> shift) & 1 == 1);
            }
        }
        bits
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.size % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            // size / 8 always indexes the byte opened above
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.size += 1;
    }

    /// Total number of pushed bits.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn at(&self, index: usize) -> Result<bool, BitVecError> {
        if index >= self.size {
            return Err(BitVecError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Bit at `index`, or `false` past the end. Used for implicit zero padding.
    pub(crate) fn get_or_zero(&self, index: usize) -> bool {
        self.at(index).unwrap_or(false)
    }

    /// Packed storage; unused trailing bits of the last byte are zero.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |i| self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
    }
}

impl Extend<bool> for BitVec {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitVec::new();
        bits.extend(iter);
        bits
    }
}
