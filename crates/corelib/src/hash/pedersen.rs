//! Pedersen hash over BabyJubJub, compatible with circomlib's `pedersenHash`.
//!
//! The preimage is read as a bit string (least-significant bit of each byte
//! first), cut into 4-bit windows, and the windows grouped into segments of 50.
//! Window `w` of segment `s` with bits `b0 b1 b2 b3` contributes
//! `±(1 + b0 + 2·b1 + 4·b2) · 2^(5w) · G_s`, negative when `b3` is set. The
//! digest is the compressed sum of all contributions.
//!
//! Generators are derived by hashing to the curve:
//! `G_s = 8 · decompress(blake256("PedersenGenerator_" || s || "_" || t))`,
//! for the first attempt `t` that decompresses, with both numbers rendered as
//! 32-digit zero-padded decimals.

use std::sync::{Arc, RwLock};

use num_bigint::BigInt;
use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, trace};

use crate::bitvec::BitVec;
use crate::config::PedersenConfig;
use crate::crypto::blake256::Blake256;
use crate::crypto::hash::hash_one_shot;
use crate::ec::babyjub::{self, Point, ProjectivePoint};
use crate::encoding::{Endian, DIGEST_LEN};
use crate::errors::{CurveError, HashError};

pub const WINDOW_SIZE: usize = 4;
pub const WINDOWS_PER_SEGMENT: usize = 50;
pub const BITS_PER_SEGMENT: usize = WINDOW_SIZE * WINDOWS_PER_SEGMENT;

/// Distinct multiples selectable by a window's three magnitude bits.
const MULTIPLES: usize = 8;

const GENERATOR_PREFIX: &str = "PedersenGenerator";

/// Digest of the identity point, fixed regardless of digest byte order.
pub const IDENTITY_DIGEST: [u8; DIGEST_LEN] = {
    let mut d = [0u8; DIGEST_LEN];
    d[0] = 1;
    d
};

static SHARED_TABLE: Lazy<Arc<BasePointTable>> = Lazy::new(|| Arc::new(BasePointTable::new()));

/// Precomputed multiples for one segment: `windows[w][k] = (k + 1) · 2^(5w) · G_s`.
#[derive(Debug)]
pub struct SegmentTable {
    generator: Point,
    windows: Vec<[ProjectivePoint; MULTIPLES]>,
}

impl SegmentTable {
    fn build(segment: usize) -> Result<Self, CurveError> {
        let generator = derive_generator(segment)?;
        let mut windows = Vec::with_capacity(WINDOWS_PER_SEGMENT);
        let mut base = ProjectivePoint::from(&generator);
        for _ in 0..WINDOWS_PER_SEGMENT {
            let mut acc = base.clone();
            let multiples: [ProjectivePoint; MULTIPLES] = std::array::from_fn(|k| {
                if k > 0 {
                    acc = acc.add(&base);
                }
                acc.clone()
            });
            windows.push(multiples);
            // 2^(WINDOW_SIZE + 1): one spare bit per window keeps windows from overlapping
            for _ in 0..=WINDOW_SIZE {
                base = base.double();
            }
        }
        Ok(Self { generator, windows })
    }

    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// `(magnitude + 1) · 2^(5·window) · G_s`.
    pub fn multiple(&self, window: usize, magnitude: usize) -> &ProjectivePoint {
        &self.windows[window][magnitude]
    }
}

/// Lazily grown, process-shareable cache of per-segment tables.
///
/// Each segment is computed at most once, even under concurrent first use:
/// the slot is created under the lock and filled outside it.
#[derive(Debug, Default)]
pub struct BasePointTable {
    segments: RwLock<Vec<Arc<OnceCell<Arc<SegmentTable>>>>>,
}

impl BasePointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table shared by every hasher built with [`PedersenHasher::with_config`].
    pub fn shared() -> Arc<BasePointTable> {
        Arc::clone(&SHARED_TABLE)
    }

    /// Number of segments whose table has been computed.
    pub fn cached_segments(&self) -> usize {
        self.segments
            .read()
            .expect("poisoned pedersen table")
            .iter()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    pub fn segment(&self, segment: usize) -> Result<Arc<SegmentTable>, CurveError> {
        let cell = self.slot(segment);
        cell.get_or_try_init(|| SegmentTable::build(segment).map(Arc::new))
            .map(Arc::clone)
    }

    fn slot(&self, segment: usize) -> Arc<OnceCell<Arc<SegmentTable>>> {
        if let Some(cell) = self
            .segments
            .read()
            .expect("poisoned pedersen table")
            .get(segment)
        {
            return Arc::clone(cell);
        }
        let mut guard = self.segments.write().expect("poisoned pedersen table");
        while guard.len() <= segment {
            guard.push(Arc::new(OnceCell::new()));
        }
        Arc::clone(&guard[segment])
    }
}

fn generator_label(segment: usize, attempt: u64) -> String {
    format!("{GENERATOR_PREFIX}_{segment:032}_{attempt:032}")
}

fn derive_generator(segment: usize) -> Result<Point, CurveError> {
    let mut attempt = 0u64;
    let point = loop {
        let mut digest = hash_one_shot::<Blake256>(generator_label(segment, attempt).as_bytes());
        // clear bit 254 so the candidate y stays below 2^254; bit 255 is the x sign
        digest[31] &= 0xbf;
        attempt += 1;
        if let Ok(p) = babyjub::decompress(&digest, Endian::Little) {
            break p;
        }
    };
    let p8 = babyjub::mul_scalar(&point, &BigInt::from(8u32));
    if !babyjub::in_sub_group(&p8) {
        return Err(CurveError::NotInSubgroup);
    }
    debug!(segment, attempts = attempt, "derived pedersen generator");
    Ok(p8)
}

#[derive(Debug, Clone)]
pub struct PedersenHasher {
    table: Arc<BasePointTable>,
    config: PedersenConfig,
}

impl Default for PedersenHasher {
    fn default() -> Self {
        Self::with_config(PedersenConfig::default())
    }
}

impl PedersenHasher {
    pub fn new(table: Arc<BasePointTable>, config: PedersenConfig) -> Self {
        Self { table, config }
    }

    pub fn with_config(config: PedersenConfig) -> Self {
        Self::new(BasePointTable::shared(), config)
    }

    pub fn config(&self) -> &PedersenConfig {
        &self.config
    }

    /// The accumulated curve point; the identity for an empty preimage.
    pub fn hash_point(&self, preimage: &[u8]) -> Result<Point, HashError> {
        let bits = BitVec::from_bytes_lsb_first(preimage);
        trace!(bytes = preimage.len(), bits = bits.size(), "pedersen hash");

        let mut acc = ProjectivePoint::identity();
        let segments = bits.size().div_ceil(BITS_PER_SEGMENT);
        for s in 0..segments {
            let table = self.table.segment(s)?;
            let start = s * BITS_PER_SEGMENT;
            let windows = (bits.size() - start)
                .min(BITS_PER_SEGMENT)
                .div_ceil(WINDOW_SIZE);
            for w in 0..windows {
                let offset = start + w * WINDOW_SIZE;
                let magnitude = (0..WINDOW_SIZE - 1)
                    .filter(|b| bits.get_or_zero(offset + b))
                    .fold(0usize, |m, b| m | (1 << b));
                let negative = bits.get_or_zero(offset + WINDOW_SIZE - 1);
                let contribution = table.multiple(w, magnitude);
                acc = if negative {
                    acc.add(&contribution.neg())
                } else {
                    acc.add(contribution)
                };
            }
        }
        Ok(acc.to_affine())
    }

    /// 32-byte compressed digest. The identity (empty preimage) always yields
    /// [`IDENTITY_DIGEST`]; every other point follows the configured byte order.
    pub fn hash(&self, preimage: &[u8]) -> Result<[u8; DIGEST_LEN], HashError> {
        let point = self.hash_point(preimage)?;
        if point.is_identity() {
            return Ok(IDENTITY_DIGEST);
        }
        Ok(babyjub::compress(&point, self.config.digest_endian))
    }
}

/// One-shot hash with the shared table and little-endian digest.
pub fn pedersen_hash(preimage: &[u8]) -> Result<[u8; DIGEST_LEN], HashError> {
    PedersenHasher::default().hash(preimage)
}
