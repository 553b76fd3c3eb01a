//! MiMC sponge over a Feistel permutation, compatible with circomlib's `MiMCSponge`.
//!
//! The state is a pair of field elements `(xL, xR)`, initially `(0, 0)`.
//! Each input is added into `xL` and the pair is permuted; digests are read
//! from `xL`, permuting again between consecutive digests.
//!
//! The permutation runs `R` rounds of `t = xL + k + c_i`, `(xL, xR) = (xR + t^5, xL)`,
//! except the last round, which adds into `xR` without swapping. `c_0` and
//! `c_{R-1}` are zero; the others are an iterated Keccak-256 chain of the seed
//! reduced into the field.

use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::Zero;
use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::config::SpongeConfig;
use crate::crypto::hash::hash_chain;
use crate::crypto::keccak::Keccak256;
use crate::encoding::{decode_int, to_fixed_bytes, Endian, DIGEST_LEN};
use crate::errors::HashError;
use crate::field::FieldEngine;

/// Rounds of the circomlib permutation.
pub const ROUNDS: usize = 220;

/// Seed of the round-constant chain.
pub const CONSTANT_SEED: &str = "mimcsponge";

static DEFAULT_CONSTANTS: Lazy<Arc<RoundConstants>> = Lazy::new(|| {
    Arc::new(RoundConstants::build(
        FieldEngine::bn254().clone(),
        CONSTANT_SEED.as_bytes(),
        ROUNDS,
    ))
});

/// Public round constants of the permutation, bound to the field they live in.
#[derive(Debug, Clone)]
pub struct RoundConstants {
    field: FieldEngine,
    values: Vec<BigInt>,
}

impl RoundConstants {
    /// Constants for an arbitrary field, seed and round count (at least 2).
    /// The fifth-power S-box only permutes the field when `gcd(5, p - 1) == 1`,
    /// and the modulus must fit a 32-byte digest.
    pub fn generate(field: FieldEngine, seed: &[u8], rounds: usize) -> Result<Self, HashError> {
        check_params(&field, rounds)?;
        Ok(Self::build(field, seed, rounds))
    }

    /// Constants from an explicit list; the first and last entries are used as given.
    pub fn from_values(field: FieldEngine, values: Vec<BigInt>) -> Result<Self, HashError> {
        check_params(&field, values.len())?;
        let values = values.iter().map(|v| field.mod_reduce(v)).collect();
        Ok(Self { field, values })
    }

    /// circomlib's table over BN254, computed once per process.
    pub fn shared() -> Arc<RoundConstants> {
        Arc::clone(&DEFAULT_CONSTANTS)
    }

    fn build(field: FieldEngine, seed: &[u8], rounds: usize) -> Self {
        let mut values = Vec::with_capacity(rounds);
        values.push(BigInt::zero());
        // the seed digest itself is skipped; c_1 = keccak(keccak(seed))
        values.extend(
            hash_chain::<Keccak256>(seed, rounds - 1)
                .skip(1)
                .map(|digest| field.from_bytes(&digest, Endian::Big)),
        );
        values.push(BigInt::zero());
        debug!(rounds, modulus = %field.modulus(), "generated mimc round constants");
        Self { field, values }
    }

    pub fn field(&self) -> &FieldEngine {
        &self.field
    }

    pub fn rounds(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[BigInt] {
        &self.values
    }

    /// One application of the keyed Feistel permutation.
    pub fn permute(&self, mut xl: BigInt, mut xr: BigInt, key: &BigInt) -> (BigInt, BigInt) {
        let f = &self.field;
        let last = self.values.len() - 1;
        for (i, c) in self.values.iter().enumerate() {
            let t = f.add(&f.add(&xl, key), c);
            let t2 = f.square(&t);
            let t5 = f.mul(&f.square(&t2), &t);
            if i < last {
                let next = f.add(&xr, &t5);
                xr = std::mem::replace(&mut xl, next);
            } else {
                xr = f.add(&xr, &t5);
            }
        }
        (xl, xr)
    }
}

fn check_params(field: &FieldEngine, rounds: usize) -> Result<(), HashError> {
    if rounds < 2 {
        return Err(HashError::TooFewRounds(rounds));
    }
    let bits = field.modulus().bits();
    let max = (DIGEST_LEN * 8) as u64;
    // every canonical element is below p, so p itself may reach 2^256 - 1
    if bits > max {
        return Err(HashError::ModulusTooWide { bits, max });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct MimcSponge {
    constants: Arc<RoundConstants>,
    config: SpongeConfig,
    key: BigInt,
}

impl MimcSponge {
    pub fn new(constants: Arc<RoundConstants>, config: SpongeConfig) -> Result<Self, HashError> {
        config.validate()?;
        let key = constants
            .field()
            .mod_reduce(&decode_int(&config.key, config.key_endian));
        Ok(Self {
            constants,
            config,
            key,
        })
    }

    /// Sponge over the shared BN254 constants.
    pub fn with_config(config: SpongeConfig) -> Result<Self, HashError> {
        Self::new(RoundConstants::shared(), config)
    }

    pub fn config(&self) -> &SpongeConfig {
        &self.config
    }

    /// Hash byte-string preimages into exactly `config.outputs` digests.
    pub fn hash<T: AsRef<[u8]>>(&self, preimages: &[T]) -> Vec<[u8; DIGEST_LEN]> {
        let field = self.constants.field();
        let inputs: Vec<BigInt> = preimages
            .iter()
            .map(|p| field.from_bytes(p.as_ref(), self.config.preimage_endian))
            .collect();
        self.hash_elements(&inputs)
            .iter()
            .map(|d| to_fixed_bytes(d, self.config.digest_endian))
            .collect()
    }

    /// Same as [`MimcSponge::hash`] for callers already holding field elements.
    /// Inputs are reduced; outputs are canonical.
    pub fn hash_elements(&self, inputs: &[BigInt]) -> Vec<BigInt> {
        let field = self.constants.field();
        let outputs = self.config.outputs;
        trace!(inputs = inputs.len(), outputs, "mimc sponge");

        let mut xl = BigInt::zero();
        let mut xr = BigInt::zero();
        for x in inputs {
            xl = field.add(&xl, x);
            (xl, xr) = self.constants.permute(xl, xr, &self.key);
        }
        if inputs.is_empty() {
            // nothing absorbed: the first digest comes from permuting the initial state
            (xl, xr) = self.constants.permute(xl, xr, &self.key);
        }

        let mut digests = Vec::with_capacity(outputs);
        digests.push(xl.clone());
        while digests.len() < outputs {
            (xl, xr) = self.constants.permute(xl, xr, &self.key);
            digests.push(xl.clone());
        }
        digests
    }
}

/// One-shot sponge with circomlib defaults: BN254, big-endian everywhere.
pub fn mimc_sponge<T: AsRef<[u8]>>(
    preimages: &[T],
    outputs: usize,
    key: &[u8],
) -> Result<Vec<[u8; DIGEST_LEN]>, HashError> {
    let sponge = MimcSponge::with_config(SpongeConfig::new(outputs).with_key(key))?;
    Ok(sponge.hash(preimages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_shape() {
        let c = RoundConstants::shared();
        assert_eq!(c.rounds(), ROUNDS);
        assert!(c.values()[0].is_zero());
        assert!(c.values()[ROUNDS - 1].is_zero());
        assert!(c.values()[1..ROUNDS - 1].iter().all(|v| !v.is_zero()));
        assert_eq!(
            c.values()[1].to_string(),
            "7120861356467848435263064379192047478074060781135320967663101236819528304084"
        );
        assert!(Arc::ptr_eq(&c, &RoundConstants::shared()));
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let field = FieldEngine::new(11).unwrap();
        assert_eq!(
            RoundConstants::generate(field.clone(), b"seed", 1).unwrap_err(),
            HashError::TooFewRounds(1)
        );
        assert_eq!(
            MimcSponge::with_config(SpongeConfig::new(0)).unwrap_err(),
            HashError::ZeroOutputs
        );
    }

    #[test]
    fn rejects_moduli_wider_than_a_digest() {
        // 2^521 - 1
        let wide = FieldEngine::new((BigInt::from(1) << 521) - 1).unwrap();
        assert_eq!(
            RoundConstants::generate(wide.clone(), b"seed", 4).unwrap_err(),
            HashError::ModulusTooWide { bits: 521, max: 256 }
        );
        assert_eq!(
            RoundConstants::from_values(wide, vec![BigInt::from(0); 4]).unwrap_err(),
            HashError::ModulusTooWide { bits: 521, max: 256 }
        );
    }

    #[test]
    fn digests_decode_back_at_the_width_limit() {
        // 2^255 - 19: the widest common prime still below 2^256
        let field = FieldEngine::new((BigInt::from(1) << 255) - 19).unwrap();
        let constants = Arc::new(RoundConstants::generate(field, b"seed", 4).unwrap());
        let sponge = MimcSponge::new(constants, SpongeConfig::new(2)).unwrap();
        let elements = sponge.hash_elements(&[BigInt::from(7)]);
        let digests = sponge.hash(&[[0x07u8]]);
        for (digest, element) in digests.iter().zip(&elements) {
            assert_eq!(&decode_int(digest, Endian::Big), element);
        }
    }

    #[test]
    fn known_vector_first_output() {
        let digests = mimc_sponge(&[[0x01u8], [0x02u8]], 1, &[]).unwrap();
        assert_eq!(
            hex::encode(digests[0]),
            "2bcea035a1251603f1ceaf73cd4ae89427c47075bb8e3a944039ff1e3d6d2a6f"
        );
    }

    #[test]
    fn works_over_a_small_field() {
        // 5 is coprime to 10 = 11 - 1, so x^5 permutes GF(11)
        let field = FieldEngine::new(11).unwrap();
        let constants = Arc::new(RoundConstants::generate(field, b"seed", 8).unwrap());
        let sponge = MimcSponge::new(constants, SpongeConfig::new(4).with_key([0x03])).unwrap();
        let a = sponge.hash_elements(&[BigInt::from(3), BigInt::from(25)]);
        let b = sponge.hash_elements(&[BigInt::from(3), BigInt::from(3)]);
        assert_eq!(a.len(), 4);
        // 25 ≡ 3 (mod 11)
        assert_eq!(a, b);
        assert!(a.iter().all(|v| v < &BigInt::from(11)));
    }

    #[test]
    fn empty_preimage_list_still_squeezes() {
        let sponge = MimcSponge::with_config(SpongeConfig::new(2)).unwrap();
        let empty = sponge.hash::<&[u8]>(&[]);
        assert_eq!(empty.len(), 2);
        // absorbing a single zero permutes the same initial state
        assert_eq!(empty, sponge.hash(&[[0u8]]));
    }
}
