use serde::{Deserialize, Serialize};

use crate::encoding::Endian;
use crate::errors::{ConfigError, HashError};

/// Parameters of one MiMC sponge invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SpongeConfig {
    pub outputs: usize,             // number of 32-byte digests to squeeze, >= 1
    #[serde(with = "hex::serde")]
    pub key: Vec<u8>,               // hex in TOML/JSON; empty means key 0
    pub preimage_endian: Endian,
    pub key_endian: Endian,
    pub digest_endian: Endian,
}

impl Default for SpongeConfig {
    fn default() -> Self {
        Self {
            outputs: 1,
            key: Vec::new(),
            preimage_endian: Endian::Big,
            key_endian: Endian::Big,
            digest_endian: Endian::Big,
        }
    }
}

impl SpongeConfig {
    pub fn new(outputs: usize) -> Self {
        Self {
            outputs,
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_endian(mut self, preimage: Endian, key: Endian, digest: Endian) -> Self {
        self.preimage_endian = preimage;
        self.key_endian = key;
        self.digest_endian = digest;
        self
    }

    pub fn validate(&self) -> Result<(), HashError> {
        if self.outputs == 0 {
            return Err(HashError::ZeroOutputs);
        }
        Ok(())
    }
}

/// Parameters of the Pedersen hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PedersenConfig {
    pub digest_endian: Endian,
}

impl Default for PedersenConfig {
    fn default() -> Self {
        Self {
            digest_endian: Endian::Little,
        }
    }
}

/// File-level configuration, e.g.
///
/// ```toml
/// [sponge]
/// outputs = 3
/// key = "09"
///
/// [pedersen]
/// digest_endian = "le"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HashConfig {
    pub sponge: SpongeConfig,
    pub pedersen: PedersenConfig,
}

impl HashConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.sponge.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.sponge.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = HashConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, HashConfig::default());
        assert_eq!(cfg.sponge.digest_endian, Endian::Big);
        assert_eq!(cfg.pedersen.digest_endian, Endian::Little);
    }

    #[test]
    fn toml_overrides() {
        let cfg = HashConfig::from_toml_str(
            r#"
            [sponge]
            outputs = 3
            key = "09"
            digest_endian = "le"

            [pedersen]
            digest_endian = "be"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sponge.outputs, 3);
        assert_eq!(cfg.sponge.key, vec![0x09]);
        assert_eq!(cfg.sponge.digest_endian, Endian::Little);
        assert_eq!(cfg.sponge.preimage_endian, Endian::Big);
        assert_eq!(cfg.pedersen.digest_endian, Endian::Big);
    }

    #[test]
    fn zero_outputs_rejected() {
        let err = HashConfig::from_json_str(r#"{"sponge": {"outputs": 0}}"#).unwrap_err();
        assert_eq!(err, ConfigError::Hash(HashError::ZeroOutputs));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(
            HashConfig::from_toml_str("[sponge]\nrounds = 3\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
