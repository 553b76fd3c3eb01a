use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use num_bigint::BigInt;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zkhash_core as core;
use zkhash_core::crypto::registry::{hash32_by_id, SUPPORTED_HASH_IDS};
use zkhash_core::{Endian, FieldEngine, HashConfig, MimcSponge, PedersenHasher};

#[derive(Parser)]
#[command(name = "zkhash", version, about = "Field arithmetic and circuit-compatible hashes")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// TOML file with [sponge] / [pedersen] defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// MiMC sponge over BN254 (circomlib MiMCSponge)
    Mimc {
        /// Preimages as hex strings
        preimages: Vec<String>,
        /// Number of digests to squeeze
        #[arg(short = 'n', long)]
        outputs: Option<usize>,
        /// Key as hex
        #[arg(short, long)]
        key: Option<String>,
        #[arg(long)]
        preimage_endian: Option<Endian>,
        #[arg(long)]
        key_endian: Option<Endian>,
        #[arg(long)]
        digest_endian: Option<Endian>,
    },
    /// Pedersen hash over BabyJubJub (circomlib pedersenHash)
    Pedersen {
        /// Preimage as hex; omit for the empty preimage
        preimage: Option<String>,
        #[arg(long)]
        digest_endian: Option<Endian>,
    },
    /// Fixed-size byte hash (keccak256, blake256)
    Digest {
        #[arg(long, default_value = "keccak256")]
        hash: String,
        /// Domain-separation label prepended to the data
        #[arg(long, default_value = "")]
        label: String,
        /// Data as hex
        data: String,
    },
    /// Modular arithmetic on decimal integers
    Field {
        /// Prime modulus in decimal; defaults to the BN254 scalar field
        #[arg(short, long, allow_hyphen_values = true)]
        modulus: Option<BigInt>,
        #[command(subcommand)]
        op: FieldOp,
    },
}

#[derive(Subcommand)]
enum FieldOp {
    /// Canonical residue of A
    Reduce {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
    },
    Add {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
        #[arg(allow_negative_numbers = true)]
        b: BigInt,
    },
    Sub {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
        #[arg(allow_negative_numbers = true)]
        b: BigInt,
    },
    Mul {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
        #[arg(allow_negative_numbers = true)]
        b: BigInt,
    },
    Div {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
        #[arg(allow_negative_numbers = true)]
        b: BigInt,
    },
    Neg {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
    },
    /// Multiplicative inverse of A
    Inv {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
    },
    /// BASE^EXP; a negative EXP inverts BASE first
    Pow {
        #[arg(allow_negative_numbers = true)]
        base: BigInt,
        #[arg(allow_negative_numbers = true)]
        exp: BigInt,
    },
    Sqrt {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
    },
    /// Legendre symbol of A: 0, 1 or -1
    Legendre {
        #[arg(allow_negative_numbers = true)]
        a: BigInt,
    },
}

#[derive(Serialize)]
struct DigestsOut {
    digests: Vec<String>,
}

#[derive(Serialize)]
struct ValueOut {
    value: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).with_context(|| format!("decoding hex '{s}'"))
}

fn load_config(path: Option<&PathBuf>) -> Result<HashConfig> {
    let Some(path) = path else {
        return Ok(HashConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = HashConfig::from_toml_str(&s)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

fn emit_digests(json: bool, digests: &[[u8; core::DIGEST_LEN]]) -> Result<()> {
    let digests: Vec<String> = digests.iter().map(hex::encode).collect();
    if json {
        println!("{}", serde_json::to_string(&DigestsOut { digests })?);
    } else {
        for d in digests {
            println!("{d}");
        }
    }
    Ok(())
}

fn emit_value(json: bool, value: String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&ValueOut { value })?);
    } else {
        println!("{value}");
    }
    Ok(())
}

fn run_field(engine: &FieldEngine, op: FieldOp) -> Result<String> {
    let value = match op {
        FieldOp::Reduce { a } => engine.mod_reduce(&a).to_string(),
        FieldOp::Add { a, b } => engine.add(&a, &b).to_string(),
        FieldOp::Sub { a, b } => engine.sub(&a, &b).to_string(),
        FieldOp::Mul { a, b } => engine.mul(&a, &b).to_string(),
        FieldOp::Div { a, b } => engine.div(&a, &b)?.to_string(),
        FieldOp::Neg { a } => engine.neg(&a).to_string(),
        FieldOp::Inv { a } => engine.mod_inv(&a)?.to_string(),
        FieldOp::Pow { base, exp } => engine.pow(&base, &exp)?.to_string(),
        FieldOp::Sqrt { a } => engine.sqrt(&a)?.to_string(),
        FieldOp::Legendre { a } => engine.legendre(&a).to_string(),
    };
    Ok(value)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    match cli.command {
        Some(Commands::Mimc {
            preimages,
            outputs,
            key,
            preimage_endian,
            key_endian,
            digest_endian,
        }) => {
            let mut sponge = config.sponge;
            if let Some(n) = outputs {
                sponge.outputs = n;
            }
            if let Some(k) = key {
                sponge.key = decode_hex(&k)?;
            }
            sponge.preimage_endian = preimage_endian.unwrap_or(sponge.preimage_endian);
            sponge.key_endian = key_endian.unwrap_or(sponge.key_endian);
            sponge.digest_endian = digest_endian.unwrap_or(sponge.digest_endian);
            let preimages = preimages
                .iter()
                .map(|p| decode_hex(p))
                .collect::<Result<Vec<_>>>()?;
            let hasher = MimcSponge::with_config(sponge)?;
            emit_digests(cli.json, &hasher.hash(&preimages))?;
        }
        Some(Commands::Pedersen {
            preimage,
            digest_endian,
        }) => {
            let mut pedersen = config.pedersen;
            pedersen.digest_endian = digest_endian.unwrap_or(pedersen.digest_endian);
            let preimage = match preimage {
                Some(p) => decode_hex(&p)?,
                None => Vec::new(),
            };
            let digest = PedersenHasher::with_config(pedersen).hash(&preimage)?;
            emit_digests(cli.json, &[digest])?;
        }
        Some(Commands::Digest { hash, label, data }) => {
            let data = decode_hex(&data)?;
            let digest = hash32_by_id(&hash, &label, &data).ok_or_else(|| {
                anyhow!(
                    "unsupported hash '{hash}' (supported: {})",
                    SUPPORTED_HASH_IDS.join(", ")
                )
            })?;
            emit_digests(cli.json, &[digest])?;
        }
        Some(Commands::Field { modulus, op }) => {
            let engine = match modulus {
                Some(p) => FieldEngine::new(p)?,
                None => FieldEngine::bn254().clone(),
            };
            emit_value(cli.json, run_field(&engine, op)?)?;
        }
        None => {
            println!("zkhash {} — ready", core::version());
            println!("Try: `zkhash mimc 01 02 -n 3` or `zkhash pedersen 0101`");
        }
    }
    Ok(())
}
