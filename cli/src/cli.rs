//! # CLI Interface
//!
//! Command-line arguments for `gxc-cli`, defined with `clap` derive.
//! Transactions are read as structured JSON from a file or stdin.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use gxc_protocol::config::{chain_id_for_network, MAX_SIGNING_ATTEMPTS};
use gxc_protocol::transaction::ChainId;

/// Offline signing and inspection of GXChain transactions.
#[derive(Parser, Debug)]
#[command(
    name = "gxc-cli",
    about = "Offline signing and inspection of GXChain transactions",
    version,
    propagate_version = true
)]
pub struct GxcCli {
    /// Log format on stderr: `pretty` or `json`.
    #[arg(long, global = true, env = "GXC_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign an unsigned transaction and print the signed JSON and its txid.
    Sign(SignArgs),
    /// Print the canonical signing payload as hex.
    Encode(PayloadArgs),
    /// Print the transaction id.
    Txid(PayloadArgs),
    /// Decode a transaction and report anything that had to be skipped.
    Decode(InputArgs),
    /// Generate a fresh key pair.
    Keygen,
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Transaction JSON file, or `-` for stdin.
    #[arg(long, short = 'i', default_value = "-")]
    pub input: PathBuf,
}

impl InputArgs {
    pub fn read_json(&self) -> Result<serde_json::Value> {
        let text = if self.input.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transaction from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.input)
                .with_context(|| format!("failed to read {}", self.input.display()))?
        };
        serde_json::from_str(&text).context("transaction is not valid JSON")
    }
}

#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Hex chain id. Takes precedence over `--network`.
    #[arg(long, env = "GXC_CHAIN_ID")]
    pub chain_id: Option<String>,

    /// Named network whose chain id to use.
    #[arg(long, default_value = "mainnet")]
    pub network: String,
}

impl ChainArgs {
    pub fn resolve(&self) -> Result<ChainId> {
        let hex_id = match &self.chain_id {
            Some(id) => id.as_str(),
            None => chain_id_for_network(&self.network)
                .ok_or_else(|| anyhow!("unknown network `{}`; pass --chain-id", self.network))?,
        };
        hex_id
            .parse::<ChainId>()
            .with_context(|| format!("invalid chain id `{hex_id}`"))
    }
}

#[derive(Args, Debug)]
pub struct PayloadArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub chain: ChainArgs,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub chain: ChainArgs,

    /// Hex-encoded 32-byte secp256k1 secret.
    #[arg(long, env = "GXC_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Expiration bumps to try before giving up.
    #[arg(long, default_value_t = MAX_SIGNING_ATTEMPTS)]
    pub max_attempts: u32,
}
