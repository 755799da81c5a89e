// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # GXC CLI
//!
//! Entry point for the `gxc-cli` binary: offline signing and inspection of
//! GXChain transactions in their structured JSON form.
//!
//! - `sign`    — sign an unsigned transaction
//! - `encode`  — print the canonical signing payload
//! - `txid`    — print the transaction id
//! - `decode`  — summarize a transaction and what decoding skipped
//! - `keygen`  — generate a key pair
//! - `version` — print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use gxc_protocol::crypto::PrivateKey;
use gxc_protocol::transaction::Transaction;

use cli::{Commands, GxcCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = GxcCli::parse();
    logging::init_logging(
        logging::DEFAULT_DIRECTIVES,
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Sign(args) => sign(args),
        Commands::Encode(args) => encode(args),
        Commands::Txid(args) => txid(args),
        Commands::Decode(args) => decode(args),
        Commands::Keygen => keygen(),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Decodes the input and attaches the resolved chain id.
fn load(input: &cli::InputArgs, chain: &cli::ChainArgs) -> Result<Transaction> {
    let value = input.read_json()?;
    let (mut tx, report) =
        Transaction::from_structured(&value).context("failed to decode transaction")?;
    if !report.is_clean() {
        tracing::warn!(
            skipped_operations = report.skipped_operations,
            malformed_signatures = report.malformed_signatures,
            dropped_signatures = report.dropped_signatures,
            "transaction decoded with omissions"
        );
    }
    tx.set_chain_id(chain.resolve()?);
    Ok(tx)
}

fn sign(args: cli::SignArgs) -> Result<()> {
    let mut tx = load(&args.input, &args.chain)?;
    let key = PrivateKey::from_hex(&args.private_key).context("invalid private key")?;
    tx.set_private_key(key);
    tx.set_max_signing_attempts(args.max_attempts);

    let signed = tx.to_structured().context("signing failed")?;
    let txid = tx.calculate_txid()?;
    tracing::info!(
        txid = %txid,
        expiration = %tx.block_data().expiration_text(),
        "transaction signed"
    );

    print_json(&json!({ "txid": txid, "transaction": signed }))
}

fn encode(args: cli::PayloadArgs) -> Result<()> {
    let tx = load(&args.input, &args.chain)?;
    let bytes = tx.to_bytes().context("failed to encode transaction")?;
    println!("{}", hex::encode(bytes));
    Ok(())
}

fn txid(args: cli::PayloadArgs) -> Result<()> {
    let tx = load(&args.input, &args.chain)?;
    println!("{}", tx.calculate_txid()?);
    Ok(())
}

fn decode(args: cli::InputArgs) -> Result<()> {
    let value = args.read_json()?;
    let (tx, report) =
        Transaction::from_structured(&value).context("failed to decode transaction")?;

    let operations: Vec<Value> = tx
        .operations()
        .iter()
        .map(|op| json!({ "type": op.op_type().to_string(), "tag": op.op_type().code() }))
        .collect();
    let block = tx.block_data();

    print_json(&json!({
        "ref_block_num": block.ref_block_num,
        "ref_block_prefix": block.ref_block_prefix,
        "expiration": block.expiration_text(),
        "operations": operations,
        "signed": tx.is_signed(),
        "signature": tx.signature_hex(),
        "report": {
            "skipped_operations": report.skipped_operations,
            "malformed_signatures": report.malformed_signatures,
            "dropped_signatures": report.dropped_signatures,
        },
    }))
}

fn keygen() -> Result<()> {
    let key = PrivateKey::generate();
    let public_key = key.public_key();
    tracing::info!(public_key = %public_key, "key pair generated");

    print_json(&json!({
        "private_key": hex::encode(key.to_bytes()),
        "public_key": public_key.to_string(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
    }))
}

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{text}");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("gxc-cli   {}", env!("CARGO_PKG_VERSION"));
    println!("prefix    {}", gxc_protocol::config::ADDRESS_PREFIX);
    println!("rustc     {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
