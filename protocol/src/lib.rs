// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # GXC Protocol — Core Library
//!
//! Client-side transaction core for GXChain, a Graphene-family chain:
//! build operations, lay them out in the canonical byte format the chain
//! hashes, sign them with secp256k1, and exchange them with nodes in the
//! structured JSON form.
//!
//! ## Architecture
//!
//! - **serialization** — varints, the binary layout, structured field access.
//! - **crypto** — secp256k1 keys, compact recoverable signatures, hashes.
//! - **types** — object ids, asset amounts, authorities, account options, memos.
//! - **operations** — transfer, account create, account update, and the
//!   tag → decoder registry.
//! - **transaction** — the aggregate, its signing search and JSON form.
//! - **config** — protocol constants and known chain ids.
//!
//! Talking to nodes (fetching head blocks, fee quotes, broadcasting) is the
//! caller's job; this crate only produces and consumes the payloads.

pub mod config;
pub mod crypto;
pub mod operations;
pub mod serialization;
pub mod transaction;
pub mod types;
