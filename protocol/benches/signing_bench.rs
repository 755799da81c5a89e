// Signing benchmarks for the GXC protocol.
//
// Covers secp256k1 key generation, compact recoverable signing and public
// key recovery, and the full transaction signing search.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gxc_protocol::config::MAINNET_CHAIN_ID;
use gxc_protocol::crypto::{EcdsaSigner, PrivateKey, SigningService};
use gxc_protocol::operations::TransferOperation;
use gxc_protocol::transaction::{BlockData, ChainId, TransactionBuilder};
use gxc_protocol::types::{AssetAmount, ObjectId};

fn bench_key_generation(c: &mut Criterion) {
    c.bench_function("secp256k1/key_generate", |b| {
        b.iter(PrivateKey::generate);
    });
}

fn bench_sign_payload(c: &mut Criterion) {
    let signer = EcdsaSigner::new();
    let key = PrivateKey::generate();
    let payload = b"transfer 250000 GXC from 1.2.17 to 1.2.300";

    c.bench_function("secp256k1/sign_payload", |b| {
        b.iter(|| signer.sign(payload, &key).unwrap());
    });
}

fn bench_recover_public_key(c: &mut Criterion) {
    let signer = EcdsaSigner::new();
    let key = PrivateKey::generate();
    let payload = b"transfer 250000 GXC from 1.2.17 to 1.2.300";
    let signature = signer.sign(payload, &key).unwrap();

    c.bench_function("secp256k1/recover_public_key", |b| {
        b.iter(|| signer.recover_public_key(payload, &signature).unwrap());
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let key = PrivateKey::generate();
    let chain_id: ChainId = MAINNET_CHAIN_ID.parse().unwrap();
    let mut group = c.benchmark_group("secp256k1/sign_transaction");

    for ops in [1usize, 10, 50] {
        let builder = || {
            let mut builder = TransactionBuilder::new()
                .block_data(BlockData::new(34_521, 3_162_120_021, 1_700_000_120))
                .chain_id(chain_id.clone())
                .private_key(key.clone());
            for i in 0..ops {
                builder = builder.operation(
                    TransferOperation::new(
                        ObjectId::account(17),
                        ObjectId::account(300 + i as u64),
                        AssetAmount::new(1_000 * i as u64, ObjectId::asset(1)),
                    )
                    .with_fee(AssetAmount::new(1_000, ObjectId::asset(1))),
                );
            }
            builder.build()
        };

        group.throughput(Throughput::Elements(ops as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ops), &ops, |b, _| {
            b.iter(|| {
                let mut tx = builder();
                tx.sign().unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_key_generation,
    bench_sign_payload,
    bench_recover_public_key,
    bench_sign_transaction,
);
criterion_main!(benches);
