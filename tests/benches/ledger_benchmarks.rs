//! # Asset Ledger Benchmarks
//!
//! | Component | Path measured |
//! |-----------|---------------|
//! | shared-types | amount parsing and formatting |
//! | al-02 Asset Contract | `CreateAsset` simulation against a snapshot |
//! | al-03 Ordering | committing a block of independent creates |
//! | al-01 World State | full range scan over committed assets |

use al_01_world_state::{InMemoryWorldState, TxSimulator, WorldStateStore};
use al_02_asset_contract::AssetContract;
use al_03_transaction_ordering::{Block, CommitNotifier, Committer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{Amount, EndorsedTransaction, Proposal};
use std::sync::Arc;

fn create_args(dealer_id: &str) -> Vec<String> {
    vec![
        dealer_id.to_string(),
        "1234567890".to_string(),
        "1234".to_string(),
        "1000.00".to_string(),
        "ACTIVE".to_string(),
        "INITIAL".to_string(),
        String::new(),
    ]
}

fn endorse_create(store: &InMemoryWorldState, dealer_id: &str) -> EndorsedTransaction {
    let proposal = Proposal::new("mychannel", "asset", "CreateAsset", create_args(dealer_id), "Org1MSP");
    let mut sim = TxSimulator::new(
        store.snapshot().expect("snapshot"),
        proposal.tx_id.clone(),
        proposal.timestamp,
    );
    let payload = AssetContract
        .invoke(&mut sim, &proposal.function, &proposal.args)
        .expect("create");
    EndorsedTransaction {
        proposal,
        rw_set: sim.into_rw_set(),
        response_payload: payload,
    }
}

fn bench_amounts(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-types-amount");

    group.bench_function("parse", |b| {
        b.iter(|| black_box("123456.78").parse::<Amount>())
    });
    group.bench_function("format", |b| {
        let amount = Amount::from_minor(12_345_678);
        b.iter(|| black_box(amount).to_string())
    });

    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("al-02-asset-contract");
    let store = InMemoryWorldState::new();

    group.bench_function("simulate_create", |b| {
        b.iter(|| black_box(endorse_create(&store, "D001")))
    });

    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("al-03-transaction-ordering");

    for size in [10usize, 100] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("commit_block", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let store = Arc::new(InMemoryWorldState::new());
                    let txs = (0..size)
                        .map(|i| endorse_create(&store, &format!("D{i:05}")))
                        .collect();
                    (store, Block::new(1, txs))
                },
                |(store, block)| {
                    let committer =
                        Committer::new(store, Arc::new(CommitNotifier::new()), "mychannel");
                    black_box(committer.commit_block(&block).expect("commit"))
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_range_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("al-01-world-state");

    let store = Arc::new(InMemoryWorldState::new());
    let txs = (0..1_000)
        .map(|i| endorse_create(&store, &format!("D{i:05}")))
        .collect();
    Committer::new(Arc::clone(&store) as Arc<dyn WorldStateStore>, Arc::new(CommitNotifier::new()), "mychannel")
        .commit_block(&Block::new(1, txs))
        .expect("commit");

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("range_scan_1000", |b| {
        b.iter(|| black_box(store.range_scan("", "").expect("scan").len()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_amounts,
    bench_simulation,
    bench_commit,
    bench_range_scan
);
criterion_main!(benches);
