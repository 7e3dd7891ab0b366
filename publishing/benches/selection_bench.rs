use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dnn_nullables::NullRandom;
use dnn_publishing::VoterSelector;
use dnn_types::{Address, ArticleId, DnnParams, Timestamp};

fn pool(size: usize) -> Vec<Address> {
    (0..size).map(|i| Address::new(format!("0xvoter{i:05}"))).collect()
}

fn select_from(c: &mut Criterion, size: usize) {
    let candidates = pool(size);
    let rng = NullRandom::constant([0x5Au8; 32]);
    let params = DnnParams::default();

    c.bench_function(&format!("select_7_of_{size}"), |b| {
        b.iter(|| {
            VoterSelector.select(
                &rng,
                black_box(ArticleId::new(1)),
                black_box(&candidates),
                &params,
                Timestamp::new(0),
            )
        })
    });
}

fn select_small_pool_bench(c: &mut Criterion) {
    select_from(c, 10);
}

fn select_large_pool_bench(c: &mut Criterion) {
    select_from(c, 10_000);
}

criterion_group!(benches, select_small_pool_bench, select_large_pool_bench);
criterion_main!(benches);
