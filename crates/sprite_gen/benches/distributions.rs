mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sprite_gen::prelude::*;

const BETA_PARAMS: [(f64, f64); 4] = [(0.5, 0.5), (2.0, 25.0), (25.0, 2.0), (17.5, 13.5)];

fn beta_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("distributions/beta");

    for &(alpha, beta) in &BETA_PARAMS {
        let d = Beta::new("x", alpha, beta).unwrap();
        group.throughput(common::sprites_throughput(1));

        let id = format!("{alpha}_{beta}");
        group.bench_with_input(BenchmarkId::from_parameter(&id), &id, |b, _| {
            let mut rng = StdRng::seed_from_u64(0xA11CE);
            b.iter(|| {
                let m = d.sample(&mut rng).unwrap();
                black_box(m);
            });
        });
    }

    group.finish();
}

fn conditioned_product_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("distributions/conditioned_product");

    for (name, table) in [
        ("corner_biased", ShapeParamTable::corner_biased()),
        ("fitted", ShapeParamTable::fitted()),
    ] {
        group.bench_function(name, |b| {
            let mut rng = StdRng::seed_from_u64(0xFACE);
            b.iter(|| {
                let d = table.conditioned_distribution(Shape::Star5).unwrap();
                let m = d.sample(&mut rng).unwrap();
                black_box(Sprite::from_factors(&m).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = beta_benches, conditioned_product_benches
}
criterion_main!(benches);
