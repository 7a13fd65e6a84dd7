use std::collections::HashSet;

use bloomsieve::BloomFilter;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::distributions::Uniform;
use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn lookup_values(c: &mut Criterion) {
    let mut bf = BloomFilter::from_capacity(1_000_000, 0.02).unwrap();
    let mut inserted = HashSet::new();

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let distribution = Uniform::new_inclusive(0, 10u64.pow(12));
    for _ in 0..1_000_000 {
        let value = rng.sample(distribution).to_be_bytes();
        bf.add(&value);
        inserted.insert(value);
    }

    let mut bgroup = c.benchmark_group("lookup-values");
    bgroup.bench_function("lookup-random-values", |b| {
        b.iter(|| bf.contains(&rng.sample(distribution).to_be_bytes()))
    });

    bgroup.bench_function("lookup-inserted-values", |b| {
        b.iter(|| bf.contains(inserted.iter().choose(&mut rng).unwrap()))
    });
}

criterion_group!(benches, lookup_values);
criterion_main!(benches);
