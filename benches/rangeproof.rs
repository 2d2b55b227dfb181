// SPDX short identifier: Unlicense

use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
    BenchmarkId
};
use std::time::Duration;

const AGGREGATION_SIZES: [usize; 5] = [1, 2, 4, 8, 16];

use xrct::{
    common::*,
    rangeproof::{
        Bulletproof,
        RangeSig
    }
};

fn bulletproof_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bulletproofs");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    //prove
    for x in AGGREGATION_SIZES {
        let mut values: Vec<u64> = Vec::new();
        let mut blindings: Vec<Scalar> = Vec::new();
        for n in 0..x {
            values.push(1234567890 + n as u64);
            blindings.push(random_scalar());
        }
        let params = (values, blindings);
        group.bench_with_input(BenchmarkId::new("prove", format!("Aggregation size: {x}")), &params,
            |b, (values, blindings)| b.iter(|| {
                Bulletproof::prove(values.to_owned(), blindings.to_owned())
            }));
    }

    //verify
    for x in AGGREGATION_SIZES {
        let mut values: Vec<u64> = Vec::new();
        let mut blindings: Vec<Scalar> = Vec::new();
        for n in 0..x {
            values.push(1234567890 + n as u64);
            blindings.push(random_scalar());
        }

        let (_, proof) = Bulletproof::prove(values, blindings).unwrap();
        group.bench_with_input(BenchmarkId::new("verify", format!("Aggregation size: {x}")), &proof,
            |b, proof| b.iter(|| {
                black_box(proof.verify().unwrap())
            }));
    }
}


fn borromean_benchmark(c: &mut Criterion) {
    //prove
    let params = (1234567890u64, random_scalar());
    c.bench_with_input(BenchmarkId::new("Borromean", "prove"), &params,
        |b, (value, blinding)| b.iter(|| {
            RangeSig::prove(value.to_owned(), blinding.to_owned())
        }));


    //verify
    let params = RangeSig::prove(1234567890u64, random_scalar()).unwrap();
    c.bench_with_input(BenchmarkId::new("Borromean", "verify"), &params,
        |b, (commitment, proof)| b.iter(|| {
            black_box(proof.verify(commitment.to_owned()).unwrap());
        }));
}


criterion_group!(rangeproofs, bulletproof_benchmark, borromean_benchmark);
criterion_main!(rangeproofs);
