// SPDX short identifier: Unlicense

use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
    BenchmarkId
};
use rand::{thread_rng, Rng};

const RING_SIZES: [usize; 7] = [2, 4, 8, 16, 32, 64, 128];

use xrct::{
    common::*,
    signature::{
        RingSignature,
        MgSig
    }
};

fn ring_signature_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ring signature");

    for x in RING_SIZES {
        let index = thread_rng().gen::<usize>() % x;
        let secret = random_scalar();
        let mut ring: Vec<RistrettoPoint> = (0..x).map(|_| random_point()).collect();
        ring[index] = &secret * G;

        group.bench_with_input(BenchmarkId::new("sign", format!("Ring size: {x}")), &ring,
            |b, ring| b.iter(|| {
                RingSignature::sign(b"abcdef", ring, secret, index)
            }));

        let sig = RingSignature::sign(b"abcdef", &ring, secret, index);
        let params = (ring, sig);
        group.bench_with_input(BenchmarkId::new("verify", format!("Ring size: {x}")), &params,
            |b, (ring, sig)| b.iter(|| {
                black_box(sig.verify(b"abcdef", ring).unwrap())
            }));
    }
}

fn mlsag_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("MLSAG");

    //2 rows with 1 key image, the shape simple-mode RingCT uses
    for x in RING_SIZES {
        let index = thread_rng().gen::<usize>() % x;
        let secrets: Vec<Scalar> = vec!(random_scalar(), random_scalar());
        let mut matrix: Vec<Vec<RistrettoPoint>> = (0..x)
            .map(|_| vec!(random_point(), random_point())).collect();
        matrix[index] = secrets.iter().map(|secret| secret * G).collect();

        group.bench_with_input(BenchmarkId::new("sign", format!("Ring size: {x}")), &matrix,
            |b, matrix| b.iter(|| {
                MgSig::sign(b"abcdef", matrix, &secrets, index, 1)
            }));

        let sig = MgSig::sign(b"abcdef", &matrix, &secrets, index, 1);
        let params = (matrix, sig);
        group.bench_with_input(BenchmarkId::new("verify", format!("Ring size: {x}")), &params,
            |b, (matrix, sig)| b.iter(|| {
                black_box(sig.verify(b"abcdef", matrix, 1).unwrap())
            }));
    }
}


criterion_group!(signatures, ring_signature_benchmark, mlsag_benchmark);
criterion_main!(signatures);
