//! Benchmarks for the cluster-assignment, CL and CM engines at a few sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use abcd_core::{generate, Mixing, Params};

fn uniform_params(n: usize, k: usize, degree: u32, is_cl: bool) -> Params {
    let cluster_size = (n / k) as u32;
    let mut s = vec![cluster_size; k];
    let remainder = n as u32 - cluster_size * k as u32;
    s[0] += remainder;
    let mut w = vec![degree; n];
    if (n as u64 * degree as u64) % 2 != 0 {
        w[0] += 1;
    }
    Params::new(w, s, Mixing::Mu(0.2), is_cl, false).unwrap()
}

fn bench_cl_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cl_generate");
    for size in [100, 500, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let params = uniform_params(size, 5, 6, true);
            b.iter(|| {
                let report = generate(&params, 42).unwrap();
                black_box(report)
            });
        });
    }
    group.finish();
}

fn bench_cm_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cm_generate");
    for size in [100, 500, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let params = uniform_params(size, 5, 6, false);
            b.iter(|| {
                let report = generate(&params, 42).unwrap();
                black_box(report)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cl_generate, bench_cm_generate);
criterion_main!(benches);
