//! # Spatial Map Benchmark
//!
//! Lookup, insert and remove over a 32^3 voxel region, comparing the default
//! hash with the align-16 hash and with `std::collections::HashMap`.
//!
//! Run with: `cargo bench --package tessera_core --bench spatial_map_benchmark`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{HashInt3D, SpatialMap3D};

/// Edge length of the benchmarked cube.
const EDGE: i32 = 32;

fn region() -> impl Iterator<Item = (i32, i32, i32)> {
    (0..EDGE).flat_map(|x| (0..EDGE).flat_map(move |y| (0..EDGE).map(move |z| (x, y, z))))
}

fn filled<H: HashInt3D>(mut map: SpatialMap3D<u32, H>) -> SpatialMap3D<u32, H> {
    for (i, (x, y, z)) in region().enumerate() {
        map.put(x, y, z, i as u32);
    }
    map
}

/// Benchmark: fill the region from empty.
fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_put");

    for buckets in [1024, 4096, 32_768] {
        group.bench_with_input(BenchmarkId::new("default", buckets), &buckets, |b, &n| {
            b.iter(|| black_box(filled(SpatialMap3D::new(n)).len()));
        });
    }
    group.bench_function("align16", |b| {
        b.iter(|| black_box(filled(SpatialMap3D::new_align16()).len()));
    });
    group.bench_function("std_hashmap", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (i, key) in region().enumerate() {
                map.insert(key, i as u32);
            }
            black_box(map.len())
        });
    });

    group.finish();
}

/// Benchmark: look up every key once.
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_get");

    let default_map = filled(SpatialMap3D::new(32_768));
    group.bench_function("default_32768", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for (x, y, z) in region() {
                sum += u64::from(*default_map.get(x, y, z).unwrap_or(&0));
            }
            black_box(sum)
        });
    });

    let align_map = filled(SpatialMap3D::new_align16());
    group.bench_function("align16", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for (x, y, z) in region() {
                sum += u64::from(*align_map.get(x, y, z).unwrap_or(&0));
            }
            black_box(sum)
        });
    });

    group.finish();
}

/// Benchmark: remove and re-insert a slab, exercising the free list.
fn bench_churn(c: &mut Criterion) {
    let mut map = filled(SpatialMap3D::new(4096));

    c.bench_function("spatial_churn_slab", |b| {
        b.iter(|| {
            for y in 0..EDGE {
                for z in 0..EDGE {
                    map.remove(0, y, z);
                }
            }
            for y in 0..EDGE {
                for z in 0..EDGE {
                    map.put(0, y, z, 1);
                }
            }
            black_box(map.len())
        });
    });
}

/// Benchmark: full iteration.
fn bench_iter(c: &mut Criterion) {
    let map = filled(SpatialMap3D::new(4096));

    c.bench_function("spatial_iter_32k", |b| {
        b.iter(|| black_box(map.values().map(|v| u64::from(*v)).sum::<u64>()));
    });
}

criterion_group!(benches, bench_put, bench_get, bench_churn, bench_iter);

criterion_main!(benches);
