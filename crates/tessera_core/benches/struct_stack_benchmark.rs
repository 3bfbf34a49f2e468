//! # Struct Stack Benchmark
//!
//! Simulates a scene-graph walk: push, transform, read, pop per node.
//!
//! Run with: `cargo bench --package tessera_core --bench struct_stack_benchmark`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_core::{Mat4, MatrixStack, PodAccessor, RectStack, StructStack};

/// Nodes visited per iteration.
const NODES: usize = 10_000;

/// Benchmark: matrix push / transform / upload / pop.
fn bench_matrix_walk(c: &mut Criterion) {
    let mut stack = MatrixStack::new(32);
    let _ = stack.push_identity();

    c.bench_function("matrix_walk_10k", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..NODES {
                let _ = stack.duplicate();
                let _ = stack.translate(i as f32, 0.0, 0.0);
                let _ = stack.rotate(0.01, 0.0, 1.0, 0.0);
                acc += stack.peek_with(|m| m.get(3, 0)).unwrap_or(0.0);
                let _ = stack.pop();
            }
            black_box(acc)
        });
    });
}

/// Benchmark: cached reads versus fresh decodes of the same top.
fn bench_peek(c: &mut Criterion) {
    let mut stack = StructStack::new(4, PodAccessor::<Mat4>::new());
    let _ = stack.push(&Mat4::from_translation(1.0, 2.0, 3.0));

    c.bench_function("peek_with_cached", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for _ in 0..NODES {
                acc += stack.peek_with(|m| m.get(3, 2)).unwrap_or(0.0);
            }
            black_box(acc)
        });
    });

    c.bench_function("peek_fresh_decode", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for _ in 0..NODES {
                acc += stack.peek().map(|m| m.get(3, 2)).unwrap_or(0.0);
            }
            black_box(acc)
        });
    });
}

/// Benchmark: nested scissor rectangles.
fn bench_rect_nesting(c: &mut Criterion) {
    let mut stack = RectStack::new(16);

    c.bench_function("rect_nesting_10k", |b| {
        b.iter(|| {
            for i in 0..NODES as i32 {
                let _ = stack.push_bounds(i, i, i + 100, i + 50);
                let _ = stack.offset_top(1, 1);
                let _ = stack.pop();
            }
            black_box(stack.len())
        });
    });
}

criterion_group!(benches, bench_matrix_walk, bench_peek, bench_rect_nesting);

criterion_main!(benches);
