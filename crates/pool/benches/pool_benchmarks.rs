//! Pool benchmarks
//!
//! Compares pooled reuse against fresh allocation for the buffer sizes a
//! per-frame workload typically churns through.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nebula_pool::array::ArrayPool;
use nebula_pool::collections::ListPool;
use nebula_pool::{MemoryPool, PoolSettings, StaticMemoryPool};
use std::hint::black_box;

/// Spawn, touch, despawn one buffer per iteration
fn bench_spawn_despawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn_despawn");

    for size in [64usize, 1024, 16 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("memory_pool", size), &size, |b, &size| {
            let pool = MemoryPool::new(
                move || Vec::<u8>::with_capacity(size),
                PoolSettings::default().with_initial_size(1),
            )
            .unwrap();

            b.iter(|| {
                let mut buf = pool.spawn().unwrap();
                buf.push(1);
                black_box(&buf);
                buf.clear();
                pool.despawn(buf);
            });
        });

        group.bench_with_input(BenchmarkId::new("static_pool", size), &size, |b, &size| {
            let mut pool = StaticMemoryPool::with_allocator(move || Vec::<u8>::with_capacity(size));
            pool.set_on_despawn(Vec::clear);

            b.iter(|| {
                let mut buf = pool.spawn().unwrap();
                buf.push(1);
                black_box(&buf);
                pool.despawn(buf);
            });
        });

        group.bench_with_input(BenchmarkId::new("fresh_alloc", size), &size, |b, &size| {
            b.iter(|| {
                let mut buf = Vec::<u8>::with_capacity(size);
                buf.push(1);
                black_box(&buf);
            });
        });
    }

    group.finish();
}

/// Guarded spawns versus explicit despawn
fn bench_guard(c: &mut Criterion) {
    let mut group = c.benchmark_group("guard");

    let pool = ListPool::<u64>::create(PoolSettings::default().with_initial_size(1), 32).unwrap();

    group.bench_function("explicit", |b| {
        b.iter(|| {
            let mut list = pool.spawn().unwrap();
            list.extend(0..16);
            black_box(&list);
            pool.despawn(list);
        });
    });

    group.bench_function("pooled_guard", |b| {
        b.iter(|| {
            let mut list = pool.spawn_pooled().unwrap();
            list.extend(0..16);
            black_box(&*list);
        });
    });

    group.finish();
}

/// Array pool reuse with element reset on despawn
fn bench_array_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_pool");

    for len in [8usize, 256] {
        group.bench_with_input(BenchmarkId::new("pooled", len), &len, |b, &len| {
            let mut pool = ArrayPool::<u32>::new(len);
            b.iter(|| {
                let mut arr = pool.spawn();
                arr[0] = 7;
                black_box(&arr);
                pool.despawn(arr);
            });
        });

        group.bench_with_input(BenchmarkId::new("fresh_alloc", len), &len, |b, &len| {
            b.iter(|| {
                let mut arr = vec![0u32; len].into_boxed_slice();
                arr[0] = 7;
                black_box(&arr);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_spawn_despawn, bench_guard, bench_array_pool);
criterion_main!(benches);
