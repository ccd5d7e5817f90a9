use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};
use rbtree_index::{RbMap, RbTree};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_sets() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Tree Benchmarks ────────────────────────────────────────────────────────

fn bench_tree_insert(c: &mut Criterion) {
    for (order, keys) in key_sets() {
        let mut group = c.benchmark_group(format!("tree_insert_{order}"));

        group.bench_function(BenchmarkId::new("RbTree", N), |b| {
            b.iter(|| {
                let mut tree = RbTree::new();
                for &k in &keys {
                    tree.insert(k);
                }
                tree
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

fn bench_tree_contains(c: &mut Criterion) {
    for (order, keys) in key_sets() {
        let tree: RbTree<i64> = keys.iter().copied().collect();
        let set: BTreeSet<i64> = keys.iter().copied().collect();
        let mut group = c.benchmark_group(format!("tree_contains_{order}"));

        group.bench_function(BenchmarkId::new("RbTree", N), |b| {
            b.iter(|| keys.iter().filter(|k| tree.contains(k)).count());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| keys.iter().filter(|k| set.contains(k)).count());
        });

        group.finish();
    }
}

fn bench_tree_lower_bound(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: RbTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("tree_lower_bound_random");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| keys.iter().filter_map(|k| tree.get(tree.lower_bound(k))).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter_map(|&k| set.range(k + 1..).next()).count());
    });

    group.finish();
}

fn bench_tree_remove(c: &mut Criterion) {
    for (order, keys) in key_sets() {
        let tree: RbTree<i64> = keys.iter().copied().collect();
        let set: BTreeSet<i64> = keys.iter().copied().collect();
        let mut group = c.benchmark_group(format!("tree_remove_{order}"));

        group.bench_function(BenchmarkId::new("RbTree", N), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    for k in &keys {
                        tree.remove(k);
                    }
                    tree
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || set.clone(),
                |mut set| {
                    for k in &keys {
                        set.remove(k);
                    }
                    set
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_tree_cursor_walk(c: &mut Criterion) {
    let tree: RbTree<i64> = ordered_keys(N).into_iter().collect();
    let mut group = c.benchmark_group("tree_walk");

    group.bench_function(BenchmarkId::new("cursor", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let mut cursor = tree.begin();
            while let Some(&v) = tree.get(cursor) {
                sum += v;
                cursor = tree.successor(cursor).unwrap_or(tree.end());
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("iter", N), |b| {
        b.iter(|| tree.iter().sum::<i64>());
    });

    group.finish();
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_insert_random");

    group.bench_function(BenchmarkId::new("RbMap", N), |b| {
        b.iter(|| {
            let mut map = RbMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_map: RbMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("RbMap", N), |b| {
        b.iter(|| keys.iter().filter_map(|k| rb_map.get(k)).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| keys.iter().filter_map(|k| bt_map.get(k)).sum::<i64>());
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(
    tree_benches,
    bench_tree_insert,
    bench_tree_contains,
    bench_tree_lower_bound,
    bench_tree_remove,
    bench_tree_cursor_walk,
);

criterion_group!(map_benches, bench_map_insert_random, bench_map_get_random,);

criterion_main!(tree_benches, map_benches);
