// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{Aabb3D, RTree};

type Tree = RTree<(Aabb3D<f64>, u32), f64, 3>;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `count` boxes in a 100-unit cube, each up to `size` wide per axis.
fn gen_boxes(seed: u64, count: usize, size: f64) -> Vec<Aabb3D<f64>> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let min: [f64; 3] = core::array::from_fn(|_| rng.next_f64() * (100.0 - size));
        let max: [f64; 3] = core::array::from_fn(|i| min[i] + size * rng.next_f64());
        out.push(Aabb3D::new(min, max));
    }
    out
}

fn tagged(boxes: &[Aabb3D<f64>]) -> Vec<(Aabb3D<f64>, u32)> {
    boxes.iter().copied().zip(0_u32..).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let items = tagged(&gen_boxes(0xCAFE_F00D_DEAD_BEEF, n, 1.0));
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("bulk_load_n{}", n), |b| {
            b.iter_batched(
                || items.clone(),
                |items| {
                    let mut tree = Tree::with_max_entries(16);
                    tree.load(items);
                    black_box(tree.height());
                },
                BatchSize::LargeInput,
            )
        });

        if n <= 10_000 {
            group.bench_function(format!("insert_one_by_one_n{}", n), |b| {
                b.iter_batched(
                    || items.clone(),
                    |items| {
                        let mut tree = Tree::with_max_entries(16);
                        for item in items {
                            tree.insert(item);
                        }
                        black_box(tree.height());
                    },
                    BatchSize::LargeInput,
                )
            });
        }
    }

    let first = tagged(&gen_boxes(0xBADC_F00D_1234_5678, 50_000, 1.0));
    let second = tagged(&gen_boxes(0xFACE_FEED_CAFE_BABE, 5_000, 1.0));
    group.bench_function("load_into_existing", |b| {
        b.iter_batched(
            || {
                let mut tree = Tree::with_max_entries(16);
                tree.load(first.clone());
                (tree, second.clone())
            },
            |(mut tree, second)| {
                tree.load(second);
                black_box(tree.height());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_query");
    let mut tree = Tree::with_max_entries(16);
    tree.load(tagged(&gen_boxes(0xC1A5_7E55_9999_ABCD, 100_000, 1.0)));

    for (label, size) in [("10pct", 100.0 * 0.1_f64.sqrt()), ("1pct", 10.0), ("001pct", 1.0)] {
        let queries = gen_boxes(0x1234_5678_9ABC_DEF0, 1_000, size);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("search_{}", label), |b| {
            b.iter(|| {
                let hits: usize = queries.iter().map(|q| tree.search(q).len()).sum();
                black_box(hits);
            })
        });
        group.bench_function(format!("collides_{}", label), |b| {
            b.iter(|| {
                let hits = queries.iter().filter(|q| tree.collides(q)).count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_remove");
    let items = tagged(&gen_boxes(0xDEAD_BEEF_0BAD_F00D, 20_000, 1.0));
    group.throughput(Throughput::Elements(1_000));
    group.bench_function("remove_1000_of_20000", |b| {
        b.iter_batched(
            || {
                let mut tree = Tree::with_max_entries(16);
                tree.load(items.clone());
                tree
            },
            |mut tree| {
                for item in &items[..1_000] {
                    tree.remove(item);
                }
                black_box(tree.height());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_remove);
criterion_main!(benches);
