// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{Aabb3D, RTree as UnderstoryTree};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<Aabb3D<f64>> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = [x as f64 * cell, y as f64 * cell, z as f64 * cell];
                out.push(Aabb3D::new(min, [min[0] + cell, min[1] + cell, min[2] + cell]));
            }
        }
    }
    out
}

fn to_rstar_boxes(v: &[Aabb3D<f64>]) -> Vec<Rectangle<[f64; 3]>> {
    v.iter()
        .map(|b| Rectangle::from_corners(b.min, b.max))
        .collect()
}

fn bench_rtree_external_compare_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_3d");
    for &n in &[16usize, 32] {
        let boxes = gen_grid_boxes(n, 10.0);
        let query = Aabb3D::new([40.0, 40.0, 40.0], [120.0, 120.0, 120.0]);
        group.throughput(Throughput::Elements((n * n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter_batched(
                || UnderstoryTree::<Aabb3D<f64>, f64, 3>::with_max_entries(16),
                |mut tree| {
                    for bx in boxes.iter().copied() {
                        tree.insert(bx);
                    }
                    black_box(tree.search(&query).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("understory_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || boxes.clone(),
                |boxes| {
                    let mut tree = UnderstoryTree::<Aabb3D<f64>, f64, 3>::with_max_entries(16);
                    tree.load(boxes);
                    black_box(tree.search(&query).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_boxes(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(query.min, query.max);
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_3d);
criterion_main!(benches);
