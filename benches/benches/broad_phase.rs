// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quadtree_index::{HandleId, QuadTree, Rect};

const WORLD: f64 = 2048.0;

fn world() -> Rect<f64> {
    Rect::new(0.0, 0.0, WORLD, WORLD)
}

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

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(x as f64 * cell, y as f64 * cell, cell * 0.8, cell * 0.8));
        }
    }
    out
}

fn gen_random_rects(count: usize, size: f64, seed: u64) -> Vec<Rect<f64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * (WORLD - size);
            let y = rng.next_f64() * (WORLD - size);
            Rect::new(x, y, size, size)
        })
        .collect()
}

fn build(rects: &[Rect<f64>], capacity: usize, max_level: usize) -> (QuadTree<f64, u32>, Vec<HandleId>) {
    let mut tree = QuadTree::new(world(), capacity, max_level);
    let ids = rects
        .iter()
        .zip(0..)
        .map(|(r, i)| tree.insert_new(*r, i))
        .collect();
    (tree, ids)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, WORLD / n as f64);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_grid_n{n}"), |b| {
            b.iter(|| black_box(build(&rects, 8, 6).0.total_node_count()));
        });
    }
    let rects = gen_random_rects(4096, 12.0, 0xCAFE_F00D_DEAD_BEEF);
    group.throughput(Throughput::Elements(rects.len() as u64));
    for &(capacity, max_level) in &[(4usize, 6usize), (8, 6), (16, 5)] {
        group.bench_function(format!("insert_random_cap{capacity}_lvl{max_level}"), |b| {
            b.iter(|| black_box(build(&rects, capacity, max_level).0.total_node_count()));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let rects = gen_random_rects(4096, 12.0, 0xC1A5_7E55_9999_ABCD);
    let (tree, _) = build(&rects, 8, 6);
    let regions = gen_random_rects(256, 64.0, 0xBADC_F00D_1234_5678);
    group.throughput(Throughput::Elements(regions.len() as u64));

    group.bench_function("candidates", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            let mut total = 0;
            for region in &regions {
                out.clear();
                tree.query_into(region, &mut out);
                total += out.len();
            }
            black_box(total)
        });
    });
    group.bench_function("intersecting", |b| {
        b.iter(|| {
            let total: usize = regions
                .iter()
                .map(|region| tree.query_intersecting(region).count())
                .sum();
            black_box(total)
        });
    });
    group.bench_function("brute_force_baseline", |b| {
        b.iter(|| {
            let total: usize = regions
                .iter()
                .map(|region| rects.iter().filter(|r| r.intersects(region)).count())
                .sum();
            black_box(total)
        });
    });
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    let rects = gen_random_rects(4096, 12.0, 0xFACE_FEED_CAFE_BABE);
    group.throughput(Throughput::Elements(rects.len() as u64));

    for &(label, step) in &[("jitter", 1.0), ("drift", 24.0), ("teleport", WORLD / 2.0)] {
        group.bench_function(format!("move_all_{label}"), |b| {
            b.iter_batched(
                || build(&rects, 8, 6),
                |(mut tree, ids)| {
                    for (j, id) in ids.iter().enumerate() {
                        let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                        let Some(bounds) = tree.bounds_mut(*id) else {
                            continue;
                        };
                        let moved = bounds.translate(sign * step, -sign * step);
                        *bounds = Rect::new(
                            moved.x.rem_euclid(WORLD - moved.width),
                            moved.y.rem_euclid(WORLD - moved.height),
                            moved.width,
                            moved.height,
                        );
                        tree.update(*id);
                    }
                    black_box(tree.total_node_count())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_colliding_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("colliding_pairs");
    for &count in &[1024usize, 4096] {
        let rects = gen_random_rects(count, 16.0, 0x5EED_0000_0000_0001);
        let (tree, _) = build(&rects, 8, 6);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("n{count}"), |b| {
            b.iter(|| black_box(tree.colliding_pairs().len()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_query,
    bench_update,
    bench_colliding_pairs
);
criterion_main!(benches);
