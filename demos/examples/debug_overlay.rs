// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debug overlay.
//!
//! Walk the partition with `nodes()` and render it as text: an indented
//! outline of every node, and a coarse character grid where each cell shows
//! the depth of the leaf covering it. A "cursor" query shows how crowded the
//! cell under a point is.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example debug_overlay`

use quadtree_index::{QuadTree, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

const WORLD: i32 = 512;
const COLUMNS: i32 = 32;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut tree: QuadTree<i32, char> = QuadTree::new(Rect::new(0, 0, WORLD, WORLD), 3, 5);
    let mut rng = StdRng::seed_from_u64(42);

    // A dense cluster in the top-left and a sparse scatter elsewhere.
    for _ in 0..40 {
        let x = rng.random_range(8..120);
        let y = rng.random_range(8..120);
        tree.insert_new(Rect::new(x, y, 6, 6), '#');
    }
    for _ in 0..12 {
        let x = rng.random_range(0..WORLD - 20);
        let y = rng.random_range(0..WORLD - 20);
        tree.insert_new(Rect::new(x, y, 20, 20), '.');
    }
    // One box across the center stays at the root.
    tree.insert_new(Rect::new(WORLD / 2 - 10, WORLD / 2 - 10, 20, 20), '+');

    println!("outline:");
    for node in tree.nodes() {
        let b = node.bounds();
        println!(
            "{:indent$}{} [{}, {}, {}x{}] here={} below={}",
            "",
            if node.is_leaf() { "leaf" } else { "node" },
            b.x,
            b.y,
            b.width,
            b.height,
            node.object_count(),
            node.total_object_count() - node.object_count(),
            indent = node.level() * 2,
        );
    }

    println!();
    println!("leaf depth map:");
    let cell = WORLD / COLUMNS;
    for row in 0..COLUMNS {
        let line: String = (0..COLUMNS)
            .map(|col| {
                let probe = Rect::new(col * cell, row * cell, 1, 1);
                let leaf = tree.leaf_for(&probe);
                tree.node(leaf)
                    .and_then(|n| char::from_digit(u32::try_from(n.level()).unwrap_or(9), 10))
                    .unwrap_or('?')
            })
            .collect();
        println!("{line}");
    }

    let cursor = Rect::new(40, 40, 1, 1);
    let leaf = tree.leaf_for(&cursor);
    if let Some(view) = tree.node(leaf) {
        info!(
            level = view.level(),
            here = view.object_count(),
            candidates = tree.query(&cursor).len(),
            hits = tree.query_intersecting(&cursor).count(),
            "cursor cell"
        );
    }
    info!(
        nodes = tree.total_node_count(),
        objects = tree.total_object_count(),
        "partition summary"
    );
}
