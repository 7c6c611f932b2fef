// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kurbo interop.
//!
//! Feed `kurbo::Rect` bounds straight into the tree and query with Kurbo
//! regions. Requires the `kurbo` feature.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example kurbo_interop`

use kurbo::{Point, Rect, Size};
use quadtree_index::QuadTree;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let world = Rect::new(0.0, 0.0, 1024.0, 768.0);
    let mut tree: QuadTree<f64, &str> = QuadTree::new(world.into(), 2, 4);

    let widgets = [
        ("toolbar", Rect::new(0.0, 0.0, 1024.0, 48.0)),
        ("sidebar", Rect::new(0.0, 48.0, 220.0, 768.0)),
        ("canvas", Rect::new(220.0, 48.0, 1024.0, 768.0)),
        ("tooltip", Rect::from_origin_size(Point::new(180.0, 300.0), Size::new(120.0, 40.0))),
        ("button", Rect::new(12.0, 8.0, 92.0, 40.0)),
    ];
    for (name, bounds) in widgets {
        tree.insert_new(bounds.into(), name);
    }

    let pointer = Rect::from_center_size(Point::new(200.0, 320.0), Size::new(2.0, 2.0));
    let under: Vec<&str> = tree
        .query_kurbo(pointer)
        .filter_map(|id| tree.payload(id).copied())
        .collect();
    info!(?under, "widgets under pointer");

    for (a, b) in tree.colliding_pairs() {
        let (Some(name_a), Some(name_b)) = (tree.payload(a), tree.payload(b)) else {
            continue;
        };
        let overlap = tree
            .bounds(a)
            .zip(tree.bounds(b))
            .map(|(ra, rb)| Rect::from(ra).intersect(Rect::from(rb)));
        info!(%name_a, %name_b, ?overlap, "overlapping widgets");
    }
}
