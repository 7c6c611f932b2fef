// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bouncing boxes.
//!
//! A headless simulation: boxes drift around a bounded world, the tree is
//! updated every frame, and overlapping pairs are found through the broad
//! phase and cross-checked against a brute-force pass.
//!
//! Run:
//! - `cargo run -p quadtree_demos --example bouncing_boxes`
//! - `RUST_LOG=quadtree_index=trace cargo run -p quadtree_demos --example bouncing_boxes`
//!   to also see subdivisions, collapses, and escalated updates.

use quadtree_index::{Config, HandleId, QuadTree, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const WORLD: f64 = 800.0;
const BOXES: usize = 400;
const FRAMES: usize = 240;

#[derive(Clone, Copy, Debug)]
struct Velocity {
    dx: f64,
    dy: f64,
}

fn step(bounds: Rect<f64>, v: &mut Velocity) -> Rect<f64> {
    let mut next = bounds.translate(v.dx, v.dy);
    if next.left() < 0.0 || next.right() > WORLD {
        v.dx = -v.dx;
        next.x = next.x.clamp(0.0, WORLD - next.width);
    }
    if next.top() < 0.0 || next.bottom() > WORLD {
        v.dy = -v.dy;
        next.y = next.y.clamp(0.0, WORLD - next.height);
    }
    next
}

fn brute_force_pairs(tree: &QuadTree<f64, Velocity>, ids: &[HandleId]) -> usize {
    let mut count = 0;
    for (i, a) in ids.iter().enumerate() {
        let Some(ra) = tree.bounds(*a) else { continue };
        for b in &ids[i + 1..] {
            if tree.bounds(*b).is_some_and(|rb| ra.intersects(&rb)) {
                count += 1;
            }
        }
    }
    count
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::default().with_capacity(6).with_max_level(6);
    let mut tree: QuadTree<f64, Velocity> = match QuadTree::with_config(Rect::new(0.0, 0.0, WORLD, WORLD), config) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "invalid configuration");
            return;
        }
    };

    let mut rng = StdRng::seed_from_u64(0x0B0C_5E5);
    let ids: Vec<HandleId> = (0..BOXES)
        .map(|_| {
            let size = rng.random_range(4.0..16.0);
            let bounds = Rect::new(
                rng.random_range(0.0..WORLD - size),
                rng.random_range(0.0..WORLD - size),
                size,
                size,
            );
            let velocity = Velocity {
                dx: rng.random_range(-3.0..3.0),
                dy: rng.random_range(-3.0..3.0),
            };
            tree.insert_new(bounds, velocity)
        })
        .collect();
    info!(boxes = ids.len(), nodes = tree.total_node_count(), "world populated");

    let mut peak_nodes = 0;
    let mut total_pairs = 0;
    for frame in 0..FRAMES {
        for id in &ids {
            let (Some(bounds), Some(mut velocity)) = (tree.bounds(*id), tree.payload(*id).copied()) else {
                continue;
            };
            let next = step(bounds, &mut velocity);
            if let Some(payload) = tree.payload_mut(*id) {
                *payload = velocity;
            }
            tree.relocate(*id, next);
        }

        let pairs = tree.colliding_pairs();
        total_pairs += pairs.len();
        peak_nodes = peak_nodes.max(tree.total_node_count());

        if frame % 60 == 0 {
            let expected = brute_force_pairs(&tree, &ids);
            if expected != pairs.len() {
                warn!(frame, expected, found = pairs.len(), "broad phase disagrees with brute force");
            }
            let deepest = tree.nodes().map(|n| n.level()).max().unwrap_or(0);
            info!(
                frame,
                pairs = pairs.len(),
                nodes = tree.total_node_count(),
                deepest,
                at_root = tree.root().object_count(),
                "frame stats"
            );
        } else {
            debug!(frame, pairs = pairs.len(), "frame");
        }
    }

    if let Err(e) = tree.validate() {
        warn!(error = %e, "tree invariant violated");
    }
    info!(frames = FRAMES, total_pairs, peak_nodes, "simulation finished");
}
