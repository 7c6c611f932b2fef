// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=quadtree_index --heading-base-level=0

//! Quadtree Index: a dynamic region quadtree for broad-phase overlap queries.
//!
//! The tree recursively partitions a fixed 2D region into four quadrants and
//! stores each rectangle at the deepest node whose single quadrant contains it.
//! Rectangles that straddle a midline stay at the ancestor, so nothing is ever
//! duplicated across nodes.
//!
//! - Spawn handles (bounds plus a user payload), then insert, update, and remove them.
//! - Nodes subdivide once they hold more than `capacity` objects, down to `max_level`.
//! - Subtrees that become empty collapse back into leaves.
//! - Moving a handle starts the search at its current node and only climbs as far
//!   as needed, so small per-frame motion stays cheap.
//! - Queries return a sound over-approximation: every intersecting handle is
//!   reported, possibly alongside some that are merely nearby.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i32`, `i64`) and
//! over the payload `P`, and does not depend on any geometry crate. Enable the
//! `kurbo` feature for conversions to and from [`kurbo::Rect`](https://docs.rs/kurbo).
//!
//! # Example
//!
//! ```rust
//! use quadtree_index::{QuadTree, Rect};
//!
//! // 100×100 world, split when a node holds more than 2 objects, at most 4 levels deep.
//! let mut tree: QuadTree<f64, &str> = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0), 2, 4);
//! let a = tree.insert_new(Rect::new(0.0, 0.0, 10.0, 10.0), "a");
//! let b = tree.insert_new(Rect::new(5.0, 5.0, 10.0, 10.0), "b");
//! let c = tree.insert_new(Rect::new(90.0, 90.0, 5.0, 5.0), "c");
//!
//! // The third insert split the root; all three moved into children.
//! assert_eq!(tree.total_node_count(), 4);
//! assert_eq!(tree.root().object_count(), 0);
//!
//! // Move `c` next to `a` and `b`, then ask who overlaps whom.
//! tree.relocate(c, Rect::new(8.0, 8.0, 5.0, 5.0));
//! let mut pairs = tree.colliding_pairs();
//! pairs.sort();
//! assert_eq!(pairs, [(a, b), (a, c), (b, c)]);
//!
//! // Candidates for a region, then exact filtering.
//! let near_origin: Vec<_> = tree.query_intersecting(&Rect::new(0.0, 0.0, 2.0, 2.0)).collect();
//! assert_eq!(near_origin, [a]);
//! ```
//!
//! Handles can also live outside the tree. Spawning does not insert, and
//! removing does not free, so an entity can leave and rejoin the index while
//! keeping its identity and payload:
//!
//! ```rust
//! use quadtree_index::{Config, QuadTree, Rect};
//!
//! let mut tree: QuadTree<i32, u32> =
//!     QuadTree::with_config(Rect::new(0, 0, 256, 256), Config::default()).unwrap();
//!
//! let id = tree.spawn(Rect::new(10, 10, 4, 4), 7);
//! assert!(!tree.is_tracked(id));
//! assert!(tree.insert(id));
//! assert!(tree.remove(id));
//! assert_eq!(tree.payload(id), Some(&7));
//!
//! assert_eq!(tree.despawn(id), Some((Rect::new(10, 10, 4, 4), 7)));
//! assert!(!tree.is_alive(id));
//! ```
//!
//! ## Introspection
//!
//! [`QuadTree::nodes`] walks every node as a [`NodeView`], exposing its bounds,
//! depth, and contents. That is enough to draw a debug overlay of the
//! partition without the tree knowing anything about rendering.
//!
//! ### Coordinates
//!
//! Rectangles are half-open and `y` grows downward. A rectangle ending exactly
//! on a midline belongs to the near quadrant, and rectangles that only touch
//! do not intersect. Handles may lie partly or wholly outside the root bounds;
//! they are still stored and found, just less efficiently.
//!
//! This crate assumes no NaNs for floating-point coordinates.

#![no_std]

extern crate alloc;

mod arena;
mod config;
mod error;
mod handle;
#[cfg(feature = "kurbo")]
mod kurbo_interop;
mod node;
mod rect;
mod tree;

pub use config::Config;
pub use error::Error;
pub use handle::HandleId;
pub use node::{NodeId, NodeView, Quadrant};
pub use rect::{Rect, Scalar};
pub use tree::QuadTree;
