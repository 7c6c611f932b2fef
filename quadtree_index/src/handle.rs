// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object handles: a bounding rectangle, a payload, and the node storing it.

use crate::node::NodeId;
use crate::rect::Rect;

/// Identifier for an object handle owned by a [`QuadTree`](crate::QuadTree).
///
/// Like [`NodeId`], it is a slot index plus a generation counter. The tree
/// tracks handles by this identity rather than by value, so two handles with
/// identical bounds and payloads are still distinct objects.
///
/// Once a handle is [despawned](crate::QuadTree::despawn) its id goes stale and
/// every accessor returns `None` (or `false`) for it, even after the slot is
/// reused by a new handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub(crate) u32, pub(crate) u32);

impl HandleId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    /// Slot index of this handle. Stable for the handle's lifetime.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Handle<T, P> {
    pub(crate) bounds: Rect<T>,
    pub(crate) payload: P,
    /// Node whose object list holds this handle, if it is tracked.
    pub(crate) owner: Option<NodeId>,
}

impl<T, P> Handle<T, P> {
    pub(crate) fn new(bounds: Rect<T>, payload: P) -> Self {
        Self {
            bounds,
            payload,
            owner: None,
        }
    }
}
