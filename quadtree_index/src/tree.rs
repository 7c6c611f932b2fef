// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, balancing, updates, queries.

use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::config::Config;
use crate::error::Error;
use crate::handle::{Handle, HandleId};
use crate::node::{Node, NodeId, NodeView, Quadrant};
use crate::rect::{Rect, Scalar};

/// Dynamic region quadtree over axis-aligned rectangles.
///
/// The tree owns two arenas: the partition nodes, and the object handles that
/// callers spawn and move around. Handles are referred to by [`HandleId`] and
/// nodes by [`NodeId`]; neither is invalidated by storage growth.
///
/// `T` is the coordinate scalar and `P` the payload carried by each handle
/// (typically an entity id or index into the caller's own storage).
#[derive(Clone)]
pub struct QuadTree<T: Scalar, P> {
    config: Config,
    root: NodeId,
    nodes: Arena<Node<T>>,
    handles: Arena<Handle<T, P>>,
}

impl<T: Scalar, P> fmt::Debug for QuadTree<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("config", &self.config)
            .field("bounds", &self.root_bounds())
            .field("nodes", &self.nodes.len())
            .field("handles", &self.handles.len())
            .field("tracked", &self.total_object_count())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P> QuadTree<T, P> {
    /// Create an empty tree covering `bounds`.
    ///
    /// Neither argument is validated; see [`QuadTree::with_config`] for a
    /// checked constructor.
    pub fn new(bounds: Rect<T>, capacity: usize, max_level: usize) -> Self {
        Self::from_config(bounds, Config::new(capacity, max_level))
    }

    /// Create an empty tree covering `bounds`, rejecting a zero capacity or
    /// bounds without area.
    pub fn with_config(bounds: Rect<T>, config: Config) -> Result<Self, Error> {
        config.validate()?;
        if bounds.is_empty() {
            return Err(Error::EmptyBounds);
        }
        Ok(Self::from_config(bounds, config))
    }

    fn from_config(bounds: Rect<T>, config: Config) -> Self {
        let mut nodes = Arena::default();
        let (idx, generation) = nodes.insert(Node::new(bounds, 0, None));
        Self {
            config,
            root: NodeId::new(idx, generation),
            nodes,
            handles: Arena::default(),
        }
    }

    /// The subdivision policy this tree was built with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Region covered by the root node.
    pub fn root_bounds(&self) -> Rect<T> {
        self.node_ref(self.root).bounds
    }

    // --- handles ---

    /// Create an untracked handle. Call [`QuadTree::insert`] to index it.
    pub fn spawn(&mut self, bounds: Rect<T>, payload: P) -> HandleId {
        let (idx, generation) = self.handles.insert(Handle::new(bounds, payload));
        HandleId::new(idx, generation)
    }

    /// Create a handle and insert it in one step.
    pub fn insert_new(&mut self, bounds: Rect<T>, payload: P) -> HandleId {
        let id = self.spawn(bounds, payload);
        self.insert(id);
        id
    }

    /// Remove the handle from the tree (if tracked) and free it.
    ///
    /// Returns the handle's last bounds and its payload, or `None` if `id` is
    /// stale.
    pub fn despawn(&mut self, id: HandleId) -> Option<(Rect<T>, P)> {
        self.remove(id);
        let handle = self.handles.remove(id.0, id.1)?;
        Some((handle.bounds, handle.payload))
    }

    /// True if `id` refers to a live handle, tracked or not.
    pub fn is_alive(&self, id: HandleId) -> bool {
        self.handles.get(id.0, id.1).is_some()
    }

    /// True if the handle is currently stored in the tree.
    pub fn is_tracked(&self, id: HandleId) -> bool {
        self.owner(id).is_some()
    }

    /// Node currently storing the handle.
    ///
    /// Exposed for introspection only; the id goes stale when that node is
    /// collapsed.
    pub fn owner(&self, id: HandleId) -> Option<NodeId> {
        self.handles.get(id.0, id.1)?.owner
    }

    /// Current bounds of the handle.
    pub fn bounds(&self, id: HandleId) -> Option<Rect<T>> {
        self.handles.get(id.0, id.1).map(|h| h.bounds)
    }

    /// Mutable access to the handle's bounds.
    ///
    /// The tree is not told about the change: call [`QuadTree::update`]
    /// afterwards if the handle is tracked.
    pub fn bounds_mut(&mut self, id: HandleId) -> Option<&mut Rect<T>> {
        self.handles.get_mut(id.0, id.1).map(|h| &mut h.bounds)
    }

    /// Overwrite the handle's bounds without touching the tree.
    ///
    /// Returns `false` if `id` is stale. Follow with [`QuadTree::update`] for
    /// tracked handles, or use [`QuadTree::relocate`] to do both.
    pub fn set_bounds(&mut self, id: HandleId, bounds: Rect<T>) -> bool {
        match self.handles.get_mut(id.0, id.1) {
            Some(handle) => {
                handle.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Overwrite the handle's bounds and, if it is tracked, relocate it.
    ///
    /// Returns `false` if `id` is stale.
    pub fn relocate(&mut self, id: HandleId, bounds: Rect<T>) -> bool {
        if !self.set_bounds(id, bounds) {
            return false;
        }
        self.update(id);
        true
    }

    /// Payload carried by the handle.
    pub fn payload(&self, id: HandleId) -> Option<&P> {
        self.handles.get(id.0, id.1).map(|h| &h.payload)
    }

    /// Mutable payload carried by the handle.
    pub fn payload_mut(&mut self, id: HandleId) -> Option<&mut P> {
        self.handles.get_mut(id.0, id.1).map(|h| &mut h.payload)
    }

    /// Number of live handles, tracked or not.
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Ids of every live handle, in slot order.
    pub fn handles(&self) -> impl Iterator<Item = HandleId> + '_ {
        self.handles
            .iter()
            .map(|(idx, generation, _)| HandleId::new(idx, generation))
    }

    // --- structure ---

    /// Insert an untracked handle, starting at the root.
    ///
    /// The handle descends while its bounds fit a single child and is stored
    /// at the deepest such node. Returns `false` (and changes nothing) if the
    /// handle is already tracked or `id` is stale.
    pub fn insert(&mut self, id: HandleId) -> bool {
        match self.handles.get(id.0, id.1) {
            Some(handle) if handle.owner.is_none() => {}
            _ => return false,
        }
        self.insert_at(self.root, id);
        true
    }

    /// Stop tracking the handle.
    ///
    /// Empty subtrees left behind are collapsed back into leaves, walking up
    /// from the node that held the handle. Returns `false` (and changes
    /// nothing) if the handle was not tracked.
    pub fn remove(&mut self, id: HandleId) -> bool {
        let Some(owner) = self.detach(id) else {
            return false;
        };
        self.discard_empty_buckets(owner);
        true
    }

    /// Relocate a tracked handle after its bounds changed.
    ///
    /// The search starts at the node currently holding the handle. If that
    /// node still contains the new bounds the handle only moves down (or stays
    /// put); otherwise it climbs to the nearest ancestor that contains them,
    /// or to the root, and descends from there. Small moves therefore cost a
    /// few hops rather than a full reinsertion.
    ///
    /// Returns `false` (and changes nothing) if the handle was not tracked.
    pub fn update(&mut self, id: HandleId) -> bool {
        let Some(owner) = self.detach(id) else {
            return false;
        };
        let bounds = self.handle_ref(id).bounds;

        let mut start = owner;
        while !self.node_ref(start).bounds.contains(&bounds) {
            let Some(parent) = self.node_ref(start).parent else {
                break;
            };
            start = parent;
        }
        if start != owner {
            trace!(handle = ?id, from = ?owner, to = ?start, "escalated update");
        }

        self.insert_at(start, id);
        // Deferred until the handle is stored again: collapsing first could free
        // `owner` while it is still the starting point.
        self.discard_empty_buckets(owner);
        true
    }

    /// Untrack every handle and collapse the tree back to a single leaf.
    ///
    /// Handles stay alive and keep their bounds and payloads.
    pub fn clear(&mut self) {
        for handle in self.handles.values_mut() {
            handle.owner = None;
        }
        self.release_children(self.root);
        self.node_mut(self.root).objects.clear();
        debug!(handles = self.handles.len(), "cleared quadtree");
    }

    // --- queries ---

    /// Broad-phase candidates for `region`.
    ///
    /// Returns every handle stored at each visited node, whether or not its
    /// bounds actually intersect `region`. From each node the search follows
    /// the single child that `region` fits in, or, when `region` straddles a
    /// midline, every child on the sides it reaches. No handle whose bounds
    /// intersect `region` is ever missed, but unrelated handles may be
    /// returned: filter with [`Rect::intersects`], or use
    /// [`QuadTree::query_intersecting`].
    pub fn query(&self, region: &Rect<T>) -> Vec<HandleId> {
        let mut out = Vec::new();
        self.collect_candidates(self.root, region, &mut out);
        out
    }

    /// Like [`QuadTree::query`], appending into a reusable buffer.
    pub fn query_into(&self, region: &Rect<T>, out: &mut Vec<HandleId>) {
        self.collect_candidates(self.root, region, out);
    }

    /// Tracked handles whose bounds intersect `region`.
    pub fn query_intersecting(&self, region: &Rect<T>) -> impl Iterator<Item = HandleId> + '_ {
        let region = *region;
        self.query(&region).into_iter().filter(move |id| {
            self.bounds(*id)
                .is_some_and(|bounds| bounds.intersects(&region))
        })
    }

    /// Every unordered pair of tracked handles whose bounds intersect.
    ///
    /// Each pair is reported once, with the lower id first.
    pub fn colliding_pairs(&self) -> Vec<(HandleId, HandleId)> {
        let mut pairs = Vec::new();
        let mut candidates = Vec::new();
        for (idx, generation, handle) in self.handles.iter() {
            if handle.owner.is_none() {
                continue;
            }
            let id = HandleId::new(idx, generation);
            candidates.clear();
            self.query_into(&handle.bounds, &mut candidates);
            for &other in &candidates {
                if other <= id {
                    continue;
                }
                if self
                    .bounds(other)
                    .is_some_and(|bounds| bounds.intersects(&handle.bounds))
                {
                    pairs.push((id, other));
                }
            }
        }
        pairs
    }

    /// Number of nodes created by subdivision (the root is not counted).
    pub fn total_node_count(&self) -> usize {
        self.subtree_node_count(self.root)
    }

    /// Number of tracked handles.
    pub fn total_object_count(&self) -> usize {
        self.subtree_object_count(self.root)
    }

    /// Deepest node reached by following single-child fits for `region`.
    ///
    /// Intended for diagnostics, such as showing how crowded the cell under a
    /// cursor is.
    pub fn leaf_for(&self, region: &Rect<T>) -> NodeId {
        self.descend(self.root, region)
    }

    // --- introspection ---

    /// Identifier of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// View of the root node.
    pub fn root(&self) -> NodeView<'_, T, P> {
        NodeView::new(self, self.root, self.node_ref(self.root))
    }

    /// View of a node, or `None` if `id` is stale.
    pub fn node(&self, id: NodeId) -> Option<NodeView<'_, T, P>> {
        let node = self.nodes.get(id.0, id.1)?;
        Some(NodeView::new(self, id, node))
    }

    /// Depth-first, pre-order walk over every node, children visited in
    /// [`Quadrant::ALL`] order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_, T, P>> + '_ {
        let mut stack = vec![self.root];
        core::iter::from_fn(move || {
            let view = self.node(stack.pop()?)?;
            if let Some(children) = view.children() {
                stack.extend(children.iter().rev());
            }
            Some(view)
        })
    }

    /// Check every structural invariant and report the first violation.
    ///
    /// This walks the whole tree and is meant for tests and debug assertions.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = BTreeSet::new();
        for (idx, generation, node) in self.nodes.iter() {
            let id = NodeId::new(idx, generation);

            match node.parent {
                None if id != self.root || node.level != 0 => return Err(Error::BadLink(id)),
                None => {}
                Some(parent) => {
                    let linked = self.nodes.get(parent.0, parent.1).is_some_and(|p| {
                        p.level + 1 == node.level
                            && p.children.is_some_and(|c| c.contains(&id))
                    });
                    if !linked {
                        return Err(Error::BadLink(id));
                    }
                }
            }

            if let Some(children) = node.children {
                let quadrants = node.bounds.quadrants();
                let mut all_empty_leaves = true;
                for (child_id, expected) in children.iter().zip(quadrants) {
                    let Some(child) = self.nodes.get(child_id.0, child_id.1) else {
                        return Err(Error::BadLink(id));
                    };
                    if child.parent != Some(id) {
                        return Err(Error::BadLink(*child_id));
                    }
                    if child.bounds != expected {
                        return Err(Error::BadTiling(id));
                    }
                    all_empty_leaves &= child.is_leaf() && child.objects.is_empty();
                }
                if all_empty_leaves && node.objects.is_empty() {
                    return Err(Error::Uncollapsed(id));
                }
            }

            for &handle_id in &node.objects {
                let Some(handle) = self.handles.get(handle_id.0, handle_id.1) else {
                    return Err(Error::DanglingEntry(handle_id, id));
                };
                if handle.owner != Some(id) {
                    return Err(Error::OwnerMismatch(handle_id, id));
                }
                if !seen.insert(handle_id) {
                    return Err(Error::DuplicateEntry(handle_id));
                }
            }
        }

        for (idx, generation, handle) in self.handles.iter() {
            let Some(owner) = handle.owner else {
                continue;
            };
            let id = HandleId::new(idx, generation);
            let stored = self
                .nodes
                .get(owner.0, owner.1)
                .is_some_and(|node| node.objects.contains(&id));
            if !stored {
                return Err(Error::MissingFromOwner(id, owner));
            }
        }
        Ok(())
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node_ref(&self, id: NodeId) -> &Node<T> {
        self.nodes.get(id.0, id.1).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes.get_mut(id.0, id.1).expect("dangling NodeId")
    }

    /// Access a handle; panics if `id` is stale.
    fn handle_ref(&self, id: HandleId) -> &Handle<T, P> {
        self.handles.get(id.0, id.1).expect("dangling HandleId")
    }

    fn handle_mut(&mut self, id: HandleId) -> &mut Handle<T, P> {
        self.handles.get_mut(id.0, id.1).expect("dangling HandleId")
    }

    /// Follow single-child fits for `region` starting at `start`.
    pub(crate) fn descend(&self, start: NodeId, region: &Rect<T>) -> NodeId {
        let mut id = start;
        loop {
            let node = self.node_ref(id);
            let Some(children) = node.children else {
                return id;
            };
            match Quadrant::fit(&node.bounds, region) {
                Some(quadrant) => id = children[quadrant.index()],
                None => return id,
            }
        }
    }

    /// Store an untracked handle at the deepest fitting node below `start`,
    /// subdividing that node if it overflows.
    fn insert_at(&mut self, start: NodeId, id: HandleId) {
        let bounds = self.handle_ref(id).bounds;
        let target = self.descend(start, &bounds);
        self.node_mut(target).objects.push(id);
        self.handle_mut(id).owner = Some(target);

        let node = self.node_ref(target);
        if node.is_leaf()
            && node.level < self.config.max_level
            && node.objects.len() > self.config.capacity
        {
            self.subdivide(target);
            self.redistribute(target);
        }
    }

    fn subdivide(&mut self, id: NodeId) {
        let (bounds, level) = {
            let node = self.node_ref(id);
            (node.bounds, node.level)
        };
        let children = bounds.quadrants().map(|quadrant| {
            let (idx, generation) = self.nodes.insert(Node::new(quadrant, level + 1, Some(id)));
            NodeId::new(idx, generation)
        });
        self.node_mut(id).children = Some(children);
        trace!(node = ?id, level, "subdivided node");
    }

    /// Push every resident handle that now fits a single child down into it.
    /// Straddlers stay, in their original order.
    fn redistribute(&mut self, id: NodeId) {
        let (bounds, children) = {
            let node = self.node_ref(id);
            let Some(children) = node.children else {
                return;
            };
            (node.bounds, children)
        };
        let resident = core::mem::take(&mut self.node_mut(id).objects);
        let mut kept = Vec::with_capacity(resident.len());
        for handle in resident {
            let candidate = self.handle_ref(handle).bounds;
            match Quadrant::fit(&bounds, &candidate) {
                Some(quadrant) => self.insert_at(children[quadrant.index()], handle),
                None => kept.push(handle),
            }
        }
        self.node_mut(id).objects = kept;
    }

    /// Unlink a tracked handle from its owner without rebalancing.
    fn detach(&mut self, id: HandleId) -> Option<NodeId> {
        let owner = self.handles.get(id.0, id.1)?.owner?;
        let objects = &mut self.node_mut(owner).objects;
        if let Some(pos) = objects.iter().position(|h| *h == id) {
            objects.remove(pos);
        }
        self.handle_mut(id).owner = None;
        Some(owner)
    }

    /// Collapse empty subtrees, walking up from `start` until a node that
    /// still holds objects or has a non-empty child is found.
    fn discard_empty_buckets(&mut self, start: NodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let node = self.node_ref(id);
            if !node.objects.is_empty() {
                return;
            }
            if let Some(children) = node.children {
                let collapsible = children.iter().all(|child| {
                    let child = self.node_ref(*child);
                    child.is_leaf() && child.objects.is_empty()
                });
                if !collapsible {
                    return;
                }
                self.release_children(id);
                trace!(node = ?id, "collapsed empty node");
            }
            current = self.node_ref(id).parent;
        }
    }

    /// Free every node below `id`, leaving `id` a leaf.
    ///
    /// Handles stored below are not touched; callers untrack them first.
    fn release_children(&mut self, id: NodeId) {
        let Some(children) = self.node_mut(id).children.take() else {
            return;
        };
        for child in children {
            self.release_children(child);
            self.nodes.remove(child.0, child.1);
        }
    }

    pub(crate) fn collect_candidates(&self, id: NodeId, region: &Rect<T>, out: &mut Vec<HandleId>) {
        let node = self.node_ref(id);
        out.extend_from_slice(&node.objects);
        let Some(children) = node.children else {
            return;
        };
        if let Some(quadrant) = Quadrant::fit(&node.bounds, region) {
            self.collect_candidates(children[quadrant.index()], region, out);
        } else {
            for quadrant in Quadrant::ALL {
                if quadrant.reaches(&node.bounds, region) {
                    self.collect_candidates(children[quadrant.index()], region, out);
                }
            }
        }
    }

    pub(crate) fn subtree_node_count(&self, id: NodeId) -> usize {
        match self.node_ref(id).children {
            None => 0,
            Some(children) => {
                4 + children
                    .iter()
                    .map(|child| self.subtree_node_count(*child))
                    .sum::<usize>()
            }
        }
    }

    pub(crate) fn subtree_object_count(&self, id: NodeId) -> usize {
        let node = self.node_ref(id);
        node.objects.len()
            + node.children.map_or(0, |children| {
                children
                    .iter()
                    .map(|child| self.subtree_object_count(*child))
                    .sum()
            })
    }
}
