// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition nodes: identifiers, quadrant selection, and read-only views.

use alloc::vec::Vec;
use core::fmt;

use crate::handle::HandleId;
use crate::rect::{Rect, Scalar};
use crate::tree::QuadTree;

/// Identifier for a partition node.
///
/// Nodes are created by subdivision and freed by collapse or
/// [`QuadTree::clear`], so a `NodeId` obtained from a view or from
/// [`QuadTree::owner`] can go stale as the tree rebalances. Use
/// [`QuadTree::node`] to resolve it; stale ids resolve to `None`.
///
/// The root is never freed, so [`QuadTree::root_id`] stays valid for the
/// lifetime of the tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }
}

/// One of the four children of an internal node.
///
/// The discriminant is the child's position in the child array.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Quadrant {
    /// Right of the vertical midline, above the horizontal one.
    TopRight = 0,
    /// Left of the vertical midline, above the horizontal one.
    TopLeft = 1,
    /// Left of the vertical midline, below the horizontal one.
    BottomLeft = 2,
    /// Right of the vertical midline, below the horizontal one.
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in child-array order.
    pub const ALL: [Self; 4] = [
        Self::TopRight,
        Self::TopLeft,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position of this quadrant in a node's child array.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The single quadrant of `bounds` that `candidate` falls into, if any.
    ///
    /// A candidate fits a quadrant only when it lies entirely on one side of
    /// the vertical midline and entirely on one side of the horizontal
    /// midline. Ending exactly on a midline counts as being on the near side.
    /// A candidate that straddles either midline has no quadrant and stays
    /// with the node itself.
    ///
    /// Only the midlines are consulted, not the outer edges of `bounds`, so a
    /// candidate lying outside `bounds` still resolves to the quadrant on its
    /// side of both midlines.
    pub fn fit<T: Scalar>(bounds: &Rect<T>, candidate: &Rect<T>) -> Option<Self> {
        let (mid_x, mid_y) = bounds.midpoint();
        let left = candidate.right() <= mid_x;
        let right = candidate.left() >= mid_x;
        let top = candidate.bottom() <= mid_y;
        let bottom = candidate.top() >= mid_y;

        match (left, right, top, bottom) {
            (true, _, true, _) => Some(Self::TopLeft),
            (true, _, false, true) => Some(Self::BottomLeft),
            (false, true, true, _) => Some(Self::TopRight),
            (false, true, false, true) => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Whether `region` reaches into this quadrant's side of both midlines of
    /// `bounds`.
    ///
    /// Any object stored under this quadrant that intersects `region` implies
    /// `reaches` is true, which is what keeps straddling queries sound.
    pub fn reaches<T: Scalar>(self, bounds: &Rect<T>, region: &Rect<T>) -> bool {
        let (mid_x, mid_y) = bounds.midpoint();
        let horizontal = match self {
            Self::TopLeft | Self::BottomLeft => region.left() < mid_x,
            Self::TopRight | Self::BottomRight => region.right() > mid_x,
        };
        let vertical = match self {
            Self::TopLeft | Self::TopRight => region.top() < mid_y,
            Self::BottomLeft | Self::BottomRight => region.bottom() > mid_y,
        };
        horizontal && vertical
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) bounds: Rect<T>,
    pub(crate) level: usize,
    pub(crate) parent: Option<NodeId>,
    /// `None` for a leaf. Indexed by [`Quadrant::index`].
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) objects: Vec<HandleId>,
}

impl<T> Node<T> {
    pub(crate) fn new(bounds: Rect<T>, level: usize, parent: Option<NodeId>) -> Self {
        Self {
            bounds,
            level,
            parent,
            children: None,
            objects: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Read-only view of one partition node.
///
/// This is the introspection surface for debug overlays and diagnostics:
/// bounds, depth, leaf state, and object counts can all be derived here
/// without the tree carrying any presentation state.
pub struct NodeView<'a, T: Scalar, P> {
    tree: &'a QuadTree<T, P>,
    id: NodeId,
    node: &'a Node<T>,
}

impl<T: Scalar, P> Clone for NodeView<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar, P> Copy for NodeView<'_, T, P> {}

impl<T: Scalar, P> fmt::Debug for NodeView<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id)
            .field("bounds", &self.node.bounds)
            .field("level", &self.node.level)
            .field("is_leaf", &self.node.is_leaf())
            .field("objects", &self.node.objects.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: Scalar, P> NodeView<'a, T, P> {
    pub(crate) fn new(tree: &'a QuadTree<T, P>, id: NodeId, node: &'a Node<T>) -> Self {
        Self { tree, id, node }
    }

    /// Identifier of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Region owned by this node.
    pub fn bounds(&self) -> Rect<T> {
        self.node.bounds
    }

    /// Depth of this node; the root is level 0.
    pub fn level(&self) -> usize {
        self.node.level
    }

    /// True if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    /// The four children in [`Quadrant::ALL`] order, or `None` for a leaf.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.node.children
    }

    /// View of the child covering `quadrant`, or `None` for a leaf.
    pub fn child(&self, quadrant: Quadrant) -> Option<Self> {
        let id = self.node.children?[quadrant.index()];
        self.tree.node(id)
    }

    /// Handles stored directly at this node, in insertion order.
    pub fn objects(&self) -> &'a [HandleId] {
        &self.node.objects
    }

    /// Number of handles stored directly at this node.
    pub fn object_count(&self) -> usize {
        self.node.objects.len()
    }

    /// Number of nodes created below this one (0 for a leaf).
    pub fn total_node_count(&self) -> usize {
        self.tree.subtree_node_count(self.id)
    }

    /// Number of handles stored at this node and everywhere below it.
    pub fn total_object_count(&self) -> usize {
        self.tree.subtree_object_count(self.id)
    }

    /// Broad-phase candidates for `region` within this subtree.
    ///
    /// See [`QuadTree::query`] for the over-approximation contract.
    pub fn query(&self, region: &Rect<T>) -> Vec<HandleId> {
        let mut out = Vec::new();
        self.tree.collect_candidates(self.id, region, &mut out);
        out
    }

    /// Deepest node at or below this one whose single child chain contains
    /// `region`.
    pub fn leaf_for(&self, region: &Rect<T>) -> NodeId {
        self.tree.descend(self.id, region)
    }
}
