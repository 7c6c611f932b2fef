// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for configuration and structural validation.

use crate::handle::HandleId;
use crate::node::NodeId;

/// Errors reported by [`QuadTree::with_config`](crate::QuadTree::with_config),
/// [`Config::validate`](crate::Config::validate), and
/// [`QuadTree::validate`](crate::QuadTree::validate).
///
/// Insert, remove, and update never produce these; they report precondition
/// failures with a `bool` and leave the tree untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Node capacity was zero.
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
    /// Root bounds had no area.
    #[error("root bounds must have positive width and height")]
    EmptyBounds,
    /// A tracked handle is missing from the object list of its owner.
    #[error("handle {0:?} names node {1:?} as owner but is not stored there")]
    MissingFromOwner(HandleId, NodeId),
    /// A node lists a handle that names a different owner (or none).
    #[error("node {1:?} stores handle {0:?} which does not name it as owner")]
    OwnerMismatch(HandleId, NodeId),
    /// A handle appears more than once across all object lists.
    #[error("handle {0:?} is stored more than once")]
    DuplicateEntry(HandleId),
    /// A node lists a handle id that is no longer alive.
    #[error("node {1:?} stores stale handle {0:?}")]
    DanglingEntry(HandleId, NodeId),
    /// An internal node's children do not exactly tile its bounds.
    #[error("children of node {0:?} do not tile its bounds")]
    BadTiling(NodeId),
    /// A parent link, child link, or level is inconsistent.
    #[error("node {0:?} has an inconsistent parent, child, or level link")]
    BadLink(NodeId),
    /// An internal node with no objects and only empty leaf children survived.
    #[error("node {0:?} is empty with empty leaf children but was not collapsed")]
    Uncollapsed(NodeId),
}
