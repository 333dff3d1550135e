// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::types::NodeId;

/// Structural misuse of a [`Scene`](crate::Scene).
///
/// Queries never fail; only edits that would break the tree are rejected. None of these are
/// retried; the caller (typically a scene builder) has to fix its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The requested parent is not a live node of this scene.
    #[error("parent {0:?} is not a live node")]
    UnknownParent(NodeId),
    /// The node being edited is not a live node of this scene.
    #[error("node {0:?} is not a live node")]
    UnknownNode(NodeId),
    /// Moving `node` under `new_parent` would create a cycle.
    #[error("cannot move {node:?} under its own descendant {new_parent:?}")]
    WouldCycle {
        /// The node being moved.
        node: NodeId,
        /// The requested parent, which lies in `node`'s subtree.
        new_parent: NodeId,
    },
    /// The root cannot be removed or reparented.
    #[error("the root node cannot be removed or reparented")]
    RootIsFixed,
}
