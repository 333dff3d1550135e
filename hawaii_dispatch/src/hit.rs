// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing over a scene, most specific node first.
//!
//! Candidates are collected in postorder (descendants, in sibling order, before the node
//! itself), so a child inside its parent is offered an event before the parent.
//!
//! For each node:
//! 1. [`HitArea::ScreenFixed`] nodes are tested in screen space: a `width × height` pixel box
//!    placed around the node's origin. Like every other node, they are skipped when their
//!    transform cannot be inverted.
//! 2. Otherwise the point must lie in the node's cached world bounds (a cheap rejection),
//! 3. map into local space through the inverse render transform (degenerate nodes are skipped),
//! 4. and lie inside [`Node::local_bounds`](hawaii_scene::Node::local_bounds).
//!
//! Edges count as inside.

use hawaii_scene::{HitArea, NodeId, Scene, TouchEvent};
use hawaii_view2d::SceneCamera;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Hit candidates, most specific first.
pub type Candidates = SmallVec<[NodeId; 8]>;

/// Every node under the world point `world`, most specific first.
pub fn hit_test(scene: &Scene, camera: &SceneCamera, world: Point) -> Candidates {
    scene
        .nodes_in_hit_test_order()
        .into_iter()
        .filter(|&id| node_contains(scene, camera, id, world))
        .collect()
}

/// The most specific node under `world`, if any.
pub fn top_hit(scene: &Scene, camera: &SceneCamera, world: Point) -> Option<NodeId> {
    scene
        .nodes_in_hit_test_order()
        .into_iter()
        .find(|&id| node_contains(scene, camera, id, world))
}

/// Returns `true` if `world` lies in the hit area of `id`.
pub fn node_contains(scene: &Scene, camera: &SceneCamera, id: NodeId, world: Point) -> bool {
    let Some(node) = scene.node(id) else {
        return false;
    };
    match node.hit_area {
        HitArea::ScreenFixed => {
            if scene.world_to_local(id, world).is_none() {
                tracing::trace!(?id, "skipping node with degenerate transform");
                return false;
            }
            let origin = node.origin_offset();
            let anchor = camera.world_to_screen(scene.local_to_world(id, origin.to_point()));
            let area = Rect::from_origin_size(anchor - origin, node.size);
            contains(area, camera.world_to_screen(world))
        }
        HitArea::Bounds if node.is_unbounded() => true,
        HitArea::Bounds | HitArea::Rect(_) => {
            if !contains(scene.world_bounds(id), world) {
                return false;
            }
            let Some(local) = scene.world_to_local(id, world) else {
                tracing::trace!(?id, "skipping node with degenerate transform");
                return false;
            };
            contains(node.local_bounds(), local)
        }
    }
}

/// The point `world` as seen by `id`: in world, parent-frame, and local space.
///
/// Spaces that cannot be reached through a degenerate transform fall back to the world point.
pub fn localize(scene: &Scene, id: NodeId, world: Point, timestamp: u64) -> TouchEvent {
    TouchEvent {
        world,
        parent: scene.world_to_parent(id, world).unwrap_or(world),
        local: scene.world_to_local(id, world).unwrap_or(world),
        timestamp,
    }
}

fn contains(rect: Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}
