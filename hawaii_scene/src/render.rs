// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary to an external renderer: the drawing surface, the per-node renderer capability,
//! and a paint pass that drives them.
//!
//! This crate does not rasterize anything. A [`Surface`] is whatever the host draws into; it
//! only has to keep a transform stack. Renderers that need the concrete surface type reach it
//! through [`Surface::as_any_mut`].
//!
//! ## Paint pass
//!
//! [`paint`] visits nodes in draw order (parents before children, siblings in insertion
//! order, so later-added children paint over earlier ones), skips nodes whose world bounds do
//! not touch the dirty rectangle, concatenates each node's render transform on top of the
//! camera's view matrix, and calls the node's renderer.

use core::any::Any;

use kurbo::{Affine, Rect};

use crate::node::Node;
use crate::scene::Scene;

/// A drawing target with a transform stack.
pub trait Surface {
    /// Push the current drawing state.
    fn save(&mut self);

    /// Pop the most recently saved drawing state.
    fn restore(&mut self);

    /// Concatenate `transform` onto the current transform (applied before it).
    fn concat_transform(&mut self, transform: Affine);

    /// Access the concrete surface, for renderers bound to a specific backend.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Drawing capability attached to a [`Node`].
pub trait NodeRenderer {
    /// Draw `node` in its local rectangle space.
    ///
    /// The node's render transform has already been concatenated onto `surface`, so the node
    /// draws in `(0, 0, width, height)`. `dirty_rect` is the world-space region being repainted.
    fn draw(&self, surface: &mut dyn Surface, node: &Node, dirty_rect: Rect);
}

/// Paint every node whose world bounds touch `dirty_rect`.
///
/// `view` is applied once before traversal (typically the camera's view matrix) so node
/// matrices stay camera-agnostic. Returns the number of renderers invoked.
pub fn paint(scene: &Scene, surface: &mut dyn Surface, view: Affine, dirty_rect: Rect) -> usize {
    let mut drawn = 0;
    surface.save();
    surface.concat_transform(view);
    for id in scene.nodes_in_draw_order() {
        let Some(node) = scene.node(id) else {
            continue;
        };
        let Some(renderer) = node.renderer.as_ref() else {
            continue;
        };
        if !touches(scene.world_bounds(id), dirty_rect) {
            continue;
        }
        surface.save();
        surface.concat_transform(scene.render_transform(id));
        renderer.draw(surface, node, dirty_rect);
        surface.restore();
        drawn += 1;
    }
    surface.restore();
    tracing::trace!(drawn, ?dirty_rect, "paint pass");
    drawn
}

/// Closed-interval overlap test; rectangles sharing an edge touch.
fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
