// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node entity: size, placement policies, and composed capabilities.

use alloc::rc::Rc;
use core::fmt;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::event::NodeHandler;
use crate::render::NodeRenderer;
use crate::types::{Alignment, HitArea, Origin, PositionMode, Transform};

/// A positioned, sized entity in the scene tree.
///
/// `Node` is plain data plus two optional capabilities:
/// - a [`NodeRenderer`], invoked by a paint pass to draw the node;
/// - a [`NodeHandler`], offered click, drag, and gesture events by the dispatcher.
///
/// Both capabilities are shared (`Rc`) and not owned by the node. Tree structure (parent and
/// children) is owned by the [`Scene`](crate::Scene); a node never refers back to its scene.
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use hawaii_scene::{Node, Origin, Transform};
///
/// let node = Node::new(Size::new(100.0, 50.0))
///     .with_origin(Origin::Center)
///     .with_transform(Transform::from_position(Vec2::new(10.0, 10.0)));
/// assert_eq!(node.origin_offset(), Vec2::new(50.0, 25.0));
/// ```
#[derive(Clone)]
pub struct Node {
    /// Width and height in local units. Infinite extents mark an unbounded node (the root).
    pub size: Size,
    /// Placement relative to the parent.
    pub transform: Transform,
    /// Pivot inside the local rectangle.
    pub origin: Origin,
    /// Automatic snapping against the parent's rectangle.
    pub alignment: Alignment,
    /// How much of the ancestor chain's transform is inherited.
    pub position_mode: PositionMode,
    /// When `false`, the node's own scale is excluded from the frame its descendants compose
    /// against, so they keep their size while still following the node's position and rotation.
    pub propagate_ancestor_scale: bool,
    /// Area used for hit testing.
    pub hit_area: HitArea,
    /// Drawing capability, if any.
    pub renderer: Option<Rc<dyn NodeRenderer>>,
    /// Event handling capability, if any.
    pub handler: Option<Rc<dyn NodeHandler>>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("size", &self.size)
            .field("transform", &self.transform)
            .field("origin", &self.origin)
            .field("alignment", &self.alignment)
            .field("position_mode", &self.position_mode)
            .field("propagate_ancestor_scale", &self.propagate_ancestor_scale)
            .field("hit_area", &self.hit_area)
            .field("has_renderer", &self.renderer.is_some())
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Node {
    /// Creates a node of the given size with default placement and no capabilities.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Transform::IDENTITY,
            origin: Origin::default(),
            alignment: Alignment::default(),
            position_mode: PositionMode::default(),
            propagate_ancestor_scale: true,
            hit_area: HitArea::default(),
            renderer: None,
            handler: None,
        }
    }

    /// Creates a node spanning an unbounded area, as used for the scene root.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(Size::new(f64::INFINITY, f64::INFINITY))
    }

    /// Sets the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the position mode.
    #[must_use]
    pub fn with_position_mode(mut self, position_mode: PositionMode) -> Self {
        self.position_mode = position_mode;
        self
    }

    /// Sets whether the node's own scale propagates to its descendants.
    #[must_use]
    pub fn with_propagate_ancestor_scale(mut self, propagate: bool) -> Self {
        self.propagate_ancestor_scale = propagate;
        self
    }

    /// Sets the hit area.
    #[must_use]
    pub fn with_hit_area(mut self, hit_area: HitArea) -> Self {
        self.hit_area = hit_area;
        self
    }

    /// Attaches a renderer capability.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Rc<dyn NodeRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Attaches a handler capability.
    #[must_use]
    pub fn with_handler(mut self, handler: Rc<dyn NodeHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Returns `true` if either extent is not finite.
    pub fn is_unbounded(&self) -> bool {
        !self.size.width.is_finite() || !self.size.height.is_finite()
    }

    /// Local hit and paint rectangle.
    ///
    /// `(0, 0, width, height)` unless [`HitArea::Rect`] overrides it.
    pub fn local_bounds(&self) -> Rect {
        match self.hit_area {
            HitArea::Rect(rect) => rect,
            HitArea::Bounds | HitArea::ScreenFixed => Rect::from_origin_size(Point::ZERO, self.size),
        }
    }

    /// Pivot point inside the local rectangle selected by [`Node::origin`].
    ///
    /// Unbounded extents contribute zero on that axis, so an unbounded root with a centre
    /// origin pivots around `(0, 0)`.
    pub fn origin_offset(&self) -> Vec2 {
        let (fx, fy) = self.origin.factors();
        Vec2::new(
            along(self.size.width, fx),
            along(self.size.height, fy),
        )
    }

    /// Translation that snaps this node against its parent's rectangle.
    ///
    /// The point of this node selected by the alignment (its centre or the matching corner) is
    /// placed on the analogous point of a parent of size `parent_size`. The offset is measured on
    /// the node's unscaled size. [`Alignment::None`] and unbounded parent extents contribute zero.
    pub fn alignment_offset(&self, parent_size: Size) -> Vec2 {
        let Some((fx, fy)) = self.alignment.factors() else {
            return Vec2::ZERO;
        };
        let target = Vec2::new(along(parent_size.width, fx), along(parent_size.height, fy));
        let own = Vec2::new(along(self.size.width, fx), along(self.size.height, fy));
        let origin = self.origin_offset();
        Vec2::new(
            if parent_size.width.is_finite() {
                target.x - (own.x - origin.x)
            } else {
                0.0
            },
            if parent_size.height.is_finite() {
                target.y - (own.y - origin.y)
            } else {
                0.0
            },
        )
    }

    /// Whether the node's own scale is left out of its world matrix.
    ///
    /// This is the case when the scale must not reach descendants. [`PositionMode::Static`]
    /// nodes ignore their scale altogether, so nothing is excluded for them.
    pub(crate) fn excludes_own_scale(&self) -> bool {
        !self.propagate_ancestor_scale && self.position_mode != PositionMode::Static
    }

    /// The node's contribution to its world matrix, given its alignment offset.
    ///
    /// `translate(position + alignment) * rotate * scale * translate(-origin)`, with the scale
    /// removed (and the pivot pre-scaled) when [`Node::excludes_own_scale`] holds, and with
    /// rotation and scale dropped for [`PositionMode::Static`].
    pub(crate) fn local_matrix(&self, alignment: Vec2) -> Affine {
        let t = &self.transform;
        let origin = self.origin_offset();
        let placed = Affine::translate(t.position + alignment);
        if self.position_mode == PositionMode::Static {
            return placed * Affine::translate(-origin);
        }
        let rotate = Affine::rotate(t.rotation_degrees.to_radians());
        if self.excludes_own_scale() {
            let scaled_origin = Vec2::new(origin.x * t.scale.x, origin.y * t.scale.y);
            placed * rotate * Affine::translate(-scaled_origin)
        } else {
            placed * rotate * Affine::scale_non_uniform(t.scale.x, t.scale.y) * Affine::translate(-origin)
        }
    }

    /// The scale re-applied on top of the world matrix when drawing or hit testing this node.
    pub(crate) fn excluded_scale(&self) -> Affine {
        if self.excludes_own_scale() {
            Affine::scale_non_uniform(self.transform.scale.x, self.transform.scale.y)
        } else {
            Affine::IDENTITY
        }
    }
}

/// Position along an extent, or zero when the extent is unbounded.
fn along(extent: f64, factor: f64) -> f64 {
    if extent.is_finite() {
        extent * factor
    } else {
        0.0
    }
}
