// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types for the scene: node identifiers, transforms, and placement policies.

use kurbo::{Rect, Vec2};

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// This is a small, copyable handle that stays stable for the lifetime of the node and
/// becomes invalid once the node is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On removal, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Placement of a node relative to its parent: position, scale, and rotation in degrees.
///
/// `Transform` is a plain value. Replacing a node's transform through
/// [`Scene::set_transform`](crate::Scene::set_transform) is how all motion, rotation, and
/// zoom is expressed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation in the parent's coordinate space.
    pub position: Vec2,
    /// Non-uniform scale applied around the node's origin.
    pub scale: Vec2,
    /// Clockwise rotation in degrees (y-down) applied around the node's origin.
    pub rotation_degrees: f64,
}

impl Transform {
    /// Zero position, unit scale, zero rotation.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        scale: Vec2::new(1.0, 1.0),
        rotation_degrees: 0.0,
    };

    /// Creates a transform from its three components.
    #[must_use]
    pub const fn new(position: Vec2, scale: Vec2, rotation_degrees: f64) -> Self {
        Self {
            position,
            scale,
            rotation_degrees,
        }
    }

    /// An identity transform translated to `position`.
    #[must_use]
    pub const fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Returns a copy with the given position.
    #[must_use]
    pub const fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Returns a copy with the given scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Returns a copy with the given uniform scale.
    #[must_use]
    pub const fn with_uniform_scale(mut self, scale: f64) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// Returns a copy with the given rotation in degrees.
    #[must_use]
    pub const fn with_rotation(mut self, rotation_degrees: f64) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    /// Returns a copy moved by `delta` in the parent's coordinate space.
    #[must_use]
    pub fn translated(mut self, delta: Vec2) -> Self {
        self.position += delta;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Pivot point inside a node's local rectangle.
///
/// Rotation and scale are applied around this point, and the node's position places
/// this point in the parent's space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Origin {
    /// `(0, 0)`.
    #[default]
    TopLeft,
    /// `(width / 2, 0)`.
    TopCenter,
    /// `(width, 0)`.
    TopRight,
    /// `(0, height / 2)`.
    CenterLeft,
    /// `(width / 2, height / 2)`.
    Center,
    /// `(width, height / 2)`.
    CenterRight,
    /// `(0, height)`.
    BottomLeft,
    /// `(width / 2, height)`.
    BottomCenter,
    /// `(width, height)`.
    BottomRight,
}

impl Origin {
    /// Fractions of the node's extents selected by this origin.
    pub(crate) const fn factors(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }
}

/// Automatic offset snapping a node against a matching point of its parent's rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// No automatic alignment; only the transform's position places the node.
    #[default]
    None,
    /// Centre aligned with the parent's centre.
    Center,
    /// Top-left corner aligned with the parent's top-left corner.
    TopLeft,
    /// Top-right corner aligned with the parent's top-right corner.
    TopRight,
    /// Bottom-left corner aligned with the parent's bottom-left corner.
    BottomLeft,
    /// Bottom-right corner aligned with the parent's bottom-right corner.
    BottomRight,
}

impl Alignment {
    pub(crate) const fn factors(self) -> Option<(f64, f64)> {
        match self {
            Self::None => None,
            Self::Center => Some((0.5, 0.5)),
            Self::TopLeft => Some((0.0, 0.0)),
            Self::TopRight => Some((1.0, 0.0)),
            Self::BottomLeft => Some((0.0, 1.0)),
            Self::BottomRight => Some((1.0, 1.0)),
        }
    }
}

/// How much of the ancestor chain's transform a node inherits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// Composed with the parent's world transform.
    #[default]
    Relative,
    /// The parent's transform is ignored; the node's transform is expressed in world space.
    /// The node still participates in traversal and draw order under its parent.
    Absolute,
    /// The node's own rotation and scale are ignored; only its position is composed with the
    /// parent's world transform.
    Static,
    /// Every ancestor except the root is ignored, as if the node were a direct child of the root.
    Fixed,
}

/// Area used for hit testing a node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum HitArea {
    /// `(0, 0, width, height)` in local space.
    #[default]
    Bounds,
    /// A custom rectangle in local space.
    Rect(Rect),
    /// A `width × height` box in screen pixels placed around the node's origin, independent of
    /// world scale and camera zoom. Useful for markers and handles that keep a constant
    /// on-screen size.
    ScreenFixed,
}

/// Coordinate space in which a translation delta is expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Space {
    /// The node's own rotated frame.
    Local,
    /// The node's parent frame, the space its position is expressed in.
    Parent,
    /// World (root) space.
    World,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec2::ZERO);
        assert_eq!(t.scale, Vec2::new(1.0, 1.0));
        assert_eq!(t.rotation_degrees, 0.0);
    }

    #[test]
    fn transform_builders_replace_single_components() {
        let t = Transform::from_position(Vec2::new(3.0, 4.0))
            .with_uniform_scale(2.0)
            .with_rotation(45.0);
        assert_eq!(t.position, Vec2::new(3.0, 4.0));
        assert_eq!(t.scale, Vec2::new(2.0, 2.0));
        assert_eq!(t.rotation_degrees, 45.0);

        let moved = t.translated(Vec2::new(-1.0, 1.0));
        assert_eq!(moved.position, Vec2::new(2.0, 5.0));
        assert_eq!(moved.scale, t.scale);
    }

    #[test]
    fn origin_factors_cover_the_nine_points() {
        assert_eq!(Origin::TopLeft.factors(), (0.0, 0.0));
        assert_eq!(Origin::Center.factors(), (0.5, 0.5));
        assert_eq!(Origin::BottomRight.factors(), (1.0, 1.0));
        assert_eq!(Origin::CenterRight.factors(), (1.0, 0.5));
        assert_eq!(Origin::BottomCenter.factors(), (0.5, 1.0));
    }

    #[test]
    fn alignment_none_has_no_factors() {
        assert!(Alignment::None.factors().is_none());
        assert_eq!(Alignment::TopRight.factors(), Some((1.0, 0.0)));
    }
}
