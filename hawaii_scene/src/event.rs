// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads and the handler capability offered to nodes.
//!
//! Handlers follow an explicit return-value protocol: each hook returns `true` when the event
//! was handled, which stops propagation to the remaining hit candidates. Every hook defaults
//! to `false` ("not handled"), so a handler only implements what it cares about.
//!
//! Handlers receive the [`Scene`] mutably together with the id of the node they are attached
//! to, and express their effect by replacing transforms through the scene:
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use hawaii_scene::{Node, NodeHandler, NodeId, Scene, Space, TouchEvent};
//! use std::rc::Rc;
//!
//! struct Draggable;
//!
//! impl NodeHandler for Draggable {
//!     fn on_drag(&self, scene: &mut Scene, node: NodeId, _touch: &TouchEvent, delta: Vec2) -> bool {
//!         scene.translate(node, delta, Space::World);
//!         true
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//! let node = Node::new(Size::new(10.0, 10.0)).with_handler(Rc::new(Draggable));
//! let id = scene.add_node(node, root).unwrap();
//! assert!(scene.node(id).unwrap().handler.is_some());
//! ```

use kurbo::{Point, Vec2};

use crate::scene::Scene;
use crate::types::NodeId;

/// A single touch sample as seen by one node.
///
/// The point is provided in three spaces, computed once per dispatch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// The point in world (root) space.
    pub world: Point,
    /// The point in the node's parent frame (the space the node's position is expressed in).
    pub parent: Point,
    /// The point in the node's own local rectangle space.
    pub local: Point,
    /// Sample timestamp in milliseconds.
    pub timestamp: u64,
}

impl TouchEvent {
    /// A sample whose three spaces coincide.
    #[must_use]
    pub const fn at_world(world: Point, timestamp: u64) -> Self {
        Self {
            world,
            parent: world,
            local: world,
            timestamp,
        }
    }
}

/// A two-finger sample as seen by one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureEvent {
    /// First finger.
    pub a: TouchEvent,
    /// Second finger.
    pub b: TouchEvent,
    /// Windowed pan delta in world units, when a pan was recognized.
    pub delta: Option<Vec2>,
    /// Average movement of both fingers since the previous sample, in world units.
    pub frame_delta: Vec2,
    /// Ratio of the current to the initial finger distance, when a pinch was recognized.
    pub scale_factor: Option<f64>,
    /// Change of the finger-pair angle in degrees, when a rotation was recognized.
    pub angle_degrees: Option<f64>,
}

impl GestureEvent {
    /// A gesture sample with no recognized trigger.
    #[must_use]
    pub const fn new(a: TouchEvent, b: TouchEvent) -> Self {
        Self {
            a,
            b,
            delta: None,
            frame_delta: Vec2::ZERO,
            scale_factor: None,
            angle_degrees: None,
        }
    }

    /// Midpoint of both fingers in world space.
    pub fn world_midpoint(&self) -> Point {
        self.a.world.midpoint(self.b.world)
    }
}

/// Event hooks a node can respond to.
///
/// All hooks return `false` by default. Returning `true` marks the event handled: hit testing
/// stops at this node, and for drags and two-finger gestures the node captures the rest of the
/// interaction.
pub trait NodeHandler {
    /// A single touch went down and up without exceeding the click thresholds.
    fn on_clicked(&self, _scene: &mut Scene, _node: NodeId, _touch: &TouchEvent) -> bool {
        false
    }

    /// A single touch moved after exceeding the click thresholds.
    ///
    /// `local_delta` is the movement since the previous sample, expressed in the node's parent
    /// frame (the space its position lives in).
    fn on_drag(
        &self,
        _scene: &mut Scene,
        _node: NodeId,
        _touch: &TouchEvent,
        _local_delta: Vec2,
    ) -> bool {
        false
    }

    /// A single touch was released.
    fn on_touch_up(&self, _scene: &mut Scene, _node: NodeId, _touch: &TouchEvent) -> bool {
        false
    }

    /// Two fingers went down.
    fn on_two_finger_clicked(
        &self,
        _scene: &mut Scene,
        _node: NodeId,
        _gesture: &GestureEvent,
    ) -> bool {
        false
    }

    /// A two-finger pan was recognized.
    fn on_two_finger_dragged(
        &self,
        _scene: &mut Scene,
        _node: NodeId,
        _gesture: &GestureEvent,
    ) -> bool {
        false
    }

    /// A pinch was recognized.
    fn on_pinch(&self, _scene: &mut Scene, _node: NodeId, _gesture: &GestureEvent) -> bool {
        false
    }

    /// A two-finger rotation was recognized.
    fn on_rotate(&self, _scene: &mut Scene, _node: NodeId, _gesture: &GestureEvent) -> bool {
        false
    }

    /// Two fingers were released.
    fn on_two_finger_touch_up(
        &self,
        _scene: &mut Scene,
        _node: NodeId,
        _gesture: &GestureEvent,
    ) -> bool {
        false
    }
}
