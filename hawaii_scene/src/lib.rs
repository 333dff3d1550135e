// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hawaii Scene: a retained-mode 2D scene graph with memoized world transforms.
//!
//! Hawaii Scene is the geometric core of an interactive canvas: a tree of positioned, sized
//! nodes that a renderer paints and an event dispatcher hit tests.
//!
//! - Each [`Node`] carries a local [`Transform`] (position, scale, rotation), a size, an
//!   [`Origin`] pivot, an optional [`Alignment`] against its parent, and a [`PositionMode`]
//!   controlling how much of the ancestor chain it inherits.
//! - The [`Scene`] composes world transforms root to leaf and memoizes them together with
//!   world-space bounds. Any mutation invalidates exactly the mutated node and its subtree.
//! - Every mutation records the previous and new footprints of the affected nodes as damage;
//!   [`Scene::dirty_region`] drains it as a single rectangle for partial repaint.
//!
//! ## Capabilities
//!
//! Nodes are plain data plus two optional, shared capabilities:
//! - [`NodeRenderer`]: draws the node onto a [`Surface`]; see [`render::paint`].
//! - [`NodeHandler`]: receives click, drag, and two-finger gesture events from a dispatcher.
//!
//! ## Coordinate conventions
//!
//! Coordinates are `f64` in a y-down space. Rotations are in degrees and positive values turn
//! clockwise on screen. A node's local rectangle is `(0, 0, width, height)`; its origin selects
//! the pivot inside that rectangle, and its position places the pivot in its parent's space.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use hawaii_scene::{Node, Origin, Scene, Transform};
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//! let card = scene
//!     .add_node(
//!         Node::new(Size::new(40.0, 20.0))
//!             .with_origin(Origin::Center)
//!             .with_transform(Transform::from_position(Vec2::new(100.0, 100.0)).with_rotation(90.0)),
//!         root,
//!     )
//!     .unwrap();
//!
//! // The pivot sits on the position, whatever the rotation.
//! let centre = scene.local_to_world(card, Point::new(20.0, 10.0));
//! assert!((centre - Point::new(100.0, 100.0)).hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod error;
mod event;
mod node;
pub mod render;
mod scene;
mod types;
mod util;

pub use damage::Damage;
pub use error::SceneError;
pub use event::{GestureEvent, NodeHandler, TouchEvent};
pub use node::Node;
pub use render::{NodeRenderer, Surface};
pub use scene::{Scene, SceneBuilder, SceneDebugInfo};
pub use types::{Alignment, HitArea, NodeId, Origin, PositionMode, Space, Transform};
pub use util::try_invert;
