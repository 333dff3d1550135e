// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hawaii Dispatch: hit testing and touch routing for a Hawaii scene.
//!
//! This crate connects raw touch input to the [`NodeHandler`](hawaii_scene::NodeHandler) hooks of
//! scene nodes:
//!
//! - [`hit`]: postorder hit testing (most specific node first) with cheap world-bounds
//!   rejection, exact local-space tests, and screen-fixed hit areas.
//! - [`EventDispatcher`]: click vs drag discrimination, drag capture, and two-finger gesture
//!   routing through `hawaii_event_state`'s recognizer.
//!
//! ## Data flow
//!
//! ```text
//! screen point ─▶ SceneCamera (screen → world) ─▶ EventDispatcher (hit test, thresholds)
//!             ─▶ node handler ─▶ Scene::set_transform ─▶ cache invalidation + dirty region
//! ```
//!
//! Handlers return `true` to stop propagation. For drags and gestures, the accepting node also
//! captures the rest of the interaction.
//!
//! ## Example: a draggable card
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect, Size, Vec2};
//! use hawaii_dispatch::EventDispatcher;
//! use hawaii_scene::{Node, NodeHandler, NodeId, Scene, Space, TouchEvent};
//! use hawaii_view2d::SceneCamera;
//!
//! struct Draggable;
//! impl NodeHandler for Draggable {
//!     fn on_drag(&self, scene: &mut Scene, node: NodeId, _: &TouchEvent, delta: Vec2) -> bool {
//!         scene.translate(node, delta, Space::World);
//!         true
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let root = scene.root();
//! let card = scene
//!     .add_node(Node::new(Size::new(40.0, 40.0)).with_handler(Rc::new(Draggable)), root)
//!     .unwrap();
//!
//! let mut camera = SceneCamera::new(Size::new(200.0, 200.0));
//! camera.set_position(Vec2::new(100.0, 100.0));
//!
//! let mut dispatcher = EventDispatcher::new();
//! dispatcher.touch_down(&mut scene, &camera, Point::new(20.0, 20.0), 0);
//! dispatcher.touch_move(&mut scene, &camera, Point::new(30.0, 20.0), 16);
//! dispatcher.touch_move(&mut scene, &camera, Point::new(50.0, 25.0), 32);
//! dispatcher.touch_up(&mut scene, &camera, Point::new(50.0, 25.0), 48);
//!
//! assert_eq!(scene.world_bounds(card), Rect::new(30.0, 5.0, 70.0, 45.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod dispatcher;
pub mod hit;

pub use dispatcher::{
    DispatchConfig, DispatchPhase, DispatcherDebugInfo, EventDispatcher, GestureOutcome, Release,
};
