// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hawaii View 2D: the scene camera.
//!
//! This crate provides [`SceneCamera`], a small headless model of what part of a
//! [`hawaii_scene::Scene`] is visible in a viewport measured in device pixels. It focuses on:
//! - Camera state (pan + per-axis zoom), expressed as a [`hawaii_scene::Transform`] whose
//!   position is the world point under the viewport centre.
//! - Coordinate conversion between screen and world space, for turning raw touch samples into
//!   world points before dispatch.
//! - The view matrix a paint pass concatenates before drawing nodes.
//! - A discrete zoom ladder ([`ZoomLevels`]) for double-tap style zoom toggling, plus continuous
//!   zoom about an anchor.
//!
//! It does **not** draw anything or interpret input events; callers wire pinch and pan
//! gestures into [`SceneCamera::zoom_about_screen_point`] and [`SceneCamera::pan_by_screen`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use hawaii_view2d::SceneCamera;
//!
//! let mut camera = SceneCamera::new(Size::new(800.0, 600.0));
//!
//! // Double tap near the top-left corner: zoom in one level around that point.
//! let focal = Point::new(100.0, 100.0);
//! let world = camera.screen_to_world(focal);
//! camera.toggle_zoom(focal);
//! assert_eq!(camera.zoom_level(), 1);
//! assert!((camera.screen_to_world(focal) - world).hypot() < 1e-9);
//!
//! // Only a quarter of the world area remains visible.
//! let visible = camera.visible_world_rect();
//! assert!((visible.area() - 800.0 * 600.0 / 4.0).abs() < 1e-6);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod camera;
mod zoom;

pub use camera::{SceneCamera, SceneCameraDebugInfo};
pub use zoom::ZoomLevels;
