// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hawaii Event State: state machines for touch interactions.
//!
//! This crate provides small, focused state machines for interactions that need tracking
//! across several input samples:
//!
//! - [`tap`]: tell a tap from a drag by elapsed time and travelled distance
//! - [`drag`]: per-sample deltas, total offset, and the captured drag target
//! - [`gesture`]: windowed two-finger pan, pinch, and rotation recognition
//!
//! ## Design Philosophy
//!
//! Each state machine is:
//!
//! - **Minimal and focused**: it handles one interaction pattern
//! - **Geometry-only**: it sees points and timestamps, never a scene or a node
//! - **Generic**: targets are application-specific types (node ids, candidate lists)
//!
//! Hit testing and routing live in `hawaii_dispatch`, which composes these machines into a
//! complete touch dispatcher.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use hawaii_event_state::drag::DragState;
//! use hawaii_event_state::tap::TapState;
//!
//! let mut tap = TapState::new();
//! let mut drag: DragState<u32> = DragState::default();
//!
//! let down = Point::new(10.0, 10.0);
//! tap.on_down(7_u32, down, 0);
//! drag.start(down);
//!
//! // A long move turns the press into a drag.
//! let to = Point::new(40.0, 10.0);
//! if tap.on_move(to, 16) {
//!     let delta = drag.update(to).unwrap();
//!     assert_eq!(delta.x, 30.0);
//! }
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod drag;
pub mod gesture;
pub mod tap;
