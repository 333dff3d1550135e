// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: per-sample deltas, total offset, and the captured target.
//!
//! ## Usage
//!
//! 1) Start tracking with [`DragState::start`] at the down position.
//! 2) On each move, [`DragState::update`] returns the movement since the previous sample.
//! 3) When a handler accepts the drag, [`DragState::capture`] pins the target so later samples
//!    go straight to it instead of being hit tested again.
//! 4) [`DragState::end`] resets the state and hands back the captured target.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use hawaii_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.captured(), None);
//!
//! drag.capture(42_u32);
//! assert_eq!(drag.update(Point::new(16.0, 25.0)), Some(Vec2::new(1.0, 0.0)));
//! assert_eq!(drag.total_offset(Point::new(16.0, 25.0)), Some(Vec2::new(6.0, 5.0)));
//! assert_eq!(drag.end(), Some(42));
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Tracks one pointer's drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState<K> {
    /// Position where the drag started.
    pub start_pos: Option<Point>,
    /// Last recorded position.
    pub last_pos: Option<Point>,
    captured: Option<K>,
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self {
            start_pos: None,
            last_pos: None,
            captured: None,
        }
    }
}

impl<K: Copy> DragState<K> {
    /// Start tracking from `pos`, dropping any previous capture.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.captured = None;
    }

    /// Record `pos`, returning the movement since the previous sample.
    ///
    /// Returns `None` when no drag was started.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Offset of `current_pos` from the start position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Pin `target` as the receiver of the rest of this drag.
    ///
    /// Ignored when no drag was started.
    pub fn capture(&mut self, target: K) {
        if self.start_pos.is_some() {
            self.captured = Some(target);
        }
    }

    /// The captured target, if any.
    pub fn captured(&self) -> Option<K> {
        self.captured
    }

    /// Stop tracking, returning the captured target.
    pub fn end(&mut self) -> Option<K> {
        self.start_pos = None;
        self.last_pos = None;
        self.captured.take()
    }

    /// Returns `true` while a drag is tracked.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle() {
        let mut drag = DragState::<u32>::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.total_offset(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.end(), None);
    }

    #[test]
    fn deltas_are_incremental_and_total_is_cumulative() {
        let mut drag = DragState::<u32>::default();
        drag.start(Point::new(0.0, 0.0));
        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.update(Point::new(6.0, 7.0)), Some(Vec2::new(-2.0, 0.0)));
        assert_eq!(
            drag.total_offset(Point::new(6.0, 7.0)),
            Some(Vec2::new(6.0, 7.0))
        );
    }

    #[test]
    fn capture_requires_an_active_drag() {
        let mut drag = DragState::default();
        drag.capture(1_u32);
        assert_eq!(drag.captured(), None);

        drag.start(Point::ZERO);
        drag.capture(2);
        assert_eq!(drag.captured(), Some(2));
    }

    #[test]
    fn restart_drops_previous_capture() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        drag.capture(9_u32);
        drag.start(Point::new(50.0, 60.0));
        assert_eq!(drag.captured(), None);
        assert_eq!(
            drag.total_offset(Point::new(55.0, 65.0)),
            Some(Vec2::new(5.0, 5.0))
        );
    }

    #[test]
    fn end_returns_capture_once() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        drag.capture(4_u32);
        assert_eq!(drag.end(), Some(4));
        assert_eq!(drag.end(), None);
    }
}
