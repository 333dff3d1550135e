// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap recognition: tell a click from the start of a drag.
//!
//! A press stays a tap candidate while the pointer has travelled no more than
//! [`TapThresholds::max_distance`] from the down point and no more than
//! [`TapThresholds::max_duration_ms`] have elapsed. Once either limit is exceeded the press is
//! permanently a drag; releasing it produces no tap.
//!
//! ## Usage
//!
//! 1) Call [`TapState::on_down`] with whatever identifies the tap target (a node id, or the
//!    list of hit candidates under the down point).
//! 2) Call [`TapState::on_move`] on every move; it reports whether the press became a drag.
//! 3) Call [`TapState::on_up`] to learn whether a tap should be delivered.
//!
//! ```
//! use kurbo::Point;
//! use hawaii_event_state::tap::{TapResult, TapState};
//!
//! let mut tap = TapState::new();
//!
//! tap.on_down("button", Point::new(10.0, 10.0), 1_000);
//! assert!(!tap.on_move(Point::new(12.0, 11.0), 1_050)); // still a tap candidate
//! assert_eq!(tap.on_up(Point::new(12.0, 11.0), 1_100), TapResult::Tap("button"));
//!
//! tap.on_down("button", Point::new(10.0, 10.0), 2_000);
//! assert!(tap.on_move(Point::new(30.0, 10.0), 2_020)); // moved 20 px: drag
//! assert_eq!(tap.on_up(Point::new(30.0, 10.0), 2_040), TapResult::Suppressed(Some("button")));
//! ```

use kurbo::Point;

/// Limits separating a tap from a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapThresholds {
    /// Longest press, in milliseconds, that still counts as a tap.
    pub max_duration_ms: u64,
    /// Longest distance from the down point that still counts as a tap.
    pub max_distance: f64,
}

impl Default for TapThresholds {
    /// 200 ms and 5 px.
    fn default() -> Self {
        Self {
            max_duration_ms: 200,
            max_distance: 5.0,
        }
    }
}

impl TapThresholds {
    /// Creates thresholds from a duration in milliseconds and a distance.
    #[must_use]
    pub const fn new(max_duration_ms: u64, max_distance: f64) -> Self {
        Self {
            max_duration_ms,
            max_distance,
        }
    }

    /// Returns `true` if a sample `elapsed_ms` after the press at `distance` from it breaks
    /// either limit.
    #[must_use]
    pub fn exceeded(&self, elapsed_ms: u64, distance: f64) -> bool {
        elapsed_ms > self.max_duration_ms || distance > self.max_distance
    }
}

/// An active press.
#[derive(Clone, Debug, PartialEq)]
pub struct Press<K> {
    /// What the press targets.
    pub target: K,
    /// Pointer position at press time.
    pub down_position: Point,
    /// Timestamp of the press in milliseconds.
    pub down_time: u64,
    /// `true` once a sample broke the tap thresholds.
    pub exceeded: bool,
}

/// Outcome of releasing a press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapResult<K> {
    /// Deliver a tap to the press target.
    Tap(K),
    /// No tap; carries the press target if there was an active press.
    Suppressed(Option<K>),
}

/// Single-pointer tap state machine.
#[derive(Clone, Debug)]
pub struct TapState<K> {
    press: Option<Press<K>>,
    /// Limits applied to every press.
    pub thresholds: TapThresholds,
}

impl<K> Default for TapState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TapState<K> {
    /// Creates a tap state with the default thresholds (200 ms, 5 px).
    pub fn new() -> Self {
        Self::with_thresholds(TapThresholds::default())
    }

    /// Creates a tap state with custom thresholds.
    pub fn with_thresholds(thresholds: TapThresholds) -> Self {
        Self {
            press: None,
            thresholds,
        }
    }

    /// Begins a press on `target`, replacing any press in progress.
    pub fn on_down(&mut self, target: K, position: Point, time_ms: u64) {
        self.press = Some(Press {
            target,
            down_position: position,
            down_time: time_ms,
            exceeded: false,
        });
    }

    /// Records a move sample; returns `true` once the press is a drag.
    ///
    /// The result is sticky: coming back near the down point does not make a drag a tap again.
    /// Without an active press this returns `false`.
    pub fn on_move(&mut self, position: Point, time_ms: u64) -> bool {
        let thresholds = self.thresholds;
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        if !press.exceeded {
            let elapsed = time_ms.saturating_sub(press.down_time);
            let distance = (position - press.down_position).hypot();
            press.exceeded = thresholds.exceeded(elapsed, distance);
        }
        press.exceeded
    }

    /// Ends the press.
    ///
    /// The up sample itself is checked against the thresholds, so a slow or distant release
    /// without intermediate moves is still no tap.
    pub fn on_up(&mut self, position: Point, time_ms: u64) -> TapResult<K> {
        let exceeded = self.on_move(position, time_ms);
        match self.press.take() {
            Some(press) if !exceeded => TapResult::Tap(press.target),
            Some(press) => TapResult::Suppressed(Some(press.target)),
            None => TapResult::Suppressed(None),
        }
    }

    /// Abandons the press without a result.
    pub fn cancel(&mut self) {
        self.press = None;
    }

    /// The press in progress, if any.
    pub fn press(&self) -> Option<&Press<K>> {
        self.press.as_ref()
    }

    /// Returns `true` while a press is active.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Returns `true` if the active press already broke the thresholds.
    pub fn is_exceeded(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.exceeded)
    }
}
