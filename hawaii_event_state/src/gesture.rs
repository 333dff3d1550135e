// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger gesture recognition over a short window of frames.
//!
//! [`GestureRecognizer`] keeps the most recent point pairs (six by default) in a FIFO and
//! checks three independent triggers against it:
//!
//! - **Pan**: the newest frame compared with the average of the first half of a full window;
//!   both fingers' movements are averaged. Fires when either axis moves more than
//!   [`GestureThresholds::pan_distance`].
//! - **Pinch**: the ratio of the newest to the oldest finger distance. Fires when it differs
//!   from one by more than [`GestureThresholds::pinch_ratio`].
//! - **Rotation**: the change of the finger-pair angle from the oldest to the newest frame,
//!   normalized to `(-180, 180]` degrees. Fires above [`GestureThresholds::rotation_degrees`].
//!
//! Averaging over a window filters the jitter of real touch input; the triggers compare against
//! the start of the window rather than the previous frame, so slow but steady motion is
//! still recognized.
//!
//! ```
//! use kurbo::Point;
//! use hawaii_event_state::gesture::GestureRecognizer;
//!
//! let mut recognizer = GestureRecognizer::new();
//! recognizer.add_frame(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
//! recognizer.add_frame(Point::new(-25.0, 0.0), Point::new(125.0, 0.0));
//!
//! let scale = recognizer.try_detect_pinch().unwrap();
//! assert!((scale - 1.5).abs() < 1e-9);
//! assert!(recognizer.try_detect_rotation().is_none());
//! assert!(recognizer.try_detect_pan().is_none()); // window not full yet
//! ```

use alloc::collections::VecDeque;

use kurbo::{Point, Vec2};

/// One two-finger sample.
pub type Frame = (Point, Point);

/// Trigger limits and window size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureThresholds {
    /// Minimum averaged movement on either axis for a pan.
    pub pan_distance: f64,
    /// Minimum `|ratio - 1|` of finger distances for a pinch.
    pub pinch_ratio: f64,
    /// Minimum absolute angle change in degrees for a rotation.
    pub rotation_degrees: f64,
    /// Number of frames kept. Values below two act as two.
    pub capacity: usize,
}

impl Default for GestureThresholds {
    /// 3 px, 0.05, 3°, six frames.
    fn default() -> Self {
        Self {
            pan_distance: 3.0,
            pinch_ratio: 0.05,
            rotation_degrees: 3.0,
            capacity: 6,
        }
    }
}

/// Triggers recognized for the current window, as returned by [`GestureRecognizer::detect`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureTriggers {
    /// Averaged pan delta.
    pub pan: Option<Vec2>,
    /// Ratio of current to initial finger distance.
    pub pinch: Option<f64>,
    /// Change of the finger-pair angle in degrees.
    pub rotation: Option<f64>,
}

impl GestureTriggers {
    /// Returns `true` if no trigger fired.
    pub fn is_empty(&self) -> bool {
        self.pan.is_none() && self.pinch.is_none() && self.rotation.is_none()
    }
}

/// Windowed two-finger gesture detector.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    frames: VecDeque<Frame>,
    thresholds: GestureThresholds,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    /// Creates a recognizer with the default thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(GestureThresholds::default())
    }

    /// Creates a recognizer with custom thresholds.
    pub fn with_thresholds(thresholds: GestureThresholds) -> Self {
        let capacity = thresholds.capacity.max(2);
        Self {
            frames: VecDeque::with_capacity(capacity + 1),
            thresholds: GestureThresholds {
                capacity,
                ..thresholds
            },
        }
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    /// Drops every frame.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    /// Appends a frame, evicting the oldest once the window is full.
    pub fn add_frame(&mut self, a: Point, b: Point) {
        self.frames.push_back((a, b));
        while self.frames.len() > self.thresholds.capacity {
            self.frames.pop_front();
        }
    }

    /// Number of frames in the window.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the window holds no frame.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns `true` once the window holds `capacity` frames.
    pub fn is_full(&self) -> bool {
        self.frames.len() == self.thresholds.capacity
    }

    /// Frames from oldest to newest.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> + '_ {
        self.frames.iter()
    }

    /// Average movement of both fingers between the two newest frames.
    ///
    /// Zero with fewer than two frames.
    pub fn frame_delta(&self) -> Vec2 {
        let n = self.frames.len();
        if n < 2 {
            return Vec2::ZERO;
        }
        let (pa, pb) = self.frames[n - 2];
        let (a, b) = self.frames[n - 1];
        ((a - pa) + (b - pb)) / 2.0
    }

    /// Averaged pan delta, when a full window moved far enough.
    pub fn try_detect_pan(&self) -> Option<Vec2> {
        if !self.is_full() {
            return None;
        }
        let half = self.thresholds.capacity / 2;
        let (sum_a, sum_b) = self
            .frames
            .iter()
            .take(half)
            .fold((Vec2::ZERO, Vec2::ZERO), |(sa, sb), (a, b)| {
                (sa + a.to_vec2(), sb + b.to_vec2())
            });
        let count = half as f64;
        let baseline_a = sum_a / count;
        let baseline_b = sum_b / count;
        let (a, b) = *self.frames.back()?;
        let delta = ((a.to_vec2() - baseline_a) + (b.to_vec2() - baseline_b)) / 2.0;
        let limit = self.thresholds.pan_distance;
        (delta.x.abs() > limit || delta.y.abs() > limit).then_some(delta)
    }

    /// Ratio of the newest to the oldest finger distance, when it changed enough.
    ///
    /// Needs two frames and a non-zero oldest distance.
    pub fn try_detect_pinch(&self) -> Option<f64> {
        let (initial, latest) = self.ends()?;
        let initial_distance = (initial.1 - initial.0).hypot();
        if initial_distance == 0.0 {
            return None;
        }
        let ratio = (latest.1 - latest.0).hypot() / initial_distance;
        ((ratio - 1.0).abs() > self.thresholds.pinch_ratio).then_some(ratio)
    }

    /// Change of the finger-pair angle from the oldest to the newest frame, in degrees.
    ///
    /// Positive values turn clockwise on a y-down screen. Needs two frames.
    pub fn try_detect_rotation(&self) -> Option<f64> {
        let (initial, latest) = self.ends()?;
        let change = normalize_degrees(angle_degrees(latest) - angle_degrees(initial));
        (change.abs() > self.thresholds.rotation_degrees).then_some(change)
    }

    /// Checks all three triggers.
    pub fn detect(&self) -> GestureTriggers {
        GestureTriggers {
            pan: self.try_detect_pan(),
            pinch: self.try_detect_pinch(),
            rotation: self.try_detect_rotation(),
        }
    }

    fn ends(&self) -> Option<(Frame, Frame)> {
        if self.frames.len() < 2 {
            return None;
        }
        Some((*self.frames.front()?, *self.frames.back()?))
    }
}

/// Direction of the vector from the first to the second finger.
fn angle_degrees((a, b): Frame) -> f64 {
    (b - a).atan2().to_degrees()
}

/// Maps an angle difference into `(-180, 180]`.
fn normalize_degrees(mut d: f64) -> f64 {
    while d > 180.0 {
        d -= 360.0;
    }
    while d <= -180.0 {
        d += 360.0;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn window_evicts_oldest() {
        let mut r = GestureRecognizer::new();
        for i in 0..8 {
            r.add_frame(p(f64::from(i), 0.0), p(10.0, 0.0));
        }
        assert_eq!(r.len(), 6);
        assert!(r.is_full());
        assert_eq!(r.frames().next().map(|f| f.0), Some(p(2.0, 0.0)));
    }

    #[test]
    fn pan_needs_full_window() {
        let mut r = GestureRecognizer::new();
        for i in 0..5 {
            let x = f64::from(i) * 10.0;
            r.add_frame(p(x, 0.0), p(x + 50.0, 0.0));
        }
        assert!(r.try_detect_pan().is_none());
        r.add_frame(p(50.0, 0.0), p(100.0, 0.0));
        // Baseline = average of x in {0, 10, 20} = 10; newest = 50.
        let delta = r.try_detect_pan().unwrap();
        assert!((delta.x - 40.0).abs() < 1e-9);
        assert_eq!(delta.y, 0.0);
    }

    #[test]
    fn pan_below_threshold_is_ignored() {
        let mut r = GestureRecognizer::new();
        for i in 0..6 {
            let y = f64::from(i) * 0.5;
            r.add_frame(p(0.0, y), p(50.0, y));
        }
        // Baseline y = 0.5; newest y = 2.5; delta 2.0 <= 3.
        assert!(r.try_detect_pan().is_none());
    }

    #[test]
    fn pinch_ratio_and_threshold() {
        let mut r = GestureRecognizer::new();
        r.add_frame(p(0.0, 0.0), p(100.0, 0.0));
        r.add_frame(p(0.0, 0.0), p(104.0, 0.0));
        assert!(r.try_detect_pinch().is_none(), "4% change is below threshold");
        r.add_frame(p(0.0, 0.0), p(90.0, 0.0));
        let ratio = r.try_detect_pinch().unwrap();
        assert!((ratio - 0.9).abs() < 1e-9);
    }

    #[test]
    fn pinch_with_coincident_fingers_is_ignored() {
        let mut r = GestureRecognizer::new();
        r.add_frame(p(5.0, 5.0), p(5.0, 5.0));
        r.add_frame(p(0.0, 0.0), p(100.0, 0.0));
        assert!(r.try_detect_pinch().is_none());
    }

    #[test]
    fn rotation_sign_and_wraparound() {
        let mut r = GestureRecognizer::new();
        r.add_frame(p(0.0, 0.0), p(100.0, 0.0));
        r.add_frame(p(0.0, 0.0), p(0.0, 100.0));
        let change = r.try_detect_rotation().unwrap();
        assert!((change - 90.0).abs() < 1e-9);

        // Crossing the ±180° seam yields the short way round.
        r.reset();
        r.add_frame(p(0.0, 0.0), p(-100.0, 1.0));
        r.add_frame(p(0.0, 0.0), p(-100.0, -1.0));
        let change = r.try_detect_rotation();
        assert!(change.is_none(), "about 1.15° across the seam: {change:?}");
    }

    #[test]
    fn small_rotation_is_ignored() {
        let mut r = GestureRecognizer::new();
        r.add_frame(p(0.0, 0.0), p(100.0, 0.0));
        r.add_frame(p(0.0, 0.0), p(100.0, 5.0));
        assert!(r.try_detect_rotation().is_none(), "about 2.86°");
    }

    #[test]
    fn frame_delta_averages_both_fingers() {
        let mut r = GestureRecognizer::new();
        assert_eq!(r.frame_delta(), Vec2::ZERO);
        r.add_frame(p(0.0, 0.0), p(10.0, 0.0));
        r.add_frame(p(2.0, 4.0), p(14.0, 0.0));
        assert_eq!(r.frame_delta(), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn detect_reports_independent_triggers() {
        let mut r = GestureRecognizer::new();
        r.add_frame(p(0.0, 0.0), p(100.0, 0.0));
        r.add_frame(p(-25.0, 0.0), p(125.0, 0.0));
        let t = r.detect();
        assert!(t.pan.is_none());
        assert!(t.pinch.is_some());
        assert!(t.rotation.is_none());
        assert!(!t.is_empty());
    }

    #[test]
    fn tiny_capacity_is_raised_to_two() {
        let r = GestureRecognizer::with_thresholds(GestureThresholds {
            capacity: 0,
            ..GestureThresholds::default()
        });
        assert_eq!(r.thresholds().capacity, 2);
    }
}
