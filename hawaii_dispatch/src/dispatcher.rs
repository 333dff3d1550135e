// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch dispatcher: turn raw screen samples into node-level events.
//!
//! Single touch runs `Idle → TouchActive → Dragging → Idle`:
//!
//! - **Down** records the start point and time, hit tests it, and keeps the candidates as the
//!   tentative click targets.
//! - **Move** does nothing until the press breaks the tap thresholds (200 ms or 5 px by
//!   default). From then on, `on_drag` is offered to the candidates recorded at touch down,
//!   most specific first; the first handler returning `true` captures the drag and receives
//!   every later move directly. Each delivered delta runs from the previously delivered point
//!   (the down point for the first one), so movement made under the thresholds is not lost.
//! - **Up** offers `on_clicked` to the tentative targets if the thresholds were never broken
//!   (the up sample included), then sends `on_touch_up` to the captured node, or by hit test
//!   at the up point when nothing was captured.
//!
//! Two fingers run `Idle → TwoTouching → Idle`:
//!
//! - **Down** resets the recognizer, feeds the first frame, and offers
//!   `on_two_finger_clicked` to the candidates under the midpoint. A handler returning `true`
//!   becomes the gesture target.
//! - **Move** feeds the recognizer and dispatches every trigger that fired (pan, pinch,
//!   rotation) to the gesture target, or to the candidates under the midpoint until one
//!   accepts and becomes the target.
//! - **Up** sends `on_two_finger_touch_up` and resets.
//!
//! Handlers receive the scene mutably. The candidate list is computed before any handler runs;
//! nodes removed by an earlier handler are skipped.

use hawaii_event_state::drag::DragState;
use hawaii_event_state::gesture::{GestureRecognizer, GestureThresholds, GestureTriggers};
use hawaii_event_state::tap::{TapResult, TapState, TapThresholds};
use hawaii_scene::{GestureEvent, NodeHandler, NodeId, Scene, TouchEvent};
use hawaii_view2d::SceneCamera;
use kurbo::{Point, Vec2};

use crate::hit::{Candidates, hit_test, localize};

/// Dispatcher settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DispatchConfig {
    /// Limits separating a click from a drag, in screen pixels and milliseconds.
    pub tap: TapThresholds,
    /// Two-finger trigger limits, in screen pixels and degrees.
    pub gesture: GestureThresholds,
}

/// Interaction state of an [`EventDispatcher`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchPhase {
    /// No finger down.
    #[default]
    Idle,
    /// One finger down, no drag captured yet.
    TouchActive,
    /// One finger down and a node captured the drag.
    Dragging,
    /// Two fingers down.
    TwoTouching,
}

/// What a single-touch release delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Release {
    /// Node whose `on_clicked` returned `true`.
    pub clicked: Option<NodeId>,
    /// Node whose `on_touch_up` returned `true` (or the captured node, which always receives it).
    pub released: Option<NodeId>,
}

/// Which nodes handled the triggers of a two-finger move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureOutcome {
    /// Node that handled the pan.
    pub panned: Option<NodeId>,
    /// Node that handled the pinch.
    pub pinched: Option<NodeId>,
    /// Node that handled the rotation.
    pub rotated: Option<NodeId>,
}

/// Snapshot of a dispatcher's state for debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatcherDebugInfo {
    /// Current phase.
    pub phase: DispatchPhase,
    /// Node capturing the current drag.
    pub captured: Option<NodeId>,
    /// Node receiving the current two-finger gesture.
    pub gesture_target: Option<NodeId>,
    /// Tentative click targets recorded at touch down.
    pub tentative_targets: usize,
    /// Whether the current press broke the tap thresholds.
    pub tap_exceeded: bool,
    /// Frames held by the gesture recognizer.
    pub gesture_frames: usize,
}

/// Routes touch input to node handlers.
///
/// Input arrives in screen pixels and is converted through a [`SceneCamera`]. Timestamps are
/// milliseconds from any monotonic clock.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use kurbo::{Point, Size, Vec2};
/// use hawaii_dispatch::EventDispatcher;
/// use hawaii_scene::{Node, NodeHandler, NodeId, Scene, TouchEvent};
/// use hawaii_view2d::SceneCamera;
///
/// struct Counter(Rc<Cell<u32>>);
/// impl NodeHandler for Counter {
///     fn on_clicked(&self, _: &mut Scene, _: NodeId, _: &TouchEvent) -> bool {
///         self.0.set(self.0.get() + 1);
///         true
///     }
/// }
///
/// let clicks = Rc::new(Cell::new(0));
/// let mut scene = Scene::new();
/// let root = scene.root();
/// scene
///     .add_node(
///         Node::new(Size::new(50.0, 50.0)).with_handler(Rc::new(Counter(clicks.clone()))),
///         root,
///     )
///     .unwrap();
///
/// // Screen (0, 0) shows world (0, 0).
/// let mut camera = SceneCamera::new(Size::new(100.0, 100.0));
/// camera.set_position(Vec2::new(50.0, 50.0));
///
/// let mut dispatcher = EventDispatcher::new();
/// dispatcher.touch_down(&mut scene, &camera, Point::new(10.0, 10.0), 0);
/// dispatcher.touch_up(&mut scene, &camera, Point::new(11.0, 10.0), 80);
/// assert_eq!(clicks.get(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventDispatcher {
    phase: DispatchPhase,
    tap: TapState<Candidates>,
    drag: DragState<NodeId>,
    gesture: GestureRecognizer,
    gesture_target: Option<NodeId>,
}

impl EventDispatcher {
    /// Creates a dispatcher with the default thresholds.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Creates a dispatcher with custom thresholds.
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            phase: DispatchPhase::Idle,
            tap: TapState::with_thresholds(config.tap),
            drag: DragState::default(),
            gesture: GestureRecognizer::with_thresholds(config.gesture),
            gesture_target: None,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> DispatchPhase {
        self.phase
    }

    /// The node capturing the current drag.
    pub fn captured(&self) -> Option<NodeId> {
        self.drag.captured()
    }

    /// The node receiving the current two-finger gesture.
    pub fn gesture_target(&self) -> Option<NodeId> {
        self.gesture_target
    }

    /// Abandons any interaction in progress without dispatching anything.
    pub fn cancel(&mut self) {
        if self.phase != DispatchPhase::Idle {
            tracing::debug!(phase = ?self.phase, "interaction cancelled");
        }
        self.tap.cancel();
        self.drag.end();
        self.gesture.reset();
        self.gesture_target = None;
        self.phase = DispatchPhase::Idle;
    }

    /// A finger went down at `screen`.
    ///
    /// Any interaction in progress is abandoned.
    pub fn touch_down(&mut self, scene: &mut Scene, camera: &SceneCamera, screen: Point, time_ms: u64) {
        self.cancel();
        let world = camera.screen_to_world(screen);
        let candidates = hit_test(scene, camera, world);
        tracing::trace!(?world, candidates = candidates.len(), "touch down");
        self.tap.on_down(candidates, screen, time_ms);
        self.drag.start(world);
        self.phase = DispatchPhase::TouchActive;
    }

    /// The finger moved to `screen`.
    ///
    /// Returns the node that handled the drag sample, if any. Before a capture, the sample is
    /// offered to the nodes that were under the finger at touch down, localized at `screen`.
    pub fn touch_move(
        &mut self,
        scene: &mut Scene,
        camera: &SceneCamera,
        screen: Point,
        time_ms: u64,
    ) -> Option<NodeId> {
        if !matches!(self.phase, DispatchPhase::TouchActive | DispatchPhase::Dragging) {
            return None;
        }
        let world = camera.screen_to_world(screen);
        if !self.tap.on_move(screen, time_ms) {
            return None;
        }
        // The last delivered point; the down point until a drag sample is delivered.
        let previous = self.drag.last_pos.unwrap_or(world);

        if let Some(target) = self.drag.captured() {
            if !scene.is_alive(target) {
                return None;
            }
            offer_drag(scene, target, world, previous, time_ms);
            self.drag.update(world);
            return Some(target);
        }

        let candidates = self
            .tap
            .press()
            .map(|press| press.target.clone())
            .unwrap_or_default();
        for id in candidates {
            if !scene.is_alive(id) {
                continue;
            }
            if offer_drag(scene, id, world, previous, time_ms) {
                tracing::debug!(?id, "drag captured");
                self.drag.capture(id);
                self.drag.update(world);
                self.phase = DispatchPhase::Dragging;
                return Some(id);
            }
        }
        None
    }

    /// The finger was lifted at `screen`.
    pub fn touch_up(
        &mut self,
        scene: &mut Scene,
        camera: &SceneCamera,
        screen: Point,
        time_ms: u64,
    ) -> Release {
        if !matches!(self.phase, DispatchPhase::TouchActive | DispatchPhase::Dragging) {
            return Release::default();
        }
        let world = camera.screen_to_world(screen);
        let down_world = self.drag.start_pos.unwrap_or(world);
        let mut release = Release::default();

        if let TapResult::Tap(candidates) = self.tap.on_up(screen, time_ms) {
            release.clicked = candidates.into_iter().find(|&id| {
                let touch = localize(scene, id, down_world, time_ms);
                offer(scene, id, |h, scene| h.on_clicked(scene, id, &touch))
            });
            if let Some(id) = release.clicked {
                tracing::debug!(?id, "clicked");
            }
        }

        match self.drag.end() {
            Some(captured) if scene.is_alive(captured) => {
                let touch = localize(scene, captured, world, time_ms);
                offer(scene, captured, |h, scene| h.on_touch_up(scene, captured, &touch));
                release.released = Some(captured);
            }
            Some(_) => {}
            None => {
                release.released = hit_test(scene, camera, world).into_iter().find(|&id| {
                    let touch = localize(scene, id, world, time_ms);
                    offer(scene, id, |h, scene| h.on_touch_up(scene, id, &touch))
                });
            }
        }

        self.phase = DispatchPhase::Idle;
        release
    }

    /// Two fingers went down at `a` and `b`.
    ///
    /// Returns the node that accepted `on_two_finger_clicked`, which becomes the gesture target.
    pub fn two_finger_down(
        &mut self,
        scene: &mut Scene,
        camera: &SceneCamera,
        a: Point,
        b: Point,
        time_ms: u64,
    ) -> Option<NodeId> {
        self.cancel();
        self.gesture.add_frame(a, b);
        self.phase = DispatchPhase::TwoTouching;

        let (wa, wb) = (camera.screen_to_world(a), camera.screen_to_world(b));
        let target = hit_test(scene, camera, wa.midpoint(wb))
            .into_iter()
            .find(|&id| {
                let event = gesture_event(scene, id, wa, wb, time_ms);
                offer(scene, id, |h, scene| h.on_two_finger_clicked(scene, id, &event))
            });
        if let Some(id) = target {
            tracing::debug!(?id, "gesture target captured");
        }
        self.gesture_target = target;
        target
    }

    /// The two fingers moved to `a` and `b`.
    ///
    /// Pan, pinch, and rotation are checked independently; several may fire for one sample.
    pub fn two_finger_move(
        &mut self,
        scene: &mut Scene,
        camera: &SceneCamera,
        a: Point,
        b: Point,
        time_ms: u64,
    ) -> GestureOutcome {
        if self.phase != DispatchPhase::TwoTouching {
            return GestureOutcome::default();
        }
        self.gesture.add_frame(a, b);
        let triggers = self.gesture.detect();
        if triggers.is_empty() {
            return GestureOutcome::default();
        }
        tracing::trace!(?triggers, "gesture triggers");

        let (wa, wb) = (camera.screen_to_world(a), camera.screen_to_world(b));
        let frame_delta = camera.screen_distance_to_world(self.gesture.frame_delta());
        let template = GestureTemplate {
            a: wa,
            b: wb,
            time_ms,
            triggers,
            delta: triggers.pan.map(|d| camera.screen_distance_to_world(d)),
            frame_delta,
        };
        let candidates = match self.gesture_target {
            Some(target) => Candidates::from_slice(&[target]),
            None => hit_test(scene, camera, wa.midpoint(wb)),
        };

        let mut outcome = GestureOutcome::default();
        if triggers.pan.is_some() {
            outcome.panned = self.offer_gesture(scene, &candidates, &template, |h, scene, id, e| {
                h.on_two_finger_dragged(scene, id, e)
            });
        }
        if triggers.pinch.is_some() {
            outcome.pinched = self.offer_gesture(scene, &candidates, &template, |h, scene, id, e| {
                h.on_pinch(scene, id, e)
            });
        }
        if triggers.rotation.is_some() {
            outcome.rotated = self.offer_gesture(scene, &candidates, &template, |h, scene, id, e| {
                h.on_rotate(scene, id, e)
            });
        }
        outcome
    }

    /// The two fingers were lifted at `a` and `b`.
    ///
    /// Returns the node that handled `on_two_finger_touch_up`.
    pub fn two_finger_up(
        &mut self,
        scene: &mut Scene,
        camera: &SceneCamera,
        a: Point,
        b: Point,
        time_ms: u64,
    ) -> Option<NodeId> {
        if self.phase != DispatchPhase::TwoTouching {
            return None;
        }
        let (wa, wb) = (camera.screen_to_world(a), camera.screen_to_world(b));
        let candidates = match self.gesture_target {
            Some(target) => Candidates::from_slice(&[target]),
            None => hit_test(scene, camera, wa.midpoint(wb)),
        };
        let handled = candidates.into_iter().find(|&id| {
            let event = gesture_event(scene, id, wa, wb, time_ms);
            offer(scene, id, |h, scene| h.on_two_finger_touch_up(scene, id, &event))
        });
        self.cancel();
        handled
    }

    /// Snapshot of the dispatcher state.
    pub fn debug_info(&self) -> DispatcherDebugInfo {
        DispatcherDebugInfo {
            phase: self.phase,
            captured: self.drag.captured(),
            gesture_target: self.gesture_target,
            tentative_targets: self.tap.press().map_or(0, |p| p.target.len()),
            tap_exceeded: self.tap.is_exceeded(),
            gesture_frames: self.gesture.len(),
        }
    }

    /// Offers one gesture trigger to `candidates`; the first acceptor becomes the target.
    fn offer_gesture(
        &mut self,
        scene: &mut Scene,
        candidates: &Candidates,
        template: &GestureTemplate,
        mut hook: impl FnMut(&dyn NodeHandler, &mut Scene, NodeId, &GestureEvent) -> bool,
    ) -> Option<NodeId> {
        let handled = candidates.iter().copied().find(|&id| {
            let event = template.localize(scene, id);
            offer(scene, id, |h, scene| hook(h, scene, id, &event))
        })?;
        if self.gesture_target.is_none() {
            tracing::debug!(id = ?handled, "gesture target captured");
            self.gesture_target = Some(handled);
        }
        Some(handled)
    }
}

/// Scene-independent parts of a gesture sample, localized per candidate.
struct GestureTemplate {
    a: Point,
    b: Point,
    time_ms: u64,
    triggers: GestureTriggers,
    delta: Option<Vec2>,
    frame_delta: Vec2,
}

impl GestureTemplate {
    fn localize(&self, scene: &Scene, id: NodeId) -> GestureEvent {
        GestureEvent {
            delta: self.delta,
            frame_delta: self.frame_delta,
            scale_factor: self.triggers.pinch,
            angle_degrees: self.triggers.rotation,
            ..gesture_event(scene, id, self.a, self.b, self.time_ms)
        }
    }
}

fn gesture_event(scene: &Scene, id: NodeId, a: Point, b: Point, time_ms: u64) -> GestureEvent {
    GestureEvent::new(
        localize(scene, id, a, time_ms),
        localize(scene, id, b, time_ms),
    )
}

/// Offers a drag sample to `id` with the movement expressed in its parent frame.
fn offer_drag(scene: &mut Scene, id: NodeId, world: Point, previous: Point, time_ms: u64) -> bool {
    let touch: TouchEvent = localize(scene, id, world, time_ms);
    let local_delta = match (
        scene.world_to_parent(id, world),
        scene.world_to_parent(id, previous),
    ) {
        (Some(now), Some(before)) => now - before,
        _ => world - previous,
    };
    offer(scene, id, |h, scene| h.on_drag(scene, id, &touch, local_delta))
}

/// Runs `hook` against the handler of `id`; nodes without a handler decline.
fn offer(
    scene: &mut Scene,
    id: NodeId,
    hook: impl FnOnce(&dyn NodeHandler, &mut Scene) -> bool,
) -> bool {
    let Some(handler) = scene.node(id).and_then(|n| n.handler.clone()) else {
        return false;
    };
    hook(&*handler, scene)
}
