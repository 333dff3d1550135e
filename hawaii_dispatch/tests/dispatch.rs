// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `hawaii_dispatch` crate.
//!
//! These drive an `EventDispatcher` with synthetic touch samples against a small scene and
//! check which hooks ran, on which nodes, with which payloads.

use std::cell::RefCell;
use std::rc::Rc;

use hawaii_dispatch::{DispatchPhase, EventDispatcher, GestureOutcome};
use hawaii_scene::{GestureEvent, Node, NodeHandler, NodeId, Scene, Space, TouchEvent, Transform};
use hawaii_view2d::SceneCamera;
use kurbo::{Point, Size, Vec2};

#[derive(Clone, Debug, PartialEq)]
enum Seen {
    Clicked(&'static str, Point),
    Drag(&'static str, Vec2),
    TouchUp(&'static str),
    TwoFingerClicked(&'static str),
    TwoFingerDragged(&'static str, Vec2),
    Pinch(&'static str, f64),
    Rotate(&'static str, f64),
    TwoFingerUp(&'static str),
}

type Log = Rc<RefCell<Vec<Seen>>>;

/// Records every hook and answers with `accept`.
struct Probe {
    name: &'static str,
    accept: bool,
    moves: bool,
    log: Log,
}

impl NodeHandler for Probe {
    fn on_clicked(&self, _: &mut Scene, _: NodeId, touch: &TouchEvent) -> bool {
        self.log
            .borrow_mut()
            .push(Seen::Clicked(self.name, touch.local));
        self.accept
    }

    fn on_drag(&self, scene: &mut Scene, node: NodeId, _: &TouchEvent, delta: Vec2) -> bool {
        self.log.borrow_mut().push(Seen::Drag(self.name, delta));
        if self.moves {
            scene.translate(node, delta, Space::World);
        }
        self.accept
    }

    fn on_touch_up(&self, _: &mut Scene, _: NodeId, _: &TouchEvent) -> bool {
        self.log.borrow_mut().push(Seen::TouchUp(self.name));
        self.accept
    }

    fn on_two_finger_clicked(&self, _: &mut Scene, _: NodeId, _: &GestureEvent) -> bool {
        self.log.borrow_mut().push(Seen::TwoFingerClicked(self.name));
        self.accept
    }

    fn on_two_finger_dragged(&self, _: &mut Scene, _: NodeId, g: &GestureEvent) -> bool {
        let delta = g.delta.unwrap_or_default();
        self.log
            .borrow_mut()
            .push(Seen::TwoFingerDragged(self.name, delta));
        self.accept
    }

    fn on_pinch(&self, _: &mut Scene, _: NodeId, g: &GestureEvent) -> bool {
        let scale = g.scale_factor.unwrap_or(1.0);
        self.log.borrow_mut().push(Seen::Pinch(self.name, scale));
        self.accept
    }

    fn on_rotate(&self, _: &mut Scene, _: NodeId, g: &GestureEvent) -> bool {
        let angle = g.angle_degrees.unwrap_or(0.0);
        self.log.borrow_mut().push(Seen::Rotate(self.name, angle));
        self.accept
    }

    fn on_two_finger_touch_up(&self, _: &mut Scene, _: NodeId, _: &GestureEvent) -> bool {
        self.log.borrow_mut().push(Seen::TwoFingerUp(self.name));
        self.accept
    }
}

struct World {
    scene: Scene,
    camera: SceneCamera,
    dispatcher: EventDispatcher,
    parent: NodeId,
    child: NodeId,
    log: Log,
}

/// Parent `[0, 0, 100, 100]` with a child at `(10, 10)` of size 20, both accepting; the
/// camera maps screen to world one to one.
fn world(child_moves: bool) -> World {
    let log: Log = Rc::default();
    let mut scene = Scene::new();
    let root = scene.root();
    let parent = scene
        .add_node(
            Node::new(Size::new(100.0, 100.0)).with_handler(Rc::new(Probe {
                name: "parent",
                accept: true,
                moves: false,
                log: log.clone(),
            })),
            root,
        )
        .unwrap();
    let child = scene
        .add_node(
            Node::new(Size::new(20.0, 20.0))
                .with_transform(Transform::from_position(Vec2::new(10.0, 10.0)))
                .with_handler(Rc::new(Probe {
                    name: "child",
                    accept: true,
                    moves: child_moves,
                    log: log.clone(),
                })),
            parent,
        )
        .unwrap();
    let mut camera = SceneCamera::new(Size::new(400.0, 400.0));
    camera.set_position(Vec2::new(200.0, 200.0));
    World {
        scene,
        camera,
        dispatcher: EventDispatcher::new(),
        parent,
        child,
        log,
    }
}

impl World {
    fn down(&mut self, x: f64, y: f64, t: u64) {
        self.dispatcher
            .touch_down(&mut self.scene, &self.camera, Point::new(x, y), t);
    }

    fn moved(&mut self, x: f64, y: f64, t: u64) -> Option<NodeId> {
        self.dispatcher
            .touch_move(&mut self.scene, &self.camera, Point::new(x, y), t)
    }

    fn up(&mut self, x: f64, y: f64, t: u64) -> hawaii_dispatch::Release {
        self.dispatcher
            .touch_up(&mut self.scene, &self.camera, Point::new(x, y), t)
    }

    fn seen(&self) -> Vec<Seen> {
        self.log.borrow().clone()
    }
}

#[test]
fn click_goes_to_the_most_specific_node() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    let release = w.up(20.0, 20.0, 50);
    assert_eq!(release.clicked, Some(w.child));
    assert_eq!(release.released, Some(w.child));
    assert_eq!(
        w.seen(),
        vec![
            Seen::Clicked("child", Point::new(10.0, 10.0)),
            Seen::TouchUp("child"),
        ]
    );
}

#[test]
fn click_outside_child_reaches_parent() {
    let mut w = world(false);
    w.down(60.0, 60.0, 0);
    let release = w.up(60.0, 60.0, 50);
    assert_eq!(release.clicked, Some(w.parent));
    assert_eq!(
        w.seen()[0],
        Seen::Clicked("parent", Point::new(60.0, 60.0))
    );
}

#[test]
fn small_quick_movement_is_a_click_without_drag() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    assert_eq!(w.moved(22.0, 21.0, 40), None);
    assert_eq!(w.moved(23.0, 23.0, 80), None);
    let release = w.up(23.0, 23.0, 120);
    assert_eq!(release.clicked, Some(w.child));
    assert!(w.seen().iter().all(|s| !matches!(s, Seen::Drag(..))));
}

#[test]
fn large_movement_is_a_drag_without_click() {
    let mut w = world(true);
    w.down(20.0, 20.0, 0);
    assert_eq!(w.moved(30.0, 20.0, 16), Some(w.child));
    assert_eq!(w.dispatcher.phase(), DispatchPhase::Dragging);
    assert_eq!(w.dispatcher.captured(), Some(w.child));
    let release = w.up(30.0, 20.0, 32);
    assert_eq!(release.clicked, None);
    assert_eq!(release.released, Some(w.child));
    assert_eq!(
        w.seen(),
        vec![
            Seen::Drag("child", Vec2::new(10.0, 0.0)),
            Seen::TouchUp("child"),
        ]
    );
    assert_eq!(w.dispatcher.phase(), DispatchPhase::Idle);
}

#[test]
fn slow_press_is_not_a_click() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    let release = w.up(20.0, 20.0, 500);
    assert_eq!(release.clicked, None);
    assert_eq!(w.seen(), vec![Seen::TouchUp("child")]);
}

#[test]
fn captured_drag_follows_the_finger_off_the_node() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    w.moved(28.0, 20.0, 16);
    // Far outside the child (and the parent), the capture still routes moves.
    assert_eq!(w.moved(300.0, 300.0, 32), Some(w.child));
    let drags: Vec<_> = w
        .seen()
        .into_iter()
        .filter(|s| matches!(s, Seen::Drag(..)))
        .collect();
    assert_eq!(
        drags,
        vec![
            Seen::Drag("child", Vec2::new(8.0, 0.0)),
            Seen::Drag("child", Vec2::new(272.0, 280.0)),
        ]
    );
}

#[test]
fn drag_delta_is_expressed_in_the_parent_frame() {
    let mut w = world(false);
    // Scale the parent by 2: a world delta of 10 is 5 parent units for the child.
    w.scene.set_transform(
        w.parent,
        Transform::IDENTITY.with_uniform_scale(2.0),
    );
    w.down(40.0, 40.0, 0);
    w.moved(50.0, 40.0, 16);
    assert_eq!(w.seen(), vec![Seen::Drag("child", Vec2::new(5.0, 0.0))]);
}

#[test]
fn touch_up_without_capture_is_hit_tested_at_release() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    // Slow release over the parent only.
    let release = w.up(80.0, 80.0, 1_000);
    assert_eq!(release.clicked, None);
    assert_eq!(release.released, Some(w.parent));
}

#[test]
fn cancel_abandons_without_dispatch() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    w.dispatcher.cancel();
    let release = w.up(20.0, 20.0, 10);
    assert_eq!(release, hawaii_dispatch::Release::default());
    assert!(w.seen().is_empty());
}

#[test]
fn two_finger_pinch_reports_scale_factor() {
    let mut w = world(false);
    let (cam, scene, d) = (&w.camera, &mut w.scene, &mut w.dispatcher);

    // Midpoint (50, 50) lies in the parent only.
    let target = d.two_finger_down(scene, cam, Point::new(25.0, 50.0), Point::new(75.0, 50.0), 0);
    assert_eq!(target, Some(w.parent));

    let outcome = d.two_finger_move(
        scene,
        cam,
        Point::new(12.5, 50.0),
        Point::new(87.5, 50.0),
        16,
    );
    assert_eq!(
        outcome,
        GestureOutcome {
            panned: None,
            pinched: Some(w.parent),
            rotated: None,
        }
    );
    let pinch = w
        .log
        .borrow()
        .iter()
        .find_map(|s| match s {
            Seen::Pinch(_, f) => Some(*f),
            _ => None,
        })
        .unwrap();
    assert!((pinch - 1.5).abs() < 1e-9);
}

#[test]
fn two_finger_rotation_and_pan_fire_independently() {
    let mut w = world(false);
    let (cam, scene, d) = (&w.camera, &mut w.scene, &mut w.dispatcher);
    d.two_finger_down(scene, cam, Point::new(40.0, 50.0), Point::new(60.0, 50.0), 0);

    // Rotate a quarter turn around the midpoint.
    let rotated = d.two_finger_move(scene, cam, Point::new(50.0, 40.0), Point::new(50.0, 60.0), 16);
    assert_eq!(rotated.rotated, Some(w.parent));
    assert_eq!(rotated.panned, None);

    // Fill the window while translating; once full, the pan fires.
    let mut last = GestureOutcome::default();
    for i in 1..=4_u32 {
        let dx = f64::from(i) * 5.0;
        last = d.two_finger_move(
            scene,
            cam,
            Point::new(50.0 + dx, 40.0),
            Point::new(50.0 + dx, 60.0),
            16 + u64::from(i) * 16,
        );
    }
    assert_eq!(last.panned, Some(w.parent));

    assert_eq!(d.two_finger_up(scene, cam, Point::ZERO, Point::ZERO, 200), Some(w.parent));
    assert_eq!(d.phase(), DispatchPhase::Idle);

    let log = w.log.borrow();
    // The midpoint misses the child, so only the parent is offered the down.
    assert_eq!(log[0], Seen::TwoFingerClicked("parent"));
    assert!(log.iter().any(|s| matches!(s, Seen::Rotate("parent", a) if (*a - 90.0).abs() < 1e-9)));
    assert!(log.iter().any(|s| matches!(s, Seen::TwoFingerDragged("parent", _))));
    assert_eq!(log.last(), Some(&Seen::TwoFingerUp("parent")));
}

#[test]
fn removed_capture_target_is_not_called() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    w.moved(30.0, 20.0, 16);
    assert_eq!(w.dispatcher.captured(), Some(w.child));
    w.scene.remove_subtree(w.child).unwrap();
    assert_eq!(w.moved(40.0, 20.0, 32), None);
    let release = w.up(40.0, 20.0, 48);
    assert_eq!(release.released, None);
}

#[test]
fn debug_info_tracks_the_press() {
    let mut w = world(false);
    w.down(20.0, 20.0, 0);
    let info = w.dispatcher.debug_info();
    assert_eq!(info.phase, DispatchPhase::TouchActive);
    // Child, parent, and the unbounded root.
    assert_eq!(info.tentative_targets, 3);
    assert!(!info.tap_exceeded);

    w.moved(40.0, 20.0, 16);
    let info = w.dispatcher.debug_info();
    assert!(info.tap_exceeded);
    assert_eq!(info.captured, Some(w.child));
    assert_eq!(info.gesture_frames, 0);
}

#[test]
fn fast_first_move_off_the_pressed_node_still_drags_it() {
    let mut w = world(true);
    w.down(20.0, 20.0, 0);
    // One sample jumps well past the child's right edge.
    assert_eq!(w.moved(60.0, 20.0, 16), Some(w.child));
    assert_eq!(w.dispatcher.captured(), Some(w.child));
    assert_eq!(w.seen(), vec![Seen::Drag("child", Vec2::new(40.0, 0.0))]);
    assert_eq!(w.scene.transform(w.child).position, Vec2::new(50.0, 10.0));
}

#[test]
fn movement_under_the_thresholds_is_delivered_with_the_first_drag() {
    let mut w = world(true);
    w.down(12.0, 12.0, 0);
    assert_eq!(w.moved(15.0, 12.0, 10), None);
    assert_eq!(w.moved(16.0, 12.0, 20), None);
    assert_eq!(w.moved(22.0, 12.0, 30), Some(w.child));
    assert_eq!(w.moved(25.0, 12.0, 40), Some(w.child));

    assert_eq!(
        w.seen(),
        vec![
            Seen::Drag("child", Vec2::new(10.0, 0.0)),
            Seen::Drag("child", Vec2::new(3.0, 0.0)),
        ]
    );
    // The node moved exactly as far as the finger.
    assert_eq!(w.scene.transform(w.child).position, Vec2::new(23.0, 10.0));
}
