// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger gestures and camera control.
//!
//! A photo node answers pinch and rotation by updating its own transform. Between gestures the
//! camera pans and zooms, and a zoom listener reports each change.
//!
//! Run:
//! - `cargo run -p hawaii_demos --example gestures`

use std::rc::Rc;

use hawaii_demos::{Label, TextSurface, init_logging};
use hawaii_dispatch::EventDispatcher;
use hawaii_scene::render::paint;
use hawaii_scene::{GestureEvent, Node, NodeHandler, NodeId, Origin, Scene, SceneError};
use hawaii_view2d::SceneCamera;
use kurbo::{Point, Size, Vec2};

/// Scales and rotates relative to the transform it had when the gesture began.
struct Photo;

impl NodeHandler for Photo {
    fn on_two_finger_clicked(&self, _: &mut Scene, node: NodeId, _: &GestureEvent) -> bool {
        tracing::info!(?node, "photo grabbed");
        true
    }

    fn on_pinch(&self, scene: &mut Scene, node: NodeId, gesture: &GestureEvent) -> bool {
        let Some(factor) = gesture.scale_factor else {
            return false;
        };
        scene.modify(node, |n| n.transform = n.transform.with_uniform_scale(factor))
    }

    fn on_rotate(&self, scene: &mut Scene, node: NodeId, gesture: &GestureEvent) -> bool {
        let Some(angle) = gesture.angle_degrees else {
            return false;
        };
        scene.modify(node, |n| n.transform = n.transform.with_rotation(angle))
    }

    fn on_two_finger_dragged(&self, _: &mut Scene, _: NodeId, gesture: &GestureEvent) -> bool {
        tracing::info!(delta = ?gesture.delta, "photo pan recognized");
        true
    }
}

fn show(scene: &mut Scene, camera: &SceneCamera, surface: &mut TextSurface, label: &str) {
    let dirty = scene.dirty_region();
    let drawn = paint(scene, surface, camera.view_matrix(), camera.visible_world_rect());
    println!("== {label}: dirty {dirty:?}, {drawn} drawn");
    for line in surface.take_lines() {
        println!("   {line}");
    }
}

fn main() -> Result<(), SceneError> {
    init_logging();

    let mut scene = Scene::new();
    let root = scene.root();
    let photo = scene.add_node(
        Node::new(Size::new(200.0, 150.0))
            .with_origin(Origin::Center)
            .with_renderer(Rc::new(Label("photo")))
            .with_handler(Rc::new(Photo)),
        root,
    )?;

    let mut camera = SceneCamera::new(Size::new(640.0, 480.0));
    camera.add_zoom_listener(|c| println!("   zoom -> {:?} (level {})", c.scale(), c.zoom_level()));
    let mut surface = TextSurface::new();
    show(&mut scene, &camera, &mut surface, "initial");

    let mut dispatcher = EventDispatcher::new();
    let centre = camera.viewport_center();

    // Spread the fingers apart while turning them.
    let target = dispatcher.two_finger_down(
        &mut scene,
        &camera,
        centre - Vec2::new(40.0, 0.0),
        centre + Vec2::new(40.0, 0.0),
        0,
    );
    println!("gesture target: {target:?} (photo is {photo:?})");
    for step in 1..=6_u32 {
        let t = f64::from(step) / 6.0;
        let radius = 40.0 + 20.0 * t;
        let angle = (30.0 * t).to_radians();
        let arm = Vec2::new(radius * angle.cos(), radius * angle.sin());
        let outcome = dispatcher.two_finger_move(
            &mut scene,
            &camera,
            centre - arm,
            centre + arm,
            u64::from(step) * 16,
        );
        println!("step {step}: {outcome:?}");
    }
    dispatcher.two_finger_up(&mut scene, &camera, centre, centre, 120);
    show(&mut scene, &camera, &mut surface, "after pinch and rotate");

    camera.pan_by_screen(Vec2::new(-100.0, 40.0));
    camera.zoom_about_screen_point(Point::new(320.0, 240.0), 1.5);
    camera.toggle_zoom(centre);
    show(&mut scene, &camera, &mut surface, "after camera moves");
    println!("{:#?}", camera.debug_info());
    Ok(())
}
