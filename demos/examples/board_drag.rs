// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging cards around a board.
//!
//! Builds a board with a few cards through a `SceneBuilder`, replays a scripted touch stroke
//! (a click, then a drag), and repaints only the dirty region after every sample.
//!
//! Run:
//! - `cargo run -p hawaii_demos --example board_drag`
//! - `RUST_LOG=trace cargo run -p hawaii_demos --example board_drag` for per-sample logs

use std::rc::Rc;

use hawaii_demos::{Label, TextSurface, init_logging};
use hawaii_dispatch::EventDispatcher;
use hawaii_scene::render::paint;
use hawaii_scene::{
    Alignment, Node, NodeHandler, NodeId, Origin, Scene, SceneBuilder, SceneError, Space,
    TouchEvent, Transform,
};
use hawaii_view2d::SceneCamera;
use kurbo::{Point, Size, Vec2};

/// Cards follow the finger and report clicks.
struct Card(&'static str);

impl NodeHandler for Card {
    fn on_clicked(&self, _: &mut Scene, _: NodeId, touch: &TouchEvent) -> bool {
        tracing::info!(card = self.0, local = ?touch.local, "card clicked");
        true
    }

    fn on_drag(&self, scene: &mut Scene, node: NodeId, _: &TouchEvent, delta: Vec2) -> bool {
        scene.translate(node, delta, Space::Parent);
        true
    }

    fn on_touch_up(&self, _: &mut Scene, node: NodeId, _: &TouchEvent) -> bool {
        tracing::info!(card = self.0, ?node, "card released");
        true
    }
}

struct Board;

impl SceneBuilder for Board {
    fn build(&mut self, scene: &mut Scene) -> Result<(), SceneError> {
        let root = scene.root();
        let board = scene.add_node(
            Node::new(Size::new(600.0, 400.0)).with_renderer(Rc::new(Label("board"))),
            root,
        )?;
        for (i, name) in ["red", "green", "blue"].into_iter().enumerate() {
            let x = 60.0 + 160.0 * i as f64;
            let card = scene.add_node(
                Node::new(Size::new(100.0, 70.0))
                    .with_origin(Origin::Center)
                    .with_transform(
                        Transform::from_position(Vec2::new(x + 50.0, 135.0))
                            .with_rotation(-6.0 + 6.0 * i as f64),
                    )
                    .with_renderer(Rc::new(Label(name)))
                    .with_handler(Rc::new(Card(name))),
                board,
            )?;
            // A pin snapped to the card's top-right corner.
            scene.add_node(
                Node::new(Size::new(12.0, 12.0))
                    .with_alignment(Alignment::TopRight)
                    .with_renderer(Rc::new(Label("pin"))),
                card,
            )?;
        }
        Ok(())
    }
}

fn repaint(scene: &mut Scene, camera: &SceneCamera, surface: &mut TextSurface) {
    let dirty = scene.dirty_region();
    if dirty.area() == 0.0 {
        return;
    }
    let drawn = paint(scene, surface, camera.view_matrix(), dirty);
    println!("-- repaint {dirty:?} ({drawn} nodes)");
    for line in surface.take_lines() {
        println!("   {line}");
    }
}

fn main() -> Result<(), SceneError> {
    init_logging();

    let mut scene = Scene::new();
    scene.rebuild(&mut Board)?;

    let mut camera = SceneCamera::new(Size::new(800.0, 600.0));
    camera.center_on(Point::new(300.0, 200.0));

    let mut surface = TextSurface::new();
    repaint(&mut scene, &camera, &mut surface);

    let mut dispatcher = EventDispatcher::new();
    let card = camera.world_to_screen(Point::new(110.0, 135.0));

    // A quick still press is a click.
    dispatcher.touch_down(&mut scene, &camera, card, 0);
    let release = dispatcher.touch_up(&mut scene, &camera, card, 90);
    println!("click: {release:?}");
    repaint(&mut scene, &camera, &mut surface);

    // A long stroke is a drag; the card keeps following outside its old footprint.
    dispatcher.touch_down(&mut scene, &camera, card, 1_000);
    for step in 1..=8_u32 {
        let p = card + Vec2::new(f64::from(step) * 20.0, f64::from(step) * 8.0);
        let handled = dispatcher.touch_move(&mut scene, &camera, p, 1_000 + u64::from(step) * 16);
        println!("move {step}: handled by {handled:?}");
        repaint(&mut scene, &camera, &mut surface);
    }
    let end = card + Vec2::new(160.0, 64.0);
    let release = dispatcher.touch_up(&mut scene, &camera, end, 1_200);
    println!("drag: {release:?}");

    println!("{:#?}", scene.debug_info());
    Ok(())
}
