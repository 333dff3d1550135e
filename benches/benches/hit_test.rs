// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for hit testing and single-touch dispatch over a grid of cards.

use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hawaii_dispatch::EventDispatcher;
use hawaii_dispatch::hit::{hit_test, top_hit};
use hawaii_scene::{Node, NodeHandler, NodeId, Scene, Space, TouchEvent, Transform};
use hawaii_view2d::SceneCamera;
use kurbo::{Point, Size, Vec2};

struct Draggable;

impl NodeHandler for Draggable {
    fn on_drag(&self, scene: &mut Scene, node: NodeId, _: &TouchEvent, delta: Vec2) -> bool {
        scene.translate(node, delta, Space::World);
        true
    }
}

/// A `side` by `side` grid of 40x40 cards, each holding a smaller badge.
fn grid(side: u32) -> Scene {
    let mut scene = Scene::new();
    let root = scene.root();
    let handler: Rc<dyn NodeHandler> = Rc::new(Draggable);
    for row in 0..side {
        for col in 0..side {
            let position = Vec2::new(f64::from(col) * 50.0, f64::from(row) * 50.0);
            let card = scene
                .add_node(
                    Node::new(Size::new(40.0, 40.0))
                        .with_transform(Transform::from_position(position))
                        .with_handler(handler.clone()),
                    root,
                )
                .expect("root is live");
            scene
                .add_node(
                    Node::new(Size::new(10.0, 10.0))
                        .with_transform(Transform::from_position(Vec2::new(25.0, 5.0))),
                    card,
                )
                .expect("card is live");
        }
    }
    scene
}

fn camera() -> SceneCamera {
    let mut camera = SceneCamera::new(Size::new(800.0, 600.0));
    camera.set_position(Vec2::new(400.0, 300.0));
    camera
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    let camera = camera();
    for side in [8_u32, 16, 32] {
        let scene = grid(side);
        let probe = Point::new(f64::from(side / 2) * 50.0 + 30.0, 30.0);
        group.bench_with_input(BenchmarkId::new("candidates", side), &probe, |b, &p| {
            b.iter(|| black_box(hit_test(&scene, &camera, p)));
        });
        group.bench_with_input(BenchmarkId::new("top", side), &probe, |b, &p| {
            b.iter(|| black_box(top_hit(&scene, &camera, p)));
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let camera = camera();
    let mut scene = grid(16);
    let mut dispatcher = EventDispatcher::new();
    let card = top_hit(&scene, &camera, Point::new(20.0, 20.0)).expect("grid covers the point");
    c.bench_function("dispatch_drag_stroke", |b| {
        b.iter(|| {
            dispatcher.touch_down(&mut scene, &camera, Point::new(20.0, 20.0), 0);
            for step in 1..=10_u32 {
                let p = Point::new(20.0 + f64::from(step) * 3.0, 20.0);
                black_box(dispatcher.touch_move(&mut scene, &camera, p, u64::from(step) * 16));
            }
            black_box(dispatcher.touch_up(&mut scene, &camera, Point::new(50.0, 20.0), 176));
            // Put the card back so every iteration starts from the same layout.
            scene.set_transform(card, Transform::IDENTITY);
            black_box(scene.take_damage());
        });
    });
}

criterion_group!(benches, bench_hit_test, bench_drag);
criterion_main!(benches);
