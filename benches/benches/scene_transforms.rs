// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for world transform and bounds caching in `hawaii_scene`.
//!
//! The synthetic scene is a fixed-depth tree of small rotated cards, roughly the shape of a
//! board with nested groups.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hawaii_scene::{Node, NodeId, Scene, Space, Transform};
use kurbo::{Size, Vec2};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        f64::from((self.0 >> 32) as u32) / f64::from(u32::MAX)
    }
}

/// Builds `fanout^depth` leaves under nested groups; returns the scene and every added id.
fn build_scene(fanout: usize, depth: usize, seed: u64) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new();
    let mut rng = Lcg::new(seed);
    let mut ids = Vec::new();
    let mut level = vec![scene.root()];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fanout);
        for &parent in &level {
            for _ in 0..fanout {
                let transform = Transform::from_position(Vec2::new(
                    rng.next_f64() * 200.0,
                    rng.next_f64() * 200.0,
                ))
                .with_rotation(rng.next_f64() * 30.0 - 15.0)
                .with_uniform_scale(0.8 + rng.next_f64() * 0.4);
                let id = scene
                    .add_node(
                        Node::new(Size::new(40.0, 30.0)).with_transform(transform),
                        parent,
                    )
                    .expect("parent is live");
                next.push(id);
            }
        }
        ids.extend_from_slice(&next);
        level = next;
    }
    (scene, ids)
}

fn bench_world_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_world_bounds");
    for &(fanout, depth) in &[(8_usize, 2_usize), (6, 3), (4, 5)] {
        let label = format!("{fanout}x{depth}");

        group.bench_with_input(BenchmarkId::new("cold", &label), &(), |b, ()| {
            b.iter_batched(
                || build_scene(fanout, depth, 1),
                |(scene, ids)| {
                    for &id in &ids {
                        black_box(scene.world_bounds(id));
                    }
                },
                BatchSize::LargeInput,
            );
        });

        let (scene, ids) = build_scene(fanout, depth, 1);
        for &id in &ids {
            scene.world_bounds(id);
        }
        group.bench_with_input(BenchmarkId::new("warm", &label), &(), |b, ()| {
            b.iter(|| {
                for &id in &ids {
                    black_box(scene.world_bounds(id));
                }
            });
        });
    }
    group.finish();
}

fn bench_move_and_requery(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_move_requery");
    let (mut scene, ids) = build_scene(6, 3, 7);
    let top: Vec<NodeId> = ids
        .iter()
        .copied()
        .filter(|&id| scene.parent_of(id) == Some(scene.root()))
        .collect();
    let leaf = *ids.last().expect("scene is not empty");

    group.bench_function("move_leaf", |b| {
        b.iter(|| {
            scene.translate(leaf, Vec2::new(1.0, 0.0), Space::Parent);
            black_box(scene.world_bounds(leaf));
            black_box(scene.take_damage());
        });
    });

    group.bench_function("move_group", |b| {
        b.iter(|| {
            scene.translate(top[0], Vec2::new(0.0, 1.0), Space::World);
            for &id in &ids {
                black_box(scene.world_bounds(id));
            }
            black_box(scene.take_damage());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_world_bounds, bench_move_and_requery);
criterion_main!(benches);
