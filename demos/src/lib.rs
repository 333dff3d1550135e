// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared plumbing for the Hawaii demos: log setup and a surface that prints what it is asked
//! to draw.

use std::any::Any;
use std::fmt::Write as _;

use hawaii_scene::{Node, NodeRenderer, Surface};
use kurbo::{Affine, Rect};
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to debug output for the
/// Hawaii crates.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,hawaii_scene=debug,hawaii_view2d=debug,hawaii_dispatch=debug")
    });
    // A second call (or a host-installed subscriber) keeps the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// A [`Surface`] that keeps the transform stack and records one line per drawn node.
#[derive(Debug, Default)]
pub struct TextSurface {
    stack: Vec<Affine>,
    current: Affine,
    lines: Vec<String>,
}

impl TextSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The combined transform currently in effect.
    pub fn current_transform(&self) -> Affine {
        self.current
    }

    /// Records a line of output.
    pub fn record(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Takes the recorded lines, leaving the surface empty.
    pub fn take_lines(&mut self) -> Vec<String> {
        core::mem::take(&mut self.lines)
    }
}

impl Surface for TextSurface {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.current = t;
        } else {
            tracing::warn!("restore without matching save");
        }
    }

    fn concat_transform(&mut self, transform: Affine) {
        self.current *= transform;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Renders a node as its name and screen-space box.
#[derive(Debug)]
pub struct Label(pub &'static str);

impl NodeRenderer for Label {
    fn draw(&self, surface: &mut dyn Surface, node: &Node, _dirty_rect: Rect) {
        let Some(text) = surface.as_any_mut().downcast_mut::<TextSurface>() else {
            return;
        };
        let screen = text
            .current_transform()
            .transform_rect_bbox(node.local_bounds());
        let mut line = String::new();
        let _ = write!(
            line,
            "{:<8} [{:>6.1}, {:>6.1}, {:>6.1}, {:>6.1}]",
            self.0, screen.x0, screen.y0, screen.x1, screen.y1
        );
        text.record(line);
    }
}
