// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summary drained from a scene.

use alloc::vec::Vec;
use kurbo::Rect;

/// World-space regions invalidated since the last drain, taken with
/// [`Scene::take_damage`](crate::Scene::take_damage).
///
/// `Damage` is intentionally coarse: it holds the previous footprint of every node whose
/// placement changed and the current footprint of every node added or moved. Rectangles may
/// overlap and are not deduplicated; [`Damage::union_rect`] collapses them into one region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Damage {
    /// World-space rectangles that should be repainted.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects, or `None` when nothing is dirty.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Returns `true` when no region is dirty.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }
}
