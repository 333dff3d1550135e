// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, memoized world transforms, invalidation, damage.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::damage::Damage;
use crate::error::SceneError;
use crate::node::Node;
use crate::types::{Alignment, NodeId, Origin, PositionMode, Space, Transform};
use crate::util::{UNBOUNDED, transform_rect_bbox, try_invert};

/// The scene tree: node registry, hierarchy, world-space caches, and pending damage.
///
/// Unlike a batched tree, every mutation is reflected before the call returns: the world
/// transform and world bounds of the mutated node and of its entire subtree are dropped from
/// the caches, the previous footprints are recorded as damage, and the invalidation sink runs.
/// Queries recompute and memoize lazily, so a query right after a mutation always observes
/// fresh data.
///
/// Queries take `&self`; the caches live behind a [`RefCell`], which also makes `Scene`
/// single-threaded by construction.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect, Size, Vec2};
/// use hawaii_scene::{Node, Scene, Transform};
///
/// let mut scene = Scene::new();
/// let root = scene.root();
/// let parent = scene
///     .add_node(
///         Node::new(Size::new(100.0, 100.0))
///             .with_transform(Transform::from_position(Vec2::new(10.0, 10.0))),
///         root,
///     )
///     .unwrap();
/// let child = scene
///     .add_node(
///         Node::new(Size::new(20.0, 20.0))
///             .with_transform(Transform::from_position(Vec2::new(5.0, 5.0))),
///         parent,
///     )
///     .unwrap();
///
/// assert_eq!(scene.world_bounds(child), Rect::new(15.0, 15.0, 35.0, 35.0));
///
/// // Moving the parent moves the child and records both footprints as damage.
/// let _ = scene.dirty_region();
/// scene.set_transform(parent, Transform::from_position(Vec2::new(50.0, 10.0)));
/// assert_eq!(scene.world_bounds(child), Rect::new(55.0, 15.0, 75.0, 35.0));
/// assert_eq!(scene.dirty_region(), Rect::new(10.0, 10.0, 150.0, 110.0));
/// assert_eq!(scene.dirty_region(), Rect::ZERO);
/// ```
pub struct Scene {
    /// slots
    entries: Vec<Option<Entry>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    cache: RefCell<WorldCache>,
    dirty_rects: Vec<Rect>,
    /// Nodes whose current footprint is owed to the next drain.
    pending: HashSet<NodeId>,
    invalidation_sink: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.debug_info();
        f.debug_struct("Scene")
            .field("root", &self.root)
            .field("nodes_alive", &info.nodes_alive)
            .field("free_slots", &info.free_slots)
            .field("cached_transforms", &info.cached_transforms)
            .field("cached_bounds", &info.cached_bounds)
            .field("pending_dirty_rects", &info.pending_dirty_rects)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Entry {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node: Node,
}

#[derive(Clone, Debug, Default)]
struct WorldCache {
    transforms: HashMap<NodeId, Affine>,
    bounds: HashMap<NodeId, Rect>,
    transform_recomputations: u64,
    bounds_recomputations: u64,
}

impl WorldCache {
    fn forget(&mut self, id: NodeId) {
        self.transforms.remove(&id);
        self.bounds.remove(&id);
    }
}

/// Snapshot of a [`Scene`]'s bookkeeping for debugging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneDebugInfo {
    /// Live nodes, including the root.
    pub nodes_alive: usize,
    /// Freed slots awaiting reuse.
    pub free_slots: usize,
    /// Entries in the world-transform cache.
    pub cached_transforms: usize,
    /// Entries in the world-bounds cache.
    pub cached_bounds: usize,
    /// Rectangles recorded since the last drain (not counting queued footprints).
    pub pending_dirty_rects: usize,
    /// Nodes whose current footprint will be added on the next drain.
    pub pending_footprints: usize,
    /// World transforms computed since the scene was created.
    pub transform_recomputations: u64,
    /// World bounds computed since the scene was created.
    pub bounds_recomputations: u64,
}

/// Populates a scene from application state.
///
/// Implementations call [`Scene::add_node`] for each entity and [`Scene::set_transform`] to
/// place them. See [`Scene::rebuild`].
pub trait SceneBuilder {
    /// Add this builder's nodes to `scene`.
    fn build(&mut self, scene: &mut Scene) -> Result<(), SceneError>;
}

impl Scene {
    /// Create a scene whose root is an unbounded node with an identity transform.
    pub fn new() -> Self {
        Self::with_root(Node::unbounded())
    }

    /// Create a scene with a custom root node.
    pub fn with_root(root: Node) -> Self {
        let mut scene = Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            cache: RefCell::new(WorldCache::default()),
            dirty_rects: Vec::new(),
            pending: HashSet::new(),
            invalidation_sink: None,
        };
        scene.root = scene.alloc(None, root);
        scene
    }

    /// The root node. It has no parent and is never removed.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Install a callback run whenever a mutation makes the current drawing stale.
    ///
    /// Hosts typically schedule a repaint from here and then call [`Scene::dirty_region`].
    pub fn set_invalidation_sink(&mut self, sink: impl FnMut() + 'static) {
        self.invalidation_sink = Some(Box::new(sink));
    }

    /// Remove the invalidation callback.
    pub fn clear_invalidation_sink(&mut self) {
        self.invalidation_sink = None;
    }

    /// Insert `node` as the last child of `parent`.
    ///
    /// The new node's footprint is queued as damage; it has no previous footprint.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownParent`] if `parent` is not live.
    pub fn add_node(&mut self, node: Node, parent: NodeId) -> Result<NodeId, SceneError> {
        if !self.is_alive(parent) {
            tracing::warn!(?parent, "rejected node insertion under unknown parent");
            return Err(SceneError::UnknownParent(parent));
        }
        let id = self.alloc(Some(parent), node);
        self.entry_mut(parent).children.push(id);
        self.pending.insert(id);
        tracing::debug!(?id, ?parent, "node added");
        self.notify();
        Ok(id)
    }

    /// Remove `id` and its whole subtree.
    ///
    /// Every removed node's previous footprint becomes damage and every cache entry for it is
    /// purged. Removing a stale id is a no-op.
    ///
    /// # Errors
    ///
    /// [`SceneError::RootIsFixed`] when asked to remove the root.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            tracing::warn!("rejected removal of the root node");
            return Err(SceneError::RootIsFixed);
        }
        if !self.is_alive(id) {
            tracing::trace!(?id, "removal of stale node ignored");
            return Ok(());
        }
        let subtree = self.subtree_preorder(id);
        self.record_previous_footprints(&subtree);
        if let Some(parent) = self.entry(id).parent {
            self.entry_mut(parent).children.retain(|c| *c != id);
        }
        let cache = self.cache.get_mut();
        for &n in &subtree {
            cache.forget(n);
        }
        for &n in &subtree {
            self.entries[n.idx()] = None;
            self.free_list.push(n.idx());
        }
        for n in &subtree {
            self.pending.remove(n);
        }
        tracing::debug!(?id, removed = subtree.len(), "subtree removed");
        self.notify();
        Ok(())
    }

    /// Move `id` (with its subtree) to the end of `new_parent`'s children.
    ///
    /// # Errors
    ///
    /// - [`SceneError::RootIsFixed`] when `id` is the root.
    /// - [`SceneError::UnknownNode`] / [`SceneError::UnknownParent`] for stale ids.
    /// - [`SceneError::WouldCycle`] when `new_parent` lies inside `id`'s subtree.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootIsFixed);
        }
        if !self.is_alive(id) {
            return Err(SceneError::UnknownNode(id));
        }
        if !self.is_alive(new_parent) {
            return Err(SceneError::UnknownParent(new_parent));
        }
        if self.is_ancestor_or_self(id, new_parent) {
            tracing::warn!(?id, ?new_parent, "rejected reparent that would create a cycle");
            return Err(SceneError::WouldCycle {
                node: id,
                new_parent,
            });
        }
        let subtree = self.subtree_preorder(id);
        self.record_previous_footprints(&subtree);
        if let Some(old) = self.entry(id).parent {
            self.entry_mut(old).children.retain(|c| *c != id);
        }
        self.entry_mut(id).parent = Some(new_parent);
        self.entry_mut(new_parent).children.push(id);
        self.forget_and_queue(&subtree);
        tracing::debug!(?id, ?new_parent, "node reparented");
        self.notify();
        Ok(())
    }

    /// Remove every node except the root and drop all cached data.
    ///
    /// The removed footprints are recorded as damage.
    pub fn clear(&mut self) {
        let children = self.entry(self.root).children.clone();
        for child in children {
            // Children of the root are never the root itself.
            let _ = self.remove_subtree(child);
        }
        let cache = self.cache.get_mut();
        cache.transforms.clear();
        cache.bounds.clear();
    }

    /// Clear the scene and let `builder` populate it again.
    ///
    /// # Errors
    ///
    /// Whatever the builder returns.
    pub fn rebuild(&mut self, builder: &mut impl SceneBuilder) -> Result<(), SceneError> {
        self.clear();
        builder.build(self)
    }

    /// Replace the transform of `id`.
    ///
    /// Invalidates `id` and its entire subtree, records their previous footprints as damage,
    /// queues their new footprints, and runs the invalidation sink. Setting an equal transform
    /// or targeting a stale id does nothing.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        if self.node(id).is_none_or(|n| n.transform == transform) {
            return;
        }
        self.modify(id, |n| n.transform = transform);
    }

    /// Move `id` by `delta`.
    ///
    /// - [`Space::Local`]: `delta` is expressed in the node's own rotated frame.
    /// - [`Space::Parent`]: `delta` is added to the position as is, matching the drag deltas
    ///   handed to [`NodeHandler::on_drag`](crate::NodeHandler::on_drag).
    /// - [`Space::World`]: `delta` is expressed in world space and mapped into the node's parent
    ///   frame; a degenerate parent frame passes it through unchanged.
    pub fn translate(&mut self, id: NodeId, delta: Vec2, space: Space) {
        let Some(node) = self.node(id) else {
            return;
        };
        let transform = node.transform;
        let parent_delta = match space {
            Space::Local => {
                (Affine::rotate(transform.rotation_degrees.to_radians()) * delta.to_point()).to_vec2()
            }
            Space::Parent => delta,
            Space::World => try_invert(self.parent_frame(id))
                .map_or(delta, |inv| inv * delta.to_point() - inv * Point::ZERO),
        };
        self.set_transform(id, transform.translated(parent_delta));
    }

    /// Set the size of `id`, invalidating its subtree (children align against it).
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if self.node(id).is_none_or(|n| n.size == size) {
            return;
        }
        self.modify(id, |n| n.size = size);
    }

    /// Set the pivot of `id`.
    pub fn set_origin(&mut self, id: NodeId, origin: Origin) {
        if self.node(id).is_none_or(|n| n.origin == origin) {
            return;
        }
        self.modify(id, |n| n.origin = origin);
    }

    /// Set how `id` snaps against its parent's rectangle.
    pub fn set_alignment(&mut self, id: NodeId, alignment: Alignment) {
        if self.node(id).is_none_or(|n| n.alignment == alignment) {
            return;
        }
        self.modify(id, |n| n.alignment = alignment);
    }

    /// Set how much of the ancestor chain `id` inherits.
    pub fn set_position_mode(&mut self, id: NodeId, mode: PositionMode) {
        if self.node(id).is_none_or(|n| n.position_mode == mode) {
            return;
        }
        self.modify(id, |n| n.position_mode = mode);
    }

    /// Set whether the scale of `id` reaches its descendants.
    pub fn set_propagate_ancestor_scale(&mut self, id: NodeId, propagate: bool) {
        if self
            .node(id)
            .is_none_or(|n| n.propagate_ancestor_scale == propagate)
        {
            return;
        }
        self.modify(id, |n| n.propagate_ancestor_scale = propagate);
    }

    /// Apply an arbitrary edit to `id` and invalidate its subtree.
    ///
    /// This is the general form behind the setters; use it directly to change the hit area or
    /// capabilities, or several properties at once. Returns `false` for a stale id.
    pub fn modify(&mut self, id: NodeId, edit: impl FnOnce(&mut Node)) -> bool {
        if !self.is_alive(id) {
            tracing::trace!(?id, "edit of stale node ignored");
            return false;
        }
        let subtree = self.subtree_preorder(id);
        self.record_previous_footprints(&subtree);
        edit(&mut self.entry_mut(id).node);
        self.forget_and_queue(&subtree);
        tracing::trace!(?id, invalidated = subtree.len(), "node modified");
        self.notify();
        true
    }

    /// Drain all pending damage.
    ///
    /// Queued footprints are resolved against the current transforms at this point. A node moved
    /// several times contributes every footprint it left plus its current one.
    pub fn take_damage(&mut self) -> Damage {
        let pending = core::mem::take(&mut self.pending);
        for id in pending {
            if self.is_alive(id) {
                let bounds = self.world_bounds(id);
                self.dirty_rects.push(bounds);
            }
        }
        Damage {
            dirty_rects: core::mem::take(&mut self.dirty_rects),
        }
    }

    /// Drain all pending damage and return its bounding rectangle.
    ///
    /// Returns `Rect::ZERO` when nothing changed since the previous drain.
    pub fn dirty_region(&mut self) -> Rect {
        self.take_damage().union_rect().unwrap_or(Rect::ZERO)
    }

    /// Returns `true` if damage is waiting to be drained.
    pub fn has_damage(&self) -> bool {
        !self.dirty_rects.is_empty() || !self.pending.is_empty()
    }

    /// The node stored under `id`, or `None` for stale ids.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.entry_opt(id).map(|e| &e.node)
    }

    /// The local transform of `id`, or the identity for stale ids.
    pub fn transform(&self, id: NodeId) -> Transform {
        self.node(id).map(|n| n.transform).unwrap_or_default()
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.entries
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Returns `true` if the scene holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// The parent of `id`, or `None` for the root and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.entry_opt(id).and_then(|e| e.parent)
    }

    /// The children of `id` in insertion order, or an empty slice for stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.entry_opt(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// All live nodes in draw order: preorder, siblings in insertion order.
    pub fn nodes_in_draw_order(&self) -> Vec<NodeId> {
        self.subtree_preorder(self.root)
    }

    /// All live nodes in hit-test order: postorder, siblings in insertion order.
    ///
    /// Every node comes after all of its descendants, so the most specific node under a point
    /// is offered an event before its ancestors.
    pub fn nodes_in_hit_test_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.entries.len());
        let mut stack = alloc::vec![(self.root, false)];
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                out.push(id);
                continue;
            }
            stack.push((id, true));
            for &child in self.children_of(id).iter().rev() {
                stack.push((child, false));
            }
        }
        out
    }

    /// The world transform of `id`: maps its local rectangle space into world space.
    ///
    /// Memoized until `id` or one of its ancestors changes. Stale ids yield the identity.
    /// When the node's scale does not propagate, that scale is left out; use
    /// [`Scene::render_transform`] for the matrix the node itself is drawn with.
    pub fn world_transform(&self, id: NodeId) -> Affine {
        if !self.is_alive(id) {
            return Affine::IDENTITY;
        }
        let cached = self.cache.borrow().transforms.get(&id).copied();
        if let Some(tf) = cached {
            return tf;
        }
        let tf = self.parent_frame(id) * self.local_matrix(id);
        let mut cache = self.cache.borrow_mut();
        cache.transform_recomputations += 1;
        cache.transforms.insert(id, tf);
        tf
    }

    /// The matrix the node is drawn and hit tested with: its world transform with any excluded
    /// own scale re-applied.
    pub fn render_transform(&self, id: NodeId) -> Affine {
        let Some(node) = self.node(id) else {
            return Affine::IDENTITY;
        };
        self.world_transform(id) * node.excluded_scale()
    }

    /// The frame `id`'s position is expressed in.
    ///
    /// The parent's world transform for [`PositionMode::Relative`] and
    /// [`PositionMode::Static`], the root's world transform for [`PositionMode::Fixed`], and
    /// the identity for [`PositionMode::Absolute`], for the root, and for stale ids.
    pub fn parent_frame(&self, id: NodeId) -> Affine {
        let Some(entry) = self.entry_opt(id) else {
            return Affine::IDENTITY;
        };
        let Some(parent) = entry.parent else {
            return Affine::IDENTITY;
        };
        match entry.node.position_mode {
            PositionMode::Relative | PositionMode::Static => self.world_transform(parent),
            PositionMode::Absolute => Affine::IDENTITY,
            PositionMode::Fixed => self.world_transform(self.root),
        }
    }

    /// The node's own contribution to its world transform.
    pub fn local_matrix(&self, id: NodeId) -> Affine {
        let Some(entry) = self.entry_opt(id) else {
            return Affine::IDENTITY;
        };
        let alignment = match entry.parent {
            None => Vec2::ZERO,
            Some(parent) => {
                let reference = match entry.node.position_mode {
                    PositionMode::Fixed => self.root,
                    _ => parent,
                };
                let parent_size = self.node(reference).map_or(Size::ZERO, |n| n.size);
                entry.node.alignment_offset(parent_size)
            }
        };
        entry.node.local_matrix(alignment)
    }

    /// World-space axis-aligned bounds of `id`'s local rectangle.
    ///
    /// Loose under rotation. Memoized until `id` or one of its ancestors changes. Stale ids
    /// yield `Rect::ZERO`; unbounded nodes yield an unbounded rectangle.
    pub fn world_bounds(&self, id: NodeId) -> Rect {
        let Some(node) = self.node(id) else {
            return Rect::ZERO;
        };
        let cached = self.cache.borrow().bounds.get(&id).copied();
        if let Some(bounds) = cached {
            return bounds;
        }
        let local = node.local_bounds();
        let bounds = if node.is_unbounded() {
            UNBOUNDED
        } else {
            transform_rect_bbox(self.render_transform(id), local)
        };
        let mut cache = self.cache.borrow_mut();
        cache.bounds_recomputations += 1;
        cache.bounds.insert(id, bounds);
        bounds
    }

    /// Map a world-space point into `id`'s local rectangle space.
    ///
    /// Returns `None` when the node's render transform is degenerate or `id` is stale.
    pub fn world_to_local(&self, id: NodeId, world: Point) -> Option<Point> {
        if !self.is_alive(id) {
            return None;
        }
        try_invert(self.render_transform(id)).map(|inv| inv * world)
    }

    /// Map a point in `id`'s local rectangle space into world space.
    pub fn local_to_world(&self, id: NodeId, local: Point) -> Point {
        self.render_transform(id) * local
    }

    /// Map a world-space point into the frame `id`'s position is expressed in.
    ///
    /// Returns `None` when that frame is degenerate or `id` is stale.
    pub fn world_to_parent(&self, id: NodeId, world: Point) -> Option<Point> {
        if !self.is_alive(id) {
            return None;
        }
        try_invert(self.parent_frame(id)).map(|inv| inv * world)
    }

    /// Returns `true` if `id`'s world transform is currently memoized.
    pub fn is_transform_cached(&self, id: NodeId) -> bool {
        self.cache.borrow().transforms.contains_key(&id)
    }

    /// Returns `true` if `id`'s world bounds are currently memoized.
    pub fn is_bounds_cached(&self, id: NodeId) -> bool {
        self.cache.borrow().bounds.contains_key(&id)
    }

    /// Snapshot of the scene's bookkeeping.
    pub fn debug_info(&self) -> SceneDebugInfo {
        let cache = self.cache.borrow();
        SceneDebugInfo {
            nodes_alive: self.len(),
            free_slots: self.free_list.len(),
            cached_transforms: cache.transforms.len(),
            cached_bounds: cache.bounds.len(),
            pending_dirty_rects: self.dirty_rects.len(),
            pending_footprints: self.pending.len(),
            transform_recomputations: cache.transform_recomputations,
            bounds_recomputations: cache.bounds_recomputations,
        }
    }
}

impl Scene {
    // --- internals ---

    fn alloc(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.entries[idx] = Some(Entry::new(generation, parent, node));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.entries.push(Some(Entry::new(generation, parent, node)));
            self.generations.push(generation);
            (self.entries.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slot indices stay below u32::MAX"
        )]
        let id = NodeId::new(idx as u32, generation);
        id
    }

    fn entry_opt(&self, id: NodeId) -> Option<&Entry> {
        self.entries
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|e| e.generation == id.1)
    }

    /// Access a live entry; panics if `id` is stale.
    fn entry(&self, id: NodeId) -> &Entry {
        self.entries[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live entry mutably; panics if `id` is stale.
    fn entry_mut(&mut self, id: NodeId) -> &mut Entry {
        self.entries[id.idx()].as_mut().expect("dangling NodeId")
    }

    /// `id` followed by its descendants in preorder, siblings in insertion order.
    fn subtree_preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = alloc::vec![id];
        while let Some(cur) = stack.pop() {
            out.push(cur);
            for &child in self.children_of(cur).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent_of(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Record the current (soon to be previous) footprint of every node in `ids`.
    fn record_previous_footprints(&mut self, ids: &[NodeId]) {
        for &id in ids {
            let bounds = self.world_bounds(id);
            self.dirty_rects.push(bounds);
        }
    }

    /// Drop cached world data for `ids` and queue their new footprints.
    fn forget_and_queue(&mut self, ids: &[NodeId]) {
        let cache = self.cache.get_mut();
        for &id in ids {
            cache.forget(id);
        }
        self.pending.extend(ids.iter().copied());
    }

    fn notify(&mut self) {
        if let Some(sink) = self.invalidation_sink.as_mut() {
            sink();
        }
    }
}

impl Entry {
    fn new(generation: u32, parent: Option<NodeId>, node: Node) -> Self {
        Self {
            generation,
            parent,
            children: Vec::new(),
            node,
        }
    }
}
