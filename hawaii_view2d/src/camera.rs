// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hawaii_scene::{Transform, try_invert};
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::zoom::ZoomLevels;

type ZoomListener = Box<dyn FnMut(&SceneCamera)>;

/// Camera mapping between screen (device pixel) space and scene world space.
///
/// The camera's [`Transform`] describes what the viewport shows:
/// - `position` is the world point under the viewport centre;
/// - `scale` is the zoom factor (screen pixels per world unit), per axis.
///
/// Rotation in the transform is ignored; the camera is axis-aligned.
///
/// ```rust
/// use kurbo::{Point, Size, Vec2};
/// use hawaii_view2d::SceneCamera;
///
/// let mut camera = SceneCamera::new(Size::new(800.0, 600.0));
/// camera.set_position(Vec2::new(100.0, 100.0));
///
/// // The camera position sits at the viewport centre.
/// assert_eq!(camera.world_to_screen(Point::new(100.0, 100.0)), Point::new(400.0, 300.0));
/// assert_eq!(camera.screen_to_world(Point::new(400.0, 300.0)), Point::new(100.0, 100.0));
/// ```
pub struct SceneCamera {
    transform: Transform,
    viewport_size: Size,
    zoom_levels: ZoomLevels,
    zoom_level: u32,
    min_zoom: f64,
    max_zoom: f64,
    world_to_screen: Affine,
    screen_to_world: Option<Affine>,
    zoom_listeners: Vec<ZoomListener>,
}

impl fmt::Debug for SceneCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneCamera")
            .field("transform", &self.transform)
            .field("viewport_size", &self.viewport_size)
            .field("zoom_levels", &self.zoom_levels)
            .field("zoom_level", &self.zoom_level)
            .field("min_zoom", &self.min_zoom)
            .field("max_zoom", &self.max_zoom)
            .field("zoom_listeners", &self.zoom_listeners.len())
            .finish_non_exhaustive()
    }
}

impl SceneCamera {
    /// Creates a camera over a viewport of `viewport_size` pixels.
    ///
    /// - Initial position is the world origin, shown at the viewport centre.
    /// - Initial scale is `1.0` (zoom level zero).
    /// - Continuous zoom is clamped to `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new(viewport_size: Size) -> Self {
        let mut camera = Self {
            transform: Transform::IDENTITY,
            viewport_size,
            zoom_levels: ZoomLevels::default(),
            zoom_level: 0,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            world_to_screen: Affine::IDENTITY,
            screen_to_world: Some(Affine::IDENTITY),
            zoom_listeners: Vec::new(),
        };
        camera.rebuild_transforms();
        camera
    }

    /// Sets the discrete zoom ladder used by [`SceneCamera::toggle_zoom`].
    #[must_use]
    pub fn with_zoom_levels(mut self, levels: ZoomLevels) -> Self {
        self.zoom_levels = levels;
        self
    }

    /// The camera transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Replaces the camera transform, notifying zoom listeners if the scale changed.
    pub fn set_transform(&mut self, transform: Transform) {
        if self.transform == transform {
            return;
        }
        let zoomed = self.transform.scale != transform.scale;
        self.transform = transform;
        self.rebuild_transforms();
        if zoomed {
            self.notify_zoom();
        }
    }

    /// The world point under the viewport centre.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Moves the camera so `position` sits under the viewport centre.
    pub fn set_position(&mut self, position: Vec2) {
        self.set_transform(self.transform.with_position(position));
    }

    /// Centres the view on a world point.
    pub fn center_on(&mut self, world: Point) {
        self.set_position(world.to_vec2());
    }

    /// The zoom factor per axis.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.transform.scale
    }

    /// Sets the zoom factor per axis, notifying zoom listeners.
    pub fn set_scale(&mut self, scale: Vec2) {
        self.set_transform(self.transform.with_scale(scale));
    }

    /// The current discrete zoom level.
    #[must_use]
    pub fn zoom_level(&self) -> u32 {
        self.zoom_level
    }

    /// Sets the limits applied by [`SceneCamera::zoom_about_screen_point`].
    ///
    /// The range is normalized so that `min_zoom <= max_zoom`.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
    }

    /// The viewport size in screen pixels.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Sets the viewport size, typically from the host's draw rectangle.
    pub fn set_viewport_size(&mut self, size: Size) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.rebuild_transforms();
    }

    /// The viewport centre in screen pixels.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }

    /// Registers a callback run after every zoom change.
    pub fn add_zoom_listener(&mut self, listener: impl FnMut(&Self) + 'static) {
        self.zoom_listeners.push(Box::new(listener));
    }

    /// The matrix mapping world space to screen space:
    /// `translate(viewport_centre) * scale * translate(-position)`.
    #[must_use]
    pub fn view_matrix(&self) -> Affine {
        self.world_to_screen
    }

    /// Converts a world point into screen pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.world_to_screen * world
    }

    /// Converts a screen point into world space.
    ///
    /// With a zero or non-finite scale there is no inverse and the point passes through unchanged.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        match self.screen_to_world {
            Some(inv) => inv * screen,
            None => screen,
        }
    }

    /// Converts a distance in screen pixels into world units.
    ///
    /// Passes through unchanged when the scale is degenerate.
    #[must_use]
    pub fn screen_distance_to_world(&self, distance: Vec2) -> Vec2 {
        if self.screen_to_world.is_none() {
            return distance;
        }
        Vec2::new(
            distance.x / self.transform.scale.x,
            distance.y / self.transform.scale.y,
        )
    }

    /// Pans the view by a delta in screen pixels: content follows the delta.
    pub fn pan_by_screen(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let world = self.screen_distance_to_world(delta);
        self.set_position(self.transform.position - world);
    }

    /// Multiplies the zoom by `factor` around a screen anchor.
    ///
    /// The world point under `anchor` stays under it. The resulting scale is clamped per axis to
    /// the zoom limits. Non-positive or non-finite factors are ignored.
    pub fn zoom_about_screen_point(&mut self, anchor: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let old = self.transform.scale;
        let scale = Vec2::new(
            (old.x * factor).clamp(self.min_zoom, self.max_zoom),
            (old.y * factor).clamp(self.min_zoom, self.max_zoom),
        );
        if scale == old {
            return;
        }
        self.zoom_to(anchor, scale);
    }

    /// Advances to the next discrete zoom level, keeping the world point under `focal` in place.
    ///
    /// Levels wrap (by default `0..4`, scales `1..=4`). Zoom listeners are notified even when
    /// the wrapped level yields the same scale.
    pub fn toggle_zoom(&mut self, focal: Point) {
        self.zoom_level = self.zoom_levels.next(self.zoom_level);
        let s = self.zoom_levels.scale(self.zoom_level);
        tracing::debug!(level = self.zoom_level, scale = s, "camera zoom toggled");
        if Vec2::new(s, s) == self.transform.scale {
            self.notify_zoom();
            return;
        }
        self.zoom_to(focal, Vec2::new(s, s));
    }

    /// The world rectangle currently visible through the viewport.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        let screen = Rect::from_origin_size(Point::ZERO, self.viewport_size);
        let a = self.screen_to_world(screen.origin());
        let b = self.screen_to_world(Point::new(screen.x1, screen.y1));
        Rect::from_points(a, b)
    }

    /// Snapshot of the camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> SceneCameraDebugInfo {
        SceneCameraDebugInfo {
            viewport_size: self.viewport_size,
            position: self.transform.position,
            scale: self.transform.scale,
            zoom_level: self.zoom_level,
            visible_world_rect: self.visible_world_rect(),
            invertible: self.screen_to_world.is_some(),
        }
    }

    /// Sets `scale` and solves the position so the world point under `anchor` stays there.
    fn zoom_to(&mut self, anchor: Point, scale: Vec2) {
        let world = self.screen_to_world(anchor);
        let offset = anchor - self.viewport_center();
        let position = if scale.x != 0.0 && scale.y != 0.0 {
            world.to_vec2() - Vec2::new(offset.x / scale.x, offset.y / scale.y)
        } else {
            self.transform.position
        };
        self.transform = self.transform.with_scale(scale).with_position(position);
        self.rebuild_transforms();
        self.notify_zoom();
    }

    fn rebuild_transforms(&mut self) {
        let t = &self.transform;
        self.world_to_screen = Affine::translate(self.viewport_center().to_vec2())
            * Affine::scale_non_uniform(t.scale.x, t.scale.y)
            * Affine::translate(-t.position);
        self.screen_to_world = try_invert(self.world_to_screen);
        if self.screen_to_world.is_none() {
            tracing::trace!(scale = ?t.scale, "camera transform is not invertible");
        }
    }

    fn notify_zoom(&mut self) {
        let mut listeners = core::mem::take(&mut self.zoom_listeners);
        for listener in &mut listeners {
            listener(self);
        }
        // Listeners only see `&Self`, so none can be added meanwhile.
        self.zoom_listeners = listeners;
    }
}

/// Debug snapshot of a [`SceneCamera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCameraDebugInfo {
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    /// World point under the viewport centre.
    pub position: Vec2,
    /// Zoom factor per axis.
    pub scale: Vec2,
    /// Discrete zoom level.
    pub zoom_level: u32,
    /// World rectangle currently visible.
    pub visible_world_rect: Rect,
    /// Whether screen points can be mapped back into world space.
    pub invertible: bool,
}
