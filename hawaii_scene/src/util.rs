// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Rect};

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in the target space.
///
/// Unbounded input (any non-finite edge) yields an unbounded output rather than NaNs.
pub(crate) fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    if !is_finite_rect(rect) {
        return UNBOUNDED;
    }
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let min_x = (a * rect.x0).min(a * rect.x1) + (c * rect.y0).min(c * rect.y1);
    let max_x = (a * rect.x0).max(a * rect.x1) + (c * rect.y0).max(c * rect.y1);
    let min_y = (b * rect.x0).min(b * rect.x1) + (d * rect.y0).min(d * rect.y1);
    let max_y = (b * rect.x0).max(b * rect.x1) + (d * rect.y0).max(d * rect.y1);
    Rect::new(min_x + e, min_y + f, max_x + e, max_y + f)
}

/// The rectangle covering the whole plane.
pub(crate) const UNBOUNDED: Rect = Rect::new(
    f64::NEG_INFINITY,
    f64::NEG_INFINITY,
    f64::INFINITY,
    f64::INFINITY,
);

pub(crate) fn is_finite_rect(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

/// Invert `affine`, or `None` when it is degenerate (zero or non-finite determinant).
pub fn try_invert(affine: Affine) -> Option<Affine> {
    let det = affine.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inverse = affine.inverse();
    inverse
        .as_coeffs()
        .iter()
        .all(|c| c.is_finite())
        .then_some(inverse)
}
