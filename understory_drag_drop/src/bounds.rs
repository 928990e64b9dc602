// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial predicate for drop target bounds.
//!
//! Bounds are plain [`kurbo::Rect`] values in the same space as pointer positions.
//! `y0` is the top edge, `y1` the bottom edge, `x0` the left edge and `x1` the right edge.

use kurbo::{Point, Rect};

/// Returns `true` if `point` lies strictly inside `bounds`.
///
/// All four edges are excluded, so a pointer resting exactly on the shared edge of
/// two adjacent targets hits neither. Non-finite coordinates never hit.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_drag_drop::bounds::contains;
///
/// let r = Rect::new(0.0, 0.0, 10.0, 10.0);
/// assert!(contains(r, Point::new(5.0, 5.0)));
/// assert!(!contains(r, Point::new(0.0, 5.0)));
/// ```
#[inline]
#[must_use]
pub fn contains(bounds: Rect, point: Point) -> bool {
    bounds.y0 < point.y && bounds.y1 > point.y && bounds.x0 < point.x && bounds.x1 > point.x
}

/// Builds bounds from `top`, `bottom`, `left` and `right` edges.
#[inline]
#[must_use]
pub const fn from_edges(top: f64, bottom: f64, left: f64, right: f64) -> Rect {
    Rect::new(left, top, right, bottom)
}
