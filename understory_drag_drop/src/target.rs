// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop target descriptors.

use alloc::boxed::Box;
use core::cell::Cell;
use core::fmt;

use kurbo::{Point, Rect};

type ValidateFn<S> = dyn Fn(&[S], Point, Rect) -> bool;
type DropFn<S> = dyn Fn(&S);

/// A registered drop target.
///
/// - `id`: registry key, unique per store.
/// - `bounds`: last-known rectangle. Updated by the store when the target is resolved.
/// - `node`: opaque handle into the render layer; passed to [`Geometry`](crate::Geometry)
///   to query live bounds.
/// - `subject`: the domain object this target represents. A target is never resolved
///   while its own subject is being dragged.
/// - `validate`: decides whether the current drag may drop here. Defaults to accepting.
/// - `on_drop`: invoked with `subject` when a drag is released over this target.
///   Defaults to doing nothing.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_drag_drop::DropTarget;
///
/// let target = DropTarget::new("layer-1", Rect::new(0.0, 0.0, 100.0, 20.0), 7_u32, "layer-1")
///     .with_validate(|dragged: &[&str], _point: Point, _bounds: Rect| dragged.len() == 1);
///
/// assert_eq!(*target.id(), "layer-1");
/// assert!(target.validate(&["layer-2"], Point::new(5.0, 5.0)));
/// assert!(!target.validate(&["layer-2", "layer-3"], Point::new(5.0, 5.0)));
/// ```
pub struct DropTarget<K, S, N> {
    id: K,
    bounds: Cell<Rect>,
    node: N,
    subject: S,
    validate: Box<ValidateFn<S>>,
    on_drop: Box<DropFn<S>>,
}

impl<K, S, N> DropTarget<K, S, N> {
    /// Creates a target that accepts every drag and ignores drops.
    pub fn new(id: K, bounds: Rect, node: N, subject: S) -> Self {
        Self {
            id,
            bounds: Cell::new(bounds),
            node,
            subject,
            validate: Box::new(|_: &[S], _: Point, _: Rect| true),
            on_drop: Box::new(|_: &S| {}),
        }
    }

    /// Replaces the validation callback.
    ///
    /// The callback receives the dragged subjects, the pointer position and the
    /// target's stored bounds.
    #[must_use]
    pub fn with_validate(mut self, validate: impl Fn(&[S], Point, Rect) -> bool + 'static) -> Self {
        self.validate = Box::new(validate);
        self
    }

    /// Replaces the drop callback.
    #[must_use]
    pub fn with_on_drop(mut self, on_drop: impl Fn(&S) + 'static) -> Self {
        self.on_drop = Box::new(on_drop);
        self
    }

    /// Registry key of this target.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Last-known bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    /// Render-layer handle used to query live bounds.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Domain object this target represents.
    pub fn subject(&self) -> &S {
        &self.subject
    }

    /// Runs the validation callback against the stored bounds.
    pub fn validate(&self, dragged: &[S], point: Point) -> bool {
        (self.validate)(dragged, point, self.bounds.get())
    }

    pub(crate) fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    pub(crate) fn commit_drop(&self) {
        (self.on_drop)(&self.subject);
    }
}

impl<K: fmt::Debug, S: fmt::Debug, N: fmt::Debug> fmt::Debug for DropTarget<K, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropTarget")
            .field("id", &self.id)
            .field("bounds", &self.bounds.get())
            .field("node", &self.node)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}
