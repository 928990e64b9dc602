// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: what is being dragged, where the pointer is, and where it would drop.
//!
//! ## Lifecycle
//!
//! 1) [`DragDropStore::start_drag`](crate::DragDropStore::start_drag) records the dragged
//!    subjects and clears any previous resolution. The pointer position is left alone
//!    until the first move.
//! 2) [`DragDropStore::move_and_check_bounds`](crate::DragDropStore::move_and_check_bounds)
//!    records the pointer and re-resolves the drop target.
//! 3) [`DragDropStore::stop_drag`](crate::DragDropStore::stop_drag) commits the drop on the
//!    resolved target, moves the dragged subjects into
//!    [`past_subjects`](DragSession::past_subjects) and clears everything else.
//!
//! The past subjects stay readable through the next drag so renderers can keep the
//! released item in place for one more frame; they are replaced when that drag stops.

use alloc::rc::Rc;
use core::fmt;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::target::DropTarget;

/// Inline storage for dragged subjects. Most drags carry one or two items.
pub type Subjects<S> = SmallVec<[S; 2]>;

/// The single cached rectangle and the target it belongs to.
pub(crate) struct BoundsCache<K, S, N> {
    pub(crate) rect: Rect,
    pub(crate) owner: Rc<DropTarget<K, S, N>>,
}

/// Tracks the state of the current drag operation.
pub struct DragSession<K, S, N> {
    pub(crate) subjects: Subjects<S>,
    pub(crate) pointer: Option<Point>,
    pub(crate) resolved: Option<Rc<DropTarget<K, S, N>>>,
    pub(crate) cache: Option<BoundsCache<K, S, N>>,
    pub(crate) past_subjects: Subjects<S>,
}

impl<K, S, N> Default for DragSession<K, S, N> {
    fn default() -> Self {
        Self {
            subjects: Subjects::new(),
            pointer: None,
            resolved: None,
            cache: None,
            past_subjects: Subjects::new(),
        }
    }
}

impl<K, S, N> fmt::Debug for DragSession<K, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("subjects", &self.subjects.len())
            .field("pointer", &self.pointer)
            .field("resolved", &self.resolved.is_some())
            .field("cached_bounds", &self.cached_bounds())
            .field("past_subjects", &self.past_subjects.len())
            .finish()
    }
}

impl<K, S, N> DragSession<K, S, N> {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while subjects are being dragged.
    pub fn is_dragging(&self) -> bool {
        !self.subjects.is_empty()
    }

    /// Subjects of the current drag; empty when idle.
    pub fn subjects(&self) -> &[S] {
        &self.subjects
    }

    /// Subjects of the most recently finished drag.
    pub fn past_subjects(&self) -> &[S] {
        &self.past_subjects
    }

    /// Last pointer position seen during this drag.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// The resolved drop target, if any.
    pub fn resolved(&self) -> Option<&DropTarget<K, S, N>> {
        self.resolved.as_deref()
    }

    /// The cached rectangle checked before scanning the registry.
    pub fn cached_bounds(&self) -> Option<Rect> {
        self.cache.as_ref().map(|c| c.rect)
    }

    pub(crate) fn start(&mut self, subjects: impl IntoIterator<Item = S>) {
        self.subjects = subjects.into_iter().collect();
        self.resolved = None;
        self.cache = None;
    }

    /// Ends the drag and hands back the target to commit the drop on.
    pub(crate) fn stop(&mut self) -> Option<Rc<DropTarget<K, S, N>>> {
        let dropped = self.resolved.take();
        self.past_subjects = core::mem::take(&mut self.subjects);
        self.cache = None;
        self.pointer = None;
        dropped
    }

    pub(crate) fn forget_cache_for(&mut self, id: &K)
    where
        K: PartialEq,
    {
        if self.cache.as_ref().is_some_and(|c| c.owner.id() == id) {
            self.cache = None;
        }
    }
}

impl<K, S: PartialEq, N> DragSession<K, S, N> {
    /// Returns `true` if `subject` is part of the current drag.
    pub fn is_dragged(&self, subject: &S) -> bool {
        self.subjects.contains(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    type Session = DragSession<u32, &'static str, ()>;

    fn cache_for(id: u32) -> BoundsCache<u32, &'static str, ()> {
        BoundsCache {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            owner: Rc::new(DropTarget::new(id, Rect::ZERO, (), "t")),
        }
    }

    #[test]
    fn new_session_is_idle() {
        let s = Session::new();
        assert!(!s.is_dragging());
        assert!(s.subjects().is_empty());
        assert!(s.past_subjects().is_empty());
        assert!(s.pointer().is_none());
        assert!(s.resolved().is_none());
        assert!(s.cached_bounds().is_none());
    }

    #[test]
    fn start_sets_subjects_and_clears_resolution() {
        let mut s = Session::new();
        s.pointer = Some(Point::new(1.0, 2.0));
        s.cache = Some(cache_for(1));
        s.resolved = Some(Rc::clone(&s.cache.as_ref().unwrap().owner));

        s.start(["a", "b"]);

        assert!(s.is_dragging());
        assert_eq!(s.subjects(), &["a", "b"]);
        assert!(s.is_dragged(&"a"));
        assert!(!s.is_dragged(&"c"));
        assert!(s.resolved().is_none());
        assert!(s.cached_bounds().is_none());
        // Pointer is untouched until the first move.
        assert_eq!(s.pointer(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn stop_rotates_subjects_and_clears() {
        let mut s = Session::new();
        s.start(["a"]);
        s.pointer = Some(Point::new(3.0, 4.0));
        s.cache = Some(cache_for(1));
        s.resolved = Some(Rc::clone(&s.cache.as_ref().unwrap().owner));

        let dropped = s.stop();

        assert_eq!(dropped.map(|t| *t.id()), Some(1));
        assert!(!s.is_dragging());
        assert_eq!(s.past_subjects(), &["a"]);
        assert!(s.pointer().is_none());
        assert!(s.resolved().is_none());
        assert!(s.cached_bounds().is_none());
    }

    #[test]
    fn stop_on_idle_session_is_safe() {
        let mut s = Session::new();
        s.start(["a"]);
        s.stop();

        assert!(s.stop().is_none());
        assert!(s.past_subjects().is_empty());
        assert!(!s.is_dragging());
    }

    #[test]
    fn past_subjects_survive_next_start() {
        let mut s = Session::new();
        s.start(["a"]);
        s.stop();
        s.start(["b"]);
        assert_eq!(s.past_subjects(), &["a"]);
        s.stop();
        assert_eq!(s.past_subjects(), &["b"]);
    }

    #[test]
    fn forget_cache_only_for_owner() {
        let mut s = Session::new();
        s.cache = Some(cache_for(1));
        s.forget_cache_for(&2);
        assert!(s.cached_bounds().is_some());
        s.forget_cache_for(&1);
        assert!(s.cached_bounds().is_none());
    }
}
