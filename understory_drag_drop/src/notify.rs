// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification and the read-only state view handed to subscribers.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::session::DragSession;
use crate::target::DropTarget;

/// Read-only view of the drag-and-drop state.
///
/// Borrowed from the store; it is not an owned copy.
#[derive(Debug)]
pub struct DragDropState<'a, K, S, N> {
    /// Subjects being dragged; empty when idle.
    pub drag_target: &'a [S],
    /// The resolved drop target, if any.
    pub drop_target: Option<&'a DropTarget<K, S, N>>,
    /// Last pointer position of the current drag.
    pub drag_position: Option<Point>,
    /// Subjects of the most recently finished drag.
    pub past_drag_target: &'a [S],
    /// Number of change notifications emitted so far.
    pub revision: u64,
}

impl<'a, K, S, N> DragDropState<'a, K, S, N> {
    pub(crate) fn new(session: &'a DragSession<K, S, N>, revision: u64) -> Self {
        Self {
            drag_target: session.subjects(),
            drop_target: session.resolved(),
            drag_position: session.pointer(),
            past_drag_target: session.past_subjects(),
            revision,
        }
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<K, S, N> = Box<dyn FnMut(&DragDropState<'_, K, S, N>)>;

/// Broadcasts a change signal to subscribers after every store mutation.
///
/// Subscribers are called in subscription order with the post-mutation state.
pub struct ChangeNotifier<K, S, N> {
    subscribers: Vec<(SubscriptionId, Subscriber<K, S, N>)>,
    next_id: u64,
    revision: u64,
}

impl<K, S, N> Default for ChangeNotifier<K, S, N> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            revision: 0,
        }
    }
}

impl<K, S, N> fmt::Debug for ChangeNotifier<K, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<K, S, N> ChangeNotifier<K, S, N> {
    /// Creates a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&DragDropState<'_, K, S, N>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of current subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Number of broadcasts so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Advances the revision ahead of a broadcast and returns it.
    pub(crate) fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    pub(crate) fn broadcast(&mut self, state: &DragDropState<'_, K, S, N>) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    type Notifier = ChangeNotifier<u32, char, ()>;

    fn emit(n: &mut Notifier, session: &DragSession<u32, char, ()>) {
        let revision = n.bump();
        n.broadcast(&DragDropState::new(session, revision));
    }

    #[test]
    fn subscribers_called_in_order_with_revision() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut n = Notifier::new();
        let first = Rc::clone(&log);
        n.subscribe(move |s| first.borrow_mut().push(("first", s.revision)));
        let second = Rc::clone(&log);
        n.subscribe(move |s| second.borrow_mut().push(("second", s.revision)));

        let session = DragSession::new();
        emit(&mut n, &session);
        emit(&mut n, &session);

        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
        );
        assert_eq!(n.revision(), 2);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let hits = Rc::new(RefCell::new(0));
        let mut n = Notifier::new();
        let sink = Rc::clone(&hits);
        let id = n.subscribe(move |_| *sink.borrow_mut() += 1);
        let session = DragSession::new();

        emit(&mut n, &session);
        assert!(n.unsubscribe(id));
        assert!(!n.unsubscribe(id));
        assert!(n.is_empty());
        emit(&mut n, &session);

        assert_eq!(*hits.borrow(), 1);
        // Revision still advances without subscribers.
        assert_eq!(n.revision(), 2);
    }

    #[test]
    fn state_view_mirrors_session() {
        let mut session = DragSession::<u32, char, ()>::new();
        session.start(['a', 'b']);
        session.pointer = Some(Point::new(1.0, 2.0));

        let state = DragDropState::new(&session, 7);

        assert_eq!(state.drag_target, &['a', 'b']);
        assert!(state.drop_target.is_none());
        assert_eq!(state.drag_position, Some(Point::new(1.0, 2.0)));
        assert!(state.past_drag_target.is_empty());
        assert_eq!(state.revision, 7);
    }
}
