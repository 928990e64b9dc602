// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-and-drop store: registry, session, resolver and notifier behind one owner.

use core::fmt;
use core::hash::Hash;

use kurbo::Point;

use crate::action::Action;
use crate::notify::{ChangeNotifier, DragDropState, SubscriptionId};
use crate::registry::DropTargetRegistry;
use crate::resolve::{self, Geometry, RejectionPolicy, Resolution};
use crate::session::DragSession;
use crate::target::DropTarget;

/// Runtime options for a [`DragDropStore`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DragDropConfig {
    /// Cache handling when the target under the pointer rejects the drag.
    pub rejection: RejectionPolicy,
}

impl DragDropConfig {
    /// Sets [`DragDropConfig::rejection`].
    #[must_use]
    pub fn with_rejection(mut self, rejection: RejectionPolicy) -> Self {
        self.rejection = rejection;
        self
    }
}

/// Owns drop targets and the drag session, and notifies subscribers of every change.
///
/// - `K`: target id.
/// - `S`: subject type, shared by dragged objects and drop targets.
/// - `N`: render-layer node handle.
/// - `G`: [`Geometry`] used to query live bounds of nodes.
///
/// Every mutating call ends with exactly one notification, so after `n`
/// notifications a subscriber has seen the effect of exactly `n` calls.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use kurbo::{Point, Rect};
/// use understory_drag_drop::{DragDropStore, DropTarget};
///
/// // Nodes carry their own bounds in this example.
/// let mut store = DragDropStore::new(|node: &Rect| *node);
///
/// let dropped = Rc::new(Cell::new(None));
/// let sink = Rc::clone(&dropped);
/// let area = Rect::new(0.0, 0.0, 10.0, 10.0);
/// store.register(
///     DropTarget::new("a", area, area, "a").with_on_drop(move |s: &&str| sink.set(Some(*s))),
/// );
///
/// store.start_drag(["b"]);
/// store.move_and_check_bounds(Point::new(5.0, 5.0));
/// assert_eq!(store.state().drop_target.map(|t| *t.id()), Some("a"));
///
/// store.stop_drag();
/// assert_eq!(dropped.get(), Some("a"));
/// assert!(store.state().drag_target.is_empty());
/// assert_eq!(store.state().past_drag_target, &["b"]);
/// ```
pub struct DragDropStore<K, S, N, G> {
    registry: DropTargetRegistry<K, S, N>,
    session: DragSession<K, S, N>,
    notifier: ChangeNotifier<K, S, N>,
    geometry: G,
    config: DragDropConfig,
}

impl<K, S, N, G> fmt::Debug for DragDropStore<K, S, N, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDropStore")
            .field("registry", &self.registry)
            .field("session", &self.session)
            .field("notifier", &self.notifier)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<K, S, N, G> DragDropStore<K, S, N, G> {
    /// Creates an empty store with the default configuration.
    pub fn new(geometry: G) -> Self {
        Self::with_config(geometry, DragDropConfig::default())
    }

    /// Creates an empty store.
    pub fn with_config(geometry: G, config: DragDropConfig) -> Self {
        Self {
            registry: DropTargetRegistry::new(),
            session: DragSession::new(),
            notifier: ChangeNotifier::new(),
            geometry,
            config,
        }
    }

    /// Current state as a borrowed, read-only view.
    pub fn state(&self) -> DragDropState<'_, K, S, N> {
        DragDropState::new(&self.session, self.notifier.revision())
    }

    /// Registered drop targets.
    pub fn registry(&self) -> &DropTargetRegistry<K, S, N> {
        &self.registry
    }

    /// The drag session.
    pub fn session(&self) -> &DragSession<K, S, N> {
        &self.session
    }

    /// Runtime configuration.
    pub fn config(&self) -> DragDropConfig {
        self.config
    }

    /// Returns `true` while subjects are being dragged.
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// Number of notifications emitted so far.
    pub fn revision(&self) -> u64 {
        self.notifier.revision()
    }

    /// Subscribes to change notifications.
    ///
    /// The subscriber runs after every mutation with the resulting state.
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&DragDropState<'_, K, S, N>) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(subscriber)
    }

    /// Removes a subscriber. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn notify(&mut self) {
        let revision = self.notifier.bump();
        let state = DragDropState::new(&self.session, revision);
        self.notifier.broadcast(&state);
    }
}

impl<K, S, N, G> DragDropStore<K, S, N, G>
where
    K: Hash + Eq + Clone,
    S: PartialEq,
    G: Geometry<N>,
{
    /// Applies one message.
    pub fn dispatch(&mut self, action: Action<K, S, N>) {
        match action {
            Action::RegisterDroppable(target) => self.register(target),
            Action::DeregisterDroppable(id) => self.deregister(&id),
            Action::StartDragging(subjects) => self.start_drag(subjects),
            Action::StopDragging => self.stop_drag(),
            Action::MoveAndCheckBounds(point) => {
                self.move_and_check_bounds(point);
            }
        }
    }

    /// Registers or replaces a drop target.
    ///
    /// The resolved target is left alone. If the replaced target owned the cached
    /// rectangle, the cache is dropped so the next move sees the new descriptor.
    pub fn register(&mut self, target: DropTarget<K, S, N>) {
        let id = target.id().clone();
        let replaced = self.registry.register(target).is_some();
        if replaced {
            self.session.forget_cache_for(&id);
        }
        tracing::debug!(replaced, targets = self.registry.len(), "registered drop target");
        self.notify();
    }

    /// Removes a drop target. Unknown ids are ignored.
    ///
    /// If the removed target is resolved it stays resolved until the next move,
    /// which rescans the registry.
    pub fn deregister(&mut self, id: &K) {
        let removed = self.registry.deregister(id).is_some();
        if removed {
            self.session.forget_cache_for(id);
        }
        tracing::debug!(removed, targets = self.registry.len(), "deregistered drop target");
        self.notify();
    }

    /// Begins a drag of `subjects`, clearing any previous resolution.
    pub fn start_drag(&mut self, subjects: impl IntoIterator<Item = S>) {
        self.session.start(subjects);
        tracing::debug!(subjects = self.session.subjects().len(), "drag started");
        self.notify();
    }

    /// Ends the drag.
    ///
    /// If a target is resolved its `on_drop` runs exactly once with its subject.
    /// Calling this while idle only rotates the session fields.
    pub fn stop_drag(&mut self) {
        let dropped = self.session.stop();
        tracing::debug!(dropped = dropped.is_some(), "drag stopped");
        if let Some(target) = dropped {
            target.commit_drop();
        }
        self.notify();
    }

    /// Records the pointer position and re-resolves the drop target.
    pub fn move_and_check_bounds(&mut self, point: Point) -> Resolution {
        let resolution = resolve::check_bounds(
            &mut self.session,
            &self.registry,
            &self.geometry,
            self.config.rejection,
            point,
        );
        self.notify();
        resolution
    }
}
