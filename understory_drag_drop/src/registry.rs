// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered registry of drop targets.
//!
//! Targets are kept in registration order. That order is the tie-break when the
//! pointer lies inside several targets at once: the earliest registration wins.
//!
//! Storage is a slot vector in insertion order plus a hash index from id to slot.
//! Removal leaves a tombstone so that it stays O(1); tombstones are compacted away
//! once they outnumber live entries.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::target::DropTarget;

/// Slot vectors at or below this length are never compacted.
const COMPACT_MIN_SLOTS: usize = 16;

/// Ordered map from target id to [`DropTarget`].
///
/// ```
/// use kurbo::Rect;
/// use understory_drag_drop::{DropTarget, DropTargetRegistry};
///
/// let mut registry = DropTargetRegistry::new();
/// registry.register(DropTarget::new(1_u32, Rect::ZERO, (), "a"));
/// registry.register(DropTarget::new(2_u32, Rect::ZERO, (), "b"));
/// registry.register(DropTarget::new(1_u32, Rect::ZERO, (), "a2"));
///
/// // Overwriting keeps the original position.
/// assert_eq!(registry.ids().copied().collect::<Vec<_>>(), [1, 2]);
/// assert_eq!(*registry.get(&1).unwrap().subject(), "a2");
/// ```
pub struct DropTargetRegistry<K, S, N> {
    slots: Vec<Option<Rc<DropTarget<K, S, N>>>>,
    index: HashMap<K, usize>,
}

impl<K, S, N> Default for DropTargetRegistry<K, S, N> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::default(),
        }
    }
}

impl<K, S, N> fmt::Debug for DropTargetRegistry<K, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropTargetRegistry")
            .field("total_slots", &self.slots.len())
            .field("alive", &self.index.len())
            .finish_non_exhaustive()
    }
}

impl<K, S, N> DropTargetRegistry<K, S, N> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no targets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates targets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DropTarget<K, S, N>> {
        self.entries().map(|t| &**t)
    }

    /// Iterates target ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.iter().map(DropTarget::id)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &Rc<DropTarget<K, S, N>>> {
        self.slots.iter().flatten()
    }
}

impl<K: Hash + Eq + Clone, S, N> DropTargetRegistry<K, S, N> {
    /// Inserts or replaces the target with `target.id()`.
    ///
    /// A replaced target keeps its position; a new one is appended.
    /// Returns the replaced descriptor, if any.
    pub fn register(&mut self, target: DropTarget<K, S, N>) -> Option<Rc<DropTarget<K, S, N>>> {
        let target = Rc::new(target);
        if let Some(&slot) = self.index.get(target.id()) {
            return self.slots[slot].replace(target);
        }
        self.index.insert(target.id().clone(), self.slots.len());
        self.slots.push(Some(target));
        None
    }

    /// Removes the target with `id`, returning it. Unknown ids are ignored.
    pub fn deregister(&mut self, id: &K) -> Option<Rc<DropTarget<K, S, N>>> {
        let slot = self.index.remove(id)?;
        let removed = self.slots[slot].take();
        self.maybe_compact();
        removed
    }

    /// Looks up a target by id.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<&DropTarget<K, S, N>> {
        let slot = *self.index.get(id)?;
        self.slots[slot].as_deref()
    }

    /// Returns `true` if a target with `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    fn maybe_compact(&mut self) {
        let tombstones = self.slots.len() - self.index.len();
        if self.slots.len() <= COMPACT_MIN_SLOTS || tombstones <= self.index.len() {
            return;
        }
        self.slots.retain(Option::is_some);
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Some(target) = entry
                && let Some(s) = self.index.get_mut(target.id())
            {
                *s = slot;
            }
        }
    }
}
