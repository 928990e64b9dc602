// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Messages accepted by [`DragDropStore::dispatch`](crate::DragDropStore::dispatch).

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::target::DropTarget;

/// One drag-and-drop message.
///
/// Messages are applied in the order they are dispatched, each to completion.
pub enum Action<K, S, N> {
    /// Register or replace a drop target.
    RegisterDroppable(DropTarget<K, S, N>),
    /// Remove a drop target by id.
    DeregisterDroppable(K),
    /// Begin dragging the given subjects.
    StartDragging(Vec<S>),
    /// Release the drag, committing a drop on the resolved target.
    StopDragging,
    /// Move the pointer and re-resolve the drop target.
    MoveAndCheckBounds(Point),
}

impl<K: fmt::Debug, S: fmt::Debug, N: fmt::Debug> fmt::Debug for Action<K, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegisterDroppable(t) => f.debug_tuple("RegisterDroppable").field(t).finish(),
            Self::DeregisterDroppable(id) => f.debug_tuple("DeregisterDroppable").field(id).finish(),
            Self::StartDragging(s) => f.debug_tuple("StartDragging").field(s).finish(),
            Self::StopDragging => f.write_str("StopDragging"),
            Self::MoveAndCheckBounds(p) => f.debug_tuple("MoveAndCheckBounds").field(p).finish(),
        }
    }
}
