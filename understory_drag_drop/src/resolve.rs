// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit resolution: which registered target is under the pointer and accepts the drag.
//!
//! Resolution runs on every pointer move, so it is built around a single cached
//! rectangle:
//!
//! 1) If the pointer is still inside the cached rectangle, its owner is the candidate
//!    and the registry is not scanned.
//! 2) Otherwise the registry is scanned in registration order. Targets whose subject is
//!    being dragged are skipped. Every other target's live bounds are queried through
//!    [`Geometry`]; the first one containing the pointer becomes the candidate and its
//!    live bounds become the new cached rectangle.
//! 3) The candidate's `validate` callback decides. On acceptance the candidate's stored
//!    bounds are refreshed from the cache and it becomes the resolved target. On
//!    rejection nothing is resolved and, under [`RejectionPolicy::Rescan`], the cache is
//!    dropped so the next move scans again.
//!
//! Moving within one target is O(1); crossing a boundary costs one live-bounds query per
//! non-excluded target up to the first hit.

use alloc::rc::Rc;
use core::hash::Hash;

use kurbo::{Point, Rect};

use crate::bounds;
use crate::registry::DropTargetRegistry;
use crate::session::{BoundsCache, DragSession};

/// Render-layer capability: report the current bounds of a node.
///
/// This is the only place the resolver consults the render layer. Implementations
/// must be synchronous and must not mutate the store.
///
/// Any `Fn(&N) -> Rect` closure implements this trait.
pub trait Geometry<N> {
    /// Returns the live bounds of `node`, in pointer coordinates.
    fn live_bounds(&self, node: &N) -> Rect;
}

impl<N, F: Fn(&N) -> Rect> Geometry<N> for F {
    #[inline]
    fn live_bounds(&self, node: &N) -> Rect {
        self(node)
    }
}

/// What to do with the cached rectangle when its owner rejects the drag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RejectionPolicy {
    /// Drop the cache; the next move rescans the registry.
    ///
    /// A target that rejects the drag does not shadow valid targets registered after it.
    #[default]
    Rescan,
    /// Keep the rectangle and its owner; moves inside it re-run the owner's
    /// validation without rescanning.
    ///
    /// Useful when validation depends on state that changes while the pointer rests
    /// inside one target, and rescans are expensive.
    RetainBounds,
}

/// Summary of one resolution pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The pointer was inside the cached rectangle; the registry was not scanned.
    pub cache_hit: bool,
    /// Number of live-bounds queries issued.
    pub queries: usize,
    /// A target was resolved.
    pub accepted: bool,
}

/// Re-resolves the drop target for `point` and records it as the pointer position.
pub(crate) fn check_bounds<K, S, N, G>(
    session: &mut DragSession<K, S, N>,
    registry: &DropTargetRegistry<K, S, N>,
    geometry: &G,
    policy: RejectionPolicy,
    point: Point,
) -> Resolution
where
    K: Hash + Eq + Clone,
    S: PartialEq,
    G: Geometry<N> + ?Sized,
{
    session.pointer = Some(point);
    // Nothing is resolved while user callbacks run; an unwinding callback leaves no target.
    session.resolved = None;
    let mut outcome = Resolution::default();

    if !session.is_dragging() {
        session.cache = None;
        return outcome;
    }

    let candidate = match session.cache.take() {
        Some(cache)
            if bounds::contains(cache.rect, point) && !session.is_dragged(cache.owner.subject()) =>
        {
            outcome.cache_hit = true;
            Some(cache)
        }
        _ => scan(session, registry, geometry, point, &mut outcome.queries),
    };

    let Some(cache) = candidate else {
        tracing::trace!(
            x = point.x,
            y = point.y,
            queries = outcome.queries,
            "no drop target under pointer"
        );
        return outcome;
    };

    if cache.owner.validate(&session.subjects, point) {
        cache.owner.set_bounds(cache.rect);
        session.resolved = Some(Rc::clone(&cache.owner));
        session.cache = Some(cache);
        outcome.accepted = true;
    } else if policy == RejectionPolicy::RetainBounds {
        session.cache = Some(cache);
    }

    tracing::trace!(
        x = point.x,
        y = point.y,
        cache_hit = outcome.cache_hit,
        queries = outcome.queries,
        accepted = outcome.accepted,
        "resolved drop target"
    );
    outcome
}

fn scan<K, S, N, G>(
    session: &DragSession<K, S, N>,
    registry: &DropTargetRegistry<K, S, N>,
    geometry: &G,
    point: Point,
    queries: &mut usize,
) -> Option<BoundsCache<K, S, N>>
where
    S: PartialEq,
    G: Geometry<N> + ?Sized,
{
    for target in registry.entries() {
        if session.is_dragged(target.subject()) {
            continue;
        }
        *queries += 1;
        let live = geometry.live_bounds(target.node());
        if bounds::contains(live, point) {
            return Some(BoundsCache {
                rect: live,
                owner: Rc::clone(target),
            });
        }
    }
    None
}
