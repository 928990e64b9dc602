// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop --heading-base-level=0

//! Understory Drag Drop: drop target bookkeeping and hit resolution for drag-and-drop.
//!
//! This crate tracks which drop targets exist, what is being dragged, and which single
//! target (if any) the pointer is over and accepts the drag. Releasing the drag commits
//! the drop on that target. State changes are broadcast to subscribers, which read a
//! borrowed [`DragDropState`] view and repaint.
//!
//! The crate does not draw anything and does not own any geometry. Each target carries
//! an opaque node handle; the store asks a [`Geometry`] capability for the node's live
//! bounds only when it has to scan.
//!
//! ## Pieces
//!
//! - [`bounds`]: the point-in-rectangle predicate (edges excluded).
//! - [`DropTargetRegistry`]: ordered map of targets. Registration order breaks ties
//!   between overlapping targets.
//! - [`DragSession`]: dragged subjects, pointer position, resolved target, cached bounds,
//!   and the subjects of the previous drag.
//! - Hit resolution: a single cached rectangle checked first, then a scan in
//!   registration order that skips targets whose subject is being dragged.
//! - [`ChangeNotifier`]: one broadcast per mutation, with a revision counter.
//! - [`DragDropStore`]: owns all of the above and applies [`Action`] messages in order.
//! - [`throttle`]: an optional frame-interval limiter for pointer moves.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{Action, DragDropStore, DropTarget};
//!
//! // The render layer: node handles index into a table of live rectangles.
//! let layout = Rc::new(RefCell::new(vec![
//!     Rect::new(0.0, 0.0, 100.0, 20.0),
//!     Rect::new(0.0, 20.0, 100.0, 40.0),
//! ]));
//! let live = Rc::clone(&layout);
//! let mut store = DragDropStore::new(move |node: &usize| live.borrow()[*node]);
//!
//! let repaints = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&repaints);
//! store.subscribe(move |_state| *counter.borrow_mut() += 1);
//!
//! let drops = Rc::new(RefCell::new(Vec::new()));
//! for (node, layer) in ["background", "text"].into_iter().enumerate() {
//!     let sink = Rc::clone(&drops);
//!     store.dispatch(Action::RegisterDroppable(
//!         DropTarget::new(layer, layout.borrow()[node], node, layer)
//!             .with_on_drop(move |subject: &&str| sink.borrow_mut().push(*subject)),
//!     ));
//! }
//!
//! // Drag the text layer onto the background layer.
//! store.dispatch(Action::StartDragging(vec!["text"]));
//! store.dispatch(Action::MoveAndCheckBounds(Point::new(50.0, 10.0)));
//! assert_eq!(store.state().drop_target.map(|t| *t.id()), Some("background"));
//!
//! // Over itself: the text layer is never a drop target for its own drag.
//! store.dispatch(Action::MoveAndCheckBounds(Point::new(50.0, 30.0)));
//! assert!(store.state().drop_target.is_none());
//!
//! store.dispatch(Action::MoveAndCheckBounds(Point::new(50.0, 10.0)));
//! store.dispatch(Action::StopDragging);
//! assert_eq!(*drops.borrow(), ["background"]);
//! assert_eq!(store.state().past_drag_target, &["text"]);
//! assert_eq!(*repaints.borrow(), 7);
//! ```
//!
//! ## Consistency
//!
//! - Everything is synchronous and single-threaded; each call runs to completion.
//! - Registering or deregistering a target never changes the resolved target. A
//!   deregistered target stays resolved until the next pointer move rescans.
//! - `validate` and `on_drop` callbacks that panic unwind to the caller. The session
//!   holds no resolved target while a callback runs.
//!
//! ## Features
//!
//! - `std` (default): build against the standard library.
//! - `libm`: use `libm` for Kurbo's float math on `no_std` targets.
//!
//! Diagnostics are emitted through `tracing` at `debug` (lifecycle) and `trace`
//! (per-move resolution) levels.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
pub mod bounds;
mod notify;
mod registry;
mod resolve;
mod session;
mod store;
mod target;
pub mod throttle;

pub use action::Action;
pub use notify::{ChangeNotifier, DragDropState, SubscriptionId};
pub use registry::DropTargetRegistry;
pub use resolve::{Geometry, RejectionPolicy, Resolution};
pub use session::{DragSession, Subjects};
pub use store::{DragDropConfig, DragDropStore};
pub use target::DropTarget;
