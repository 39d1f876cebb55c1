// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: classify pointer interactions into taps, long presses, and drags.
//!
//! This crate provides a small, host-ticked state machine that watches a single
//! pointer-down-to-up interaction on one UI element and decides what it was:
//!
//! - [`GestureClassifier`]: per-element classifier with distance, tap, and long-press
//!   thresholds from [`GestureConfig`].
//! - [`Interactable`]: the element's gesture flags (clickable, draggable, drag axes,
//!   tooltip) plus drag rules that can veto a drag at the moment it is decided.
//! - [`PointerInput`]: the pointer provider the classifier samples each tick. It is
//!   passed explicitly; there is no global input registry.
//! - [`DeltaTracker`]: displacement from an anchor point, shared with drag sessions.
//! - [`VisualState`]: normal/highlighted/pressed requests for the rendering layer.
//!
//! The crate does not poll devices, schedule frames, or render anything. Hosts
//! forward pointer notifications, call [`GestureClassifier::tick`] once per frame,
//! and drain [`GestureEvent`]s for side effects such as tooltips and visual
//! feedback.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureClassifier, GestureConfig, GestureEvent, GestureOutcome, Interactable,
//!     PointerKind, PointerSnapshot,
//! };
//!
//! let mut button = GestureClassifier::new(GestureConfig::default(), Interactable::new());
//! let frame = Duration::from_millis(16);
//!
//! button.on_pointer_down(PointerKind::Touch, &PointerSnapshot::held(Point::ZERO));
//! assert_eq!(button.tick(frame, &PointerSnapshot::held(Point::ZERO)), None);
//!
//! // Released well before the 200ms tap ceiling.
//! button.on_pointer_up();
//! let outcome = button.tick(frame, &PointerSnapshot::released(Point::ZERO));
//! assert_eq!(outcome, Some(GestureOutcome::Click));
//! assert!(button.drain_events().contains(&GestureEvent::Click));
//! ```
//!
//! ## Drag rules
//!
//! Drag rules are predicates over the [`Interactable`]. They run only when a drag
//! has been decided, and a single failing rule turns the drag into a cancelled
//! gesture:
//!
//! ```rust
//! use understory_gesture::Interactable;
//!
//! let mut card = Interactable::new().with_drag_axes(true, true);
//! let locked = card.add_drag_rule(|_| false);
//! assert!(!card.allows_drag());
//! card.remove_drag_rule(locked);
//! assert!(card.allows_drag());
//! ```

mod classifier;
mod delta;
mod input;
mod interactable;
mod visual;

pub use classifier::{
    GestureClassifier, GestureConfig, GestureEvent, GestureOutcome, PointerSession,
};
pub use delta::DeltaTracker;
pub use input::{PointerInput, PointerKind, PointerSnapshot};
pub use interactable::{DragRule, DragRuleId, Interactable};
pub use visual::VisualState;
