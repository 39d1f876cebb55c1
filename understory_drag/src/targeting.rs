// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop targeting: track the element under the drag cursor and fire enter/exit.
//!
//! ## Usage
//!
//! 1) Move the [`DragCursor`] to the new pointer position.
//! 2) Call [`DropTargeting::retarget`]. It hit-tests through the [`DropScene`],
//!    compares the result against the tracked element, and invokes
//!    `on_drag_exit` / `on_drag_enter` on the nearest capable ancestors.
//! 3) Read [`DropTargeting::drop_handler`] when the drag ends.
//!
//! Hits inside one logical group (the nearest [`Capabilities::DRAG_COMPONENT`]
//! ancestor) are treated as the same target, so moving across the children of a
//! composite widget fires nothing.
//!
//! Transitions mirror the hover model of `understory_event_state`, reduced to a
//! single tracked element instead of a root→target path.

use crate::cursor::DragCursor;
use crate::scene::{Capabilities, DropScene, nearest_with, resolve_hit};

/// What a call to [`DropTargeting::retarget`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Retarget<N> {
    /// The tracked element is still under the cursor (or nothing was, and still is).
    Unchanged,
    /// A different element was hit, but in the tracked logical group.
    SameGroup,
    /// The cursor moved onto a new element.
    Changed {
        /// Exit handler notified for the previous element.
        exited: Option<N>,
        /// Enter handler notified for the new element.
        entered: Option<N>,
    },
    /// The cursor left every element.
    Cleared {
        /// Exit handler notified for the previous element.
        exited: Option<N>,
    },
}

/// The element currently targeted by a drag and its resolved handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropTargeting<N> {
    target: Option<N>,
    group: Option<N>,
    exit_handler: Option<N>,
    drop_handler: Option<N>,
}

impl<N> Default for DropTargeting<N> {
    fn default() -> Self {
        Self {
            target: None,
            group: None,
            exit_handler: None,
            drop_handler: None,
        }
    }
}

impl<N: Copy + Eq + core::fmt::Debug> DropTargeting<N> {
    /// Nothing targeted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tracked element.
    pub fn target(&self) -> Option<N> {
        self.target
    }

    /// Logical group of the tracked element.
    pub fn group(&self) -> Option<N> {
        self.group
    }

    /// Nearest exit-capable ancestor of the tracked element.
    pub fn exit_handler(&self) -> Option<N> {
        self.exit_handler
    }

    /// Nearest drop-capable ancestor of the tracked element.
    pub fn drop_handler(&self) -> Option<N> {
        self.drop_handler
    }

    /// Re-resolve the element under the cursor and fire transitions.
    pub fn retarget<S>(&mut self, scene: &mut S, cursor: &DragCursor<N, S::Payload>) -> Retarget<N>
    where
        S: DropScene<Node = N> + ?Sized,
    {
        let Some(hit) = resolve_hit(scene, cursor.position(), self.target) else {
            if self.target.is_none() {
                return Retarget::Unchanged;
            }
            let exited = self.clear(scene, cursor);
            return Retarget::Cleared { exited };
        };

        if Some(hit) == self.target {
            return Retarget::Unchanged;
        }
        let group = nearest_with(scene, hit, Capabilities::DRAG_COMPONENT);
        if group.is_some() && group == self.group {
            return Retarget::SameGroup;
        }

        let exited = self.exit_handler.take();
        if let Some(handler) = exited {
            exit(scene, handler, cursor);
        }

        self.target = Some(hit);
        self.group = group;
        self.exit_handler = nearest_with(scene, hit, Capabilities::DRAG_EXIT);
        self.drop_handler = nearest_with(scene, hit, Capabilities::DROP);
        let entered = nearest_with(scene, hit, Capabilities::DRAG_ENTER);
        if let Some(handler) = entered {
            match scene.element_mut(handler) {
                Some(element) => element.on_drag_enter(cursor),
                None => log::debug!("enter handler {handler:?} has no element"),
            }
        }
        log::trace!("drag target changed to {hit:?}");
        Retarget::Changed { exited, entered }
    }

    /// Fire the exit transition for the tracked element and forget it.
    ///
    /// Returns the exit handler that was notified.
    pub fn clear<S>(&mut self, scene: &mut S, cursor: &DragCursor<N, S::Payload>) -> Option<N>
    where
        S: DropScene<Node = N> + ?Sized,
    {
        let exited = self.exit_handler;
        if let Some(handler) = exited {
            exit(scene, handler, cursor);
        }
        self.forget();
        exited
    }

    /// Forget the tracked element without notifying anyone.
    pub fn forget(&mut self) {
        *self = Self::default();
    }
}

fn exit<S: DropScene + ?Sized>(
    scene: &mut S,
    handler: S::Node,
    cursor: &DragCursor<S::Node, S::Payload>,
) {
    match scene.element_mut(handler) {
        Some(element) => element.on_drag_exit(cursor),
        None => log::debug!("exit handler {handler:?} has no element"),
    }
}
