// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side view of drop targets: hit testing, ancestry, and capabilities.
//!
//! A [`DropScene`] exposes just enough of the host's element tree for drag
//! targeting. Each element advertises what it can do through [`Capabilities`]
//! and implements the matching callbacks of [`DragElement`]. Capabilities are
//! queried by walking ancestors, so a composite widget can put its drop handler
//! on the container while its children remain plain hit-test targets.

use kurbo::Point;

use crate::cursor::DragCursor;
use crate::error::DragError;

bitflags::bitflags! {
    /// Drag-related roles an element can play.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Marks the root of a logical group. Hits inside the group resolve to this
        /// element, and moving between its children fires no transitions.
        const DRAG_COMPONENT = 0b0000_0001;
        /// Receives [`DragElement::on_drag_enter`].
        const DRAG_ENTER     = 0b0000_0010;
        /// Receives [`DragElement::on_drag_exit`].
        const DRAG_EXIT      = 0b0000_0100;
        /// Receives [`DragElement::allow_drop`] and [`DragElement::on_drop`].
        const DROP           = 0b0000_1000;
        /// Observes drags that start from its subtree.
        const DRAG_START     = 0b0001_0000;
        /// Observes drags from its subtree ending.
        const DRAG_END       = 0b0010_0000;
    }
}

/// Callbacks for the capabilities an element advertises.
///
/// Every method has a no-op default; implement the ones matching the
/// element's [`Capabilities`]. Callbacks for capabilities the element does not
/// advertise are never called.
///
/// Report failures by returning [`DragError`]; callbacks must not panic. A
/// panic unwinds through the session mid-notification, skipping the remaining
/// observers and leaving the session for the host to cancel.
pub trait DragElement<N, T> {
    /// The cursor entered this element.
    fn on_drag_enter(&mut self, _cursor: &DragCursor<N, T>) {}

    /// The cursor left this element.
    fn on_drag_exit(&mut self, _cursor: &DragCursor<N, T>) {}

    /// Whether this element accepts the dragged payload.
    fn allow_drop(&self, _cursor: &DragCursor<N, T>) -> bool {
        true
    }

    /// The payload was dropped on this element.
    fn on_drop(&mut self, _cursor: &DragCursor<N, T>) {}

    /// A drag started from this element's subtree.
    fn on_drag_start(&mut self, _cursor: &DragCursor<N, T>) -> Result<(), DragError> {
        Ok(())
    }

    /// A drag from this element's subtree ended.
    fn on_drag_end(&mut self, _cursor: &DragCursor<N, T>) -> Result<(), DragError> {
        Ok(())
    }
}

/// Host element tree as seen by drag targeting.
pub trait DropScene {
    /// Element handle. Small and copyable, like a generational id.
    type Node: Copy + Eq + core::fmt::Debug;
    /// The dragged payload type.
    type Payload;

    /// Topmost hit-testable element under a screen point.
    fn top_hit(&self, point: Point) -> Option<Self::Node>;

    /// Parent of `node`, or `None` for a root.
    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children of `node` in paint order.
    fn children_of(&self, node: Self::Node) -> &[Self::Node];

    /// Drag roles of `node`.
    fn capabilities(&self, node: Self::Node) -> Capabilities;

    /// Callback target for `node`, or `None` if it has no drag behavior.
    fn element_mut(
        &mut self,
        node: Self::Node,
    ) -> Option<&mut dyn DragElement<Self::Node, Self::Payload>>;
}

/// Nearest element, starting at `node` itself, whose capabilities contain `caps`.
pub fn nearest_with<S: DropScene + ?Sized>(
    scene: &S,
    node: S::Node,
    caps: Capabilities,
) -> Option<S::Node> {
    let mut current = Some(node);
    while let Some(n) = current {
        if scene.capabilities(n).contains(caps) {
            return Some(n);
        }
        current = scene.parent_of(n);
    }
    None
}

/// Resolve the element under `point` for targeting.
///
/// If the topmost hit is `previous`, it is returned as-is. Otherwise the hit is
/// promoted to its nearest [`Capabilities::DRAG_COMPONENT`] ancestor when one
/// exists.
pub fn resolve_hit<S: DropScene + ?Sized>(
    scene: &S,
    point: Point,
    previous: Option<S::Node>,
) -> Option<S::Node> {
    let hit = scene.top_hit(point)?;
    if Some(hit) == previous {
        return Some(hit);
    }
    Some(nearest_with(scene, hit, Capabilities::DRAG_COMPONENT).unwrap_or(hit))
}

/// Elements in the subtree rooted at `root` (inclusive) whose capabilities
/// contain `caps`, in depth-first pre-order.
pub fn subtree_with<S: DropScene + ?Sized>(
    scene: &S,
    root: S::Node,
    caps: Capabilities,
) -> Vec<S::Node> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if scene.capabilities(node).contains(caps) {
            out.push(node);
        }
        stack.extend(scene.children_of(node).iter().rev().copied());
    }
    out
}
