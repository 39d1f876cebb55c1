// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag --heading-base-level=0

//! Understory Drag: drag sessions with drop targeting over a host element tree.
//!
//! A drag starts when a gesture classifier decides one (see `understory_gesture`)
//! and hands the origin to a [`DragSession`]. From then on the session owns the
//! interaction:
//!
//! - [`DragCursor`]: the visible surrogate that follows the pointer and carries
//!   the payload.
//! - [`DropTargeting`]: resolves the element under the cursor and fires
//!   enter/exit on the nearest capable ancestors. Moving inside one logical group
//!   fires nothing.
//! - [`DropScene`] and [`DragElement`]: the host's element tree, seen through hit
//!   testing, ancestry, and explicit [`Capabilities`].
//! - [`DragError`]: failures reported by drag-start/drag-end observers. They are
//!   logged and never abort the drag.
//!
//! Everything is single-threaded and host-ticked. Call [`DragSession::tick`] once
//! per frame with the current pointer sample and drain [`DragEvent`]s afterwards.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_drag::{
//!     Capabilities, DragCursor, DragElement, DragSession, DropOutcome, DropScene,
//! };
//! use understory_gesture::PointerSnapshot;
//!
//! struct Bin {
//!     bounds: Rect,
//!     received: Vec<&'static str>,
//! }
//!
//! impl DragElement<usize, &'static str> for Bin {
//!     fn on_drop(&mut self, cursor: &DragCursor<usize, &'static str>) {
//!         self.received.extend(cursor.data().copied());
//!     }
//! }
//!
//! struct Desk {
//!     bins: Vec<Bin>,
//! }
//!
//! impl DropScene for Desk {
//!     type Node = usize;
//!     type Payload = &'static str;
//!
//!     fn top_hit(&self, point: Point) -> Option<usize> {
//!         self.bins.iter().position(|bin| bin.bounds.contains(point))
//!     }
//!     fn parent_of(&self, _: usize) -> Option<usize> {
//!         None
//!     }
//!     fn children_of(&self, _: usize) -> &[usize] {
//!         &[]
//!     }
//!     fn capabilities(&self, node: usize) -> Capabilities {
//!         if node == 1 { Capabilities::DROP } else { Capabilities::empty() }
//!     }
//!     fn element_mut(
//!         &mut self,
//!         node: usize,
//!     ) -> Option<&mut dyn DragElement<usize, &'static str>> {
//!         self.bins
//!             .get_mut(node)
//!             .map(|bin| bin as &mut dyn DragElement<usize, &'static str>)
//!     }
//! }
//!
//! let mut desk = Desk {
//!     bins: vec![
//!         Bin { bounds: Rect::new(0.0, 0.0, 50.0, 50.0), received: vec![] },
//!         Bin { bounds: Rect::new(100.0, 0.0, 150.0, 50.0), received: vec![] },
//!     ],
//! };
//! let mut session = DragSession::default();
//! let frame = Duration::from_millis(16);
//!
//! // Pick up from bin 0 and carry the cursor 100px to the right.
//! let grab = Point::new(25.0, 25.0);
//! session.start(&mut desk, &PointerSnapshot::held(grab), 0, grab, "letter");
//! session.tick(frame, &mut desk, &PointerSnapshot::held(Point::new(125.0, 25.0)));
//!
//! let outcome = session.tick(frame, &mut desk, &PointerSnapshot::released(Point::new(125.0, 25.0)));
//! assert_eq!(outcome, Some(DropOutcome::Accepted(1)));
//! assert_eq!(desk.bins[1].received, ["letter"]);
//! ```

mod cursor;
mod error;
mod scene;
mod session;
mod targeting;

pub use cursor::DragCursor;
pub use error::DragError;
pub use scene::{Capabilities, DragElement, DropScene, nearest_with, resolve_hit, subtree_with};
pub use session::{DragConfig, DragEvent, DragSession, DropOutcome, SessionState};
pub use targeting::{DropTargeting, Retarget};
