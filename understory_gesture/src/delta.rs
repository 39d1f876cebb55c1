// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer displacement tracking from an anchor position.
//!
//! ## Usage
//!
//! 1) Anchor the tracker with [`DeltaTracker::start`] at pointer-down (or drag start).
//! 2) Call [`DeltaTracker::total_offset`] with each new sample for the displacement
//!    from the anchor.
//! 3) Call [`DeltaTracker::end`] when the interaction is over.
//!
//! The gesture classifier uses the total offset for its distance thresholds, and
//! drag sessions use it to move the cursor surrogate relative to where the drag began.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::DeltaTracker;
//!
//! let mut tracker = DeltaTracker::default();
//! tracker.start(Point::new(10.0, 20.0));
//! assert!(tracker.is_tracking());
//! assert_eq!(tracker.total_offset(Point::new(18.0, 25.0)), Some(Vec2::new(8.0, 5.0)));
//!
//! tracker.end();
//! assert_eq!(tracker.total_offset(Point::new(18.0, 25.0)), None);
//! ```

use kurbo::{Point, Vec2};

/// Tracks the anchor of a pointer interaction.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DeltaTracker {
    anchor: Option<Point>,
}

impl DeltaTracker {
    /// Anchor a new interaction at `pos`, discarding any previous one.
    pub fn start(&mut self, pos: Point) {
        self.anchor = Some(pos);
    }

    /// Displacement of `current` from the anchor.
    ///
    /// Returns `None` when no interaction is anchored.
    pub fn total_offset(&self, current: Point) -> Option<Vec2> {
        self.anchor.map(|anchor| current - anchor)
    }

    /// The anchor position, if tracking.
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    /// Stop tracking.
    pub fn end(&mut self) {
        self.anchor = None;
    }

    /// Returns `true` while an interaction is anchored.
    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }
}
