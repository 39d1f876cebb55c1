// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input provider consumed by gesture and drag state machines.

use kurbo::Point;

/// The kind of device that produced a pointer-down.
///
/// Pointing devices (mouse, pen) and touch follow slightly different
/// long-press and tooltip rules in the classifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or pen.
    #[default]
    Mouse,
    /// Finger on a touch surface.
    Touch,
}

/// Read-only view of the pointer device, sampled once per tick.
///
/// This is passed explicitly to every call that needs it; there is no
/// process-wide input registry.
pub trait PointerInput {
    /// Current pointer position in screen space.
    fn position(&self) -> Point;

    /// Returns `true` while the interaction input (primary button, touch
    /// contact) is held down.
    fn is_held(&self) -> bool;
}

/// A captured pointer state, convenient for hosts that poll their input
/// backend once per frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Screen-space pointer position.
    pub position: Point,
    /// Whether the interaction input is held.
    pub held: bool,
}

impl PointerSnapshot {
    /// A held pointer at `position`.
    pub const fn held(position: Point) -> Self {
        Self {
            position,
            held: true,
        }
    }

    /// A released pointer at `position`.
    pub const fn released(position: Point) -> Self {
        Self {
            position,
            held: false,
        }
    }
}

impl PointerInput for PointerSnapshot {
    fn position(&self) -> Point {
        self.position
    }

    fn is_held(&self) -> bool {
        self.held
    }
}

impl<P: PointerInput + ?Sized> PointerInput for &P {
    fn position(&self) -> Point {
        (**self).position()
    }

    fn is_held(&self) -> bool {
        (**self).is_held()
    }
}
