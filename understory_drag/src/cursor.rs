// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cursor surrogate that follows the pointer during a drag.

use core::any::Any;

use kurbo::Point;

/// Visible stand-in for the dragged item.
///
/// Handlers receive the cursor to inspect where the drag is, where it came from,
/// and what it carries.
#[derive(Clone, Debug, PartialEq)]
pub struct DragCursor<N, T> {
    position: Point,
    source: Option<N>,
    data: Option<T>,
}

impl<N, T> Default for DragCursor<N, T> {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            source: None,
            data: None,
        }
    }
}

impl<N: Copy, T> DragCursor<N, T> {
    /// Current screen position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The element the drag started from.
    pub fn source(&self) -> Option<N> {
        self.source
    }

    /// The dragged payload.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Move the cursor. Non-finite positions are rejected and leave it in place.
    pub fn set_position(&mut self, position: Point) -> bool {
        if !position.is_finite() {
            log::warn!("rejecting non-finite drag cursor position {position:?}");
            return false;
        }
        self.position = position;
        true
    }

    pub(crate) fn load(&mut self, source: N, data: T) {
        self.source = Some(source);
        self.data = Some(data);
    }

    pub(crate) fn unload(&mut self) -> Option<T> {
        self.source = None;
        self.data.take()
    }
}

impl<N> DragCursor<N, Box<dyn Any>> {
    /// Returns `true` if the dynamically typed payload is a `U`.
    pub fn is<U: Any>(&self) -> bool {
        self.data.as_ref().is_some_and(|data| data.is::<U>())
    }

    /// The dynamically typed payload as a `U`, if it is one.
    pub fn data_as<U: Any>(&self) -> Option<&U> {
        self.data.as_ref()?.downcast_ref::<U>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut cursor = DragCursor::<u32, ()>::default();
        assert!(cursor.set_position(Point::new(4.0, 5.0)));
        assert!(!cursor.set_position(Point::new(f64::NAN, 1.0)));
        assert!(!cursor.set_position(Point::new(1.0, f64::INFINITY)));
        assert_eq!(cursor.position(), Point::new(4.0, 5.0));
    }

    #[test]
    fn dynamic_payload_queries() {
        let mut cursor = DragCursor::<u32, Box<dyn Any>>::default();
        assert!(!cursor.is::<i32>());
        cursor.load(7, Box::new(42_i32));
        assert!(cursor.is::<i32>());
        assert!(!cursor.is::<u8>());
        assert_eq!(cursor.data_as::<i32>(), Some(&42));
        assert_eq!(cursor.data_as::<&str>(), None);
        assert_eq!(cursor.source(), Some(7));
    }

    #[test]
    fn unload_takes_the_payload() {
        let mut cursor = DragCursor::<u32, &str>::default();
        cursor.load(1, "card");
        assert_eq!(cursor.unload(), Some("card"));
        assert_eq!(cursor.source(), None);
        assert_eq!(cursor.data(), None);
    }
}
