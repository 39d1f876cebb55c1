// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual state requests emitted for the rendering layer.

/// The visual state an interactable should display.
///
/// The classifier emits this as a side channel; it has no influence on
/// gesture decisions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Neither hovered nor held.
    #[default]
    Normal,
    /// Hovered but not held.
    Highlighted,
    /// Held.
    Pressed,
}

impl VisualState {
    /// Resolve the state from the pointer flags. Held wins over hovered.
    pub const fn resolve(pointer_active: bool, pointer_inside: bool) -> Self {
        if pointer_active {
            Self::Pressed
        } else if pointer_inside {
            Self::Highlighted
        } else {
            Self::Normal
        }
    }
}
