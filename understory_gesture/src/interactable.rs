// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactable configuration and drag rules.

use core::fmt;

/// A predicate consulted before a detected drag may start.
pub type DragRule = Box<dyn Fn(&Interactable) -> bool>;

/// Handle returned by [`Interactable::add_drag_rule`], used for removal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DragRuleId(u64);

/// An element that can receive pointer gestures.
///
/// The flags are plain data and may be changed at any time; they are read on
/// every classifier tick. Drag rules are only evaluated once a drag has been
/// decided, and the drag starts only if every rule passes.
pub struct Interactable {
    /// A short tap produces a click.
    pub clickable: bool,
    /// Movement or a long press may produce a drag.
    pub draggable: bool,
    /// Horizontal movement counts towards the drag threshold.
    pub drag_horizontal: bool,
    /// Vertical movement counts towards the drag threshold.
    pub drag_vertical: bool,
    /// The element has a tooltip (hover for mouse, long press for touch).
    pub has_tooltip: bool,
    rules: Vec<(DragRuleId, DragRule)>,
    next_rule: u64,
}

impl Default for Interactable {
    fn default() -> Self {
        Self {
            clickable: true,
            draggable: false,
            drag_horizontal: false,
            drag_vertical: false,
            has_tooltip: false,
            rules: Vec::new(),
            next_rule: 0,
        }
    }
}

impl fmt::Debug for Interactable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactable")
            .field("clickable", &self.clickable)
            .field("draggable", &self.draggable)
            .field("drag_horizontal", &self.drag_horizontal)
            .field("drag_vertical", &self.drag_vertical)
            .field("has_tooltip", &self.has_tooltip)
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

impl Interactable {
    /// A clickable, non-draggable interactable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a short tap produces a click.
    #[must_use]
    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// Make the interactable draggable along the given axes.
    ///
    /// With neither axis enabled the element can still be dragged by a long press.
    #[must_use]
    pub fn with_drag_axes(mut self, horizontal: bool, vertical: bool) -> Self {
        self.draggable = true;
        self.drag_horizontal = horizontal;
        self.drag_vertical = vertical;
        self
    }

    /// Set whether the element has a tooltip.
    #[must_use]
    pub fn with_tooltip(mut self, has_tooltip: bool) -> Self {
        self.has_tooltip = has_tooltip;
        self
    }

    /// Register a drag rule. Rules run in registration order.
    pub fn add_drag_rule(&mut self, rule: impl Fn(&Self) -> bool + 'static) -> DragRuleId {
        let id = DragRuleId(self.next_rule);
        self.next_rule += 1;
        self.rules.push((id, Box::new(rule)));
        id
    }

    /// Remove a previously registered rule. Returns `false` if it was already gone.
    pub fn remove_drag_rule(&mut self, id: DragRuleId) -> bool {
        let before = self.rules.len();
        self.rules.retain(|(rule_id, _)| *rule_id != id);
        self.rules.len() != before
    }

    /// Number of registered drag rules.
    pub fn drag_rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every drag rule against this interactable.
    ///
    /// Returns `true` when all rules pass (vacuously with no rules).
    pub fn allows_drag(&self) -> bool {
        self.rules.iter().all(|(_, rule)| rule(self))
    }
}
