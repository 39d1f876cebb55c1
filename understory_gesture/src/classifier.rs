// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classifier: decide tap, long-press, or drag for one pointer interaction.
//!
//! ## Usage
//!
//! 1) Forward pointer enter/exit/down/up notifications for the element.
//! 2) Call [`GestureClassifier::tick`] once per frame with the frame delta and the
//!    pointer input provider. While a gesture is in flight the classifier samples
//!    elapsed time and displacement each tick.
//! 3) When `tick` returns a [`GestureOutcome`], the gesture is over. A
//!    [`GestureOutcome::DragStart`] is the hand-off point to a drag session.
//! 4) Drain [`GestureEvent`]s for tooltip and visual-state side effects.
//!
//! ## Decision rules
//!
//! Evaluated each tick while held; the first match ends the gesture as a drag:
//!
//! 1. draggable, both axes, squared displacement ≥ threshold²
//! 2. draggable, horizontal, |dx| ≥ threshold
//! 3. draggable, vertical, |dy| ≥ threshold
//! 4. mouse: draggable and elapsed ≥ long press
//! 5. touch: tooltip-eligible and elapsed ≥ long press shows the tooltip (not a decision)
//! 6. touch: not tooltip-eligible, draggable, and elapsed ≥ long press
//!
//! On release without a drag, a clickable element that was held for less than the
//! tap ceiling produces a click, unless a touch long press showed its tooltip.
//! A decided drag starts only if every drag rule of the [`Interactable`] passes.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureClassifier, GestureConfig, GestureOutcome, Interactable, PointerKind,
//!     PointerSnapshot,
//! };
//!
//! let item = Interactable::new().with_drag_axes(true, true);
//! let mut gesture = GestureClassifier::new(GestureConfig::default(), item);
//! let frame = Duration::from_millis(16);
//!
//! gesture.on_pointer_down(PointerKind::Mouse, &PointerSnapshot::held(Point::ZERO));
//! assert_eq!(gesture.tick(frame, &PointerSnapshot::held(Point::new(5.0, 0.0))), None);
//!
//! // 30px of travel crosses the default 20px threshold.
//! let outcome = gesture.tick(frame, &PointerSnapshot::held(Point::new(30.0, 0.0)));
//! assert_eq!(outcome, Some(GestureOutcome::DragStart { origin: Point::new(30.0, 0.0) }));
//! ```

use core::time::Duration;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::delta::DeltaTracker;
use crate::input::{PointerInput, PointerKind};
use crate::interactable::Interactable;
use crate::visual::VisualState;

/// Thresholds used to classify gestures.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Minimum travel, in screen units, before movement becomes a drag (default: 20).
    pub drag_distance: f64,
    /// A release before this duration may be a tap (default: 200ms).
    pub tap_duration: Duration,
    /// Holding for this long is a long press (default: 400ms).
    pub long_press: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_distance: 20.0,
            tap_duration: Duration::from_millis(200),
            long_press: Duration::from_millis(400),
        }
    }
}

impl GestureConfig {
    /// Set the drag distance threshold.
    #[must_use]
    pub fn with_drag_distance(mut self, distance: f64) -> Self {
        self.drag_distance = distance;
        self
    }

    /// Set the tap duration ceiling.
    #[must_use]
    pub fn with_tap_duration(mut self, duration: Duration) -> Self {
        self.tap_duration = duration;
        self
    }

    /// Set the long-press duration.
    #[must_use]
    pub fn with_long_press(mut self, duration: Duration) -> Self {
        self.long_press = duration;
        self
    }

    /// The drag threshold squared, compared against squared displacement.
    pub fn drag_distance_squared(&self) -> f64 {
        self.drag_distance * self.drag_distance
    }
}

/// How a completed gesture ended. Exactly one per gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// A short tap on a clickable element.
    Click,
    /// A drag was decided and every drag rule passed.
    DragStart {
        /// Last sampled pointer position; the drag's origin.
        origin: Point,
    },
    /// Neither a click nor a permitted drag.
    Cancelled,
}

/// Notifications emitted by the classifier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// The tooltip should be shown.
    TooltipShown,
    /// The tooltip should be hidden.
    TooltipHidden,
    /// The element was clicked.
    Click,
    /// A drag should start at the given screen position.
    DragStart(Point),
    /// The element should display a new visual state.
    Visual(VisualState),
}

/// Per-gesture record, alive from pointer-down until the gesture resolves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSession {
    kind: PointerKind,
    elapsed: Duration,
    position: Point,
    tracker: DeltaTracker,
    tooltip_shown: bool,
}

impl PointerSession {
    fn new(kind: PointerKind, start: Point) -> Self {
        let mut tracker = DeltaTracker::default();
        tracker.start(start);
        Self {
            kind,
            elapsed: Duration::ZERO,
            position: start,
            tracker,
            tooltip_shown: false,
        }
    }

    /// Device that started the gesture.
    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    /// Pointer position at pointer-down.
    pub fn start(&self) -> Point {
        self.tracker.anchor().unwrap_or(self.position)
    }

    /// Time the interaction has been held, accumulated from ticks.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Last sampled pointer position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Displacement of the last sample from the start position.
    pub fn offset(&self) -> Vec2 {
        self.tracker.total_offset(self.position).unwrap_or(Vec2::ZERO)
    }

    fn sample(&mut self, position: Point) {
        self.position = position;
    }
}

/// Gesture state machine for a single [`Interactable`].
#[derive(Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    interactable: Interactable,
    session: Option<PointerSession>,
    pointer_inside: bool,
    pointer_active: bool,
    showing_tooltip: bool,
    visual: Option<VisualState>,
    events: SmallVec<[GestureEvent; 4]>,
}

impl GestureClassifier {
    /// Create a classifier for `interactable`.
    pub fn new(config: GestureConfig, interactable: Interactable) -> Self {
        Self {
            config,
            interactable,
            session: None,
            pointer_inside: false,
            pointer_active: false,
            showing_tooltip: false,
            visual: None,
            events: SmallVec::new(),
        }
    }

    /// Classification thresholds.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the thresholds. An in-flight gesture uses them from the next tick.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// The interactable being classified.
    pub fn interactable(&self) -> &Interactable {
        &self.interactable
    }

    /// Mutable access to flags and drag rules.
    pub fn interactable_mut(&mut self) -> &mut Interactable {
        &mut self.interactable
    }

    /// The in-flight gesture, if any.
    pub fn session(&self) -> Option<&PointerSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a gesture is being classified.
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` while the tooltip is shown.
    pub fn is_showing_tooltip(&self) -> bool {
        self.showing_tooltip
    }

    /// The last visual state requested, or `None` before activation.
    pub fn visual_state(&self) -> Option<VisualState> {
        self.visual
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> SmallVec<[GestureEvent; 4]> {
        core::mem::take(&mut self.events)
    }

    /// The owning element became active. Always requests [`VisualState::Normal`].
    pub fn on_activate(&mut self) {
        self.visual = Some(VisualState::Normal);
        self.events.push(GestureEvent::Visual(VisualState::Normal));
    }

    /// The owning element was disabled.
    ///
    /// Hides a shown tooltip, clears hover/press flags, and abandons an in-flight
    /// gesture without producing an outcome.
    pub fn on_deactivate(&mut self) {
        self.hide_tooltip();
        if self.session.take().is_some() {
            log::debug!("gesture abandoned by deactivation");
        }
        self.pointer_inside = false;
        self.pointer_active = false;
        self.visual = None;
    }

    /// The pointer entered the element.
    pub fn on_pointer_enter(&mut self, kind: PointerKind) {
        if kind == PointerKind::Mouse && self.interactable.has_tooltip {
            self.show_tooltip();
        }
        self.pointer_inside = true;
        self.update_visual();
    }

    /// The pointer left the element. Hover state clears for every pointer kind.
    pub fn on_pointer_exit(&mut self) {
        self.hide_tooltip();
        self.pointer_inside = false;
        self.update_visual();
    }

    /// The pointer was pressed on the element; starts classifying a gesture.
    ///
    /// A gesture still in flight is abandoned without an outcome.
    pub fn on_pointer_down(&mut self, kind: PointerKind, input: &impl PointerInput) {
        if self.session.is_some() {
            log::debug!("pointer-down while a gesture was in flight; restarting");
        }
        self.session = Some(PointerSession::new(kind, input.position()));
        self.pointer_active = true;
        self.update_visual();
    }

    /// The pointer was released over the element.
    ///
    /// This only affects the visual state; the gesture itself finishes on the next
    /// [`tick`](Self::tick) that observes the released input.
    pub fn on_pointer_up(&mut self) {
        self.pointer_active = false;
        self.update_visual();
    }

    /// Advance the in-flight gesture by one frame.
    ///
    /// Returns the outcome once the gesture resolves, `None` otherwise.
    pub fn tick(&mut self, dt: Duration, input: &impl PointerInput) -> Option<GestureOutcome> {
        let mut session = self.session.take()?;
        if !input.is_held() {
            return Some(self.finish(session, false));
        }
        session.elapsed += dt;
        session.sample(input.position());
        if self.decide_drag(&mut session) {
            return Some(self.finish(session, true));
        }
        self.session = Some(session);
        None
    }

    fn decide_drag(&mut self, session: &mut PointerSession) -> bool {
        let Interactable {
            draggable,
            drag_horizontal,
            drag_vertical,
            has_tooltip,
            ..
        } = self.interactable;
        let threshold = self.config.drag_distance;
        let delta = session.offset();

        if draggable
            && drag_horizontal
            && drag_vertical
            && delta.hypot2() >= self.config.drag_distance_squared()
        {
            return true;
        }
        if draggable && drag_horizontal && delta.x.abs() >= threshold {
            return true;
        }
        if draggable && drag_vertical && delta.y.abs() >= threshold {
            return true;
        }

        let long_press = session.elapsed >= self.config.long_press;
        match session.kind {
            PointerKind::Mouse => draggable && long_press,
            PointerKind::Touch => {
                if has_tooltip && !self.showing_tooltip && long_press {
                    self.show_tooltip();
                    session.tooltip_shown = true;
                }
                !has_tooltip && draggable && long_press
            }
        }
    }

    fn finish(&mut self, session: PointerSession, drag: bool) -> GestureOutcome {
        if session.kind == PointerKind::Touch {
            self.hide_tooltip();
        }
        let suppressed_by_tooltip = session.kind == PointerKind::Touch && session.tooltip_shown;

        let outcome = if !drag
            && self.interactable.clickable
            && session.elapsed < self.config.tap_duration
            && !suppressed_by_tooltip
        {
            self.events.push(GestureEvent::Click);
            GestureOutcome::Click
        } else if drag && self.interactable.allows_drag() {
            self.events.push(GestureEvent::DragStart(session.position));
            GestureOutcome::DragStart {
                origin: session.position,
            }
        } else {
            GestureOutcome::Cancelled
        };
        log::trace!(
            "gesture finished after {:?} ({:?}): {outcome:?}",
            session.elapsed,
            session.kind
        );
        outcome
    }

    fn show_tooltip(&mut self) {
        if self.showing_tooltip {
            return;
        }
        self.showing_tooltip = true;
        self.events.push(GestureEvent::TooltipShown);
    }

    fn hide_tooltip(&mut self) {
        if !self.showing_tooltip {
            return;
        }
        self.showing_tooltip = false;
        self.events.push(GestureEvent::TooltipHidden);
    }

    fn update_visual(&mut self) {
        let state = VisualState::resolve(self.pointer_active, self.pointer_inside);
        if self.visual != Some(state) {
            self.visual = Some(state);
            self.events.push(GestureEvent::Visual(state));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerSnapshot;

    const FRAME: Duration = Duration::from_millis(50);

    fn held(x: f64, y: f64) -> PointerSnapshot {
        PointerSnapshot::held(Point::new(x, y))
    }

    fn released() -> PointerSnapshot {
        PointerSnapshot::released(Point::ZERO)
    }

    fn classifier(interactable: Interactable) -> GestureClassifier {
        GestureClassifier::new(GestureConfig::default(), interactable)
    }

    /// Press at the origin, hold still for `frames` ticks, then release.
    fn hold_still(g: &mut GestureClassifier, kind: PointerKind, frames: usize) -> GestureOutcome {
        g.on_pointer_down(kind, &held(0.0, 0.0));
        for _ in 0..frames {
            if let Some(outcome) = g.tick(FRAME, &held(0.0, 0.0)) {
                return outcome;
            }
        }
        g.tick(FRAME, &released()).expect("release resolves the gesture")
    }

    #[test]
    fn quick_tap_clicks() {
        let mut g = classifier(Interactable::new());
        assert_eq!(hold_still(&mut g, PointerKind::Mouse, 2), GestureOutcome::Click);
        assert!(g.drain_events().contains(&GestureEvent::Click));
        assert!(!g.is_tracking());
    }

    #[test]
    fn slow_release_is_not_a_tap() {
        let mut g = classifier(Interactable::new());
        // 4 frames * 50ms = 200ms, which is not below the tap ceiling.
        assert_eq!(
            hold_still(&mut g, PointerKind::Mouse, 4),
            GestureOutcome::Cancelled
        );
    }

    #[test]
    fn non_clickable_never_clicks() {
        let mut g = classifier(Interactable::new().with_clickable(false));
        assert_eq!(
            hold_still(&mut g, PointerKind::Mouse, 1),
            GestureOutcome::Cancelled
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut g = classifier(Interactable::new().with_drag_axes(true, true));
        g.on_pointer_down(PointerKind::Mouse, &held(0.0, 0.0));
        assert_eq!(g.tick(FRAME, &held(19.999, 0.0)), None, "below threshold");
        assert_eq!(
            g.tick(FRAME, &held(12.0, 16.0)),
            Some(GestureOutcome::DragStart {
                origin: Point::new(12.0, 16.0)
            }),
            "exactly 20 units away must start a drag"
        );
    }

    #[test]
    fn axis_constraints() {
        let mut horizontal = classifier(Interactable::new().with_drag_axes(true, false));
        horizontal.on_pointer_down(PointerKind::Mouse, &held(0.0, 0.0));
        assert_eq!(horizontal.tick(FRAME, &held(0.0, 50.0)), None);
        assert!(matches!(
            horizontal.tick(FRAME, &held(-20.0, 50.0)),
            Some(GestureOutcome::DragStart { .. })
        ));

        let mut vertical = classifier(Interactable::new().with_drag_axes(false, true));
        vertical.on_pointer_down(PointerKind::Touch, &held(0.0, 0.0));
        assert_eq!(vertical.tick(FRAME, &held(50.0, 0.0)), None);
        assert!(matches!(
            vertical.tick(FRAME, &held(50.0, 20.0)),
            Some(GestureOutcome::DragStart { .. })
        ));
    }

    #[test]
    fn not_draggable_never_drags() {
        let mut g = classifier(Interactable::new());
        g.interactable_mut().drag_horizontal = true;
        g.interactable_mut().drag_vertical = true;
        g.on_pointer_down(PointerKind::Mouse, &held(0.0, 0.0));
        for i in 0..40 {
            let x = f64::from(i) * 10.0;
            assert_eq!(g.tick(FRAME, &held(x, x)), None);
        }
        assert_eq!(g.tick(FRAME, &released()), Some(GestureOutcome::Cancelled));
    }

    #[test]
    fn mouse_long_press_drags_in_place() {
        let mut g = classifier(Interactable::new().with_drag_axes(false, false));
        let outcome = hold_still(&mut g, PointerKind::Mouse, 20);
        assert_eq!(
            outcome,
            GestureOutcome::DragStart {
                origin: Point::ZERO
            }
        );
    }

    #[test]
    fn touch_long_press_with_tooltip_shows_it_instead_of_dragging() {
        let mut g = classifier(
            Interactable::new()
                .with_drag_axes(true, true)
                .with_tooltip(true),
        );
        g.on_pointer_down(PointerKind::Touch, &held(0.0, 0.0));
        for _ in 0..10 {
            assert_eq!(g.tick(FRAME, &held(0.0, 0.0)), None);
        }
        assert!(g.is_showing_tooltip());
        assert_eq!(g.tick(FRAME, &released()), Some(GestureOutcome::Cancelled));
        assert!(!g.is_showing_tooltip(), "tooltip hidden when the loop exits");

        let events = g.drain_events();
        let shown = events.iter().filter(|e| **e == GestureEvent::TooltipShown);
        let hidden = events.iter().filter(|e| **e == GestureEvent::TooltipHidden);
        assert_eq!(shown.count(), 1);
        assert_eq!(hidden.count(), 1);
    }

    #[test]
    fn touch_tooltip_suppresses_tap() {
        let config = GestureConfig {
            tap_duration: Duration::from_secs(1),
            long_press: Duration::from_millis(100),
            ..GestureConfig::default()
        };
        let mut g = GestureClassifier::new(config, Interactable::new().with_tooltip(true));
        assert_eq!(
            hold_still(&mut g, PointerKind::Touch, 3),
            GestureOutcome::Cancelled,
            "a shown tooltip turns a short release into a no-op"
        );

        let mut mouse = GestureClassifier::new(config, Interactable::new().with_tooltip(true));
        assert_eq!(hold_still(&mut mouse, PointerKind::Mouse, 3), GestureOutcome::Click);
    }

    #[test]
    fn touch_tooltip_then_movement_still_drags() {
        let mut g = classifier(
            Interactable::new()
                .with_drag_axes(true, true)
                .with_tooltip(true),
        );
        g.on_pointer_down(PointerKind::Touch, &held(0.0, 0.0));
        for _ in 0..9 {
            g.tick(FRAME, &held(0.0, 0.0));
        }
        assert!(g.is_showing_tooltip());
        assert!(matches!(
            g.tick(FRAME, &held(0.0, 25.0)),
            Some(GestureOutcome::DragStart { .. })
        ));
        assert!(!g.is_showing_tooltip());
    }

    #[test]
    fn touch_long_press_without_tooltip_drags() {
        let mut g = classifier(Interactable::new().with_drag_axes(true, true));
        assert!(matches!(
            hold_still(&mut g, PointerKind::Touch, 20),
            GestureOutcome::DragStart { .. }
        ));
    }

    #[test]
    fn drag_rules_veto_the_drag() {
        let mut g = classifier(Interactable::new().with_drag_axes(true, true));
        g.interactable_mut().add_drag_rule(|_| false);
        g.on_pointer_down(PointerKind::Mouse, &held(0.0, 0.0));
        assert_eq!(
            g.tick(FRAME, &held(30.0, 0.0)),
            Some(GestureOutcome::Cancelled)
        );
        assert!(
            !g.drain_events()
                .iter()
                .any(|e| matches!(e, GestureEvent::DragStart(_)))
        );
    }

    #[test]
    fn exit_clears_hover_without_a_tooltip() {
        let mut g = classifier(Interactable::new());
        g.on_activate();
        g.on_pointer_enter(PointerKind::Touch);
        assert_eq!(g.visual_state(), Some(VisualState::Highlighted));
        g.on_pointer_exit();
        assert_eq!(g.visual_state(), Some(VisualState::Normal));
        assert!(
            !g.drain_events().contains(&GestureEvent::TooltipHidden),
            "nothing was shown, so nothing is hidden"
        );
    }

    #[test]
    fn mouse_hover_toggles_tooltip_and_highlight() {
        let mut g = classifier(Interactable::new().with_tooltip(true));
        g.on_activate();
        g.on_pointer_enter(PointerKind::Mouse);
        g.on_pointer_exit();
        assert_eq!(
            g.drain_events().as_slice(),
            &[
                GestureEvent::Visual(VisualState::Normal),
                GestureEvent::TooltipShown,
                GestureEvent::Visual(VisualState::Highlighted),
                GestureEvent::TooltipHidden,
                GestureEvent::Visual(VisualState::Normal),
            ]
        );
    }

    #[test]
    fn touch_enter_does_not_show_tooltip() {
        let mut g = classifier(Interactable::new().with_tooltip(true));
        g.on_pointer_enter(PointerKind::Touch);
        assert!(!g.is_showing_tooltip());
    }

    #[test]
    fn press_cycle_visual_states() {
        let mut g = classifier(Interactable::new());
        g.on_activate();
        g.on_pointer_enter(PointerKind::Mouse);
        g.on_pointer_down(PointerKind::Mouse, &held(0.0, 0.0));
        g.on_pointer_up();
        let visuals: Vec<VisualState> = g
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GestureEvent::Visual(v) => Some(v),
                _ => None,
            })
            .collect();
        assert_eq!(
            visuals,
            [
                VisualState::Normal,
                VisualState::Highlighted,
                VisualState::Pressed,
                VisualState::Highlighted,
            ]
        );
    }

    #[test]
    fn deactivation_mid_gesture_is_silent() {
        let mut g = classifier(
            Interactable::new()
                .with_drag_axes(true, true)
                .with_tooltip(true),
        );
        g.on_pointer_down(PointerKind::Touch, &held(0.0, 0.0));
        for _ in 0..9 {
            g.tick(FRAME, &held(0.0, 0.0));
        }
        assert!(g.is_showing_tooltip());
        g.drain_events();

        g.on_deactivate();
        assert!(!g.is_tracking());
        assert!(!g.is_showing_tooltip());
        assert_eq!(g.tick(FRAME, &released()), None, "no outcome after deactivation");
        assert_eq!(g.drain_events().as_slice(), &[GestureEvent::TooltipHidden]);
    }
}
