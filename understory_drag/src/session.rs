// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: one drag from hand-off to drop.
//!
//! ## Lifecycle
//!
//! `Idle → Active → (dropped | cancelled) → Idle`
//!
//! - [`DragSession::start`] begins a drag from a gesture's drag-start origin. A
//!   session that is still active is cancelled first.
//! - [`DragSession::tick`] runs once per frame: the cursor follows the pointer
//!   relative to where the drag began, and the drop target is re-resolved. When
//!   the interaction is released the session drops itself.
//! - [`DragSession::drop`] hands the payload to the tracked drop handler if it
//!   accepts it; [`DragSession::cancel`] ends the drag without a handler.
//!
//! Every started session emits exactly one [`DragEvent::Started`] and one
//! [`DragEvent::Ended`].

use core::time::Duration;

use kurbo::Point;
use smallvec::SmallVec;
use understory_gesture::{DeltaTracker, PointerInput};

use crate::cursor::DragCursor;
use crate::scene::{Capabilities, DropScene, subtree_with};
use crate::targeting::{DropTargeting, Retarget};

/// Session tuning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DragConfig {
    /// Minimum time between drop-target hit tests while dragging.
    ///
    /// `Duration::ZERO` (the default) re-resolves every tick. The target is
    /// always re-resolved on release, before dropping.
    pub retarget_interval: Duration,
}

impl DragConfig {
    /// Set the minimum time between drop-target hit tests.
    #[must_use]
    pub fn with_retarget_interval(mut self, interval: Duration) -> Self {
        self.retarget_interval = interval;
        self
    }
}

/// Whether a drag is in progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No drag.
    #[default]
    Idle,
    /// A drag is in progress.
    Active,
}

/// Notifications emitted by a session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragEvent<N> {
    /// A drag started at `origin`.
    Started {
        /// Screen position where the cursor was placed.
        origin: Point,
    },
    /// The cursor's payload changed; read it from [`DragSession::cursor`].
    DataUpdated,
    /// The drag was dropped, on `accepted` if a handler took it.
    Dropped {
        /// The drop handler that received the payload.
        accepted: Option<N>,
    },
    /// The drag is over.
    Ended,
}

/// How a drag ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome<N> {
    /// The drop handler accepted the payload.
    Accepted(N),
    /// Released with no accepting drop handler.
    Released,
    /// Torn down without dropping.
    Cancelled,
}

/// A single drag, driven by the host's frame tick.
#[derive(Debug)]
pub struct DragSession<N, T> {
    config: DragConfig,
    state: SessionState,
    cursor: DragCursor<N, T>,
    origin: Point,
    pointer: DeltaTracker,
    targeting: DropTargeting<N>,
    since_retarget: Duration,
    events: SmallVec<[DragEvent<N>; 4]>,
}

impl<N: Copy + Eq + core::fmt::Debug, T> Default for DragSession<N, T> {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl<N: Copy + Eq + core::fmt::Debug, T> DragSession<N, T> {
    /// An idle session.
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            cursor: DragCursor::default(),
            origin: Point::ZERO,
            pointer: DeltaTracker::default(),
            targeting: DropTargeting::new(),
            since_retarget: Duration::ZERO,
            events: SmallVec::new(),
        }
    }

    /// Session tuning.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// The cursor surrogate.
    pub fn cursor(&self) -> &DragCursor<N, T> {
        &self.cursor
    }

    /// Where the cursor was placed when the drag started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The drop targeting state.
    pub fn targeting(&self) -> &DropTargeting<N> {
        &self.targeting
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> SmallVec<[DragEvent<N>; 4]> {
        core::mem::take(&mut self.events)
    }

    /// Start dragging `data` from `source`, placing the cursor at `origin`.
    ///
    /// Drag-start observers in the source's subtree are notified; their failures
    /// are logged and do not stop the drag. Returns `false`, with no state
    /// change, if `origin` is not finite.
    ///
    /// The session is already active while observers run, so if one panics the
    /// unwound session can still be torn down with [`DragSession::cancel`].
    pub fn start<S>(
        &mut self,
        scene: &mut S,
        input: &impl PointerInput,
        source: N,
        origin: Point,
        data: T,
    ) -> bool
    where
        S: DropScene<Node = N, Payload = T> + ?Sized,
    {
        if !origin.is_finite() {
            log::warn!("rejecting drag start at non-finite origin {origin:?}");
            return false;
        }
        if self.is_active() {
            log::debug!("drag started while another was active; cancelling it");
            self.cancel(scene);
        }

        self.targeting.forget();
        self.cursor.load(source, data);
        self.pointer.start(input.position());
        self.origin = origin;
        self.cursor.set_position(origin);
        self.since_retarget = Duration::ZERO;
        self.events.push(DragEvent::DataUpdated);
        self.state = SessionState::Active;

        for observer in subtree_with(scene, source, Capabilities::DRAG_START) {
            let Some(element) = scene.element_mut(observer) else {
                continue;
            };
            if let Err(err) = element.on_drag_start(&self.cursor) {
                log::error!("drag-start observer {observer:?} failed: {err}");
            }
        }

        self.events.push(DragEvent::Started { origin });
        log::debug!("drag started from {source:?} at {origin:?}");
        true
    }

    /// Move the cursor to follow the pointer and re-resolve the drop target.
    ///
    /// Returns `None` when idle.
    pub fn update<S>(&mut self, scene: &mut S, input: &impl PointerInput) -> Option<Retarget<N>>
    where
        S: DropScene<Node = N, Payload = T> + ?Sized,
    {
        if !self.is_active() {
            return None;
        }
        self.follow(input);
        self.since_retarget = Duration::ZERO;
        Some(self.targeting.retarget(scene, &self.cursor))
    }

    /// Advance one frame. Drops automatically once the interaction is released.
    ///
    /// Returns the outcome on the tick the drag ends.
    pub fn tick<S>(
        &mut self,
        dt: Duration,
        scene: &mut S,
        input: &impl PointerInput,
    ) -> Option<DropOutcome<N>>
    where
        S: DropScene<Node = N, Payload = T> + ?Sized,
    {
        if !self.is_active() {
            return None;
        }
        if !input.is_held() {
            self.update(scene, input);
            return self.drop(scene);
        }
        self.since_retarget += dt;
        if self.since_retarget >= self.config.retarget_interval {
            self.update(scene, input);
        } else {
            self.follow(input);
        }
        None
    }

    /// Drop on the tracked drop handler, if it accepts the payload.
    ///
    /// Returns `None` when idle.
    pub fn drop<S>(&mut self, scene: &mut S) -> Option<DropOutcome<N>>
    where
        S: DropScene<Node = N, Payload = T> + ?Sized,
    {
        self.finish(scene, true)
    }

    /// End the drag without dropping. Returns `None` when idle.
    pub fn cancel<S>(&mut self, scene: &mut S) -> Option<DropOutcome<N>>
    where
        S: DropScene<Node = N, Payload = T> + ?Sized,
    {
        self.finish(scene, false)
    }

    /// The cursor surrogate was disabled; an active drag is cancelled.
    pub fn on_deactivate<S>(&mut self, scene: &mut S)
    where
        S: DropScene<Node = N, Payload = T> + ?Sized,
    {
        self.cancel(scene);
    }

    fn follow(&mut self, input: &impl PointerInput) {
        if let Some(offset) = self.pointer.total_offset(input.position()) {
            self.cursor.set_position(self.origin + offset);
        }
    }

    fn finish<S>(&mut self, scene: &mut S, allow_drop: bool) -> Option<DropOutcome<N>>
    where
        S: DropScene<Node = N, Payload = T> + ?Sized,
    {
        if !self.is_active() {
            return None;
        }

        if let Some(source) = self.cursor.source() {
            for observer in subtree_with(scene, source, Capabilities::DRAG_END) {
                let Some(element) = scene.element_mut(observer) else {
                    continue;
                };
                if let Err(err) = element.on_drag_end(&self.cursor) {
                    log::error!("drag-end observer {observer:?} failed: {err}");
                }
            }
        }

        let accepted = if allow_drop {
            self.targeting.drop_handler().filter(|&handler| {
                scene
                    .element_mut(handler)
                    .is_some_and(|element| element.allow_drop(&self.cursor))
            })
        } else {
            None
        };
        if let Some(handler) = accepted
            && let Some(element) = scene.element_mut(handler)
        {
            element.on_drop(&self.cursor);
        }

        self.targeting.clear(scene, &self.cursor);
        self.pointer.end();
        self.cursor.unload();
        self.state = SessionState::Idle;
        self.events.push(DragEvent::Dropped { accepted });
        self.events.push(DragEvent::Ended);

        let outcome = match accepted {
            Some(handler) => DropOutcome::Accepted(handler),
            None if allow_drop => DropOutcome::Released,
            None => DropOutcome::Cancelled,
        };
        log::debug!("drag ended: {outcome:?}");
        Some(outcome)
    }
}
