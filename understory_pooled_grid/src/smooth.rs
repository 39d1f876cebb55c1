// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Critically damped smoothing toward a moving target.

use kurbo::{Point, Vec2};

/// Move `current` toward `target` with a critically damped spring.
///
/// `smooth_time` is roughly the time to reach the target; `velocity` carries
/// state between calls. The result never overshoots the target. A non-positive
/// `dt` returns `current` unchanged.
pub fn smooth_damp(
    current: Point,
    target: Point,
    velocity: &mut Vec2,
    smooth_time: f64,
    dt: f64,
) -> Point {
    if dt.is_nan() || dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * decay;
    let output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec2::ZERO;
        return target;
    }
    output
}

/// A displayed position that eases toward its target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SmoothedPoint {
    position: Point,
    velocity: Vec2,
}

impl SmoothedPoint {
    /// Resting at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Current displayed position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current velocity, in units per second.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Snap to `target` and drop any motion.
    pub fn jump_to(&mut self, target: Point) {
        *self = Self::at(target);
    }

    /// Advance `dt` seconds toward `target`.
    pub fn step(&mut self, target: Point, smooth_time: f64, dt: f64) -> Point {
        self.position = smooth_damp(self.position, target, &mut self.velocity, smooth_time, dt);
        self.position
    }
}
