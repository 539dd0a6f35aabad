// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Velocity projection used to decide where a released drag would come to rest.

/// Per-millisecond velocity decay used when projecting a release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecelerationRate(f64);

impl DecelerationRate {
    /// Rate used by ordinary scroll views.
    pub const NORMAL: Self = Self(0.998);
    /// Faster decay; gives flicks a short, decisive throw.
    pub const FAST: Self = Self(0.99);

    /// Creates a rate. Values outside `(0, 1)` make [`project`] a no-op.
    #[must_use]
    pub const fn new(rate: f64) -> Self {
        Self(rate)
    }

    /// Returns the raw per-millisecond rate.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    pub(crate) fn is_valid(self) -> bool {
        self.0 > 0.0 && self.0 < 1.0
    }
}

impl Default for DecelerationRate {
    fn default() -> Self {
        Self::FAST
    }
}

/// Projects `value` forward by the distance `velocity` (units per second)
/// travels while decaying at `rate` until it stops.
#[must_use]
pub fn project(value: f64, velocity: f64, rate: DecelerationRate) -> f64 {
    if !rate.is_valid() || !velocity.is_finite() {
        return value;
    }
    let rate = rate.value();
    value + (velocity / 1000.0) * rate / (1.0 - rate)
}

#[cfg(test)]
mod tests {
    use super::{DecelerationRate, project};

    #[test]
    fn zero_velocity_stays_put() {
        assert_eq!(project(320.0, 0.0, DecelerationRate::FAST), 320.0);
    }

    #[test]
    fn fast_rate_throws_a_tenth_of_the_velocity() {
        let projected = project(100.0, 1_000.0, DecelerationRate::FAST);
        assert!((projected - 199.0).abs() < 1e-9);
        let projected = project(100.0, -1_000.0, DecelerationRate::FAST);
        assert!((projected - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normal_rate_throws_further() {
        let fast = project(0.0, 500.0, DecelerationRate::FAST);
        let normal = project(0.0, 500.0, DecelerationRate::NORMAL);
        assert!(normal > fast);
    }

    #[test]
    fn invalid_rate_or_velocity_is_ignored() {
        assert_eq!(project(10.0, 500.0, DecelerationRate::new(1.0)), 10.0);
        assert_eq!(project(10.0, f64::INFINITY, DecelerationRate::FAST), 10.0);
    }
}
