// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan tracking: turn raw pointer positions into [`PanSample`]s.
//!
//! Hosts with a native pan recognizer can build [`PanSample`]s directly. Hosts
//! that only see raw pointer events feed them through a [`PanTracker`].
//!
//! ## Usage
//!
//! 1) Call [`PanTracker::down`] when the pointer goes down on the sheet.
//! 2) Call [`PanTracker::moved`] for each move; the first one reports `Began`.
//! 3) Call [`PanTracker::up`] on release or [`PanTracker::cancel`] on abort.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_sheet::{PanPhase, PanTracker};
//!
//! let mut pan = PanTracker::default();
//! pan.down(Point::new(100.0, 500.0), Duration::ZERO);
//!
//! let began = pan.moved(Point::new(100.0, 480.0), Duration::from_millis(16)).unwrap();
//! assert_eq!(began.phase, PanPhase::Began);
//!
//! let changed = pan.moved(Point::new(100.0, 460.0), Duration::from_millis(32)).unwrap();
//! assert_eq!(changed.phase, PanPhase::Changed);
//! assert_eq!(changed.translation.y, -40.0);
//!
//! let ended = pan.up(Point::new(100.0, 440.0), Duration::from_millis(48)).unwrap();
//! assert_eq!(ended.phase, PanPhase::Ended);
//! assert!(ended.velocity.y < 0.0);
//! ```

use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::interaction::{PanPhase, PanSample};

const HISTORY: usize = 20;

/// Samples older than this relative to the newest one are ignored.
pub const VELOCITY_HORIZON: Duration = Duration::from_millis(100);

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED: Duration = Duration::from_millis(40);

/// Tracks one pointer from down to up and reports pan samples.
#[derive(Clone, Debug, Default)]
pub struct PanTracker {
    start_pos: Option<Point>,
    began: bool,
    history: [Option<(Duration, Point)>; HISTORY],
    index: usize,
}

impl PanTracker {
    /// Starts tracking a pointer at `pos`.
    pub fn down(&mut self, pos: Point, time: Duration) {
        *self = Self::default();
        self.start_pos = Some(pos);
        self.record(pos, time);
    }

    /// Records a move. Returns `Began` for the first move and `Changed` after.
    ///
    /// Returns `None` when no pointer is down.
    pub fn moved(&mut self, pos: Point, time: Duration) -> Option<PanSample> {
        let start = self.start_pos?;
        self.record(pos, time);
        let phase = if self.began {
            PanPhase::Changed
        } else {
            self.began = true;
            PanPhase::Began
        };
        Some(PanSample::new(phase, pos - start, self.velocity()))
    }

    /// Releases the pointer.
    ///
    /// Returns `None` if the pointer never moved, since no pan began.
    pub fn up(&mut self, pos: Point, time: Duration) -> Option<PanSample> {
        let start = self.start_pos?;
        let began = self.began;
        self.record(pos, time);
        let sample = PanSample::new(PanPhase::Ended, pos - start, self.velocity());
        self.end();
        began.then_some(sample)
    }

    /// Aborts the gesture.
    pub fn cancel(&mut self) -> Option<PanSample> {
        let start = self.start_pos?;
        let began = self.began;
        let translation = self.newest().map_or(Vec2::ZERO, |(_, pos)| pos - start);
        self.end();
        began.then_some(PanSample::new(PanPhase::Cancelled, translation, Vec2::ZERO))
    }

    /// Returns `true` while a pointer is down.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Estimated pointer velocity in points per second.
    ///
    /// Uses the samples within [`VELOCITY_HORIZON`] of the newest one, stopping
    /// at the first gap of at least [`ASSUME_STOPPED`].
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some((newest_time, newest_pos)) = self.newest() else {
            return Vec2::ZERO;
        };
        let mut oldest = (newest_time, newest_pos);
        let mut index = self.index;
        for _ in 1..HISTORY {
            index = (index + HISTORY - 1) % HISTORY;
            let Some((time, pos)) = self.history[index] else {
                break;
            };
            if newest_time.saturating_sub(time) > VELOCITY_HORIZON
                || oldest.0.saturating_sub(time) >= ASSUME_STOPPED
            {
                break;
            }
            oldest = (time, pos);
        }
        let elapsed = newest_time.saturating_sub(oldest.0).as_secs_f64();
        if elapsed <= 0.0 {
            return Vec2::ZERO;
        }
        (newest_pos - oldest.1) / elapsed
    }

    fn record(&mut self, pos: Point, time: Duration) {
        self.index = (self.index + 1) % HISTORY;
        self.history[self.index] = Some((time, pos));
    }

    fn newest(&self) -> Option<(Duration, Point)> {
        self.history[self.index]
    }

    fn end(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn moves_without_down_are_ignored() {
        let mut pan = PanTracker::default();
        assert!(pan.moved(Point::new(0.0, 10.0), ms(0)).is_none());
        assert!(pan.up(Point::new(0.0, 10.0), ms(0)).is_none());
        assert!(!pan.is_tracking());
    }

    #[test]
    fn tap_does_not_produce_an_ended_pan() {
        let mut pan = PanTracker::default();
        pan.down(Point::new(0.0, 0.0), ms(0));
        assert!(pan.up(Point::new(0.0, 0.0), ms(50)).is_none());
        assert!(!pan.is_tracking());
    }

    #[test]
    fn steady_drag_reports_constant_velocity() {
        let mut pan = PanTracker::default();
        pan.down(Point::new(0.0, 0.0), ms(0));
        for step in 1..=6 {
            pan.moved(Point::new(0.0, 10.0 * step as f64), ms(10 * step));
        }
        let velocity = pan.velocity();
        assert!((velocity.y - 1_000.0).abs() < 1e-6, "{velocity:?}");
        assert_eq!(velocity.x, 0.0);
    }

    #[test]
    fn pause_before_release_zeroes_velocity() {
        let mut pan = PanTracker::default();
        pan.down(Point::new(0.0, 0.0), ms(0));
        pan.moved(Point::new(0.0, 50.0), ms(10));
        pan.moved(Point::new(0.0, 100.0), ms(20));
        let ended = pan.up(Point::new(0.0, 100.0), ms(200)).unwrap();
        assert_eq!(ended.velocity, Vec2::ZERO);
        assert_eq!(ended.translation, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn old_samples_fall_outside_the_horizon() {
        let mut pan = PanTracker::default();
        pan.down(Point::new(0.0, 0.0), ms(0));
        // Slow phase, then a fast flick in the last 100 ms.
        for step in 1..=10 {
            pan.moved(Point::new(0.0, step as f64), ms(30 * step));
        }
        for step in 1..=5 {
            pan.moved(Point::new(0.0, 10.0 + 20.0 * step as f64), ms(300 + 10 * step));
        }
        let velocity = pan.velocity();
        assert!(velocity.y > 1_000.0, "{velocity:?}");
    }

    #[test]
    fn cancel_reports_last_translation() {
        let mut pan = PanTracker::default();
        pan.down(Point::new(5.0, 5.0), ms(0));
        pan.moved(Point::new(5.0, 25.0), ms(16));
        let cancelled = pan.cancel().unwrap();
        assert_eq!(cancelled.phase, PanPhase::Cancelled);
        assert_eq!(cancelled.translation, Vec2::new(0.0, 20.0));
        assert!(!pan.is_tracking());
    }
}
