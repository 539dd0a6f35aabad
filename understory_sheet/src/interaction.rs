// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture lifecycle types shared by the controller and the pan tracker.

use kurbo::Vec2;

/// Lifecycle of a single drag gesture.
///
/// `Finished`/`Cancelled` → `Starting` on gesture begin, `Starting` →
/// `Updating` on the first move, then `Finished` on release or `Cancelled` on
/// abort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    /// The gesture was just recognized.
    Starting,
    /// The pointer is moving.
    Updating,
    /// The gesture ended with a decisive outcome.
    #[default]
    Finished,
    /// The gesture was aborted.
    Cancelled,
}

impl InteractionState {
    /// Returns `true` while a gesture is in progress.
    ///
    /// Layout follows the pointer 1:1 while this is `true` and is animated once
    /// it becomes `false`.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Starting | Self::Updating)
    }

    /// Advances the lifecycle for an incoming pan phase.
    #[must_use]
    pub fn advance(self, phase: PanPhase) -> Self {
        match phase {
            PanPhase::Began => Self::Starting,
            PanPhase::Changed if self.is_active() => Self::Updating,
            PanPhase::Changed => self,
            PanPhase::Ended if self.is_active() => Self::Finished,
            PanPhase::Cancelled if self.is_active() => Self::Cancelled,
            PanPhase::Ended | PanPhase::Cancelled => self,
        }
    }
}

/// Phase of a recognized pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanPhase {
    /// The pointer went down and the pan was recognized.
    Began,
    /// The pointer moved.
    Changed,
    /// The pointer was released.
    Ended,
    /// The gesture was interrupted by the platform.
    Cancelled,
}

/// A single pan gesture sample, in container coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSample {
    /// Gesture phase.
    pub phase: PanPhase,
    /// Cumulative translation since the gesture began.
    pub translation: Vec2,
    /// Pointer velocity in points per second.
    pub velocity: Vec2,
}

impl PanSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(phase: PanPhase, translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    /// A `Began` sample with no translation.
    #[must_use]
    pub const fn began() -> Self {
        Self::new(PanPhase::Began, Vec2::ZERO, Vec2::ZERO)
    }

    /// A `Changed` sample at vertical translation `dy`.
    #[must_use]
    pub const fn changed(dy: f64) -> Self {
        Self::new(PanPhase::Changed, Vec2::new(0.0, dy), Vec2::ZERO)
    }

    /// An `Ended` sample at vertical translation `dy` with vertical velocity `vy`.
    #[must_use]
    pub const fn ended(dy: f64, vy: f64) -> Self {
        Self::new(PanPhase::Ended, Vec2::new(0.0, dy), Vec2::new(0.0, vy))
    }

    /// A `Cancelled` sample at vertical translation `dy`.
    #[must_use]
    pub const fn cancelled(dy: f64) -> Self {
        Self::new(PanPhase::Cancelled, Vec2::new(0.0, dy), Vec2::ZERO)
    }
}

/// What a pan sample did to the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureOutcome {
    /// The sample was not applicable (no gesture, or the sheet is dismissed).
    Ignored,
    /// The sheet is following the pointer.
    Tracking,
    /// The gesture ended and the sheet settles at the selected detent.
    Settled,
    /// The host was asked to dismiss the sheet.
    DismissalRequested,
    /// The gesture handed an in-flight transition back to finish.
    TransitionFinished,
    /// The gesture handed an in-flight transition back to reverse.
    TransitionCancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_starting_and_updating_are_active() {
        assert!(InteractionState::Starting.is_active());
        assert!(InteractionState::Updating.is_active());
        assert!(!InteractionState::Finished.is_active());
        assert!(!InteractionState::Cancelled.is_active());
        assert_eq!(InteractionState::default(), InteractionState::Finished);
    }

    #[test]
    fn advance_follows_the_lifecycle() {
        let state = InteractionState::Finished.advance(PanPhase::Began);
        assert_eq!(state, InteractionState::Starting);
        let state = state.advance(PanPhase::Changed);
        assert_eq!(state, InteractionState::Updating);
        assert_eq!(
            state.advance(PanPhase::Changed),
            InteractionState::Updating
        );
        assert_eq!(state.advance(PanPhase::Ended), InteractionState::Finished);
        assert_eq!(
            state.advance(PanPhase::Cancelled),
            InteractionState::Cancelled
        );
    }

    #[test]
    fn stray_samples_do_not_reactivate() {
        let state = InteractionState::Cancelled;
        assert_eq!(state.advance(PanPhase::Changed), state);
        assert_eq!(state.advance(PanPhase::Ended), state);
    }
}
