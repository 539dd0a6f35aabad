// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for an interruptible, percent-driven show/hide animation.
//!
//! The host owns the actual animator. A [`Transition`] tracks which phase that
//! animator is in so gesture code can pause it, scrub it, and hand it back.
//! Every mutating call returns `true` only when it took effect, which lets the
//! caller forward exactly the calls that matter to the host.

/// Which way a [`Transition`] moves the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Showing the sheet; `0` is offscreen and `1` is fully presented.
    Presentation,
    /// Hiding the sheet; `0` is fully presented and `1` is offscreen.
    Dismissal,
}

/// Phase of a [`Transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TransitionState {
    /// Created but not started.
    #[default]
    Idle,
    /// The host animator is running on its own.
    Running,
    /// Frozen and driven manually through [`Transition::update`].
    Paused,
    /// Handed back to the host to run to completion. Terminal.
    Finishing,
    /// Handed back to the host to run in reverse. Terminal.
    Cancelling,
}

/// One show or hide animation attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    kind: TransitionKind,
    state: TransitionState,
    percent_complete: f64,
    is_interactive: bool,
}

impl Transition {
    /// Creates an idle transition.
    #[must_use]
    pub const fn new(kind: TransitionKind) -> Self {
        Self {
            kind,
            state: TransitionState::Idle,
            percent_complete: 0.0,
            is_interactive: false,
        }
    }

    /// Returns the transition direction.
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Returns the current phase.
    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Returns the interpolation fraction in `[0, 1]`.
    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        self.percent_complete
    }

    /// Returns `true` while the transition is driven manually.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    /// Returns `true` once the transition was finished or cancelled.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Finishing | TransitionState::Cancelling
        )
    }

    /// Returns `true` if [`pause`](Self::pause) would take effect.
    #[must_use]
    pub fn can_pause(&self) -> bool {
        matches!(self.state, TransitionState::Idle | TransitionState::Running)
    }

    /// Starts running an idle transition.
    pub fn start(&mut self) -> bool {
        if self.state != TransitionState::Idle {
            return false;
        }
        self.state = TransitionState::Running;
        true
    }

    /// Freezes the animator at `fraction_complete` and switches to
    /// interactive mode.
    ///
    /// `None` keeps the last known fraction.
    pub fn pause(&mut self, fraction_complete: Option<f64>) -> bool {
        if !self.can_pause() {
            return false;
        }
        if let Some(fraction) = fraction_complete {
            self.percent_complete = clamp_unit(fraction);
        }
        self.state = TransitionState::Paused;
        self.is_interactive = true;
        true
    }

    /// Sets the interpolation fraction. Ignored once terminal.
    pub fn update(&mut self, percent: f64) -> bool {
        if self.is_terminal() {
            return false;
        }
        let percent = clamp_unit(percent);
        if self.percent_complete == percent {
            return false;
        }
        self.percent_complete = percent;
        true
    }

    /// Hands the transition back to the host to run to completion.
    pub fn finish(&mut self) -> bool {
        self.end(TransitionState::Finishing)
    }

    /// Hands the transition back to the host to run in reverse.
    pub fn cancel(&mut self) -> bool {
        self.end(TransitionState::Cancelling)
    }

    fn end(&mut self, state: TransitionState) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.state = state;
        self.is_interactive = false;
        true
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_runs_pause_update_finish() {
        let mut t = Transition::new(TransitionKind::Presentation);
        assert_eq!(t.state(), TransitionState::Idle);
        assert!(t.start());
        assert!(!t.start());
        assert!(t.pause(Some(0.4)));
        assert!(t.is_interactive());
        assert_eq!(t.percent_complete(), 0.4);
        assert!(t.update(0.6));
        assert!(!t.update(0.6));
        assert!(t.finish());
        assert_eq!(t.state(), TransitionState::Finishing);
        assert!(!t.is_interactive());
    }

    #[test]
    fn terminal_states_ignore_everything() {
        let mut t = Transition::new(TransitionKind::Dismissal);
        t.start();
        assert!(t.cancel());
        assert!(!t.finish());
        assert!(!t.cancel());
        assert!(!t.pause(Some(0.1)));
        assert!(!t.update(0.9));
        assert_eq!(t.state(), TransitionState::Cancelling);
        assert_eq!(t.percent_complete(), 0.0);
    }

    #[test]
    fn pause_twice_is_a_no_op() {
        let mut t = Transition::new(TransitionKind::Presentation);
        t.start();
        assert!(t.pause(None));
        assert!(!t.pause(Some(0.8)));
        assert_eq!(t.percent_complete(), 0.0);
    }

    #[test]
    fn update_clamps() {
        let mut t = Transition::new(TransitionKind::Presentation);
        t.start();
        t.pause(None);
        t.update(1.7);
        assert_eq!(t.percent_complete(), 1.0);
        t.update(-3.0);
        assert_eq!(t.percent_complete(), 0.0);
        t.update(f64::NAN);
        assert_eq!(t.percent_complete(), 0.0);
    }
}
