// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Outer lifecycle of a presented sheet.
///
/// `Dismissed → Presenting → Presented ⇄ Dismissing → Dismissed`. A
/// presentation that is cancelled part way goes back to `Dismissed`, and a
/// cancelled dismissal goes back to `Presented`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PresentationState {
    /// The show animation is running or being driven by a gesture.
    Presenting,
    /// Stable on screen.
    Presented,
    /// The hide animation is running or being driven by a gesture.
    Dismissing,
    /// Not on screen.
    #[default]
    Dismissed,
}

impl PresentationState {
    /// Returns `true` for the states driven by a host animation.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Presenting | Self::Dismissing)
    }

    /// Returns `true` if moving from `self` to `next` is a legal step.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Dismissed, Self::Presenting)
                | (Self::Presenting, Self::Presented | Self::Dismissed)
                | (Self::Presented, Self::Dismissing)
                | (Self::Dismissing, Self::Dismissed | Self::Presented)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::PresentationState::{self, *};

    #[test]
    fn legal_steps() {
        let all = [Presenting, Presented, Dismissing, Dismissed];
        let legal = [
            (Dismissed, Presenting),
            (Presenting, Presented),
            (Presenting, Dismissed),
            (Presented, Dismissing),
            (Dismissing, Dismissed),
            (Dismissing, Presented),
        ];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "{from:?} -> {to:?}"
                );
            }
        }
    }

    #[test]
    fn transient_states() {
        assert!(Presenting.is_transient());
        assert!(Dismissing.is_transient());
        assert!(!Presented.is_transient());
        assert!(!PresentationState::default().is_transient());
    }
}
