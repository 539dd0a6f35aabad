// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! On-screen keyboard frame notifications.

use core::time::Duration;

use kurbo::Rect;

/// Timing curve reported alongside a keyboard frame change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AnimationCurve {
    /// Slow start and end.
    #[default]
    EaseInOut,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Constant speed.
    Linear,
    /// Platform-specific curve identifier, passed back unchanged.
    Other(u32),
}

/// A keyboard frame change, in container coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardFrame {
    /// Final keyboard frame.
    pub frame: Rect,
    /// Duration of the keyboard's own animation.
    pub duration: Duration,
    /// Curve of the keyboard's own animation.
    pub curve: AnimationCurve,
}

impl KeyboardFrame {
    /// Creates a frame change.
    #[must_use]
    pub const fn new(frame: Rect, duration: Duration, curve: AnimationCurve) -> Self {
        Self {
            frame,
            duration,
            curve,
        }
    }

    /// Height by which the keyboard covers `container`, never negative.
    #[must_use]
    pub fn overlap(&self, container: Rect) -> f64 {
        let overlap = self.frame.intersect(container).height();
        if overlap.is_finite() {
            overlap.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_of_keyboard_at_the_bottom() {
        let container = Rect::new(0.0, 0.0, 400.0, 800.0);
        let keyboard = KeyboardFrame::new(
            Rect::new(0.0, 550.0, 400.0, 800.0),
            Duration::from_millis(250),
            AnimationCurve::EaseInOut,
        );
        assert_eq!(keyboard.overlap(container), 250.0);
    }

    #[test]
    fn hidden_keyboard_does_not_overlap() {
        let container = Rect::new(0.0, 0.0, 400.0, 800.0);
        let keyboard = KeyboardFrame::new(
            Rect::new(0.0, 800.0, 400.0, 1_050.0),
            Duration::ZERO,
            AnimationCurve::Linear,
        );
        assert_eq!(keyboard.overlap(container), 0.0);
        let offscreen = KeyboardFrame {
            frame: Rect::new(0.0, 900.0, 400.0, 1_150.0),
            ..keyboard
        };
        assert_eq!(offscreen.overlap(container), 0.0);
    }
}
