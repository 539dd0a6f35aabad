// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the engine and the host UI layer.
//!
//! The engine never owns UI objects. Each inbound call on
//! [`SheetController`](crate::SheetController) borrows a
//! [`PresentationSurface`] for the duration of that call and writes commands
//! back through it. Application-level notifications go through
//! [`SheetHandlers`], which the controller owns.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use crate::detent::DetentKey;
use crate::keyboard::AnimationCurve;
use crate::scroll::{ScrollSnapshot, ScrollViewId};

/// How the host should animate a layout change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LayoutAnimation {
    /// The host's default sheet animation.
    #[default]
    Default,
    /// Match the keyboard's own animation timing.
    Keyboard {
        /// Keyboard animation duration.
        duration: Duration,
        /// Keyboard animation curve.
        curve: AnimationCurve,
    },
}

/// Commands the engine sends to the host.
///
/// Every method defaults to a no-op so hosts implement only what they drive.
pub trait PresentationSurface {
    /// Freezes the running show/hide animator.
    ///
    /// Returns its fraction complete, or `None` if it cannot be interrupted.
    fn pause_transition(&mut self) -> Option<f64> {
        None
    }

    /// Sets the fraction complete of the paused animator.
    fn update_transition(&mut self, _percent: f64) {}

    /// Lets the animator run to completion.
    fn finish_transition(&mut self) {}

    /// Lets the animator run back to its start.
    fn cancel_transition(&mut self) {}

    /// Asks the host to begin dismissing the sheet.
    ///
    /// `interactive` is `true` when a gesture is still in progress and will
    /// drive the dismissal; the host should answer by calling
    /// [`SheetController::begin_dismissal`](crate::SheetController::begin_dismissal).
    fn request_dismissal(&mut self, _interactive: bool) {}

    /// Animates the sheet to the controller's current frame.
    fn animate_layout(&mut self, _animation: LayoutAnimation) {}

    /// Returns the current geometry of a nested scroll view.
    fn scroll_snapshot(&self, _id: ScrollViewId) -> Option<ScrollSnapshot> {
        None
    }

    /// Moves a nested scroll view back to its top edge.
    ///
    /// With `interrupt_momentum` the host also stops any residual scrolling,
    /// for example by toggling the view's pan recognizer.
    fn reset_scroll_to_top(&mut self, _id: ScrollViewId, _interrupt_momentum: bool) {}
}

/// A surface that ignores every command.
impl PresentationSurface for () {}

/// Application callbacks.
///
/// All handlers are optional. Without `should_dismiss` the sheet is always
/// allowed to dismiss.
#[derive(Default)]
pub struct SheetHandlers {
    /// Asked before the sheet is dismissed by a gesture. Return `false` to
    /// veto.
    pub should_dismiss: Option<Box<dyn FnMut() -> bool>>,
    /// Called once per gesture after a dismissal was vetoed.
    pub did_attempt_to_dismiss: Option<Box<dyn FnMut()>>,
    /// Called whenever the selected detent changes.
    pub did_change_selected_detent_key: Option<Box<dyn FnMut(&DetentKey)>>,
}

impl SheetHandlers {
    /// Sets the dismissal veto handler.
    #[must_use]
    pub fn with_should_dismiss(mut self, handler: impl FnMut() -> bool + 'static) -> Self {
        self.should_dismiss = Some(Box::new(handler));
        self
    }

    /// Sets the attempted-dismissal handler.
    #[must_use]
    pub fn with_did_attempt_to_dismiss(mut self, handler: impl FnMut() + 'static) -> Self {
        self.did_attempt_to_dismiss = Some(Box::new(handler));
        self
    }

    /// Sets the selection change handler.
    #[must_use]
    pub fn with_did_change_selected_detent_key(
        mut self,
        handler: impl FnMut(&DetentKey) + 'static,
    ) -> Self {
        self.did_change_selected_detent_key = Some(Box::new(handler));
        self
    }

    pub(crate) fn should_dismiss(&mut self) -> bool {
        self.should_dismiss.as_mut().is_none_or(|handler| handler())
    }

    pub(crate) fn did_attempt_to_dismiss(&mut self) {
        if let Some(handler) = self.did_attempt_to_dismiss.as_mut() {
            handler();
        }
    }

    pub(crate) fn did_change_selected_detent_key(&mut self, key: &DetentKey) {
        if let Some(handler) = self.did_change_selected_detent_key.as_mut() {
            handler(key);
        }
    }
}

impl fmt::Debug for SheetHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetHandlers")
            .field("should_dismiss", &self.should_dismiss.is_some())
            .field("did_attempt_to_dismiss", &self.did_attempt_to_dismiss.is_some())
            .field(
                "did_change_selected_detent_key",
                &self.did_change_selected_detent_key.is_some(),
            )
            .finish()
    }
}
