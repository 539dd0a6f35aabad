// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture behavior for each presentation state.
//!
//! Exactly one strategy is installed at a time, chosen by the outer
//! [`PresentationState`]. Strategies read and write the shared
//! [`InteractionContext`] and never outlive a state change; the controller
//! swaps them atomically and re-anchors an in-flight gesture on the new one.

mod dismissing;
mod presented;
mod presenting;

pub(crate) use dismissing::DismissingInteraction;
pub(crate) use presented::PresentedInteraction;
pub(crate) use presenting::PresentingInteraction;

use crate::config::GestureBehavior;
use crate::interaction::{GestureOutcome, PanSample};
use crate::presentation::PresentationState;
use crate::resolver::DetentResolver;
use crate::scroll::{ScrollCooperation, ScrollSnapshot};
use crate::surface::{PresentationSurface, SheetHandlers};
use crate::transition::Transition;

/// Everything a strategy may touch while handling one event.
pub(crate) struct InteractionContext<'a> {
    pub(crate) resolver: &'a mut DetentResolver,
    pub(crate) transition: &'a mut Transition,
    pub(crate) scroll: &'a ScrollCooperation,
    pub(crate) handlers: &'a mut SheetHandlers,
    pub(crate) behavior: GestureBehavior,
    pub(crate) surface: &'a mut dyn PresentationSurface,
}

impl InteractionContext<'_> {
    /// Selects the detent nearest `target`, notifying on change.
    pub(crate) fn select_nearest(&mut self, target: f64) {
        if let Some(key) = self.resolver.select_nearest_detent(target) {
            self.handlers.did_change_selected_detent_key(&key);
        }
    }

    pub(crate) fn should_dismiss(&mut self) -> bool {
        let allowed = self.handlers.should_dismiss();
        if !allowed {
            log::debug!("dismissal vetoed");
        }
        allowed
    }

    pub(crate) fn did_attempt_to_dismiss(&mut self) {
        log::debug!("dismissal attempted after veto");
        self.handlers.did_attempt_to_dismiss();
    }

    /// Pauses the transition and returns its fraction complete.
    pub(crate) fn pause_transition(&mut self) -> Option<f64> {
        if !self.transition.can_pause() {
            return None;
        }
        let fraction = self.surface.pause_transition()?;
        self.transition.pause(Some(fraction));
        Some(self.transition.percent_complete())
    }

    pub(crate) fn update_transition(&mut self, percent: f64) {
        if self.transition.update(percent) {
            self.surface
                .update_transition(self.transition.percent_complete());
        }
    }

    pub(crate) fn finish_transition(&mut self) {
        if self.transition.finish() {
            self.surface.finish_transition();
        }
    }

    pub(crate) fn cancel_transition(&mut self) {
        if self.transition.cancel() {
            self.surface.cancel_transition();
        }
    }

    pub(crate) fn request_dismissal(&mut self, interactive: bool) {
        log::debug!("requesting dismissal (interactive: {interactive})");
        self.surface.request_dismissal(interactive);
    }

    /// Moves the claimed scroll view, if any, back to its top edge.
    pub(crate) fn reset_scroll(&mut self) {
        if let Some(id) = self.scroll.claimed() {
            self.surface
                .reset_scroll_to_top(id, self.behavior.interrupt_scroll_momentum);
        }
    }

    /// Snapshot of the claimed scroll view, if it scrolls vertically.
    pub(crate) fn vertical_scroll(&self) -> Option<ScrollSnapshot> {
        let id = self.scroll.claimed()?;
        self.surface
            .scroll_snapshot(id)
            .filter(ScrollSnapshot::scrolls_vertically)
    }

    /// Projected resting height for a release with the sample's velocity.
    pub(crate) fn project(&self, value: f64, sample: &PanSample) -> f64 {
        // Dragging up (negative y) grows the sheet.
        self.behavior.project(value, -sample.velocity.y)
    }
}

/// Maps pan translation to a sheet height relative to where the gesture was
/// picked up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct DragAnchor {
    origin_y: f64,
    initial_value: f64,
}

impl DragAnchor {
    pub(crate) fn new(sample: &PanSample, initial_value: f64) -> Self {
        Self {
            origin_y: sample.translation.y,
            initial_value,
        }
    }

    /// Undamped sheet height the pointer asks for.
    pub(crate) fn raw_value(&self, sample: &PanSample) -> f64 {
        self.initial_value - (sample.translation.y - self.origin_y)
    }
}

/// The gesture behavior installed for the current presentation state.
#[derive(Clone, Debug)]
pub(crate) enum Interaction {
    Presenting(PresentingInteraction),
    Presented(PresentedInteraction),
    Dismissing(DismissingInteraction),
    Dismissed,
}

impl Interaction {
    /// Builds the strategy for `state`.
    ///
    /// `origin_value` is the visible height when a dismissal starts and
    /// `current_value` the settled height of the selected detent.
    pub(crate) fn for_state(state: PresentationState, origin_value: f64, current_value: f64) -> Self {
        match state {
            PresentationState::Presenting => Self::Presenting(PresentingInteraction::default()),
            PresentationState::Presented => Self::Presented(PresentedInteraction::default()),
            PresentationState::Dismissing => {
                Self::Dismissing(DismissingInteraction::new(origin_value, current_value))
            }
            PresentationState::Dismissed => Self::Dismissed,
        }
    }

    pub(crate) fn can_recognize_gestures(&self) -> bool {
        !matches!(self, Self::Dismissed)
    }

    /// Signed offset of the sheet from the settled height of the selected
    /// detent.
    pub(crate) fn current_detent_delta(&self) -> f64 {
        match self {
            Self::Presenting(s) => s.current_detent_delta(),
            Self::Presented(s) => s.current_detent_delta(),
            Self::Dismissing(s) => s.current_detent_delta(),
            Self::Dismissed => 0.0,
        }
    }

    pub(crate) fn start(&mut self, ctx: &mut InteractionContext<'_>, sample: &PanSample) {
        match self {
            Self::Presenting(s) => s.start(ctx, sample),
            Self::Presented(s) => s.start(ctx, sample),
            Self::Dismissing(s) => s.start(ctx, sample),
            Self::Dismissed => {}
        }
    }

    pub(crate) fn update(
        &mut self,
        ctx: &mut InteractionContext<'_>,
        sample: &PanSample,
    ) -> GestureOutcome {
        match self {
            Self::Presenting(s) => s.update(ctx, sample),
            Self::Presented(s) => s.update(ctx, sample),
            Self::Dismissing(s) => s.update(ctx, sample),
            Self::Dismissed => GestureOutcome::Ignored,
        }
    }

    pub(crate) fn finish(
        &mut self,
        ctx: &mut InteractionContext<'_>,
        sample: &PanSample,
    ) -> GestureOutcome {
        match self {
            Self::Presenting(s) => s.finish(ctx, sample),
            Self::Presented(s) => s.finish(ctx, sample),
            Self::Dismissing(s) => s.finish(ctx, sample),
            Self::Dismissed => GestureOutcome::Ignored,
        }
    }

    pub(crate) fn cancel(&mut self, ctx: &mut InteractionContext<'_>) -> GestureOutcome {
        match self {
            Self::Presenting(s) => s.cancel(ctx),
            Self::Presented(s) => s.cancel(ctx),
            Self::Dismissing(s) => s.cancel(ctx),
            Self::Dismissed => GestureOutcome::Ignored,
        }
    }
}
