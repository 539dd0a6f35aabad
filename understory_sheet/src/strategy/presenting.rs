// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::interaction::{GestureOutcome, PanSample};

use super::{DragAnchor, InteractionContext};

/// Dragging a sheet whose show animation is still in flight.
///
/// Below the selected detent the drag scrubs the paused show animation;
/// above it the animation is pinned at `1` and the sheet grows instead.
#[derive(Clone, Debug, Default)]
pub(crate) struct PresentingInteraction {
    anchor: DragAnchor,
    delta: f64,
    active: bool,
}

impl PresentingInteraction {
    pub(crate) fn current_detent_delta(&self) -> f64 {
        self.delta
    }

    pub(crate) fn start(&mut self, ctx: &mut InteractionContext<'_>, sample: &PanSample) {
        let Some(percent) = ctx.pause_transition() else {
            log::debug!("show animation cannot be interrupted; ignoring drag");
            self.active = false;
            return;
        };
        let current = ctx.resolver.resolve_current_detent_value();
        // Pick up exactly where the animation was so the sheet does not jump.
        let value = percent * (current + self.delta);
        self.anchor = DragAnchor::new(sample, value);
        self.active = true;
    }

    pub(crate) fn update(
        &mut self,
        ctx: &mut InteractionContext<'_>,
        sample: &PanSample,
    ) -> GestureOutcome {
        if !self.active {
            return GestureOutcome::Ignored;
        }
        let current = ctx.resolver.resolve_current_detent_value();
        let largest = ctx.resolver.resolve_largest_detent_value();
        let raw = self.anchor.raw_value(sample);
        if raw <= current {
            self.delta = 0.0;
            let percent = if current > 0.0 { raw / current } else { 1.0 };
            ctx.update_transition(percent);
        } else {
            self.delta = ctx.behavior.rubber_band.constrain(raw, current, largest) - current;
            ctx.update_transition(1.0);
        }
        log::trace!(
            "presenting drag: percent {}, delta {}",
            ctx.transition.percent_complete(),
            self.delta
        );
        GestureOutcome::Tracking
    }

    pub(crate) fn finish(
        &mut self,
        ctx: &mut InteractionContext<'_>,
        sample: &PanSample,
    ) -> GestureOutcome {
        if !self.active {
            return GestureOutcome::Ignored;
        }
        self.active = false;
        let current = ctx.resolver.resolve_current_detent_value();
        let projected = ctx.project(self.anchor.raw_value(sample), sample);
        self.delta = 0.0;

        if projected > current * ctx.behavior.dismiss_threshold {
            ctx.finish_transition();
            ctx.select_nearest(projected);
            GestureOutcome::TransitionFinished
        } else if ctx.should_dismiss() {
            ctx.cancel_transition();
            GestureOutcome::TransitionCancelled
        } else {
            ctx.finish_transition();
            ctx.did_attempt_to_dismiss();
            GestureOutcome::TransitionFinished
        }
    }

    pub(crate) fn cancel(&mut self, ctx: &mut InteractionContext<'_>) -> GestureOutcome {
        if !self.active {
            return GestureOutcome::Ignored;
        }
        self.active = false;
        self.delta = 0.0;
        ctx.finish_transition();
        GestureOutcome::TransitionFinished
    }
}
