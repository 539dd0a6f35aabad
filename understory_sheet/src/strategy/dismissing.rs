// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::interaction::{GestureOutcome, PanSample};

use super::{DragAnchor, InteractionContext};

/// Dragging a sheet whose hide animation is in flight.
///
/// The hide animation scrubs between the height the sheet had when the
/// dismissal began (`0`) and offscreen (`1`). Dragging above that height pins
/// the animation at `0` and grows the sheet again.
#[derive(Clone, Debug)]
pub(crate) struct DismissingInteraction {
    origin_value: f64,
    extra: f64,
    delta: f64,
    anchor: DragAnchor,
    active: bool,
}

impl DismissingInteraction {
    pub(crate) fn new(origin_value: f64, current_value: f64) -> Self {
        Self {
            origin_value,
            extra: 0.0,
            delta: origin_value - current_value,
            anchor: DragAnchor::default(),
            active: false,
        }
    }

    pub(crate) fn current_detent_delta(&self) -> f64 {
        self.delta
    }

    pub(crate) fn start(&mut self, ctx: &mut InteractionContext<'_>, sample: &PanSample) {
        let Some(percent) = ctx.pause_transition() else {
            log::debug!("hide animation cannot be interrupted; ignoring drag");
            self.active = false;
            return;
        };
        let value = (1.0 - percent) * self.origin_value + self.extra;
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
        if raw < self.origin_value {
            self.extra = 0.0;
            ctx.update_transition(1.0 - raw / self.origin_value);
        } else {
            let value = ctx.behavior.rubber_band.constrain(raw, self.origin_value, largest);
            self.extra = value - self.origin_value;
            ctx.update_transition(0.0);
        }
        self.delta = self.origin_value + self.extra - current;
        log::trace!(
            "dismissing drag: percent {}, delta {}",
            ctx.transition.percent_complete(),
            self.delta
        );
        ctx.reset_scroll();
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
        let projected = ctx.project(self.anchor.raw_value(sample), sample);
        let threshold =
            ctx.resolver.resolve_smallest_detent_value() * ctx.behavior.dismiss_threshold;
        if projected < threshold {
            ctx.finish_transition();
            return GestureOutcome::TransitionFinished;
        }
        ctx.select_nearest(projected);
        self.reverse(ctx);
        GestureOutcome::TransitionCancelled
    }

    pub(crate) fn cancel(&mut self, ctx: &mut InteractionContext<'_>) -> GestureOutcome {
        if !self.active {
            return GestureOutcome::Ignored;
        }
        self.active = false;
        self.reverse(ctx);
        GestureOutcome::TransitionCancelled
    }

    /// Hands the hide animation back to run in reverse toward the selected
    /// detent.
    fn reverse(&mut self, ctx: &mut InteractionContext<'_>) {
        self.origin_value = ctx.resolver.resolve_current_detent_value();
        self.extra = 0.0;
        self.delta = 0.0;
        ctx.cancel_transition();
    }
}
