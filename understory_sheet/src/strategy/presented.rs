// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::interaction::{GestureOutcome, PanSample};

use super::{DragAnchor, InteractionContext};

/// Steady-state dragging between detents.
#[derive(Clone, Debug, Default)]
pub(crate) struct PresentedInteraction {
    anchor: DragAnchor,
    delta: f64,
    active: bool,
    /// The host already agreed to dismiss during this gesture.
    dismissal_requested: bool,
    /// The host refused to dismiss during this gesture.
    vetoed: bool,
}

impl PresentedInteraction {
    pub(crate) fn current_detent_delta(&self) -> f64 {
        self.delta
    }

    pub(crate) fn start(&mut self, ctx: &mut InteractionContext<'_>, sample: &PanSample) {
        let value = ctx.resolver.resolve_current_detent_value() + self.delta;
        self.anchor = DragAnchor::new(sample, value);
        self.active = true;
        self.dismissal_requested = false;
        self.vetoed = false;
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
        let smallest = ctx.resolver.resolve_smallest_detent_value();
        let largest = ctx.resolver.resolve_largest_detent_value();
        let previous = current + self.delta;
        let raw = self.anchor.raw_value(sample);

        let scroll = ctx.vertical_scroll();
        if let Some(snapshot) = &scroll {
            let growing_past_largest = raw > previous && previous >= largest;
            let shrinking_scrolled_content = raw < previous && !snapshot.is_at_top();
            if growing_past_largest || shrinking_scrolled_content {
                // The content scrolls instead; pick the drag up from here.
                self.anchor = DragAnchor::new(sample, previous);
                return GestureOutcome::Tracking;
            }
        }

        let value = if raw < smallest && scroll.is_some() {
            raw
        } else {
            ctx.behavior.rubber_band.constrain(raw, smallest, largest)
        };
        self.delta = value - current;
        log::trace!("presented drag: value {value}, delta {}", self.delta);

        if scroll.is_some() && value != previous {
            ctx.reset_scroll();
        }

        if value < smallest && !self.dismissal_requested && !self.vetoed {
            if ctx.should_dismiss() {
                self.dismissal_requested = true;
                ctx.request_dismissal(true);
                return GestureOutcome::DismissalRequested;
            }
            self.vetoed = true;
        }
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
        if self.dismissal_requested {
            // The host was already asked during the drag.
            return GestureOutcome::DismissalRequested;
        }
        let projected = ctx.project(self.anchor.raw_value(sample), sample);
        let threshold = ctx.resolver.resolve_smallest_detent_value() * ctx.behavior.dismiss_threshold;

        if projected < threshold && !self.vetoed {
            if ctx.should_dismiss() {
                self.dismissal_requested = true;
                ctx.request_dismissal(false);
                return GestureOutcome::DismissalRequested;
            }
            self.vetoed = true;
        }
        if self.vetoed {
            ctx.did_attempt_to_dismiss();
        }
        ctx.select_nearest(projected);
        self.delta = 0.0;
        GestureOutcome::Settled
    }

    pub(crate) fn cancel(&mut self, ctx: &mut InteractionContext<'_>) -> GestureOutcome {
        if !self.active {
            return GestureOutcome::Ignored;
        }
        self.active = false;
        if self.vetoed {
            ctx.did_attempt_to_dismiss();
        }
        self.delta = 0.0;
        GestureOutcome::Settled
    }
}
