// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sheet controller: presentation lifecycle × gesture lifecycle.
//!
//! ## Usage
//!
//! 1) Build a [`SheetController`] from a [`SheetConfig`] and attach
//!    [`SheetHandlers`].
//! 2) Report geometry with [`SheetController::set_metrics`] on every layout
//!    pass and lay the sheet out at [`SheetController::frame`].
//! 3) Drive the lifecycle with [`begin_presentation`](SheetController::begin_presentation),
//!    [`begin_dismissal`](SheetController::begin_dismissal), and
//!    [`complete_transition`](SheetController::complete_transition).
//! 4) Feed pan samples to [`SheetController::handle_pan`] and keyboard frames
//!    to [`SheetController::handle_keyboard_frame`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Size;
//! use understory_sheet::{
//!     Detent, DetentKey, GestureOutcome, PanSample, SheetConfig, SheetController, SheetMetrics,
//! };
//!
//! let mut sheet = SheetController::new(SheetConfig {
//!     detents: vec![Detent::fixed("medium", 300.0), Detent::fixed("large", 700.0)],
//!     selected_detent_key: Some(DetentKey::MEDIUM),
//!     ..SheetConfig::default()
//! })
//! .unwrap();
//! sheet.set_metrics(SheetMetrics::new(Size::new(400.0, 800.0)));
//!
//! let host = &mut ();
//! sheet.begin_presentation();
//! sheet.complete_transition(true, host);
//! assert_eq!(sheet.visible_height(), 300.0);
//!
//! // Drag up by 300 points and release with an upward flick.
//! sheet.handle_pan(PanSample::began(), host);
//! sheet.handle_pan(PanSample::changed(-300.0), host);
//! assert_eq!(sheet.current_detent_delta(), 300.0);
//! let outcome = sheet.handle_pan(PanSample::ended(-300.0, -500.0), host);
//!
//! assert_eq!(outcome, GestureOutcome::Settled);
//! assert_eq!(sheet.selected_detent_key(), Some(&DetentKey::LARGE));
//! assert_eq!(sheet.visible_height(), 700.0);
//! ```

use kurbo::{Point, Rect};

use crate::config::{GestureBehavior, SheetConfig};
use crate::detent::{Detent, DetentKey};
use crate::dimming::resolve_dimming_ratio;
use crate::error::ConfigError;
use crate::interaction::{GestureOutcome, InteractionState, PanPhase, PanSample};
use crate::keyboard::KeyboardFrame;
use crate::presentation::PresentationState;
use crate::resolver::{DetentResolver, SheetMetrics};
use crate::scroll::{ScrollCooperation, ScrollSnapshot};
use crate::strategy::{Interaction, InteractionContext};
use crate::surface::{LayoutAnimation, PresentationSurface, SheetHandlers};
use crate::transition::{Transition, TransitionKind, TransitionState};

/// Drives one bottom sheet.
///
/// The controller owns the detent resolver, the current transition, and the
/// interaction strategy for the current [`PresentationState`]. It never owns
/// host UI objects; each inbound call that needs to talk back borrows a
/// [`PresentationSurface`].
#[derive(Debug)]
pub struct SheetController {
    resolver: DetentResolver,
    presentation: PresentationState,
    transition: Transition,
    interaction: Interaction,
    interaction_state: InteractionState,
    scroll: ScrollCooperation,
    handlers: SheetHandlers,
    behavior: GestureBehavior,
    largest_undimmed: Option<DetentKey>,
    pending_layout: Option<LayoutAnimation>,
    last_sample: Option<PanSample>,
}

impl SheetController {
    /// Creates a dismissed sheet from `config`.
    pub fn new(config: SheetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let behavior = config.behavior();
        let mut resolver = DetentResolver::new(config.detents, config.selected_detent_key)?;
        resolver.set_top_spacing(config.top_spacing);
        Ok(Self {
            resolver,
            presentation: PresentationState::Dismissed,
            transition: Transition::new(TransitionKind::Presentation),
            interaction: Interaction::Dismissed,
            interaction_state: InteractionState::default(),
            scroll: ScrollCooperation::default(),
            handlers: SheetHandlers::default(),
            behavior,
            largest_undimmed: config.largest_undimmed_detent_key,
            pending_layout: None,
            last_sample: None,
        })
    }

    /// Returns this controller with `handlers` attached.
    #[must_use]
    pub fn with_handlers(mut self, handlers: SheetHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Replaces the application callbacks.
    pub fn set_handlers(&mut self, handlers: SheetHandlers) {
        self.handlers = handlers;
    }

    /// Returns the detent resolver.
    #[must_use]
    pub fn resolver(&self) -> &DetentResolver {
        &self.resolver
    }

    /// Returns the outer lifecycle state.
    #[must_use]
    pub fn presentation_state(&self) -> PresentationState {
        self.presentation
    }

    /// Returns the current or most recent transition.
    #[must_use]
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Returns the gesture lifecycle state.
    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction_state
    }

    /// Signed offset of the sheet from the selected detent's settled height.
    #[must_use]
    pub fn current_detent_delta(&self) -> f64 {
        self.interaction.current_detent_delta()
    }

    /// Returns the selected detent key, if any.
    #[must_use]
    pub fn selected_detent_key(&self) -> Option<&DetentKey> {
        self.resolver.selected_detent_key()
    }

    /// Returns the largest detent shown without dimming.
    #[must_use]
    pub fn largest_undimmed_detent_key(&self) -> Option<&DetentKey> {
        self.largest_undimmed.as_ref()
    }

    // -------------------------------------------------------------------------
    // Inbound geometry
    // -------------------------------------------------------------------------

    /// Reports the container geometry. Call on every layout pass.
    pub fn set_metrics(&mut self, metrics: SheetMetrics) {
        self.resolver.set_metrics(metrics);
    }

    /// Reports the presented content's preferred height.
    ///
    /// Animates the resulting layout change, or defers it to the end of an
    /// active gesture.
    pub fn set_content_height(
        &mut self,
        height: Option<f64>,
        surface: &mut dyn PresentationSurface,
    ) {
        let revision = self.resolver.revision();
        self.resolver.set_content_height(height);
        if self.resolver.revision() != revision {
            self.schedule_layout(LayoutAnimation::Default, surface);
        }
    }

    /// Replaces the detent list.
    ///
    /// A selection that is no longer present is cleared, as is a largest
    /// undimmed detent that disappeared.
    pub fn set_detents(
        &mut self,
        detents: impl IntoIterator<Item = Detent>,
        surface: &mut dyn PresentationSurface,
    ) -> Result<(), ConfigError> {
        if self.resolver.set_detents(detents)? {
            log::debug!("selected detent removed; falling back to the smallest detent");
        }
        if let Some(key) = &self.largest_undimmed {
            if self.resolver.resolved_value(key).is_none() {
                self.largest_undimmed = None;
            }
        }
        self.schedule_layout(LayoutAnimation::Default, surface);
        Ok(())
    }

    /// Selects a detent programmatically and animates to it.
    ///
    /// Unknown keys are ignored. Does not call
    /// `did_change_selected_detent_key`, which reports user-driven changes.
    pub fn select_detent(
        &mut self,
        key: Option<DetentKey>,
        surface: &mut dyn PresentationSurface,
    ) -> bool {
        if !self.resolver.set_selected_detent_key(key) {
            return false;
        }
        self.schedule_layout(LayoutAnimation::Default, surface);
        true
    }

    /// Handles a keyboard frame change.
    ///
    /// The overlap with the container is applied as keyboard height while a
    /// text input in the sheet is focused. The layout change is animated with
    /// the keyboard's own timing, or deferred to the end of an active gesture.
    /// Returns `true` if the keyboard height changed.
    pub fn handle_keyboard_frame(
        &mut self,
        keyboard: &KeyboardFrame,
        text_input_focused: bool,
        surface: &mut dyn PresentationSurface,
    ) -> bool {
        let container = Rect::from_origin_size(Point::ORIGIN, self.resolver.metrics().container);
        let height = if text_input_focused {
            keyboard.overlap(container)
        } else {
            0.0
        };
        let revision = self.resolver.revision();
        self.resolver.set_keyboard_height(height);
        if self.resolver.revision() == revision {
            return false;
        }
        log::debug!("keyboard height is now {}", self.resolver.keyboard_height());
        self.schedule_layout(
            LayoutAnimation::Keyboard {
                duration: keyboard.duration,
                curve: keyboard.curve,
            },
            surface,
        );
        true
    }

    /// Reports the fraction complete of a transition the host animates on its
    /// own. Ignored while a gesture drives the transition.
    pub fn report_transition_progress(&mut self, percent: f64) {
        if self.transition.state() == TransitionState::Running {
            self.transition.update(percent);
        }
    }

    // -------------------------------------------------------------------------
    // Presentation lifecycle
    // -------------------------------------------------------------------------

    /// Starts presenting a dismissed sheet.
    pub fn begin_presentation(&mut self) -> bool {
        if !self.presentation.can_transition_to(PresentationState::Presenting) {
            log::debug!("cannot present from {:?}", self.presentation);
            return false;
        }
        self.transition = Transition::new(TransitionKind::Presentation);
        self.transition.start();
        self.set_presentation(PresentationState::Presenting);
        true
    }

    /// Starts dismissing a presented sheet.
    ///
    /// The visible height at this moment becomes the dismissal origin. If a
    /// gesture is active, the hide animation is paused immediately and the
    /// gesture keeps driving it.
    pub fn begin_dismissal(&mut self, surface: &mut dyn PresentationSurface) -> bool {
        if !self.presentation.can_transition_to(PresentationState::Dismissing) {
            log::debug!("cannot dismiss from {:?}", self.presentation);
            return false;
        }
        self.transition = Transition::new(TransitionKind::Dismissal);
        self.transition.start();
        self.set_presentation(PresentationState::Dismissing);
        self.resume_gesture(surface);
        true
    }

    /// Reports that the host finished running the current transition.
    ///
    /// `finished` is `false` when the animation ran in reverse.
    pub fn complete_transition(
        &mut self,
        finished: bool,
        surface: &mut dyn PresentationSurface,
    ) -> bool {
        use PresentationState::*;

        let next = match (self.presentation, finished) {
            (Presenting, true) | (Dismissing, false) => Presented,
            (Presenting, false) | (Dismissing, true) => Dismissed,
            (state, _) => {
                log::debug!("ignoring transition completion while {state:?}");
                return false;
            }
        };
        self.set_presentation(next);
        if next == Dismissed {
            if self.interaction_state.is_active() {
                self.end_gesture_state(InteractionState::Cancelled);
            }
            self.pending_layout = None;
        } else {
            self.resume_gesture(surface);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Returns `true` if the sheet's pan gesture may begin.
    ///
    /// Drops any scroll view claimed by a previous gesture.
    pub fn should_begin_gesture(&mut self) -> bool {
        self.scroll.release();
        self.interaction.can_recognize_gestures()
    }

    /// Decides whether the sheet's pan and a nested scroll view's pan may
    /// recognize at the same time.
    pub fn should_recognize_simultaneously(&mut self, snapshot: &ScrollSnapshot) -> bool {
        if !self.interaction.can_recognize_gestures() {
            return false;
        }
        self.scroll
            .should_recognize_simultaneously(snapshot, self.interaction_state.is_active())
    }

    /// Feeds one pan sample through the active strategy.
    pub fn handle_pan(
        &mut self,
        sample: PanSample,
        surface: &mut dyn PresentationSurface,
    ) -> GestureOutcome {
        let was_active = self.interaction_state.is_active();
        match sample.phase {
            PanPhase::Began => {
                if !self.interaction.can_recognize_gestures() {
                    return GestureOutcome::Ignored;
                }
                self.interaction_state = self.interaction_state.advance(sample.phase);
                self.last_sample = Some(sample);
                log::debug!("gesture began while {:?}", self.presentation);
                let (interaction, mut ctx) = self.split(surface);
                interaction.start(&mut ctx, &sample);
                GestureOutcome::Tracking
            }
            PanPhase::Changed => {
                if !was_active {
                    return GestureOutcome::Ignored;
                }
                self.interaction_state = self.interaction_state.advance(sample.phase);
                self.last_sample = Some(sample);
                let (interaction, mut ctx) = self.split(surface);
                interaction.update(&mut ctx, &sample)
            }
            PanPhase::Ended => {
                if !was_active {
                    return GestureOutcome::Ignored;
                }
                let (interaction, mut ctx) = self.split(surface);
                let outcome = interaction.finish(&mut ctx, &sample);
                self.end_gesture(sample.phase, outcome, surface);
                outcome
            }
            PanPhase::Cancelled => {
                if !was_active {
                    return GestureOutcome::Ignored;
                }
                let (interaction, mut ctx) = self.split(surface);
                let outcome = interaction.cancel(&mut ctx);
                self.end_gesture(sample.phase, outcome, surface);
                outcome
            }
        }
    }

    // -------------------------------------------------------------------------
    // Outbound
    // -------------------------------------------------------------------------

    /// Height of the sheet currently on screen.
    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.base_height() * self.presence()
    }

    /// Frame of the sheet in container coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame_for_height(self.visible_height())
    }

    /// Frame of the sheet once it settles at the selected detent.
    #[must_use]
    pub fn target_frame(&self) -> Rect {
        let height = match self.presentation {
            PresentationState::Presenting | PresentationState::Presented => {
                self.resolver.resolve_current_detent_value()
            }
            PresentationState::Dismissing | PresentationState::Dismissed => 0.0,
        };
        self.frame_for_height(height)
    }

    /// Opacity of the dimming layer, scaled by how far the sheet is presented.
    #[must_use]
    pub fn dimming_ratio(&self) -> f64 {
        let ratio = resolve_dimming_ratio(
            &self.resolver,
            self.base_height(),
            self.largest_undimmed.as_ref(),
        );
        ratio * self.presence()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Height of the sheet ignoring the show/hide animation.
    fn base_height(&self) -> f64 {
        (self.resolver.resolve_current_detent_value() + self.current_detent_delta()).max(0.0)
    }

    /// Fraction of the sheet's height that the show/hide animation reveals.
    fn presence(&self) -> f64 {
        let percent = self.transition.percent_complete();
        match self.presentation {
            PresentationState::Presenting => percent,
            PresentationState::Presented => 1.0,
            PresentationState::Dismissing => 1.0 - percent,
            PresentationState::Dismissed => 0.0,
        }
    }

    fn frame_for_height(&self, height: f64) -> Rect {
        let container = self.resolver.metrics().container;
        let bottom = (container.height - self.resolver.keyboard_height()).max(0.0);
        Rect::new(0.0, bottom - height, container.width, bottom)
    }

    fn set_presentation(&mut self, next: PresentationState) {
        log::debug!("presentation {:?} -> {next:?}", self.presentation);
        let origin = self.visible_height();
        let current = self.resolver.resolve_current_detent_value();
        self.presentation = next;
        self.interaction = Interaction::for_state(next, origin, current);
    }

    /// Hands an in-flight gesture to a freshly installed strategy.
    fn resume_gesture(&mut self, surface: &mut dyn PresentationSurface) {
        if !self.interaction_state.is_active() {
            return;
        }
        let Some(sample) = self.last_sample else {
            return;
        };
        let (interaction, mut ctx) = self.split(surface);
        interaction.start(&mut ctx, &sample);
    }

    fn end_gesture(
        &mut self,
        phase: PanPhase,
        outcome: GestureOutcome,
        surface: &mut dyn PresentationSurface,
    ) {
        self.end_gesture_state(self.interaction_state.advance(phase));
        log::debug!("gesture ended: {outcome:?}");
        if let Some(animation) = self.pending_layout.take() {
            log::debug!("applying deferred layout");
            surface.animate_layout(animation);
        } else if matches!(
            outcome,
            GestureOutcome::Settled
                | GestureOutcome::TransitionFinished
                | GestureOutcome::TransitionCancelled
        ) {
            surface.animate_layout(LayoutAnimation::Default);
        }
    }

    fn end_gesture_state(&mut self, state: InteractionState) {
        self.interaction_state = state;
        self.last_sample = None;
        self.scroll.release();
    }

    /// Animates a layout change now, or defers it until the gesture ends.
    fn schedule_layout(&mut self, animation: LayoutAnimation, surface: &mut dyn PresentationSurface) {
        if self.presentation == PresentationState::Dismissed {
            return;
        }
        if self.interaction_state.is_active() {
            log::debug!("deferring layout until the gesture ends");
            // Keyboard timing wins over the default animation.
            if !matches!(
                (self.pending_layout, animation),
                (Some(LayoutAnimation::Keyboard { .. }), LayoutAnimation::Default)
            ) {
                self.pending_layout = Some(animation);
            }
        } else {
            surface.animate_layout(animation);
        }
    }

    fn split<'a>(
        &'a mut self,
        surface: &'a mut dyn PresentationSurface,
    ) -> (&'a mut Interaction, InteractionContext<'a>) {
        let Self {
            resolver,
            transition,
            interaction,
            scroll,
            handlers,
            behavior,
            ..
        } = self;
        (
            interaction,
            InteractionContext {
                resolver,
                transition,
                scroll,
                handlers,
                behavior: *behavior,
                surface,
            },
        )
    }
}
