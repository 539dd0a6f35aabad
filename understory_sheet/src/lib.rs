// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: a headless bottom sheet engine.
//!
//! A bottom sheet is a modal surface anchored to the bottom edge of its container. It rests at one
//! of a set of named heights ("detents"), can be dragged between them, cooperates with a nested
//! scroll view, moves out of the way of the on-screen keyboard, and runs an interruptible show/hide
//! animation that a drag can pick up at any point.
//!
//! This crate owns the state and the decisions; the host owns views, animators and recognizers.
//!
//! - [`DetentResolver`] turns [`Detent`] rules into concrete heights for the current container
//!   geometry and picks the detent nearest to a target height.
//! - [`Transition`] is bookkeeping for an interruptible show/hide animation.
//! - [`SheetController`] combines the presentation lifecycle ([`PresentationState`]) with the
//!   gesture lifecycle ([`InteractionState`]). Each presentation state installs its own gesture
//!   behavior, so a drag during the show animation scrubs it, a drag while presented moves
//!   between detents, and a drag during the hide animation can bring the sheet back.
//! - [`ScrollCooperation`] decides when the sheet's drag and a nested scroll view's pan run
//!   together.
//! - [`RubberBand`], [`project`] and [`resolve_dimming_ratio`] are the pure functions behind
//!   overscroll damping, flick projection and the dimming layer.
//! - [`PanTracker`] builds [`PanSample`]s from raw pointer input for hosts without a native pan
//!   recognizer.
//!
//! ## Host boundary
//!
//! Inbound calls on [`SheetController`] carry geometry ([`SheetMetrics`]), pan samples,
//! keyboard frames ([`KeyboardFrame`]) and content size changes. Commands flow back through a
//! borrowed [`PresentationSurface`], and application code is notified through [`SheetHandlers`].
//! Heights are logical pixels measured upward from the bottom edge of the container; pan
//! translations use container coordinates, where y grows downward.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_sheet::{
//!     Detent, DetentKey, GestureOutcome, PanSample, SheetConfig, SheetController, SheetHandlers,
//!     SheetMetrics,
//! };
//!
//! let attempts = Rc::new(Cell::new(0));
//! let counter = attempts.clone();
//! let mut sheet = SheetController::new(SheetConfig {
//!     detents: vec![Detent::fixed("medium", 300.0), Detent::fixed("large", 700.0)],
//!     selected_detent_key: Some(DetentKey::LARGE),
//!     ..SheetConfig::default()
//! })
//! .unwrap()
//! .with_handlers(
//!     SheetHandlers::default()
//!         .with_should_dismiss(|| false)
//!         .with_did_attempt_to_dismiss(move || counter.set(counter.get() + 1)),
//! );
//! sheet.set_metrics(SheetMetrics::new(Size::new(400.0, 800.0)));
//! sheet.begin_presentation();
//! sheet.complete_transition(true, &mut ());
//!
//! // Drag almost all the way down; the host refuses to dismiss.
//! sheet.handle_pan(PanSample::began(), &mut ());
//! sheet.handle_pan(PanSample::changed(650.0), &mut ());
//! let outcome = sheet.handle_pan(PanSample::ended(650.0, 0.0), &mut ());
//!
//! assert_eq!(outcome, GestureOutcome::Settled);
//! assert_eq!(sheet.selected_detent_key(), Some(&DetentKey::MEDIUM));
//! assert_eq!(attempts.get(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod detent;
mod dimming;
mod error;
mod interaction;
mod keyboard;
mod pan;
mod presentation;
mod projection;
mod resolver;
mod rubber_band;
mod scroll;
mod strategy;
mod surface;
mod transition;

pub use config::SheetConfig;
pub use controller::SheetController;
pub use detent::{Detent, DetentKey, DetentRule};
pub use dimming::resolve_dimming_ratio;
pub use error::ConfigError;
pub use interaction::{GestureOutcome, InteractionState, PanPhase, PanSample};
pub use keyboard::{AnimationCurve, KeyboardFrame};
pub use pan::{ASSUME_STOPPED, PanTracker, VELOCITY_HORIZON};
pub use presentation::PresentationState;
pub use projection::{DecelerationRate, project};
pub use resolver::{DetentResolver, SheetMetrics};
pub use rubber_band::RubberBand;
pub use scroll::{ScrollAxes, ScrollCooperation, ScrollSnapshot, ScrollViewId};
pub use surface::{LayoutAnimation, PresentationSurface, SheetHandlers};
pub use transition::{Transition, TransitionKind, TransitionState};
