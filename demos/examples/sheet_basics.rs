// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom sheet basics.
//!
//! Drive `understory_sheet` through a simulated host: present, drag between
//! detents, raise the keyboard, try to dismiss with a veto, then dismiss.
//!
//! Run:
//! - `cargo run -p understory_demos --example sheet_basics`
//! - `RUST_LOG=trace cargo run -p understory_demos --example sheet_basics` to
//!   see every drag sample.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Insets, Point, Rect, Size};
use understory_sheet::{
    AnimationCurve, Detent, DetentKey, GestureOutcome, KeyboardFrame, LayoutAnimation, PanTracker,
    PresentationSurface, SheetConfig, SheetController, SheetHandlers, SheetMetrics,
};

/// Stand-in for a UI toolkit: an animator that can be paused and a log of
/// what the engine asked for.
#[derive(Debug, Default)]
struct SimulatedHost {
    animator_progress: f64,
    dismissal_requested: bool,
}

impl PresentationSurface for SimulatedHost {
    fn pause_transition(&mut self) -> Option<f64> {
        println!("  host: pause animator at {:.2}", self.animator_progress);
        Some(self.animator_progress)
    }

    fn update_transition(&mut self, percent: f64) {
        self.animator_progress = percent;
    }

    fn finish_transition(&mut self) {
        println!("  host: finish animator from {:.2}", self.animator_progress);
    }

    fn cancel_transition(&mut self) {
        println!("  host: reverse animator from {:.2}", self.animator_progress);
    }

    fn request_dismissal(&mut self, interactive: bool) {
        println!("  host: dismissal requested (interactive: {interactive})");
        self.dismissal_requested = true;
    }

    fn animate_layout(&mut self, animation: LayoutAnimation) {
        match animation {
            LayoutAnimation::Default => println!("  host: animate layout"),
            LayoutAnimation::Keyboard { duration, curve } => {
                println!("  host: animate layout with keyboard timing {duration:?} {curve:?}");
            }
        }
    }
}

/// Plays a straight vertical drag through a pointer tracker at 60 Hz.
fn drag(
    sheet: &mut SheetController,
    host: &mut SimulatedHost,
    from_y: f64,
    to_y: f64,
    steps: u32,
) -> GestureOutcome {
    let mut pan = PanTracker::default();
    let frame = Duration::from_micros(16_667);
    pan.down(Point::new(200.0, from_y), Duration::ZERO);
    let mut outcome = GestureOutcome::Ignored;
    for step in 1..=steps {
        let y = from_y + (to_y - from_y) * f64::from(step) / f64::from(steps);
        let Some(sample) = pan.moved(Point::new(200.0, y), frame * step) else {
            continue;
        };
        outcome = sheet.handle_pan(sample, host);
        if outcome == GestureOutcome::DismissalRequested && host.dismissal_requested {
            // An interactive dismissal: the host starts hiding the sheet and the
            // same drag keeps driving it.
            host.dismissal_requested = false;
            host.animator_progress = 0.0;
            sheet.begin_dismissal(host);
        }
    }
    if let Some(sample) = pan.up(Point::new(200.0, to_y), frame * (steps + 1)) {
        outcome = sheet.handle_pan(sample, host);
    }
    outcome
}

fn report(label: &str, sheet: &SheetController) {
    let frame = sheet.frame();
    println!(
        "{label}: {:?}, detent {:?}, visible {:.1}, frame y {:.1}..{:.1}, dimming {:.2}",
        sheet.presentation_state(),
        sheet.selected_detent_key().map(DetentKey::as_str),
        sheet.visible_height(),
        frame.y0,
        frame.y1,
        sheet.dimming_ratio(),
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let allow_dismiss = Rc::new(Cell::new(false));
    let handlers = SheetHandlers::default()
        .with_should_dismiss({
            let allow = allow_dismiss.clone();
            move || allow.get()
        })
        .with_did_attempt_to_dismiss(|| println!("  app: dismissal was attempted"))
        .with_did_change_selected_detent_key(|key| println!("  app: selected detent is now {key}"));

    let mut sheet = SheetController::new(SheetConfig {
        detents: vec![Detent::medium(), Detent::large()],
        selected_detent_key: Some(DetentKey::MEDIUM),
        largest_undimmed_detent_key: Some(DetentKey::MEDIUM),
        top_spacing: 10.0,
        ..SheetConfig::default()
    })
    .expect("valid sheet configuration")
    .with_handlers(handlers);
    sheet.set_metrics(
        SheetMetrics::new(Size::new(390.0, 844.0))
            .with_safe_area(Insets::new(0.0, 47.0, 0.0, 34.0)),
    );

    let mut host = SimulatedHost::default();

    println!("Present, and grab the sheet while it slides in");
    sheet.begin_presentation();
    host.animator_progress = 0.4;
    sheet.report_transition_progress(0.4);
    report("  mid-animation", &sheet);
    let outcome = drag(&mut sheet, &mut host, 600.0, 560.0, 6);
    println!("  outcome: {outcome:?}");
    sheet.complete_transition(true, &mut host);
    report("  presented", &sheet);

    println!("Flick up to the large detent");
    let outcome = drag(&mut sheet, &mut host, 500.0, 380.0, 4);
    println!("  outcome: {outcome:?}");
    report("  settled", &sheet);

    println!("Focus a text field; the keyboard slides up");
    let keyboard = KeyboardFrame::new(
        Rect::new(0.0, 508.0, 390.0, 844.0),
        Duration::from_millis(250),
        AnimationCurve::EaseInOut,
    );
    sheet.handle_keyboard_frame(&keyboard, true, &mut host);
    report("  keyboard up", &sheet);
    sheet.handle_keyboard_frame(&keyboard, false, &mut host);
    report("  keyboard down", &sheet);

    println!("Drag down hard while the app refuses to dismiss");
    let outcome = drag(&mut sheet, &mut host, 200.0, 800.0, 20);
    println!("  outcome: {outcome:?}");
    report("  snapped back", &sheet);

    println!("Allow dismissal and drag down again");
    allow_dismiss.set(true);
    let outcome = drag(&mut sheet, &mut host, 450.0, 840.0, 20);
    println!("  outcome: {outcome:?}");
    if outcome == GestureOutcome::TransitionFinished {
        sheet.complete_transition(true, &mut host);
    }
    report("  done", &sheet);
}
