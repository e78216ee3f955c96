//! Headless drive of the autocomplete overlay: types into the field, steps
//! the clock through the reveal, presses a row, and logs every frame along
//! the way. Run with `RUST_LOG=debug` to see the phase transitions too.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use dropline_core::{
    AnchorHost, Candidate, DropdownConfig, ListPosition, Listeners, MeasureDone,
    OverlayController, ScreenInfo, ScreenSize, TestClock, Vec2, WindowRect,
};
use dropline_ui::{PressOutcome, dispatch_press, overlay_frame};
use web_time::Duration;

/// A stand-in anchor field: measurements complete on `flush`, focus
/// requests just get logged.
struct DemoAnchor {
    pending: RefCell<Vec<MeasureDone>>,
}

impl DemoAnchor {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            pending: RefCell::new(Vec::new()),
        })
    }

    fn flush(&self) {
        let queued: Vec<MeasureDone> = self.pending.borrow_mut().drain(..).collect();
        for done in queued {
            done(WindowRect {
                x: 40.0,
                y: 80.0,
                width: 280.0,
                height: 56.0,
            });
        }
    }
}

impl AnchorHost for DemoAnchor {
    fn measure_in_window(&self, done: MeasureDone) {
        self.pending.borrow_mut().push(done);
    }

    fn request_focus(&self) {
        log::info!("focus moved into the field");
    }
}

struct Phone;

impl ScreenInfo for Phone {
    fn size(&self) -> ScreenSize {
        ScreenSize {
            width: 360.0,
            height: 640.0,
        }
    }

    fn top_offset(&self) -> f32 {
        2.0
    }
}

fn cities() -> Vec<Candidate> {
    [
        ("ams", "Amsterdam"),
        ("rtm", "Rotterdam"),
        ("utc", "Utrecht"),
        ("ein", "Eindhoven"),
        ("gvc", "The Hague"),
        ("grq", "Groningen"),
    ]
    .into_iter()
    .map(|(v, l)| Candidate::labeled(v, l))
    .collect()
}

/// Step the clock in small increments, logging the frame whenever its
/// opacity changes.
fn pump(controller: &OverlayController, clock: &TestClock, total: Duration) {
    let step = Duration::from_millis(25);
    let mut elapsed = Duration::ZERO;
    let mut last_opacity = f32::NAN;
    while elapsed < total {
        clock.advance(step);
        elapsed += step;
        controller.tick();
        match overlay_frame(controller) {
            Some(frame) => {
                if let Some(picker) = &frame.picker
                    && picker.opacity != last_opacity
                {
                    last_opacity = picker.opacity;
                    log::info!(
                        "picker at ({}, {}) {}x{} opacity {:.2} scroll {}",
                        picker.rect.x,
                        picker.rect.y,
                        picker.rect.w,
                        picker.rect.h,
                        picker.opacity,
                        picker.scroll_offset,
                    );
                }
            }
            None => last_opacity = f32::NAN,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let clock = TestClock::new();
    let anchor = DemoAnchor::new();
    let listeners = Listeners::new()
        .on_change_text(|t| log::info!("field text: {t:?}"))
        .on_select(|v| log::info!("selection committed: {v:?}"));

    let controller = OverlayController::new(
        DropdownConfig {
            item_count: 3,
            position: ListPosition::Auto,
            ..DropdownConfig::default()
        },
        cities(),
        "",
        anchor.clone(),
        Rc::new(Phone),
        listeners,
        clock.clone(),
    )?;

    // A keystroke lands: text commits, the overlay starts measuring.
    controller.change_text("rtm");
    anchor.flush();
    log::info!(
        "layout committed, open = {}, phase = {:?}",
        controller.is_open(),
        controller.phase()
    );

    // Reveal gate + fade-in.
    pump(&controller, &clock, Duration::from_millis(500));

    // Press the second visible row.
    let frame = overlay_frame(&controller).expect("overlay is open");
    let outcome = dispatch_press(&controller, &frame, Vec2 { x: 100.0, y: 170.0 });
    log::info!("press outcome: {outcome:?}");
    assert!(matches!(outcome, PressOutcome::Row(_)));

    // Grace period, fade-out, and the committed value.
    pump(&controller, &clock, Duration::from_millis(500));
    log::info!(
        "field shows {:?}, overlay open = {}",
        controller.text(),
        controller.is_open()
    );

    Ok(())
}
