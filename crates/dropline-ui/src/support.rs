//! Test fixtures: an instantly-completing anchor and pre-opened controllers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dropline_core::{
    AnchorHost, Candidate, DropdownConfig, Listeners, MeasureDone, OverlayController, ScreenInfo,
    ScreenSize, TestClock, WindowRect,
};

pub const RECT: WindowRect = WindowRect {
    x: 40.0,
    y: 80.0,
    width: 240.0,
    height: 56.0,
};

pub struct InstantAnchor {
    pub rect: Cell<WindowRect>,
    pub focus_requests: Cell<usize>,
    pending: RefCell<Vec<MeasureDone>>,
}

impl InstantAnchor {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(RECT),
            focus_requests: Cell::new(0),
            pending: RefCell::new(Vec::new()),
        })
    }

    /// Deliver every queued measurement with the current rect.
    pub fn flush(&self) {
        let queued: Vec<MeasureDone> = self.pending.borrow_mut().drain(..).collect();
        for done in queued {
            done(self.rect.get());
        }
    }
}

impl AnchorHost for InstantAnchor {
    fn measure_in_window(&self, done: MeasureDone) {
        self.pending.borrow_mut().push(done);
    }

    fn request_focus(&self) {
        self.focus_requests.set(self.focus_requests.get() + 1);
    }
}

pub struct Phone;

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

pub struct Setup {
    pub controller: OverlayController,
    pub clock: Rc<TestClock>,
    pub anchor: Rc<InstantAnchor>,
}

pub fn candidates() -> Vec<Candidate> {
    [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")]
        .into_iter()
        .map(|(v, l)| Candidate::labeled(v, l))
        .collect()
}

pub fn fresh() -> Setup {
    fresh_with(DropdownConfig::default(), candidates(), "")
}

pub fn fresh_with(config: DropdownConfig, candidates: Vec<Candidate>, initial: &str) -> Setup {
    let clock = TestClock::new();
    let anchor = InstantAnchor::new();
    let controller = OverlayController::new(
        config,
        candidates,
        initial,
        anchor.clone(),
        Rc::new(Phone),
        Listeners::new(),
        clock.clone(),
    )
    .expect("fixture config resolves");
    Setup {
        controller,
        clock,
        anchor,
    }
}

/// Open all the way through the reveal.
pub fn open_fully(s: &Setup) {
    let dur = s.controller.config().animation_duration;
    s.controller.open();
    s.anchor.flush();
    s.clock.advance(dur);
    s.controller.tick();
    s.clock.advance(dur);
    s.controller.tick();
    debug_assert_eq!(s.controller.reveal_progress(), 1.0);
}

pub fn opened(initial: &str) -> Setup {
    opened_with(DropdownConfig::default(), initial)
}

pub fn opened_with(config: DropdownConfig, initial: &str) -> Setup {
    let s = fresh_with(config, candidates(), initial);
    open_fully(&s);
    s
}

pub fn opened_candidates(candidates: Vec<Candidate>, initial: &str) -> Setup {
    let s = fresh_with(DropdownConfig::default(), candidates, initial);
    open_fully(&s);
    s
}

pub fn opened_empty() -> Setup {
    let s = fresh_with(DropdownConfig::default(), Vec::new(), "");
    s.controller.open();
    s.anchor.flush();
    s
}
