//! Shared fixtures for the choreography tests: a hand-completed anchor, a
//! fixed screen, an event recorder, and a fully wired controller rig.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::animation::TestClock;
use crate::config::{Candidate, DropdownConfig};
use crate::controller::OverlayController;
use crate::geometry::{ScreenSize, WindowRect};
use crate::host::{AnchorHost, Listeners, MeasureDone, ScreenInfo};

/// Anchor whose measurements complete only when the test says so.
pub(crate) struct FakeAnchor {
    measures: RefCell<Vec<MeasureDone>>,
    pub focus_requests: Cell<usize>,
}

impl FakeAnchor {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            measures: RefCell::new(Vec::new()),
            focus_requests: Cell::new(0),
        })
    }

    pub fn pending(&self) -> usize {
        self.measures.borrow().len()
    }

    /// Complete the oldest outstanding measurement.
    pub fn complete_next(&self, rect: WindowRect) {
        let done = self.measures.borrow_mut().remove(0);
        done(rect);
    }
}

impl AnchorHost for FakeAnchor {
    fn measure_in_window(&self, done: MeasureDone) {
        self.measures.borrow_mut().push(done);
    }

    fn request_focus(&self) {
        self.focus_requests.set(self.focus_requests.get() + 1);
    }
}

pub(crate) struct FixedScreen {
    pub size: ScreenSize,
    pub top_offset: f32,
}

impl FixedScreen {
    pub fn phone() -> Rc<Self> {
        Rc::new(Self {
            size: ScreenSize {
                width: 360.0,
                height: 640.0,
            },
            top_offset: 2.0,
        })
    }
}

impl ScreenInfo for FixedScreen {
    fn size(&self) -> ScreenSize {
        self.size
    }

    fn top_offset(&self) -> f32 {
        self.top_offset
    }
}

pub(crate) struct Rig {
    pub controller: OverlayController,
    pub clock: Rc<TestClock>,
    pub anchor: Rc<FakeAnchor>,
    pub events: Rc<RefCell<Vec<String>>>,
}

/// Five candidates `a..e` labelled `A..E`.
pub(crate) fn abc_candidates() -> Vec<Candidate> {
    [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")]
        .into_iter()
        .map(|(v, l)| Candidate::labeled(v, l))
        .collect()
}

pub(crate) fn rig(candidates: Vec<Candidate>, initial: &str) -> Rig {
    rig_with(DropdownConfig::default(), candidates, initial)
}

pub(crate) fn rig_with(config: DropdownConfig, candidates: Vec<Candidate>, initial: &str) -> Rig {
    let clock = TestClock::new();
    let anchor = FakeAnchor::new();
    let events = Rc::new(RefCell::new(Vec::new()));

    let listeners = {
        let push = |events: &Rc<RefCell<Vec<String>>>, tag: &'static str| {
            let events = events.clone();
            move || events.borrow_mut().push(tag.to_string())
        };
        let change_events = events.clone();
        let select_events = events.clone();
        Listeners::new()
            .on_focus(push(&events, "focus"))
            .on_blur(push(&events, "blur"))
            .on_reveal(push(&events, "reveal"))
            .on_change_text(move |t| change_events.borrow_mut().push(format!("change:{t}")))
            .on_select(move |v| select_events.borrow_mut().push(format!("select:{v}")))
    };

    let controller = OverlayController::new(
        config,
        candidates,
        initial,
        anchor.clone(),
        FixedScreen::phone(),
        listeners,
        clock.clone(),
    )
    .expect("test config resolves");

    Rig {
        controller,
        clock,
        anchor,
        events,
    }
}
