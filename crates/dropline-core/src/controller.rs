//! Overlay controller: owns the field state and sequences the open/close
//! choreography.
//!
//! Opening runs measurement → atomic layout commit → bounded-latency reveal
//! gate → fade-in → focus request. Closing runs fade-out → blur → state
//! commit → completion callback (or dismiss-clear). All deferred work
//! captures a weak handle plus the open-epoch current at request time and
//! silently no-ops when either has moved on; rendering is a pure projection
//! of the state held here and never feeds back into it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_time::Instant;

use crate::animation::{AnimatedValue, AnimationSpec, Clock};
use crate::config::{Candidate, ConfigError, DropdownConfig, ResolvedCandidate, ResolvedConfig};
use crate::geometry::{self, WindowRect};
use crate::host::{AnchorHost, Listeners, ScreenInfo};
use crate::schedule::Scheduler;
use crate::signal::{Signal, signal};

/// Where the overlay is in its lifecycle. `Measuring`, `LayoutCommitted`,
/// and the two fades are transient; every transition is logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    /// Waiting for the anchor's window-relative measurement.
    Measuring,
    /// Layout is committed and visible-state is on; the reveal gate has not
    /// elapsed yet.
    LayoutCommitted,
    /// Fade-in running.
    Revealing,
    Open,
    /// Fade-out running.
    Closing,
}

/// Placement committed in one go before any reveal starts. Recomputed from
/// a fresh measurement on every open; discarded on close.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayLayout {
    pub left: f32,
    pub width: f32,
    pub top: f32,
    pub left_inset: f32,
    pub right_inset: f32,
    /// Unclamped initial scroll offset; the presentation clamps it.
    pub scroll_offset: f32,
    pub visible_count: usize,
    pub anchor: WindowRect,
}

/// Cloneable handle; the last clone dropping tears the controller down, at
/// which point any still-in-flight completion becomes a silent no-op.
#[derive(Clone)]
pub struct OverlayController {
    pub(crate) inner: Rc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) config: ResolvedConfig,
    pub(crate) candidates: RefCell<Vec<ResolvedCandidate>>,
    pub(crate) listeners: Listeners,
    pub(crate) anchor: Rc<dyn AnchorHost>,
    screen: Rc<dyn ScreenInfo>,
    pub(crate) scheduler: Scheduler,
    clock: Rc<dyn Clock>,

    phase: Cell<Phase>,
    /// Bumped on every open and close; deferred callbacks compare against
    /// the value they captured and drop themselves when it moved on.
    epoch: Cell<u64>,
    pub(crate) text: Signal<String>,
    open: Signal<bool>,
    reveal: RefCell<AnimatedValue<f32>>,
    layout: Cell<Option<OverlayLayout>>,
    pending_close: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl OverlayController {
    pub fn new(
        config: DropdownConfig,
        candidates: Vec<Candidate>,
        initial_value: impl Into<String>,
        anchor: Rc<dyn AnchorHost>,
        screen: Rc<dyn ScreenInfo>,
        listeners: Listeners,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let config = config.resolve()?;
        let reveal = AnimatedValue::new(0.0, AnimationSpec::fade(config.animation_duration));
        Ok(Self {
            inner: Rc::new(Inner {
                config,
                candidates: RefCell::new(
                    candidates.into_iter().map(Candidate::resolve).collect(),
                ),
                listeners,
                anchor,
                screen,
                scheduler: Scheduler::new(clock.clone()),
                clock,
                phase: Cell::new(Phase::Closed),
                epoch: Cell::new(0),
                text: signal(initial_value.into()),
                open: signal(false),
                reveal: RefCell::new(reveal),
                layout: Cell::new(None),
                pending_close: RefCell::new(None),
            }),
        })
    }

    /// Start the open choreography. No-op when disabled; idempotent while
    /// already opening or open (re-measures, never stacks a second fade).
    pub fn open(&self) {
        Inner::open(&self.inner);
    }

    /// Dismiss: fade out, notify blur once, clear the field text and report
    /// an empty selection.
    pub fn close(&self) {
        Inner::close_with(&self.inner, None);
    }

    /// Close and run `f` once the overlay is visually gone, instead of the
    /// dismiss-clear behaviour.
    pub fn close_then(&self, f: impl FnOnce() + 'static) {
        Inner::close_with(&self.inner, Some(Box::new(f)));
    }

    /// Advance timers and the reveal fade. The embedding calls this once
    /// per frame.
    pub fn tick(&self) {
        self.inner.scheduler.tick();
        Inner::advance_animation(&self.inner);
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    pub fn text(&self) -> String {
        self.inner.text.get()
    }

    /// Observable field text, for embeddings that re-render on change.
    pub fn text_signal(&self) -> Signal<String> {
        self.inner.text.clone()
    }

    pub fn open_signal(&self) -> Signal<bool> {
        self.inner.open.clone()
    }

    /// Reflect an externally controlled value into the field, bypassing the
    /// change notification.
    pub fn set_value(&self, value: impl Into<String>) {
        self.inner.text.set(value.into());
    }

    pub fn set_candidates(&self, candidates: Vec<Candidate>) {
        *self.inner.candidates.borrow_mut() =
            candidates.into_iter().map(Candidate::resolve).collect();
    }

    pub fn candidates(&self) -> Vec<ResolvedCandidate> {
        self.inner.candidates.borrow().clone()
    }

    /// Index of the candidate whose value equals the current text, derived
    /// on demand and never cached.
    pub fn selected_index(&self) -> Option<usize> {
        self.inner.selected_index()
    }

    pub fn selected_item(&self) -> Option<ResolvedCandidate> {
        let idx = self.inner.selected_index()?;
        self.inner.candidates.borrow().get(idx).cloned()
    }

    pub fn reveal_progress(&self) -> f32 {
        *self.inner.reveal.borrow().get()
    }

    pub fn layout(&self) -> Option<OverlayLayout> {
        self.inner.layout.get()
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.inner.config
    }

    pub fn screen(&self) -> &Rc<dyn ScreenInfo> {
        &self.inner.screen
    }
}

impl Inner {
    fn set_phase(&self, next: Phase) {
        let prev = self.phase.replace(next);
        if prev != next {
            log::debug!("overlay phase: {prev:?} -> {next:?}");
        }
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.text
            .with(|t| self.candidates.borrow().iter().position(|c| &c.value == t))
    }

    pub(crate) fn open(self: &Rc<Self>) {
        if self.config.disabled {
            log::debug!("open ignored: field is disabled");
            return;
        }

        // Focus notification precedes any geometry work, even with an
        // empty candidate list.
        self.listeners.focus();

        let started = self.clock.now();
        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);

        match self.phase.get() {
            Phase::Closed | Phase::Closing => {
                // An open interrupting a close abandons the close and its
                // completion callback.
                self.pending_close.borrow_mut().take();
                self.set_phase(Phase::Measuring);
            }
            // Already opening or open: the fresh measurement below refreshes
            // layout without restarting the choreography.
            _ => {}
        }

        let weak = Rc::downgrade(self);
        self.anchor.measure_in_window(Box::new(move |rect| {
            let Some(inner) = weak.upgrade() else {
                log::debug!("dropping measurement completion after teardown");
                return;
            };
            if inner.epoch.get() != epoch {
                log::debug!("dropping superseded measurement completion");
                return;
            }
            Inner::commit_measurement(&inner, rect, started, epoch);
        }));
    }

    fn commit_measurement(self: &Rc<Self>, rect: WindowRect, started: Instant, epoch: u64) {
        let screen = self.screen.size();
        let count = self.candidates.borrow().len();
        let visible = geometry::visible_item_count(count, self.config.item_count);
        let tail = geometry::tail_item_count(visible);
        let item_size = self.config.item_size();
        let offset = geometry::scroll_offset(
            count,
            visible,
            tail,
            self.selected_index(),
            self.config.position,
            item_size,
        );
        let hp = geometry::horizontal_placement(rect.x, rect.width, screen.width);
        let top = geometry::vertical_top(rect.y, self.screen.top_offset(), self.config.label_height);

        // Single commit: clipping box and position are both right at first
        // paint, before any fade starts.
        self.layout.set(Some(OverlayLayout {
            left: hp.left,
            width: hp.width,
            top,
            left_inset: hp.left_inset,
            right_inset: hp.right_inset,
            scroll_offset: offset,
            visible_count: visible,
            anchor: rect,
        }));
        self.open.set(true);

        if count == 0 {
            // Nothing to reveal; focus moves into the field right away.
            let was_open = self.phase.get() == Phase::Open;
            self.set_phase(Phase::Open);
            if !was_open {
                self.anchor.request_focus();
            }
            return;
        }

        match self.phase.get() {
            Phase::Measuring | Phase::LayoutCommitted => {
                self.set_phase(Phase::LayoutCommitted);
                // Total visible-open latency stays bounded by the configured
                // duration no matter how slow the measurement was.
                let elapsed = self.clock.now().saturating_duration_since(started);
                let gate = self.config.animation_duration.saturating_sub(elapsed);
                let weak = Rc::downgrade(self);
                self.scheduler.run_after(gate, move || {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    if inner.epoch.get() != epoch {
                        log::debug!("dropping superseded reveal gate");
                        return;
                    }
                    inner.begin_reveal();
                });
            }
            // Re-open while revealing or open: layout refreshed above, no
            // second fade, no duplicate focus request.
            _ => {}
        }
    }

    fn begin_reveal(self: &Rc<Self>) {
        self.set_phase(Phase::Revealing);
        let now = self.clock.now();
        self.reveal.borrow_mut().set_target(1.0, now);
    }

    pub(crate) fn close_with(self: &Rc<Self>, on_closed: Option<Box<dyn FnOnce()>>) {
        self.epoch.set(self.epoch.get() + 1);
        match self.phase.get() {
            Phase::Closed => {
                // Nothing to fade and blur already happened; still honour a
                // completion callback so a late selection finalises.
                if let Some(cb) = on_closed {
                    cb();
                }
            }
            Phase::Closing => {
                // Already fading out; at most adopt the new completion.
                if on_closed.is_some() {
                    *self.pending_close.borrow_mut() = on_closed;
                }
            }
            _ => {
                *self.pending_close.borrow_mut() = on_closed;
                self.set_phase(Phase::Closing);
                let now = self.clock.now();
                self.reveal.borrow_mut().set_target(0.0, now);
            }
        }
    }

    fn advance_animation(self: &Rc<Self>) {
        let now = self.clock.now();
        let in_flight = self.reveal.borrow_mut().update(now);
        if in_flight {
            return;
        }
        match self.phase.get() {
            Phase::Revealing => {
                self.set_phase(Phase::Open);
                // Reveal notification first (scroll-indicator flash and the
                // like), then focus, matching the visible order on screen.
                self.listeners.reveal();
                self.anchor.request_focus();
            }
            Phase::Closing => self.finish_close(),
            _ => {}
        }
    }

    fn finish_close(self: &Rc<Self>) {
        self.listeners.blur();
        self.open.set(false);
        self.layout.set(None);
        self.set_phase(Phase::Closed);

        let cb = self.pending_close.borrow_mut().take();
        if let Some(cb) = cb {
            cb();
        } else {
            // Dismissed without a pick: the cleared value is reported.
            self.text.set(String::new());
            self.listeners.select("");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ListPosition, MAX_MARGIN};
    use crate::testing::{Rig, abc_candidates, rig, rig_with};
    use web_time::Duration;

    const DUR: Duration = Duration::from_millis(225);
    const RECT: WindowRect = WindowRect {
        x: 40.0,
        y: 80.0,
        width: 240.0,
        height: 56.0,
    };

    fn auto_config() -> DropdownConfig {
        DropdownConfig {
            item_count: 3,
            position: ListPosition::Auto,
            ..DropdownConfig::default()
        }
    }

    fn open_fully(r: &Rig) {
        r.controller.open();
        r.anchor.complete_next(RECT);
        r.clock.advance(DUR);
        r.controller.tick(); // gate fires, fade starts
        r.clock.advance(DUR);
        r.controller.tick(); // fade completes
    }

    #[test]
    fn focus_notification_precedes_measurement() {
        let r = rig(abc_candidates(), "");
        r.controller.open();
        assert_eq!(*r.events.borrow(), vec!["focus"]);
        assert_eq!(r.anchor.pending(), 1);
        assert!(!r.controller.is_open());
    }

    #[test]
    fn disabled_field_never_opens() {
        let config = DropdownConfig {
            disabled: true,
            ..DropdownConfig::default()
        };
        let r = rig_with(config, abc_candidates(), "");
        r.controller.open();
        assert!(r.events.borrow().is_empty());
        assert_eq!(r.anchor.pending(), 0);
        assert_eq!(r.controller.phase(), Phase::Closed);
    }

    #[test]
    fn full_open_choreography() {
        let r = rig_with(auto_config(), abc_candidates(), "c");
        r.controller.open();
        assert_eq!(r.controller.phase(), Phase::Measuring);

        r.anchor.complete_next(RECT);

        // Layout committed atomically, before any fade.
        assert!(r.controller.is_open());
        assert_eq!(r.controller.phase(), Phase::LayoutCommitted);
        assert_eq!(r.controller.reveal_progress(), 0.0);
        assert_eq!(r.anchor.focus_requests.get(), 0);

        let layout = r.controller.layout().unwrap();
        assert_eq!(layout.left, 24.0);
        assert_eq!(layout.width, 272.0);
        assert_eq!(layout.top, 114.0); // 80 + 2 (platform) + 32 (label)
        assert_eq!(layout.left_inset, MAX_MARGIN);
        assert_eq!(layout.visible_count, 3);
        assert_eq!(layout.scroll_offset, 40.0); // one row of context above "c"

        // Gate has not elapsed: still no fade.
        r.controller.tick();
        assert_eq!(r.controller.phase(), Phase::LayoutCommitted);

        r.clock.advance(DUR);
        r.controller.tick();
        assert_eq!(r.controller.phase(), Phase::Revealing);

        r.clock.advance(DUR);
        r.controller.tick();
        assert_eq!(r.controller.phase(), Phase::Open);
        assert_eq!(r.controller.reveal_progress(), 1.0);
        assert_eq!(r.anchor.focus_requests.get(), 1);
    }

    #[test]
    fn reveal_notification_fires_once_after_the_fade() {
        let r = rig(abc_candidates(), "");
        r.controller.open();
        r.anchor.complete_next(RECT);
        r.clock.advance(DUR);
        r.controller.tick();
        // Still fading: no notification yet.
        assert!(!r.events.borrow().contains(&"reveal".to_string()));

        r.clock.advance(DUR);
        r.controller.tick();
        assert_eq!(*r.events.borrow(), vec!["focus", "reveal"]);

        // A refresh of an already-open overlay does not re-announce.
        r.controller.open();
        r.anchor.complete_next(RECT);
        r.clock.advance(DUR);
        r.controller.tick();
        let events = r.events.borrow().clone();
        assert_eq!(
            events.iter().filter(|e| *e == "reveal").count(),
            1,
            "events: {events:?}"
        );
    }

    #[test]
    fn slow_measurement_collapses_the_reveal_gate() {
        let r = rig(abc_candidates(), "");
        r.controller.open();
        r.clock.advance(Duration::from_millis(400));
        r.anchor.complete_next(RECT);
        // Measurement already ate the whole latency budget: gate is zero.
        r.controller.tick();
        assert_eq!(r.controller.phase(), Phase::Revealing);
    }

    #[test]
    fn empty_list_skips_fade_and_focuses_immediately() {
        let r = rig(Vec::new(), "");
        r.controller.open();
        assert_eq!(*r.events.borrow(), vec!["focus"]);
        r.anchor.complete_next(RECT);
        assert!(r.controller.is_open());
        assert_eq!(r.controller.phase(), Phase::Open);
        assert_eq!(r.controller.reveal_progress(), 0.0);
        assert_eq!(r.anchor.focus_requests.get(), 1);
        assert!(r.controller.inner.scheduler.is_idle());
        // No fade means no reveal notification either.
        assert_eq!(*r.events.borrow(), vec!["focus"]);
    }

    #[test]
    fn reopen_while_open_is_idempotent() {
        let r = rig(abc_candidates(), "");
        open_fully(&r);
        assert_eq!(r.anchor.focus_requests.get(), 1);

        r.controller.open();
        r.anchor.complete_next(RECT);
        r.clock.advance(DUR);
        r.controller.tick();
        r.clock.advance(DUR);
        r.controller.tick();

        assert_eq!(r.controller.phase(), Phase::Open);
        assert_eq!(r.controller.reveal_progress(), 1.0);
        assert_eq!(r.anchor.focus_requests.get(), 1);
        assert!(r.controller.layout().is_some());
    }

    #[test]
    fn second_open_supersedes_first_measurement() {
        let r = rig(abc_candidates(), "");
        r.controller.open();
        r.controller.open();
        assert_eq!(r.anchor.pending(), 2);

        // The first completion belongs to a superseded epoch.
        r.anchor.complete_next(WindowRect {
            x: 999.0,
            ..RECT
        });
        assert!(!r.controller.is_open());
        assert!(r.controller.layout().is_none());

        r.anchor.complete_next(RECT);
        assert!(r.controller.is_open());
        assert_eq!(r.controller.layout().unwrap().left, 24.0);
    }

    #[test]
    fn double_close_notifies_blur_once() {
        let r = rig(abc_candidates(), "c");
        open_fully(&r);
        r.events.borrow_mut().clear();

        r.controller.close();
        r.controller.close();
        r.clock.advance(DUR);
        r.controller.tick();

        let events = r.events.borrow().clone();
        assert_eq!(
            events.iter().filter(|e| *e == "blur").count(),
            1,
            "events: {events:?}"
        );
        assert!(!r.controller.is_open());
        assert_eq!(r.controller.phase(), Phase::Closed);

        // Nothing left over: another tick changes nothing.
        r.clock.advance(DUR);
        r.controller.tick();
        assert_eq!(r.events.borrow().iter().filter(|e| *e == "blur").count(), 1);
    }

    #[test]
    fn dismiss_without_selection_clears_and_reports_empty() {
        let r = rig(abc_candidates(), "c");
        open_fully(&r);
        r.events.borrow_mut().clear();

        r.controller.close();
        r.clock.advance(DUR);
        r.controller.tick();

        assert_eq!(r.controller.text(), "");
        assert_eq!(*r.events.borrow(), vec!["blur", "select:"]);
    }

    #[test]
    fn close_during_measurement_is_safe() {
        let r = rig(abc_candidates(), "");
        r.controller.open();
        r.controller.close();
        r.anchor.complete_next(RECT); // superseded by the close
        assert!(!r.controller.is_open());

        r.clock.advance(DUR);
        r.controller.tick();
        assert_eq!(r.controller.phase(), Phase::Closed);
        assert_eq!(r.events.borrow().iter().filter(|e| *e == "blur").count(), 1);
    }

    #[test]
    fn measurement_after_teardown_is_a_silent_noop() {
        let r = rig(abc_candidates(), "");
        r.controller.open();
        let anchor = r.anchor.clone();
        drop(r.controller);
        // Must neither mutate anything nor panic.
        anchor.complete_next(RECT);
    }

    #[test]
    fn external_value_reflects_into_field_state() {
        let r = rig(abc_candidates(), "a");
        assert_eq!(r.controller.selected_index(), Some(0));
        r.controller.set_value("d");
        assert_eq!(r.controller.text(), "d");
        assert_eq!(r.controller.selected_index(), Some(3));
        assert_eq!(r.controller.selected_item().unwrap().label, "D");
        assert!(r.events.borrow().is_empty());

        r.controller.set_value("nope");
        assert_eq!(r.controller.selected_index(), None);
    }

    #[test]
    fn candidate_swap_rederives_selection() {
        let r = rig(abc_candidates(), "c");
        assert_eq!(r.controller.selected_index(), Some(2));
        r.controller
            .set_candidates(vec![Candidate::new("x"), Candidate::new("c")]);
        assert_eq!(r.controller.selected_index(), Some(1));
    }
}
