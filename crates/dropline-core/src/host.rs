//! Contracts with the external collaborators: the anchor field widget, the
//! platform's screen metrics, and the caller's notifications.
//!
//! The controller never talks to a real widget toolkit; it drives these
//! traits and lets the embedding supply the platform behaviour.

use std::rc::Rc;

use crate::geometry::{ScreenSize, WindowRect};

pub type MeasureDone = Box<dyn FnOnce(WindowRect)>;

/// The visual field the overlay is positioned against.
pub trait AnchorHost {
    /// Request the anchor's bounds in window coordinates. The completion may
    /// arrive after an arbitrary delay; it is delivered at most once.
    fn measure_in_window(&self, done: MeasureDone);

    /// Ask the platform to move input focus into the anchor field.
    fn request_focus(&self);
}

/// Screen metrics the placement math clamps against.
pub trait ScreenInfo {
    fn size(&self) -> ScreenSize;

    /// Platform-dependent vertical nudge added to the overlay top
    /// (historically 1px on iOS, 2px on Android).
    fn top_offset(&self) -> f32;
}

/// Optional caller notifications. Absent callbacks are no-ops, never errors.
#[derive(Clone, Default)]
pub struct Listeners {
    pub on_focus: Option<Rc<dyn Fn()>>,
    pub on_blur: Option<Rc<dyn Fn()>>,
    pub on_change_text: Option<Rc<dyn Fn(&str)>>,
    pub on_select: Option<Rc<dyn Fn(&str)>>,
    /// Fired once when the fade-in completes, just before focus moves into
    /// the field. Hosts use it for post-reveal niceties such as flashing
    /// the picker's scroll indicators.
    pub on_reveal: Option<Rc<dyn Fn()>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_focus(mut self, f: impl Fn() + 'static) -> Self {
        self.on_focus = Some(Rc::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl Fn() + 'static) -> Self {
        self.on_blur = Some(Rc::new(f));
        self
    }

    pub fn on_change_text(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_change_text = Some(Rc::new(f));
        self
    }

    pub fn on_select(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_select = Some(Rc::new(f));
        self
    }

    pub fn on_reveal(mut self, f: impl Fn() + 'static) -> Self {
        self.on_reveal = Some(Rc::new(f));
        self
    }

    pub(crate) fn focus(&self) {
        if let Some(f) = &self.on_focus {
            f();
        }
    }

    pub(crate) fn blur(&self) {
        if let Some(f) = &self.on_blur {
            f();
        }
    }

    pub(crate) fn change_text(&self, text: &str) {
        if let Some(f) = &self.on_change_text {
            f(text);
        }
    }

    pub(crate) fn select(&self, value: &str) {
        if let Some(f) = &self.on_select {
            f(value);
        }
    }

    pub(crate) fn reveal(&self) {
        if let Some(f) = &self.on_reveal {
            f();
        }
    }
}
