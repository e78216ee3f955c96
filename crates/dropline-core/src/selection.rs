//! Selection coordinator: turns a pressed row into a committed value, and
//! routes keystrokes back into the open choreography.
//!
//! The visible field text always ends up showing the candidate's *label*;
//! the caller's selection notification always receives its *value*. The two
//! may differ and are never conflated.

use std::rc::Rc;

use crate::controller::{Inner, OverlayController};

impl OverlayController {
    /// Finalise the candidate at `index`. Out-of-range indices indicate a
    /// desync between the rendered rows and the candidate list and are a
    /// programming error.
    ///
    /// The close starts only after one animation-duration grace period, so
    /// the pressed row's own feedback can finish; the value lands once the
    /// overlay is visually gone.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the current candidate list.
    pub fn select_candidate(&self, index: usize) {
        let (value, label) = {
            let candidates = self.inner.candidates.borrow();
            let len = candidates.len();
            let picked = candidates
                .get(index)
                .unwrap_or_else(|| panic!("candidate index {index} out of range (len {len})"));
            (picked.value.clone(), picked.label.clone())
        };
        log::debug!("row {index} pressed: value={value:?} label={label:?}");

        let weak = Rc::downgrade(&self.inner);
        self.inner
            .scheduler
            .run_after(self.inner.config.animation_duration, move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let finalize = Rc::downgrade(&inner);
                Inner::close_with(
                    &inner,
                    Some(Box::new(move || {
                        if let Some(inner) = finalize.upgrade() {
                            inner.text.set(label);
                            inner.listeners.select(&value);
                        }
                    })),
                );
            });
    }

    /// Keystroke path: commit the text synchronously, forward it to the
    /// caller, and re-open the overlay against the new text.
    pub fn change_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.text.set(text.clone());
        self.inner.listeners.change_text(&text);
        Inner::open(&self.inner);
    }
}
