//! # Dropdown placement and reveal choreography
//!
//! Dropline's core drives an autocomplete text field's overlay: where the
//! floating list appears, how large it is, which row is pre-scrolled into
//! view, and the timing of the show/hide transitions. There are three main
//! pieces:
//!
//! - [`geometry`]: pure placement math. Item sizing, visible/tail counts,
//!   the initial scroll offset, and viewport-clamped horizontal bounds.
//! - [`OverlayController`]: the phase machine sequencing measurement,
//!   layout commit, reveal, and focus, and the reverse on close.
//! - selection: row presses become committed values; keystrokes re-open
//!   the overlay.
//!
//! ## Driving the controller
//!
//! ```rust
//! use std::rc::Rc;
//! use dropline_core::*;
//! # use std::cell::RefCell;
//! # struct NoAnchor(RefCell<Vec<MeasureDone>>);
//! # impl AnchorHost for NoAnchor {
//! #     fn measure_in_window(&self, done: MeasureDone) { self.0.borrow_mut().push(done); }
//! #     fn request_focus(&self) {}
//! # }
//! # struct Phone;
//! # impl ScreenInfo for Phone {
//! #     fn size(&self) -> ScreenSize { ScreenSize { width: 360.0, height: 640.0 } }
//! #     fn top_offset(&self) -> f32 { 2.0 }
//! # }
//!
//! let anchor = Rc::new(NoAnchor(RefCell::new(Vec::new())));
//! let controller = OverlayController::new(
//!     DropdownConfig::default(),
//!     vec![
//!         Candidate::labeled("nl", "Netherlands"),
//!         Candidate::new("no"),
//!     ],
//!     "",
//!     anchor.clone(),
//!     Rc::new(Phone),
//!     Listeners::new().on_select(|v| println!("picked {v}")),
//!     Rc::new(SystemClock),
//! )?;
//!
//! controller.change_text("n"); // keystroke: commits text, requests measurement
//! # let done = anchor.0.borrow_mut().remove(0);
//! # done(WindowRect { x: 40.0, y: 80.0, width: 240.0, height: 56.0 });
//! assert!(controller.is_open()); // layout committed on measurement completion
//! controller.tick();             // advance timers + the reveal fade each frame
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! The host supplies the collaborators: an [`AnchorHost`] that measures the
//! field and moves input focus, and a [`ScreenInfo`] for the screen bounds
//! the placement clamps against. Every deferred completion is guarded by a
//! weak handle and an open-epoch, so callbacks landing after teardown or
//! after a newer open are silent no-ops.
//!
//! Rendering is a projection of this state (see `dropline-ui`); nothing in
//! a render pass feeds back into the controller.

pub mod animation;
pub mod color;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod host;
pub mod schedule;
pub mod selection;
pub mod signal;

#[cfg(test)]
pub(crate) mod testing;

pub use animation::{AnimatedValue, AnimationSpec, Clock, Easing, Interpolate, SystemClock, TestClock};
pub use color::Color;
pub use config::{Candidate, ConfigError, DropdownConfig, ResolvedCandidate, ResolvedConfig};
pub use controller::{OverlayController, OverlayLayout, Phase};
pub use geometry::{
    HorizontalPlacement, ListPosition, MAX_MARGIN, MIN_MARGIN, Rect, ScreenSize, Vec2, WindowRect,
};
pub use host::{AnchorHost, Listeners, MeasureDone, ScreenInfo};
pub use schedule::Scheduler;
pub use signal::{Signal, SubId, signal};
