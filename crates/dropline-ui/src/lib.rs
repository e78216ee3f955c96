//! Presentation layer for the dropdown overlay.
//!
//! Rendering is a side-effect-free projection: [`overlay_frame`] reads the
//! controller's committed state and produces plain geometry (backdrop,
//! picker box, styled rows) for the host toolkit to paint. Input flows the
//! other way through [`dispatch_press`], which maps a press point to a row
//! selection or a backdrop dismiss.
//!
//! ```rust,ignore
//! // Once per frame in the host's paint loop:
//! controller.tick();
//! if let Some(frame) = overlay_frame(&controller) {
//!     paint_backdrop(frame.backdrop);
//!     if let Some(picker) = &frame.picker {
//!         paint_picker(picker);
//!     }
//! }
//! ```

pub mod frame;
pub mod item;

#[cfg(test)]
pub(crate) mod support;

pub use frame::{OverlayFrame, PickerFrame, RowFrame, SpinnerFrame, overlay_frame};
pub use item::{PressOutcome, dispatch_press, row_at};
