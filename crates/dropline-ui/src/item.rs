//! Row hit-testing and press dispatch.
//!
//! The visual row widget is supplied by the host; this module maps a press
//! point back to a candidate index (accounting for the picker's scroll and
//! content inset) and routes it into the selection coordinator, or into a
//! dismiss when the press lands on the backdrop.

use dropline_core::{OverlayController, Vec2};

use crate::frame::{OverlayFrame, PickerFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// A row was pressed; selection choreography started.
    Row(usize),
    /// The press landed outside the picker; the overlay is closing.
    Dismissed,
    /// Overlay not showing a picker and press outside the backdrop.
    Ignored,
}

/// Candidate index under `point`, if any.
pub fn row_at(picker: &PickerFrame, point: Vec2) -> Option<usize> {
    if !picker.rect.contains(point) {
        return None;
    }
    let item_size = picker.rows.first()?.height;
    let y = point.y - picker.rect.y - picker.content_inset + picker.scroll_offset;
    if y < 0.0 {
        return None;
    }
    let index = (y / item_size) as usize;
    (index < picker.rows.len()).then_some(index)
}

/// Route a press through the frame: rows select, everything else inside the
/// backdrop dismisses.
pub fn dispatch_press(
    controller: &OverlayController,
    frame: &OverlayFrame,
    point: Vec2,
) -> PressOutcome {
    if let Some(picker) = &frame.picker
        && let Some(index) = row_at(picker, point)
    {
        controller.select_candidate(index);
        return PressOutcome::Row(index);
    }
    if frame.backdrop.contains(point) {
        controller.close();
        return PressOutcome::Dismissed;
    }
    PressOutcome::Ignored
}
