//! Frame projection: controller state in, renderable geometry out.
//!
//! `overlay_frame` is a pure function of the controller's committed state.
//! It owns the responsibilities the core deliberately leaves open: clamping
//! the initial scroll offset to the real content extent, sizing the picker
//! box, and resolving per-row colours.

use dropline_core::{Color, OverlayController, Rect};

/// Everything the host needs to paint one overlay frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayFrame {
    /// Full-screen dismiss catcher behind the picker.
    pub backdrop: Rect,
    /// Placement for the host-supplied loading indicator, when configured.
    /// Present even with an empty candidate list; does not fade.
    pub spinner: Option<SpinnerFrame>,
    /// Absent while the candidate list is empty: the field stays focused
    /// but nothing floats.
    pub picker: Option<PickerFrame>,
}

/// Where the spinner node goes. Width and position track the picker box;
/// the content (and its height) comes from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinnerFrame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PickerFrame {
    pub rect: Rect,
    pub opacity: f32,
    /// Initial scroll, clamped into `[0, max_scroll]`.
    pub scroll_offset: f32,
    /// Scrolling is pointless when every row already fits.
    pub scroll_enabled: bool,
    /// Vertical inset between the picker edge and the first/last row.
    pub content_inset: f32,
    pub rows: Vec<RowFrame>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RowFrame {
    pub index: usize,
    pub label: String,
    pub color: Color,
    pub font_size: f32,
    pub height: f32,
    pub padding_left: f32,
    pub padding_right: f32,
}

/// Project the controller into a frame, or `None` while the overlay is
/// closed. Never mutates anything.
pub fn overlay_frame(controller: &OverlayController) -> Option<OverlayFrame> {
    if !controller.is_open() {
        return None;
    }
    let layout = controller.layout()?;
    let config = controller.config();
    let screen = controller.screen().size();

    let backdrop = Rect {
        x: 0.0,
        y: 0.0,
        w: screen.width,
        h: screen.height,
    };

    let spinner = config.show_spinner.then_some(SpinnerFrame {
        left: layout.left,
        top: layout.top,
        width: layout.width,
    });

    let candidates = controller.candidates();
    if candidates.is_empty() {
        return Some(OverlayFrame {
            backdrop,
            spinner,
            picker: None,
        });
    }

    let item_size = config.item_size();
    let height = 2.0 * config.item_padding + item_size * layout.visible_count as f32;
    let max_scroll = item_size * candidates.len().saturating_sub(layout.visible_count) as f32;
    let scroll_offset = layout.scroll_offset.clamp(0.0, max_scroll);
    if scroll_offset != layout.scroll_offset {
        log::debug!(
            "clamped scroll offset {} into [0, {max_scroll}]",
            layout.scroll_offset
        );
    }

    let selected = controller.selected_index();
    let rows = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| RowFrame {
            index,
            label: candidate.label.clone(),
            color: row_color(selected, index, config.selected_item_color, config.item_color),
            font_size: config.font_size,
            height: item_size,
            padding_left: layout.left_inset,
            padding_right: layout.right_inset,
        })
        .collect();

    Some(OverlayFrame {
        backdrop,
        spinner,
        picker: Some(PickerFrame {
            rect: Rect {
                x: layout.left,
                y: layout.top,
                w: layout.width,
                h: height,
            },
            opacity: controller.reveal_progress(),
            scroll_offset,
            scroll_enabled: layout.visible_count < candidates.len(),
            content_inset: config.item_padding,
            rows,
        }),
    })
}

/// With a selection, the selected row gets the highlight colour; without
/// one, every row does.
fn row_color(selected: Option<usize>, index: usize, highlight: Color, plain: Color) -> Color {
    match selected {
        Some(s) if s == index => highlight,
        Some(_) => plain,
        None => highlight,
    }
}
