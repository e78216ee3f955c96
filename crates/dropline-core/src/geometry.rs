//! Pure placement math for the dropdown overlay.
//!
//! Everything in this module is a deterministic function of its inputs; the
//! controller feeds it a fresh anchor measurement on every open and commits
//! the result in one go. Scroll offsets computed here are deliberately
//! unclamped; the presentation layer clamps against the final content
//! extent, which only it knows.

/// Screen-edge gap the overlay will never cross.
pub const MIN_MARGIN: f32 = 8.0;
/// How far the overlay tries to extend past the anchor on each side.
pub const MAX_MARGIN: f32 = 16.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Anchor field bounds in window coordinates, as delivered by the host's
/// asynchronous measurement. Recomputed on every open, never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

/// Caller preference for which row the initial scroll should favour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListPosition {
    /// Heuristic placement: keep the selected row visible, one row down
    /// from the top unless it sits near either end of the list.
    Auto,
    /// Pin the selected row a fixed number of rows from the top (`>= 0`)
    /// or from the bottom of the visible window (`< 0`).
    Rows(i32),
}

impl Default for ListPosition {
    fn default() -> Self {
        // Two rows up from the bottom of the window, matching the stock
        // material dropdown.
        ListPosition::Rows(-2)
    }
}

/// Horizontal overlay bounds after edge clamping, plus the text insets that
/// keep row content aligned with the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HorizontalPlacement {
    pub left: f32,
    pub width: f32,
    pub left_inset: f32,
    pub right_inset: f32,
}

/// Height of a single row: line box plus vertical padding.
pub fn item_size(font_size: f32, item_padding: f32) -> f32 {
    font_size * 1.5 + item_padding * 2.0
}

/// Rows shown at once.
pub fn visible_item_count(candidate_count: usize, max_item_count: usize) -> usize {
    candidate_count.min(max_item_count)
}

/// Rows considered "near the end" for edge avoidance.
pub fn tail_item_count(visible_item_count: usize) -> usize {
    visible_item_count.saturating_sub(2)
}

/// Initial scroll offset (pixels) that brings the selected row into view.
///
/// Computed once per open from the selection at that moment; not re-derived
/// while the user scrolls. May fall outside the valid scroll range for
/// explicit `Rows` hints; clamping happens at presentation time.
pub fn scroll_offset(
    candidate_count: usize,
    visible_item_count: usize,
    tail_item_count: usize,
    selected: Option<usize>,
    position: ListPosition,
    item_size: f32,
) -> f32 {
    if candidate_count <= visible_item_count {
        return 0.0;
    }

    match position {
        ListPosition::Auto => match selected {
            // No selection, or selection already visible at the top.
            None | Some(0) | Some(1) => 0.0,
            Some(sel) => {
                if sel >= candidate_count - tail_item_count {
                    // Near the end: pin the list at maximum scroll.
                    item_size * (candidate_count - visible_item_count) as f32
                } else {
                    // One row of context above the selection.
                    item_size * (sel - 1) as f32
                }
            }
        },
        ListPosition::Rows(rows) => match selected {
            None => 0.0,
            Some(sel) => {
                if rows < 0 {
                    item_size * (sel as f32 - visible_item_count as f32 - rows as f32)
                } else {
                    item_size * (sel as f32 - rows as f32)
                }
            }
        },
    }
}

/// Horizontal overlay bounds: extend `MAX_MARGIN` past the anchor on both
/// sides, pulling either edge back to `MIN_MARGIN` from the screen edge when
/// it would not fit. The result always satisfies `left >= MIN_MARGIN` and
/// `left + width <= screen_width - MIN_MARGIN`.
pub fn horizontal_placement(
    anchor_x: f32,
    anchor_width: f32,
    screen_width: f32,
) -> HorizontalPlacement {
    let mut left = anchor_x - MAX_MARGIN;
    let left_inset = if left > MIN_MARGIN {
        MAX_MARGIN
    } else {
        left = MIN_MARGIN;
        MIN_MARGIN
    };

    let mut right = anchor_x + anchor_width + MAX_MARGIN;
    let right_inset = if screen_width - right > MIN_MARGIN {
        MAX_MARGIN
    } else {
        right = screen_width - MIN_MARGIN;
        MIN_MARGIN
    };

    HorizontalPlacement {
        left,
        width: right - left,
        left_inset,
        right_inset,
    }
}

/// Top edge of the overlay: anchor top, nudged by the platform-dependent
/// offset, below the floating label band.
pub fn vertical_top(anchor_y: f32, platform_top_offset: f32, label_height: f32) -> f32 {
    anchor_y + platform_top_offset + label_height
}
