use super::TileArea;
use crate::models::Xyhw;

/// Per-workspace and per-monitor parameters of the scrolling row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub visible: i32,
    pub offset: i32,
    pub maximized: bool,
}

/// Width every column gets, insets included.
pub fn column_width(area: &TileArea, row: Row, count: usize) -> i32 {
    let visible = row.visible.max(1);
    if row.maximized {
        area.w
    } else if count > 0 && count as i32 <= visible {
        area.w / count as i32
    } else {
        area.w / visible
    }
}

/// Largest offset that still keeps the row's right end at or past the area's right edge.
pub fn max_offset(area: &TileArea, row: Row, count: usize) -> i32 {
    (count as i32 * column_width(area, row, count) - area.w).max(0)
}

/// Layout which puts every window in a column of equal width and scrolls the row sideways.
pub fn update(area: &TileArea, row: Row, count: usize) -> (Vec<Xyhw>, i32) {
    if count == 0 {
        return (vec![], 0);
    }
    let g = area.gap;
    let b = area.border;
    let ww = column_width(area, row, count);
    let offset = if !row.maximized && count as i32 <= row.visible.max(1) {
        0
    } else {
        row.offset.clamp(0, max_offset(area, row, count))
    };

    let rects = (0..count as i32)
        .map(|i| {
            Xyhw::new(
                area.x + i * ww - offset + g,
                area.y + g,
                ww - 2 * g - 2 * b,
                area.h - 2 * g - 2 * b,
            )
        })
        .collect();
    (rects, offset)
}

/// The list index a window dropped at root x should move to.
pub fn slot_at(area: &TileArea, row: Row, count: usize, x: i32) -> usize {
    if count == 0 {
        return 0;
    }
    let ww = column_width(area, row, count).max(1);
    let slot = (x - area.x + row.offset).max(0) / ww;
    (slot as usize).min(count - 1)
}
