//! The two tiling algorithms. Both are pure functions from a usable area and a window count to
//! one rectangle per window, in list order.
mod horizontal_scroll;
mod master_stack;

use crate::config::BarPosition;
use crate::models::Xyhw;
use crate::state::Settings;
use serde::{Deserialize, Serialize};

pub use horizontal_scroll::{Row, column_width, max_offset, slot_at};
pub use master_stack::slot_at as master_stack_slot_at;

#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    #[default]
    MasterStack,
    HorizontalScroll,
}

impl LayoutMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::MasterStack => Self::HorizontalScroll,
            Self::HorizontalScroll => Self::MasterStack,
        }
    }

    /// Integer code used when the mode is persisted.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::MasterStack => 0,
            Self::HorizontalScroll => 1,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::MasterStack),
            1 => Some(Self::HorizontalScroll),
            _ => None,
        }
    }

    /// Short symbol for a status bar.
    #[must_use]
    pub fn label(self, scroll_visible: i32) -> String {
        match self {
            Self::MasterStack => "[]=".to_owned(),
            Self::HorizontalScroll => format!("||| {scroll_visible}"),
        }
    }
}

/// The part of a monitor windows are tiled into, with the insets every rectangle loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileArea {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub gap: i32,
    pub border: i32,
}

impl TileArea {
    /// The monitor rectangle minus the bar.
    #[must_use]
    pub fn new(bbox: Xyhw, settings: &Settings) -> Self {
        let bar = if settings.bar_visible {
            settings.bar_height
        } else {
            0
        };
        let y = match settings.bar_position {
            BarPosition::Top => bbox.y + bar,
            BarPosition::Bottom => bbox.y,
        };
        Self {
            x: bbox.x,
            y,
            w: bbox.w,
            h: bbox.h - bar,
            gap: if settings.gaps_enabled {
                settings.gap_size
            } else {
                0
            },
            border: settings.border_width,
        }
    }

    /// A single window filling the whole area.
    #[must_use]
    pub const fn full(&self) -> Xyhw {
        let g = self.gap;
        let b = self.border;
        Xyhw::new(self.x + g, self.y + g, self.w - 2 * g - 2 * b, self.h - 2 * g - 2 * b)
    }
}

/// Master-stack rectangles for `count` windows.
#[must_use]
pub fn master_stack(area: &TileArea, master_factor: f32, count: usize) -> Vec<Xyhw> {
    master_stack::update(area, master_factor, count)
}

/// Horizontal-scroll rectangles for `count` windows, with the offset clamped into range.
#[must_use]
pub fn horizontal_scroll(area: &TileArea, row: Row, count: usize) -> (Vec<Xyhw>, i32) {
    horizontal_scroll::update(area, row, count)
}
