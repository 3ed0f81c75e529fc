use super::{MonitorId, Xyhw};
use crate::layouts::LayoutMode;

pub const MIN_MASTER_FACTOR: f32 = 0.1;
pub const MAX_MASTER_FACTOR: f32 = 0.9;
pub const MIN_SCROLL_VISIBLE: i32 = 1;
pub const MAX_SCROLL_VISIBLE: i32 = 10;

/// A physical output as reported by the display server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub name: String,
    pub bbox: Xyhw,
}

impl Output {
    #[must_use]
    pub fn new(name: impl Into<String>, bbox: Xyhw) -> Self {
        Self {
            name: name.into(),
            bbox,
        }
    }
}

/// A physical output region with its own layout parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    pub id: MonitorId,
    /// Output identity used to keep parameters across re-enumeration.
    pub output: String,
    pub bbox: Xyhw,
    pub master_factor: f32,
    pub layout: LayoutMode,
    /// How many columns the horizontal-scroll layout shows at once.
    pub scroll_visible: i32,
}

impl Monitor {
    #[must_use]
    pub fn new(
        id: MonitorId,
        output: String,
        bbox: Xyhw,
        master_factor: f32,
        scroll_visible: i32,
    ) -> Self {
        Self {
            id,
            output,
            bbox,
            master_factor: master_factor.clamp(MIN_MASTER_FACTOR, MAX_MASTER_FACTOR),
            layout: LayoutMode::default(),
            scroll_visible: scroll_visible.clamp(MIN_SCROLL_VISIBLE, MAX_SCROLL_VISIBLE),
        }
    }

    pub fn set_master_factor(&mut self, factor: f32) {
        self.master_factor = factor.clamp(MIN_MASTER_FACTOR, MAX_MASTER_FACTOR);
    }

    pub fn set_scroll_visible(&mut self, count: i32) {
        self.scroll_visible = count.clamp(MIN_SCROLL_VISIBLE, MAX_SCROLL_VISIBLE);
    }
}
