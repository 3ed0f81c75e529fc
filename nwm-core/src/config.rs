use crate::Command;
pub use crate::models::FocusBehaviour;
use crate::utils::modmask_lookup::ModMask;
use serde::{Deserialize, Serialize};

/// Where the bar inset is taken from.
#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPosition {
    #[default]
    Top,
    Bottom,
}

/// A resolved key chord and what it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub modifier: ModMask,
    /// Keysym name, as `XKeysymToString` spells it.
    pub key: String,
    pub command: Command,
}

pub trait Config {
    fn workspace_labels(&self) -> Vec<String>;

    fn mapped_bindings(&self) -> Vec<Keybind>;

    fn mousekey(&self) -> Vec<String>;

    fn focus_behaviour(&self) -> FocusBehaviour;

    fn border_width(&self) -> i32;
    fn default_border_color(&self) -> String;
    fn floating_border_color(&self) -> String;
    fn focused_border_color(&self) -> String;

    fn gap_size(&self) -> i32;
    fn gaps_enabled(&self) -> bool;

    fn bar_height(&self) -> i32;
    fn bar_position(&self) -> BarPosition;
    fn bar_visible(&self) -> bool;

    /// Pixels per scroll command; zero scrolls by one column.
    fn scroll_step(&self) -> i32;
    fn scroll_visible(&self) -> i32;
    fn master_factor(&self) -> f32;

    fn status_interval_ms(&self) -> u64;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[allow(clippy::module_name_repetitions)]
    pub struct TestConfig {
        pub tags: Vec<String>,
        pub bindings: Vec<Keybind>,
        pub border_width: i32,
        pub gap_size: i32,
        pub gaps_enabled: bool,
        pub bar_height: i32,
        pub scroll_visible: i32,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                tags: (1..=9).map(|i| i.to_string()).collect(),
                bindings: vec![],
                border_width: 0,
                gap_size: 0,
                gaps_enabled: false,
                bar_height: 0,
                scroll_visible: 1,
            }
        }
    }

    impl Config for TestConfig {
        fn workspace_labels(&self) -> Vec<String> {
            self.tags.clone()
        }
        fn mapped_bindings(&self) -> Vec<Keybind> {
            self.bindings.clone()
        }
        fn mousekey(&self) -> Vec<String> {
            vec!["Mod4".to_owned()]
        }
        fn focus_behaviour(&self) -> FocusBehaviour {
            FocusBehaviour::ClickTo
        }
        fn border_width(&self) -> i32 {
            self.border_width
        }
        fn default_border_color(&self) -> String {
            "#181818".to_owned()
        }
        fn floating_border_color(&self) -> String {
            "#181818".to_owned()
        }
        fn focused_border_color(&self) -> String {
            "#005577".to_owned()
        }
        fn gap_size(&self) -> i32 {
            self.gap_size
        }
        fn gaps_enabled(&self) -> bool {
            self.gaps_enabled
        }
        fn bar_height(&self) -> i32 {
            self.bar_height
        }
        fn bar_position(&self) -> BarPosition {
            BarPosition::Top
        }
        fn bar_visible(&self) -> bool {
            self.bar_height > 0
        }
        fn scroll_step(&self) -> i32 {
            0
        }
        fn scroll_visible(&self) -> i32 {
            self.scroll_visible
        }
        fn master_factor(&self) -> f32 {
            0.5
        }
        fn status_interval_ms(&self) -> u64 {
            1000
        }
    }
}
