use serde::{Deserialize, Serialize};

/// How the pointer interacts with keyboard focus.
#[derive(Serialize, Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusBehaviour {
    /// Focus follows the pointer into a window.
    #[default]
    Sloppy,
    /// A click is needed to focus a window.
    ClickTo,
}

impl FocusBehaviour {
    pub fn is_sloppy(self) -> bool {
        self == FocusBehaviour::Sloppy
    }

    pub fn is_clickto(self) -> bool {
        self == FocusBehaviour::ClickTo
    }
}
