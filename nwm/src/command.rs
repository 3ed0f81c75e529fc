use serde::{Deserialize, Serialize};

/// The name half of a key binding in the config file. TOML has no tidy way to spell
/// `nwm_core::Command` with its arguments, so the argument lives next to it as a string and
/// the pair is checked when the bindings are mapped.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseCommand {
    Execute,
    CloseWindow,
    FocusNext,
    FocusPrev,
    SwapNext,
    SwapPrev,
    ResizeMaster,
    ScrollLeft,
    ScrollRight,
    ToggleLayout,
    ToggleGap,
    ToggleBar,
    ToggleFloat,
    ToggleFullscreen,
    ToggleScrollMaximize,
    SwitchWorkspace,
    MoveToWorkspace,
    FocusMonitor,
    SetScrollVisible,
    IncrementScrollVisible,
    DecrementScrollVisible,
    Quit,
    Restart,
}
