/// The `_NET_WM_WINDOW_TYPE` of a client, or `Normal` when it sets none.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Desktop,
    Dock,
    Toolbar,
    Menu,
    Utility,
    Splash,
    Dialog,
    DropdownMenu,
    PopupMenu,
    Tooltip,
    Notification,
    Combo,
    Dnd,
    #[default]
    Normal,
}
