use super::{Handle, Window, WindowType};

/// Where a newly mapped window ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Tiled by the layouts.
    Normal,
    /// Managed, but positioned by the client or the user.
    Floating,
    /// Mapped and left alone, e.g. docks and desktops.
    Ignored,
    /// Mapped, left alone, and always stacked on top.
    Special,
}

/// Decides how to treat a window from its type and hints.
///
/// Ignored and special types win over every floating heuristic, so a transient dock is still
/// ignored.
pub fn classify<H: Handle>(window: &Window<H>) -> Placement {
    match window.r#type {
        WindowType::Dock | WindowType::Desktop => Placement::Ignored,
        WindowType::Notification
        | WindowType::Tooltip
        | WindowType::DropdownMenu
        | WindowType::PopupMenu
        | WindowType::Combo
        | WindowType::Dnd => Placement::Special,
        WindowType::Dialog
        | WindowType::Splash
        | WindowType::Utility
        | WindowType::Toolbar
        | WindowType::Menu => Placement::Floating,
        WindowType::Normal if window.transient.is_some() || window.fixed_size => {
            Placement::Floating
        }
        WindowType::Normal => Placement::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MockHandle, WindowHandle};

    fn window(r#type: WindowType) -> Window<MockHandle> {
        let mut window = Window::new(WindowHandle(1), None);
        window.r#type = r#type;
        window
    }

    #[test]
    fn plain_windows_are_tiled() {
        assert_eq!(classify(&window(WindowType::Normal)), Placement::Normal);
    }

    #[test]
    fn dialogs_and_transients_float() {
        assert_eq!(classify(&window(WindowType::Dialog)), Placement::Floating);
        assert_eq!(classify(&window(WindowType::Splash)), Placement::Floating);
        let mut transient = window(WindowType::Normal);
        transient.transient = Some(WindowHandle(2));
        assert_eq!(classify(&transient), Placement::Floating);
        let mut fixed = window(WindowType::Normal);
        fixed.fixed_size = true;
        assert_eq!(classify(&fixed), Placement::Floating);
    }

    #[test]
    fn ignore_wins_over_float_when_both_match() {
        let mut dock = window(WindowType::Dock);
        dock.transient = Some(WindowHandle(2));
        dock.fixed_size = true;
        assert_eq!(classify(&dock), Placement::Ignored);

        let mut tooltip = window(WindowType::Tooltip);
        tooltip.transient = Some(WindowHandle(2));
        assert_eq!(classify(&tooltip), Placement::Special);
    }

    #[test]
    fn popups_are_special() {
        for r#type in [
            WindowType::Notification,
            WindowType::Tooltip,
            WindowType::DropdownMenu,
            WindowType::PopupMenu,
            WindowType::Combo,
            WindowType::Dnd,
        ] {
            assert_eq!(classify(&window(r#type)), Placement::Special);
        }
    }
}
