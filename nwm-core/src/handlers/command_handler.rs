#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_event::StateRequest;
use crate::display_servers::DisplayServer;
use crate::layouts::{self, LayoutMode};
use crate::state::State;
use crate::utils::child_process::{Children, exec_shell};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Processes a command and invokes the associated function.
    ///
    /// Returns `true` if changes need to be rendered. Commands that make no sense in the
    /// current state, or carry out-of-range arguments, do nothing.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        tracing::debug!("Command: {:?}", command);
        process_internal(self, command).unwrap_or(false)
    }
}

fn process_internal<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
    command: &Command,
) -> Option<bool> {
    let state = &mut manager.state;
    match command {
        Command::Execute(shell_command) => execute(&mut manager.children, shell_command),

        Command::CloseWindow => Some(state.close_window()),
        Command::FocusNext => Some(state.focus_cycle(1)),
        Command::FocusPrev => Some(state.focus_cycle(-1)),
        Command::SwapNext => swap_window(state, 1),
        Command::SwapPrev => swap_window(state, -1),
        Command::ResizeMaster(delta) => resize_master(state, *delta),
        Command::ScrollLeft => scroll(state, -1),
        Command::ScrollRight => scroll(state, 1),

        Command::ToggleLayout => toggle_layout(state),
        Command::ToggleGap => {
            state.settings.gaps_enabled = !state.settings.gaps_enabled;
            Some(true)
        }
        Command::ToggleBar => {
            state.settings.bar_visible = !state.settings.bar_visible;
            Some(true)
        }
        Command::ToggleFloat => {
            let handle = state.focused_window()?;
            Some(state.toggle_float(&handle))
        }
        Command::ToggleFullscreen => {
            let handle = state.focused_window()?;
            Some(state.fullscreen_request(&handle, StateRequest::Toggle))
        }
        Command::ToggleScrollMaximize => {
            let ws = state.workspace_mut();
            ws.scroll_maximized = !ws.scroll_maximized;
            ws.scroll_offset = 0;
            Some(true)
        }

        Command::SwitchWorkspace(id) => Some(state.switch_workspace(*id)),
        Command::MoveToWorkspace(id) => Some(state.move_to_workspace(*id)),
        Command::FocusMonitor(id) => Some(state.focus_monitor(*id)),

        Command::SetScrollVisible(count) => set_scroll_visible(state, |_| *count),
        Command::IncrementScrollVisible => set_scroll_visible(state, |count| count + 1),
        Command::DecrementScrollVisible => set_scroll_visible(state, |count| count - 1),

        Command::Quit { restart } => {
            manager.quit(*restart);
            None
        }
    }
}

fn execute(children: &mut Children, shell_command: &str) -> Option<bool> {
    exec_shell(shell_command, children);
    None
}

/// Swaps the focused window with its neighbour in the list, wrapping around. Floating windows
/// neither move nor get moved.
fn swap_window<H: Handle>(state: &mut State<H>, delta: i32) -> Option<bool> {
    let handle = state.focused_window()?;
    let ws = state.workspace_mut();
    let index = ws.position(&handle)?;
    let len = ws.windows.len() as i32;
    let target = (index as i32 + delta).rem_euclid(len) as usize;
    if target == index || !ws.windows[index].is_tiled() || !ws.windows[target].is_tiled() {
        return None;
    }
    ws.windows.swap(index, target);
    state.scroll_into_view(&handle);
    Some(true)
}

/// Grows or shrinks the master column of the current monitor by `delta` pixels.
fn resize_master<H: Handle>(state: &mut State<H>, delta: i32) -> Option<bool> {
    let monitor = state.current_monitor();
    if state.layout_of(monitor) != LayoutMode::MasterStack
        || state.workspace().tiled_on(monitor).count() < 2
    {
        return None;
    }
    let monitor = &mut state.monitors[monitor];
    if monitor.bbox.w <= 0 {
        return None;
    }
    let factor = monitor.master_factor + delta as f32 / monitor.bbox.w as f32;
    monitor.set_master_factor(factor);
    Some(true)
}

/// Scrolls the row of the current monitor by one step in `direction`.
fn scroll<H: Handle>(state: &mut State<H>, direction: i32) -> Option<bool> {
    let monitor = state.current_monitor();
    if state.layout_of(monitor) != LayoutMode::HorizontalScroll {
        return None;
    }
    let ws = state.active_workspace;
    let count = state.workspace().tiled_on(monitor).count();
    let area = state.tile_area(monitor);
    let row = state.row(ws, monitor);
    let step = match state.settings.scroll_step {
        0 => layouts::column_width(&area, row, count),
        step => step,
    };
    let max = layouts::max_offset(&area, row, count);
    let offset = (row.offset + direction * step).clamp(0, max);
    if offset == row.offset {
        return None;
    }
    state.workspace_mut().scroll_offset = offset;
    Some(true)
}

fn toggle_layout<H: Handle>(state: &mut State<H>) -> Option<bool> {
    let monitor = state.current_monitor();
    let layout = state.monitors[monitor].layout.toggled();
    state.monitors[monitor].layout = layout;
    let ws = state.workspace_mut();
    ws.layout = layout;
    ws.scroll_offset = 0;
    Some(true)
}

fn set_scroll_visible<H: Handle>(
    state: &mut State<H>,
    count: impl FnOnce(i32) -> i32,
) -> Option<bool> {
    let monitor = state.current_monitor();
    let current = state.monitors[monitor].scroll_visible;
    state.monitors[monitor].set_scroll_visible(count(current));
    state.workspace_mut().scroll_offset = 0;
    Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Output, TestManager, Xyhw};

    fn manager(count: i32) -> TestManager {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))]);
        for handle in 1..=count {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
        }
        manager
    }

    fn order(manager: &TestManager) -> Vec<i32> {
        manager.state.workspace().windows.iter().map(|w| w.handle.0).collect()
    }

    #[test]
    fn swap_next_keeps_focus_on_the_moved_window() {
        let mut manager = manager(3);
        manager.state.focus_window(&WindowHandle(2));
        assert!(manager.command_handler(&Command::SwapNext));
        assert_eq!(order(&manager), vec![1, 3, 2]);
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));

        manager.state.update_windows();
        let focused = manager.state.focused().map(|w| w.geometry);
        assert_eq!(focused, Some(Xyhw::new(960, 540, 960, 540)));
    }

    #[test]
    fn swap_wraps_and_skips_floating_targets() {
        let mut manager = manager(3);
        manager.state.focus_window(&WindowHandle(1));
        assert!(manager.command_handler(&Command::SwapPrev));
        assert_eq!(order(&manager), vec![3, 2, 1]);

        manager.state.toggle_float(&WindowHandle(2));
        assert!(!manager.command_handler(&Command::SwapPrev));
        assert_eq!(order(&manager), vec![3, 2, 1]);
    }

    #[test]
    fn master_resize_is_clamped() {
        let mut manager = manager(2);
        assert!(manager.command_handler(&Command::ResizeMaster(192)));
        assert!((manager.state.monitors[0].master_factor - 0.6).abs() < 0.001);
        manager.command_handler(&Command::ResizeMaster(10_000));
        assert!((manager.state.monitors[0].master_factor - 0.9).abs() < 0.001);
        manager.command_handler(&Command::ResizeMaster(-10_000));
        assert!((manager.state.monitors[0].master_factor - 0.1).abs() < 0.001);
    }

    #[test]
    fn master_resize_needs_a_stack() {
        let mut manager = manager(1);
        assert!(!manager.command_handler(&Command::ResizeMaster(100)));
        assert!((manager.state.monitors[0].master_factor - 0.5).abs() < 0.001);
    }

    #[test]
    fn scrolling_stays_within_the_content() {
        let mut manager = manager(3);
        assert!(!manager.command_handler(&Command::ScrollRight));
        manager.command_handler(&Command::ToggleLayout);
        manager.command_handler(&Command::SetScrollVisible(2));

        let max = 3 * 960 - 1920;
        for _ in 0..5 {
            manager.command_handler(&Command::ScrollRight);
            let offset = manager.state.workspace().scroll_offset;
            assert!((0..=max).contains(&offset));
        }
        assert_eq!(manager.state.workspace().scroll_offset, max);
        for _ in 0..5 {
            manager.command_handler(&Command::ScrollLeft);
            assert!(manager.state.workspace().scroll_offset >= 0);
        }
        assert_eq!(manager.state.workspace().scroll_offset, 0);
    }

    #[test]
    fn toggling_the_layout_starts_the_row_at_its_left_edge() {
        let mut manager = manager(3);
        manager.command_handler(&Command::ToggleLayout);
        manager.command_handler(&Command::SetScrollVisible(2));
        manager.command_handler(&Command::ScrollRight);
        assert!(manager.state.workspace().scroll_offset > 0);

        assert!(manager.command_handler(&Command::ToggleLayout));
        assert_eq!(manager.state.workspace().scroll_offset, 0);
        manager.state.focus_window(&WindowHandle(3));
        assert!(manager.command_handler(&Command::ToggleLayout));
        assert_eq!(manager.state.monitors[0].layout, LayoutMode::HorizontalScroll);
        assert_eq!(manager.state.workspace().scroll_offset, 0);
    }

    #[test]
    fn scroll_visible_is_clamped() {
        let mut manager = manager(1);
        manager.command_handler(&Command::SetScrollVisible(0));
        assert_eq!(manager.state.monitors[0].scroll_visible, 1);
        manager.command_handler(&Command::SetScrollVisible(40));
        assert_eq!(manager.state.monitors[0].scroll_visible, 10);
        manager.command_handler(&Command::DecrementScrollVisible);
        assert_eq!(manager.state.monitors[0].scroll_visible, 9);
        manager.command_handler(&Command::IncrementScrollVisible);
        manager.command_handler(&Command::IncrementScrollVisible);
        assert_eq!(manager.state.monitors[0].scroll_visible, 10);
    }

    #[test]
    fn toggles_flip_their_settings() {
        let mut manager = manager(1);
        assert!(manager.command_handler(&Command::ToggleGap));
        assert!(manager.state.settings.gaps_enabled);
        assert!(manager.command_handler(&Command::ToggleBar));
        assert!(manager.state.settings.bar_visible);
        assert!(manager.command_handler(&Command::ToggleScrollMaximize));
        assert!(manager.state.workspace().scroll_maximized);
    }

    #[test]
    fn quit_sets_the_exit_reason() {
        let mut manager = manager(0);
        assert!(!manager.command_handler(&Command::Quit { restart: true }));
        assert_eq!(manager.exit, Some(crate::event_loop::ExitReason::Restart));
    }

    #[test]
    fn close_window_asks_politely() {
        let mut manager = manager(1);
        manager.command_handler(&Command::CloseWindow);
        assert_eq!(
            manager.state.actions.back(),
            Some(&crate::DisplayAction::KillWindow(WindowHandle(1)))
        );
    }
}
