// allow casting types
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod event_translate;
mod event_translate_client_message;
mod property_store;
mod xatom;
mod xcursor;
mod xwrap;

pub use xwrap::XWrap;

use self::xwrap::{ICONIC_STATE, button_to_x};
use event_translate::XEvent;
use futures::prelude::*;
use nwm_core::config::Config;
use nwm_core::errors::Result;
use nwm_core::models::{BarStatus, Handle, Window, WindowHandle};
use nwm_core::{DisplayAction, DisplayEvent, DisplayServer, SessionKey};
use std::os::raw::c_uint;
use std::pin::Pin;

use x11_dl::xlib;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XlibWindowHandle(xlib::Window);
impl Handle for XlibWindowHandle {}

pub struct XlibDisplayServer {
    xw: XWrap,
    root: xlib::Window,
    initial_events: Vec<DisplayEvent<XlibWindowHandle>>,
    bar: Option<BarStatus>,
}

impl DisplayServer<XlibWindowHandle> for XlibDisplayServer {
    fn new(config: &impl Config) -> Result<Self> {
        let mut wrap = XWrap::new()?;

        wrap.init(config); // setup events masks

        let root = wrap.get_default_root();
        let instance = Self {
            xw: wrap,
            root,
            initial_events: Vec::new(),
            bar: None,
        };
        let initial_events = instance.initial_events();

        Ok(Self {
            initial_events,
            ..instance
        })
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut events = std::mem::take(&mut self.initial_events);

        let events_in_queue = self.xw.queue_len();
        for _ in 0..events_in_queue {
            let xlib_event = self.xw.get_next_event();
            let event = XEvent(&mut self.xw, xlib_event).into();
            if let Some(e) = event {
                tracing::trace!("DisplayEvent: {:?}", e);
                events.push(e);
            }
        }

        events
    }

    fn update_windows(&self, windows: Vec<&Window<XlibWindowHandle>>) {
        for window in &windows {
            self.xw.update_window(window);
        }
    }

    fn update_bar(&mut self, status: &BarStatus) {
        if self.bar.as_ref() == Some(status) {
            return;
        }
        if self.bar.as_ref().is_none_or(|bar| bar.labels != status.labels) {
            self.xw.set_desktop_names(&status.labels);
        }
        self.xw.set_current_desktop(status.active_workspace);
        self.xw.set_desktop_prop_string(
            &status.layout,
            self.xw.atoms.NwmLayout,
            self.xw.atoms.UTF8String,
        );
        self.bar = Some(status.clone());
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<XlibWindowHandle>,
    ) -> Option<DisplayEvent<XlibWindowHandle>> {
        tracing::trace!("DisplayAction: {:?}", act);
        let xw = &mut self.xw;
        let event: Option<DisplayEvent<XlibWindowHandle>> = match act {
            DisplayAction::KillWindow(h) => from_kill_window(xw, h),
            DisplayAction::AddedWindow(h, f) => from_added_window(xw, h, f),
            DisplayAction::MapUnmanaged(h) => from_map_unmanaged(xw, h),
            DisplayAction::MoveMouseOverPoint(p) => from_move_mouse_over_point(xw, p),
            DisplayAction::SetFullscreen(h, f) => from_set_fullscreen(xw, h, f),
            DisplayAction::DestroyedWindow(h) => from_destroyed_window(xw, h),
            DisplayAction::Unfocus(h, f) => from_unfocus(xw, h, f),
            DisplayAction::ReplayClick(h, b) => from_replay_click(xw, h, button_to_x(b)),
            DisplayAction::SetWindowOrder(ws) => from_set_window_order(xw, &ws),
            DisplayAction::ReadyToMoveWindow(_) => from_ready_to_drag(xw, false),
            DisplayAction::ReadyToResizeWindow(_) => from_ready_to_drag(xw, true),
            DisplayAction::SetCurrentWorkspace(ws) => from_set_current_workspace(xw, ws),
            DisplayAction::SetWindowWorkspace(h, ws) => from_set_window_workspace(xw, h, ws),
            DisplayAction::ConfigureXlibWindow(w) => from_configure_xlib_window(xw, &w),

            DisplayAction::WindowTakeFocus {
                window,
                previous_window,
            } => from_window_take_focus(xw, &window, previous_window.as_ref()),

            DisplayAction::NormalMode => from_normal_mode(xw),
        };
        if event.is_some() {
            tracing::trace!("DisplayEvent: {:?}", event);
        }
        event
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let task_notify = self.xw.task_notify.clone();
        Box::pin(async move {
            task_notify.notified().await;
        })
    }

    fn flush(&self) {
        self.xw.flush();
    }
}

impl XlibDisplayServer {
    /// Return a vec of events for setting up state of WM.
    fn initial_events(&self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut events = vec![DisplayEvent::OutputsChanged(self.xw.get_outputs())];

        // Tell manager about existing windows.
        events.append(&mut self.find_all_windows());

        events
    }

    /// Windows that were already around when we started: mapped ones, iconified ones and
    /// the ones a previous session hid on another workspace.
    fn find_all_windows(&self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let handles = match self.xw.get_all_windows() {
            Ok(handles) => handles,
            Err(err) => {
                tracing::error!("Unable to list the existing windows: {:?}", err);
                return vec![];
            }
        };
        let (x, y) = self.xw.get_cursor_point().unwrap_or_default();
        let mut adopted: Vec<Window<XlibWindowHandle>> = handles
            .into_iter()
            .filter(|&handle| {
                let Ok(attrs) = self.xw.get_window_attrs(handle) else {
                    return false;
                };
                let tagged = self
                    .xw
                    .get_property_longs(
                        handle,
                        self.xw.atoms.session(SessionKey::Workspace),
                        xlib::XA_INTEGER,
                    )
                    .is_some();
                attrs.map_state == xlib::IsViewable
                    || self.xw.get_wm_state(handle) == Some(ICONIC_STATE)
                    || tagged
            })
            .filter_map(|handle| self.xw.setup_window(handle))
            .collect();
        // Parents first, so dialogs find them when they are placed.
        adopted.sort_by_key(|w| w.transient.is_some());
        adopted
            .into_iter()
            .map(|w| DisplayEvent::WindowCreate(w, x, y))
            .collect()
    }
}

/// The order handed to `XRestackWindows`, top most first. Override-redirect popups stay above
/// everything, `managed` arrives bottom most first, and unmanaged windows such as docks and
/// desktops sink to the bottom.
fn stacking_order(
    popups: Vec<xlib::Window>,
    managed: &[WindowHandle<XlibWindowHandle>],
    others: Vec<xlib::Window>,
) -> Vec<xlib::Window> {
    let managed = managed
        .iter()
        .rev()
        .map(|WindowHandle(XlibWindowHandle(w))| *w);
    popups.into_iter().chain(managed).chain(others).collect()
}

// Display actions.
fn from_kill_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    xw.kill_window(window);
    None
}

fn from_added_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    floating: bool,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    xw.setup_managed_window(window, floating);
    None
}

fn from_map_unmanaged(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    xw.map_unmanaged(window);
    None
}

fn from_move_mouse_over_point(
    xw: &mut XWrap,
    point: (i32, i32),
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.move_cursor_to_point(point);
    None
}

fn from_set_fullscreen(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    fullscreen: bool,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    xw.set_state(window, fullscreen, xw.atoms.NetWMStateFullscreen);
    None
}

fn from_destroyed_window(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    xw.teardown_managed_window(window, true);
    None
}

fn from_unfocus(
    xw: &mut XWrap,
    handle: Option<WindowHandle<XlibWindowHandle>>,
    floating: bool,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let window = handle.map(|WindowHandle(XlibWindowHandle(w))| w);
    xw.unfocus(window, floating);
    None
}

fn from_replay_click(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    button: c_uint,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    xw.replay_click(window, button);
    None
}

fn from_set_window_order(
    xw: &mut XWrap,
    windows: &[WindowHandle<XlibWindowHandle>],
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let root = xw.get_default_root();
    let (popups, others): (Vec<xlib::Window>, Vec<xlib::Window>) = xw
        .get_all_windows()
        .unwrap_or_default()
        .into_iter()
        .filter(|&w| w != root)
        .filter(|&w| !windows.contains(&WindowHandle(XlibWindowHandle(w))))
        .partition(|&w| xw.is_override_redirect(w));
    xw.restack(stacking_order(popups, windows, others));
    None
}

fn from_ready_to_drag(xw: &mut XWrap, resize: bool) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.begin_drag(resize);
    None
}

fn from_set_current_workspace(
    xw: &mut XWrap,
    workspace: usize,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.set_current_desktop(workspace);
    None
}

fn from_set_window_workspace(
    xw: &mut XWrap,
    handle: WindowHandle<XlibWindowHandle>,
    workspace: usize,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    let WindowHandle(XlibWindowHandle(window)) = handle;
    xw.set_window_desktop(window, workspace);
    None
}

fn from_configure_xlib_window(
    xw: &mut XWrap,
    window: &Window<XlibWindowHandle>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.configure_window(window);
    None
}

fn from_window_take_focus(
    xw: &mut XWrap,
    window: &Window<XlibWindowHandle>,
    previous_window: Option<&Window<XlibWindowHandle>>,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.window_take_focus(window, previous_window);
    None
}

fn from_normal_mode(xw: &mut XWrap) -> Option<DisplayEvent<XlibWindowHandle>> {
    xw.end_drag();
    None
}
