use crate::XlibWindowHandle;

use super::{DisplayEvent, XWrap};
use nwm_core::{Command, StateRequest};
use nwm_core::models::WindowHandle;
use std::os::raw::c_long;

use x11_dl::xlib;

pub fn from_event(
    xw: &XWrap,
    event: xlib::XClientMessageEvent,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    if !xw.managed_windows.contains(&event.window) && event.window != xw.get_default_root() {
        return None;
    }
    let atom_name = xw.atoms.get_name(event.message_type);
    tracing::trace!("ClientMessage: {} : {:?}", event.window, atom_name);
    let handle = WindowHandle(XlibWindowHandle(event.window));

    if event.message_type == xw.atoms.NetCurrentDesktop {
        let value = event.data.get_long(0);
        return match usize::try_from(value) {
            Ok(index) => Some(DisplayEvent::SendCommand(Command::SwitchWorkspace(index))),
            Err(err) => {
                tracing::debug!(
                    "Received invalid value for current desktop new index ({}): {}",
                    value,
                    err,
                );
                None
            }
        };
    }

    if event.message_type == xw.atoms.NetActiveWindow {
        return Some(DisplayEvent::ActivateRequest(handle));
    }

    if event.message_type == xw.atoms.NetCloseWindow {
        xw.kill_window(event.window);
        return None;
    }

    // Only fullscreen is honoured out of the `_NET_WM_STATE` requests.
    let fullscreen = xw.atoms.NetWMStateFullscreen as c_long;
    if event.message_type == xw.atoms.NetWMState
        && (event.data.get_long(1) == fullscreen || event.data.get_long(2) == fullscreen)
    {
        let request = match event.data.get_long(0) {
            0 => StateRequest::Remove,
            1 => StateRequest::Add,
            2 => StateRequest::Toggle,
            other => {
                tracing::debug!("Unknown _NET_WM_STATE action {}", other);
                return None;
            }
        };
        return Some(DisplayEvent::FullscreenRequest(handle, request));
    }

    None
}
