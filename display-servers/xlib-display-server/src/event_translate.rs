use crate::XlibWindowHandle;

use super::{DisplayEvent, XWrap, event_translate_client_message, xwrap::button_from_x};
use nwm_core::models::{WindowHandle, XyhwChange};
use nwm_core::utils::modmask_lookup::ModMask;
use std::os::raw::c_ulong;
use x11_dl::xlib;

pub struct XEvent<'a>(pub &'a mut XWrap, pub xlib::XEvent);

impl From<XEvent<'_>> for Option<DisplayEvent<XlibWindowHandle>> {
    fn from(x_event: XEvent) -> Self {
        let raw_event = x_event.1;
        let dragging = x_event.0.dragging;

        match raw_event.get_type() {
            // New window is mapped.
            xlib::MapRequest => from_map_request(x_event),
            // Window is unmapped.
            xlib::UnmapNotify => from_unmap_event(x_event),
            // Window is destroyed.
            xlib::DestroyNotify => from_destroy_notify(x_event),
            // Window is taking focus.
            xlib::FocusIn => from_focus_in(x_event),
            // Window client message.
            xlib::ClientMessage => from_client_message(&x_event),
            // Window configure request.
            xlib::ConfigureRequest => from_configure_request(x_event),
            // The root window changed size, the outputs probably did too.
            xlib::ConfigureNotify => from_configure_notify(&x_event),
            // Mouse entered notify.
            xlib::EnterNotify if !dragging => from_enter_notify(&x_event),
            // Mouse motion notify.
            xlib::MotionNotify => from_motion_notify(x_event),
            // Mouse button pressed.
            xlib::ButtonPress => Some(from_button_press(raw_event)),
            // Mouse button released.
            xlib::ButtonRelease if dragging => Some(from_button_release(raw_event)),
            // Key chord pressed.
            xlib::KeyPress => from_key_press(&x_event),
            // Keyboard layout changed.
            xlib::MappingNotify => from_mapping_notify(x_event),
            _other => None,
        }
    }
}

fn from_map_request(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XMapRequestEvent::from(x_event.1);
    let window = xw.setup_window(event.window)?;
    let (x, y) = xw.get_cursor_point().unwrap_or_default();
    Some(DisplayEvent::WindowCreate(window, x, y))
}

fn from_unmap_event(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XUnmapEvent::from(x_event.1);
    if event.send_event != xlib::False {
        return None;
    }
    // Unmanaged windows the core still tracks, like notifications, are forgotten too.
    let h = WindowHandle(XlibWindowHandle(event.window));
    xw.teardown_managed_window(event.window, false);
    Some(DisplayEvent::WindowDestroy(h))
}

fn from_destroy_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XDestroyWindowEvent::from(x_event.1);
    let h = WindowHandle(XlibWindowHandle(event.window));
    xw.teardown_managed_window(event.window, true);
    Some(DisplayEvent::WindowDestroy(h))
}

fn from_focus_in(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XFocusChangeEvent::from(x_event.1);
    // Check that if a window is taking focus, that it should be.
    if xw.focused_window != event.window && xw.focused_window != xw.get_default_root() {
        let never_focus = xw.get_never_focus(xw.focused_window);
        xw.focus(xw.focused_window, never_focus);
    }
    None
}

fn from_client_message(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XClientMessageEvent::from(x_event.1);
    event_translate_client_message::from_event(x_event.0, event)
}

fn from_configure_request(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XConfigureRequestEvent::from(x_event.1);
    // Windows we don't manage get whatever they ask for.
    if !xw.managed_windows.contains(&event.window) {
        let window_changes = xlib::XWindowChanges {
            x: event.x,
            y: event.y,
            width: event.width,
            height: event.height,
            border_width: event.border_width,
            sibling: event.above,
            stack_mode: event.detail,
        };
        xw.set_window_config(event.window, window_changes, event.value_mask as u32);
        return None;
    }
    let mask = event.value_mask;
    let requested = |bit: c_ulong, value: i32| (mask & bit != 0).then_some(value);
    let change = XyhwChange {
        x: requested(c_ulong::from(xlib::CWX), event.x),
        y: requested(c_ulong::from(xlib::CWY), event.y),
        w: requested(c_ulong::from(xlib::CWWidth), event.width),
        h: requested(c_ulong::from(xlib::CWHeight), event.height),
    };
    let handle = WindowHandle(XlibWindowHandle(event.window));
    Some(DisplayEvent::ConfigureRequest(handle, change))
}

fn from_configure_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = &x_event.0;
    let event = xlib::XConfigureEvent::from(x_event.1);
    if event.window != xw.get_default_root() {
        return None;
    }
    Some(DisplayEvent::OutputsChanged(xw.get_outputs()))
}

fn from_enter_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = &x_event.0;
    let event = xlib::XCrossingEvent::from(x_event.1);
    if !xw.focus_behaviour.is_sloppy()
        || event.mode != xlib::NotifyNormal
        || event.detail == xlib::NotifyInferior
    {
        return None;
    }

    let h = WindowHandle(XlibWindowHandle(event.window));
    Some(DisplayEvent::Movement(h, event.x_root, event.y_root))
}

fn from_motion_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XMotionEvent::from(x_event.1);

    // Limit motion events to current refresh rate.
    let interval = 1000 / c_ulong::try_from(xw.refresh_rate.max(1)).unwrap_or(60);
    if event.time.wrapping_sub(xw.motion_event_limiter) <= interval {
        return None;
    }
    xw.motion_event_limiter = event.time;

    if xw.dragging {
        return Some(DisplayEvent::MouseMotion(event.x_root, event.y_root));
    }
    // Crossing between monitors over the bare root window.
    if xw.focus_behaviour.is_sloppy() && event.window == xw.get_default_root() {
        let root = xw.get_default_root_handle();
        return Some(DisplayEvent::Movement(root, event.x_root, event.y_root));
    }
    None
}

fn from_button_press(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XButtonPressedEvent::from(raw_event);
    let h = WindowHandle(XlibWindowHandle(event.window));
    DisplayEvent::MouseCombo(
        ModMask::from_bits_truncate(event.state as u16).clean(),
        button_from_x(event.button),
        h,
        event.x_root,
        event.y_root,
    )
}

fn from_button_release(raw_event: xlib::XEvent) -> DisplayEvent<XlibWindowHandle> {
    let event = xlib::XButtonReleasedEvent::from(raw_event);
    DisplayEvent::MouseRelease(button_from_x(event.button), event.x_root, event.y_root)
}

fn from_key_press(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XKeyEvent::from(x_event.1);
    let key = x_event.0.keycode_to_name(event.keycode)?;
    let mask = ModMask::from_bits_truncate(event.state as u16).clean();
    Some(DisplayEvent::KeyCombo(mask, key))
}

fn from_mapping_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let mut event = xlib::XMappingEvent::from(x_event.1);
    if xw.refresh_keyboard(&mut event).is_err() {
        tracing::warn!("Unable to refresh the keyboard mapping");
        return None;
    }
    if event.request == xlib::MappingKeyboard || event.request == xlib::MappingModifier {
        xw.reset_grabs();
    }
    None
}
