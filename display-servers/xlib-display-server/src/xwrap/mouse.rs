//! Button grabs, pointer grabs and click replay.
use super::{BUTTONMASK, MOUSEMASK};
use crate::XWrap;
use nwm_core::utils::modmask_lookup::Button;
use std::os::raw::{c_uint, c_ulong};
use x11_dl::xlib;

/// X numbers its buttons, the core keeps them as flags.
pub fn button_from_x(button: c_uint) -> Button {
    match button {
        xlib::Button1 => Button::Button1,
        xlib::Button2 => Button::Button2,
        xlib::Button3 => Button::Button3,
        xlib::Button4 => Button::Button4,
        xlib::Button5 => Button::Button5,
        _ => Button::Zero,
    }
}

pub fn button_to_x(button: Button) -> c_uint {
    match button {
        Button::Button2 => xlib::Button2,
        Button::Button3 => xlib::Button3,
        Button::Button4 => xlib::Button4,
        Button::Button5 => xlib::Button5,
        _ => xlib::Button1,
    }
}

impl XWrap {
    /// Mouse key chords are grabbed on every managed window. With click to focus, plain
    /// clicks on unfocused windows are grabbed as well.
    pub fn grab_mouse_clicks(&self, handle: xlib::Window, is_focused: bool) {
        self.ungrab_buttons(handle);
        if !is_focused && self.focus_behaviour.is_clickto() {
            self.grab_buttons(handle, xlib::Button1, xlib::AnyModifier);
            self.grab_buttons(handle, xlib::Button3, xlib::AnyModifier);
        }
        let mask = c_uint::from(self.mouse_key_mask.bits());
        for button in [xlib::Button1, xlib::Button3] {
            self.grab_buttons(handle, button, mask);
            self.grab_buttons(handle, button, mask | xlib::ShiftMask);
        }
    }

    /// Grabs `button` with `modifiers` on a window, also when num lock or caps lock is on.
    pub fn grab_buttons(&self, window: xlib::Window, button: u32, modifiers: u32) {
        let variants: &[u32] = if modifiers == xlib::AnyModifier {
            &[0]
        } else {
            &[0, xlib::Mod2Mask, xlib::LockMask, xlib::Mod2Mask | xlib::LockMask]
        };
        for lock in variants {
            unsafe {
                (self.xlib.XGrabButton)(
                    self.display,
                    button,
                    modifiers | lock,
                    window,
                    xlib::False,
                    BUTTONMASK as u32,
                    xlib::GrabModeAsync,
                    xlib::GrabModeAsync,
                    0,
                    0,
                );
            }
        }
    }

    pub fn ungrab_buttons(&self, handle: xlib::Window) {
        unsafe {
            (self.xlib.XUngrabButton)(self.display, xlib::AnyButton as u32, xlib::AnyModifier, handle);
        }
    }

    /// Holds the pointer on the root window for a drag, showing `cursor`.
    pub fn grab_pointer(&self, cursor: c_ulong) {
        unsafe {
            (self.xlib.XGrabPointer)(
                self.display,
                self.root,
                xlib::False,
                MOUSEMASK as u32,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
                0,
                cursor,
                xlib::CurrentTime,
            );
        }
    }

    pub fn ungrab_pointer(&self) {
        unsafe { (self.xlib.XUngrabPointer)(self.display, xlib::CurrentTime) };
    }

    /// Warps the pointer to root coordinates. Negative points are ignored.
    pub fn move_cursor_to_point(&self, (x, y): (i32, i32)) {
        if x < 0 || y < 0 {
            return;
        }
        unsafe { (self.xlib.XWarpPointer)(self.display, 0, self.root, 0, 0, 0, 0, x, y) };
    }

    /// Sends a press and release of `button` to the window under the pointer, if that is
    /// the focused window. Used after a grabbed click moved the focus.
    pub fn replay_click(&self, focused_window: xlib::Window, button: c_uint) {
        let mut event: xlib::XButtonEvent = unsafe { std::mem::zeroed() };
        event.button = button;
        event.same_screen = xlib::True;
        event.subwindow = self.get_default_root();
        // descend to the deepest child under the pointer
        while event.subwindow != 0 {
            event.window = event.subwindow;
            unsafe {
                (self.xlib.XQueryPointer)(
                    self.display,
                    event.window,
                    &mut event.root,
                    &mut event.subwindow,
                    &mut event.x_root,
                    &mut event.y_root,
                    &mut event.x,
                    &mut event.y,
                    &mut event.state,
                );
            }
        }
        if event.window != focused_window {
            return;
        }
        for (kind, mask) in [
            (xlib::ButtonPress, xlib::ButtonPressMask),
            (xlib::ButtonRelease, xlib::ButtonReleaseMask),
        ] {
            event.type_ = kind;
            let mut raw: xlib::XEvent = event.into();
            self.send_xevent(event.window, xlib::False, mask, &mut raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_x_numbers_and_back() {
        assert_eq!(button_from_x(3), Button::Button3);
        assert_eq!(button_to_x(Button::Button3), 3);
        assert_eq!(button_from_x(4), Button::Button4);
        assert_eq!(button_from_x(9), Button::Zero);
    }
}
