use std::os::raw::{c_uint, c_ulong};
use x11_dl::xlib;

/// Glyphs of the standard X cursor font.
const XC_LEFT_PTR: c_uint = 68;
const XC_SIZING: c_uint = 120;
const XC_FLEUR: c_uint = 52;

/// Pointer shapes for the root window and for the two kinds of drag.
#[derive(Clone, Debug)]
pub struct XCursor {
    pub normal: c_ulong,
    pub resize: c_ulong,
    pub move_: c_ulong,
}

impl XCursor {
    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        let font_cursor = |shape| unsafe { (xlib.XCreateFontCursor)(dpy, shape) };
        Self {
            normal: font_cursor(XC_LEFT_PTR),
            resize: font_cursor(XC_SIZING),
            move_: font_cursor(XC_FLEUR),
        }
    }

    /// Frees the cursors, the display must still be open.
    pub fn release(&self, xlib: &xlib::Xlib, dpy: *mut xlib::Display) {
        for cursor in [self.normal, self.resize, self.move_] {
            unsafe { (xlib.XFreeCursor)(dpy, cursor) };
        }
    }
}
