//! The one owner of the Xlib connection. Every request the display server makes goes
//! through `XWrap`.
#![allow(clippy::used_underscore_binding)]
use super::xatom::XAtom;
use super::xcursor::XCursor;
use nwm_core::config::{Config, Keybind};
use nwm_core::errors::{NwmError, Result};
use nwm_core::models::FocusBehaviour;
use nwm_core::utils::modmask_lookup::{self, ModMask};
use std::ffi::CString;
use std::os::raw::{c_char, c_double, c_int, c_long, c_short, c_ulong};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::{ptr, slice};
use tokio::sync::{Notify, oneshot};
use tokio::time::Duration;

use x11_dl::xlib;
use x11_dl::xrandr::Xrandr;

mod getters;
mod keyboard;
mod mouse;
mod setters;
mod window;

pub use mouse::{button_from_x, button_to_x};

type WindowStateConst = c_long;
pub const WITHDRAWN_STATE: WindowStateConst = 0;
pub const NORMAL_STATE: WindowStateConst = 1;
pub const ICONIC_STATE: WindowStateConst = 2;
const MAX_PROPERTY_VALUE_LEN: c_long = 4096;

pub const ROOT_EVENT_MASK: c_long = xlib::SubstructureRedirectMask
    | xlib::SubstructureNotifyMask
    | xlib::ButtonPressMask
    | xlib::PointerMotionMask
    | xlib::StructureNotifyMask;

const BUTTONMASK: c_long = xlib::ButtonPressMask | xlib::ButtonReleaseMask | xlib::ButtonMotionMask;
const MOUSEMASK: c_long = BUTTONMASK | xlib::PointerMotionMask;

const X_CONFIGUREWINDOW: u8 = 12;
const X_GRABBUTTON: u8 = 28;
const X_GRABKEY: u8 = 33;
const X_SETINPUTFOCUS: u8 = 42;

/// Set by the startup error handler when selecting substructure redirect fails.
static OTHER_WM: AtomicBool = AtomicBool::new(false);

/// Logs what X reports as failed. Windows vanish between us hearing about them and touching
/// them, so the usual suspects only show up at debug level.
pub extern "C" fn on_error_from_xlib(
    _: *mut xlib::Display,
    event: *mut xlib::XErrorEvent,
) -> c_int {
    let xlib::XErrorEvent {
        error_code,
        request_code,
        ..
    } = unsafe { *event };
    let expected = match (request_code, error_code) {
        (_, xlib::BadWindow) => true,
        (X_CONFIGUREWINDOW | X_SETINPUTFOCUS, xlib::BadMatch) => true,
        (X_GRABBUTTON | X_GRABKEY, xlib::BadAccess) => true,
        _ => false,
    };
    if expected {
        tracing::debug!("X error: request {} failed with code {}", request_code, error_code);
    } else {
        tracing::warn!("X error: request {} failed with code {}", request_code, error_code);
    }
    0
}

pub extern "C" fn on_error_from_xlib_dummy(
    _: *mut xlib::Display,
    _: *mut xlib::XErrorEvent,
) -> c_int {
    0
}

extern "C" fn startup_check_for_other_wm(
    _: *mut xlib::Display,
    _: *mut xlib::XErrorEvent,
) -> c_int {
    OTHER_WM.store(true, Ordering::SeqCst);
    0
}

/// Border pixels for each kind of window.
#[derive(Debug, Default, Clone, Copy)]
pub struct Colors {
    normal: c_ulong,
    floating: c_ulong,
    active: c_ulong,
}

#[derive(Debug, Clone)]
pub enum XlibError {
    FailedStatus,
    RootWindowNotFound,
}

/// The connection, the atoms and cursors interned on it, and what we remember about the
/// windows on it.
pub struct XWrap {
    xlib: xlib::Xlib,
    display: *mut xlib::Display,
    root: xlib::Window,
    pub atoms: XAtom,
    cursors: XCursor,
    colors: Colors,
    pub managed_windows: Vec<xlib::Window>,
    pub focused_window: xlib::Window,
    pub focus_behaviour: FocusBehaviour,
    pub mouse_key_mask: ModMask,
    pub keybinds: Vec<Keybind>,
    /// A move or resize holds the pointer.
    pub dragging: bool,
    _task_guard: oneshot::Receiver<()>,
    pub task_notify: Arc<Notify>,
    pub motion_event_limiter: c_ulong,
    pub refresh_rate: c_short,
}

impl XWrap {
    /// Opens the display and starts watching its socket.
    ///
    /// # Errors
    ///
    /// Errors if libX11 cannot be loaded, the display cannot be opened, or another window
    /// manager already holds substructure redirect on the root window.
    pub fn new() -> Result<Self> {
        let xlib = xlib::Xlib::open().map_err(|err| NwmError::DisplayConnection(err.to_string()))?;
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        if display.is_null() {
            return Err(NwmError::DisplayConnection(
                "XOpenDisplay returned no display, is DISPLAY set?".to_owned(),
            ));
        }

        let fd = unsafe { (xlib.XConnectionNumber)(display) };
        let (_task_guard, task_notify) = watch_socket(fd)?;

        let atoms = XAtom::new(&xlib, display);
        let cursors = XCursor::new(&xlib, display);
        let root = unsafe { (xlib.XDefaultRootWindow)(display) };
        let refresh_rate = refresh_rate(display, root);
        tracing::debug!("Refresh Rate: {}", refresh_rate);

        let xw = Self {
            xlib,
            display,
            root,
            atoms,
            cursors,
            colors: Colors::default(),
            managed_windows: vec![],
            focused_window: root,
            focus_behaviour: FocusBehaviour::default(),
            mouse_key_mask: ModMask::Zero,
            keybinds: vec![],
            dragging: false,
            _task_guard,
            task_notify,
            motion_event_limiter: 0,
            refresh_rate,
        };

        // Only one client may select substructure redirect on the root.
        unsafe {
            (xw.xlib.XSetErrorHandler)(Some(startup_check_for_other_wm));
            (xw.xlib.XSelectInput)(xw.display, root, xlib::SubstructureRedirectMask);
        };
        xw.sync();
        if OTHER_WM.load(Ordering::SeqCst) {
            return Err(NwmError::OtherWindowManager);
        }

        unsafe { (xw.xlib.XSetErrorHandler)(Some(on_error_from_xlib)) };
        xw.sync();
        Ok(xw)
    }

    /// Takes over the root window: event masks, EWMH support, key grabs and border colors.
    pub fn init(&mut self, config: &impl Config) {
        self.focus_behaviour = config.focus_behaviour();
        self.mouse_key_mask = modmask_lookup::into_modmask(&config.mousekey());
        self.colors = Colors {
            normal: self.get_color(&config.default_border_color()),
            floating: self.get_color(&config.floating_border_color()),
            active: self.get_color(&config.focused_border_color()),
        };

        let mut attrs: xlib::XSetWindowAttributes = unsafe { std::mem::zeroed() };
        attrs.cursor = self.cursors.normal;
        attrs.event_mask = ROOT_EVENT_MASK;
        self.change_window_attributes(self.root, xlib::CWEventMask | xlib::CWCursor, attrs);
        self.subscribe_to_event(self.root, ROOT_EVENT_MASK);

        // EWMH compliance.
        let supported: Vec<c_long> = self
            .atoms
            .net_supported()
            .iter()
            .map(|&atom| atom as c_long)
            .collect();
        self.replace_property_long(self.root, self.atoms.NetSupported, xlib::XA_ATOM, &supported);
        unsafe { (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetClientList) };
        self.set_desktop_prop_string("nwm", self.atoms.NetWMName, self.atoms.UTF8String);
        self.set_desktop_prop_c_ulong(
            self.root as c_ulong,
            self.atoms.NetSupportingWmCheck,
            xlib::XA_WINDOW,
        );
        self.set_desktop_names(&config.workspace_labels());

        self.keybinds = config.mapped_bindings();
        self.reset_grabs();

        self.sync();
    }

    /// Publishes `_NET_NUMBER_OF_DESKTOPS` and `_NET_DESKTOP_NAMES`.
    pub fn set_desktop_names(&self, labels: &[String]) {
        self.set_desktop_prop(&[labels.len() as u32], self.atoms.NetNumberOfDesktops);
        let names: Vec<CString> = labels
            .iter()
            .map(|label| CString::new(label.as_str()).unwrap_or_default())
            .collect();
        let mut pointers: Vec<*mut c_char> =
            names.iter().map(|name| name.as_ptr().cast_mut()).collect();
        unsafe {
            let mut text: xlib::XTextProperty = std::mem::zeroed();
            (self.xlib.Xutf8TextListToTextProperty)(
                self.display,
                pointers.as_mut_ptr(),
                pointers.len() as i32,
                xlib::XUTF8StringStyle,
                &mut text,
            );
            (self.xlib.XSetTextProperty)(
                self.display,
                self.root,
                &mut text,
                self.atoms.NetDesktopNames,
            );
            if !text.value.is_null() {
                (self.xlib.XFree)(text.value.cast());
            }
        }
    }

    /// Sends a `WM_PROTOCOLS` client message, if the window takes it.
    fn send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        if !self.can_send_xevent_atom(window, atom) {
            return false;
        }
        let mut message: xlib::XClientMessageEvent = unsafe { std::mem::zeroed() };
        message.type_ = xlib::ClientMessage;
        message.window = window;
        message.message_type = self.atoms.WMProtocols;
        message.format = 32;
        message.data.set_long(0, atom as c_long);
        message.data.set_long(1, xlib::CurrentTime as c_long);
        let mut event = xlib::XEvent::from(message);
        self.send_xevent(window, xlib::False, xlib::NoEventMask, &mut event);
        true
    }

    pub fn send_xevent(
        &self,
        window: xlib::Window,
        propagate: c_int,
        mask: c_long,
        event: &mut xlib::XEvent,
    ) {
        unsafe { (self.xlib.XSendEvent)(self.display, window, propagate, mask, event) };
        self.sync();
    }

    /// Whether the window lists `atom` in its `WM_PROTOCOLS`.
    fn can_send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        let mut protocols: *mut xlib::Atom = ptr::null_mut();
        let mut count: c_int = 0;
        let status =
            unsafe { (self.xlib.XGetWMProtocols)(self.display, window, &mut protocols, &mut count) };
        if status == 0 || protocols.is_null() {
            return false;
        }
        let supported =
            unsafe { slice::from_raw_parts(protocols, count as usize) }.contains(&atom);
        unsafe { (self.xlib.XFree)(protocols.cast()) };
        supported
    }

    /// Starts a move or resize: the pointer is held by the root until `end_drag`.
    pub fn begin_drag(&mut self, resize: bool) {
        if self.dragging {
            self.ungrab_pointer();
        }
        let cursor = if resize {
            self.cursors.resize
        } else {
            self.cursors.move_
        };
        self.grab_pointer(cursor);
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.ungrab_pointer();
        self.dragging = false;
    }

    /// Flushes and waits until the server processed everything.
    pub fn sync(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }

    /// Flush the xserver.
    pub fn flush(&self) {
        unsafe { (self.xlib.XFlush)(self.display) };
    }

    /// Events already read from the socket and waiting.
    #[must_use]
    pub fn queue_len(&self) -> i32 {
        unsafe { (self.xlib.XPending)(self.display) }
    }
}

impl Drop for XWrap {
    fn drop(&mut self) {
        tracing::debug!("Releasing the display");
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
        }
        if self.dragging {
            self.ungrab_pointer();
        }
        self.cursors.release(&self.xlib, self.display);
        self.sync();
        unsafe { (self.xlib.XCloseDisplay)(self.display) };
    }
}

/// Wakes `task_notify` whenever the X socket has data. The watcher stops once the returned
/// receiver is dropped.
fn watch_socket(fd: c_int) -> Result<(oneshot::Receiver<()>, Arc<Notify>)> {
    const X_SOCKET: mio::Token = mio::Token(0);
    let mut poll = mio::Poll::new()?;
    poll.registry().register(
        &mut mio::unix::SourceFd(&fd),
        X_SOCKET,
        mio::Interest::READABLE,
    )?;

    let (alive, guard) = oneshot::channel::<()>();
    let notify = Arc::new(Notify::new());
    let readable = notify.clone();
    tokio::task::spawn_blocking(move || {
        let mut events = mio::Events::with_capacity(1);
        while !alive.is_closed() {
            if let Err(err) = poll.poll(&mut events, Some(Duration::from_millis(100))) {
                tracing::warn!("Xlib socket poll failed with {:?}", err);
                continue;
            }
            if events.iter().any(|event| event.token() == X_SOCKET) {
                readable.notify_one();
            }
        }
    });
    Ok((guard, notify))
}

/// The highest refresh rate of the active CRTCs, used to throttle pointer motion. 60 when
/// XRandR can't tell.
fn refresh_rate(display: *mut xlib::Display, root: xlib::Window) -> c_short {
    const FALLBACK: c_short = 60;
    let Ok(xrandr) = Xrandr::open() else {
        return FALLBACK;
    };
    let resources = unsafe { (xrandr.XRRGetScreenResources)(display, root) };
    if resources.is_null() {
        return FALLBACK;
    }
    let (crtcs, modes) = unsafe {
        (
            slice::from_raw_parts((*resources).crtcs, (*resources).ncrtc as usize),
            slice::from_raw_parts((*resources).modes, (*resources).nmode as usize),
        )
    };

    let mut active_modes = Vec::with_capacity(crtcs.len());
    for &crtc in crtcs {
        let info = unsafe { (xrandr.XRRGetCrtcInfo)(display, resources, crtc) };
        if info.is_null() {
            continue;
        }
        let mode = unsafe { (*info).mode };
        unsafe { (xrandr.XRRFreeCrtcInfo)(info) };
        if mode != 0 {
            active_modes.push(mode);
        }
    }

    let fastest = modes
        .iter()
        .filter(|mode| active_modes.contains(&mode.id) && mode.hTotal > 0 && mode.vTotal > 0)
        .map(|mode| {
            let frame = c_double::from(mode.hTotal) * c_double::from(mode.vTotal);
            (mode.dotClock as c_double / frame) as c_short
        })
        .max();
    unsafe { (xrandr.XRRFreeScreenResources)(resources) };
    fastest.unwrap_or(FALLBACK)
}
