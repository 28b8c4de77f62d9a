use std::ptr;
use std::ffi::{CStr, CString};
use std::os::raw::c_int;

use crate::backend::{Connect, Connection, RANDR_EXTENSION_NAME};
use crate::diagnostic::LogSink;
use crate::error::{Error, ErrorKind, Result};
use crate::query::VideoModeQuery;

use super::x11::xlib as x;
use super::x11::xrandr as xrr;
use super::xrandr::{XRR, XrrScreenConfig, XrrScreenResources, XrrOutputInfo, XDepths};


/// On X11-based targets, queries run against the default X display
/// (given by `$DISPLAY`) unless told otherwise.
impl VideoModeQuery<X11Connector, LogSink> {
    /// Queries the default X display, reporting to the `log` crate.
    pub fn x11() -> Self {
        Self::new(X11Connector::new(), LogSink)
    }
    /// X11-only specialization of `x11()` where you can specify
    /// the name given to `XOpenDisplay()`.
    pub fn with_x11_display_name(name: Option<&CStr>) -> Self {
        Self::new(X11Connector::with_display_name(name), LogSink)
    }
}

/// Opens a fresh X display for every query.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub struct X11Connector {
    display_name: Option<CString>,
}

impl X11Connector {
    /// Connects to whatever `$DISPLAY` names.
    pub fn new() -> Self {
        Self::default()
    }
    /// Connects to the display named `name`, or to `$DISPLAY` if `None`.
    pub fn with_display_name(name: Option<&CStr>) -> Self {
        Self { display_name: name.map(CStr::to_owned) }
    }
}

impl Connect for X11Connector {
    type Conn = X11OwnedDisplay;

    fn open(&self) -> Result<X11OwnedDisplay> {
        let x_display_name_ptr = match self.display_name {
            Some(ref s) => s.as_ptr(),
            None => ptr::null(),
        };
        let (x_display, actual_name) = unsafe {
            let x_display = x::XOpenDisplay(x_display_name_ptr);
            // XDisplayName() resolves NULL to $DISPLAY, just like XOpenDisplay() does.
            let p = x::XDisplayName(x_display_name_ptr);
            let actual_name = if p.is_null() {
                String::new()
            } else {
                CStr::from_ptr(p).to_string_lossy().into_owned()
            };
            (x_display, actual_name)
        };
        if x_display.is_null() {
            return Err(Error::new(ErrorKind::ConnectionFailure, format!("could not open X display `{}`", actual_name)));
        }
        trace!("Opened X Display `{}`", actual_name);
        Ok(X11OwnedDisplay(x_display))
    }
}

/// An "owned" Xlib `Display` pointer, which is closed when dropped.
#[derive(Debug)]
pub struct X11OwnedDisplay(*mut x::Display);

impl Drop for X11OwnedDisplay {
    fn drop(&mut self) {
        unsafe {
            close_x_display(self.0)
        }
    }
}

unsafe fn close_x_display(x_display: *mut x::Display) {
    x::XSync(x_display, x::False);
    let name = {
        let p = x::XDisplayString(x_display);
        CStr::from_ptr(p).to_string_lossy().into_owned()
        // ^ into_owned() is critical here to clone the C string
        // before closing the display.
    };
    x::XCloseDisplay(x_display);
    trace!("Closed X Display `{}`", name);
}

impl X11OwnedDisplay {
    fn x_root_window(&self, screen: c_int) -> x::Window {
        unsafe {
            x::XRootWindow(self.0, screen)
        }
    }
}

impl Connection for X11OwnedDisplay {
    type Config<'c> = XrrScreenConfig<'c>;
    type Resources<'c> = XrrScreenResources<'c>;
    type OutputInfo<'c> = XrrOutputInfo<'c>;
    type Depths<'c> = XDepths<'c>;

    fn default_screen(&self) -> i32 {
        unsafe {
            x::XDefaultScreen(self.0)
        }
    }
    fn default_depth(&self, screen: i32) -> u32 {
        let depth = unsafe {
            x::XDefaultDepth(self.0, screen)
        };
        depth.max(0) as u32
    }
    fn query_extension(&self, name: &str) -> bool {
        let c_name = match CString::new(name) {
            Ok(s) => s,
            Err(_) => return false,
        };
        let (mut major_opcode, mut first_event, mut first_error) = (0, 0, 0);
        let is_present = unsafe {
            x::XQueryExtension(self.0, c_name.as_ptr(), &mut major_opcode, &mut first_event, &mut first_error)
        };
        if is_present == x::False {
            return false;
        }
        trace!("Found X11 extension `{}` (major_opcode: {}, first_event: {}, first_error: {})", name, major_opcode, first_event, first_error);
        if name == RANDR_EXTENSION_NAME {
            match XRR::query(self.0) {
                Ok(xrr) => trace!("XRandR version {}.{}", xrr.major_version, xrr.minor_version),
                Err(e) => warn!("{}", e),
            }
        }
        true
    }
    fn screen_config(&self, screen: i32) -> Option<XrrScreenConfig<'_>> {
        let config = unsafe {
            xrr::XRRGetScreenInfo(self.0, self.x_root_window(screen))
        };
        unsafe {
            XrrScreenConfig::from_raw(config)
        }
    }
    fn screen_resources(&self, screen: i32) -> Option<XrrScreenResources<'_>> {
        let res = unsafe {
            xrr::XRRGetScreenResources(self.0, self.x_root_window(screen))
        };
        unsafe {
            XrrScreenResources::from_raw(res)
        }
    }
    fn primary_output_info<'c>(&'c self, resources: &XrrScreenResources<'c>, screen: i32) -> Option<XrrOutputInfo<'c>> {
        let output = unsafe {
            xrr::XRRGetOutputPrimary(self.0, self.x_root_window(screen))
        };
        // Asking for output 0 would raise BadRROutput, which is fatal with
        // the default Xlib error handler.
        if output == 0 {
            warn!("No primary output is set for screen {}", screen);
            return None;
        }
        trace!("Primary output is {}", output);
        let info = unsafe {
            xrr::XRRGetOutputInfo(self.0, resources.as_raw(), output)
        };
        unsafe {
            XrrOutputInfo::from_raw(info)
        }
    }
    fn depths(&self, screen: i32) -> Option<XDepths<'_>> {
        let mut count: c_int = 0;
        let depths = unsafe {
            x::XListDepths(self.0, screen, &mut count)
        };
        unsafe {
            XDepths::from_raw(depths, count)
        }
    }
}
