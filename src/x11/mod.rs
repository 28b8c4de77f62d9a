//! X11 backend: Xlib connections and the XRandR queries.

extern crate x11;

pub mod context;
pub use self::context::{X11Connector, X11OwnedDisplay};
pub mod xrandr;
