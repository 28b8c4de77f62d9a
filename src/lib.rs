//! Supported fullscreen video modes, and the desktop video mode.
//!
//! This asks the display server which resolutions the primary output
//! supports and at which color depths, and what the desktop's mode is.
//! On X11-based targets, this goes through the XRandR extension.
//!
//! Both queries are total: when something goes wrong (no X server, no
//! XRandR, ...) a single diagnostic is reported and an empty list
//! (or a zeroed `VideoMode`) is returned.
//!
//! ```rust,no_run
//! # #[cfg(x11)] {
//! for mode in vidmode::fullscreen_modes() {
//!     println!("{}", mode);
//! }
//! println!("Desktop: {}", vidmode::desktop_mode());
//! # }
//! ```
//!
//! Custom display servers and diagnostic sinks can be plugged in
//! through [`Connect`] and [`DiagnosticSink`], then queried with a
//! [`VideoModeQuery`].

#![doc(html_root_url = "https://docs.rs/dmc-vidmode/0.1.0")]
#![warn(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate log;

pub mod error;
pub use error::{ErrorKind, Error, Result};
pub mod mode;
pub use mode::{VideoMode, ModeId, ModeDescriptor, Rotation};
pub mod diagnostic;
pub use diagnostic::{DiagnosticSink, LogSink};
pub mod backend;
pub use backend::{Connect, Connection, ScreenConfig, ScreenResources, OutputInfo, Depths};
pub mod query;
pub use query::VideoModeQuery;

#[cfg(x11)]
mod x11;
#[cfg(x11)]
pub use self::x11::{X11Connector, X11OwnedDisplay};

#[cfg(test)]
mod mock;

/// Gets the video modes supported in fullscreen by the primary output
/// of the default X display.
///
/// Returns an empty list (and logs an error) on failure.
#[cfg(x11)]
pub fn fullscreen_modes() -> Vec<VideoMode> {
    VideoModeQuery::x11().fullscreen_modes()
}

/// Gets the desktop video mode of the primary output of the default
/// X display.
///
/// Returns `VideoMode::default()` (and logs an error) on failure.
#[cfg(x11)]
pub fn desktop_mode() -> VideoMode {
    VideoModeQuery::x11().desktop_mode()
}
