//! The display server, as seen by video mode queries.
//!
//! A [`Connect`] opens a [`Connection`], which is closed when dropped.
//! Every fetch on a `Connection` returns an owned query result which
//! releases itself when dropped, and which borrows the connection so that
//! it can't outlive it. Dropping locals in reverse declaration order
//! then gives the required release order for free.

use crate::error::Result;
use crate::mode::{ModeDescriptor, ModeId, Rotation};

/// Name of the mode-configuration extension, as given to `query_extension()`.
pub const RANDR_EXTENSION_NAME: &str = "RANDR";

/// Something that can open connections to a display server.
pub trait Connect {
    /// The connection type. Dropping it closes the connection.
    type Conn: Connection;
    /// Opens a new, independent connection.
    fn open(&self) -> Result<Self::Conn>;
}

/// An open connection to a display server.
pub trait Connection {
    /// Current screen configuration.
    type Config<'c>: ScreenConfig where Self: 'c;
    /// Global mode table of a screen.
    type Resources<'c>: ScreenResources where Self: 'c;
    /// Info about the primary output.
    type OutputInfo<'c>: OutputInfo where Self: 'c;
    /// Supported depths of a screen.
    type Depths<'c>: Depths where Self: 'c;

    /// The index of the default screen.
    fn default_screen(&self) -> i32;
    /// The default depth of `screen`, in bits per pixel.
    fn default_depth(&self, screen: i32) -> u32;
    /// Is the extension named `name` present?
    fn query_extension(&self, name: &str) -> bool;
    /// Fetches the current configuration of `screen`'s root window.
    fn screen_config(&self, screen: i32) -> Option<Self::Config<'_>>;
    /// Fetches the global mode table of `screen`'s root window.
    fn screen_resources(&self, screen: i32) -> Option<Self::Resources<'_>>;
    /// Fetches info about `screen`'s primary output, using `resources`.
    fn primary_output_info<'c>(&'c self, resources: &Self::Resources<'c>, screen: i32) -> Option<Self::OutputInfo<'c>>;
    /// Fetches the list of depths supported by `screen`.
    fn depths(&self, screen: i32) -> Option<Self::Depths<'_>>;
}

/// A fetched screen configuration.
pub trait ScreenConfig {
    /// The screen's current rotation.
    fn rotation(&self) -> Rotation;
}

/// A fetched global mode table.
pub trait ScreenResources {
    /// All mode descriptors, in server order.
    fn descriptors(&self) -> &[ModeDescriptor];
}

/// Fetched info about an output.
pub trait OutputInfo {
    /// IDs of the modes this output supports, in server order.
    fn modes(&self) -> &[ModeId];
}

/// A fetched depth list.
pub trait Depths {
    /// Supported depths, in bits per pixel, in server order.
    fn depths(&self) -> &[u32];
}
