//! `Error` and `Result` types for this crate.
//!
//! None of these ever reach the caller of [`fullscreen_modes`](crate::fullscreen_modes)
//! or [`desktop_mode`](crate::desktop_mode): they are turned into a single diagnostic
//! and an empty result. They are public so that custom [`Connect`](crate::Connect)
//! implementations can report why they failed.
use std::fmt::{self, Display, Formatter};

pub(crate) type CowStr = ::std::borrow::Cow<'static, str>;

/// The step of a video mode query that failed.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// Could not open a connection to the display server.
    ConnectionFailure,
    /// The display server lacks the RandR extension.
    ///
    /// This is a degraded-capability outcome rather than a broken environment.
    ExtensionUnsupported,
    /// The current screen configuration (and thus the rotation) is unavailable.
    ConfigUnavailable,
    /// The screen's global mode table is unavailable.
    ResourcesUnavailable,
    /// The primary output's info is unavailable, or it advertises no modes.
    OutputInfoUnavailable,
    /// The screen's list of supported depths is unavailable or empty.
    DepthsUnavailable,
}

/// An `ErrorKind` packed with an optional `reason` string.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// A hopefully useful reason string, or `None` if unknown or not meaningful.
    pub reason: Option<CowStr>,
}

/// Alias to `Result<T, Error>`.
pub type Result<T> = ::std::result::Result<T, Error>;

impl ErrorKind {
    pub(crate) fn describe_quick(&self) -> &'static str {
        match *self {
            ErrorKind::ConnectionFailure => "Failed to connect to the display server",
            ErrorKind::ExtensionUnsupported => "Failed to use the RandR extension",
            ErrorKind::ConfigUnavailable => "Failed to retrieve the screen configuration",
            ErrorKind::ResourcesUnavailable => "Failed to retrieve the screen resources",
            ErrorKind::OutputInfoUnavailable => "Failed to retrieve the primary output's info",
            ErrorKind::DepthsUnavailable => "Failed to retrieve the list of supported depths",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.describe_quick())
    }
}

impl ::std::error::Error for ErrorKind {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.describe_quick())?;
        match self.reason {
            None => Ok(()),
            Some(ref s) => write!(f, " ({})", s),
        }
    }
}

impl ::std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, reason: None, }
    }
}

impl Error {
    /// Creates an `Error` of the given kind, with a reason.
    pub fn new<S: Into<CowStr>>(kind: ErrorKind, reason: S) -> Self {
        Self { kind, reason: Some(reason.into()), }
    }
}
