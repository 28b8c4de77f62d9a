//! The two video mode queries, over any [`Connect`] implementation.
//!
//! Both open their own connection, go through the same chain of fetches,
//! and release everything they fetched in reverse order before closing
//! the connection, whichever step failed.
//! Neither ever fails: errors are reported once to the `DiagnosticSink`
//! and turn into an empty (or zeroed) result.

use crate::backend::{
    Connect, Connection, Depths, OutputInfo, ScreenConfig, ScreenResources,
    RANDR_EXTENSION_NAME,
};
use crate::diagnostic::{DiagnosticSink, LogSink};
use crate::error::{Error, ErrorKind, Result};
use crate::mode::{ModeDescriptor, ModeId, Rotation, VideoMode};

/// Which query a diagnostic is about.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
enum Query {
    FullscreenModes,
    DesktopMode,
}

impl Query {
    fn describe(&self) -> &'static str {
        match *self {
            Query::FullscreenModes => "supported video modes",
            Query::DesktopMode => "desktop video mode",
        }
    }
}

/// Formats the single diagnostic reported when `query` fails with `e`.
fn diagnostic_message(e: &Error, query: Query) -> String {
    match e.reason {
        None => format!("{} while trying to get the {}", e.kind, query.describe()),
        Some(ref reason) => format!("{} while trying to get the {} ({})", e.kind, query.describe(), reason),
    }
}

/// Runs video mode queries against the display server `C` connects to,
/// reporting failures to `S`.
#[derive(Debug, Default, Clone)]
pub struct VideoModeQuery<C, S = LogSink> {
    connector: C,
    sink: S,
}

impl<C: Connect, S: DiagnosticSink> VideoModeQuery<C, S> {
    /// Creates a query runner. No connection is opened until a query runs.
    pub fn new(connector: C, sink: S) -> Self {
        Self { connector, sink }
    }

    /// Gets every mode the primary output supports, at every depth the
    /// screen supports, deduplicated, in discovery order.
    ///
    /// Returns an empty list on failure.
    pub fn fullscreen_modes(&self) -> Vec<VideoMode> {
        self.try_fullscreen_modes().unwrap_or_else(|e| {
            self.report(&e, Query::FullscreenModes);
            Vec::new()
        })
    }

    /// Gets the primary output's first advertised mode, at the screen's
    /// default depth.
    ///
    /// Note that this is the *first* mode the output lists, which is
    /// usually, but not necessarily, the one currently in use.
    ///
    /// Returns `VideoMode::default()` on failure.
    pub fn desktop_mode(&self) -> VideoMode {
        self.try_desktop_mode().unwrap_or_else(|e| {
            self.report(&e, Query::DesktopMode);
            VideoMode::default()
        })
    }

    /// Is `mode` one of the `fullscreen_modes()`?
    pub fn is_valid(&self, mode: &VideoMode) -> bool {
        self.fullscreen_modes().contains(mode)
    }

    fn report(&self, e: &Error, query: Query) {
        self.sink.emit(&diagnostic_message(e, query));
    }

    fn try_fullscreen_modes(&self) -> Result<Vec<VideoMode>> {
        // Locals are dropped in reverse order, which releases depths,
        // output info, resources, config then the connection.
        let conn = self.connector.open()?;
        let screen = conn.default_screen();
        probe_extension(&conn)?;
        let config = conn.screen_config(screen).ok_or(ErrorKind::ConfigUnavailable)?;
        let rotation = config.rotation();
        let resources = conn.screen_resources(screen).ok_or(ErrorKind::ResourcesUnavailable)?;
        let output = conn.primary_output_info(&resources, screen).ok_or(ErrorKind::OutputInfoUnavailable)?;
        let depths = conn.depths(screen).ok_or(ErrorKind::DepthsUnavailable)?;
        if depths.depths().is_empty() {
            return Err(Error::new(ErrorKind::DepthsUnavailable, "the screen reports no depths"));
        }
        let modes = join_modes(depths.depths(), output.modes(), resources.descriptors(), rotation);
        debug!("Found {} distinct video modes ({} depths, {} output modes, {} descriptors, rotation: {:?})",
            modes.len(), depths.depths().len(), output.modes().len(), resources.descriptors().len(), rotation);
        Ok(modes)
    }

    fn try_desktop_mode(&self) -> Result<VideoMode> {
        let conn = self.connector.open()?;
        let screen = conn.default_screen();
        probe_extension(&conn)?;
        let config = conn.screen_config(screen).ok_or(ErrorKind::ConfigUnavailable)?;
        let rotation = config.rotation();
        let resources = conn.screen_resources(screen).ok_or(ErrorKind::ResourcesUnavailable)?;
        let output = conn.primary_output_info(&resources, screen).ok_or(ErrorKind::OutputInfoUnavailable)?;
        let first = match output.modes().first() {
            Some(&id) => id,
            None => return Err(Error::new(ErrorKind::OutputInfoUnavailable, "the primary output advertises no modes")),
        };
        let depth = conn.default_depth(screen);
        let mode = resolve_desktop_mode(first, resources.descriptors(), depth, rotation).unwrap_or_else(|| {
            warn!("Mode {:?} advertised by the primary output is not in the screen's mode table", first);
            VideoMode::default()
        });
        Ok(mode)
    }
}

fn probe_extension<X: Connection>(conn: &X) -> Result<()> {
    if conn.query_extension(RANDR_EXTENSION_NAME) {
        Ok(())
    } else {
        Err(ErrorKind::ExtensionUnsupported.into())
    }
}

/// Combines depths with the output's supported modes into a catalog.
///
/// For each depth, for each of the output's mode IDs, for each descriptor
/// with that ID, the (rotated) mode is appended unless already present.
/// The result keeps first-seen order and has no duplicates.
pub fn join_modes(depths: &[u32], output_modes: &[ModeId], descriptors: &[ModeDescriptor], rotation: Rotation) -> Vec<VideoMode> {
    let mut catalog: Vec<VideoMode> = Vec::new();
    for &depth in depths {
        for &id in output_modes {
            for desc in descriptors.iter().filter(|desc| desc.id == id) {
                let mode = rotation.apply(VideoMode::new(desc.width, desc.height, depth));
                if !catalog.contains(&mode) {
                    catalog.push(mode);
                }
            }
        }
    }
    catalog
}

/// Looks up `id` in `descriptors` and pairs it with `depth`, rotated.
///
/// `None` if no descriptor has that ID.
pub fn resolve_desktop_mode(id: ModeId, descriptors: &[ModeDescriptor], depth: u32, rotation: Rotation) -> Option<VideoMode> {
    descriptors.iter()
        .find(|desc| desc.id == id)
        .map(|desc| rotation.apply(VideoMode::new(desc.width, desc.height, depth)))
}
