//! Video modes and the raw mode descriptors they are built from.

use std::fmt::{self, Display, Formatter};

/// A screen resolution paired with a color depth.
///
/// Equality is structural: two modes are the same if all three fields are.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct VideoMode {
    /// Width, in pixels.
    pub width: u32,
    /// Height, in pixels.
    pub height: u32,
    /// Color depth, in bits per pixel.
    pub bits_per_pixel: u32,
}

impl VideoMode {
    /// Shorthand for building a `VideoMode` from its three fields.
    pub fn new(width: u32, height: u32, bits_per_pixel: u32) -> Self {
        Self { width, height, bits_per_pixel }
    }
}

impl Display for VideoMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}x{}, {} bpp", self.width, self.height, self.bits_per_pixel)
    }
}

/// Server-side identifier of a mode in a screen's global mode table.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModeId(pub u64);

/// One entry of a screen's global mode table.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct ModeDescriptor {
    /// The mode's ID, which outputs refer to.
    pub id: ModeId,
    /// Unrotated width, in pixels.
    pub width: u32,
    /// Unrotated height, in pixels.
    pub height: u32,
}

/// Screen-wide orientation.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Rotation {
    /// Normal orientation.
    None,
    /// Rotated a quarter turn; width and height are swapped.
    Rotate90,
    /// Upside down.
    Rotate180,
    /// Rotated three quarters of a turn; width and height are swapped.
    Rotate270,
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::None
    }
}

impl Rotation {
    /// Does this rotation swap the effective width and height of modes?
    pub fn swaps_dimensions(&self) -> bool {
        match *self {
            Rotation::Rotate90 | Rotation::Rotate270 => true,
            Rotation::None | Rotation::Rotate180 => false,
        }
    }
    /// Returns `mode` as seen on a screen with this rotation.
    pub fn apply(&self, mut mode: VideoMode) -> VideoMode {
        if self.swaps_dimensions() {
            ::std::mem::swap(&mut mode.width, &mut mode.height);
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_zeroed() {
        assert_eq!(VideoMode::default(), VideoMode::new(0, 0, 0));
    }

    #[test]
    fn only_quarter_turns_swap() {
        let m = VideoMode::new(1920, 1080, 24);
        assert_eq!(Rotation::None.apply(m), m);
        assert_eq!(Rotation::Rotate180.apply(m), m);
        assert_eq!(Rotation::Rotate90.apply(m), VideoMode::new(1080, 1920, 24));
        assert_eq!(Rotation::Rotate270.apply(m), VideoMode::new(1080, 1920, 24));
    }

    #[test]
    fn display() {
        assert_eq!(VideoMode::new(1280, 720, 32).to_string(), "1280x720, 32 bpp");
    }
}
