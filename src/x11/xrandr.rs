// Call sequence of a video mode query:
//
// XQueryExtension("RANDR")
// XRRGetScreenInfo(root)          ; XRRConfigRotations(config)
// XRRGetScreenResources(root)
// XRRGetOutputPrimary(root)       ; XRRGetOutputInfo(res, output)
// XListDepths(screen)             (fullscreen modes only)
// XFree(depths)
// XRRFreeOutputInfo(output_info)
// XRRFreeScreenResources(res)
// XRRFreeScreenConfigInfo(config)
//
// Every query result below owns its pointer and frees it when dropped.
// It also borrows the X11OwnedDisplay it came from, so it is freed before
// the display is closed.

use std::marker::PhantomData;
use std::os::raw::{c_int, c_void};
use std::slice;

use crate::backend::{Depths, OutputInfo, ScreenConfig, ScreenResources};
use crate::error::{Error, ErrorKind, Result};
use crate::mode::{ModeDescriptor, ModeId, Rotation};

use super::x11::xlib as x;
use super::x11::xrandr as xrr;
use super::context::X11OwnedDisplay;

#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub struct XRR {
    pub event_base: c_int,
    pub error_base: c_int,
    pub major_version: c_int,
    pub minor_version: c_int,
}

impl XRR {
    pub fn query(x_display: *mut x::Display) -> Result<Self> {
        let mut xrr = XRR::default();
        let success = unsafe {
            xrr::XRRQueryExtension(x_display, &mut xrr.event_base, &mut xrr.error_base)
        };
        if success == x::False {
            return Err(Error::new(ErrorKind::ExtensionUnsupported, "XRRQueryExtension() returned False"));
        }
        let status = unsafe {
            xrr::XRRQueryVersion(x_display, &mut xrr.major_version, &mut xrr.minor_version)
        };
        if status == 0 {
            return Err(Error::new(ErrorKind::ExtensionUnsupported, format!("XRRQueryVersion() returned {}", status)));
        }
        Ok(xrr)
    }
}

/// Translates X11 rotation bits. Reflection bits are ignored.
pub fn rotation_from_x(bits: xrr::Rotation) -> Rotation {
    let bits = bits as c_int;
    if bits & xrr::RR_Rotate_90 != 0 {
        Rotation::Rotate90
    } else if bits & xrr::RR_Rotate_180 != 0 {
        Rotation::Rotate180
    } else if bits & xrr::RR_Rotate_270 != 0 {
        Rotation::Rotate270
    } else {
        Rotation::None
    }
}

unsafe fn raw_slice<'a, T>(ptr: *const T, len: c_int) -> &'a [T] {
    if ptr.is_null() || len <= 0 {
        &[]
    } else {
        slice::from_raw_parts(ptr, len as usize)
    }
}


#[derive(Debug)]
pub struct XrrScreenConfig<'c> {
    raw: *mut xrr::XRRScreenConfiguration,
    rotation: Rotation,
    _display: PhantomData<&'c X11OwnedDisplay>,
}

impl<'c> XrrScreenConfig<'c> {
    /// Takes ownership of `raw`, which must come from `XRRGetScreenInfo()`.
    pub unsafe fn from_raw(raw: *mut xrr::XRRScreenConfiguration) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        let mut current_rotation: xrr::Rotation = 0;
        xrr::XRRConfigRotations(raw, &mut current_rotation);
        Some(Self { raw, rotation: rotation_from_x(current_rotation), _display: PhantomData })
    }
}

impl<'c> Drop for XrrScreenConfig<'c> {
    fn drop(&mut self) {
        unsafe {
            xrr::XRRFreeScreenConfigInfo(self.raw);
        }
        trace!("Freed XRRScreenConfiguration {:?}", self.raw);
    }
}

impl<'c> ScreenConfig for XrrScreenConfig<'c> {
    fn rotation(&self) -> Rotation {
        self.rotation
    }
}


#[derive(Debug)]
pub struct XrrScreenResources<'c> {
    raw: *mut xrr::XRRScreenResources,
    descriptors: Vec<ModeDescriptor>,
    _display: PhantomData<&'c X11OwnedDisplay>,
}

impl<'c> XrrScreenResources<'c> {
    /// Takes ownership of `raw`, which must come from `XRRGetScreenResources()`.
    pub unsafe fn from_raw(raw: *mut xrr::XRRScreenResources) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        let descriptors = raw_slice((*raw).modes, (*raw).nmode).iter().map(|info| ModeDescriptor {
            id: ModeId(info.id as u64),
            width: info.width as u32,
            height: info.height as u32,
        }).collect();
        Some(Self { raw, descriptors, _display: PhantomData })
    }
    pub fn as_raw(&self) -> *mut xrr::XRRScreenResources {
        self.raw
    }
}

impl<'c> Drop for XrrScreenResources<'c> {
    fn drop(&mut self) {
        unsafe {
            xrr::XRRFreeScreenResources(self.raw);
        }
        trace!("Freed XRRScreenResources {:?}", self.raw);
    }
}

impl<'c> ScreenResources for XrrScreenResources<'c> {
    fn descriptors(&self) -> &[ModeDescriptor] {
        &self.descriptors
    }
}


#[derive(Debug)]
pub struct XrrOutputInfo<'c> {
    raw: *mut xrr::XRROutputInfo,
    modes: Vec<ModeId>,
    _display: PhantomData<&'c X11OwnedDisplay>,
}

impl<'c> XrrOutputInfo<'c> {
    /// Takes ownership of `raw`, which must come from `XRRGetOutputInfo()`.
    pub unsafe fn from_raw(raw: *mut xrr::XRROutputInfo) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        let modes = raw_slice((*raw).modes, (*raw).nmode).iter().map(|&id| ModeId(id as u64)).collect();
        Some(Self { raw, modes, _display: PhantomData })
    }
}

impl<'c> Drop for XrrOutputInfo<'c> {
    fn drop(&mut self) {
        unsafe {
            xrr::XRRFreeOutputInfo(self.raw);
        }
        trace!("Freed XRROutputInfo {:?}", self.raw);
    }
}

impl<'c> OutputInfo for XrrOutputInfo<'c> {
    fn modes(&self) -> &[ModeId] {
        &self.modes
    }
}


#[derive(Debug)]
pub struct XDepths<'c> {
    raw: *mut c_int,
    depths: Vec<u32>,
    _display: PhantomData<&'c X11OwnedDisplay>,
}

impl<'c> XDepths<'c> {
    /// Takes ownership of `raw`, which must come from `XListDepths()`.
    pub unsafe fn from_raw(raw: *mut c_int, count: c_int) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        let depths = raw_slice(raw, count).iter().map(|&d| d.max(0) as u32).collect();
        Some(Self { raw, depths, _display: PhantomData })
    }
}

impl<'c> Drop for XDepths<'c> {
    fn drop(&mut self) {
        unsafe {
            x::XFree(self.raw as *mut c_void);
        }
        trace!("Freed depth list {:?}", self.raw);
    }
}

impl<'c> Depths for XDepths<'c> {
    fn depths(&self) -> &[u32] {
        &self.depths
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_bits() {
        assert_eq!(rotation_from_x(xrr::RR_Rotate_0 as _), Rotation::None);
        assert_eq!(rotation_from_x(xrr::RR_Rotate_90 as _), Rotation::Rotate90);
        assert_eq!(rotation_from_x(xrr::RR_Rotate_180 as _), Rotation::Rotate180);
        assert_eq!(rotation_from_x(xrr::RR_Rotate_270 as _), Rotation::Rotate270);
        assert_eq!(rotation_from_x((xrr::RR_Rotate_90 | xrr::RR_Reflect_X) as _), Rotation::Rotate90);
        assert_eq!(rotation_from_x(xrr::RR_Reflect_Y as _), Rotation::None);
    }

    #[test]
    fn null_results_are_fetch_failures() {
        unsafe {
            assert!(XrrScreenConfig::from_raw(::std::ptr::null_mut()).is_none());
            assert!(XrrScreenResources::from_raw(::std::ptr::null_mut()).is_none());
            assert!(XrrOutputInfo::from_raw(::std::ptr::null_mut()).is_none());
            assert!(XDepths::from_raw(::std::ptr::null_mut(), 3).is_none());
        }
    }
}
