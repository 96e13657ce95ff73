use std::sync::Arc;

use crate::foundation::error::{RoundelError, RoundelResult};

/// Pixel layout of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// One alpha byte per pixel.
    Alpha8,
    /// Four bytes per pixel, premultiplied RGBA.
    Rgba8Premul,
}

impl PixelFormat {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Alpha8 => 1,
            PixelFormat::Rgba8Premul => 4,
        }
    }
}

/// An owned, tightly packed, row-major pixel buffer.
///
/// RGBA buffers are premultiplied end-to-end in the render path; straight
/// RGBA appears only at the host boundaries. Buffers are recreated whole on
/// size change, never resized in place.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout of `data`.
    pub format: PixelFormat,
    /// Pixel bytes, exactly `width * height * bytes_per_pixel` long.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing bytes, validating dimensions and byte length.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> RoundelResult<Self> {
        if width == 0 || height == 0 {
            return Err(RoundelError::validation(
                "PixelBuffer dimensions must be > 0",
            ));
        }
        let expected = (width as usize) * (height as usize) * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(RoundelError::validation(format!(
                "PixelBuffer byte length {} does not match {}x{} {:?} (expected {})",
                data.len(),
                width,
                height,
                format,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Allocate a zero-filled buffer (fully transparent for RGBA).
    pub fn zeroed(width: u32, height: u32, format: PixelFormat) -> RoundelResult<Self> {
        if width == 0 || height == 0 {
            return Err(RoundelError::validation(
                "PixelBuffer dimensions must be > 0",
            ));
        }
        let len = (width as usize) * (height as usize) * format.bytes_per_pixel();
        Ok(Self {
            width,
            height,
            format,
            data: vec![0; len],
        })
    }

    /// Straight (non-premultiplied) RGBA8 copy of an `Rgba8Premul` buffer,
    /// for export at the host boundary.
    pub fn to_straight_rgba8(&self) -> RoundelResult<Vec<u8>> {
        if self.format != PixelFormat::Rgba8Premul {
            return Err(RoundelError::validation(
                "to_straight_rgba8 requires an Rgba8Premul buffer",
            ));
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            if a == 255 {
                continue;
            }
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            let a = u16::from(a);
            for c in 0..3 {
                let v = (u16::from(px[c]) * 255 + a / 2) / a;
                px[c] = v.min(255) as u8;
            }
        }
        Ok(out)
    }
}

/// A host-supplied source image in straight RGBA8.
///
/// Read-only to the core; strategies re-read it on every rebuild and own any
/// scaled or masked products they derive from it. The byte payload is shared,
/// so clones are cheap.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight RGBA8 bytes, tightly packed, row-major.
    pub data: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap straight RGBA8 bytes, validating dimensions and byte length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> RoundelResult<Self> {
        if width == 0 || height == 0 {
            return Err(RoundelError::validation(
                "SourceImage dimensions must be > 0",
            ));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(RoundelError::validation(format!(
                "SourceImage byte length {} does not match {}x{} rgba8 (expected {})",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/buffer.rs"]
mod tests;
