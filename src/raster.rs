//! `vello_cpu` plumbing shared by the compositing strategies.

use std::sync::Arc;

use kurbo::Shape as _;

use crate::foundation::core::{Affine, Rect, Rgba8};
use crate::foundation::error::{RoundelError, RoundelResult};

/// Owner of the scratch render context.
///
/// The context is recreated whenever the requested size changes and reset
/// between uses, so callers never see stale state.
pub(crate) struct Rasterizer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl Rasterizer {
    pub(crate) fn new() -> Self {
        Self { ctx: None }
    }

    /// Run `f` with a context of exactly `width x height`, reusing the
    /// cached one when the size matches.
    pub(crate) fn with_ctx<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> RoundelResult<R>,
    ) -> RoundelResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

/// Widget sides ride through `vello_cpu`, which addresses pixels in u16.
pub(crate) fn side_u16(side: u32) -> RoundelResult<u16> {
    side.try_into()
        .map_err(|_| RoundelError::validation(format!("side {side} exceeds the u16 raster limit")))
}

/// An oval inscribed in `rect`, flattened into a drawable path.
pub(crate) fn oval_path(rect: Rect) -> vello_cpu::kurbo::BezPath {
    let e = kurbo::Ellipse::new(rect.center(), (rect.width() / 2.0, rect.height() / 2.0), 0.0);
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in e.path_elements(0.1) {
        p.push(el);
    }
    // Full-sweep ellipse elements arrive open; close so strokes join.
    if !matches!(p.elements().last(), Some(vello_cpu::kurbo::PathEl::ClosePath)) {
        p.close_path();
    }
    p
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

/// One alpha byte per pixel, extracted from a premultiplied RGBA pixmap.
pub(crate) fn extract_alpha8(pixmap: &vello_cpu::Pixmap) -> Vec<u8> {
    pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect()
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> RoundelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RoundelError::raster("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RoundelError::raster("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(RoundelError::raster("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; the bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Premultiply straight RGBA8 bytes and wrap them in a pixmap.
pub(crate) fn rgba_straight_to_pixmap_premul(
    bytes_rgba: &[u8],
    width: u32,
    height: u32,
) -> RoundelResult<vello_cpu::Pixmap> {
    let mut tmp = bytes_rgba.to_vec();
    premultiply_rgba8_in_place(&mut tmp);
    pixmap_from_premul_bytes(&tmp, width, height)
}

/// Image paint with the default sampler.
pub(crate) fn image_paint(pixmap: Arc<vello_cpu::Pixmap>) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(pixmap),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

/// Image paint that clamps edge pixels outward instead of tiling, the fill
/// analog of a clamped bitmap shader.
pub(crate) fn image_paint_clamped(pixmap: Arc<vello_cpu::Pixmap>) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(pixmap),
        sampler: vello_cpu::peniko::ImageSampler {
            x_extend: vello_cpu::peniko::Extend::Pad,
            y_extend: vello_cpu::peniko::Extend::Pad,
            ..vello_cpu::peniko::ImageSampler::default()
        },
    }
}
